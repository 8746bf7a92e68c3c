//! Validated entry point for appending records.

use crate::busy::{BusyFlag, BusyGuard};
use crate::error::SubmitError;
use crate::model::Record;

use super::RowStore;

/// Validates candidate records and produces the updated store.
///
/// The gateway owns a single in-flight flag. [`begin`](Self::begin) claims it
/// and returns a [`BusyGuard`]; the flag is released when the guard drops,
/// whichever way the submission ends. Clones share the same flag.
#[derive(Debug, Clone, Default)]
pub struct MutationGateway {
    in_flight: BusyFlag,
}

impl MutationGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` while a submission is in flight.
    pub fn is_submitting(&self) -> bool {
        self.in_flight.is_busy()
    }

    /// Claims the in-flight flag.
    ///
    /// Fails with [`SubmitError::InFlight`] if another guard is alive.
    pub fn begin(&self) -> Result<BusyGuard, SubmitError> {
        self.in_flight.try_acquire().ok_or(SubmitError::InFlight)
    }

    /// Validates `{name, email}` against `store` and returns the new store
    /// together with the appended record.
    ///
    /// `store` itself is never modified. Values are stored exactly as given;
    /// trimming only applies to the emptiness check.
    pub fn submit(
        &self,
        store: &RowStore,
        name: &str,
        email: &str,
    ) -> Result<(RowStore, Record), SubmitError> {
        let _guard = self.begin()?;

        validate_candidate(store, name, email)?;

        let id = store
            .next_id()
            .ok_or_else(|| SubmitError::unexpected("record id space exhausted"))?;
        let record = Record::new(id, name, email);

        Ok((store.appended(record.clone()), record))
    }
}

/// Runs the validation checks in order; the first failure wins.
pub fn validate_candidate(store: &RowStore, name: &str, email: &str) -> Result<(), SubmitError> {
    if name.trim().is_empty() || email.trim().is_empty() {
        return Err(SubmitError::missing_field());
    }
    if store.contains_email(email) {
        return Err(SubmitError::email_exists());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ann() -> RowStore {
        RowStore::new(vec![Record::new(1, "Ann", "ann@x.com")])
    }

    #[test]
    fn test_whitespace_only_is_missing() {
        let err = validate_candidate(&ann(), "   ", "b@x.com").unwrap_err();
        assert_eq!(err, SubmitError::missing_field());

        let err = validate_candidate(&ann(), "Bob", "\t").unwrap_err();
        assert_eq!(err, SubmitError::missing_field());
    }

    #[test]
    fn test_missing_field_checked_before_duplicate() {
        let err = validate_candidate(&ann(), "", "ann@x.com").unwrap_err();
        assert!(matches!(err, SubmitError::Validation(_)));
    }

    #[test]
    fn test_untrimmed_values_are_kept() {
        let gateway = MutationGateway::new();
        let (_, record) = gateway.submit(&ann(), " Bob ", "bob@x.com").unwrap();
        assert_eq!(record.name, " Bob ");
    }

    #[test]
    fn test_guard_blocks_second_submission() {
        let gateway = MutationGateway::new();
        let guard = gateway.begin().unwrap();
        assert!(gateway.is_submitting());

        let err = gateway.submit(&ann(), "Bob", "bob@x.com").unwrap_err();
        assert_eq!(err, SubmitError::InFlight);

        drop(guard);
        assert!(!gateway.is_submitting());
        assert!(gateway.submit(&ann(), "Bob", "bob@x.com").is_ok());
    }

    #[test]
    fn test_flag_cleared_after_failure() {
        let gateway = MutationGateway::new();
        assert!(gateway.submit(&ann(), "", "").is_err());
        assert!(!gateway.is_submitting());
    }

    #[test]
    fn test_id_overflow_is_unexpected() {
        let gateway = MutationGateway::new();
        let store = RowStore::new(vec![Record::new(u64::MAX, "Max", "max@x.com")]);
        let err = gateway.submit(&store, "Bob", "bob@x.com").unwrap_err();
        assert!(matches!(err, SubmitError::Unexpected(_)));
        assert!(!err.is_user_error());
    }
}
