//! Errors reported by the add-record gateway

use crate::notify::Severity;

/// Reasons a new record submission can be rejected.
///
/// Every variant is recoverable: the row store is left untouched and remains
/// usable after any of them.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    /// A required field was empty after trimming whitespace.
    #[error("validation error: {0}")]
    Validation(String),

    /// The email is already used by a record in the store.
    #[error("duplicate error: {0}")]
    Duplicate(String),

    /// Anything else that went wrong while appending.
    #[error("unexpected error: {0}")]
    Unexpected(String),

    /// Another submission is still in flight.
    #[error("a submission is already in progress")]
    InFlight,
}

impl SubmitError {
    /// Creates the error for a missing name or email.
    pub fn missing_field() -> Self {
        Self::Validation("missing field".to_string())
    }

    /// Creates the error for an email collision.
    pub fn email_exists() -> Self {
        Self::Duplicate("email exists".to_string())
    }

    /// Creates an unexpected error with the given detail.
    pub fn unexpected(detail: impl Into<String>) -> Self {
        Self::Unexpected(detail.into())
    }

    /// Returns `true` for failures caused by the submitted values themselves.
    pub fn is_user_error(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::Duplicate(_))
    }

    /// Severity of the notice shown for this failure.
    pub fn severity(&self) -> Severity {
        match self {
            Self::Duplicate(_) => Severity::Warning,
            Self::InFlight => Severity::Info,
            Self::Validation(_) | Self::Unexpected(_) => Severity::Error,
        }
    }

    /// The user-facing message for this failure.
    ///
    /// Unexpected failures never leak their detail to the user.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Validation(_) => "Please fill all fields",
            Self::Duplicate(_) => "Email already exists!",
            Self::Unexpected(_) => "Failed to add data",
            Self::InFlight => "Still adding the previous entry",
        }
    }
}
