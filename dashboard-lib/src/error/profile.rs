//! Profile form error types

use super::SettingsError;

/// Errors that can occur while saving the profile form.
#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    /// A save is already running.
    #[error("profile save already in progress")]
    Busy,

    /// A required field was left empty.
    #[error("field '{field}' is required")]
    MissingField { field: &'static str },

    /// The email address is not well formed.
    #[error("invalid email address: {email}")]
    InvalidEmail { email: String },

    /// The profile could not be persisted.
    #[error(transparent)]
    Settings(#[from] SettingsError),
}

impl ProfileError {
    /// Creates a missing field error.
    pub fn missing(field: &'static str) -> Self {
        Self::MissingField { field }
    }

    /// Creates an invalid email error.
    pub fn invalid_email(email: impl Into<String>) -> Self {
        Self::InvalidEmail {
            email: email.into(),
        }
    }
}
