use thiserror::Error;

/// Raised locally before any request is sent. The messages are shown to the
/// user as is.
#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
pub enum ValidationError {
    #[error("Please enter both email and password")]
    MissingCredentials,
    #[error("Please enter your email address")]
    MissingEmail,
    #[error("Please fill in all fields")]
    MissingFields,
    #[error("Please enter a valid email address")]
    InvalidEmail,
    #[error("Password must be at least {min} characters")]
    PasswordTooShort { min: usize },
    #[error("Passwords do not match")]
    PasswordsDoNotMatch,
}

#[derive(Debug, Error)]
#[error("The user has not logged in")]
pub struct NotLoggedInError;
