//! Saga error types.

use thiserror::Error;

/// Errors that can occur during saga operations.
#[derive(Debug, Error)]
pub enum SagaError {
    /// The gym code is already taken by another gym.
    ///
    /// The directory enforces code uniqueness; this is kept distinct
    /// from other directory failures so callers can surface a conflict
    /// instead of a generic error.
    #[error("gym code '{code}' is already in use")]
    DuplicateCode { code: String },

    /// Gym directory error.
    #[error("gym directory error: {0}")]
    GymDirectory(String),

    /// Identity service error.
    #[error("identity service error: {0}")]
    Identity(String),

    /// Registration log error.
    #[error("registration log error: {0}")]
    RegistrationLog(String),

    /// Mailer error.
    #[error("mailer error: {0}")]
    Mailer(String),

    /// The membership acknowledgement was not confirmed.
    #[error("membership terms must be acknowledged before registration")]
    NotAcknowledged,
}

impl SagaError {
    /// Returns true for a gym-code uniqueness violation.
    pub fn is_duplicate_code(&self) -> bool {
        matches!(self, SagaError::DuplicateCode { .. })
    }
}

/// Convenience type alias for saga results.
pub type Result<T> = std::result::Result<T, SagaError>;
