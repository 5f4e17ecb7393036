use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    // Construction errors
    #[error("Invalid secret: {reason}")]
    InvalidSecret { reason: String },

    // Entry errors
    #[error("Invalid input: {reason}")]
    InvalidInput { reason: String },

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a new invalid secret error.
    pub fn invalid_secret(reason: impl Into<String>) -> Self {
        Self::InvalidSecret {
            reason: reason.into(),
        }
    }

    /// Create a new invalid input error.
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Returns `true` if the caller may simply retry with another code.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::InvalidInput { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
