//! Error types for keypad operations.
//!
//! Device failures (disconnection, bad data) live here; lock errors raised
//! while a session submits a code are wrapped so one `?` covers both.

/// Result type alias for keypad operations.
pub type Result<T> = std::result::Result<T, KeypadError>;

/// Errors that can occur while reading a keypad or submitting its codes.
#[derive(Debug, thiserror::Error)]
pub enum KeypadError {
    /// Device is not connected or has been disconnected.
    #[error("Device disconnected: {device}")]
    Disconnected { device: String },

    /// Invalid data received from or sent to the device.
    #[error("Invalid data: {message}")]
    InvalidData { message: String },

    /// The lock rejected an operation.
    #[error(transparent)]
    Lock(#[from] codelock_core::Error),
}

impl KeypadError {
    /// Create a new disconnected error.
    pub fn disconnected(device: impl Into<String>) -> Self {
        Self::Disconnected {
            device: device.into(),
        }
    }

    /// Create a new invalid data error.
    pub fn invalid_data(message: impl Into<String>) -> Self {
        Self::InvalidData {
            message: message.into(),
        }
    }

    /// Returns `true` if the device is gone and no more input will arrive.
    pub fn is_disconnected(&self) -> bool {
        matches!(self, Self::Disconnected { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_constructors() {
        let err = KeypadError::disconnected("Front Door");
        assert!(err.is_disconnected());
        assert_eq!(err.to_string(), "Device disconnected: Front Door");

        let err = KeypadError::invalid_data("Digit must be 0-9, got 12");
        assert!(!err.is_disconnected());
        assert_eq!(err.to_string(), "Invalid data: Digit must be 0-9, got 12");
    }

    #[test]
    fn test_lock_error_is_transparent() {
        let err: KeypadError = codelock_core::Error::invalid_input("code is empty").into();
        assert_eq!(err.to_string(), "Invalid input: code is empty");
    }
}
