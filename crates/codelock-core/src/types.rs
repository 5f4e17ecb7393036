use crate::{Result, error::Error, validator::check_format};
use serde::{Deserialize, Serialize};
use std::fmt;
use subtle::ConstantTimeEq;
use uuid::Uuid;

/// Lock instance identifier (random UUID v4)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LockId(Uuid);

impl LockId {
    /// Generate a fresh random lock ID.
    #[must_use]
    pub fn new() -> Self {
        LockId(Uuid::new_v4())
    }
}

impl Default for LockId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for LockId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A lock secret (primary code or supercode), 8-12 decimal digits.
///
/// # Security
/// Comparison is constant-time and the `Debug` output never shows the
/// digits. Secrets are deliberately not serializable.
#[derive(Clone, Eq)]
pub struct Secret(String);

impl Secret {
    /// Create a new secret with format validation.
    ///
    /// # Errors
    /// Returns `Error::InvalidSecret` if the value is not 8-12 ASCII digits.
    pub fn new(code: &str) -> Result<Self> {
        check_format(code).map_err(|violation| Error::invalid_secret(violation.to_string()))?;
        Ok(Secret(code.to_string()))
    }

    /// Compare an entered code against this secret in constant time.
    #[must_use]
    pub fn matches(&self, code: &str) -> bool {
        self.0.as_bytes().ct_eq(code.as_bytes()).into()
    }
}

impl PartialEq for Secret {
    fn eq(&self, other: &Self) -> bool {
        self.matches(&other.0)
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("Secret(****)")
    }
}

impl std::str::FromStr for Secret {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Secret::new(s)
    }
}

/// Lock state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LockState {
    /// Access denied until the primary code is entered.
    #[default]
    Locked,
    /// Access granted; the primary code locks again.
    Unlocked,
    /// Lockout after too many rejected codes; only the supercode clears it.
    Error,
}

impl LockState {
    /// Returns `true` if state is Locked.
    #[inline]
    #[must_use]
    pub fn is_locked(self) -> bool {
        matches!(self, LockState::Locked)
    }

    /// Returns `true` if state is Error (lockout).
    #[inline]
    #[must_use]
    pub fn is_lockout(self) -> bool {
        matches!(self, LockState::Error)
    }
}

impl fmt::Display for LockState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LockState::Locked => write!(f, "Locked"),
            LockState::Unlocked => write!(f, "Unlocked"),
            LockState::Error => write!(f, "Error"),
        }
    }
}

impl std::str::FromStr for LockState {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "locked" => Ok(LockState::Locked),
            "unlocked" => Ok(LockState::Unlocked),
            "error" => Ok(LockState::Error),
            _ => Err(Error::Config(format!("Invalid lock state: {s}"))),
        }
    }
}

/// Result of comparing an entered code to the two secrets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    /// Matches the primary code.
    Correct,
    /// Matches the supercode.
    Super,
    /// Matches neither secret.
    Wrong,
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Classification::Correct => write!(f, "Correct"),
            Classification::Super => write!(f, "Super"),
            Classification::Wrong => write!(f, "Wrong"),
        }
    }
}
