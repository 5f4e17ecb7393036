//! Lock configuration for the `codelock` binary.
//!
//! Values come from an optional JSON file and are then overridden by
//! command-line flags:
//!
//! ```text
//! {
//!   "primary": "12345678",
//!   "supercode": "87654321",
//!   "initial_state": "locked",
//!   "history_capacity": 100,
//!   "log_level": "info"
//! }
//! ```
//!
//! Every key is optional in the file, but the two secrets must be known by
//! the time the lock is built.

use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

use codelock_controller::LockController;
use codelock_core::constants::DEFAULT_HISTORY_CAPACITY;
use codelock_core::{Error, LockState, Result};

/// Configuration for one lock.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LockConfig {
    /// Primary code
    pub primary: Option<String>,

    /// Supercode
    pub supercode: Option<String>,

    /// State the lock starts in
    pub initial_state: LockState,

    /// Number of transitions kept in history
    pub history_capacity: usize,

    /// Default log filter when `RUST_LOG` is unset
    pub log_level: String,
}

impl Default for LockConfig {
    fn default() -> Self {
        Self {
            primary: None,
            supercode: None,
            initial_state: LockState::Locked,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            log_level: "info".to_string(),
        }
    }
}

impl LockConfig {
    /// Load configuration from a JSON file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_json(&contents)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// Parse configuration from a JSON string.
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Build the lock described by this configuration.
    ///
    /// # Errors
    ///
    /// - `Error::Config` if a secret is missing
    /// - `Error::InvalidSecret` if a secret is malformed or both are equal
    pub fn build_lock(&self) -> Result<LockController> {
        let primary = self
            .primary
            .as_deref()
            .ok_or_else(|| Error::Config("missing primary code".to_string()))?;
        let supercode = self
            .supercode
            .as_deref()
            .ok_or_else(|| Error::Config("missing supercode".to_string()))?;

        LockController::builder(primary, supercode)
            .with_initial_state(self.initial_state)
            .with_history_capacity(self.history_capacity)
            .build()
    }
}

impl std::fmt::Debug for LockConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redact = |secret: &Option<String>| secret.as_ref().map(|_| "****");
        f.debug_struct("LockConfig")
            .field("primary", &redact(&self.primary))
            .field("supercode", &redact(&self.supercode))
            .field("initial_state", &self.initial_state)
            .field("history_capacity", &self.history_capacity)
            .field("log_level", &self.log_level)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_defaults() {
        let config = LockConfig::from_json("{}").unwrap();
        assert_eq!(config, LockConfig::default());
        assert_eq!(config.initial_state, LockState::Locked);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_full_config() {
        let config = LockConfig::from_json(
            r#"{
                "primary": "12345678",
                "supercode": "87654321",
                "initial_state": "error",
                "history_capacity": 10,
                "log_level": "debug"
            }"#,
        )
        .unwrap();

        assert_eq!(config.initial_state, LockState::Error);
        assert_eq!(config.history_capacity, 10);

        let lock = config.build_lock().unwrap();
        assert_eq!(lock.state(), LockState::Error);
    }

    #[rstest]
    #[case(r#"{"initial_state": "locked"}"#, LockState::Locked)]
    #[case(r#"{"initial_state": "unlocked"}"#, LockState::Unlocked)]
    #[case(r#"{"initial_state": "error"}"#, LockState::Error)]
    fn test_initial_state(#[case] json: &str, #[case] expected: LockState) {
        assert_eq!(LockConfig::from_json(json).unwrap().initial_state, expected);
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(LockConfig::from_json(r#"{"max_attempts": 5}"#).is_err());
    }

    #[test]
    fn test_missing_secret() {
        let config = LockConfig {
            primary: Some("12345678".to_string()),
            ..LockConfig::default()
        };
        let err = config.build_lock().unwrap_err();
        assert_eq!(err, Error::Config("missing supercode".to_string()));
    }

    #[test]
    fn test_equal_secrets() {
        let config = LockConfig {
            primary: Some("12345678".to_string()),
            supercode: Some("12345678".to_string()),
            ..LockConfig::default()
        };
        assert!(matches!(
            config.build_lock(),
            Err(Error::InvalidSecret { .. })
        ));
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = LockConfig {
            primary: Some("12345678".to_string()),
            supercode: Some("87654321".to_string()),
            ..LockConfig::default()
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains("12345678"));
        assert!(!debug.contains("87654321"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = LockConfig::load(Path::new("/nonexistent/codelock.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
