use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use codelock_core::{LockId, LockState};

use crate::controller::StateTransition;
use crate::transition::Outcome;

/// What a caller gets back from a successful code entry.
///
/// Rendering is left to the caller; `message` is a ready-made
/// human-readable line for consoles and logs.
///
/// # Examples
///
/// ```
/// use codelock_controller::LockController;
/// use codelock_core::LockState;
///
/// let mut lock = LockController::new("12345678", "87654321", LockState::Locked).unwrap();
/// let report = lock.enter_code("00000000").unwrap();
///
/// assert_eq!(report.to, LockState::Locked);
/// assert_eq!(report.message, "incorrect code, 2 attempts remaining");
/// assert_eq!(report.to_string(), "[Locked] incorrect code, 2 attempts remaining");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionReport {
    /// Lock the entry was applied to.
    pub lock_id: LockId,

    /// State before the entry.
    pub from: LockState,

    /// State after the entry.
    pub to: LockState,

    /// What the entry did.
    pub outcome: Outcome,

    /// Attempt counter after the entry.
    pub failed_attempts: u32,

    /// Human-readable outcome.
    pub message: String,

    /// When the entry was applied.
    pub at: DateTime<Utc>,
}

impl TransitionReport {
    pub(crate) fn new(lock_id: LockId, record: &StateTransition) -> Self {
        Self {
            lock_id,
            from: record.from,
            to: record.to,
            outcome: record.outcome,
            failed_attempts: record.failed_attempts,
            message: record.outcome.to_string(),
            at: record.at,
        }
    }

    /// Name of the resulting state.
    pub fn state_name(&self) -> String {
        self.to.to_string()
    }

    /// Returns `true` if the entry moved the lock to a different state.
    pub fn changed_state(&self) -> bool {
        self.from != self.to
    }
}

impl fmt::Display for TransitionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.to, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_from_transition() {
        let id = LockId::new();
        let record = StateTransition::new(
            LockState::Error,
            LockState::Locked,
            Outcome::Recovered,
            0,
        );

        let report = TransitionReport::new(id, &record);

        assert_eq!(report.lock_id, id);
        assert_eq!(report.state_name(), "Locked");
        assert_eq!(report.message, "recovered, now locked");
        assert_eq!(report.at, record.at);
        assert!(report.changed_state());
        assert_eq!(report.to_string(), "[Locked] recovered, now locked");
    }

    #[test]
    fn test_report_serialization() {
        let record = StateTransition::new(
            LockState::Locked,
            LockState::Error,
            Outcome::LockedOut,
            3,
        );
        let report = TransitionReport::new(LockId::new(), &record);

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["to"], "error");
        assert_eq!(value["outcome"]["kind"], "locked_out");
        assert_eq!(value["failed_attempts"], 3);
        assert_eq!(value["message"], "incorrect code, lockout");

        let back: TransitionReport = serde_json::from_value(value).unwrap();
        assert_eq!(back, report);
    }
}
