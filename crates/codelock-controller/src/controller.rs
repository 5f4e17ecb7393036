//! Code-operated lock controller.
//!
//! This module provides the controller that owns a lock's state, its failed
//! attempt counter and its two secrets, and applies entered codes to them
//! through the [`transition`](crate::transition) table.
//!
//! # States
//!
//! - `Locked`: waiting for the primary code
//! - `Unlocked`: open; the primary code locks it again
//! - `Error`: lockout after too many rejected codes; only the supercode clears it
//!
//! # Valid Transitions
//!
//! - Locked → Unlocked (primary code)
//! - Locked → Error (third consecutive rejection)
//! - Unlocked → Locked (primary code)
//! - Error → Locked (supercode)
//!
//! # Examples
//!
//! ```
//! use codelock_controller::{LockController, Outcome};
//! use codelock_core::LockState;
//!
//! let mut lock = LockController::new("12345678", "87654321", LockState::Locked).unwrap();
//!
//! let report = lock.enter_code("12345678").unwrap();
//! assert_eq!(report.to, LockState::Unlocked);
//! assert_eq!(report.outcome, Outcome::Unlocked);
//!
//! // Malformed input is an error and changes nothing
//! assert!(lock.enter_code("12ab").is_err());
//! assert_eq!(lock.state(), LockState::Unlocked);
//! ```
//!
//! # Builder Pattern
//!
//! For resuming a previously observed state:
//!
//! ```
//! use codelock_controller::LockController;
//! use codelock_core::LockState;
//!
//! let lock = LockController::builder("12345678", "87654321")
//!     .with_initial_state(LockState::Locked)
//!     .with_failed_attempts(2)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(lock.failed_attempts(), 2);
//! ```

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use codelock_core::constants::{DEFAULT_HISTORY_CAPACITY, MAX_FAILED_ATTEMPTS};
use codelock_core::{Error, LockId, LockState, Result, Secret, check_format, classify};

use crate::report::TransitionReport;
use crate::transition::{Outcome, transition};

/// A single applied code entry.
///
/// The entered code is never recorded, only its effect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateTransition {
    /// The state before the entry.
    pub from: LockState,

    /// The state after the entry.
    pub to: LockState,

    /// What the entry did.
    pub outcome: Outcome,

    /// Attempt counter after the entry.
    pub failed_attempts: u32,

    /// When the entry was applied.
    pub at: DateTime<Utc>,
}

impl StateTransition {
    /// Create a new transition record stamped with the current time.
    pub fn new(from: LockState, to: LockState, outcome: Outcome, failed_attempts: u32) -> Self {
        Self {
            from,
            to,
            outcome,
            failed_attempts,
            at: Utc::now(),
        }
    }

    /// Returns `true` if the entry moved the lock to a different state.
    pub fn changed_state(&self) -> bool {
        self.from != self.to
    }
}

/// Point-in-time view of a lock, for callers that persist or display it.
///
/// Feeding `state` and `failed_attempts` back through
/// [`LockControllerBuilder`] resumes the lock where it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockSnapshot {
    pub lock_id: LockId,
    pub state: LockState,
    pub failed_attempts: u32,
}

/// Controller for a code-operated lock.
///
/// # Thread Safety
///
/// This struct is not thread-safe by design. When several tasks enter codes
/// on the same lock, use [`SharedLockController`](crate::SharedLockController),
/// which serializes every entry behind a `tokio::sync::Mutex`.
///
/// # Examples
///
/// ```
/// use codelock_controller::LockController;
/// use codelock_core::LockState;
///
/// let mut lock = LockController::new("12345678", "87654321", LockState::Locked).unwrap();
///
/// lock.enter_code("00000000").unwrap();
/// lock.enter_code("11111111").unwrap();
/// lock.enter_code("22222222").unwrap();
///
/// assert_eq!(lock.state(), LockState::Error);
/// assert_eq!(lock.failed_attempts(), 3);
/// assert_eq!(lock.history().len(), 3);
/// ```
pub struct LockController {
    /// Identifier used in logs and reports.
    id: LockId,

    /// Everyday code toggling Locked and Unlocked.
    primary: Secret,

    /// Elevated code clearing the Error state.
    supercode: Secret,

    /// Current state of the lock.
    state: LockState,

    /// Consecutive rejected codes while Locked.
    failed_attempts: u32,

    /// Recent applied entries (limited to `history_capacity`).
    history: VecDeque<StateTransition>,

    history_capacity: usize,
}

impl LockController {
    /// Create a new lock controller.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidSecret` if either secret is not 8-12 digits or
    /// if the two secrets are equal.
    ///
    /// # Examples
    ///
    /// ```
    /// use codelock_controller::LockController;
    /// use codelock_core::{Error, LockState};
    ///
    /// let result = LockController::new("12345678", "12345678", LockState::Locked);
    /// assert!(matches!(result, Err(Error::InvalidSecret { .. })));
    /// ```
    pub fn new(primary: &str, supercode: &str, initial_state: LockState) -> Result<Self> {
        Self::builder(primary, supercode)
            .with_initial_state(initial_state)
            .build()
    }

    /// Create a builder for a lock with custom configuration.
    pub fn builder(
        primary: impl Into<String>,
        supercode: impl Into<String>,
    ) -> LockControllerBuilder {
        LockControllerBuilder::new(primary.into(), supercode.into())
    }

    /// Get the lock identifier.
    pub fn id(&self) -> LockId {
        self.id
    }

    /// Get the current state.
    pub fn state(&self) -> LockState {
        self.state
    }

    /// Get the current failed attempt counter.
    pub fn failed_attempts(&self) -> u32 {
        self.failed_attempts
    }

    /// Get a snapshot of the lock's identity, state and counter.
    pub fn snapshot(&self) -> LockSnapshot {
        LockSnapshot {
            lock_id: self.id,
            state: self.state,
            failed_attempts: self.failed_attempts,
        }
    }

    /// Get a reference to the transition history, oldest first.
    pub fn history(&self) -> &VecDeque<StateTransition> {
        &self.history
    }

    /// Get the last N transitions, oldest first.
    pub fn last_transitions(&self, count: usize) -> Vec<StateTransition> {
        self.history
            .iter()
            .rev()
            .take(count)
            .rev()
            .cloned()
            .collect()
    }

    /// Enter a code and apply the resulting transition.
    ///
    /// Format is checked first. A malformed code is rejected without touching
    /// the state or the attempt counter; it does not count as a wrong guess.
    /// Otherwise the code is classified, run through the transition table and
    /// the result is committed in full.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidInput` if the code is not 8-12 digits.
    ///
    /// # Examples
    ///
    /// ```
    /// use codelock_controller::{LockController, Outcome};
    /// use codelock_core::LockState;
    ///
    /// let mut lock = LockController::new("12345678", "87654321", LockState::Error).unwrap();
    ///
    /// let report = lock.enter_code("12345678").unwrap();
    /// assert_eq!(report.outcome, Outcome::IncorrectSupercode);
    ///
    /// let report = lock.enter_code("87654321").unwrap();
    /// assert_eq!(report.to, LockState::Locked);
    /// assert_eq!(report.failed_attempts, 0);
    /// ```
    pub fn enter_code(&mut self, code: &str) -> Result<TransitionReport> {
        if let Err(violation) = check_format(code) {
            warn!(
                lock_id = %self.id,
                state = %self.state,
                %violation,
                "Rejected malformed code entry"
            );
            return Err(Error::invalid_input(violation.to_string()));
        }

        let classification = classify(code, &self.primary, &self.supercode);
        let step = transition(self.state, classification, self.failed_attempts);
        let record = StateTransition::new(self.state, step.next, step.outcome, step.attempts);

        self.apply(step.next, step.attempts, record.clone());
        log_outcome(self.id, &record);

        Ok(TransitionReport::new(self.id, &record))
    }

    /// Commit a computed transition.
    ///
    /// State and counter are written together so no caller ever observes one
    /// without the other.
    fn apply(&mut self, next: LockState, attempts: u32, record: StateTransition) {
        self.state = next;
        self.failed_attempts = attempts;

        self.add_to_history(record);
    }

    fn add_to_history(&mut self, record: StateTransition) {
        self.history.push_back(record);
        while self.history.len() > self.history_capacity {
            self.history.pop_front();
        }
    }
}

fn log_outcome(lock_id: LockId, record: &StateTransition) {
    match record.outcome {
        Outcome::Unlocked | Outcome::Recovered => info!(
            %lock_id,
            from = %record.from,
            to = %record.to,
            outcome = %record.outcome,
            "Lock state changed"
        ),
        Outcome::LockedOut => warn!(
            %lock_id,
            failed_attempts = record.failed_attempts,
            "Lockout after {MAX_FAILED_ATTEMPTS} failed attempts"
        ),
        _ => debug!(
            %lock_id,
            from = %record.from,
            to = %record.to,
            outcome = %record.outcome,
            failed_attempts = record.failed_attempts,
            "Code entry applied"
        ),
    }
}

impl std::fmt::Debug for LockController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LockController")
            .field("id", &self.id)
            .field("state", &self.state)
            .field("failed_attempts", &self.failed_attempts)
            .field("history_len", &self.history.len())
            .finish_non_exhaustive()
    }
}

/// Builder for constructing `LockController` instances.
///
/// Secrets are validated in [`build`](Self::build), so setting them never
/// fails on its own.
///
/// # Examples
///
/// ```
/// use codelock_controller::LockController;
/// use codelock_core::LockState;
///
/// let lock = LockController::builder("12345678", "87654321")
///     .with_initial_state(LockState::Error)
///     .with_failed_attempts(3)
///     .with_history_capacity(10)
///     .build()
///     .unwrap();
///
/// assert_eq!(lock.state(), LockState::Error);
/// ```
#[derive(Debug)]
pub struct LockControllerBuilder {
    primary: String,
    supercode: String,
    initial_state: LockState,
    failed_attempts: u32,
    history_capacity: usize,
    id: Option<LockId>,
}

impl LockControllerBuilder {
    fn new(primary: String, supercode: String) -> Self {
        Self {
            primary,
            supercode,
            initial_state: LockState::Locked,
            failed_attempts: 0,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            id: None,
        }
    }

    /// Set the initial state for the lock.
    pub fn with_initial_state(mut self, state: LockState) -> Self {
        self.initial_state = state;
        self
    }

    /// Resume with a previously observed attempt counter.
    pub fn with_failed_attempts(mut self, attempts: u32) -> Self {
        self.failed_attempts = attempts;
        self
    }

    /// Set how many transitions the history keeps. Zero disables history.
    pub fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }

    /// Reuse an existing lock identifier, e.g. from a [`LockSnapshot`].
    pub fn with_id(mut self, id: LockId) -> Self {
        self.id = Some(id);
        self
    }

    /// Resume from a snapshot's identifier, state and counter.
    pub fn with_snapshot(self, snapshot: LockSnapshot) -> Self {
        self.with_id(snapshot.lock_id)
            .with_initial_state(snapshot.state)
            .with_failed_attempts(snapshot.failed_attempts)
    }

    /// Build the controller.
    ///
    /// # Errors
    ///
    /// - `Error::InvalidSecret` if either secret is malformed or both are equal
    /// - `Error::Config` if the lock would start Locked or Unlocked with a
    ///   counter already at or above the lockout limit
    pub fn build(self) -> Result<LockController> {
        let primary = Secret::new(&self.primary)
            .map_err(|e| Error::invalid_secret(format!("primary code: {e}")))?;
        let supercode = Secret::new(&self.supercode)
            .map_err(|e| Error::invalid_secret(format!("supercode: {e}")))?;

        if primary == supercode {
            return Err(Error::invalid_secret(
                "primary code and supercode must be different",
            ));
        }

        // Unlocked keeps its counter and hands it back to Locked on relock
        if !self.initial_state.is_lockout() && self.failed_attempts >= MAX_FAILED_ATTEMPTS {
            return Err(Error::Config(format!(
                "cannot resume {} with {} failed attempts (limit {MAX_FAILED_ATTEMPTS})",
                self.initial_state, self.failed_attempts
            )));
        }

        let id = self.id.unwrap_or_default();
        debug!(lock_id = %id, state = %self.initial_state, "Lock controller created");

        Ok(LockController {
            id,
            primary,
            supercode,
            state: self.initial_state,
            failed_attempts: self.failed_attempts,
            history: VecDeque::with_capacity(self.history_capacity.min(DEFAULT_HISTORY_CAPACITY)),
            history_capacity: self.history_capacity,
        })
    }
}
