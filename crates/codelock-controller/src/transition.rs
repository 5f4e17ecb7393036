//! Lock transition table.
//!
//! The whole behaviour of the lock is one pure function,
//! [`transition`], from the current state, the classification of the entered
//! code and the current attempt counter to the next state, the next counter
//! value and an [`Outcome`] describing what happened. The controller only
//! commits what this function returns.
//!
//! # Table
//!
//! | State    | Input          | Next                      | Counter          |
//! |----------|----------------|---------------------------|------------------|
//! | Locked   | Correct        | Unlocked                  | reset to 0       |
//! | Locked   | Wrong or Super | Locked, Error at max      | +1               |
//! | Unlocked | Correct        | Locked                    | unchanged        |
//! | Unlocked | Wrong or Super | Unlocked                  | unchanged        |
//! | Error    | Super          | Locked                    | reset to 0       |
//! | Error    | Correct/Wrong  | Error                     | unchanged        |
//!
//! The supercode entered while locked counts as a failed attempt. It only
//! has meaning in the error state.
//!
//! # Examples
//!
//! ```
//! use codelock_controller::{Outcome, transition};
//! use codelock_core::{Classification, LockState};
//!
//! let step = transition(LockState::Locked, Classification::Wrong, 2);
//! assert_eq!(step.next, LockState::Error);
//! assert_eq!(step.attempts, 3);
//! assert_eq!(step.outcome, Outcome::LockedOut);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use codelock_core::constants::MAX_FAILED_ATTEMPTS;
use codelock_core::{Classification, LockState};

/// What an accepted code entry did to the lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    /// Primary code accepted while locked.
    Unlocked,

    /// Rejected while locked; `remaining` more rejections trigger lockout.
    IncorrectCode { remaining: u32 },

    /// Rejected while locked and the attempt limit was reached.
    LockedOut,

    /// Primary code accepted while unlocked.
    Locked,

    /// Rejected while unlocked; the lock stays open.
    IncorrectCodeRemainsUnlocked,

    /// Supercode accepted during lockout.
    Recovered,

    /// Anything other than the supercode during lockout.
    IncorrectSupercode,
}

impl Outcome {
    /// Returns `true` if the entered code was rejected.
    #[must_use]
    pub fn is_rejection(self) -> bool {
        matches!(
            self,
            Outcome::IncorrectCode { .. }
                | Outcome::LockedOut
                | Outcome::IncorrectCodeRemainsUnlocked
                | Outcome::IncorrectSupercode
        )
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Unlocked => write!(f, "unlocked"),
            Outcome::IncorrectCode { remaining: 1 } => {
                write!(f, "incorrect code, 1 attempt remaining")
            }
            Outcome::IncorrectCode { remaining } => {
                write!(f, "incorrect code, {remaining} attempts remaining")
            }
            Outcome::LockedOut => write!(f, "incorrect code, lockout"),
            Outcome::Locked => write!(f, "locked"),
            Outcome::IncorrectCodeRemainsUnlocked => {
                write!(f, "incorrect code, remains unlocked")
            }
            Outcome::Recovered => write!(f, "recovered, now locked"),
            Outcome::IncorrectSupercode => write!(f, "incorrect supercode"),
        }
    }
}

/// Result of applying one classified code to a state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    /// State to commit.
    pub next: LockState,

    /// Attempt counter to commit.
    pub attempts: u32,

    /// Outcome to report.
    pub outcome: Outcome,
}

/// Compute the next state, counter and outcome.
///
/// Pure and total over all state/classification pairs.
#[must_use]
pub fn transition(state: LockState, classification: Classification, attempts: u32) -> Step {
    match (state, classification) {
        (LockState::Locked, Classification::Correct) => Step {
            next: LockState::Unlocked,
            attempts: 0,
            outcome: Outcome::Unlocked,
        },
        (LockState::Locked, Classification::Wrong | Classification::Super) => {
            let attempts = attempts.saturating_add(1);
            if attempts >= MAX_FAILED_ATTEMPTS {
                Step {
                    next: LockState::Error,
                    attempts,
                    outcome: Outcome::LockedOut,
                }
            } else {
                Step {
                    next: LockState::Locked,
                    attempts,
                    outcome: Outcome::IncorrectCode {
                        remaining: MAX_FAILED_ATTEMPTS - attempts,
                    },
                }
            }
        }
        (LockState::Unlocked, Classification::Correct) => Step {
            next: LockState::Locked,
            attempts,
            outcome: Outcome::Locked,
        },
        (LockState::Unlocked, Classification::Wrong | Classification::Super) => Step {
            next: LockState::Unlocked,
            attempts,
            outcome: Outcome::IncorrectCodeRemainsUnlocked,
        },
        (LockState::Error, Classification::Super) => Step {
            next: LockState::Locked,
            attempts: 0,
            outcome: Outcome::Recovered,
        },
        (LockState::Error, Classification::Correct | Classification::Wrong) => Step {
            next: LockState::Error,
            attempts,
            outcome: Outcome::IncorrectSupercode,
        },
    }
}
