//! Keypad session driving a lock.
//!
//! A session turns raw key presses into code entries: digits are buffered,
//! `Enter` submits the buffer to the lock, `Clear` and `Backspace` edit it,
//! and `Cancel` abandons it. Feedback is audible only: one long beep when a
//! code is accepted, three short beeps when it is rejected.
//!
//! # Examples
//!
//! ```
//! use codelock_controller::{LockController, SharedLockController};
//! use codelock_core::LockState;
//! use codelock_keypad::{EntryOutcome, KeypadSession, MockKeypad};
//!
//! #[tokio::main]
//! async fn main() -> codelock_keypad::Result<()> {
//!     let lock = LockController::new("12345678", "87654321", LockState::Locked)?;
//!     let (keypad, handle) = MockKeypad::new();
//!     let mut session = KeypadSession::new(keypad, SharedLockController::new(lock));
//!
//!     handle.send_code("12345678").await?;
//!
//!     match session.next_entry().await? {
//!         EntryOutcome::Applied(report) => assert_eq!(report.to, LockState::Unlocked),
//!         other => panic!("unexpected entry outcome: {other:?}"),
//!     }
//!
//!     Ok(())
//! }
//! ```

use tracing::{debug, warn};

use codelock_controller::{SharedLockController, TransitionReport};
use codelock_core::{Error, FormatViolation};

use crate::buffer::CodeBuffer;
use crate::device::{KeypadDevice, KeypadInput};
use crate::error::{KeypadError, Result};

/// Beep length for an accepted code (milliseconds).
pub const ACCEPT_BEEP_MS: u16 = 400;

/// Beep length for each of the three rejection beeps (milliseconds).
pub const REJECT_BEEP_MS: u16 = 100;

const REJECT_BEEP_COUNT: usize = 3;

/// Result of one completed keypad entry.
#[derive(Debug, Clone)]
pub enum EntryOutcome {
    /// The lock applied the code.
    Applied(TransitionReport),

    /// The lock refused the code as malformed; nothing changed.
    Rejected(Error),

    /// The user pressed Cancel before Enter.
    Cancelled,
}

impl EntryOutcome {
    /// Get the report if the code was applied.
    pub fn report(&self) -> Option<&TransitionReport> {
        match self {
            EntryOutcome::Applied(report) => Some(report),
            _ => None,
        }
    }
}

/// Reads codes from a keypad and submits them to a shared lock.
#[derive(Debug)]
pub struct KeypadSession<K> {
    keypad: K,
    lock: SharedLockController,
    buffer: CodeBuffer,
}

impl<K: KeypadDevice> KeypadSession<K> {
    pub fn new(keypad: K, lock: SharedLockController) -> Self {
        Self {
            keypad,
            lock,
            buffer: CodeBuffer::new(),
        }
    }

    /// Get the underlying keypad.
    pub fn keypad(&self) -> &K {
        &self.keypad
    }

    /// Get the lock this session feeds.
    pub fn lock(&self) -> &SharedLockController {
        &self.lock
    }

    /// Read keys until one entry completes (Enter or Cancel).
    ///
    /// # Errors
    ///
    /// Returns `KeypadError::Disconnected` when the keypad goes away, or any
    /// device error raised while reading or beeping. A malformed code is not
    /// an error here; it is reported as [`EntryOutcome::Rejected`].
    pub async fn next_entry(&mut self) -> Result<EntryOutcome> {
        loop {
            match self.keypad.read_input().await? {
                KeypadInput::Digit(d) => {
                    if !self.buffer.push(d) {
                        debug!(keypad = self.keypad.name(), "Code buffer full, digit dropped");
                    }
                }
                KeypadInput::Backspace => self.buffer.backspace(),
                KeypadInput::Clear => self.buffer.clear(),
                KeypadInput::Cancel => {
                    self.buffer.clear();
                    debug!(keypad = self.keypad.name(), "Entry cancelled");
                    return Ok(EntryOutcome::Cancelled);
                }
                KeypadInput::Enter => return self.submit().await,
            }
        }
    }

    /// Process entries until the keypad disconnects.
    ///
    /// # Errors
    ///
    /// Returns any error other than disconnection.
    pub async fn run(&mut self) -> Result<Vec<EntryOutcome>> {
        let mut outcomes = Vec::new();
        loop {
            match self.next_entry().await {
                Ok(outcome) => outcomes.push(outcome),
                Err(e) if e.is_disconnected() => {
                    debug!(keypad = self.keypad.name(), "Keypad disconnected, session ends");
                    return Ok(outcomes);
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn submit(&mut self) -> Result<EntryOutcome> {
        let overflow = self.buffer.overflow();
        let code = self.buffer.take();

        if overflow > 0 {
            let violation = FormatViolation::TooLong {
                len: code.len() + overflow,
            };
            warn!(
                keypad = self.keypad.name(),
                %violation,
                "Rejected overlong code entry"
            );
            self.beep_reject().await?;
            return Ok(EntryOutcome::Rejected(Error::invalid_input(
                violation.to_string(),
            )));
        }

        match self.lock.enter_code(&code).await {
            Ok(report) => {
                if report.outcome.is_rejection() {
                    self.beep_reject().await?;
                } else {
                    self.keypad.beep(ACCEPT_BEEP_MS).await?;
                }
                Ok(EntryOutcome::Applied(report))
            }
            Err(e @ Error::InvalidInput { .. }) => {
                self.beep_reject().await?;
                Ok(EntryOutcome::Rejected(e))
            }
            Err(e) => Err(KeypadError::Lock(e)),
        }
    }

    async fn beep_reject(&mut self) -> Result<()> {
        for _ in 0..REJECT_BEEP_COUNT {
            self.keypad.beep(REJECT_BEEP_MS).await?;
        }
        Ok(())
    }
}
