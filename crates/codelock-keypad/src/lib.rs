//! Keypad front end for the code-operated lock.
//!
//! This crate connects a numeric keypad to a
//! [`SharedLockController`](codelock_controller::SharedLockController):
//!
//! - [`KeypadDevice`] abstracts the physical keypad (async, RPITIT)
//! - [`MockKeypad`] simulates one for tests and demos
//! - [`CodeBuffer`] collects digits until Enter
//! - [`KeypadSession`] submits completed codes and plays feedback beeps

pub mod buffer;
pub mod device;
pub mod error;
pub mod mock;
pub mod session;

pub use buffer::CodeBuffer;
pub use device::{KeypadDevice, KeypadInput};
pub use error::{KeypadError, Result};
pub use mock::{MockKeypad, MockKeypadHandle};
pub use session::{ACCEPT_BEEP_MS, EntryOutcome, KeypadSession, REJECT_BEEP_MS};
