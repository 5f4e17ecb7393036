//! Codelock controller crate providing the lock state machine.
//!
//! This crate contains the transition table, the controller that applies it,
//! and a shared handle for driving one lock from several tasks.

pub mod controller;
pub mod report;
pub mod shared;
pub mod transition;

pub use controller::{LockController, LockControllerBuilder, LockSnapshot, StateTransition};
pub use report::TransitionReport;
pub use shared::SharedLockController;
pub use transition::{Outcome, Step, transition};

// Re-export the domain types callers need alongside the controller
pub use codelock_core::{Classification, Error, LockId, LockState, Result};
