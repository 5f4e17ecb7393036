//! Core constants for the code-operated lock.
//!
//! This module centralizes the limits that define what a well-formed code is
//! and how many rejected entries the lock tolerates before it locks out.
//!
//! # Code Format
//!
//! Every code, whether it is a secret configured on the lock or a value typed
//! by a user, must match:
//!
//! ```text
//! ^[0-9]{8,12}$
//! ```
//!
//! # Usage
//!
//! ```
//! use codelock_core::constants::*;
//!
//! fn length_ok(code: &str) -> bool {
//!     (MIN_CODE_LENGTH..=MAX_CODE_LENGTH).contains(&code.len())
//! }
//!
//! assert!(length_ok("12345678"));
//! assert!(!length_ok("1234"));
//! assert_eq!(MAX_FAILED_ATTEMPTS, 3);
//! ```

// ============================================================================
// Code Format Constraints
// ============================================================================

/// Minimum code length (characters).
///
/// Codes shorter than this are rejected before classification.
///
/// # Value: 8 characters
pub const MIN_CODE_LENGTH: usize = 8;

/// Maximum code length (characters).
///
/// Codes longer than this are rejected before classification. Keypad
/// buffers stop accepting digits once this many have been entered.
///
/// # Value: 12 characters
pub const MAX_CODE_LENGTH: usize = 12;

// ============================================================================
// Lockout Policy
// ============================================================================

/// Number of consecutive rejected codes, while locked, that forces lockout.
///
/// The counter reaching this value moves the lock into the error state within
/// the same call. Only the supercode brings it back.
///
/// # Value: 3 attempts
pub const MAX_FAILED_ATTEMPTS: u32 = 3;

// ============================================================================
// Transition History
// ============================================================================

/// Default number of transitions kept in a controller's history ring.
///
/// Each record holds two states, an outcome and a timestamp, so 100 entries
/// stay well under a few kilobytes per lock.
///
/// # Value: 100 transitions
pub const DEFAULT_HISTORY_CAPACITY: usize = 100;

/// Default capacity of the report broadcast channel on shared controllers.
///
/// Subscribers that fall further behind than this miss the oldest reports
/// and observe a lag notification instead.
///
/// # Value: 64 reports
pub const DEFAULT_REPORT_CHANNEL_CAPACITY: usize = 64;
