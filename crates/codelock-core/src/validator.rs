//! Code format validation and classification.
//!
//! Every code handled by a lock goes through this module twice over its
//! lifetime: secrets are checked once when the lock is built, and each
//! entered code is checked before it is compared against those secrets.
//!
//! # Format Rule
//!
//! A code is well-formed when it consists only of ASCII decimal digits and its
//! length is between [`MIN_CODE_LENGTH`] and [`MAX_CODE_LENGTH`] inclusive.
//! Nothing is trimmed or normalized: `" 12345678"` is rejected.
//!
//! # Examples
//!
//! ```
//! use codelock_core::validator::{classify, validate_format};
//! use codelock_core::{Classification, Secret};
//!
//! assert!(validate_format("12345678"));
//! assert!(!validate_format("1234"));
//! assert!(!validate_format("12345678x"));
//!
//! let primary = Secret::new("12345678").unwrap();
//! let supercode = Secret::new("87654321").unwrap();
//!
//! assert_eq!(classify("12345678", &primary, &supercode), Classification::Correct);
//! assert_eq!(classify("87654321", &primary, &supercode), Classification::Super);
//! assert_eq!(classify("00000000", &primary, &supercode), Classification::Wrong);
//! ```

use crate::{
    Classification, Result, Secret,
    constants::{MAX_CODE_LENGTH, MIN_CODE_LENGTH},
    error::Error,
};

/// Reason a code failed the format rule.
///
/// Only the offending position or length is reported, never the code itself,
/// so these values are safe to log.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatViolation {
    #[error("code is empty")]
    Empty,

    #[error("code contains a non-digit character at position {position}")]
    NonDigit { position: usize },

    #[error("code must be at least {min} digits, got {len}", min = MIN_CODE_LENGTH)]
    TooShort { len: usize },

    #[error("code must be at most {max} digits, got {len}", max = MAX_CODE_LENGTH)]
    TooLong { len: usize },
}

/// Check a code against the format rule, reporting why it fails.
///
/// Character content is checked before length, so `"12ab"` reports the
/// non-digit rather than the short length. Length is counted in characters.
///
/// # Errors
///
/// Returns the first [`FormatViolation`] found.
pub fn check_format(code: &str) -> std::result::Result<(), FormatViolation> {
    if code.is_empty() {
        return Err(FormatViolation::Empty);
    }

    if let Some(position) = code.chars().position(|c| !c.is_ascii_digit()) {
        return Err(FormatViolation::NonDigit { position });
    }

    // All ASCII from here on, so byte length equals character count
    let len = code.len();
    if len < MIN_CODE_LENGTH {
        return Err(FormatViolation::TooShort { len });
    }
    if len > MAX_CODE_LENGTH {
        return Err(FormatViolation::TooLong { len });
    }

    Ok(())
}

/// Returns `true` if the code is 8-12 ASCII decimal digits.
#[inline]
#[must_use]
pub fn validate_format(code: &str) -> bool {
    check_format(code).is_ok()
}

/// Validate a code submitted for entry.
///
/// # Errors
///
/// Returns `Error::InvalidInput` describing the violation.
pub fn validate_entry(code: &str) -> Result<()> {
    check_format(code).map_err(|violation| Error::invalid_input(violation.to_string()))
}

/// Classify an entered code against the two secrets.
///
/// The primary code is checked first. Both comparisons always run so the
/// time taken does not reveal which secret matched.
#[must_use]
pub fn classify(code: &str, primary: &Secret, supercode: &Secret) -> Classification {
    let is_primary = primary.matches(code);
    let is_super = supercode.matches(code);

    if is_primary {
        Classification::Correct
    } else if is_super {
        Classification::Super
    } else {
        Classification::Wrong
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("12345678")]
    #[case("123456789")]
    #[case("1234567890")]
    #[case("12345678901")]
    #[case("123456789012")]
    #[case("00000000")]
    fn test_validate_format_accepts(#[case] code: &str) {
        assert!(validate_format(code));
        assert!(check_format(code).is_ok());
    }

    #[rstest]
    #[case("", FormatViolation::Empty)]
    #[case("1234567", FormatViolation::TooShort { len: 7 })]
    #[case("1234567890123", FormatViolation::TooLong { len: 13 })]
    #[case("1234a678", FormatViolation::NonDigit { position: 4 })]
    #[case("-12345678", FormatViolation::NonDigit { position: 0 })]
    #[case("12345678 ", FormatViolation::NonDigit { position: 8 })]
    #[case("12ab", FormatViolation::NonDigit { position: 2 })]
    fn test_check_format_rejects(#[case] code: &str, #[case] expected: FormatViolation) {
        assert_eq!(check_format(code), Err(expected));
        assert!(!validate_format(code));
    }

    #[test]
    fn test_non_ascii_digits_rejected() {
        // Arabic-Indic digits are numeric but not ASCII
        assert!(!validate_format("١٢٣٤٥٦٧٨"));
        // Fullwidth digits
        assert!(!validate_format("１２３４５６７８"));
    }

    #[test]
    fn test_validate_entry_maps_to_invalid_input() {
        let err = validate_entry("123").unwrap_err();
        assert!(matches!(err, Error::InvalidInput { .. }));
        assert!(err.is_recoverable());
        assert!(err.to_string().contains("at least 8"));
    }

    #[test]
    fn test_violation_messages_do_not_echo_code() {
        let message = check_format("99999999x").unwrap_err().to_string();
        assert!(!message.contains("99999999"));
    }

    #[rstest]
    #[case("12345678", Classification::Correct)]
    #[case("87654321", Classification::Super)]
    #[case("00000000", Classification::Wrong)]
    #[case("123456789", Classification::Wrong)]
    fn test_classify(#[case] code: &str, #[case] expected: Classification) {
        let primary = Secret::new("12345678").unwrap();
        let supercode = Secret::new("87654321").unwrap();
        assert_eq!(classify(code, &primary, &supercode), expected);
    }
}
