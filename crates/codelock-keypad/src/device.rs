//! Keypad input and device trait definitions.
//!
//! These types establish the contract between a keypad session and the
//! physical (or simulated) keypad feeding it, so mock and real devices can be
//! swapped without touching session logic.
//!
//! The trait uses native `async fn` methods (Rust 1.90 + Edition 2024 RPITIT),
//! so no `async_trait` macro is needed.

#![allow(async_fn_in_trait)]

use crate::error::{KeypadError, Result};

/// Input from a keypad device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeypadInput {
    /// Numeric digit (0-9).
    Digit(u8),

    /// Submit the buffered code.
    Enter,

    /// Empty the buffer and keep waiting for digits.
    Clear,

    /// Abandon the current entry.
    Cancel,

    /// Remove the last buffered digit.
    Backspace,
}

impl KeypadInput {
    /// Create a digit input.
    ///
    /// # Errors
    ///
    /// Returns an error if the digit is greater than 9.
    ///
    /// # Examples
    ///
    /// ```
    /// use codelock_keypad::KeypadInput;
    ///
    /// let input = KeypadInput::digit(5).unwrap();
    /// assert_eq!(input.as_digit(), Some(5));
    ///
    /// assert!(KeypadInput::digit(10).is_err());
    /// ```
    pub fn digit(d: u8) -> Result<Self> {
        if d > 9 {
            return Err(KeypadError::invalid_data(format!(
                "Digit must be 0-9, got {d}"
            )));
        }
        Ok(Self::Digit(d))
    }

    /// Map a key label to an input.
    ///
    /// Digits map to themselves, `#` is Enter, `*` is Clear, `<` is
    /// Backspace and `x`/`X` is Cancel, following the usual 4x3 keypad
    /// layout.
    ///
    /// # Errors
    ///
    /// Returns an error for any other character.
    pub fn from_char(c: char) -> Result<Self> {
        match c {
            '0'..='9' => Ok(Self::Digit(c as u8 - b'0')),
            '#' => Ok(Self::Enter),
            '*' => Ok(Self::Clear),
            '<' => Ok(Self::Backspace),
            'x' | 'X' => Ok(Self::Cancel),
            _ => Err(KeypadError::invalid_data(format!("Unknown key '{c}'"))),
        }
    }

    /// Check if this input is a digit.
    pub fn is_digit(&self) -> bool {
        matches!(self, Self::Digit(_))
    }

    /// Get the digit value if this is a digit input.
    pub fn as_digit(&self) -> Option<u8> {
        match self {
            Self::Digit(d) => Some(*d),
            _ => None,
        }
    }
}

/// Keypad device abstraction.
///
/// # Object Safety
///
/// This trait is NOT object-safe because `async fn` methods return
/// `impl Future`. Use generic type parameters instead of `dyn KeypadDevice`:
///
/// ```no_run
/// use codelock_keypad::{KeypadDevice, KeypadInput, Result};
///
/// async fn read_code<K: KeypadDevice>(keypad: &mut K) -> Result<String> {
///     let mut code = String::new();
///
///     loop {
///         match keypad.read_input().await? {
///             KeypadInput::Digit(d) => code.push(char::from(b'0' + d)),
///             KeypadInput::Enter => break,
///             KeypadInput::Clear => code.clear(),
///             _ => {}
///         }
///     }
///
///     Ok(code)
/// }
/// ```
pub trait KeypadDevice: Send + Sync {
    /// Read the next input from the keypad.
    ///
    /// Waits asynchronously until input is available.
    ///
    /// # Errors
    ///
    /// Returns `KeypadError::Disconnected` once the device is gone.
    async fn read_input(&mut self) -> Result<KeypadInput>;

    /// Play a beep with the specified duration in milliseconds.
    ///
    /// # Errors
    ///
    /// Returns an error if the device cannot be reached.
    async fn beep(&mut self, duration_ms: u16) -> Result<()>;

    /// Human-readable device name, used in logs.
    fn name(&self) -> &str;
}
