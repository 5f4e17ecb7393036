//! Mock keypad implementation for testing and development.
//!
//! This module provides a simulated keypad that can be driven
//! programmatically, so sessions can be tested without hardware.

use tokio::sync::mpsc;

use crate::device::{KeypadDevice, KeypadInput};
use crate::error::{KeypadError, Result};

/// Mock keypad device for testing and development.
///
/// Input arrives through an internal channel fed by a [`MockKeypadHandle`].
/// Beeps are recorded so tests can assert on audible feedback.
///
/// # Examples
///
/// ```
/// use codelock_keypad::{KeypadDevice, KeypadInput, MockKeypad};
///
/// #[tokio::main]
/// async fn main() -> codelock_keypad::Result<()> {
///     let (mut keypad, handle) = MockKeypad::new();
///
///     tokio::spawn(async move {
///         handle.send_input(KeypadInput::Digit(1)).await.unwrap();
///         handle.send_input(KeypadInput::Enter).await.unwrap();
///     });
///
///     assert_eq!(keypad.read_input().await?, KeypadInput::Digit(1));
///     assert_eq!(keypad.read_input().await?, KeypadInput::Enter);
///
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct MockKeypad {
    /// Channel receiver for simulated input
    input_rx: mpsc::Receiver<KeypadInput>,

    /// Device name
    name: String,

    /// Durations of every beep played, in order
    beeps: Vec<u16>,
}

impl MockKeypad {
    /// Create a new mock keypad with the default name.
    ///
    /// Returns the keypad together with a handle used to simulate input.
    pub fn new() -> (Self, MockKeypadHandle) {
        Self::with_name("Mock Keypad".to_string())
    }

    /// Create a new mock keypad with a custom name.
    pub fn with_name(name: String) -> (Self, MockKeypadHandle) {
        let (input_tx, input_rx) = mpsc::channel(32);

        let keypad = Self {
            input_rx,
            name: name.clone(),
            beeps: Vec::new(),
        };

        let handle = MockKeypadHandle { input_tx, name };

        (keypad, handle)
    }

    /// Durations of every beep played so far.
    pub fn beeps(&self) -> &[u16] {
        &self.beeps
    }

    /// Forget recorded beeps.
    pub fn clear_beeps(&mut self) {
        self.beeps.clear();
    }
}

impl Default for MockKeypad {
    fn default() -> Self {
        Self::new().0
    }
}

impl KeypadDevice for MockKeypad {
    async fn read_input(&mut self) -> Result<KeypadInput> {
        self.input_rx
            .recv()
            .await
            .ok_or_else(|| KeypadError::disconnected(self.name.clone()))
    }

    async fn beep(&mut self, duration_ms: u16) -> Result<()> {
        self.beeps.push(duration_ms);
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Handle for controlling a mock keypad.
///
/// Cloneable; dropping every handle disconnects the keypad.
#[derive(Debug, Clone)]
pub struct MockKeypadHandle {
    /// Channel sender for simulated input
    input_tx: mpsc::Sender<KeypadInput>,

    /// Device name
    name: String,
}

impl MockKeypadHandle {
    /// Send an input event to the mock keypad.
    ///
    /// # Errors
    ///
    /// Returns an error if the keypad has been dropped.
    pub async fn send_input(&self, input: KeypadInput) -> Result<()> {
        self.input_tx
            .send(input)
            .await
            .map_err(|_| KeypadError::disconnected(self.name.clone()))
    }

    /// Send a sequence of digit inputs.
    ///
    /// # Errors
    ///
    /// Returns an error if any digit is greater than 9 or the keypad has
    /// been dropped.
    pub async fn send_digits(&self, digits: &[u8]) -> Result<()> {
        for &digit in digits {
            self.send_input(KeypadInput::digit(digit)?).await?;
        }
        Ok(())
    }

    /// Type a string of key labels, e.g. `"1234*5678#"`.
    ///
    /// See [`KeypadInput::from_char`] for the key mapping.
    ///
    /// # Errors
    ///
    /// Returns an error on an unknown key label or if the keypad has been
    /// dropped. Keys before the bad label are already sent.
    pub async fn send_keys(&self, keys: &str) -> Result<()> {
        for c in keys.chars() {
            self.send_input(KeypadInput::from_char(c)?).await?;
        }
        Ok(())
    }

    /// Type a code followed by Enter.
    ///
    /// # Errors
    ///
    /// Returns an error if the code contains a non-digit or the keypad has
    /// been dropped.
    pub async fn send_code(&self, code: &str) -> Result<()> {
        for c in code.chars() {
            let input = KeypadInput::from_char(c)?;
            if !input.is_digit() {
                return Err(KeypadError::invalid_data(format!(
                    "Code contains non-digit key '{c}'"
                )));
            }
            self.send_input(input).await?;
        }
        self.send_input(KeypadInput::Enter).await
    }

    /// Get the device name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_keypad_basic_input() {
        let (mut keypad, handle) = MockKeypad::new();

        handle.send_input(KeypadInput::Digit(5)).await.unwrap();

        let input = keypad.read_input().await.unwrap();
        assert_eq!(input, KeypadInput::Digit(5));
    }

    #[tokio::test]
    async fn test_mock_keypad_send_code() {
        let (mut keypad, handle) = MockKeypad::new();

        tokio::spawn(async move {
            handle.send_code("9876").await.unwrap();
        });

        for expected in [9, 8, 7, 6] {
            let input = keypad.read_input().await.unwrap();
            assert_eq!(input, KeypadInput::Digit(expected));
        }
        assert_eq!(keypad.read_input().await.unwrap(), KeypadInput::Enter);
    }

    #[tokio::test]
    async fn test_mock_keypad_send_code_rejects_special_keys() {
        let (_keypad, handle) = MockKeypad::new();
        assert!(handle.send_code("12#4").await.is_err());
    }

    #[tokio::test]
    async fn test_mock_keypad_send_keys() {
        let (mut keypad, handle) = MockKeypad::new();

        handle.send_keys("1*<#").await.unwrap();

        assert_eq!(keypad.read_input().await.unwrap(), KeypadInput::Digit(1));
        assert_eq!(keypad.read_input().await.unwrap(), KeypadInput::Clear);
        assert_eq!(keypad.read_input().await.unwrap(), KeypadInput::Backspace);
        assert_eq!(keypad.read_input().await.unwrap(), KeypadInput::Enter);
    }

    #[tokio::test]
    async fn test_mock_keypad_send_digits_rejects_out_of_range() {
        let (_keypad, handle) = MockKeypad::new();
        assert!(handle.send_digits(&[1, 10]).await.is_err());
    }

    #[tokio::test]
    async fn test_mock_keypad_records_beeps() {
        let (mut keypad, _handle) = MockKeypad::new();

        keypad.beep(100).await.unwrap();
        keypad.beep(250).await.unwrap();
        assert_eq!(keypad.beeps(), &[100, 250]);

        keypad.clear_beeps();
        assert!(keypad.beeps().is_empty());
    }

    #[tokio::test]
    async fn test_mock_keypad_name() {
        let (keypad, handle) = MockKeypad::with_name("Back Door".to_string());
        assert_eq!(keypad.name(), "Back Door");
        assert_eq!(handle.name(), "Back Door");
    }

    #[tokio::test]
    async fn test_mock_keypad_closed_channel() {
        let (mut keypad, handle) = MockKeypad::new();

        drop(handle);

        let result = keypad.read_input().await;
        assert!(matches!(result, Err(KeypadError::Disconnected { .. })));
    }
}
