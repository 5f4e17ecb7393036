use std::fmt;

use codelock_core::constants::MAX_CODE_LENGTH;

/// Digits typed since the last Enter, Clear or Cancel.
///
/// The buffer stops growing at [`MAX_CODE_LENGTH`]; extra digits are dropped
/// and counted so an overlong entry can still be refused as a whole.
/// Contents never appear in `Debug` output.
#[derive(Default, Clone)]
pub struct CodeBuffer {
    digits: String,
    overflow: usize,
}

impl CodeBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a digit. Returns `false` if the buffer is full and the digit
    /// was dropped.
    pub fn push(&mut self, digit: u8) -> bool {
        debug_assert!(digit <= 9, "Digit must be 0-9");
        if self.digits.len() >= MAX_CODE_LENGTH {
            self.overflow += 1;
            return false;
        }
        self.digits.push(char::from(b'0' + digit));
        true
    }

    /// Remove the last typed digit, if any. Dropped digits go first.
    pub fn backspace(&mut self) {
        if self.overflow > 0 {
            self.overflow -= 1;
        } else {
            self.digits.pop();
        }
    }

    pub fn clear(&mut self) {
        self.digits.clear();
        self.overflow = 0;
    }

    /// Take the buffered code, leaving the buffer empty.
    pub fn take(&mut self) -> String {
        self.overflow = 0;
        std::mem::take(&mut self.digits)
    }

    pub fn len(&self) -> usize {
        self.digits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    /// Number of digits dropped since the last clear.
    pub fn overflow(&self) -> usize {
        self.overflow
    }

    /// One `*` per buffered digit, for displays.
    pub fn masked(&self) -> String {
        "*".repeat(self.digits.len())
    }
}

impl fmt::Debug for CodeBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CodeBuffer")
            .field("len", &self.digits.len())
            .field("overflow", &self.overflow)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_take() {
        let mut buffer = CodeBuffer::new();
        for d in [1, 2, 3] {
            assert!(buffer.push(d));
        }

        assert_eq!(buffer.len(), 3);
        assert_eq!(buffer.masked(), "***");
        assert_eq!(buffer.take(), "123");
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_overflow_dropped() {
        let mut buffer = CodeBuffer::new();
        for _ in 0..MAX_CODE_LENGTH {
            assert!(buffer.push(7));
        }

        assert!(!buffer.push(8));
        assert!(!buffer.push(9));
        assert_eq!(buffer.len(), MAX_CODE_LENGTH);
        assert_eq!(buffer.overflow(), 2);
        assert_eq!(buffer.take(), "7".repeat(MAX_CODE_LENGTH));
        assert_eq!(buffer.overflow(), 0);
    }

    #[test]
    fn test_backspace_and_clear() {
        let mut buffer = CodeBuffer::new();
        buffer.push(1);
        buffer.push(2);
        buffer.backspace();
        assert_eq!(buffer.len(), 1);

        buffer.backspace();
        buffer.backspace();
        assert!(buffer.is_empty());

        buffer.push(5);
        buffer.clear();
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_backspace_removes_dropped_digits_first() {
        let mut buffer = CodeBuffer::new();
        for _ in 0..MAX_CODE_LENGTH {
            buffer.push(1);
        }
        buffer.push(9);
        assert_eq!(buffer.overflow(), 1);

        buffer.backspace();
        assert_eq!(buffer.overflow(), 0);
        assert_eq!(buffer.len(), MAX_CODE_LENGTH);

        buffer.backspace();
        assert_eq!(buffer.len(), MAX_CODE_LENGTH - 1);
    }

    #[test]
    fn test_debug_hides_digits() {
        let mut buffer = CodeBuffer::new();
        for d in [4, 2, 4, 2] {
            buffer.push(d);
        }
        let debug = format!("{buffer:?}");
        assert!(!debug.contains("4242"));
        assert!(debug.contains("len: 4"));
    }
}
