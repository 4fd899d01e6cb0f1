//! Entered code storage.
//!
//! [`CodeBuffer`] is an append-only digit buffer with a fixed capacity of
//! [`CELL_COUNT`]. Digits can only be added at the end or removed from the end,
//! so the insertion point is always the current length and never needs to be
//! tracked or corrected.

use heapless::String;

use crate::config::CELL_COUNT;

/// Raw key events a host forwards to the widget.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyInput {
    /// A typed character. Anything other than `'0'..='9'` is dropped.
    Digit(char),
    /// Remove the last digit.
    Backspace,
    /// Remove every digit.
    Clear,
}

/// Fixed-capacity, append-only buffer of ASCII digits.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CodeBuffer {
    digits: String<CELL_COUNT>,
}

impl CodeBuffer {
    /// Create an empty buffer.
    pub const fn new() -> Self { Self { digits: String::new() } }

    /// Append a digit. Returns `false` (and changes nothing) if `digit` is not an
    /// ASCII digit or the buffer is full.
    pub fn push(&mut self, digit: char) -> bool {
        digit.is_ascii_digit() && self.digits.push(digit).is_ok()
    }

    /// Remove and return the last digit.
    pub fn pop(&mut self) -> Option<char> { self.digits.pop() }

    /// Remove every digit. Returns `true` if anything was removed.
    pub fn clear(&mut self) -> bool {
        let had_digits = !self.digits.is_empty();
        self.digits.clear();
        had_digits
    }

    /// Replace the contents with the digits of `text`.
    ///
    /// Non-digit characters are skipped and anything beyond capacity is dropped,
    /// the same filtering typed input goes through.
    pub fn set(&mut self, text: &str) {
        self.digits.clear();
        for ch in text.chars().filter(char::is_ascii_digit) {
            if self.digits.push(ch).is_err() {
                break;
            }
        }
    }

    /// Number of entered digits.
    #[inline]
    pub fn len(&self) -> usize { self.digits.len() }

    #[inline]
    pub fn is_empty(&self) -> bool { self.digits.is_empty() }

    /// Whether every cell holds a digit.
    #[inline]
    pub fn is_full(&self) -> bool { self.digits.len() == CELL_COUNT }

    /// Insertion point. Always equal to [`len`](Self::len).
    #[inline]
    pub fn caret(&self) -> usize { self.digits.len() }

    /// Entered digits as text, leading zeros included.
    #[inline]
    pub fn as_str(&self) -> &str { &self.digits }

    /// Digit at `index`, if entered.
    #[inline]
    pub fn digit(&self, index: usize) -> Option<char> { self.digits.as_bytes().get(index).map(|&b| b as char) }

    /// Entered digits read as a plain integer. `"0099"` is `99`, empty is `0`.
    pub fn value(&self) -> u32 {
        self.digits
            .bytes()
            .fold(0, |acc, b| acc * 10 + u32::from(b - b'0'))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer(text: &str) -> CodeBuffer {
        let mut buffer = CodeBuffer::new();
        buffer.set(text);
        buffer
    }

    #[test]
    fn test_push_digits_until_full() {
        let mut code = CodeBuffer::new();
        for (i, digit) in "1234".chars().enumerate() {
            assert!(code.push(digit), "Digit {i} should be accepted");
            assert_eq!(code.caret(), i + 1, "Caret should follow the last digit");
        }
        assert!(code.is_full());
        assert!(!code.push('5'), "Fifth digit should be rejected");
        assert_eq!(code.as_str(), "1234");
    }

    #[test]
    fn test_push_rejects_non_digits() {
        let mut code = CodeBuffer::new();
        for ch in ['a', ' ', '-', '+', '.', '٣', '½'] {
            assert!(!code.push(ch), "{ch:?} should be rejected");
        }
        assert!(code.is_empty());
    }

    #[test]
    fn test_pop_removes_from_end() {
        let mut code = buffer("123");
        assert_eq!(code.pop(), Some('3'));
        assert_eq!(code.as_str(), "12");
        assert_eq!(code.caret(), 2);

        let mut empty = CodeBuffer::new();
        assert_eq!(empty.pop(), None, "Pop on empty buffer should be a no-op");
    }

    #[test]
    fn test_clear() {
        let mut code = buffer("12");
        assert!(code.clear());
        assert!(code.is_empty());
        assert!(!code.clear(), "Clearing an empty buffer removes nothing");
    }

    #[test]
    fn test_set_filters_and_truncates() {
        assert_eq!(buffer("12-34").as_str(), "1234", "Separators should be skipped");
        assert_eq!(buffer("987654").as_str(), "9876", "Overflow should be dropped");
        assert_eq!(buffer("ab").as_str(), "");
    }

    #[test]
    fn test_value_drops_leading_zeros() {
        assert_eq!(buffer("1234").value(), 1234);
        assert_eq!(buffer("0099").value(), 99);
        assert_eq!(buffer("0012").value(), 12);
        assert_eq!(buffer("0000").value(), 0);
        assert_eq!(buffer("0099").as_str(), "0099", "Text keeps leading zeros");
    }

    #[test]
    fn test_digit_at_index() {
        let code = buffer("47");
        assert_eq!(code.digit(0), Some('4'));
        assert_eq!(code.digit(1), Some('7'));
        assert_eq!(code.digit(2), None);
    }
}
