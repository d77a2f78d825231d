//! The Temp Buffer (spec §3, §4.2).
//!
//! Accumulates the scalars of a tag name, attribute name/value, eJSON key,
//! string literal, or number literal while a state family is still deciding
//! what it has. Ported from `examples/original_source/Source/PurC/hvml/
//! tempbuffer.c`: capacity grows along the Fibonacci sequence rather than by
//! doubling, with a floor of 32 bytes, and the buffer separately tracks a
//! scalar count and the last scalar appended (used by character-reference
//! and numeric-suffix lookback).

use bstr::{BStr, ByteSlice};

const MIN_BUFFER_CAPACITY: usize = 32;

/// Smallest Fibonacci number `>= sz`, floored at [`MIN_BUFFER_CAPACITY`].
fn next_fibonacci_capacity(sz: usize) -> usize {
    let (mut a, mut b) = (1usize, 1usize);
    while b < sz {
        let next = a + b;
        a = b;
        b = next;
    }
    b.max(MIN_BUFFER_CAPACITY)
}

/// A growable scalar accumulator, grounded on the C `struct temp_buffer`.
#[derive(Debug, Clone, Default)]
pub(crate) struct TempBuffer {
    text: String,
    char_count: usize,
    last_char: Option<char>,
}

impl TempBuffer {
    pub fn new() -> Self {
        let mut text = String::new();
        text.reserve(MIN_BUFFER_CAPACITY);
        Self {
            text,
            char_count: 0,
            last_char: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Size in bytes of the buffered content (`temp_buffer_get_memory_size`).
    pub fn byte_size(&self) -> usize {
        self.text.len()
    }

    /// Number of scalars appended (`temp_buffer_get_char_size`).
    pub fn char_size(&self) -> usize {
        self.char_count
    }

    pub fn last_char(&self) -> Option<char> {
        self.last_char
    }

    pub fn append(&mut self, c: char) {
        let needed = self.text.len() + c.len_utf8();
        if needed > self.text.capacity() {
            self.text.reserve(next_fibonacci_capacity(needed) - self.text.len());
        }
        self.text.push(c);
        self.last_char = Some(c);
        self.char_count += 1;
    }

    pub fn append_str(&mut self, s: &str) {
        for c in s.chars() {
            self.append(c);
        }
    }

    pub fn ends_with(&self, suffix: &str) -> bool {
        self.text.as_bytes().ends_with_str(suffix)
    }

    pub fn equals(&self, other: &str) -> bool {
        BStr::new(self.text.as_bytes()) == BStr::new(other.as_bytes())
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn reset(&mut self) {
        self.text.clear();
        self.char_count = 0;
        self.last_char = None;
    }

    /// Consume the buffer, returning the accumulated text.
    pub fn take(&mut self) -> String {
        self.char_count = 0;
        self.last_char = None;
        std::mem::take(&mut self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fibonacci_floor_is_min_capacity() {
        assert_eq!(next_fibonacci_capacity(0), MIN_BUFFER_CAPACITY);
        assert_eq!(next_fibonacci_capacity(32), MIN_BUFFER_CAPACITY);
    }

    #[test]
    fn fibonacci_grows_past_floor() {
        let cap = next_fibonacci_capacity(40);
        assert!(cap >= 40);
        assert_eq!(cap, 55); // first Fibonacci number >= 40 in the 1,1,2,3,5,... series
    }

    #[test]
    fn append_tracks_char_count_and_last_char() {
        let mut buf = TempBuffer::new();
        buf.append('h');
        buf.append('i');
        assert_eq!(buf.as_str(), "hi");
        assert_eq!(buf.char_size(), 2);
        assert_eq!(buf.last_char(), Some('i'));
        assert!(buf.ends_with("i"));
        assert!(buf.equals("hi"));
    }

    #[test]
    fn reset_clears_everything() {
        let mut buf = TempBuffer::new();
        buf.append_str("hello");
        buf.reset();
        assert!(buf.is_empty());
        assert_eq!(buf.char_size(), 0);
        assert_eq!(buf.last_char(), None);
    }

    #[test]
    fn take_empties_buffer_and_returns_contents() {
        let mut buf = TempBuffer::new();
        buf.append_str("abc");
        let s = buf.take();
        assert_eq!(s, "abc");
        assert!(buf.is_empty());
    }
}
