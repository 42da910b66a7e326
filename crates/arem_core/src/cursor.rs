//! Bounds-checked view over the bytes of a single record
//!
//! A cursor never outlives or extends past the slice it was created from,
//! so a miscounted field can only fail inside its own record.

use crate::error::{DecodeError, Result};

/// Start of a trailing comment inside a record body
pub const COMMENT_MARKER: u8 = b';';

#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    /// Bytes consumed so far
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Next byte without advancing
    pub fn peek(&self) -> Result<u8> {
        self.bytes.get(self.pos).copied().ok_or(DecodeError::EmptyBody)
    }

    pub fn at_comment_marker(&self) -> bool {
        matches!(self.peek(), Ok(COMMENT_MARKER))
    }

    /// Take the next `n` bytes and advance past them
    pub fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        let available = self.remaining();
        if n > available {
            return Err(DecodeError::TruncatedRecord {
                needed: n,
                available,
            });
        }
        let bytes = self.bytes;
        let slice = &bytes[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    pub fn take_u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    /// Little-endian 16-bit value
    pub fn take_u16(&mut self) -> Result<u16> {
        let b = self.take(2)?;
        Ok(u16::from_le_bytes([b[0], b[1]]))
    }

    /// Everything left in the view
    pub fn take_rest(&mut self) -> &'a [u8] {
        let bytes = self.bytes;
        let rest = &bytes[self.pos..];
        self.pos = bytes.len();
        rest
    }

    /// Offset of the next `byte` at or after `skip` bytes ahead, without advancing
    pub fn find_from(&self, skip: usize, byte: u8) -> Option<usize> {
        self.bytes[self.pos..]
            .iter()
            .skip(skip)
            .position(|&b| b == byte)
            .map(|i| i + skip)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_advances() {
        let mut cursor = ByteCursor::new(&[1, 2, 3, 4]);
        assert_eq!(cursor.take(2).unwrap(), &[1, 2]);
        assert_eq!(cursor.position(), 2);
        assert_eq!(cursor.remaining(), 2);
        assert_eq!(cursor.take_rest(), &[3, 4]);
        assert!(cursor.is_empty());
    }

    #[test]
    fn test_take_past_boundary_fails() {
        let mut cursor = ByteCursor::new(&[1, 2]);
        assert_eq!(
            cursor.take(3),
            Err(DecodeError::TruncatedRecord {
                needed: 3,
                available: 2
            })
        );
        // A failed take leaves the cursor where it was
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn test_peek_empty() {
        let cursor = ByteCursor::new(&[]);
        assert_eq!(cursor.peek(), Err(DecodeError::EmptyBody));
        assert!(!cursor.at_comment_marker());
    }

    #[test]
    fn test_take_u16_little_endian() {
        let mut cursor = ByteCursor::new(&[0xED, 0xE1]);
        assert_eq!(cursor.take_u16().unwrap(), 0xE1ED);
    }

    #[test]
    fn test_find_from() {
        let cursor = ByteCursor::new(b"'a;'b");
        assert_eq!(cursor.find_from(1, b'\''), Some(3));
        assert_eq!(cursor.find_from(4, b'\''), None);
        assert!(!cursor.at_comment_marker());
    }
}
