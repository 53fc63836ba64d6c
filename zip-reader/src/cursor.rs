//! Bounds-checked sequential reads over an in-memory byte buffer.

use crate::ZipReadError;

/// A monotonically advancing read position over a fixed byte buffer.
///
/// All multi-byte reads decode little-endian, the byte order of every
/// multi-byte field on disk in the ZIP format. A read that would leave
/// the buffer fails with [`ZipReadError::TruncatedInput`] and never
/// yields a partial or zero-filled value.
#[derive(Debug)]
pub struct ByteCursor<'a> {
    buffer: &'a [u8],
    position: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(buffer: &'a [u8]) -> Self {
        Self {
            buffer,
            position: 0,
        }
    }

    /// Current offset from the start of the buffer.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Validates the requested range and returns it without advancing.
    fn slice_at(&self, at: usize, len: usize) -> Result<&'a [u8], ZipReadError> {
        match at.checked_add(len) {
            Some(end) if end <= self.buffer.len() => Ok(&self.buffer[at..end]),
            _ => Err(ZipReadError::TruncatedInput {
                at,
                wanted: len,
                len: self.buffer.len(),
            }),
        }
    }

    /// Reads the next `n` bytes verbatim, advancing by `n`.
    ///
    /// The returned slice is never interpreted as text; entry names and
    /// payloads have no character encoding at this layer.
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], ZipReadError> {
        let bytes = self.slice_at(self.position, n)?;
        self.position += n;
        Ok(bytes)
    }

    /// Reads a little-endian `u16`, advancing by two bytes.
    pub fn read_u16(&mut self) -> Result<u16, ZipReadError> {
        let bytes = self.read_bytes(2)?;
        Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
    }

    /// Reads a little-endian `u32`, advancing by four bytes.
    pub fn read_u32(&mut self) -> Result<u32, ZipReadError> {
        let bytes = self.read_bytes(4)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Decodes a little-endian `u32` at an absolute offset without
    /// moving the cursor. Used for the initial signature probe.
    pub fn peek_u32(&self, offset: usize) -> Result<u32, ZipReadError> {
        let bytes = self.slice_at(offset, 4)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }
}

#[cfg(test)]
mod tests_cursor {
    use super::*;

    #[test]
    fn test_reads_little_endian_integers() {
        let mut cursor = ByteCursor::new(&[0x34, 0x12, 0x78, 0x56, 0x34, 0x12]);
        assert_eq!(cursor.read_u16().unwrap(), 0x1234);
        assert_eq!(cursor.read_u32().unwrap(), 0x12345678);
        assert_eq!(cursor.position(), 6);
    }

    #[test]
    fn test_read_bytes_returns_verbatim_slice() {
        let mut cursor = ByteCursor::new(b"PK\x03\x04rest");
        assert_eq!(cursor.read_bytes(4).unwrap(), b"PK\x03\x04");
        assert_eq!(cursor.read_bytes(4).unwrap(), b"rest");
        assert_eq!(cursor.position(), 8);
    }

    #[test]
    fn test_read_past_end_fails_without_advancing() {
        let mut cursor = ByteCursor::new(&[0x01, 0x02, 0x03]);
        let result = cursor.read_u32();
        assert!(matches!(
            result,
            Err(ZipReadError::TruncatedInput {
                at: 0,
                wanted: 4,
                len: 3,
            })
        ));
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn test_read_from_empty_buffer_fails() {
        let mut cursor = ByteCursor::new(&[]);
        assert!(matches!(
            cursor.read_u16(),
            Err(ZipReadError::TruncatedInput { .. })
        ));
    }

    #[test]
    fn test_peek_does_not_advance() {
        let cursor = ByteCursor::new(&[0x50, 0x4b, 0x03, 0x04, 0xff]);
        assert_eq!(cursor.peek_u32(0).unwrap(), 0x04034b50);
        assert_eq!(cursor.position(), 0);
        assert!(matches!(
            cursor.peek_u32(2),
            Err(ZipReadError::TruncatedInput { .. })
        ));
    }
}
