//! Top-level decode loop over a ZIP byte stream.

use crate::{
    ZipReadError,
    cursor::ByteCursor,
    entry::{LFH_SIGNATURE, LocalFileEntry},
};

/// Decoder for the local file entry sequence of an in-memory ZIP buffer.
///
/// Build one per decode; the entry list is accumulated in on-disk order.
/// When [`read_entries`](Self::read_entries) fails, the entries decoded
/// before the failure stay accessible through
/// [`entries`](Self::entries) — whether partial results are worth
/// surfacing is the caller's decision, not this type's.
#[derive(Debug)]
pub struct ZipArchive<'a> {
    cursor: ByteCursor<'a>,
    entries: Vec<LocalFileEntry<'a>>,
}

impl<'a> ZipArchive<'a> {
    pub fn new(buffer: &'a [u8]) -> Self {
        Self {
            cursor: ByteCursor::new(buffer),
            entries: Vec::new(),
        }
    }

    /// Whether the buffer starts with the local file header signature.
    ///
    /// Buffers shorter than four bytes are not ZIP files.
    pub fn is_zip_file(&self) -> bool {
        self.cursor
            .peek_u32(0)
            .is_ok_and(|signature| signature == LFH_SIGNATURE)
    }

    /// Decodes every entry, in on-disk order, until the first four bytes
    /// that are not a local file header signature (usually the start of
    /// the central directory).
    ///
    /// # Errors
    ///
    /// - [`ZipReadError::NotAZipFile`]: the buffer does not begin with
    ///   the signature; no entry parsing is attempted.
    /// - Unsupported-feature and truncation errors from
    ///   [`LocalFileEntry::parse`] propagate immediately.
    pub fn read_entries(&mut self) -> Result<&[LocalFileEntry<'a>], ZipReadError> {
        if !self.is_zip_file() {
            return Err(ZipReadError::NotAZipFile);
        }

        while let Some(entry) = LocalFileEntry::parse(&mut self.cursor)? {
            self.entries.push(entry);
        }

        Ok(&self.entries)
    }

    /// Entries decoded so far; still valid after a failed decode.
    pub fn entries(&self) -> &[LocalFileEntry<'a>] {
        &self.entries
    }

    /// Consumes the decoder, returning the accumulated entries.
    pub fn into_entries(self) -> Vec<LocalFileEntry<'a>> {
        self.entries
    }
}

#[cfg(test)]
mod tests_archive {
    use super::*;
    use crate::entry::encode_entry;

    #[test]
    fn test_magic_prefix_is_recognized() {
        let archive = ZipArchive::new(&[0x50, 0x4b, 0x03, 0x04]);
        assert!(archive.is_zip_file());
    }

    #[test]
    fn test_foreign_prefix_fails_before_any_parsing() {
        let mut archive = ZipArchive::new(b"\x7fELF and then some");
        assert!(matches!(
            archive.read_entries(),
            Err(ZipReadError::NotAZipFile)
        ));
        assert!(archive.entries().is_empty());
    }

    #[test]
    fn test_empty_buffer_is_not_a_zip_file() {
        let mut archive = ZipArchive::new(&[]);
        assert!(matches!(
            archive.read_entries(),
            Err(ZipReadError::NotAZipFile)
        ));
    }

    #[test]
    fn test_single_entry_followed_by_central_directory() {
        let mut buffer = encode_entry(b"readme.md", b"contents", 0);
        // Start of a central directory file header ends the walk cleanly.
        buffer.extend_from_slice(&[0x50, 0x4b, 0x01, 0x02]);

        let mut archive = ZipArchive::new(&buffer);
        let entries = archive.read_entries().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].file_name, b"readme.md");
        assert_eq!(entries[0].payload, b"contents");
    }

    #[test]
    fn test_two_entries_decode_in_file_order() {
        let mut buffer = encode_entry(b"first.txt", b"one", 0);
        buffer.extend_from_slice(&encode_entry(b"second.txt", b"two", 0));

        let mut archive = ZipArchive::new(&buffer);
        let entries = archive.read_entries().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].file_name, b"first.txt");
        assert_eq!(entries[0].payload, b"one");
        assert_eq!(entries[1].file_name, b"second.txt");
        assert_eq!(entries[1].payload, b"two");
    }

    #[test]
    fn test_partial_entries_survive_a_failure() {
        let mut buffer = encode_entry(b"good.txt", b"fine", 0);
        buffer.extend_from_slice(&encode_entry(b"locked.txt", b"xx", 0x0001));

        let mut archive = ZipArchive::new(&buffer);
        assert!(matches!(
            archive.read_entries(),
            Err(ZipReadError::EncryptionUnsupported)
        ));
        // The caller decides what to do with the entries-so-far.
        assert_eq!(archive.entries().len(), 1);
        assert_eq!(archive.entries()[0].file_name, b"good.txt");
    }

    #[test]
    fn test_truncated_second_entry_propagates() {
        let mut buffer = encode_entry(b"good.txt", b"fine", 0);
        let second = encode_entry(b"cut.txt", b"payload", 0);
        buffer.extend_from_slice(&second[..20]);

        let mut archive = ZipArchive::new(&buffer);
        assert!(matches!(
            archive.read_entries(),
            Err(ZipReadError::TruncatedInput { .. })
        ));
        assert_eq!(archive.entries().len(), 1);
    }
}
