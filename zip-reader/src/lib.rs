//! In-memory decoder for the local file headers of a ZIP archive.
//!
//! Walks the sequence of local file headers at the start of a ZIP byte
//! stream and returns each entry's metadata together with its raw,
//! still-compressed payload bytes. Decompression, archive writing and
//! central directory parsing are left to the caller: the decoded
//! `compression_method` and payload are meant to be handed unchanged to
//! whatever inflater the consuming tool uses.
//!
//! The whole buffer must be resident in memory; there is no streaming
//! input and no I/O in this crate.
//!
//! <https://en.wikipedia.org/wiki/ZIP_(file_format)#Local_file_header>
//!
//! # Example
//!
//! ```ignore
//! let buffer = std::fs::read("archive.zip")?;
//! let entries = zip_reader::read_entries(&buffer)?;
//! for entry in &entries {
//!     println!(
//!         "{} ({} bytes compressed)",
//!         String::from_utf8_lossy(entry.file_name),
//!         entry.compressed_size,
//!     );
//! }
//! ```

mod archive;
mod cursor;
mod entry;

pub use archive::ZipArchive;
pub use cursor::ByteCursor;
pub use entry::{CompressionMethod, LFH_SIGNATURE, LocalFileEntry};

/// Errors that can occur while decoding the local file entries of a ZIP
/// buffer.
///
/// Every failure is fatal for the current decode; there is no retry or
/// partial-recovery semantics. Entries decoded before the failure remain
/// available through [`ZipArchive::entries`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ZipReadError {
    /// The buffer does not start with the local file header signature.
    #[error("file is not a ZIP archive")]
    NotAZipFile,
    /// The entry is encrypted (bit 0 of the general purpose flag).
    #[error("entry is encrypted, which is not supported")]
    EncryptionUnsupported,
    /// The entry name is flagged as UTF-8 encoded (bit 11).
    #[error("entry uses the UTF-8 name flag (bit 11), which is not supported")]
    Utf8Unsupported,
    /// The entry uses a trailing data descriptor (bit 3), so the header
    /// size fields are placeholders and the payload length is unknowable
    /// to a single-pass reader.
    #[error("entry uses a trailing data descriptor (bit 3), which is not supported")]
    StreamingDescriptorUnsupported,
    /// A size field holds the Zip64 sentinel; the true 64-bit sizes live
    /// in an extra field this decoder does not interpret.
    #[error("entry uses Zip64 sizes (4 GiB+), which is not supported")]
    Zip64Unsupported,
    /// A read reached past the end of the buffer.
    #[error("unexpected end of input: {wanted} bytes requested at offset {at}, buffer is {len} bytes")]
    TruncatedInput {
        /// Offset the read started from.
        at: usize,
        /// Number of bytes the read asked for.
        wanted: usize,
        /// Total length of the buffer.
        len: usize,
    },
}

/// Decodes every local file entry in `buffer`, in on-disk order.
///
/// Convenience wrapper over [`ZipArchive`] for callers that do not need
/// access to the partially decoded entries when the decode fails.
///
/// # Errors
///
/// - [`ZipReadError::NotAZipFile`]: the buffer does not start with the
///   local file header signature.
/// - Unsupported-feature and truncation errors propagate from the entry
///   parser as soon as they occur.
pub fn read_entries(buffer: &[u8]) -> Result<Vec<LocalFileEntry<'_>>, ZipReadError> {
    let mut archive = ZipArchive::new(buffer);
    archive.read_entries()?;
    Ok(archive.into_entries())
}

#[cfg(test)]
mod tests_read_entries {
    use super::*;

    #[test]
    fn test_read_entries_rejects_foreign_buffer() {
        let result = read_entries(b"not a zip at all");
        assert!(matches!(result, Err(ZipReadError::NotAZipFile)));
    }

    #[test]
    fn test_read_entries_decodes_single_entry() {
        let buffer = entry::encode_entry(b"hello.txt", b"payload", 0);
        let entries = read_entries(&buffer).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].file_name, b"hello.txt");
        assert_eq!(entries[0].payload, b"payload");
    }
}
