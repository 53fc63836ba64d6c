//! Local File Header (LFH)
//!
//! Per-entry metadata preceding the entry's compressed data in a ZIP
//! stream. Fields are fixed-width little-endian, followed by three
//! variable-length byte ranges (name, extra field, payload).
//!
//! <https://en.wikipedia.org/wiki/ZIP_(file_format)#Local_file_header>

use std::fmt;

use crate::{ZipReadError, cursor::ByteCursor};

/// Signature of the local file header, `PK\x03\x04` read little-endian.
pub const LFH_SIGNATURE: u32 = 0x04034b50;

const FLAG_ENCRYPTED: u16 = 0x0001;
const FLAG_DATA_DESCRIPTOR: u16 = 0x0008;
const FLAG_UTF8_NAME: u16 = 0x0800;

/// Sentinel in the 32-bit size fields signalling that the true 64-bit
/// sizes live in a Zip64 extra field.
const ZIP64_SIZE_SENTINEL: u32 = 0xffff_ffff;

/// ZIP compression methods this decoder can name.
///
/// Decoding the payload is out of scope here; the discrimination exists
/// so consumers can route the raw bytes to the right inflater.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionMethod {
    /// Method 0, payload stored without compression.
    Stored,
    /// Method 8, the common DEFLATE stream.
    Deflate,
    Unknown(u16),
}

impl CompressionMethod {
    pub fn from_u16(value: u16) -> Self {
        match value {
            0 => CompressionMethod::Stored,
            8 => CompressionMethod::Deflate,
            _ => CompressionMethod::Unknown(value),
        }
    }
}

impl fmt::Display for CompressionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompressionMethod::Stored => f.pad("stored"),
            CompressionMethod::Deflate => f.pad("deflate"),
            CompressionMethod::Unknown(value) => f.pad(&format!("method {}", value)),
        }
    }
}

/// One decoded local file header record and its raw payload.
///
/// `file_name`, `extra` and `payload` borrow from the decoded buffer and
/// are never interpreted as text. The payload is exactly
/// `compressed_size` bytes and still compressed; the record is immutable
/// once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalFileEntry<'a> {
    pub version_needed: u16,
    pub bit_flag: u16,
    /// Raw method value; see [`LocalFileEntry::method`].
    pub compression_method: u16,
    /// Packed DOS modification timestamp, time in the low half and date
    /// in the high half.
    pub dos_timestamp: u32,
    pub crc32: u32,
    pub compressed_size: u32,
    pub uncompressed_size: u32,
    pub file_name: &'a [u8],
    pub extra: &'a [u8],
    pub payload: &'a [u8],
}

impl<'a> LocalFileEntry<'a> {
    /// Parses one local file header record at the cursor position.
    ///
    /// Returns `Ok(None)` when the next four bytes are not the local
    /// file header signature; that is the normal end of the entry
    /// sequence (typically the central directory follows). The cursor is
    /// left right behind those four bytes so the caller can still
    /// inspect them.
    ///
    /// # Errors
    ///
    /// - `EncryptionUnsupported`, `Utf8Unsupported`,
    ///   `StreamingDescriptorUnsupported`: the general purpose flag
    ///   requests a variant this decoder rejects. The checks run in that
    ///   fixed order, so the first matching bit decides the error when
    ///   several are set.
    /// - `Zip64Unsupported`: a size field holds the all-ones sentinel.
    /// - `TruncatedInput`: the buffer ends inside the header or payload.
    ///
    /// No partial record is ever returned.
    pub fn parse(cursor: &mut ByteCursor<'a>) -> Result<Option<Self>, ZipReadError> {
        let signature = cursor.read_u32()?;
        if signature != LFH_SIGNATURE {
            return Ok(None);
        }

        let version_needed = cursor.read_u16()?;
        let bit_flag = cursor.read_u16()?;

        if bit_flag & FLAG_ENCRYPTED != 0 {
            return Err(ZipReadError::EncryptionUnsupported);
        }
        if bit_flag & FLAG_UTF8_NAME != 0 {
            return Err(ZipReadError::Utf8Unsupported);
        }
        if bit_flag & FLAG_DATA_DESCRIPTOR != 0 {
            // The size fields below are placeholders in this variant;
            // the real sizes trail the payload, so a single fixed-field
            // pass cannot know how far the payload extends.
            return Err(ZipReadError::StreamingDescriptorUnsupported);
        }

        let compression_method = cursor.read_u16()?;
        let dos_timestamp = cursor.read_u32()?;
        let crc32 = cursor.read_u32()?;
        let compressed_size = cursor.read_u32()?;
        let uncompressed_size = cursor.read_u32()?;

        // A sentinel size means the true sizes sit in a Zip64 extra
        // field; reading `compressed_size` payload bytes would grab the
        // wrong range, so reject instead of mis-slicing.
        if compressed_size == ZIP64_SIZE_SENTINEL || uncompressed_size == ZIP64_SIZE_SENTINEL {
            return Err(ZipReadError::Zip64Unsupported);
        }

        let file_name_length = cursor.read_u16()?;
        let extra_field_length = cursor.read_u16()?;

        let file_name = cursor.read_bytes(file_name_length as usize)?;
        let extra = cursor.read_bytes(extra_field_length as usize)?;
        let payload = cursor.read_bytes(compressed_size as usize)?;

        Ok(Some(Self {
            version_needed,
            bit_flag,
            compression_method,
            dos_timestamp,
            crc32,
            compressed_size,
            uncompressed_size,
            file_name,
            extra,
            payload,
        }))
    }

    /// The compression method as a named variant.
    pub fn method(&self) -> CompressionMethod {
        CompressionMethod::from_u16(self.compression_method)
    }

    /// Decodes the date half of the DOS timestamp to (year, month, day).
    pub fn mod_date(&self) -> (u16, u8, u8) {
        let date = (self.dos_timestamp >> 16) as u16;
        let day = (date & 0x1f) as u8;
        let month = ((date >> 5) & 0x0f) as u8;
        let year = ((date >> 9) & 0x7f) + 1980;
        (year, month, day)
    }

    /// Decodes the time half of the DOS timestamp to (hour, minute,
    /// second). Seconds have two-second resolution on disk.
    pub fn mod_time(&self) -> (u8, u8, u8) {
        let time = self.dos_timestamp as u16;
        let second = ((time & 0x1f) * 2) as u8;
        let minute = ((time >> 5) & 0x3f) as u8;
        let hour = ((time >> 11) & 0x1f) as u8;
        (hour, minute, second)
    }

    /// Directory entries are stored with a trailing `/` in their name.
    pub fn is_directory(&self) -> bool {
        self.file_name.ends_with(b"/")
    }
}

/// Builds a well-formed local file entry for tests.
#[cfg(test)]
pub(crate) fn encode_entry(name: &[u8], payload: &[u8], bit_flag: u16) -> Vec<u8> {
    let mut buf = Vec::new();
    buf.extend_from_slice(&LFH_SIGNATURE.to_le_bytes());
    buf.extend_from_slice(&20u16.to_le_bytes()); // version needed
    buf.extend_from_slice(&bit_flag.to_le_bytes());
    buf.extend_from_slice(&8u16.to_le_bytes()); // deflate
    buf.extend_from_slice(&0x58cf6cbdu32.to_le_bytes()); // 2024-06-15 13:37:58
    buf.extend_from_slice(&0xdeadbeefu32.to_le_bytes()); // crc32
    buf.extend_from_slice(&(payload.len() as u32).to_le_bytes());
    buf.extend_from_slice(&(payload.len() as u32 * 3).to_le_bytes());
    buf.extend_from_slice(&(name.len() as u16).to_le_bytes());
    buf.extend_from_slice(&0u16.to_le_bytes()); // no extra field
    buf.extend_from_slice(name);
    buf.extend_from_slice(payload);
    buf
}
