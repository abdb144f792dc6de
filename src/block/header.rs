//! The 9-byte RefPack header.
//!
//! ```text
//! offset 0..4   uncompressed size, little-endian u32
//! offset 4..6   magic 10 FB
//! offset 6..9   packed size (header included), big-endian, low 24 bits
//! ```
//!
//! The encoder writes the header with a zeroed packed-size field
//! ([`write_placeholder`]) and fills it in with [`patch_packed_size`] once the
//! command stream is complete.  The decoder only needs the uncompressed size;
//! magic and packed size are informational.

use super::types::{
    RefPackError, HEADER_SIZE, MAGIC_OFFSET, PACKED_SIZE_FIELD_MAX, PACKED_SIZE_OFFSET,
    REFPACK_MAGIC, UNCOMPRESSED_SIZE_OFFSET,
};

// ─────────────────────────────────────────────────────────────────────────────
// Byte-order helpers
// ─────────────────────────────────────────────────────────────────────────────

#[inline]
fn read_le32(src: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([src[offset], src[offset + 1], src[offset + 2], src[offset + 3]])
}

#[inline]
fn read_be24(src: &[u8], offset: usize) -> u32 {
    u32::from_be_bytes([0, src[offset], src[offset + 1], src[offset + 2]])
}

#[inline]
fn write_be24(dst: &mut [u8], offset: usize, value: u32) {
    dst[offset..offset + 3].copy_from_slice(&value.to_be_bytes()[1..]);
}

// ─────────────────────────────────────────────────────────────────────────────
// Header
// ─────────────────────────────────────────────────────────────────────────────

/// Parsed header fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    /// Length of the original data.
    pub uncompressed_size: u32,
    /// Bytes 4..6; `10 FB` for streams this crate writes.
    pub magic: [u8; 2],
    /// Length of the packed buffer including the header (low 24 bits).
    pub packed_size: u32,
}

impl Header {
    /// Read the header at the start of `packed`.
    pub fn parse(packed: &[u8]) -> Result<Header, RefPackError> {
        if packed.len() < HEADER_SIZE {
            return Err(RefPackError::TruncatedHeader);
        }
        Ok(Header {
            uncompressed_size: read_le32(packed, UNCOMPRESSED_SIZE_OFFSET),
            magic: [packed[MAGIC_OFFSET], packed[MAGIC_OFFSET + 1]],
            packed_size: read_be24(packed, PACKED_SIZE_OFFSET),
        })
    }

    /// `true` when the magic bytes are `10 FB`.
    pub fn has_magic(&self) -> bool {
        self.magic == REFPACK_MAGIC
    }

    /// Serialise into 9 bytes. `packed_size` is truncated to 24 bits.
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut out = [0u8; HEADER_SIZE];
        out[UNCOMPRESSED_SIZE_OFFSET..MAGIC_OFFSET]
            .copy_from_slice(&self.uncompressed_size.to_le_bytes());
        out[MAGIC_OFFSET..PACKED_SIZE_OFFSET].copy_from_slice(&self.magic);
        write_be24(&mut out, PACKED_SIZE_OFFSET, self.packed_size & PACKED_SIZE_FIELD_MAX);
        out
    }
}

/// `true` when `bytes` starts with something that looks like a RefPack header.
pub fn is_refpack(bytes: &[u8]) -> bool {
    Header::parse(bytes).map(|h| h.has_magic()).unwrap_or(false)
}

/// Uncompressed size declared by the header of `packed`.
pub fn read_uncompressed_size(packed: &[u8]) -> Result<u32, RefPackError> {
    if packed.len() < HEADER_SIZE {
        return Err(RefPackError::TruncatedHeader);
    }
    Ok(read_le32(packed, UNCOMPRESSED_SIZE_OFFSET))
}

/// Append a header for `uncompressed_size` with a zeroed packed-size field.
pub fn write_placeholder(out: &mut Vec<u8>, uncompressed_size: u32) {
    let header = Header {
        uncompressed_size,
        magic: REFPACK_MAGIC,
        packed_size: 0,
    };
    out.extend_from_slice(&header.to_bytes());
}

/// Store the final length of `packed` into its own packed-size field.
pub fn patch_packed_size(packed: &mut [u8]) {
    debug_assert!(packed.len() >= HEADER_SIZE);
    let len = packed.len() as u64 & PACKED_SIZE_FIELD_MAX as u64;
    write_be24(packed, PACKED_SIZE_OFFSET, len as u32);
}
