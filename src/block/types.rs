//! RefPack wire constants, buffer types, and the codec error type.
//!
//! Everything the encoder, decoder and header codec agree on lives here:
//!   - Header layout (`HEADER_SIZE`, `REFPACK_MAGIC`, field offsets)
//!   - Command grammar limits (window, match lengths per form, literal blocks)
//!   - [`RawBuffer`] / [`PackedBuffer`] — the two owned buffer shapes
//!   - [`RefPackError`] — every failure `compress` / `decompress` can report

use core::fmt;

// ─────────────────────────────────────────────────────────────────────────────
// Header layout
// ─────────────────────────────────────────────────────────────────────────────

/// Size of the fixed header preceding the command stream.
pub const HEADER_SIZE: usize = 9;

/// The two magic bytes at offset 4 (`10 FB`).
pub const REFPACK_MAGIC: [u8; 2] = [0x10, 0xFB];

/// Offset of the little-endian 32-bit uncompressed size.
pub const UNCOMPRESSED_SIZE_OFFSET: usize = 0;
/// Offset of the magic bytes.
pub const MAGIC_OFFSET: usize = 4;
/// Offset of the big-endian 24-bit packed size.
pub const PACKED_SIZE_OFFSET: usize = 6;

/// Largest value the 24-bit packed-size field can hold.
pub const PACKED_SIZE_FIELD_MAX: u32 = 0x00FF_FFFF;

/// Largest input the 32-bit uncompressed-size field can describe.
pub const MAX_INPUT_SIZE: usize = u32::MAX as usize;

// ─────────────────────────────────────────────────────────────────────────────
// Command grammar limits
// ─────────────────────────────────────────────────────────────────────────────

/// Maximum back-reference distance (bytes behind the write cursor).
pub const WINDOW_SIZE: usize = 131_071;

/// Maximum length of a single back-reference.
pub const MAX_MATCH_LENGTH: usize = 1028;

/// Maximum payload of a single literal-block command.
pub const MAX_LITERAL_BLOCK: usize = 112;

/// Maximum literal run carried inside a back-reference or EOF command.
pub const MAX_LITERAL_PREFIX: usize = 3;

/// Two-byte form: 10-bit offset, length 3..=10.
pub const SHORT_OFFSET_LIMIT: usize = 1 << 10;
pub const SHORT_MIN_LENGTH: usize = 3;
pub const SHORT_MAX_LENGTH: usize = 10;

/// Three-byte form: 14-bit offset, length 4..=67.
pub const LONG_OFFSET_LIMIT: usize = 1 << 14;
pub const LONG_MIN_LENGTH: usize = 4;
pub const LONG_MAX_LENGTH: usize = 67;

/// Four-byte form: 17-bit offset, length 5..=1028.
pub const VERY_LONG_OFFSET_LIMIT: usize = 1 << 17;
pub const VERY_LONG_MIN_LENGTH: usize = 5;
pub const VERY_LONG_MAX_LENGTH: usize = MAX_MATCH_LENGTH;

/// First opcode of the literal-block range (`111xxxxx`).
pub const LITERAL_BLOCK_OPCODE: u8 = 0xE0;
/// First opcode of the EOF range (`111111xx`).
pub const EOF_OPCODE: u8 = 0xFC;

/// Worst-case packed size for an input of `input_size` bytes.
///
/// All-literal input costs one opcode per 112-byte block plus the EOF opcode;
/// every back-reference the encoder accepts is strictly shorter than the
/// bytes it replaces, so no input can exceed this.
#[inline]
pub fn compress_bound(input_size: usize) -> usize {
    HEADER_SIZE + input_size + input_size.div_ceil(MAX_LITERAL_BLOCK) + 1
}

// ─────────────────────────────────────────────────────────────────────────────
// Error type
// ─────────────────────────────────────────────────────────────────────────────

/// Errors returned by RefPack compression and decompression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefPackError {
    /// The output buffer or the window tables could not be allocated.
    AllocationFailed,
    /// The input is longer than the 32-bit size field can describe.
    InputTooLarge,
    /// Fewer than [`HEADER_SIZE`] bytes were supplied to the decoder.
    TruncatedHeader,
    /// A command header or its literal bytes run past the end of the stream.
    Truncated,
    /// The stream ended on a command boundary without an EOF command.
    MissingEof,
    /// A back-reference points before the first byte of the output.
    BadReference { distance: usize, available: usize },
    /// The stream produces a different number of bytes than the header declares.
    SizeMismatch { declared: u32, produced: usize },
}

impl fmt::Display for RefPackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RefPackError::AllocationFailed => f.write_str("allocation failed"),
            RefPackError::InputTooLarge => {
                write!(f, "input exceeds {} bytes", MAX_INPUT_SIZE)
            }
            RefPackError::TruncatedHeader => {
                write!(f, "stream shorter than the {}-byte header", HEADER_SIZE)
            }
            RefPackError::Truncated => f.write_str("command runs past the end of the stream"),
            RefPackError::MissingEof => f.write_str("stream ends without an EOF command"),
            RefPackError::BadReference { distance, available } => write!(
                f,
                "back-reference distance {} exceeds the {} bytes decoded so far",
                distance, available
            ),
            RefPackError::SizeMismatch { declared, produced } => write!(
                f,
                "header declares {} bytes but the stream produces {}",
                declared, produced
            ),
        }
    }
}

impl std::error::Error for RefPackError {}

impl From<RefPackError> for std::io::Error {
    fn from(e: RefPackError) -> Self {
        let kind = match e {
            RefPackError::AllocationFailed => std::io::ErrorKind::OutOfMemory,
            RefPackError::InputTooLarge => std::io::ErrorKind::InvalidInput,
            _ => std::io::ErrorKind::InvalidData,
        };
        std::io::Error::new(kind, e)
    }
}

/// Allocate an empty `Vec` able to hold `capacity` bytes, reporting failure
/// instead of aborting.
pub(crate) fn try_with_capacity<T>(capacity: usize) -> Result<Vec<T>, RefPackError> {
    let mut v = Vec::new();
    v.try_reserve_exact(capacity)
        .map_err(|_| RefPackError::AllocationFailed)?;
    Ok(v)
}

// ─────────────────────────────────────────────────────────────────────────────
// Buffer types
// ─────────────────────────────────────────────────────────────────────────────

/// Uncompressed bytes: compressor input, decompressor output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawBuffer {
    bytes: Vec<u8>,
}

/// RefPack-encoded bytes (header + command stream): compressor output,
/// decompressor input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackedBuffer {
    bytes: Vec<u8>,
}

macro_rules! buffer_impls {
    ($ty:ident) => {
        impl $ty {
            /// Wrap an owned byte vector.
            pub fn new(bytes: Vec<u8>) -> Self {
                $ty { bytes }
            }

            pub fn as_bytes(&self) -> &[u8] {
                &self.bytes
            }

            /// Number of bytes held.
            pub fn len(&self) -> usize {
                self.bytes.len()
            }

            pub fn is_empty(&self) -> bool {
                self.bytes.is_empty()
            }

            /// Give up ownership of the underlying vector.
            pub fn into_vec(self) -> Vec<u8> {
                self.bytes
            }
        }

        impl From<Vec<u8>> for $ty {
            fn from(bytes: Vec<u8>) -> Self {
                $ty { bytes }
            }
        }

        impl From<&[u8]> for $ty {
            fn from(bytes: &[u8]) -> Self {
                $ty { bytes: bytes.to_vec() }
            }
        }

        impl From<$ty> for Vec<u8> {
            fn from(buf: $ty) -> Self {
                buf.bytes
            }
        }

        impl AsRef<[u8]> for $ty {
            fn as_ref(&self) -> &[u8] {
                &self.bytes
            }
        }

        impl core::ops::Deref for $ty {
            type Target = [u8];
            fn deref(&self) -> &[u8] {
                &self.bytes
            }
        }
    };
}

buffer_impls!(RawBuffer);
buffer_impls!(PackedBuffer);

impl RawBuffer {
    /// Compress these bytes. See [`crate::block::compress::compress`].
    pub fn compress(&self) -> Result<PackedBuffer, RefPackError> {
        super::compress::compress(&self.bytes)
    }
}

impl PackedBuffer {
    /// Decompress these bytes. See [`crate::block::decompress::decompress`].
    pub fn decompress(&self) -> Result<RawBuffer, RefPackError> {
        super::decompress::decompress(&self.bytes)
    }

    /// Size recorded in the header's uncompressed-size field, if a header is present.
    pub fn declared_size(&self) -> Option<u32> {
        super::header::Header::parse(&self.bytes)
            .ok()
            .map(|h| h.uncompressed_size)
    }
}
