//! RefPack block compression and decompression.
//!
//! A packed buffer is a 9-byte [`header`] followed by a [`command`] stream.
//! [`compress`] produces one from a whole input buffer; [`decompress`] turns
//! it back.

pub mod command;
pub mod compress;
pub mod decompress;
pub mod header;
pub mod types;

pub use command::{Command, CommandIter, CommandStats, RefForm};
pub use compress::{compress, compress_to_vec, compress_with_stats, CompressStats};
pub use decompress::{decompress, decompress_to_vec};
pub use header::{is_refpack, read_uncompressed_size, Header};
pub use types::{
    compress_bound, PackedBuffer, RawBuffer, RefPackError, HEADER_SIZE, MAX_INPUT_SIZE,
    MAX_MATCH_LENGTH, REFPACK_MAGIC, WINDOW_SIZE,
};
