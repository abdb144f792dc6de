// refpack — RefPack LZSS codec and command-line tool

pub mod block;
pub mod hc;
pub mod lorem;
pub mod timefn;
pub mod config;
pub mod util;
pub mod io;
pub mod bench;
pub mod xxhash;
pub mod cli;

#[cfg(feature = "c-abi")]
pub mod abi;

// ── Version constants ─────────────────────────────────────────────────────────
pub const REFPACK_VERSION_MAJOR: u32 = 1;
pub const REFPACK_VERSION_MINOR: u32 = 0;
pub const REFPACK_VERSION_RELEASE: u32 = 0;
pub const REFPACK_VERSION_NUMBER: u32 =
    REFPACK_VERSION_MAJOR * 100 * 100 + REFPACK_VERSION_MINOR * 100 + REFPACK_VERSION_RELEASE;
pub const REFPACK_VERSION_STRING: &str = "1.0.0";

/// Returns the runtime version number (`major * 10000 + minor * 100 + release`).
pub fn version_number() -> u32 {
    REFPACK_VERSION_NUMBER
}

/// Returns the runtime version string.
pub fn version_string() -> &'static str {
    REFPACK_VERSION_STRING
}

// ── Top-level re-exports ──────────────────────────────────────────────────────
pub use block::compress::{compress, compress_with_stats, CompressStats};
pub use block::decompress::decompress;
pub use block::types::{compress_bound, PackedBuffer, RawBuffer, RefPackError};
