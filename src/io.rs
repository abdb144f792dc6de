//! Public API surface for RefPack file I/O operations.
//!
//! This module assembles the file-layer sub-modules and re-exports the
//! symbols consumed by the CLI and library users.

pub mod compress;
pub mod decompress;
pub mod file_info;
pub mod file_io;
pub mod prefs;

// ── Core type re-exports ──────────────────────────────────────────────────────
pub use file_info::CompressedFileInfo;
pub use prefs::Prefs;

// ── Special I/O sentinels ─────────────────────────────────────────────────────
pub use file_io::{NULL_OUTPUT, NUL_MARK, STDIN_MARK, STDOUT_MARK};

// ── Notification level (global) ───────────────────────────────────────────────
/// Set the global display/notification level for the file layer.
pub use prefs::set_notification_level;

// ── Compression ───────────────────────────────────────────────────────────────
/// Compress a single file.
pub use compress::compress_filename;

/// Compress multiple files with a given suffix.
pub use compress::compress_multiple_filenames;

pub use compress::CompressResult;

// ── Decompression ─────────────────────────────────────────────────────────────
/// Decompress a single file.
pub use decompress::decompress_filename;

/// Decompress multiple files, stripping a suffix.
pub use decompress::decompress_multiple_filenames;

pub use decompress::DecompressStats;

// ── File info / --list ────────────────────────────────────────────────────────
/// Print `--list` metadata for packed files.
pub use file_info::display_compressed_files_info;
