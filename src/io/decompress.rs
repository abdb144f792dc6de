//! File decompression and integrity testing.
//!
//! - [`decompress_filename`] — one packed source to one destination.
//! - [`decompress_multiple_filenames`] — a batch, each written next to its
//!   source with the suffix stripped (or all to stdout / the null device).
//!
//! Test mode (`prefs.test_mode`, `-t`) decodes fully and writes nothing.

use std::fs;
use std::io;
use std::path::Path;

use crate::block::decompress::decompress;
use crate::io::file_io::{is_special_dst, read_src_file, write_dst_file, NUL_MARK, STDIN_MARK, STDOUT_MARK};
use crate::io::prefs::{display_level, final_time_display, Prefs};
use crate::timefn::get_time;
use crate::util::copy_file_stat;

/// Result of decompressing one file.
#[derive(Debug, Clone, Copy, Default)]
pub struct DecompressStats {
    /// Packed bytes read from the source.
    pub compressed_bytes: u64,
    /// Bytes produced by decoding.
    pub decompressed_bytes: u64,
}

fn decompress_file_internal(src: &str, dst: &str, prefs: &Prefs) -> io::Result<DecompressStats> {
    let packed = read_src_file(src)?;
    let raw = decompress(&packed)?;

    let written_to_disk = !prefs.test_mode && !is_special_dst(dst);
    if !prefs.test_mode {
        write_dst_file(dst, &raw, prefs)?;
    }

    if written_to_disk && src != STDIN_MARK && prefs.copy_file_status {
        let _ = copy_file_stat(Path::new(src), Path::new(dst));
    }

    if prefs.remove_src_file && !prefs.test_mode && src != STDIN_MARK {
        fs::remove_file(src)
            .map_err(|e| io::Error::new(e.kind(), format!("Remove error : {}: {}", src, e)))?;
    }

    display_level(2, &format!("\r{:79}\r", ""));
    display_level(2, &format!("{:<30.30} : decoded {} bytes \n", src, raw.len()));

    Ok(DecompressStats {
        compressed_bytes: packed.len() as u64,
        decompressed_bytes: raw.len() as u64,
    })
}

/// Decompresses the file at `src` into `dst`.
///
/// # Errors
///
/// I/O failures, and any codec error converted with
/// `From<RefPackError> for io::Error` (`InvalidData` for corrupt input).
pub fn decompress_filename(src: &str, dst: &str, prefs: &Prefs) -> io::Result<DecompressStats> {
    let time_start = get_time();
    let result = decompress_file_internal(src, dst, prefs);
    if result.is_err() {
        final_time_display(time_start, 0);
    }
    result
}

/// Decompresses each of `srcs`, deriving the output name by stripping
/// `suffix`.
///
/// When `suffix` is the stdout or null-device sentinel every file goes
/// there instead.  Otherwise sources not ending in `suffix` are skipped.
/// Returns `Err` summarising failures and skips; every file is attempted.
pub fn decompress_multiple_filenames(srcs: &[&str], suffix: &str, prefs: &Prefs) -> io::Result<()> {
    let time_start = get_time();
    let mut total_processed: u64 = 0;
    let mut missing_files = 0usize;
    let mut skipped_files = 0usize;

    for &src in srcs {
        let dst: &str = if suffix == STDOUT_MARK || suffix == NUL_MARK {
            suffix
        } else {
            match src.strip_suffix(suffix) {
                Some(base) if !base.is_empty() => base,
                _ => {
                    display_level(
                        1,
                        &format!(
                            "File extension doesn't match expected extension ({}); \
                             will not process file: {}\n",
                            suffix, src
                        ),
                    );
                    skipped_files += 1;
                    continue;
                }
            }
        };
        match decompress_file_internal(src, dst, prefs) {
            Ok(s) => total_processed += s.decompressed_bytes,
            Err(e) => {
                display_level(1, &format!("refpack: {}: {}\n", src, e));
                missing_files += 1;
            }
        }
    }

    final_time_display(time_start, total_processed);

    if missing_files + skipped_files > 0 {
        Err(io::Error::other(format!(
            "{} file(s) could not be decompressed; {} file(s) skipped",
            missing_files, skipped_files
        )))
    } else {
        Ok(())
    }
}
