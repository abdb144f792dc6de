//! File compression.
//!
//! Each source is read whole, packed with [`crate::block::compress_with_stats`],
//! and written in one piece; the RefPack header needs the total length before
//! the first command, so there is no block loop.
//!
//! - [`compress_filename`] — one source, one destination.
//! - [`compress_multiple_filenames`] — a batch, each written next to its
//!   source with a suffix appended (or all to stdout).

use std::fs;
use std::io;
use std::path::Path;

use crate::block::compress::{compress_with_stats, CompressStats};
use crate::io::file_io::{is_special_dst, read_src_file, write_dst_file, STDIN_MARK, STDOUT_MARK};
use crate::io::prefs::{display_level, final_time_display, Prefs};
use crate::timefn::get_time;
use crate::util::copy_file_stat;

/// Byte counts and command statistics for one compressed file.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompressResult {
    /// Uncompressed bytes read from the source.
    pub bytes_read: u64,
    /// Packed bytes written to the destination (header included).
    pub bytes_written: u64,
    /// Per-kind command counts.
    pub stats: CompressStats,
}

impl CompressResult {
    /// Output size as a percentage of input size (100 for empty input).
    pub fn ratio(&self) -> f64 {
        if self.bytes_read == 0 {
            100.0
        } else {
            (self.bytes_written as f64) / (self.bytes_read as f64) * 100.0
        }
    }
}

fn report_stats(stats: &CompressStats) {
    display_level(
        4,
        &format!(
            "commands : {} literal blocks, {} short / {} long / {} very long refs; \
             {} literal bytes, {} matched bytes \n",
            stats.literal_blocks,
            stats.short_refs,
            stats.long_refs,
            stats.very_long_refs,
            stats.literal_bytes,
            stats.matched_bytes
        ),
    );
}

/// Compress `src` into `dst` and apply the post-write steps (file status,
/// source removal).
fn compress_file_internal(src: &str, dst: &str, prefs: &Prefs) -> io::Result<CompressResult> {
    let input = read_src_file(src)?;
    let (packed, stats) = compress_with_stats(&input)?;

    write_dst_file(dst, &packed, prefs)?;

    if src != STDIN_MARK && !is_special_dst(dst) && prefs.copy_file_status {
        // Best effort, like `cp -p` without privileges.
        let _ = copy_file_stat(Path::new(src), Path::new(dst));
    }

    if prefs.remove_src_file && src != STDIN_MARK {
        fs::remove_file(src)
            .map_err(|e| io::Error::new(e.kind(), format!("Remove error : {}: {}", src, e)))?;
    }

    let result = CompressResult {
        bytes_read: input.len() as u64,
        bytes_written: packed.len() as u64,
        stats,
    };

    display_level(2, &format!("\r{:79}\r", ""));
    display_level(
        2,
        &format!(
            "Compressed {} bytes into {} bytes ==> {:.2}% \n",
            result.bytes_read,
            result.bytes_written,
            result.ratio()
        ),
    );
    report_stats(&result.stats);

    Ok(result)
}

/// Compress a single file.
///
/// `src` may be the `"stdin"` sentinel; `dst` may be `"stdout"` or the null
/// device sentinel.
pub fn compress_filename(src: &str, dst: &str, prefs: &Prefs) -> io::Result<CompressResult> {
    let time_start = get_time();
    let result = compress_file_internal(src, dst, prefs);
    let processed = result.as_ref().map(|r| r.bytes_read).unwrap_or(0);
    final_time_display(time_start, processed);
    result
}

/// Compress each of `srcs` to `src + suffix`, or to stdout when `suffix` is
/// the `"stdout"` sentinel.
///
/// Every file is attempted.  Returns the number of files that failed.
pub fn compress_multiple_filenames(srcs: &[&str], suffix: &str, prefs: &Prefs) -> io::Result<usize> {
    let time_start = get_time();
    let mut missed_files: usize = 0;
    let mut total_processed: u64 = 0;

    for &src in srcs {
        let dst = if suffix == STDOUT_MARK {
            STDOUT_MARK.to_owned()
        } else {
            format!("{}{}", src, suffix)
        };
        match compress_file_internal(src, &dst, prefs) {
            Ok(res) => total_processed += res.bytes_read,
            Err(e) => {
                display_level(1, &format!("refpack: {}: {}\n", src, e));
                missed_files += 1;
            }
        }
    }

    final_time_display(time_start, total_processed);
    Ok(missed_files)
}
