//! File information display for the `--list` flag.
//!
//! Reads each file's header and walks its command stream without producing
//! output bytes, then prints one summary row per file: packed size, declared
//! uncompressed size, ratio, and (at higher verbosity) the per-kind command
//! counts.
//!
//! Entry point: [`display_compressed_files_info`].

use std::io;
use std::sync::atomic::Ordering;

use crate::block::command::CommandStats;
use crate::block::header::Header;
use crate::io::file_io::{read_src_file, STDIN_MARK};
use crate::io::prefs::DISPLAY_LEVEL;
use crate::util::is_reg_file;

// ---------------------------------------------------------------------------
// CompressedFileInfo
// ---------------------------------------------------------------------------

/// Metadata gathered from one packed file.
#[derive(Debug, Clone)]
pub struct CompressedFileInfo {
    /// Display name (basename of the file path).
    pub file_name: String,
    /// Size of the file on disk.
    pub file_size: u64,
    /// Parsed 9-byte header.
    pub header: Header,
    /// Command counts from a full walk of the stream.
    pub stats: CommandStats,
    /// `true` when the header's packed-size field agrees with the file size
    /// (modulo 2^24).
    pub packed_size_matches: bool,
}

impl CompressedFileInfo {
    /// Packed size as a percentage of the declared uncompressed size.
    pub fn ratio(&self) -> Option<f64> {
        if self.header.uncompressed_size == 0 {
            None
        } else {
            Some(self.file_size as f64 / self.header.uncompressed_size as f64 * 100.0)
        }
    }
}

// ---------------------------------------------------------------------------
// Utilities
// ---------------------------------------------------------------------------

/// `1536.0` → `"1.50K"`.
fn to_human(mut size: f64) -> String {
    const UNITS: &[&str] = &["", "K", "M", "G", "T"];
    let mut i = 0usize;
    while size >= 1024.0 && i + 1 < UNITS.len() {
        size /= 1024.0;
        i += 1;
    }
    format!("{:.2}{}", size, UNITS[i])
}

/// Filename component after the last `/` or `\`.
fn base_name(path: &str) -> &str {
    path.rfind(['/', '\\'])
        .map(|pos| &path[pos + 1..])
        .unwrap_or(path)
}

fn format_error(path: &str) -> io::Error {
    if DISPLAY_LEVEL.load(Ordering::Relaxed) >= 1 {
        eprintln!("refpack: {}: File format not recognized", path);
    }
    io::Error::new(
        io::ErrorKind::InvalidData,
        format!("{}: File format not recognized", path),
    )
}

// ---------------------------------------------------------------------------
// Collection
// ---------------------------------------------------------------------------

/// Read and classify one packed file.
///
/// Fails with `InvalidData` when the file has no RefPack header or its
/// command stream is malformed.
pub fn get_compressed_file_info(path: &str) -> io::Result<CompressedFileInfo> {
    let bytes = read_src_file(path)?;

    let header = Header::parse(&bytes).map_err(|_| format_error(path))?;
    if !header.has_magic() {
        return Err(format_error(path));
    }
    let stats = CommandStats::scan(&bytes).map_err(|_| format_error(path))?;

    let file_size = bytes.len() as u64;
    Ok(CompressedFileInfo {
        file_name: base_name(path).to_owned(),
        file_size,
        header,
        stats,
        packed_size_matches: (file_size & 0x00FF_FFFF) as u32 == header.packed_size,
    })
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

fn print_detail(info: &CompressedFileInfo, idx: usize, total: usize) {
    let s = &info.stats;
    println!("{}({}/{})", info.file_name, idx + 1, total);
    println!("    packed size     : {} bytes", info.file_size);
    println!(
        "    header size     : {} bytes{}",
        info.header.packed_size,
        if info.packed_size_matches { "" } else { " (mismatch)" }
    );
    println!("    uncompressed    : {} bytes", info.header.uncompressed_size);
    println!(
        "    commands        : {} literal blocks, {} short, {} long, {} very long",
        s.literal_blocks, s.short_refs, s.long_refs, s.very_long_refs
    );
    println!(
        "    bytes           : {} literal, {} matched",
        s.literal_bytes, s.matched_bytes
    );
    println!();
}

/// Print `--list` information for each of `paths` to stdout.
///
/// Stops at the first file that is not a regular file or not a valid RefPack
/// stream.
pub fn display_compressed_files_info(paths: &[&str]) -> io::Result<()> {
    let display_level = DISPLAY_LEVEL.load(Ordering::Relaxed);

    if display_level < 3 {
        println!(
            "{:>11} {:>13} {:>9} {:>9}   {}",
            "Compressed", "Uncompressed", "Refs", "Ratio", "Filename"
        );
    }

    for (idx, &path) in paths.iter().enumerate() {
        if path != STDIN_MARK && !is_reg_file(std::path::Path::new(path)) {
            if display_level >= 1 {
                eprintln!("refpack: {} is not a regular file", path);
            }
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{} is not a regular file", path),
            ));
        }

        let info = get_compressed_file_info(path)?;

        if display_level >= 3 {
            print_detail(&info, idx, paths.len());
            continue;
        }

        print!(
            "{:>11} {:>13} {:>9} ",
            to_human(info.file_size as f64),
            to_human(info.header.uncompressed_size as f64),
            info.stats.references(),
        );
        match info.ratio() {
            Some(r) => println!("{:>8.2}%   {}", r, info.file_name),
            None => println!("{:>9}   {}", "-", info.file_name),
        }
    }

    Ok(())
}
