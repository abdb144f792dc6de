//! File I/O primitives for the whole-buffer pipeline.
//!
//! - [`read_src_file`] — reads a path (or the `"stdin"` sentinel) fully into
//!   memory, rejecting directories.
//! - [`open_dst_file`] — resolves a path to a [`DstFile`], handling the
//!   `"stdout"` and null-device sentinels and enforcing the overwrite policy
//!   from [`Prefs`].
//!
//! RefPack headers carry the uncompressed size up front, so both directions
//! work on complete buffers; nothing here streams.

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Read, Write};
use std::path::Path;
use std::sync::atomic::Ordering;

use crate::io::prefs::{Prefs, DISPLAY_LEVEL};
use crate::util::is_directory;

// ---------------------------------------------------------------------------
// Sentinel strings
// ---------------------------------------------------------------------------

/// Sentinel: read from standard input.
pub const STDIN_MARK: &str = "stdin";

/// Sentinel: write to standard output.
pub const STDOUT_MARK: &str = "stdout";

/// Sentinel: discard output.
#[cfg(windows)]
pub const NUL_MARK: &str = "nul";
#[cfg(not(windows))]
pub const NUL_MARK: &str = "/dev/null";

/// User-facing spelling of the discard sentinel accepted on the command line.
pub const NULL_OUTPUT: &str = "null";

/// `true` for destinations that are not regular files on disk.
#[inline]
pub fn is_special_dst(path: &str) -> bool {
    path == STDOUT_MARK || path == NUL_MARK
}

// ---------------------------------------------------------------------------
// Source file
// ---------------------------------------------------------------------------

/// Reads the whole of `path` into memory.
///
/// - `"stdin"` reads standard input to EOF.
/// - A directory is an [`io::ErrorKind::InvalidInput`] error.
pub fn read_src_file(path: &str) -> io::Result<Vec<u8>> {
    let mut data = Vec::new();

    if path == STDIN_MARK {
        if DISPLAY_LEVEL.load(Ordering::Relaxed) >= 4 {
            eprintln!("Using stdin for input");
        }
        io::stdin().lock().read_to_end(&mut data)?;
        return Ok(data);
    }

    if is_directory(Path::new(path)) {
        if DISPLAY_LEVEL.load(Ordering::Relaxed) >= 1 {
            eprintln!("refpack: {} is a directory -- ignored", path);
        }
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{}: is a directory", path),
        ));
    }

    let mut f = File::open(path).map_err(|e| {
        if DISPLAY_LEVEL.load(Ordering::Relaxed) >= 1 {
            eprintln!("{}: {}", path, e);
        }
        e
    })?;
    f.read_to_end(&mut data)?;
    Ok(data)
}

// ---------------------------------------------------------------------------
// Destination file
// ---------------------------------------------------------------------------

/// A write-capable destination produced by [`open_dst_file`]: a buffered
/// regular file, stdout, or a discard sink.
pub struct DstFile {
    inner: Box<dyn Write>,
    pub is_stdout: bool,
}

impl Write for DstFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.write(buf)
    }
    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// Ask whether `path` may be overwritten. Refuses without asking when the
/// notification level is ≤ 1.
fn confirm_overwrite(path: &str) -> io::Result<()> {
    if DISPLAY_LEVEL.load(Ordering::Relaxed) <= 1 {
        eprintln!("{} already exists; not overwritten  ", path);
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("{}: already exists; not overwritten", path),
        ));
    }
    eprint!("{} already exists; do you want to overwrite (y/N) ? ", path);
    let _ = io::stderr().flush();
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    let first = line.trim_start().chars().next().unwrap_or('\0');
    if first != 'y' && first != 'Y' {
        eprintln!("    not overwritten  ");
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("{}: not overwritten", path),
        ));
    }
    Ok(())
}

/// Opens a destination for writing.
///
/// - `"stdout"` → standard output.
/// - [`NUL_MARK`] → [`io::sink`]; no file is created.
/// - Anything else is created or truncated.  When `prefs.overwrite` is
///   false and the file exists, the user is prompted (or the call fails
///   outright at notification level ≤ 1).
pub fn open_dst_file(path: &str, prefs: &Prefs) -> io::Result<DstFile> {
    if path == STDOUT_MARK {
        if DISPLAY_LEVEL.load(Ordering::Relaxed) >= 4 {
            eprintln!("Using stdout for output");
        }
        return Ok(DstFile { inner: Box::new(io::stdout()), is_stdout: true });
    }

    if path == NUL_MARK {
        return Ok(DstFile { inner: Box::new(io::sink()), is_stdout: false });
    }

    if !prefs.overwrite && Path::new(path).exists() {
        confirm_overwrite(path)?;
    }

    let f = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
        .map_err(|e| {
            if DISPLAY_LEVEL.load(Ordering::Relaxed) >= 1 {
                eprintln!("{}: {}", path, e);
            }
            e
        })?;

    Ok(DstFile { inner: Box::new(BufWriter::new(f)), is_stdout: false })
}

/// Write `bytes` to `path` through [`open_dst_file`] and flush.
pub fn write_dst_file(path: &str, bytes: &[u8], prefs: &Prefs) -> io::Result<()> {
    let mut dst = open_dst_file(path, prefs)?;
    dst.write_all(bytes)?;
    dst.flush()
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
