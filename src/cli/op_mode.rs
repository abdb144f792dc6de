//! Operation mode selection and startup defaults for the CLI.
//!
//! - [`OpMode`] — what the CLI should do with its inputs.
//! - [`determine_op_mode`] — infers the mode from a filename's extension, or
//!   from the file's header when the extension is missing.
//! - [`init_bench_seconds`] — reads the benchmark duration default from the
//!   environment.

use std::fs::File;
use std::io::Read;

use crate::block::{is_refpack, HEADER_SIZE};
use crate::cli::arg_utils::read_u32_from_str;
use crate::cli::constants::display_level;
use crate::config::{BENCH_SECONDS_DEFAULT, ENV_BENCH_SECONDS, REFPACK_EXTENSION};
use crate::io::file_io::STDIN_MARK;

/// What the CLI should do with its inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpMode {
    /// Decompress if the input ends in `.rfp` or starts with a RefPack
    /// header, compress otherwise.
    Auto,
    Compress,
    Decompress,
    /// Decode fully and discard the output.
    Test,
    /// Run the in-memory benchmark.
    Bench,
    /// Print header and command statistics of packed files.
    List,
}

/// Returns [`OpMode::Decompress`] if `filename` ends with `.rfp` or the file
/// begins with a RefPack header, [`OpMode::Compress`] otherwise.
///
/// Unreadable paths and the `stdin` sentinel compress; the I/O layer reports
/// any open error later.
pub fn determine_op_mode(filename: &str) -> OpMode {
    if filename.ends_with(REFPACK_EXTENSION) || has_refpack_header(filename) {
        OpMode::Decompress
    } else {
        OpMode::Compress
    }
}

/// `true` when the first [`HEADER_SIZE`] bytes of the file at `path` carry
/// the `10 FB` magic.
fn has_refpack_header(path: &str) -> bool {
    if path == STDIN_MARK {
        return false;
    }
    let Ok(file) = File::open(path) else {
        return false;
    };
    let mut head = Vec::with_capacity(HEADER_SIZE);
    match file.take(HEADER_SIZE as u64).read_to_end(&mut head) {
        Ok(_) => is_refpack(&head),
        Err(_) => false,
    }
}

/// Read the benchmark duration from `REFPACK_BENCH_SECONDS`.
pub fn init_bench_seconds() -> u32 {
    init_bench_seconds_from(std::env::var(ENV_BENCH_SECONDS).ok().as_deref())
}

/// Parse an optional `REFPACK_BENCH_SECONDS` value; `None` means unset.
///
/// Non-numeric values are reported at display level 2 and replaced by
/// [`BENCH_SECONDS_DEFAULT`].
pub fn init_bench_seconds_from(env_val: Option<&str>) -> u32 {
    if let Some(env) = env_val {
        if let Some((val, "")) = read_u32_from_str(env) {
            return val;
        }
        if display_level() >= 2 {
            eprintln!(
                "Ignore environment variable setting {}={}: not a valid unsigned value ",
                ENV_BENCH_SECONDS, env
            );
        }
    }
    BENCH_SECONDS_DEFAULT
}
