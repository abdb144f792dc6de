//! Benchmark entry points for refpack.
//!
//! [`bench_files`] is the public API. Callers pass a list of real files, or an
//! empty slice to run the built-in synthetic lorem-ipsum benchmark. Work is
//! dispatched to:
//!
//! - [`runner::bench_buffer`] — benchmarks one in-memory buffer.
//! - [`runner::bench_file_table`] — reads a set of files into memory and
//!   benchmarks them together as a single logical dataset.
//!
//! [`config::BenchConfig`] controls verbosity, duration, per-file reporting and
//! decode-only mode.

pub mod bench_mem;
pub mod config;
pub mod runner;

pub use bench_mem::BenchResult;
pub use config::BenchConfig;

use std::io;

use crate::config::BENCH_SAMPLE_SIZE;
use runner::{bench_buffer, bench_file_table};

// ── Synthetic test ────────────────────────────────────────────────────────────

fn synthetic_test(config: &BenchConfig) -> io::Result<()> {
    if config.decode_only {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "decode-only benchmark needs packed input files",
        ));
    }
    let src_buffer = crate::lorem::gen_buffer(BENCH_SAMPLE_SIZE, 0);
    bench_buffer(&src_buffer, "Lorem ipsum", config, &[]).map(|_| ())
}

// ── Per-file benchmarking ─────────────────────────────────────────────────────

fn bench_files_separately(file_names: &[&str], config: &BenchConfig) -> io::Result<()> {
    let mut bench_error = false;
    for file_name in file_names {
        if let Err(e) = bench_file_table(&[file_name], config) {
            eprintln!("bench error for {}: {}", file_name, e);
            bench_error = true;
        }
    }
    if bench_error {
        Err(io::Error::new(io::ErrorKind::Other, "benchmark reported errors"))
    } else {
        Ok(())
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Benchmark compression and decompression across one or more files.
///
/// An empty `file_names` runs the synthetic lorem-ipsum sample instead. In
/// decode-only mode every file must already be a RefPack stream.
///
/// # Errors
///
/// Returns `Err` if a file cannot be read or any benchmark pass fails,
/// including a round-trip checksum mismatch.
pub fn bench_files(file_names: &[&str], config: &BenchConfig) -> io::Result<()> {
    if config.decode_only && config.display_level >= 2 {
        eprintln!("Benchmark Decompression of RefPack streams ");
    }

    if file_names.is_empty() {
        synthetic_test(config)
    } else if config.bench_separately {
        bench_files_separately(file_names, config)
    } else {
        bench_file_table(file_names, config).map(|_| ())
    }
}
