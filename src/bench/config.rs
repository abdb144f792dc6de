//! Benchmark configuration: timing constants and runtime parameters for the
//! `bench` subsystem.
//!
//! [`BenchConfig`] holds the settings for one benchmark session. Its
//! builder-style setters let the CLI fill it in flag by flag before handing it
//! to [`super::bench_files`].

use crate::config::BENCH_SECONDS_DEFAULT;

// ── Timing constants ─────────────────────────────────────────────────────────

/// Target duration of one timed pass (1 second in nanoseconds).
pub const TIMELOOP_NANOSEC: u64 = 1_000_000_000;

/// Active benchmarking period before a cool-down pause (70 seconds).
pub const ACTIVEPERIOD_NANOSEC: u64 = 70 * 1_000_000_000;

/// Cool-down pause between active periods, in seconds.
pub const COOLPERIOD_SEC: u64 = 10;

// ── Size constants ───────────────────────────────────────────────────────────

pub const MB: usize = 1 << 20;
pub const GB: usize = 1 << 30;

/// Largest buffer the benchmark will try to load.
///
/// 2 GiB − 64 MiB on 32-bit targets, `1 << (pointer_bits − 31)` otherwise.
pub const MAX_MEMORY: usize = if usize::BITS == 32 {
    (2 * GB) - (64 * MB)
} else {
    1usize << (usize::BITS - 31)
};

// ── BenchConfig ──────────────────────────────────────────────────────────────

/// Runtime parameters for one benchmark session.
#[derive(Debug, Clone)]
pub struct BenchConfig {
    /// 0 = silent, 1 = errors, 2 = results (default), 3 = progress, 4 = all.
    pub display_level: u32,
    /// Minimum duration of each phase, in seconds. `0` runs a single pass.
    pub nb_seconds: u32,
    /// Report one result line per input file instead of one aggregate line.
    pub bench_separately: bool,
    /// Inputs are already packed; time decompression only.
    pub decode_only: bool,
}

impl Default for BenchConfig {
    fn default() -> Self {
        BenchConfig {
            display_level: 2,
            nb_seconds: BENCH_SECONDS_DEFAULT,
            bench_separately: false,
            decode_only: false,
        }
    }
}

impl BenchConfig {
    pub fn set_notification_level(&mut self, level: u32) -> &mut Self {
        self.display_level = level;
        self
    }

    /// Set the minimum duration of the compression and decompression phases.
    pub fn set_nb_seconds(&mut self, nb_seconds: u32) -> &mut Self {
        self.nb_seconds = nb_seconds;
        self
    }

    pub fn set_bench_separately(&mut self, separate: bool) -> &mut Self {
        self.bench_separately = separate;
        self
    }

    /// In decode-only mode every input must be a RefPack stream; the
    /// compression phase is skipped.
    pub fn set_decode_only(&mut self, set: bool) -> &mut Self {
        self.decode_only = set;
        self
    }
}
