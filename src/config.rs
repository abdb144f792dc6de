// config.rs — Compile-time configuration constants.

// Suffix appended to compressed files and stripped on decompression.
pub const REFPACK_EXTENSION: &str = ".rfp";

// Default display level: 2 prints results and warnings to stderr.
// Lowered by -q, raised by -v.
pub const DISPLAY_LEVEL_DEFAULT: u32 = 2;

// Default benchmark duration per file, in seconds.
// Can be overridden by the REFPACK_BENCH_SECONDS environment variable,
// or by the -i# command-line flag.
pub const BENCH_SECONDS_DEFAULT: u32 = 3;

// Environment variable consulted for the benchmark duration.
pub const ENV_BENCH_SECONDS: &str = "REFPACK_BENCH_SECONDS";

// Size of the synthetic sample benchmarked when no file is given.
pub const BENCH_SAMPLE_SIZE: usize = 10 << 20;
