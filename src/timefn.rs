// timefn - monotonic timer helpers for the benchmark loops

use std::time::Instant;

/// Nanosecond duration.
pub type DurationNs = u64;

/// Opaque timestamp. Only meaningful as one end of a span.
#[derive(Clone, Copy)]
pub struct TimeT {
    pub(crate) t: Instant,
}

impl TimeT {
    pub fn new() -> Self {
        TimeT { t: Instant::now() }
    }
}

impl Default for TimeT {
    fn default() -> Self {
        TimeT::new()
    }
}

/// Current monotonic timestamp.
pub fn get_time() -> TimeT {
    TimeT { t: Instant::now() }
}

/// Nanoseconds between two timestamps.
pub fn span_ns(clock_start: TimeT, clock_end: TimeT) -> DurationNs {
    clock_end.t.duration_since(clock_start.t).as_nanos() as DurationNs
}

/// Nanoseconds elapsed since `clock_start`.
pub fn clock_span_ns(clock_start: TimeT) -> DurationNs {
    clock_start.t.elapsed().as_nanos() as DurationNs
}

/// Spin until the clock advances, so a timed loop starts on a fresh tick.
pub fn wait_for_next_tick() {
    let clock_start = get_time();
    while span_ns(clock_start, get_time()) == 0 {}
}

/// Throughput in MB/s for `bytes` processed in `ns` nanoseconds.
pub fn mb_per_sec(bytes: usize, ns: DurationNs) -> f64 {
    if ns == 0 {
        return 0.0;
    }
    (bytes as f64 / (1u64 << 20) as f64) / (ns as f64 / 1_000_000_000.0)
}
