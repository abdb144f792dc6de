// Tests for benchmark settings (bench/config.rs).

use refpack::bench::config::{BenchConfig, MAX_MEMORY, TIMELOOP_NANOSEC};
use refpack::config::BENCH_SECONDS_DEFAULT;

#[test]
fn defaults() {
    let c = BenchConfig::default();
    assert_eq!(c.display_level, 2);
    assert_eq!(c.nb_seconds, BENCH_SECONDS_DEFAULT);
    assert!(!c.bench_separately);
    assert!(!c.decode_only);
}

#[test]
fn setters_chain() {
    let mut c = BenchConfig::default();
    c.set_notification_level(4)
        .set_nb_seconds(9)
        .set_bench_separately(true)
        .set_decode_only(true);
    assert_eq!(c.display_level, 4);
    assert_eq!(c.nb_seconds, 9);
    assert!(c.bench_separately);
    assert!(c.decode_only);
}

#[test]
fn limits() {
    assert_eq!(TIMELOOP_NANOSEC, 1_000_000_000);
    assert!(MAX_MEMORY >= 1 << 30);
}
