// Tests for mode inference and environment defaults (cli/op_mode.rs).

use refpack::cli::op_mode::{determine_op_mode, init_bench_seconds_from, OpMode};
use refpack::config::{BENCH_SECONDS_DEFAULT, REFPACK_EXTENSION};

#[test]
fn extension_selects_decompress() {
    assert_eq!(determine_op_mode(&format!("dir/file{REFPACK_EXTENSION}")), OpMode::Decompress);
    assert_eq!(determine_op_mode("dir/file.RFP"), OpMode::Compress);
    assert_eq!(determine_op_mode("file.rf"), OpMode::Compress);
}

#[test]
fn bench_seconds_suffixes_and_errors() {
    assert_eq!(init_bench_seconds_from(Some("1K")), 1024);
    assert_eq!(init_bench_seconds_from(Some("")), BENCH_SECONDS_DEFAULT);
    assert_eq!(init_bench_seconds_from(Some("-1")), BENCH_SECONDS_DEFAULT);
    assert_eq!(init_bench_seconds_from(Some("99999999999")), BENCH_SECONDS_DEFAULT);
}
