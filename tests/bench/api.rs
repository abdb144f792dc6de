// Integration tests for the benchmark entry points (bench/mod.rs,
// bench/runner.rs).
//
// Every run uses nb_seconds = 0 (a single timed pass) and display level 0.

use std::fs;

use refpack::bench::runner::bench_file_table;
use refpack::bench::{bench_files, BenchConfig};

fn quiet() -> BenchConfig {
    let mut c = BenchConfig::default();
    c.set_nb_seconds(0).set_notification_level(0);
    c
}

#[test]
fn bench_files_together_and_separately() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("a.txt");
    let b = dir.path().join("b.txt");
    fs::write(&a, refpack::lorem::gen_buffer(30_000, 1)).unwrap();
    fs::write(&b, refpack::lorem::gen_buffer(20_000, 2)).unwrap();
    let files = [a.to_str().unwrap(), b.to_str().unwrap()];

    bench_files(&files, &quiet()).unwrap();

    let mut separate = quiet();
    separate.set_bench_separately(true);
    bench_files(&files, &separate).unwrap();
}

#[test]
fn file_table_reports_ratio() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("zeros");
    fs::write(&a, vec![0u8; 50_000]).unwrap();
    let r = bench_file_table(&[a.to_str().unwrap()], &quiet()).unwrap();
    assert_eq!(r.src_size, 50_000);
    assert!(r.compressed_size < 300);
    assert!(r.ratio > 100.0);
}

#[test]
fn decode_only_over_packed_files() {
    let dir = tempfile::tempdir().unwrap();
    let p = dir.path().join("x.rfp");
    let raw = refpack::lorem::gen_buffer(40_000, 9);
    fs::write(&p, refpack::compress(&raw).unwrap()).unwrap();

    let mut config = quiet();
    config.set_decode_only(true);
    let r = bench_file_table(&[p.to_str().unwrap()], &config).unwrap();
    assert_eq!(r.src_size, raw.len());
    assert!(r.decompress_speed_mb_s > 0.0);
}

#[test]
fn decode_only_rejects_plain_files_and_synthetic() {
    let dir = tempfile::tempdir().unwrap();
    let p = dir.path().join("plain.txt");
    fs::write(&p, b"not a packed stream at all").unwrap();

    let mut config = quiet();
    config.set_decode_only(true);
    assert!(bench_files(&[p.to_str().unwrap()], &config).is_err());
    assert!(bench_files(&[], &config).is_err());
}

#[test]
fn missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing");
    assert!(bench_files(&[missing.to_str().unwrap()], &quiet()).is_err());
}
