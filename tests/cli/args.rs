// Integration tests for the argument loop (cli/args.rs), driven through
// `detect_alias` the way the binary calls it.

use refpack::cli::args::{parse_args_from, ParsedArgs};
use refpack::cli::constants::{display_level, set_display_level};
use refpack::cli::init::detect_alias;
use refpack::cli::op_mode::OpMode;
use refpack::config::BENCH_SECONDS_DEFAULT;
use refpack::io::{NUL_MARK, STDOUT_MARK};

fn parse_as(argv0: &str, args: &[&str]) -> anyhow::Result<ParsedArgs> {
    let argv: Vec<String> = args.iter().map(|s| s.to_string()).collect();
    parse_args_from(detect_alias(argv0), argv0, &argv)
}

// ─────────────────────────────────────────────────────────────────────────────
// Aliases combined with flags
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn refpackcat_collects_inputs_to_stdout() {
    let _guard = crate::DISPLAY_LEVEL_LOCK.lock().unwrap();
    let p = parse_as("refpackcat", &["a.rfp", "b.rfp"]).unwrap();
    set_display_level(2);
    assert_eq!(p.op_mode, OpMode::Decompress);
    assert!(p.multiple_inputs);
    assert!(p.force_stdout);
    assert_eq!(p.output_filename.as_deref(), Some(STDOUT_MARK));
    assert_eq!(p.in_file_names, vec!["a.rfp", "b.rfp"]);
}

#[test]
fn unrefpack_can_be_forced_back_to_compress() {
    let p = parse_as("unrefpack", &["-z", "data"]).unwrap();
    assert_eq!(p.op_mode, OpMode::Compress);
    assert_eq!(p.input_filename.as_deref(), Some("data"));
}

#[test]
fn plain_invocation_prompts_unless_forced() {
    assert!(!parse_as("refpack", &["x"]).unwrap().prefs.overwrite);
    assert!(parse_as("refpack", &["-f", "x"]).unwrap().prefs.overwrite);
    assert!(!parse_as("refpack", &["-f", "--no-force", "x"]).unwrap().prefs.overwrite);
}

// ─────────────────────────────────────────────────────────────────────────────
// Verbosity
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn verbose_and_quiet_adjust_level() {
    let _guard = crate::DISPLAY_LEVEL_LOCK.lock().unwrap();
    set_display_level(2);
    parse_as("refpack", &["-vv"]).unwrap();
    assert_eq!(display_level(), 4);
    parse_as("refpack", &["--quiet", "-qqqqq"]).unwrap();
    assert_eq!(display_level(), 0);
    set_display_level(2);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test and bench modes
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_mode_keeps_explicit_null_output() {
    let p = parse_as("refpack", &["-t", "a.rfp", "null"]).unwrap();
    assert_eq!(p.op_mode, OpMode::Test);
    assert_eq!(p.output_filename.as_deref(), Some(NUL_MARK));
}

#[test]
fn bench_defaults() {
    let p = parse_as("refpack", &["-b", "f1", "f2"]).unwrap();
    assert_eq!(p.op_mode, OpMode::Bench);
    assert_eq!(p.in_file_names, vec!["f1", "f2"]);
    assert!(!p.bench_config.decode_only);
    assert!(!p.bench_config.bench_separately);
    if std::env::var(refpack::config::ENV_BENCH_SECONDS).is_err() {
        assert_eq!(p.bench_config.nb_seconds, BENCH_SECONDS_DEFAULT);
    }
}

#[test]
fn bench_seconds_with_size_suffix_is_accepted() {
    let p = parse_as("refpack", &["-b", "--bench-seconds=1K"]).unwrap();
    assert_eq!(p.bench_config.nb_seconds, 1024);
}

#[test]
fn bench_seconds_missing_value() {
    let err = parse_as("refpack", &["--bench-seconds"]).unwrap_err();
    assert!(err.to_string().starts_with("bad usage"));
}
