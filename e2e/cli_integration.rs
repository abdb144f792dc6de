// e2e/cli_integration.rs — the refpack binary as a black box
//
// Runs the built executable with std::process::Command and checks exit
// codes, produced files and piped output for compression, decompression,
// test mode, --list, multiple inputs, the benchmark and the refpackcat alias.
// Standard input is always redirected so no run can block on a prompt.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use refpack::block::{compress_to_vec, decompress_to_vec};
use tempfile::TempDir;

fn refpack_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_refpack"))
}

fn s(p: &Path) -> &str {
    p.to_str().unwrap()
}

fn run(dir: &Path, args: &[&str]) -> Output {
    Command::new(refpack_bin())
        .args(args)
        .current_dir(dir)
        .stdin(Stdio::null())
        .output()
        .expect("failed to run refpack")
}

fn run_with_stdin(dir: &Path, args: &[&str], input: &[u8]) -> Output {
    let mut child = Command::new(refpack_bin())
        .args(args)
        .current_dir(dir)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn refpack");
    let mut stdin = child.stdin.take().unwrap();
    let data = input.to_vec();
    let writer = std::thread::spawn(move || {
        stdin.write_all(&data).unwrap();
    });
    let out = child.wait_with_output().unwrap();
    writer.join().unwrap();
    out
}

/// A tempdir holding `input.txt` with about 8 KB of repetitive text.
fn make_temp_input() -> (TempDir, PathBuf, Vec<u8>) {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("input.txt");
    let content = "Hello, RefPack! The window reaches far back.\n".repeat(180).into_bytes();
    fs::write(&input, &content).unwrap();
    (dir, input, content)
}

// ── 1. Compress / decompress ─────────────────────────────────────────────────

#[test]
fn explicit_names_round_trip() {
    let (dir, input, original) = make_temp_input();
    let packed = dir.path().join("out.rfp");
    let back = dir.path().join("back.txt");

    let out = run(dir.path(), &["-f", s(&input), s(&packed)]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let bytes = fs::read(&packed).unwrap();
    assert_eq!(bytes, compress_to_vec(&original).unwrap());

    let out = run(dir.path(), &["-d", "-f", s(&packed), s(&back)]);
    assert!(out.status.success());
    assert_eq!(fs::read(&back).unwrap(), original);
}

#[test]
fn automatic_output_names() {
    let (dir, input, original) = make_temp_input();
    let packed = dir.path().join("input.txt.rfp");

    assert!(run(dir.path(), &["-f", s(&input)]).status.success());
    assert!(packed.exists());

    fs::remove_file(&input).unwrap();
    // Mode follows the extension.
    assert!(run(dir.path(), &["-f", s(&packed)]).status.success());
    assert_eq!(fs::read(&input).unwrap(), original);
}

#[test]
fn packed_input_without_extension_is_decoded() {
    let (dir, input, original) = make_temp_input();
    let packed = dir.path().join("packed.bin");
    let out_path = dir.path().join("out");
    fs::write(&packed, compress_to_vec(&original).unwrap()).unwrap();

    let out = run(dir.path(), &["-f", s(&packed), s(&out_path)]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(fs::read(&out_path).unwrap(), original);

    // No extension to strip: the output name cannot be derived.
    let out = run(dir.path(), &["-f", s(&packed)]);
    assert_eq!(out.status.code(), Some(1));
    assert!(!dir.path().join("packed.bin.rfp").exists());
    assert!(input.exists());
}

#[test]
fn decompress_without_extension_fails() {
    let (dir, input, _) = make_temp_input();
    let out = run(dir.path(), &["-d", s(&input)]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("Cannot determine an output filename"));
}

#[test]
fn pipe_mode_round_trip() {
    let (dir, _, original) = make_temp_input();
    let packed = run_with_stdin(dir.path(), &[], &original);
    assert!(packed.status.success());
    assert_eq!(decompress_to_vec(&packed.stdout).unwrap(), original);

    let back = run_with_stdin(dir.path(), &["-d"], &packed.stdout);
    assert!(back.status.success());
    assert_eq!(back.stdout, original);
}

#[test]
fn stdout_flag_writes_stream() {
    let (dir, input, original) = make_temp_input();
    let out = run(dir.path(), &["-c", s(&input)]);
    assert!(out.status.success());
    assert_eq!(out.stdout, compress_to_vec(&original).unwrap());
    assert!(!dir.path().join("input.txt.rfp").exists());
}

#[test]
fn rm_removes_source() {
    let (dir, input, _) = make_temp_input();
    assert!(run(dir.path(), &["-f", "--rm", s(&input)]).status.success());
    assert!(!input.exists());
    assert!(dir.path().join("input.txt.rfp").exists());
}

#[test]
fn existing_output_is_not_overwritten_without_force() {
    let (dir, input, _) = make_temp_input();
    let packed = dir.path().join("input.txt.rfp");
    fs::write(&packed, b"keep me").unwrap();

    let out = run(dir.path(), &[s(&input)]);
    assert_eq!(out.status.code(), Some(1));
    assert_eq!(fs::read(&packed).unwrap(), b"keep me");
}

// ── 2. Test mode and listing ─────────────────────────────────────────────────

#[test]
fn test_mode_checks_integrity() {
    let (dir, input, _) = make_temp_input();
    let packed = dir.path().join("input.txt.rfp");
    assert!(run(dir.path(), &["-f", s(&input)]).status.success());
    fs::remove_file(&input).unwrap();

    assert!(run(dir.path(), &["-t", s(&packed)]).status.success());
    assert!(!input.exists(), "test mode must not write output");

    let mut bytes = fs::read(&packed).unwrap();
    bytes.truncate(bytes.len() - 3);
    fs::write(&packed, &bytes).unwrap();
    assert_eq!(run(dir.path(), &["-t", s(&packed)]).status.code(), Some(1));
}

#[test]
fn list_prints_table() {
    let (dir, input, _) = make_temp_input();
    let packed = dir.path().join("input.txt.rfp");
    assert!(run(dir.path(), &["-f", s(&input)]).status.success());

    let out = run(dir.path(), &["--list", s(&packed)]);
    assert!(out.status.success());
    let text = String::from_utf8_lossy(&out.stdout);
    assert!(text.contains("Compressed"));
    assert!(text.contains("input.txt.rfp"));

    let out = run(dir.path(), &["--list", s(&input)]);
    assert_eq!(out.status.code(), Some(1));
}

// ── 3. Multiple inputs ───────────────────────────────────────────────────────

#[test]
fn multiple_inputs_each_get_a_file() {
    let dir = TempDir::new().unwrap();
    let a = dir.path().join("a.txt");
    let b = dir.path().join("b.txt");
    fs::write(&a, b"alpha alpha alpha alpha").unwrap();
    fs::write(&b, b"beta beta beta beta beta").unwrap();

    assert!(run(dir.path(), &["-m", "-f", s(&a), s(&b)]).status.success());
    let pa = dir.path().join("a.txt.rfp");
    let pb = dir.path().join("b.txt.rfp");
    assert_eq!(decompress_to_vec(&fs::read(&pa).unwrap()).unwrap(), b"alpha alpha alpha alpha");
    assert_eq!(decompress_to_vec(&fs::read(&pb).unwrap()).unwrap(), b"beta beta beta beta beta");

    fs::remove_file(&a).unwrap();
    fs::remove_file(&b).unwrap();
    assert!(run(dir.path(), &["-d", "-m", "-f", s(&pa), s(&pb)]).status.success());
    assert!(a.exists() && b.exists());
}

#[cfg(unix)]
#[test]
fn refpackcat_alias_streams_to_stdout() {
    let (dir, input, original) = make_temp_input();
    let packed = dir.path().join("input.txt.rfp");
    assert!(run(dir.path(), &["-f", s(&input)]).status.success());

    let alias = dir.path().join("refpackcat");
    std::os::unix::fs::symlink(refpack_bin(), &alias).unwrap();
    let out = Command::new(&alias)
        .arg(s(&packed))
        .stdin(Stdio::null())
        .output()
        .unwrap();
    assert!(out.status.success());
    assert_eq!(out.stdout, original);
}

// ── 4. Options and usage ─────────────────────────────────────────────────────

#[test]
fn version_banner() {
    let out = run(Path::new("."), &["-V"]);
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).contains("refpack v1.0.0"));
}

#[test]
fn unknown_option_is_bad_usage() {
    let out = run(Path::new("."), &["--bogus"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("bad usage"));
}

#[test]
fn bench_on_synthetic_sample() {
    let out = run(Path::new("."), &["-b", "-i0"]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
}

#[test]
fn bench_on_file() {
    let (dir, input, _) = make_temp_input();
    let out = run(dir.path(), &["-b", "-i0", s(&input)]);
    assert!(out.status.success());
}
