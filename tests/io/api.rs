// Integration tests for the file-level compress / decompress entry points
// (io/compress.rs, io/decompress.rs).
//
// Every test works inside its own tempdir; the I/O notification level stays
// at its default of 0, so nothing is prompted or printed.

use std::fs;
use std::path::Path;

use filetime::FileTime;
use refpack::io::{
    compress_filename, compress_multiple_filenames, decompress_filename,
    decompress_multiple_filenames, Prefs, NUL_MARK,
};

fn s(p: &Path) -> &str {
    p.to_str().unwrap()
}

fn sample() -> Vec<u8> {
    refpack::lorem::gen_buffer(200_000, 42)
}

// ─────────────────────────────────────────────────────────────────────────────
// Single file
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("doc.txt");
    let packed = dir.path().join("doc.txt.rfp");
    let back = dir.path().join("doc.out");
    let original = sample();
    fs::write(&src, &original).unwrap();

    let c = compress_filename(s(&src), s(&packed), &Prefs::default()).unwrap();
    assert_eq!(c.bytes_read, original.len() as u64);
    assert!(c.bytes_written < c.bytes_read);
    assert!(c.ratio() < 100.0);
    assert_eq!(c.stats.literal_bytes + c.stats.matched_bytes, original.len());

    let d = decompress_filename(s(&packed), s(&back), &Prefs::default()).unwrap();
    assert_eq!(d.compressed_bytes, c.bytes_written);
    assert_eq!(d.decompressed_bytes, original.len() as u64);
    assert_eq!(fs::read(&back).unwrap(), original);
}

#[test]
fn empty_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("empty");
    let packed = dir.path().join("empty.rfp");
    let back = dir.path().join("empty.out");
    fs::write(&src, b"").unwrap();

    let c = compress_filename(s(&src), s(&packed), &Prefs::default()).unwrap();
    assert_eq!(c.bytes_written, 10);
    assert_eq!(c.ratio(), 100.0);
    decompress_filename(s(&packed), s(&back), &Prefs::default()).unwrap();
    assert!(fs::read(&back).unwrap().is_empty());
}

#[test]
fn missing_source_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let err = compress_filename(
        s(&dir.path().join("nope")),
        s(&dir.path().join("nope.rfp")),
        &Prefs::default(),
    )
    .unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
    assert!(!dir.path().join("nope.rfp").exists());
}

#[test]
fn test_mode_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("t.bin");
    let packed = dir.path().join("t.bin.rfp");
    fs::write(&src, sample()).unwrap();
    compress_filename(s(&src), s(&packed), &Prefs::default()).unwrap();

    let mut prefs = Prefs::default();
    prefs.set_test_mode(true);
    prefs.set_remove_src_file(true);
    let d = decompress_filename(s(&packed), NUL_MARK, &prefs).unwrap();
    assert_eq!(d.decompressed_bytes, 200_000);
    // Test mode never removes its input.
    assert!(packed.exists());
}

#[test]
fn corrupt_stream_leaves_no_output() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("cut.rfp");
    let dst = dir.path().join("cut");
    let mut packed = refpack::compress(&sample()).unwrap().into_vec();
    packed.truncate(packed.len() / 2);
    fs::write(&src, &packed).unwrap();

    let err = decompress_filename(s(&src), s(&dst), &Prefs::default()).unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
    assert!(!dst.exists());
}

#[test]
fn keep_status_copies_mtime() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("old.txt");
    let dst = dir.path().join("old.txt.rfp");
    fs::write(&src, b"timestamps travel with the data").unwrap();
    let stamp = FileTime::from_unix_time(1_000_000_000, 0);
    filetime::set_file_mtime(&src, stamp).unwrap();

    compress_filename(s(&src), s(&dst), &Prefs::default()).unwrap();
    let got = FileTime::from_last_modification_time(&fs::metadata(&dst).unwrap());
    assert_eq!(got.unix_seconds(), stamp.unix_seconds());

    let plain = dir.path().join("plain.rfp");
    let mut prefs = Prefs::default();
    prefs.set_copy_file_status(false);
    compress_filename(s(&src), s(&plain), &prefs).unwrap();
    let got = FileTime::from_last_modification_time(&fs::metadata(&plain).unwrap());
    assert_ne!(got.unix_seconds(), stamp.unix_seconds());
}

#[test]
fn existing_output_refused_without_overwrite() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("a");
    let dst = dir.path().join("a.rfp");
    fs::write(&src, b"new").unwrap();
    fs::write(&dst, b"old").unwrap();

    let mut prefs = Prefs::default();
    prefs.set_overwrite(false);
    let err = compress_filename(s(&src), s(&dst), &prefs).unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::AlreadyExists);
    assert_eq!(fs::read(&dst).unwrap(), b"old");
}

// ─────────────────────────────────────────────────────────────────────────────
// Batches
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn batch_round_trip_with_removal() {
    let dir = tempfile::tempdir().unwrap();
    let names: Vec<_> = (0..3).map(|i| dir.path().join(format!("f{i}.dat"))).collect();
    for (i, p) in names.iter().enumerate() {
        fs::write(p, refpack::lorem::gen_buffer(10_000 + i, i as u32)).unwrap();
    }
    let srcs: Vec<&str> = names.iter().map(|p| s(p)).collect();

    let mut prefs = Prefs::default();
    prefs.set_remove_src_file(true);
    assert_eq!(compress_multiple_filenames(&srcs, ".rfp", &prefs).unwrap(), 0);
    for p in &names {
        assert!(!p.exists());
    }

    let packed: Vec<String> = srcs.iter().map(|p| format!("{p}.rfp")).collect();
    let packed_refs: Vec<&str> = packed.iter().map(String::as_str).collect();
    decompress_multiple_filenames(&packed_refs, ".rfp", &prefs).unwrap();
    for (i, p) in names.iter().enumerate() {
        assert_eq!(fs::read(p).unwrap(), refpack::lorem::gen_buffer(10_000 + i, i as u32));
    }
    for p in &packed {
        assert!(!Path::new(p).exists());
    }
}

#[test]
fn batch_decompress_continues_past_failures() {
    let dir = tempfile::tempdir().unwrap();
    let bad = dir.path().join("bad.rfp");
    let good = dir.path().join("good.rfp");
    fs::write(&bad, b"garbage!").unwrap();
    fs::write(&good, refpack::compress(b"fine").unwrap()).unwrap();

    let err = decompress_multiple_filenames(&[s(&bad), s(&good)], ".rfp", &Prefs::default())
        .unwrap_err();
    assert!(err.to_string().contains("1 file(s) could not be decompressed"));
    assert_eq!(fs::read(dir.path().join("good")).unwrap(), b"fine");
}
