// e2e/file_api.rs — file layer end to end
//
// Drives the public file API the way the binary does: single files, whole
// directory trees expanded with create_file_list, batch decompression into
// the null sink, and --list metadata read back from files written here.

use std::fs;
use std::path::Path;

use refpack::block::{compress_to_vec, CommandStats};
use refpack::io::file_info::get_compressed_file_info;
use refpack::io::{
    compress_filename, compress_multiple_filenames, decompress_filename,
    decompress_multiple_filenames, Prefs, NUL_MARK,
};
use refpack::lorem::gen_buffer;
use refpack::util::create_file_list;

fn s(p: &Path) -> &str {
    p.to_str().unwrap()
}

// ── 1. Files match the in-memory codec ───────────────────────────────────────

#[test]
fn file_output_equals_buffer_output() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("text");
    let dst = dir.path().join("text.rfp");
    let data = gen_buffer(90_000, 11);
    fs::write(&src, &data).unwrap();

    let res = compress_filename(s(&src), s(&dst), &Prefs::default()).unwrap();
    let on_disk = fs::read(&dst).unwrap();
    assert_eq!(on_disk, compress_to_vec(&data).unwrap());
    assert_eq!(res.bytes_written, on_disk.len() as u64);
    assert_eq!(CommandStats::scan(&on_disk).unwrap().references(), res.stats.references());
}

#[test]
fn large_file_beyond_window_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("big");
    let packed = dir.path().join("big.rfp");
    let back = dir.path().join("big.out");
    let mut data = gen_buffer(150_000, 2);
    data.extend_from_slice(&vec![0x5Au8; 100_000]);
    data.extend(gen_buffer(150_000, 2));
    fs::write(&src, &data).unwrap();

    compress_filename(s(&src), s(&packed), &Prefs::default()).unwrap();
    decompress_filename(s(&packed), s(&back), &Prefs::default()).unwrap();
    assert_eq!(fs::read(&back).unwrap(), data);
}

// ── 2. Directory trees ───────────────────────────────────────────────────────

fn populate(root: &Path) -> Vec<(String, Vec<u8>)> {
    let mut files = Vec::new();
    for (i, rel) in ["a.txt", "sub/b.txt", "sub/deeper/c.bin", "z.txt"].iter().enumerate() {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        let data = gen_buffer(5_000 + 3_000 * i, i as u32);
        fs::write(&path, &data).unwrap();
        files.push((s(&path).to_owned(), data));
    }
    files
}

#[test]
fn tree_compress_then_decompress() {
    let dir = tempfile::tempdir().unwrap();
    let files = populate(dir.path());

    let list = create_file_list(&[s(dir.path())]).unwrap();
    assert_eq!(list.len(), files.len());
    let srcs: Vec<&str> = list.iter().map(String::as_str).collect();
    assert_eq!(compress_multiple_filenames(&srcs, ".rfp", &Prefs::default()).unwrap(), 0);

    for (path, _) in &files {
        fs::remove_file(path).unwrap();
    }
    let packed: Vec<String> = files.iter().map(|(p, _)| format!("{p}.rfp")).collect();
    let packed_refs: Vec<&str> = packed.iter().map(String::as_str).collect();
    decompress_multiple_filenames(&packed_refs, ".rfp", &Prefs::default()).unwrap();

    for (path, data) in &files {
        assert_eq!(&fs::read(path).unwrap(), data, "{path}");
    }
}

#[test]
fn batch_test_into_null_sink() {
    let dir = tempfile::tempdir().unwrap();
    let files = populate(dir.path());
    let srcs: Vec<&str> = files.iter().map(|(p, _)| p.as_str()).collect();
    compress_multiple_filenames(&srcs, ".rfp", &Prefs::default()).unwrap();

    let packed: Vec<String> = srcs.iter().map(|p| format!("{p}.rfp")).collect();
    let packed_refs: Vec<&str> = packed.iter().map(String::as_str).collect();
    let mut prefs = Prefs::default();
    prefs.set_test_mode(true);
    decompress_multiple_filenames(&packed_refs, NUL_MARK, &prefs).unwrap();

    // Damage one file: the batch reports it and still checks the rest.
    let victim = &packed[1];
    let mut bytes = fs::read(victim).unwrap();
    bytes.truncate(bytes.len() - 2);
    fs::write(victim, &bytes).unwrap();
    let err = decompress_multiple_filenames(&packed_refs, NUL_MARK, &prefs).unwrap_err();
    assert!(err.to_string().starts_with("1 file(s)"), "{err}");
    for p in &packed {
        assert!(Path::new(p).exists());
    }
}

#[test]
fn batch_skips_foreign_extensions() {
    let dir = tempfile::tempdir().unwrap();
    let good = dir.path().join("good.rfp");
    let odd = dir.path().join("odd.bin");
    fs::write(&good, compress_to_vec(b"hello hello hello").unwrap()).unwrap();
    fs::write(&odd, compress_to_vec(b"hello hello hello").unwrap()).unwrap();

    let err = decompress_multiple_filenames(&[s(&good), s(&odd)], ".rfp", &Prefs::default())
        .unwrap_err();
    assert!(err.to_string().contains("1 file(s) skipped"), "{err}");
    assert_eq!(fs::read(dir.path().join("good")).unwrap(), b"hello hello hello");
}

// ── 3. Metadata ──────────────────────────────────────────────────────────────

#[test]
fn listing_reflects_written_files() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("zeros");
    let dst = dir.path().join("zeros.rfp");
    fs::write(&src, vec![0u8; 50_000]).unwrap();
    let res = compress_filename(s(&src), s(&dst), &Prefs::default()).unwrap();

    let info = get_compressed_file_info(s(&dst)).unwrap();
    assert_eq!(info.file_name, "zeros.rfp");
    assert_eq!(info.file_size, res.bytes_written);
    assert_eq!(info.header.uncompressed_size, 50_000);
    assert!(info.packed_size_matches);
    assert_eq!(info.stats.matched_bytes, res.stats.matched_bytes);
    assert_eq!(info.stats.literal_bytes + info.stats.matched_bytes, 50_000);
    assert!(info.ratio().unwrap() < 1.0);
}

#[test]
fn listing_rejects_plain_files() {
    let dir = tempfile::tempdir().unwrap();
    let plain = dir.path().join("plain.rfp");
    fs::write(&plain, b"definitely not a packed stream").unwrap();
    let err = get_compressed_file_info(s(&plain)).unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
}
