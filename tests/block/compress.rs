// Unit tests for the encoder (block/compress.rs).
//
// Byte-exact expectations come from streams produced by the reference encoder;
// matching them pins the parse choices (greedy, nearest on ties, cheapest form).

use refpack::block::{compress, compress_to_vec, compress_with_stats, decompress, CommandIter};
use refpack::block::{compress_bound, Command, Header};

/// Deterministic noise that defeats the match finder.
fn noise(len: usize, mut seed: u32) -> Vec<u8> {
    (0..len)
        .map(|_| {
            seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            (seed >> 16) as u8
        })
        .collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Golden vectors
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn empty_input() {
    assert_eq!(
        compress_to_vec(b"").unwrap(),
        [0x00, 0x00, 0x00, 0x00, 0x10, 0xFB, 0x00, 0x00, 0x0A, 0xFC]
    );
}

#[test]
fn single_byte() {
    assert_eq!(
        compress_to_vec(b"A").unwrap(),
        [0x01, 0x00, 0x00, 0x00, 0x10, 0xFB, 0x00, 0x00, 0x0B, 0xFD, 0x41]
    );
}

#[test]
fn repeated_triplet_uses_short_reference() {
    assert_eq!(
        compress_to_vec(b"ABCABCABCABC").unwrap(),
        [0x0C, 0x00, 0x00, 0x00, 0x10, 0xFB, 0x00, 0x00, 0x0F, 0x1B, 0x02, b'A', b'B', b'C', 0xFC]
    );
}

#[test]
fn zero_run_uses_very_long_reference() {
    assert_eq!(
        compress_to_vec(&[0u8; 100]).unwrap(),
        [0x64, 0x00, 0x00, 0x00, 0x10, 0xFB, 0x00, 0x00, 0x0F, 0xC1, 0x00, 0x00, 0x5E, 0x00, 0xFC]
    );
}

#[test]
fn alternating_pair_uses_long_reference() {
    let input = b"abababababababababab".repeat(3);
    assert_eq!(
        compress_to_vec(&input).unwrap(),
        [0x3C, 0x00, 0x00, 0x00, 0x10, 0xFB, 0x00, 0x00, 0x0F, 0xB6, 0x80, 0x01, b'a', b'b', 0xFC]
    );
}

#[test]
fn literals_only_text() {
    let mut expected = vec![0x11, 0x00, 0x00, 0x00, 0x10, 0xFB, 0x00, 0x00, 0x1C, 0xE3];
    expected.extend_from_slice(b"Simple Test Inpu");
    expected.extend_from_slice(&[0xFD, b't']);
    assert_eq!(compress_to_vec(b"Simple Test Input").unwrap(), expected);
}

#[test]
fn literal_blocks_split_at_112() {
    let input: Vec<u8> = (0..200u8).collect();
    let mut expected = vec![0xC8, 0x00, 0x00, 0x00, 0x10, 0xFB, 0x00, 0x00, 0xD4, 0xFB];
    expected.extend_from_slice(&input[..112]);
    expected.push(0xF5);
    expected.extend_from_slice(&input[112..]);
    expected.push(0xFC);
    assert_eq!(compress_to_vec(&input).unwrap(), expected);
}

#[test]
fn literal_block_before_long_reference() {
    assert_eq!(
        compress_to_vec(b"hello hello hello").unwrap(),
        [
            0x11, 0x00, 0x00, 0x00, 0x10, 0xFB, 0x00, 0x00, 0x14, 0xE0, b'h', b'e', b'l', b'l',
            0x87, 0x80, 0x05, b'o', b' ', 0xFC
        ]
    );
}

// ─────────────────────────────────────────────────────────────────────────────
// Structure
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn header_describes_output() {
    let input = b"the quick brown fox jumps over the lazy dog; the quick brown fox".repeat(40);
    let packed = compress(&input).unwrap();
    let h = Header::parse(&packed).unwrap();
    assert_eq!(h.uncompressed_size as usize, input.len());
    assert_eq!(h.packed_size as usize, packed.len());
    assert!(h.has_magic());
    assert!(packed.len() < input.len() / 4);
}

#[test]
fn stats_match_stream() {
    let input = b"abcdefgh".repeat(500);
    let (packed, stats) = compress_with_stats(&input).unwrap();
    assert_eq!(stats.literal_bytes + stats.matched_bytes, input.len());
    assert_eq!(stats, refpack::block::CommandStats::scan(&packed).unwrap());
}

#[test]
fn incompressible_stays_within_bound() {
    for len in [1usize, 3, 4, 111, 112, 113, 4096, 70_000] {
        let input = noise(len, len as u32);
        let packed = compress(&input).unwrap();
        assert!(packed.len() <= compress_bound(len), "len {len}: {} bytes", packed.len());
        assert_eq!(decompress(&packed).unwrap().as_bytes(), &input[..]);
    }
}

#[test]
fn far_repeat_uses_very_long_form() {
    let head = noise(64, 7);
    let mut input = head.clone();
    input.extend(noise(40_000, 99));
    input.extend_from_slice(&head);

    let (packed, stats) = compress_with_stats(&input).unwrap();
    assert!(stats.very_long_refs >= 1);
    assert_eq!(decompress(&packed).unwrap().as_bytes(), &input[..]);

    let far = CommandIter::new(&packed)
        .unwrap()
        .filter_map(Result::ok)
        .any(|(cmd, _)| matches!(cmd, Command::BackRef { distance, .. } if distance > 16_384));
    assert!(far);
}

#[test]
fn repeat_beyond_window_is_not_referenced() {
    let head = noise(64, 3);
    let mut input = head.clone();
    input.extend(noise(131_100, 5));
    input.extend_from_slice(&head);

    let packed = compress(&input).unwrap();
    for item in CommandIter::new(&packed).unwrap() {
        if let (Command::BackRef { distance, .. }, _) = item.unwrap() {
            assert!(distance <= 131_071);
        }
    }
    assert_eq!(decompress(&packed).unwrap().as_bytes(), &input[..]);
}

#[test]
fn output_is_deterministic() {
    let input = refpack::lorem::gen_buffer(50_000, 1);
    assert_eq!(compress(&input).unwrap(), compress(&input).unwrap());
}
