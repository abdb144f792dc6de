// e2e/roundtrip.rs — whole-buffer round-trip tests
//
// Feeds the codec inputs shaped to hit each encoder path: literal-only data,
// long runs, periodic data at every command form, inputs straddling the
// literal-block and match-length limits, and repeats at the edge of the
// 131071-byte window.  Every case must decode back to its input and stay
// within compress_bound.

use refpack::block::{compress_bound, compress_with_stats, decompress, MAX_MATCH_LENGTH, WINDOW_SIZE};
use refpack::lorem::gen_buffer;

/// Deterministic bytes with no exploitable structure.
fn noise(len: usize, seed: u64) -> Vec<u8> {
    let mut x = seed.wrapping_mul(0x9E37_79B9_7F4A_7C15) | 1;
    (0..len)
        .map(|_| {
            x ^= x << 13;
            x ^= x >> 7;
            x ^= x << 17;
            (x >> 24) as u8
        })
        .collect()
}

fn assert_round_trip(input: &[u8]) {
    let (packed, stats) = compress_with_stats(input).unwrap();
    assert!(
        packed.len() <= compress_bound(input.len()),
        "{} bytes packed into {} (bound {})",
        input.len(),
        packed.len(),
        compress_bound(input.len())
    );
    assert_eq!(stats.literal_bytes + stats.matched_bytes, input.len());
    let raw = decompress(&packed).unwrap();
    assert!(raw.as_bytes() == input, "round trip mismatch for {} bytes", input.len());
}

// ── 1. Small and boundary sizes ──────────────────────────────────────────────

#[test]
fn every_length_up_to_300() {
    let text = gen_buffer(300, 4);
    let rand = noise(300, 4);
    for n in 0..=300 {
        assert_round_trip(&text[..n]);
        assert_round_trip(&rand[..n]);
    }
}

#[test]
fn literal_block_boundaries() {
    for n in [3usize, 4, 5, 7, 8, 111, 112, 113, 115, 116, 224, 225, 227, 228] {
        assert_round_trip(&noise(n, n as u64));
    }
}

// ── 2. Runs and periodic data ────────────────────────────────────────────────

#[test]
fn runs_around_max_match() {
    for n in [
        MAX_MATCH_LENGTH - 1,
        MAX_MATCH_LENGTH,
        MAX_MATCH_LENGTH + 1,
        MAX_MATCH_LENGTH + 2,
        MAX_MATCH_LENGTH + 3,
        2 * MAX_MATCH_LENGTH + 1,
        100_000,
    ] {
        assert_round_trip(&vec![0xA5u8; n]);
    }
}

#[test]
fn periodic_data_every_period() {
    for period in 1..=40usize {
        let unit = noise(period, period as u64 + 100);
        let input: Vec<u8> = unit.iter().copied().cycle().take(5_000).collect();
        assert_round_trip(&input);
    }
}

#[test]
fn short_long_and_very_long_forms() {
    // Repeats at distances that force each reference form.
    for distance in [3usize, 1023, 1024, 1025, 16_383, 16_384, 16_385, 100_000] {
        let head = noise(80, distance as u64);
        let mut input = head.clone();
        input.extend(noise(distance - head.len().min(distance), 7));
        input.extend_from_slice(&head);
        input.extend_from_slice(&head[..10]);
        assert_round_trip(&input);
    }
}

// ── 3. Window edge ───────────────────────────────────────────────────────────

#[test]
fn repeat_exactly_at_window_edge() {
    let head = noise(200, 1);
    for gap in [WINDOW_SIZE - 200 - 1, WINDOW_SIZE - 200, WINDOW_SIZE - 200 + 1] {
        let mut input = head.clone();
        input.extend(noise(gap, 2));
        input.extend_from_slice(&head);
        assert_round_trip(&input);
    }
}

#[test]
fn input_larger_than_window() {
    let mut input = gen_buffer(300_000, 8);
    input.extend(noise(50_000, 8));
    input.extend(gen_buffer(300_000, 8));
    assert_round_trip(&input);
}

// ── 4. Realistic data ────────────────────────────────────────────────────────

#[test]
fn text_compresses_well() {
    let input = gen_buffer(256 * 1024, 0);
    let (packed, stats) = compress_with_stats(&input).unwrap();
    assert!(packed.len() * 3 < input.len(), "ratio too low: {}", packed.len());
    assert!(stats.references() > 1000, "{} references", stats.references());
    assert_eq!(decompress(&packed).unwrap().as_bytes(), &input[..]);
}

#[test]
fn mixed_binary_structure() {
    // Fixed-width records with a counter field, like a table dump.
    let mut input = Vec::new();
    for i in 0u32..20_000 {
        input.extend_from_slice(&i.to_le_bytes());
        input.extend_from_slice(b"\x00\x01record\xFF");
        input.push((i % 7) as u8);
    }
    assert_round_trip(&input);
}
