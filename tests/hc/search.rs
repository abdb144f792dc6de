// Unit tests for the match finder (hc/search.rs).
//
// Coverage:
//   - encoding_cost: every form boundary on offset and length
//   - match_length: disjoint and overlapping ranges, cap
//   - Match: NONE baseline, is_match, offset
//   - find_best_match: no candidates, overlapping run, nearest-wins tie,
//                      longest match cap

use refpack::block::types::MAX_MATCH_LENGTH;
use refpack::hc::{encoding_cost, find_best_match, match_length, Match, WindowIndex};

/// Index every position before `pos` and search at `pos`.
fn search_at(src: &[u8], pos: usize) -> Match {
    let mut w = WindowIndex::new().unwrap();
    for p in 0..pos {
        w.insert(src, p);
    }
    find_best_match(&w, src, pos)
}

// ─────────────────────────────────────────────────────────────────────────────
// encoding_cost
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn cost_short_form() {
    assert_eq!(encoding_cost(0, 3), 2);
    assert_eq!(encoding_cost(1023, 10), 2);
}

#[test]
fn cost_long_form() {
    assert_eq!(encoding_cost(1024, 3), 3);
    assert_eq!(encoding_cost(0, 11), 3);
    assert_eq!(encoding_cost(16_383, 67), 3);
}

#[test]
fn cost_very_long_form() {
    assert_eq!(encoding_cost(16_384, 5), 4);
    assert_eq!(encoding_cost(0, 68), 4);
    assert_eq!(encoding_cost(131_070, MAX_MATCH_LENGTH), 4);
}

// ─────────────────────────────────────────────────────────────────────────────
// match_length
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn match_length_disjoint() {
    let src = b"hello, help";
    assert_eq!(match_length(src, 7, 0, 4), 3);
    assert_eq!(match_length(src, 0, 0, 11), 11);
}

#[test]
fn match_length_overlapping_run() {
    let src = [9u8; 40];
    assert_eq!(match_length(&src, 1, 0, 39), 39);
    assert_eq!(match_length(&src, 1, 0, 10), 10);
}

// ─────────────────────────────────────────────────────────────────────────────
// Match
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn match_profitability() {
    assert!(!Match::NONE.is_match());
    assert!(!Match { distance: 1, length: 3, cost: 3 }.is_match());
    assert!(Match { distance: 1, length: 3, cost: 2 }.is_match());
    assert_eq!(Match { distance: 1, length: 3, cost: 2 }.offset(), 0);
    assert_eq!(Match { distance: 1024, length: 3, cost: 3 }.offset(), 1023);
}

#[test]
fn baseline_offset_is_zero() {
    assert_eq!(Match::NONE.offset(), 0);
}

// ─────────────────────────────────────────────────────────────────────────────
// find_best_match
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn no_candidates_gives_none() {
    assert_eq!(search_at(b"abcdefgh", 4), Match::NONE);
    assert_eq!(search_at(b"ab", 0), Match::NONE);
}

#[test]
fn overlapping_repeat_found() {
    let m = search_at(b"ABCABCABCABC", 3);
    assert_eq!(m, Match { distance: 3, length: 9, cost: 2 });
}

#[test]
fn equal_gain_prefers_nearer() {
    // Position 0 matches 11 bytes (long form, gain 8); position 12 matches
    // 10 bytes (short form, gain 8).
    let src = b"0123456789A#0123456789B@0123456789A";
    let m = search_at(src, 24);
    assert_eq!(m, Match { distance: 12, length: 10, cost: 2 });
}

#[test]
fn higher_gain_wins_over_nearer() {
    let src = b"0123456789ABCDEF#0123#0123456789ABCDEF";
    let m = search_at(src, 22);
    assert_eq!(m.distance, 22);
    assert_eq!(m.length, 16);
    assert_eq!(m.cost, 3);
}

#[test]
fn length_capped_at_max() {
    let src = vec![0u8; 2000];
    let m = search_at(&src, 1);
    assert_eq!(m, Match { distance: 1, length: MAX_MATCH_LENGTH, cost: 4 });
}

#[test]
fn length_capped_at_end_of_input() {
    let src = b"abcdabcdab";
    let m = search_at(src, 4);
    assert_eq!(m, Match { distance: 4, length: 6, cost: 2 });
}
