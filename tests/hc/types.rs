// Unit tests for the 3-byte prefix hash and table sizing (hc/types.rs).
//
// Coverage:
//   - CRC16_TABLE: first entries and last entry of the 0xA001 table
//   - hash3: known bucket values, position independence, table range
//   - hashable: boundary at three remaining bytes
//   - sizing: chain table covers the full window plus one slot

use refpack::block::types::WINDOW_SIZE;
use refpack::hc::types::{
    hash3, hashable, CHAIN_TABLE_MASK, CHAIN_TABLE_SIZE, CRC16_TABLE, HASH_INPUT_LEN,
    HASH_TABLE_SIZE, NO_POSITION,
};

// ─────────────────────────────────────────────────────────────────────────────
// CRC16_TABLE
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn crc_table_known_entries() {
    assert_eq!(CRC16_TABLE[0], 0x0000);
    assert_eq!(CRC16_TABLE[1], 0xC0C1);
    assert_eq!(CRC16_TABLE[0x80], 0xA001);
    assert_eq!(CRC16_TABLE[255], 0x4040);
}

#[test]
fn crc_table_entries_are_distinct() {
    let mut seen = std::collections::HashSet::new();
    for v in CRC16_TABLE.iter() {
        assert!(seen.insert(*v), "duplicate table entry {v:#06x}");
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// hash3
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn hash3_known_values() {
    assert_eq!(hash3(b"ABC", 0), 17697);
    assert_eq!(hash3(b"abc", 0), 38712);
    assert_eq!(hash3(b"xyz", 0), 27170);
    assert_eq!(hash3(&[0, 0, 0], 0), 0);
}

#[test]
fn hash3_depends_only_on_three_bytes() {
    let data = b"--ABC--ABCxyz";
    assert_eq!(hash3(data, 2), hash3(b"ABC", 0));
    assert_eq!(hash3(data, 7), hash3(data, 2));
    assert_eq!(hash3(data, 10), hash3(b"xyz", 0));
}

#[test]
fn hash3_fits_hash_table() {
    let data: Vec<u8> = (0..=255u8).chain(0..=255u8).collect();
    for pos in 0..data.len() - 2 {
        assert!(hash3(&data, pos) < HASH_TABLE_SIZE);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// hashable / sizing
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn hashable_needs_three_bytes() {
    let data = [1u8, 2, 3, 4];
    assert!(hashable(&data, 0));
    assert!(hashable(&data, 1));
    assert!(!hashable(&data, 2));
    assert!(!hashable(&data, 4));
    assert!(!hashable(&data, 9));
    assert!(!hashable(&[], 0));
}

#[test]
fn chain_table_outsizes_window() {
    assert_eq!(HASH_INPUT_LEN, 3);
    assert_eq!(CHAIN_TABLE_SIZE, WINDOW_SIZE + 1);
    assert_eq!(CHAIN_TABLE_MASK, CHAIN_TABLE_SIZE - 1);
    assert!(CHAIN_TABLE_SIZE.is_power_of_two());
    assert!(NO_POSITION as usize > CHAIN_TABLE_SIZE);
}
