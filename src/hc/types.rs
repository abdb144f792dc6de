//! Hash-chain sizing and the 3-byte prefix hash.
//!
//! The hash is a CRC-16 (reflected polynomial `0xA001`) run over the three
//! bytes at a position.  Its 256-entry table is generated at compile time.
//! Any 3-byte hash would decode identically; this one reproduces the bucket
//! layout, and therefore the exact output, of the reference encoder.

// ─────────────────────────────────────────────────────────────────────────────
// Table sizing
// ─────────────────────────────────────────────────────────────────────────────

/// Bytes covered by one hash.
pub const HASH_INPUT_LEN: usize = 3;

/// Number of hash buckets (the CRC is 16 bits wide).
pub const HASH_TABLE_SIZE: usize = 1 << 16;

/// Chain table length; positions share a slot modulo this size.
pub const CHAIN_TABLE_SIZE: usize = 1 << 17; // 131072
pub const CHAIN_TABLE_MASK: usize = CHAIN_TABLE_SIZE - 1;

/// Marks an empty bucket or the end of a chain.
pub const NO_POSITION: u32 = u32::MAX;

// ─────────────────────────────────────────────────────────────────────────────
// CRC-16 table
// ─────────────────────────────────────────────────────────────────────────────

const CRC16_POLY: u16 = 0xA001;

const fn build_crc16_table() -> [u16; 256] {
    let mut table = [0u16; 256];
    let mut i = 0;
    while i < 256 {
        let mut crc = i as u16;
        let mut bit = 0;
        while bit < 8 {
            crc = if crc & 1 != 0 { (crc >> 1) ^ CRC16_POLY } else { crc >> 1 };
            bit += 1;
        }
        table[i] = crc;
        i += 1;
    }
    table
}

/// CRC-16/ARC lookup table.
pub static CRC16_TABLE: [u16; 256] = build_crc16_table();

/// Hash the three bytes `src[pos..pos + 3]` into a bucket index.
///
/// The caller guarantees `pos + 3 <= src.len()`.
#[inline(always)]
pub fn hash3(src: &[u8], pos: usize) -> usize {
    let t = &CRC16_TABLE;
    let mut crc = t[src[pos] as usize];
    crc = t[((crc ^ src[pos + 1] as u16) & 0xFF) as usize] ^ (crc >> 8);
    crc = t[((crc ^ src[pos + 2] as u16) & 0xFF) as usize] ^ (crc >> 8);
    crc as usize
}

/// `true` when at least [`HASH_INPUT_LEN`] bytes remain at `pos`.
#[inline(always)]
pub fn hashable(src: &[u8], pos: usize) -> bool {
    src.len().saturating_sub(pos) >= HASH_INPUT_LEN
}
