//! Thin wrapper around `xxhash-rust` providing the XXH64 digest the benchmark
//! uses to check round-trip integrity.

/// One-shot XXH64.
///
/// `xxh64_oneshot(b"", 0)` == `0xEF46DB3751D8E999`.
#[inline]
pub fn xxh64_oneshot(data: &[u8], seed: u64) -> u64 {
    xxhash_rust::xxh64::xxh64(data, seed)
}
