// e2e/error_handling.rs — malformed and hostile input
//
// The decoder must reject damaged streams with an error, never a panic, and
// must never return more (or fewer) bytes than the header declares.  Covers
// every truncation point of real streams, single-bit corruption across the
// command region, and unstructured noise.

use refpack::block::{
    compress_to_vec, decompress, decompress_to_vec, CommandStats, RefPackError, HEADER_SIZE,
};
use refpack::lorem::gen_buffer;

fn sample_streams() -> Vec<(Vec<u8>, Vec<u8>)> {
    let inputs = vec![
        b"hello hello hello".to_vec(),
        vec![0u8; 3000],
        gen_buffer(2500, 4),
        (0..600u32).map(|i| (i * 7 % 256) as u8).collect(),
    ];
    inputs
        .into_iter()
        .map(|raw| {
            let packed = compress_to_vec(&raw).unwrap();
            (raw, packed)
        })
        .collect()
}

/// Declared uncompressed size of a stream.
fn declared(packed: &[u8]) -> usize {
    u32::from_le_bytes([packed[0], packed[1], packed[2], packed[3]]) as usize
}

// ── 1. Truncation ────────────────────────────────────────────────────────────

#[test]
fn every_proper_prefix_is_rejected() {
    for (_, packed) in sample_streams() {
        for cut in 0..packed.len() {
            let err = decompress(&packed[..cut]).unwrap_err();
            if cut < HEADER_SIZE {
                assert_eq!(err, RefPackError::TruncatedHeader, "cut at {cut}");
            } else {
                assert!(
                    matches!(err, RefPackError::Truncated | RefPackError::MissingEof),
                    "cut at {cut}: {err:?}"
                );
            }
        }
    }
}

#[test]
fn command_scan_rejects_prefixes() {
    let (_, packed) = sample_streams().swap_remove(2);
    for cut in HEADER_SIZE..packed.len() {
        assert!(CommandStats::scan(&packed[..cut]).is_err(), "cut at {cut}");
    }
    assert!(CommandStats::scan(&packed).is_ok());
}

// ── 2. Bit flips ─────────────────────────────────────────────────────────────

#[test]
fn single_bit_flips_never_panic() {
    for (raw, packed) in sample_streams() {
        // The size field is left alone so no case asks for a huge allocation.
        for byte in 4..packed.len() {
            for bit in 0..8 {
                let mut damaged = packed.clone();
                damaged[byte] ^= 1 << bit;
                match decompress_to_vec(&damaged) {
                    Ok(out) => assert_eq!(out.len(), raw.len()),
                    Err(e) => assert!(!matches!(
                        e,
                        RefPackError::TruncatedHeader | RefPackError::AllocationFailed
                    )),
                }
            }
        }
    }
}

#[test]
fn wrong_declared_size_is_rejected() {
    for (raw, packed) in sample_streams() {
        for delta in [-2i64, -1, 1, 2] {
            let size = raw.len() as i64 + delta;
            if size < 0 {
                continue;
            }
            let mut damaged = packed.clone();
            damaged[..4].copy_from_slice(&(size as u32).to_le_bytes());
            match decompress(&damaged).unwrap_err() {
                RefPackError::SizeMismatch { declared, .. } => assert_eq!(declared as i64, size),
                other => panic!("size {size}: unexpected {other:?}"),
            }
        }
    }
}

// ── 3. Noise ─────────────────────────────────────────────────────────────────

#[test]
fn random_streams_never_panic() {
    let mut x: u64 = 0x2545_F491_4F6C_DD1D;
    let mut next = move || {
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        x
    };
    let mut accepted = 0;
    for round in 0..2000 {
        let len = HEADER_SIZE + (next() % 64) as usize;
        let mut stream: Vec<u8> = (0..len).map(|_| next() as u8).collect();
        // Keep the declared size below 64 KiB.
        stream[2] = 0;
        stream[3] = 0;
        if let Ok(out) = decompress_to_vec(&stream) {
            assert_eq!(out.len(), declared(&stream), "round {round}");
            accepted += 1;
        }
        let _ = CommandStats::scan(&stream);
    }
    // Almost no random stream is a valid one.
    assert!(accepted < 100);
}

#[test]
fn stream_of_only_references_is_rejected() {
    // Short reference with distance 1 before any output.
    let mut stream = vec![4, 0, 0, 0, 0x10, 0xFB, 0, 0, 12];
    stream.extend_from_slice(&[0x04, 0x00, 0xFC]);
    assert_eq!(
        decompress(&stream).unwrap_err(),
        RefPackError::BadReference { distance: 1, available: 0 }
    );
}

#[test]
fn corrupt_data_maps_to_invalid_data() {
    let mut packed = compress_to_vec(b"hello hello hello").unwrap();
    packed.truncate(packed.len() - 1);
    let err: std::io::Error = decompress(&packed).unwrap_err().into();
    assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
}
