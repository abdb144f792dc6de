#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let packed = refpack::block::compress_to_vec(data).unwrap();
    assert!(packed.len() <= refpack::block::compress_bound(data.len()));

    let recovered = refpack::block::decompress_to_vec(&packed).unwrap();
    assert_eq!(
        recovered,
        data,
        "round-trip mismatch: {} bytes packed into {}",
        data.len(),
        packed.len()
    );
});
