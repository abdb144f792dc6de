#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Errors are expected; panics are not.
    if let Ok(out) = refpack::block::decompress(data) {
        assert_eq!(Some(out.len() as u32), refpack::block::read_uncompressed_size(data).ok());
    }
    let _ = refpack::block::CommandStats::scan(data);
    let _ = refpack::block::is_refpack(data);
});
