//! C-ABI shims over caller-provided buffers.
//!
//! Enabled with:
//!   cargo build --release --features c-abi
//!
//! The produced `target/release/librefpack.a` exports the four symbols below.

use std::os::raw::c_uchar;
use std::slice;

use crate::block::compress::compress;
use crate::block::decompress::decompress;
use crate::block::header::read_uncompressed_size;
use crate::block::types::compress_bound;

// ─────────────────────────────────────────────────────────────────────────────
// size_t refpack_compress_bound(size_t srcSize);
//
// Worst-case packed size for `srcSize` input bytes.
// ─────────────────────────────────────────────────────────────────────────────
#[no_mangle]
pub extern "C" fn refpack_compress_bound(src_size: usize) -> usize {
    compress_bound(src_size)
}

// ─────────────────────────────────────────────────────────────────────────────
// size_t refpack_compress(const unsigned char *src, size_t srcSize,
//                         unsigned char *dst, size_t dstCapacity);
//
// Returns number of bytes written to dst, or 0 on failure.
// ─────────────────────────────────────────────────────────────────────────────
/// # Safety
/// `src` must be valid for `src_size` reads and `dst` for `dst_capacity` writes.
#[no_mangle]
pub unsafe extern "C" fn refpack_compress(
    src: *const c_uchar,
    src_size: usize,
    dst: *mut c_uchar,
    dst_capacity: usize,
) -> usize {
    if dst.is_null() || (src.is_null() && src_size != 0) {
        return 0;
    }
    let src_slice: &[u8] = if src_size == 0 { &[] } else { slice::from_raw_parts(src, src_size) };
    let dst_slice = slice::from_raw_parts_mut(dst, dst_capacity);
    match compress(src_slice) {
        Ok(packed) if packed.len() <= dst_slice.len() => {
            dst_slice[..packed.len()].copy_from_slice(&packed);
            packed.len()
        }
        _ => 0,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// long long refpack_decompressed_size(const unsigned char *src, size_t srcSize);
//
// Returns the size declared by the header, or -1 if no header is present.
// ─────────────────────────────────────────────────────────────────────────────
/// # Safety
/// `src` must be valid for `src_size` reads.
#[no_mangle]
pub unsafe extern "C" fn refpack_decompressed_size(src: *const c_uchar, src_size: usize) -> i64 {
    if src.is_null() {
        return -1;
    }
    let src_slice = slice::from_raw_parts(src, src_size);
    match read_uncompressed_size(src_slice) {
        Ok(n) => n as i64,
        Err(_) => -1,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// long long refpack_decompress(const unsigned char *src, size_t srcSize,
//                              unsigned char *dst, size_t dstCapacity);
//
// Returns number of bytes written to dst, or -1 on error.
// ─────────────────────────────────────────────────────────────────────────────
/// # Safety
/// `src` must be valid for `src_size` reads and `dst` for `dst_capacity` writes.
#[no_mangle]
pub unsafe extern "C" fn refpack_decompress(
    src: *const c_uchar,
    src_size: usize,
    dst: *mut c_uchar,
    dst_capacity: usize,
) -> i64 {
    if src.is_null() || (dst.is_null() && dst_capacity != 0) {
        return -1;
    }
    let src_slice = slice::from_raw_parts(src, src_size);
    // Reject before decoding when the declared size cannot fit.
    match read_uncompressed_size(src_slice) {
        Ok(n) if n as usize <= dst_capacity => {}
        _ => return -1,
    }
    match decompress(src_slice) {
        Ok(raw) => {
            if !raw.is_empty() {
                let dst_slice = slice::from_raw_parts_mut(dst, dst_capacity);
                dst_slice[..raw.len()].copy_from_slice(&raw);
            }
            raw.len() as i64
        }
        Err(_) => -1,
    }
}
