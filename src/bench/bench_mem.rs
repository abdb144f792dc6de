//! Core benchmark timing loop.
//!
//! The source buffer is split into one block per input file (a RefPack
//! stream always covers a whole buffer). Each pass compresses every block,
//! then decompresses every block, and the loop counts adapt so that one pass
//! takes about a second. After the last pass the regenerated bytes are
//! checked against the source with XXH64.

use std::io;
use std::time::Duration;

use super::config::{BenchConfig, ACTIVEPERIOD_NANOSEC, COOLPERIOD_SEC, MB, TIMELOOP_NANOSEC};

use crate::block::{compress, decompress};
use crate::timefn::{clock_span_ns, get_time, mb_per_sec, wait_for_next_tick};
use crate::xxhash::xxh64_oneshot;

/// One independently packed slice of the source.
struct BlockParam {
    src_offset: usize,
    src_size: usize,
    /// Packed bytes from the latest compression pass (or the input itself in
    /// decode-only mode).
    packed: Vec<u8>,
    /// Output of the latest decompression pass.
    regenerated: Vec<u8>,
}

/// Result of one [`bench_mem`] run.
#[derive(Debug, Clone)]
pub struct BenchResult {
    /// Bytes of raw data per pass.
    pub src_size: usize,
    /// Bytes of packed data per pass.
    pub compressed_size: usize,
    /// `src_size / compressed_size`.
    pub ratio: f64,
    /// Fastest compression pass, in MB/s (0 in decode-only mode).
    pub compress_speed_mb_s: f64,
    /// Fastest decompression pass, in MB/s.
    pub decompress_speed_mb_s: f64,
}

fn build_block_table(src: &[u8], file_sizes: &[usize], decode_only: bool) -> Vec<BlockParam> {
    let single = [src.len()];
    let sizes: &[usize] = if file_sizes.is_empty() { &single } else { file_sizes };

    let mut table = Vec::with_capacity(sizes.len());
    let mut src_offset = 0usize;
    for &size in sizes {
        let slice = &src[src_offset..src_offset + size];
        table.push(BlockParam {
            src_offset,
            src_size: size,
            packed: if decode_only { slice.to_vec() } else { Vec::new() },
            regenerated: Vec::new(),
        });
        src_offset += size;
    }
    table
}

fn fastest_per_pass(fastest: &mut u64, duration_ns: u64, nb_loops: &mut u32) {
    if duration_ns > 0 {
        *fastest = (*fastest).min(duration_ns / u64::from(*nb_loops));
        *nb_loops = (TIMELOOP_NANOSEC / (*fastest).max(1)) as u32 + 1;
    } else {
        *nb_loops = nb_loops.saturating_mul(100);
    }
}

/// Benchmark compression and decompression of `src`.
///
/// `file_sizes` gives the per-file byte counts within `src`; an empty slice
/// treats `src` as one file.
///
/// # Errors
///
/// Fails when a block cannot be packed or unpacked, or when the regenerated
/// data does not match the source.
pub fn bench_mem(
    src: &[u8],
    display_name: &str,
    config: &BenchConfig,
    file_sizes: &[usize],
) -> io::Result<BenchResult> {
    let mut block_table = build_block_table(src, file_sizes, config.decode_only);

    let display_name: &str = match display_name.char_indices().rev().nth(16) {
        Some((pos, _)) => &display_name[pos..],
        None => display_name,
    };

    const MARKS: [&str; 4] = [" |", " /", " =", "\\"];
    let mut mark_nb = 0usize;

    let max_time_ns = u64::from(config.nb_seconds) * TIMELOOP_NANOSEC + 100;
    let (mut nb_compression_loops, mut nb_decode_loops) = if config.nb_seconds == 0 {
        (1u32, 1u32)
    } else {
        (
            ((5 * MB) / (src.len() + 1)) as u32 + 1,
            ((200 * MB) / (src.len() + 1)) as u32 + 1,
        )
    };

    let mut fastest_c_ns = u64::MAX;
    let mut fastest_d_ns = u64::MAX;
    let mut total_c_time_ns = 0u64;
    let mut total_d_time_ns = 0u64;
    let mut c_completed = config.decode_only;
    let mut d_completed = false;
    let mut cool_time = get_time();

    let mut raw_size = src.len();
    let mut packed_size = src.len();

    if config.display_level >= 2 {
        eprint!("\r{:79}\r", "");
    }

    while !c_completed || !d_completed {
        if clock_span_ns(cool_time) > ACTIVEPERIOD_NANOSEC {
            if config.display_level >= 2 {
                eprint!("\rcooling down ...    \r");
            }
            std::thread::sleep(Duration::from_secs(COOLPERIOD_SEC));
            cool_time = get_time();
        }

        // ── compression ──────────────────────────────────────────────────────
        if !c_completed {
            if config.display_level >= 2 {
                eprint!("{}-{:<17.17} :{:>10} ->\r", MARKS[mark_nb], display_name, raw_size);
            }
            std::thread::sleep(Duration::from_millis(1));
            wait_for_next_tick();

            let time_start = get_time();
            for _ in 0..nb_compression_loops {
                for block in &mut block_table {
                    let slice = &src[block.src_offset..block.src_offset + block.src_size];
                    block.packed = compress(slice)
                        .map_err(|e| {
                            io::Error::new(
                                io::ErrorKind::Other,
                                format!("compression failed on block at offset {}: {}", block.src_offset, e),
                            )
                        })?
                        .into_vec();
                }
            }
            let duration_ns = clock_span_ns(time_start);
            fastest_per_pass(&mut fastest_c_ns, duration_ns, &mut nb_compression_loops);
            total_c_time_ns += duration_ns;
            c_completed = total_c_time_ns > max_time_ns;

            packed_size = block_table.iter().map(|b| b.packed.len()).sum::<usize>().max(1);
            mark_nb = (mark_nb + 1) % MARKS.len();
            if config.display_level >= 2 {
                eprint!(
                    "{}-{:<17.17} :{:>10} ->{:>10} ({:5.3}),{:6.1} MB/s\r",
                    MARKS[mark_nb],
                    display_name,
                    raw_size,
                    packed_size,
                    raw_size as f64 / packed_size as f64,
                    mb_per_sec(raw_size, fastest_c_ns),
                );
            }
        }

        // ── decompression ────────────────────────────────────────────────────
        if !d_completed {
            std::thread::sleep(Duration::from_millis(5));
            wait_for_next_tick();

            let time_start = get_time();
            for _ in 0..nb_decode_loops {
                for block in &mut block_table {
                    block.regenerated = decompress(&block.packed)
                        .map_err(|e| {
                            io::Error::new(
                                io::ErrorKind::InvalidData,
                                format!(
                                    "decompression failed on block at offset {} of size {}: {}",
                                    block.src_offset, block.src_size, e
                                ),
                            )
                        })?
                        .into_vec();
                }
            }
            let duration_ns = clock_span_ns(time_start);
            fastest_per_pass(&mut fastest_d_ns, duration_ns, &mut nb_decode_loops);
            total_d_time_ns += duration_ns;
            d_completed = total_d_time_ns > max_time_ns;
        }

        if config.decode_only {
            raw_size = block_table.iter().map(|b| b.regenerated.len()).sum();
        }

        mark_nb = (mark_nb + 1) % MARKS.len();
        if config.display_level >= 2 {
            eprint!(
                "{}-{:<17.17} :{:>10} ->{:>10} ({:5.3}),{:6.1} MB/s ,{:6.1} MB/s\r",
                MARKS[mark_nb],
                display_name,
                raw_size,
                packed_size,
                raw_size as f64 / packed_size as f64,
                mb_per_sec(raw_size, fastest_c_ns),
                mb_per_sec(raw_size, fastest_d_ns),
            );
        }
    }

    // ── integrity check ──────────────────────────────────────────────────────
    if !config.decode_only {
        let regenerated: Vec<u8> = block_table
            .iter()
            .flat_map(|b| b.regenerated.iter().copied())
            .collect();
        let crc_orig = xxh64_oneshot(src, 0);
        let crc_check = xxh64_oneshot(&regenerated, 0);
        if crc_orig != crc_check {
            let first_diff = src
                .iter()
                .zip(regenerated.iter())
                .position(|(a, b)| a != b)
                .unwrap_or_else(|| src.len().min(regenerated.len()));
            eprintln!(
                "\n!!! WARNING !!! {:>17} : Invalid Checksum : {:x} != {:x}",
                display_name, crc_orig, crc_check
            );
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Decoding error at pos {}", first_diff),
            ));
        }
    }

    let result = BenchResult {
        src_size: raw_size,
        compressed_size: packed_size,
        ratio: raw_size as f64 / packed_size as f64,
        compress_speed_mb_s: if config.decode_only { 0.0 } else { mb_per_sec(raw_size, fastest_c_ns) },
        decompress_speed_mb_s: mb_per_sec(raw_size, fastest_d_ns),
    };

    if config.display_level >= 2 {
        eprintln!(
            "{:>2}-{:<17.17} :{:>10} ->{:>10} ({:5.3}),{:6.1} MB/s ,{:6.1} MB/s ",
            "",
            display_name,
            result.src_size,
            result.compressed_size,
            result.ratio,
            result.compress_speed_mb_s,
            result.decompress_speed_mb_s,
        );
    } else if config.display_level == 1 {
        eprintln!(
            "{:6.1} MB/s ,{:6.1} MB/s  {}",
            result.compress_speed_mb_s, result.decompress_speed_mb_s, display_name
        );
    }

    Ok(result)
}
