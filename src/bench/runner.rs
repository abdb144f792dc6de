//! Benchmark runner: memory estimation, file loading, and dispatch into
//! [`bench_mem`].
//!
//! 1. [`find_max_mem`] picks the largest input buffer the run may allocate.
//! 2. [`load_files`] reads the inputs into one contiguous buffer.
//! 3. [`bench_buffer`] / [`bench_file_table`] hand the buffer to [`bench_mem`].

use std::fs;
use std::io::{self, Read};

use super::bench_mem::{bench_mem, BenchResult};
use super::config::{BenchConfig, MAX_MEMORY};

use crate::block::MAX_INPUT_SIZE;
use crate::util::get_total_file_size;

// ── Memory probe ──────────────────────────────────────────────────────────────

/// Estimate the maximum usable buffer size for the benchmark.
///
/// Rounds `required_mem` up to the next 64 MiB boundary, adds two 64 MiB
/// steps, caps at [`MAX_MEMORY`], then takes two steps back off for the
/// encoder's window tables and the decoder's output.
fn find_max_mem(required_mem: u64) -> usize {
    const STEP: u64 = 64 * 1024 * 1024;

    let mut mem = ((required_mem >> 26) + 1) << 26;
    mem = mem.saturating_add(2 * STEP).min(MAX_MEMORY as u64);

    for _ in 0..2 {
        if mem > STEP {
            mem -= STEP;
        } else {
            mem >>= 1;
        }
    }

    mem as usize
}

// ── In-memory benchmark ───────────────────────────────────────────────────────

/// Benchmark `src`, labelled with the basename of `display_name`.
///
/// With the `realtime-priority` feature the process first asks for the
/// highest scheduling priority to cut jitter.
pub fn bench_buffer(
    src: &[u8],
    display_name: &str,
    config: &BenchConfig,
    file_sizes: &[usize],
) -> io::Result<BenchResult> {
    let display_name = display_name
        .rfind(['\\', '/'])
        .map(|pos| &display_name[pos + 1..])
        .unwrap_or(display_name);

    #[cfg(feature = "realtime-priority")]
    {
        // SAFETY: setpriority(2) only changes the calling process's priority.
        unsafe {
            libc::setpriority(libc::PRIO_PROCESS, 0, -20);
        }
    }

    if config.display_level == 1 {
        eprintln!(
            "bench {}: input {} bytes, {} seconds",
            crate::REFPACK_VERSION_STRING,
            src.len(),
            config.nb_seconds,
        );
    }

    bench_mem(src, display_name, config, file_sizes)
}

// ── File loading ──────────────────────────────────────────────────────────────

/// Load `paths` into one buffer of at most `buffer_size` bytes.
///
/// Directories are skipped. When the buffer fills, the current file is
/// truncated and the remaining paths are not read.
///
/// Returns `(buffer, file_sizes)` where `file_sizes[i]` is the number of bytes
/// loaded for `paths[i]`.
///
/// # Errors
///
/// Fails if a file cannot be opened or read, or nothing was loaded.
pub fn load_files(
    paths: &[&str],
    buffer_size: usize,
    config: &BenchConfig,
) -> io::Result<(Vec<u8>, Vec<usize>)> {
    let mut buffer = Vec::with_capacity(buffer_size.min(MAX_MEMORY));
    let mut file_sizes = vec![0usize; paths.len()];

    for (n, path) in paths.iter().enumerate() {
        let meta = fs::metadata(path)
            .map_err(|e| io::Error::new(e.kind(), format!("cannot stat {}: {}", path, e)))?;
        if meta.is_dir() {
            if config.display_level >= 2 {
                eprintln!("Ignoring {} directory...       ", path);
            }
            continue;
        }

        if config.display_level >= 2 {
            eprint!("Loading {}...       \r", path);
        }

        let room = buffer_size - buffer.len();
        let to_read = (meta.len() as usize).min(room);

        let f = fs::File::open(path).map_err(|e| {
            io::Error::new(e.kind(), format!("impossible to open file {}: {}", path, e))
        })?;
        let read = f
            .take(to_read as u64)
            .read_to_end(&mut buffer)
            .map_err(|e| io::Error::new(e.kind(), format!("could not read {}: {}", path, e)))?;
        file_sizes[n] = read;

        if buffer.len() >= buffer_size {
            break;
        }
    }

    if buffer.is_empty() {
        return Err(io::Error::new(io::ErrorKind::InvalidInput, "no data to bench"));
    }

    Ok((buffer, file_sizes))
}

// ── File table benchmark ──────────────────────────────────────────────────────

/// Load `file_names` together and benchmark them as one dataset, one packed
/// stream per file.
pub fn bench_file_table(file_names: &[&str], config: &BenchConfig) -> io::Result<BenchResult> {
    let total_size_to_load = get_total_file_size(file_names);

    // Source, packed copy and regenerated copy all live at once.
    let mut benched_size = find_max_mem(total_size_to_load.saturating_mul(3)) / 3;
    if benched_size == 0 {
        return Err(io::Error::other("not enough memory"));
    }
    if benched_size as u64 > total_size_to_load {
        benched_size = total_size_to_load as usize;
    }
    if benched_size > MAX_INPUT_SIZE {
        benched_size = MAX_INPUT_SIZE;
        eprintln!(
            "File(s) bigger than RefPack's max input size; testing {} MB only...",
            benched_size >> 20
        );
    } else if (benched_size as u64) < total_size_to_load {
        eprintln!("Not enough memory; testing {} MB only...", benched_size >> 20);
    }

    let (src_buffer, file_sizes) = load_files(file_names, benched_size, config)?;

    let display_name = if file_names.len() > 1 {
        format!(" {} files", file_names.len())
    } else {
        file_names[0].to_string()
    };

    bench_buffer(&src_buffer, &display_name, config, &file_sizes)
}
