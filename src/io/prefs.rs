// prefs.rs — file-level preferences, the I/O notification level, and the
// end-of-run timing line.
//
// The codec itself is configuration-free; everything here governs how the
// file layer treats its inputs and outputs.

use std::sync::atomic::{AtomicI32, Ordering};

use crate::timefn::{clock_span_ns, DurationNs, TimeT};

// ---------------------------------------------------------------------------
// Display / notification global
// ---------------------------------------------------------------------------

/// Global notification level. 0 = silent, 1 = errors only, 2 = results +
/// warnings, 3 = progress, 4+ = verbose.
pub static DISPLAY_LEVEL: AtomicI32 = AtomicI32::new(0);

/// Write `msg` to stderr if the current notification level is ≥ `level`.
/// Flushes stderr when level ≥ 4.
#[inline]
pub fn display_level(level: i32, msg: &str) {
    if DISPLAY_LEVEL.load(Ordering::Relaxed) >= level {
        eprint!("{}", msg);
        if DISPLAY_LEVEL.load(Ordering::Relaxed) >= 4 {
            use std::io::Write;
            let _ = std::io::stderr().flush();
        }
    }
}

/// Set the global notification level; returns the new value.
pub fn set_notification_level(level: i32) -> i32 {
    DISPLAY_LEVEL.store(level, Ordering::Relaxed);
    level
}

// ---------------------------------------------------------------------------
// Timing display
// ---------------------------------------------------------------------------

/// Prints a "Done in … s ==> … MiB/s" line to stderr at notification level 3.
pub fn final_time_display(time_start: TimeT, size: u64) {
    let duration_ns: DurationNs = clock_span_ns(time_start).max(1);
    let seconds = duration_ns as f64 / 1_000_000_000.0_f64;
    let msg = format!(
        "Done in {:.2} s ==> {:.2} MiB/s \n",
        seconds,
        (size as f64) / seconds / 1024.0 / 1024.0,
    );
    display_level(3, &msg);
}

// ---------------------------------------------------------------------------
// Preferences
// ---------------------------------------------------------------------------

/// Tunable parameters for file compression and decompression.
#[derive(Clone, Debug)]
pub struct Prefs {
    /// Overwrite existing destination files without prompting. Default: true.
    pub overwrite: bool,
    /// Test mode: decode and verify, discard output. Default: false.
    pub test_mode: bool,
    /// Remove the source file after a successful run. Default: false.
    pub remove_src_file: bool,
    /// Copy mtime, ownership and permission bits from source to destination.
    /// Default: true.
    pub copy_file_status: bool,
}

impl Default for Prefs {
    fn default() -> Self {
        Prefs {
            overwrite: true,
            test_mode: false,
            remove_src_file: false,
            copy_file_status: true,
        }
    }
}

impl Prefs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_overwrite(&mut self, yes: bool) -> bool {
        self.overwrite = yes;
        yes
    }

    pub fn set_test_mode(&mut self, yes: bool) -> bool {
        self.test_mode = yes;
        yes
    }

    pub fn set_remove_src_file(&mut self, flag: bool) {
        self.remove_src_file = flag;
    }

    pub fn set_copy_file_status(&mut self, flag: bool) {
        self.copy_file_status = flag;
    }
}
