//! Start-up state picked from the name the binary was invoked under.
//!
//! `refpackcat` and `unrefpack` are links to the same executable; [`Alias`]
//! classifies `argv[0]` and [`detect_alias`] turns that into the [`CliInit`]
//! the argument parser starts from.

use crate::cli::arg_utils::{exe_name_match, last_name_from_path};
use crate::cli::constants::{set_display_level, REFPACKCAT, UNREFPACK};
use crate::cli::op_mode::{init_bench_seconds, OpMode};
use crate::io::file_io::STDOUT_MARK;
use crate::io::prefs::Prefs;

/// Names the binary answers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alias {
    Refpack,
    /// Decompress every input to stdout, quietly.
    Refpackcat,
    /// Decompress.
    Unrefpack,
}

impl Alias {
    /// Classify `argv[0]`, which may be a full path with an `.exe` suffix.
    pub fn from_argv0(argv0: &str) -> Alias {
        let name = last_name_from_path(argv0);
        if exe_name_match(name, REFPACKCAT) {
            Alias::Refpackcat
        } else if exe_name_match(name, UNREFPACK) {
            Alias::Unrefpack
        } else {
            Alias::Refpack
        }
    }
}

/// Parser starting state.
#[derive(Debug, Clone)]
pub struct CliInit {
    pub alias: Alias,
    pub prefs: Prefs,
    pub op_mode: OpMode,
    /// Every positional argument is an input.
    pub multiple_inputs: bool,
    /// From `REFPACK_BENCH_SECONDS`, or the default.
    pub bench_seconds: u32,
    pub force_stdout: bool,
    pub output_filename: Option<String>,
}

/// Build the starting state for `argv0`.
///
/// `refpackcat` also lowers the global display level to 1 so only errors
/// reach the terminal while data streams to stdout.
pub fn detect_alias(argv0: &str) -> CliInit {
    let alias = Alias::from_argv0(argv0);
    let mut init = CliInit {
        alias,
        prefs: Prefs::default(),
        op_mode: OpMode::Auto,
        multiple_inputs: false,
        bench_seconds: init_bench_seconds(),
        force_stdout: false,
        output_filename: None,
    };
    // Interactive use asks before clobbering a file.
    init.prefs.set_overwrite(false);

    match alias {
        Alias::Refpack => {}
        Alias::Unrefpack => init.op_mode = OpMode::Decompress,
        Alias::Refpackcat => {
            init.op_mode = OpMode::Decompress;
            init.prefs.set_overwrite(true);
            init.multiple_inputs = true;
            init.force_stdout = true;
            init.output_filename = Some(STDOUT_MARK.to_owned());
            set_display_level(1);
        }
    }
    init
}
