//! Command-line argument parsing for the `refpack` / `unrefpack` /
//! `refpackcat` family.
//!
//! The entry points are [`parse_args`] (reads `std::env::args()`) and
//! [`parse_args_from`] (takes an explicit slice, suitable for unit-testing).
//! Both return a [`ParsedArgs`] value that captures every option and filename
//! discovered during the parse.
//!
//! Short options may be aggregated (e.g. `-dfv`). A bare `--` marks the end of
//! options; all subsequent arguments are treated as file paths regardless of
//! whether they start with `-`.
//!
//! Bad or unrecognised options return an `Err` whose message begins with
//! `"bad usage: "`.

use anyhow::anyhow;

use crate::bench::BenchConfig;
use crate::cli::arg_utils::{long_command_w_arg, read_u32_from_str};
use crate::cli::constants::{display_level, set_display_level};
use crate::cli::help::{print_long_help, print_usage_advanced, welcome_message};
use crate::cli::init::CliInit;
use crate::cli::op_mode::OpMode;
use crate::displaylevel;
use crate::io::file_io::{NULL_OUTPUT, NUL_MARK, STDIN_MARK, STDOUT_MARK};
use crate::io::prefs::Prefs;

// ── Public output type ─────────────────────────────────────────────────────────

/// Complete set of options and filenames produced by the argument loop.
#[derive(Debug)]
pub struct ParsedArgs {
    pub prefs: Prefs,
    pub op_mode: OpMode,
    /// Write to stdout even if it is a terminal (`-c`).
    pub force_stdout: bool,
    /// Overwrite existing destination files without prompting (`-f`).
    pub force_overwrite: bool,
    /// Wait for Enter before returning (`-p`).
    pub main_pause: bool,
    /// Treat every non-option argument as an input file.
    pub multiple_inputs: bool,
    /// Single input filename (non-multiple-input mode).
    pub input_filename: Option<String>,
    /// Single output filename (non-multiple-input mode).
    pub output_filename: Option<String>,
    /// Input filenames collected in multiple-input mode.
    pub in_file_names: Vec<String>,
    /// Traverse directories recursively (`-r`, requires the `recursive` feature).
    #[cfg(feature = "recursive")]
    pub recursive: bool,
    pub bench_config: BenchConfig,
    /// A `--version` / `--help` flag was processed; the caller should exit 0
    /// without doing any I/O.
    pub exit_early: bool,
    /// argv[0], used by the help printers.
    pub exe_name: String,
}

// ── Public API ─────────────────────────────────────────────────────────────────

/// Parse `std::env::args()` (skipping argv[0]) using `init` as the starting state.
pub fn parse_args(init: CliInit) -> anyhow::Result<ParsedArgs> {
    let exe_name = std::env::args().next().unwrap_or_default();
    let argv: Vec<String> = std::env::args().skip(1).collect();
    parse_args_from(init, &exe_name, &argv)
}

/// Parse an explicit argument list using `init` as the starting state.
///
/// `exe_name` is argv[0] (used for help text). `argv` is argv[1..].
pub fn parse_args_from(
    init: CliInit,
    exe_name: &str,
    argv: &[String],
) -> anyhow::Result<ParsedArgs> {
    let CliInit {
        alias: _,
        mut prefs,
        op_mode: init_op_mode,
        multiple_inputs: init_multiple_inputs,
        bench_seconds,
        force_stdout: init_force_stdout,
        output_filename: init_output_filename,
    } = init;

    let mut op_mode = init_op_mode;
    let mut force_stdout = init_force_stdout;
    let mut force_overwrite = false;
    let mut main_pause = false;
    let mut multiple_inputs = init_multiple_inputs;
    let mut all_arguments_are_files = false;
    let mut input_filename: Option<String> = None;
    let mut output_filename: Option<String> = init_output_filename;
    let mut in_file_names: Vec<String> = Vec::new();
    #[cfg(feature = "recursive")]
    let mut recursive = false;
    let mut bench_config = BenchConfig::default();
    bench_config.set_nb_seconds(bench_seconds);
    let mut exit_early = false;

    // ── Main argument loop ──────────────────────────────────────────────────

    let mut arg_idx = 0usize;
    while arg_idx < argv.len() {
        let argument = &argv[arg_idx];

        if argument.is_empty() {
            arg_idx += 1;
            continue;
        }

        let bytes = argument.as_bytes();

        // ── Non-option path (or end-of-options forced by `--`) ────────────────
        if all_arguments_are_files || bytes[0] != b'-' {
            if multiple_inputs {
                in_file_names.push(argument.clone());
            } else if input_filename.is_none() {
                input_filename = Some(argument.clone());
            } else if output_filename.is_none() {
                let s = if argument == NULL_OUTPUT {
                    NUL_MARK.to_owned()
                } else {
                    argument.clone()
                };
                output_filename = Some(s);
            } else if force_overwrite {
                displaylevel!(
                    1,
                    "Warning: {} won't be used ! Do you want multiple input files (-m) ? \n",
                    argument
                );
            } else {
                return Err(anyhow!(
                    "Error: {} won't be used ! Do you want multiple input files (-m) ?",
                    argument
                ));
            }
            arg_idx += 1;
            continue;
        }

        // ── `-` alone: stdin as input, stdout as output ──────────────────────
        if bytes.len() == 1 {
            if input_filename.is_none() {
                input_filename = Some(STDIN_MARK.to_owned());
            } else {
                output_filename = Some(STDOUT_MARK.to_owned());
            }
            arg_idx += 1;
            continue;
        }

        // ── Long options (`--...`) ────────────────────────────────────────────
        if bytes[1] == b'-' {
            if argument == "--" {
                all_arguments_are_files = true;
                arg_idx += 1;
                continue;
            }

            if argument == "--compress" {
                op_mode = OpMode::Compress;
            } else if argument == "--decompress" || argument == "--uncompress" {
                if op_mode != OpMode::Bench {
                    op_mode = OpMode::Decompress;
                }
                bench_config.set_decode_only(true);
            } else if argument == "--multiple" {
                multiple_inputs = true;
            } else if argument == "--test" {
                op_mode = OpMode::Test;
            } else if argument == "--force" {
                force_overwrite = true;
                prefs.set_overwrite(true);
            } else if argument == "--no-force" {
                prefs.set_overwrite(false);
            } else if argument == "--stdout" || argument == "--to-stdout" {
                force_stdout = true;
                output_filename = Some(STDOUT_MARK.to_owned());
            } else if argument == "--list" {
                op_mode = OpMode::List;
                multiple_inputs = true;
            } else if argument == "--keep-status" {
                prefs.set_copy_file_status(true);
            } else if argument == "--no-keep-status" {
                prefs.set_copy_file_status(false);
            } else if argument == "--verbose" {
                set_display_level(display_level().saturating_add(1));
            } else if argument == "--quiet" {
                set_display_level(display_level().saturating_sub(1));
            } else if argument == "--version" {
                print_welcome_message();
                exit_early = true;
                break;
            } else if argument == "--help" {
                print_usage_advanced(exe_name);
                exit_early = true;
                break;
            } else if argument == "--long-help" {
                print_long_help(exe_name);
                exit_early = true;
                break;
            } else if argument == "--keep" {
                prefs.set_remove_src_file(false);
            } else if argument == "--rm" {
                prefs.set_remove_src_file(true);
            } else if let Some(rest) = long_command_w_arg(argument, "--bench-seconds") {
                let seconds = parse_next_uint32(rest, argv, &mut arg_idx)?;
                bench_config.set_nb_seconds(seconds);
            } else {
                return Err(anyhow!("bad usage: unknown option: {}", argument));
            }

            arg_idx += 1;
            continue;
        }

        // ── Short options (possibly aggregated, e.g. `-dfv`) ─────────────────

        let mut char_pos: usize = 1;
        while char_pos < bytes.len() {
            match bytes[char_pos] {
                b'V' => {
                    print_welcome_message();
                    exit_early = true;
                }
                b'h' => {
                    print_usage_advanced(exe_name);
                    exit_early = true;
                }
                b'H' => {
                    print_long_help(exe_name);
                    exit_early = true;
                }
                b'z' => {
                    op_mode = OpMode::Compress;
                }
                b'd' => {
                    // Also selects decode-only benchmarking when combined with -b.
                    if op_mode != OpMode::Bench {
                        op_mode = OpMode::Decompress;
                    }
                    bench_config.set_decode_only(true);
                }
                b'c' => {
                    force_stdout = true;
                    output_filename = Some(STDOUT_MARK.to_owned());
                }
                b't' => {
                    op_mode = OpMode::Test;
                }
                b'f' => {
                    force_overwrite = true;
                    prefs.set_overwrite(true);
                }
                b'v' => {
                    set_display_level(display_level().saturating_add(1));
                }
                b'q' => {
                    set_display_level(display_level().saturating_sub(1));
                }
                b'k' => {
                    prefs.set_remove_src_file(false);
                }
                b'b' => {
                    op_mode = OpMode::Bench;
                    multiple_inputs = true;
                }
                b'S' => {
                    bench_config.set_bench_separately(true);
                }
                b'r' => {
                    #[cfg(feature = "recursive")]
                    {
                        recursive = true;
                    }
                    multiple_inputs = true;
                }
                b'm' => {
                    multiple_inputs = true;
                }
                b'i' => {
                    // `-i#`: benchmark duration in seconds.
                    let next = char_pos + 1;
                    match read_u32_from_str(&argument[next..]) {
                        Some((seconds, remainder)) => {
                            bench_config.set_nb_seconds(seconds);
                            let consumed = argument[next..].len() - remainder.len();
                            char_pos = next + consumed - 1;
                        }
                        None => return Err(anyhow!("bad usage: -i requires a numeric argument")),
                    }
                }
                b'p' => {
                    main_pause = true;
                }
                c => {
                    return Err(anyhow!("bad usage: unrecognised option: -{}", c as char));
                }
            }

            if exit_early {
                break;
            }
            char_pos += 1;
        }

        if exit_early {
            break;
        }

        arg_idx += 1;
    }

    Ok(ParsedArgs {
        prefs,
        op_mode,
        force_stdout,
        force_overwrite,
        main_pause,
        multiple_inputs,
        input_filename,
        output_filename,
        in_file_names,
        #[cfg(feature = "recursive")]
        recursive,
        bench_config,
        exit_early,
        exe_name: exe_name.to_owned(),
    })
}

// ── Private helpers ────────────────────────────────────────────────────────────

/// Prints the version banner to stdout.
fn print_welcome_message() {
    println!("{}", welcome_message());
}

/// Read a `u32` from `=VALUE` within the current argument, or from the next
/// element of `argv` (advancing `arg_idx`).
///
/// `rest` is what follows the long-option name: `"=4"` for `--opt=4`, `""`
/// for `--opt 4`. Trailing garbage is an error.
fn parse_next_uint32(rest: &str, argv: &[String], arg_idx: &mut usize) -> anyhow::Result<u32> {
    let value_str = if let Some(value) = rest.strip_prefix('=') {
        value
    } else if rest.is_empty() {
        *arg_idx += 1;
        let next = argv
            .get(*arg_idx)
            .ok_or_else(|| anyhow!("bad usage: missing command argument"))?;
        if next.starts_with('-') {
            return Err(anyhow!("bad usage: option argument cannot be another option"));
        }
        next.as_str()
    } else {
        return Err(anyhow!("bad usage: unexpected text after option"));
    };

    match read_u32_from_str(value_str) {
        Some((val, "")) => Ok(val),
        _ => Err(anyhow!("bad usage: only numeric values are allowed")),
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
