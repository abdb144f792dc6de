//! Binary entry point for the `refpack` command-line tool.
//!
//! Handles post-parse validation, recursive directory expansion, automatic
//! output filename resolution, and operation dispatch (compress, decompress,
//! test, list, benchmark).
//!
//! # Control flow
//!
//! 1. [`detect_alias`] inspects `argv[0]` to infer an initial mode
//!    (e.g. `unrefpack` implies decompress).
//! 2. [`parse_args`] processes all flags and builds a [`ParsedArgs`] value.
//! 3. [`run`] dispatches to the appropriate I/O operation and returns an exit code.

use std::io::IsTerminal;

use refpack::cli::args::{parse_args, ParsedArgs};
use refpack::cli::constants::{display_level, set_display_level, COMPRESSOR_NAME};
use refpack::cli::help::{print_usage, wait_enter, welcome_message};
use refpack::cli::init::detect_alias;
use refpack::cli::op_mode::{determine_op_mode, OpMode};
use refpack::config::REFPACK_EXTENSION;
use refpack::displaylevel;
use refpack::io::{
    compress_filename, compress_multiple_filenames, decompress_filename,
    decompress_multiple_filenames, display_compressed_files_info, set_notification_level,
    NUL_MARK, STDIN_MARK, STDOUT_MARK,
};

/// Placeholder output name in multiple-input mode, where each output is
/// derived from its input.
const MULTIPLE_OUTPUT_DUMMY: &str = "*\\dummy^!//";

/// Execute the operation selected by argument parsing.
///
/// Returns the process exit code (0 = success, 1 = error).
fn run(args: ParsedArgs) -> i32 {
    let mut prefs = args.prefs;
    let mut op_mode = args.op_mode;
    let force_stdout = args.force_stdout;
    let main_pause = args.main_pause;
    let mut multiple_inputs = args.multiple_inputs;
    let mut input_filename: Option<String> = args.input_filename;
    let mut output_filename: Option<String> = args.output_filename;
    let mut in_file_names: Vec<String> = args.in_file_names;
    let mut bench_config = args.bench_config;
    let exe_name = args.exe_name;

    #[cfg(feature = "recursive")]
    let recursive = args.recursive;

    displaylevel!(3, "{}\n", welcome_message());

    // ── Multiple inputs ──────────────────────────────────────────────────────
    if multiple_inputs {
        if let Some(first) = in_file_names.first() {
            input_filename = Some(first.clone());
        }
        #[cfg(feature = "recursive")]
        if recursive {
            let paths: Vec<&str> = in_file_names.iter().map(|s| s.as_str()).collect();
            match refpack::util::create_file_list(&paths) {
                Ok(list) => {
                    for (u, p) in list.iter().enumerate() {
                        displaylevel!(4, "{} {}\n", u, p);
                    }
                    in_file_names = list;
                }
                Err(e) => {
                    eprintln!("{}: {}", COMPRESSOR_NAME, e);
                    return 1;
                }
            }
        }
    }

    // ── Bench mode ───────────────────────────────────────────────────────────
    if op_mode == OpMode::Bench {
        bench_config.set_notification_level(display_level());
        let file_refs: Vec<&str> = in_file_names.iter().map(|s| s.as_str()).collect();
        let result = refpack::bench::bench_files(&file_refs, &bench_config);
        if let Err(ref e) = result {
            displaylevel!(1, "{}: {}\n", COMPRESSOR_NAME, e);
        }
        if main_pause {
            wait_enter();
        }
        return if result.is_ok() { 0 } else { 1 };
    }

    // ── Test mode: decode to nowhere ─────────────────────────────────────────
    if op_mode == OpMode::Test {
        prefs.set_test_mode(true);
        output_filename = Some(NUL_MARK.to_owned());
        op_mode = OpMode::Decompress;
    }

    let input_filename: String = input_filename.unwrap_or_else(|| STDIN_MARK.to_owned());

    if input_filename == STDIN_MARK && std::io::stdin().is_terminal() {
        displaylevel!(1, "refusing to read from a console\n");
        return 1;
    }

    if input_filename == STDIN_MARK && output_filename.is_none() {
        output_filename = Some(STDOUT_MARK.to_owned());
    }

    // ── Automatic output filename ────────────────────────────────────────────
    if output_filename.is_none() && !multiple_inputs {
        if op_mode == OpMode::Auto {
            op_mode = determine_op_mode(&input_filename);
        }
        if op_mode == OpMode::Compress {
            let out = format!("{}{}", input_filename, REFPACK_EXTENSION);
            displaylevel!(2, "Compressed filename will be : {} \n", out);
            output_filename = Some(out);
        } else if op_mode == OpMode::Decompress {
            match input_filename.strip_suffix(REFPACK_EXTENSION) {
                Some(base) if !base.is_empty() => {
                    displaylevel!(2, "Decoding file {} \n", base);
                    output_filename = Some(base.to_owned());
                }
                _ => {
                    displaylevel!(1, "Cannot determine an output filename \n");
                    print_usage(&exe_name);
                    return 1;
                }
            }
        }
    }

    if op_mode == OpMode::List && !multiple_inputs {
        in_file_names.push(input_filename.clone());
    }

    let output_filename: String =
        output_filename.unwrap_or_else(|| MULTIPLE_OUTPUT_DUMMY.to_owned());

    if output_filename == STDOUT_MARK
        && op_mode != OpMode::List
        && std::io::stdout().is_terminal()
        && !force_stdout
    {
        displaylevel!(1, "refusing to write to console without -c \n");
        return 1;
    }

    // Progress lines would interleave with piped output or with other files.
    if output_filename == STDOUT_MARK && display_level() == 2 {
        set_display_level(1);
    }
    if multiple_inputs && display_level() == 2 {
        set_display_level(1);
    }

    if op_mode == OpMode::Auto {
        op_mode = determine_op_mode(&input_filename);
    }

    set_notification_level(display_level() as i32);
    if in_file_names.is_empty() {
        multiple_inputs = false;
    }

    // ── Dispatch ─────────────────────────────────────────────────────────────
    let srcs: Vec<&str> = in_file_names.iter().map(|s| s.as_str()).collect();
    let operation_result: i32 = match op_mode {
        OpMode::Decompress => {
            if multiple_inputs {
                let dec_extension: &str = if output_filename == STDOUT_MARK {
                    STDOUT_MARK
                } else if output_filename == NUL_MARK {
                    NUL_MARK
                } else {
                    REFPACK_EXTENSION
                };
                match decompress_multiple_filenames(&srcs, dec_extension, &prefs) {
                    Ok(()) => 0,
                    Err(_) => 1,
                }
            } else {
                match decompress_filename(&input_filename, &output_filename, &prefs) {
                    Ok(_) => 0,
                    Err(e) => {
                        displaylevel!(1, "{}: {}: {}\n", COMPRESSOR_NAME, input_filename, e);
                        1
                    }
                }
            }
        }
        OpMode::List => match display_compressed_files_info(&srcs) {
            Ok(()) => 0,
            Err(_) => 1,
        },
        _ => {
            if multiple_inputs {
                let comp_ext: &str = if output_filename == STDOUT_MARK {
                    STDOUT_MARK
                } else {
                    REFPACK_EXTENSION
                };
                match compress_multiple_filenames(&srcs, comp_ext, &prefs) {
                    Ok(0) => 0,
                    Ok(_) | Err(_) => 1,
                }
            } else {
                match compress_filename(&input_filename, &output_filename, &prefs) {
                    Ok(_) => 0,
                    Err(e) => {
                        displaylevel!(1, "{}: {}: {}\n", COMPRESSOR_NAME, input_filename, e);
                        1
                    }
                }
            }
        }
    };

    if main_pause {
        wait_enter();
    }

    operation_result
}

fn main() {
    let argv0 = std::env::args().next().unwrap_or_else(|| COMPRESSOR_NAME.to_owned());
    let init = detect_alias(&argv0);

    let args = match parse_args(init) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("{}: {}", COMPRESSOR_NAME, e);
            std::process::exit(1);
        }
    };

    if args.exit_early {
        std::process::exit(0);
    }

    std::process::exit(run(args));
}
