// cli/help.rs — usage and help text printers.
//
//   print_usage          → brief usage
//   print_usage_advanced → banner + brief usage + advanced options
//   print_long_help      → everything, plus worked examples
//   print_bad_usage      → "Incorrect parameters" + brief usage, exit 1
//   wait_enter           → pause until the user presses Enter (-p)

use std::io::{self, Write};

use crate::block::WINDOW_SIZE;
use crate::cli::constants::{display_level, AUTHOR, COMPRESSOR_NAME};
use crate::config::{BENCH_SECONDS_DEFAULT, ENV_BENCH_SECONDS, REFPACK_EXTENSION};
use crate::io::{NULL_OUTPUT, STDIN_MARK, STDOUT_MARK};

/// The `-V` / advanced-help banner.
pub fn welcome_message() -> String {
    format!(
        "*** {} v{} {}-bit, by {} ***",
        COMPRESSOR_NAME,
        crate::version_string(),
        usize::BITS,
        AUTHOR
    )
}

/// Print brief usage to stderr.
pub fn print_usage(program: &str) {
    eprintln!("Usage : ");
    eprintln!("      {} [arg] [input] [output] ", program);
    eprintln!();
    eprintln!("input   : a filename ");
    eprintln!(
        "          with no FILE, or when FILE is - or {}, read standard input",
        STDIN_MARK
    );
    eprintln!("Arguments : ");
    eprintln!(" -z     : force compression ");
    eprintln!(
        " -d     : decompression (default for {} files and RefPack headers)",
        REFPACK_EXTENSION
    );
    eprintln!(" -f     : overwrite output without prompting ");
    eprintln!(" -k     : preserve source files(s)  (default) ");
    eprintln!("--rm    : remove source file(s) after successful de/compression ");
    eprintln!(" -h/-H  : display help/long help and exit ");
}

/// Print the welcome banner, brief usage and advanced options to stderr.
pub fn print_usage_advanced(program: &str) {
    eprintln!("{}", welcome_message());

    print_usage(program);

    eprintln!();
    eprintln!("Advanced arguments :");
    eprintln!(" -V     : display Version number and exit ");
    eprintln!(" -v     : verbose mode ");
    eprintln!(" -q     : suppress warnings; specify twice to suppress errors too");
    eprintln!(" -c     : force write to standard output, even if it is the console");
    eprintln!(" -t     : test compressed file integrity");
    eprintln!(" -m     : multiple input files (implies automatic output filenames)");
    #[cfg(feature = "recursive")]
    eprintln!(" -r     : operate recursively on directories (sets also -m) ");
    eprintln!(" -p     : pause at the end ");
    eprintln!(
        "--list FILE : lists header fields and command counts of {} files",
        REFPACK_EXTENSION
    );
    eprintln!("--[no-]keep-status : copy source timestamps and permissions (default:enabled)");
    eprintln!("Benchmark arguments : ");
    eprintln!(" -b     : benchmark file(s) (synthetic sample if none given) ");
    eprintln!(
        " -i#    : minimum evaluation time in seconds (default : {}s, or ${}) ",
        BENCH_SECONDS_DEFAULT, ENV_BENCH_SECONDS
    );
    eprintln!(" -S     : report each file separately ");
    eprintln!(" -d -b  : benchmark decompression of {} files only ", REFPACK_EXTENSION);
}

/// Print the full long-form help to stderr.
pub fn print_long_help(program: &str) {
    print_usage_advanced(program);

    eprintln!();
    eprintln!("****************************");
    eprintln!("***** Advanced comment *****");
    eprintln!("****************************");
    eprintln!();
    eprintln!("Which values can [output] have ? ");
    eprintln!("---------------------------------");
    eprintln!("[output] : a filename ");
    eprintln!(
        "          '{}', or '-' for standard output (pipe mode)",
        STDOUT_MARK
    );
    eprintln!("          '{}' to discard output (test mode) ", NULL_OUTPUT);
    eprintln!("[output] can be left empty. In this case, it receives the following value :");
    eprintln!("          - if stdout is not the console, then [output] = stdout ");
    eprintln!("          - if stdout is console : ");
    eprintln!(
        "               + for compression, output to filename{} ",
        REFPACK_EXTENSION
    );
    eprintln!(
        "               + for decompression, output to filename without '{}'",
        REFPACK_EXTENSION
    );
    eprintln!(
        "                    > if input filename has no '{}' extension : error ",
        REFPACK_EXTENSION
    );
    eprintln!();
    eprintln!("Format : ");
    eprintln!("---------");
    eprintln!("A single whole-file stream: 9-byte header, then literal and");
    eprintln!("back-reference commands reaching up to {} bytes back.", WINDOW_SIZE);
    eprintln!("Inputs larger than 4 GiB cannot be described by the header.");
    eprintln!();
    eprintln!("stdin, stdout and the console : ");
    eprintln!("--------------------------------");
    eprintln!("To protect the console from binary flooding (bad argument mistake)");
    eprintln!("{} will refuse to read from console, or write to console ", program);
    eprintln!("except if '-c' command is specified, to force output to console ");
    eprintln!();
    eprintln!("Simple example :");
    eprintln!("----------------");
    eprintln!(
        "1 : compress 'filename', using default output name 'filename{}'",
        REFPACK_EXTENSION
    );
    eprintln!("          {} filename", program);
    eprintln!();
    eprintln!("Short arguments can be aggregated. For example :");
    eprintln!("----------------------------------");
    eprintln!("2 : decompress 'filename{}', overwrite output if exists", REFPACK_EXTENSION);
    eprintln!("          {} -d -f filename{} ", program, REFPACK_EXTENSION);
    eprintln!("    is equivalent to :");
    eprintln!("          {} -df filename{} ", program, REFPACK_EXTENSION);
    eprintln!();
    eprintln!("{} can be used in 'pure pipe mode'. For example :", program);
    eprintln!("-------------------------------------");
    eprintln!("3 : compress data stream from 'generator', send result to 'consumer'");
    eprintln!("          generator | {} | consumer ", program);
}

/// Print "Incorrect parameters" and brief usage, then exit 1.
pub fn print_bad_usage(program: &str) -> ! {
    if display_level() >= 1 {
        eprintln!("Incorrect parameters");
        print_usage(program);
    }
    std::process::exit(1);
}

/// Print a prompt and wait for the user to press Enter.
pub fn wait_enter() {
    eprint!("Press enter to continue...\n");
    let _ = io::stderr().flush();
    // Exactly one character, so no further buffered input is consumed.
    // SAFETY: getchar has no preconditions.
    unsafe { libc::getchar() };
}
