//! Command-line interface for the `refpack` binary.
//!
//! | Submodule     | Responsibility |
//! |---------------|---------------|
//! | [`constants`] | Program identity strings, the `DISPLAY_LEVEL` atomic, and the `displaylevel!` macro. |
//! | [`help`]      | Usage/help text printers and `print_bad_usage`. |
//! | [`arg_utils`] | Path basename, executable-name matching, integer parsing. |
//! | [`op_mode`]   | `OpMode` enum, extension-based mode detection, environment defaults. |
//! | [`init`]      | `Alias` and `CliInit`: starting state picked from the binary name (`refpackcat`, `unrefpack`). |
//! | [`args`]      | `ParsedArgs` — the argument loop that consumes `argv`. |
//!
//! Typical call sequence: `detect_alias` → `parse_args` → dispatch to the I/O layer.

pub mod constants;
pub mod help;
pub mod arg_utils;
pub mod op_mode;
pub mod init;
pub mod args;
