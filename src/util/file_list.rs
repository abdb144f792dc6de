//! Expands directory arguments into the regular files beneath them (`-r`).
//!
//! Directories are walked with [`walkdir`] in file-name order so the
//! resulting list is stable across runs.  Symlinks inside a walked directory
//! are neither followed nor listed; a symlink named directly on the command
//! line is passed through like any other non-directory argument.

use std::io;
use std::path::Path;

use walkdir::WalkDir;

fn walk_error(e: walkdir::Error) -> io::Error {
    match e.io_error() {
        Some(inner) => io::Error::new(inner.kind(), e.to_string()),
        None => io::Error::other(e.to_string()),
    }
}

/// Expand a mixed list of file and directory paths into a flat file list.
///
/// Non-directory inputs are forwarded unchanged and unchecked.  Any
/// unreadable directory entry aborts the walk with an `io::Error`.
pub fn create_file_list(inputs: &[&str]) -> io::Result<Vec<String>> {
    let mut result = Vec::new();
    for &input in inputs {
        if !Path::new(input).is_dir() {
            result.push(input.to_owned());
            continue;
        }
        for entry in WalkDir::new(input).sort_by_file_name() {
            let entry = entry.map_err(walk_error)?;
            if entry.file_type().is_file() {
                result.push(entry.path().to_string_lossy().into_owned());
            }
        }
    }
    Ok(result)
}
