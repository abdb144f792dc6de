//! Filesystem utilities shared by the I/O layer and the CLI.
//!
//! - [`file_status`] — regular-file / directory checks, file size, and
//!   copying mtime / owner / mode from source to destination
//! - [`file_list`]   — recursive directory expansion for `-r`

pub mod file_status;
pub mod file_list;

pub use file_status::{copy_file_stat, get_file_size, is_directory, is_reg_file, set_file_stat};

pub use file_list::create_file_list;

/// Sum of [`get_file_size`] over `paths`.
pub fn get_total_file_size(paths: &[&str]) -> u64 {
    paths
        .iter()
        .map(|p| get_file_size(std::path::Path::new(p)))
        .sum()
}
