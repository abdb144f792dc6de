//! File status helpers: type checks, size, and copying a source file's
//! modification time, ownership and permission bits onto its output.
//!
//! Timestamps go through the `filetime` crate; ownership uses `nix` on Unix.

use std::fs;
use std::io;
use std::path::Path;
use std::time::SystemTime;

use filetime::FileTime;

/// Sets modification time, ownership (POSIX) and permission bits on a
/// regular file.
///
/// * `mtime` — desired last-modification time (access time becomes "now")
/// * `uid` / `gid` — desired owner (POSIX only; ignored elsewhere)
/// * `mode` — permission bits; the lower 12 bits are applied
pub fn set_file_stat(
    path: &Path,
    mtime: SystemTime,
    uid: u32,
    gid: u32,
    mode: u32,
) -> io::Result<()> {
    if !is_reg_file(path) {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "set_file_stat: not a regular file",
        ));
    }

    let atime = FileTime::from_system_time(SystemTime::now());
    filetime::set_file_times(path, atime, FileTime::from_system_time(mtime))?;

    #[cfg(unix)]
    {
        use nix::unistd::{chown, Gid, Uid};
        use std::os::unix::fs::PermissionsExt;
        // Changing ownership fails for unprivileged users; permissions and
        // mtime are still applied.
        let _ = chown(path, Some(Uid::from_raw(uid)), Some(Gid::from_raw(gid)));
        fs::set_permissions(path, fs::Permissions::from_mode(mode & 0o7777))?;
    }
    #[cfg(not(unix))]
    {
        let _ = (uid, gid);
        let readonly = (mode & 0o200) == 0;
        let mut perms = fs::metadata(path)?.permissions();
        perms.set_readonly(readonly);
        fs::set_permissions(path, perms)?;
    }

    Ok(())
}

/// Copy `src`'s mtime, owner and permission bits onto `dst`.
pub fn copy_file_stat(src: &Path, dst: &Path) -> io::Result<()> {
    let meta = fs::metadata(src)?;
    let mtime = meta.modified()?;

    #[cfg(unix)]
    let (uid, gid, mode) = {
        use std::os::unix::fs::MetadataExt;
        (meta.uid(), meta.gid(), meta.mode())
    };
    #[cfg(not(unix))]
    let (uid, gid, mode) = (0, 0, if meta.permissions().readonly() { 0o444 } else { 0o644 });

    set_file_stat(dst, mtime, uid, gid, mode)
}

/// `true` if `path` is a regular file (symlinks are followed).
pub fn is_reg_file(path: &Path) -> bool {
    fs::metadata(path)
        .map(|m| m.file_type().is_file())
        .unwrap_or(false)
}

/// `true` if `path` is a directory.
pub fn is_directory(path: &Path) -> bool {
    fs::metadata(path)
        .map(|m| m.file_type().is_dir())
        .unwrap_or(false)
}

/// Size of a regular file in bytes, or 0 if `path` is not one.
pub fn get_file_size(path: &Path) -> u64 {
    fs::metadata(path)
        .ok()
        .filter(|m| m.is_file())
        .map(|m| m.len())
        .unwrap_or(0)
}
