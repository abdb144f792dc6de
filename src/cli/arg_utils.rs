// arg_utils.rs — small helpers for the argument loop: path basenames,
// executable-name matching, and numeric option values.

/// Returns the last path component of `path`, handling both `/` and `\` separators.
pub fn last_name_from_path(path: &str) -> &str {
    let after_slash = match path.rfind('/') {
        Some(pos) => &path[pos + 1..],
        None => path,
    };
    match after_slash.rfind('\\') {
        Some(pos) => &after_slash[pos + 1..],
        None => after_slash,
    }
}

/// Returns `true` if `exe_path` is `name`, optionally followed by an extension.
pub fn exe_name_match(exe_path: &str, name: &str) -> bool {
    match exe_path.strip_prefix(name) {
        Some(rest) => rest.is_empty() || rest.starts_with('.'),
        None => false,
    }
}

/// Parses an unsigned 32-bit integer from the start of `s`, optionally
/// followed by a `K`/`KB`/`KiB` or `M`/`MB`/`MiB` suffix.
///
/// Returns `None` when `s` does not start with a digit or the value does not
/// fit in 32 bits, otherwise the value and the unconsumed remainder.
pub fn read_u32_from_str(s: &str) -> Option<(u32, &str)> {
    let digits = s.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }

    let mut result: u32 = 0;
    for b in s[..digits].bytes() {
        result = result.checked_mul(10)?.checked_add(u32::from(b - b'0'))?;
    }

    let mut rest = &s[digits..];
    let shift = match rest.as_bytes().first() {
        Some(b'K') => 10,
        Some(b'M') => 20,
        _ => return Some((result, rest)),
    };
    if result.leading_zeros() < shift {
        return None;
    }
    result <<= shift;
    rest = &rest[1..];
    rest = rest.strip_prefix('i').unwrap_or(rest);
    rest = rest.strip_prefix('B').unwrap_or(rest);
    Some((result, rest))
}

/// If `arg` starts with `prefix`, returns the remainder of `arg`.
pub fn long_command_w_arg<'a>(arg: &'a str, prefix: &str) -> Option<&'a str> {
    arg.strip_prefix(prefix)
}
