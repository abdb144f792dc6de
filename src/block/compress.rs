//! RefPack compression — one-shot, whole-buffer.
//!
//! The encoder scans the input once.  At each position it asks the match
//! finder ([`find_best_match`]) for the best back-reference:
//!
//! - No profitable match: the byte joins the pending literal run and the
//!   position is inserted into the window index.
//! - Match: the pending run is flushed as literal-block commands (multiples
//!   of 4, up to 112 bytes each) until at most 3 bytes remain; those ride in
//!   the reference command's literal field.  Every position inside the match
//!   is inserted so later searches can reach into it.
//!
//! At the end of input the remaining run is flushed the same way and the EOF
//! command carries the last 0–3 bytes.
//!
//! The header's packed-size field is patched into the output once its final
//! length is known.

use super::command::{Command, CommandStats, RefForm};
use super::header::{patch_packed_size, write_placeholder};
use super::types::{
    compress_bound, try_with_capacity, PackedBuffer, RefPackError, MAX_INPUT_SIZE,
    MAX_LITERAL_BLOCK, MAX_LITERAL_PREFIX,
};
use crate::hc::{find_best_match, Match, WindowIndex};

// ─────────────────────────────────────────────────────────────────────────────
// Command writer
// ─────────────────────────────────────────────────────────────────────────────

/// Output buffer plus running command counts.
struct CommandWriter {
    out: Vec<u8>,
    stats: CommandStats,
}

impl CommandWriter {
    #[inline]
    fn emit(&mut self, cmd: Command, literals: &[u8]) {
        debug_assert_eq!(cmd.literal_len(), literals.len());
        cmd.encode_into(&mut self.out);
        self.out.extend_from_slice(literals);
        self.stats.record(&cmd);
    }

    /// Emit literal blocks from the front of `run` until at most
    /// [`MAX_LITERAL_PREFIX`] bytes remain; return the remainder.
    fn flush_literal_blocks<'a>(&mut self, mut run: &'a [u8]) -> &'a [u8] {
        while run.len() > MAX_LITERAL_PREFIX {
            let count = MAX_LITERAL_BLOCK.min(run.len() & !3);
            let (block, rest) = run.split_at(count);
            self.emit(Command::Literals { count }, block);
            run = rest;
        }
        run
    }

    fn emit_match(&mut self, m: &Match, prefix: &[u8]) {
        let cmd = Command::BackRef {
            form: RefForm::from_cost(m.cost),
            literals: prefix.len(),
            distance: m.distance,
            length: m.length,
        };
        self.emit(cmd, prefix);
    }

    fn emit_eof(&mut self, tail: &[u8]) {
        self.emit(Command::Eof { literals: tail.len() }, tail);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Public API
// ─────────────────────────────────────────────────────────────────────────────

/// Statistics gathered while compressing one buffer.
pub type CompressStats = CommandStats;

/// Compress `input` into a new packed buffer (header + command stream).
///
/// Fails only when `input` is longer than the 32-bit size field allows or
/// when the output or window tables cannot be allocated.
pub fn compress(input: &[u8]) -> Result<PackedBuffer, RefPackError> {
    compress_with_stats(input).map(|(packed, _)| packed)
}

/// Like [`compress`], also returning per-kind command counts.
pub fn compress_with_stats(input: &[u8]) -> Result<(PackedBuffer, CompressStats), RefPackError> {
    if input.len() > MAX_INPUT_SIZE {
        return Err(RefPackError::InputTooLarge);
    }

    let mut writer = CommandWriter {
        out: try_with_capacity(compress_bound(input.len()))?,
        stats: CommandStats::default(),
    };
    write_placeholder(&mut writer.out, input.len() as u32);

    let mut window = WindowIndex::new()?;
    let mut pos = 0usize;
    // Start of the pending literal run.
    let mut anchor = 0usize;

    while pos < input.len() {
        let best = find_best_match(&window, input, pos);

        if !best.is_match() {
            window.insert(input, pos);
            pos += 1;
            continue;
        }

        let prefix = writer.flush_literal_blocks(&input[anchor..pos]);
        writer.emit_match(&best, prefix);

        for p in pos..pos + best.length {
            window.insert(input, p);
        }
        pos += best.length;
        anchor = pos;
    }

    let tail = writer.flush_literal_blocks(&input[anchor..]);
    writer.emit_eof(tail);

    let CommandWriter { mut out, stats } = writer;
    patch_packed_size(&mut out);
    Ok((PackedBuffer::new(out), stats))
}

/// Compress into a plain `Vec<u8>`.
pub fn compress_to_vec(input: &[u8]) -> Result<Vec<u8>, RefPackError> {
    compress(input).map(PackedBuffer::into_vec)
}
