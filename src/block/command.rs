//! The RefPack command grammar.
//!
//! Every command starts with an opcode byte whose top bits select its shape:
//!
//! ```text
//! 0ffnnndd ffffffff                      short ref   offset 0..1023     len 3..10     lit 0..3
//! 10nnnnnn ddffffff ffffffff             long ref    offset 0..16383    len 4..67     lit 0..3
//! 110fnndd ffffffff ffffffff nnnnnnnn    very long   offset 0..131071   len 5..1028   lit 0..3
//! 111ddddd                               literals    (d + 1) * 4 bytes, 4..112
//! 111111dd                               EOF         lit 0..3
//! ```
//!
//! `dd` / `d` count literal bytes that follow the command header verbatim.
//! A reference copies `len` bytes starting `offset + 1` bytes behind the
//! write cursor (after those literals are written).
//!
//! [`Command::encode_into`] and [`Command::decode`] are the only places that
//! know the bit layout; the encoder, the decoder and [`CommandIter`] all go
//! through them.

use super::types::{
    RefPackError, EOF_OPCODE, HEADER_SIZE, LITERAL_BLOCK_OPCODE, LONG_MIN_LENGTH,
    MAX_LITERAL_BLOCK, MAX_LITERAL_PREFIX, SHORT_MIN_LENGTH, VERY_LONG_MIN_LENGTH,
};

/// Which back-reference encoding a command uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RefForm {
    /// Two bytes.
    Short,
    /// Three bytes.
    Long,
    /// Four bytes.
    VeryLong,
}

impl RefForm {
    /// Form matching an encoding cost of 2, 3 or 4 bytes.
    #[inline]
    pub fn from_cost(cost: usize) -> RefForm {
        match cost {
            2 => RefForm::Short,
            3 => RefForm::Long,
            _ => RefForm::VeryLong,
        }
    }

    /// Bytes taken by the command header.
    #[inline]
    pub fn header_len(self) -> usize {
        match self {
            RefForm::Short => 2,
            RefForm::Long => 3,
            RefForm::VeryLong => 4,
        }
    }
}

/// One decoded (or to-be-encoded) command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Copy `literals` bytes from the stream, then `length` bytes from
    /// `distance` bytes behind the write cursor.
    BackRef {
        form: RefForm,
        literals: usize,
        distance: usize,
        length: usize,
    },
    /// Copy `count` bytes (a multiple of 4 in 4..=112) from the stream.
    Literals { count: usize },
    /// Copy `literals` (0..=3) bytes from the stream and stop.
    Eof { literals: usize },
}

impl Command {
    /// Number of literal bytes that follow the command header.
    #[inline]
    pub fn literal_len(&self) -> usize {
        match *self {
            Command::BackRef { literals, .. } => literals,
            Command::Literals { count } => count,
            Command::Eof { literals } => literals,
        }
    }

    /// Bytes taken by the command header (excluding literals).
    #[inline]
    pub fn header_len(&self) -> usize {
        match *self {
            Command::BackRef { form, .. } => form.header_len(),
            Command::Literals { .. } | Command::Eof { .. } => 1,
        }
    }

    /// Bytes this command appends to the output.
    #[inline]
    pub fn output_len(&self) -> usize {
        match *self {
            Command::BackRef { literals, length, .. } => literals + length,
            Command::Literals { count } => count,
            Command::Eof { literals } => literals,
        }
    }

    /// Append the command header to `out`. Literal bytes are the caller's job.
    ///
    /// Field ranges are the encoder's responsibility and are only checked in
    /// debug builds.
    pub fn encode_into(&self, out: &mut Vec<u8>) {
        match *self {
            Command::BackRef { form, literals, distance, length } => {
                debug_assert!(literals <= MAX_LITERAL_PREFIX);
                debug_assert!(distance >= 1);
                let offset = distance - 1;
                let run = literals as u8;
                match form {
                    RefForm::Short => {
                        debug_assert!((SHORT_MIN_LENGTH..=10).contains(&length) && offset < 1 << 10);
                        let len = (length - SHORT_MIN_LENGTH) as u8;
                        out.push((((offset >> 8) as u8) << 5) | (len << 2) | run);
                        out.push(offset as u8);
                    }
                    RefForm::Long => {
                        debug_assert!((LONG_MIN_LENGTH..=67).contains(&length) && offset < 1 << 14);
                        let len = (length - LONG_MIN_LENGTH) as u8;
                        out.push(0x80 | len);
                        out.push((run << 6) | (offset >> 8) as u8);
                        out.push(offset as u8);
                    }
                    RefForm::VeryLong => {
                        debug_assert!((VERY_LONG_MIN_LENGTH..=1028).contains(&length) && offset < 1 << 17);
                        let len = length - VERY_LONG_MIN_LENGTH;
                        out.push(
                            0xC0 | (((offset >> 16) as u8) << 4) | (((len >> 8) as u8) << 2) | run,
                        );
                        out.push((offset >> 8) as u8);
                        out.push(offset as u8);
                        out.push(len as u8);
                    }
                }
            }
            Command::Literals { count } => {
                debug_assert!(count >= 4 && count <= MAX_LITERAL_BLOCK && count % 4 == 0);
                out.push(LITERAL_BLOCK_OPCODE + (count / 4 - 1) as u8);
            }
            Command::Eof { literals } => {
                debug_assert!(literals <= MAX_LITERAL_PREFIX);
                out.push(EOF_OPCODE + literals as u8);
            }
        }
    }

    /// Decode the command header at `stream[pos..]`.
    ///
    /// Returns the command and its header length.  Fails with
    /// [`RefPackError::MissingEof`] when `pos` is already at the end of the
    /// stream and [`RefPackError::Truncated`] when the header is cut short.
    /// Literal bytes are not inspected.
    pub fn decode(stream: &[u8], pos: usize) -> Result<(Command, usize), RefPackError> {
        let first = *stream.get(pos).ok_or(RefPackError::MissingEof)?;
        let byte = |i: usize| stream.get(pos + i).copied().ok_or(RefPackError::Truncated);

        if first & 0x80 == 0 {
            let second = byte(1)? as usize;
            let f = first as usize;
            let cmd = Command::BackRef {
                form: RefForm::Short,
                literals: f & 0x03,
                distance: (((f & 0x60) << 3) | second) + 1,
                length: ((f & 0x1C) >> 2) + SHORT_MIN_LENGTH,
            };
            return Ok((cmd, 2));
        }

        if first & 0x40 == 0 {
            let second = byte(1)? as usize;
            let third = byte(2)? as usize;
            let cmd = Command::BackRef {
                form: RefForm::Long,
                literals: second >> 6,
                distance: (((second & 0x3F) << 8) | third) + 1,
                length: (first as usize & 0x3F) + LONG_MIN_LENGTH,
            };
            return Ok((cmd, 3));
        }

        if first & 0x20 == 0 {
            let second = byte(1)? as usize;
            let third = byte(2)? as usize;
            let fourth = byte(3)? as usize;
            let f = first as usize;
            let cmd = Command::BackRef {
                form: RefForm::VeryLong,
                literals: f & 0x03,
                distance: ((((f & 0x10) >> 4) << 16) | (second << 8) | third) + 1,
                length: (((f & 0x0C) >> 2) << 8) + fourth + VERY_LONG_MIN_LENGTH,
            };
            return Ok((cmd, 4));
        }

        if first < EOF_OPCODE {
            let count = ((first as usize & 0x1F) << 2) + 4;
            return Ok((Command::Literals { count }, 1));
        }

        Ok((Command::Eof { literals: first as usize & 0x03 }, 1))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// CommandIter
// ─────────────────────────────────────────────────────────────────────────────

/// Walks the command stream of a packed buffer, yielding each command with
/// the literal bytes that follow it.
///
/// Stops after the EOF command.  If the stream is malformed the iterator
/// yields one `Err` and then stops.
#[derive(Debug, Clone)]
pub struct CommandIter<'a> {
    stream: &'a [u8],
    pos: usize,
    done: bool,
}

impl<'a> CommandIter<'a> {
    /// Iterate the commands of `packed`, skipping its 9-byte header.
    pub fn new(packed: &'a [u8]) -> Result<Self, RefPackError> {
        if packed.len() < HEADER_SIZE {
            return Err(RefPackError::TruncatedHeader);
        }
        Ok(CommandIter { stream: packed, pos: HEADER_SIZE, done: false })
    }

    /// Offset of the next unread byte in the packed buffer.
    pub fn position(&self) -> usize {
        self.pos
    }

    fn step(&mut self) -> Result<(Command, &'a [u8]), RefPackError> {
        let (cmd, header_len) = Command::decode(self.stream, self.pos)?;
        let start = self.pos + header_len;
        let end = start + cmd.literal_len();
        let literals = self.stream.get(start..end).ok_or(RefPackError::Truncated)?;
        self.pos = end;
        Ok((cmd, literals))
    }
}

impl<'a> Iterator for CommandIter<'a> {
    type Item = Result<(Command, &'a [u8]), RefPackError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let item = self.step();
        match item {
            Ok((Command::Eof { .. }, _)) | Err(_) => self.done = true,
            Ok(_) => {}
        }
        Some(item)
    }
}

impl core::iter::FusedIterator for CommandIter<'_> {}

// ─────────────────────────────────────────────────────────────────────────────
// Statistics
// ─────────────────────────────────────────────────────────────────────────────

/// Per-kind command counts for one packed stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CommandStats {
    pub literal_blocks: usize,
    pub short_refs: usize,
    pub long_refs: usize,
    pub very_long_refs: usize,
    /// Bytes copied verbatim from the stream (blocks, prefixes and EOF tail).
    pub literal_bytes: usize,
    /// Bytes produced by back-references.
    pub matched_bytes: usize,
}

impl CommandStats {
    /// Account for one command.
    pub fn record(&mut self, cmd: &Command) {
        match *cmd {
            Command::BackRef { form, literals, length, .. } => {
                match form {
                    RefForm::Short => self.short_refs += 1,
                    RefForm::Long => self.long_refs += 1,
                    RefForm::VeryLong => self.very_long_refs += 1,
                }
                self.literal_bytes += literals;
                self.matched_bytes += length;
            }
            Command::Literals { count } => {
                self.literal_blocks += 1;
                self.literal_bytes += count;
            }
            Command::Eof { literals } => self.literal_bytes += literals,
        }
    }

    /// Total back-references of any form.
    pub fn references(&self) -> usize {
        self.short_refs + self.long_refs + self.very_long_refs
    }

    /// Scan a packed buffer and count its commands.
    pub fn scan(packed: &[u8]) -> Result<CommandStats, RefPackError> {
        let mut stats = CommandStats::default();
        for item in CommandIter::new(packed)? {
            let (cmd, _) = item?;
            stats.record(&cmd);
        }
        Ok(stats)
    }
}
