//! RefPack decompression.
//!
//! # Security boundary
//!
//! The decoder accepts arbitrary bytes.  Every read from the stream and every
//! write to the output is bounds-checked; malformed input returns an error and
//! never panics.  The output ends exactly at the header's declared length and
//! may not grow past it.  The up-front reservation is bounded by what the
//! stream could possibly expand to, so a forged size field cannot demand a
//! huge allocation on its own.
//!
//! Back-references copy forward one byte at a time, so a distance smaller than
//! the length replicates the bytes just written (distance 1 repeats the last
//! byte).  Non-overlapping references take a bulk copy.

use super::command::{Command, CommandIter};
use super::header::read_uncompressed_size;
use super::types::{try_with_capacity, RawBuffer, RefPackError};

/// Most output one stream byte can produce: a 4-byte very-long reference
/// yields up to 1028 + 3 bytes.
const MAX_EXPANSION_PER_BYTE: usize = 258;

/// Output under construction, capped at the declared size.
struct OutputSink {
    out: Vec<u8>,
    declared: u32,
}

impl OutputSink {
    #[inline]
    fn reserve_for(&self, n: usize) -> Result<(), RefPackError> {
        let produced = self.out.len() + n;
        if produced > self.declared as usize {
            return Err(RefPackError::SizeMismatch { declared: self.declared, produced });
        }
        Ok(())
    }

    #[inline]
    fn push_literals(&mut self, literals: &[u8]) -> Result<(), RefPackError> {
        self.reserve_for(literals.len())?;
        self.out.extend_from_slice(literals);
        Ok(())
    }

    fn copy_back(&mut self, distance: usize, length: usize) -> Result<(), RefPackError> {
        let available = self.out.len();
        if distance > available {
            return Err(RefPackError::BadReference { distance, available });
        }
        self.reserve_for(length)?;

        let start = available - distance;
        if distance >= length {
            self.out.extend_from_within(start..start + length);
        } else {
            for i in start..start + length {
                let b = self.out[i];
                self.out.push(b);
            }
        }
        Ok(())
    }
}

/// Decompress a packed buffer (header + command stream).
///
/// The result is exactly as long as the header's uncompressed-size field.
/// Bytes after the EOF command are ignored.
pub fn decompress(input: &[u8]) -> Result<RawBuffer, RefPackError> {
    let declared = read_uncompressed_size(input)?;
    let mut sink = OutputSink {
        out: try_with_capacity(
            (declared as usize).min(input.len().saturating_mul(MAX_EXPANSION_PER_BYTE)),
        )?,
        declared,
    };

    for item in CommandIter::new(input)? {
        let (cmd, literals) = item?;
        sink.push_literals(literals)?;
        match cmd {
            Command::BackRef { distance, length, .. } => sink.copy_back(distance, length)?,
            Command::Literals { .. } => {}
            Command::Eof { .. } => {
                if sink.out.len() != declared as usize {
                    return Err(RefPackError::SizeMismatch {
                        declared,
                        produced: sink.out.len(),
                    });
                }
                return Ok(RawBuffer::new(sink.out));
            }
        }
    }

    // CommandIter only finishes without EOF after yielding an error.
    Err(RefPackError::MissingEof)
}

/// Decompress into a plain `Vec<u8>`.
pub fn decompress_to_vec(input: &[u8]) -> Result<Vec<u8>, RefPackError> {
    decompress(input).map(RawBuffer::into_vec)
}
