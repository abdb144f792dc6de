//! Match finder: best back-reference at a position.
//!
//! Walks the window index chain for the current 3-byte prefix, extends each
//! candidate to its full match length, and keeps the candidate with the
//! highest net gain (`length - cost`), where `cost` is the size in bytes of the
//! cheapest command form able to encode it.  The comparison is strict, so on
//! equal gain the nearer candidate (seen first) wins.
//!
//! This is a single greedy pass; there is no lookahead to the next position.

use super::window::WindowIndex;
use crate::block::types::{
    LONG_MAX_LENGTH, LONG_OFFSET_LIMIT, MAX_MATCH_LENGTH, SHORT_MAX_LENGTH, SHORT_OFFSET_LIMIT,
};

// ─────────────────────────────────────────────────────────────────────────────
// Match
// ─────────────────────────────────────────────────────────────────────────────

/// A back-reference candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match {
    /// Bytes between the current position and the start of the earlier copy (≥ 1).
    pub distance: usize,
    /// Number of bytes the two positions agree on.
    pub length: usize,
    /// Encoded size of the command in bytes: 2, 3 or 4.
    pub cost: usize,
}

impl Match {
    /// Neutral baseline. Its net gain of zero is never worth emitting.
    pub const NONE: Match = Match { distance: 0, length: 2, cost: 2 };

    /// `true` when emitting this match saves bytes over literals.
    #[inline]
    pub fn is_match(&self) -> bool {
        self.cost < self.length
    }

    /// Offset field written to the stream: `distance - 1` (0 for [`Match::NONE`]).
    #[inline]
    pub fn offset(&self) -> usize {
        self.distance.saturating_sub(1)
    }

    #[inline]
    fn beats(&self, other: &Match) -> bool {
        // length - cost > other.length - other.cost, kept unsigned.
        self.length + other.cost > other.length + self.cost
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Size in bytes of the cheapest command able to encode a reference with the
/// given stream offset (`distance - 1`) and length.
#[inline]
pub fn encoding_cost(offset: usize, length: usize) -> usize {
    if offset < SHORT_OFFSET_LIMIT && length <= SHORT_MAX_LENGTH {
        2
    } else if offset < LONG_OFFSET_LIMIT && length <= LONG_MAX_LENGTH {
        3
    } else {
        4
    }
}

/// Count equal bytes starting at `a` and `b`, up to `max`.
///
/// The ranges may overlap; comparison is byte by byte in increasing order.
#[inline]
pub fn match_length(src: &[u8], a: usize, b: usize, max: usize) -> usize {
    src[a..a + max]
        .iter()
        .zip(&src[b..b + max])
        .take_while(|(x, y)| x == y)
        .count()
}

// ─────────────────────────────────────────────────────────────────────────────
// Search
// ─────────────────────────────────────────────────────────────────────────────

/// Find the best back-reference for `src[pos..]`, or [`Match::NONE`].
///
/// `window` must hold every position before `pos` that the encoder has
/// consumed; `pos` itself is not yet inserted.
pub fn find_best_match(window: &WindowIndex, src: &[u8], pos: usize) -> Match {
    let max_len = (src.len() - pos).min(MAX_MATCH_LENGTH);
    let mut best = Match::NONE;

    for candidate in window.candidates(src, pos) {
        // No candidate can exceed max_len, and src[pos + best.length] must
        // stay in bounds for the quick reject below.
        if best.length >= max_len {
            break;
        }
        if src[candidate + best.length] != src[pos + best.length] {
            continue;
        }
        let length = match_length(src, pos, candidate, max_len);
        if length <= best.length {
            continue;
        }
        let distance = pos - candidate;
        let m = Match {
            distance,
            length,
            cost: encoding_cost(distance - 1, length),
        };
        if m.beats(&best) {
            best = m;
            if best.length >= MAX_MATCH_LENGTH {
                break;
            }
        }
    }

    best
}
