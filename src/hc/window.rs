//! Window index: hash-bucket heads plus a per-position chain of older
//! occurrences of the same bucket.
//!
//! `head[hash]` holds the most recent position whose 3-byte prefix hashed to
//! `hash`; `prev[pos & CHAIN_TABLE_MASK]` holds the value `head[hash]` had when
//! `pos` was inserted.  Walking `prev` from a head therefore yields every
//! earlier position in the bucket, nearest first.  Nothing is ever removed:
//! entries that fall out of the window are skipped by the floor check, and
//! chain slots are recycled by wraparound.
//!
//! The chain table is one slot larger than the window, so a slot is never
//! reused while the position it describes is still reachable.

use super::types::{hash3, hashable, CHAIN_TABLE_MASK, CHAIN_TABLE_SIZE, HASH_TABLE_SIZE, NO_POSITION};
use crate::block::types::{try_with_capacity, RefPackError, WINDOW_SIZE};

/// Hash and chain tables for one encode call.
#[derive(Debug)]
pub struct WindowIndex {
    head: Vec<u32>,
    prev: Vec<u32>,
}

impl WindowIndex {
    /// Allocate both tables with every slot empty.
    pub fn new() -> Result<Self, RefPackError> {
        let mut head = try_with_capacity(HASH_TABLE_SIZE)?;
        head.resize(HASH_TABLE_SIZE, NO_POSITION);
        let mut prev = try_with_capacity(CHAIN_TABLE_SIZE)?;
        prev.resize(CHAIN_TABLE_SIZE, NO_POSITION);
        Ok(WindowIndex { head, prev })
    }

    /// Record `pos` as the newest occurrence of its 3-byte prefix.
    ///
    /// Positions with fewer than three bytes left are ignored; no later
    /// position can produce a 3-byte match against them.
    #[inline]
    pub fn insert(&mut self, src: &[u8], pos: usize) {
        if !hashable(src, pos) {
            return;
        }
        let h = hash3(src, pos);
        self.prev[pos & CHAIN_TABLE_MASK] = self.head[h];
        self.head[h] = pos as u32;
    }

    /// Earlier positions whose prefix shares the hash bucket of `pos`, nearest
    /// first, stopping at the window floor `max(pos - WINDOW_SIZE, 0)`.
    ///
    /// Yields nothing when fewer than three bytes remain at `pos`.
    #[inline]
    pub fn candidates(&self, src: &[u8], pos: usize) -> Candidates<'_> {
        let next = if hashable(src, pos) {
            self.head[hash3(src, pos)]
        } else {
            NO_POSITION
        };
        Candidates {
            prev: &self.prev,
            next,
            floor: pos.saturating_sub(WINDOW_SIZE),
        }
    }

    /// Most recent position recorded for bucket `hash`, if any.
    pub fn head(&self, hash: usize) -> Option<usize> {
        match self.head[hash] {
            NO_POSITION => None,
            p => Some(p as usize),
        }
    }

    /// Chain link stored for `pos`, if any.
    pub fn prev(&self, pos: usize) -> Option<usize> {
        match self.prev[pos & CHAIN_TABLE_MASK] {
            NO_POSITION => None,
            p => Some(p as usize),
        }
    }
}

/// Lazy walk along one hash chain. Created by [`WindowIndex::candidates`].
#[derive(Debug, Clone)]
pub struct Candidates<'a> {
    prev: &'a [u32],
    next: u32,
    floor: usize,
}

impl Iterator for Candidates<'_> {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        if self.next == NO_POSITION || (self.next as usize) < self.floor {
            return None;
        }
        let pos = self.next as usize;
        self.next = self.prev[pos & CHAIN_TABLE_MASK];
        Some(pos)
    }
}
