//! Hash-chain match finding for the RefPack encoder.
//!
//! [`window`] keeps the bucket heads and per-position chains; [`search`]
//! walks them to pick the best back-reference at a position.

pub mod search;
pub mod types;
pub mod window;

pub use search::{encoding_cost, find_best_match, match_length, Match};
pub use window::{Candidates, WindowIndex};
