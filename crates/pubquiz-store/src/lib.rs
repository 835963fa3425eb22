//! Union store for the pubquiz question bank.
//!
//! Merges per-source tables into one deduplicated canonical table and keeps
//! it in a single tab-separated file, rewritten in full on every merge.

mod merge;
mod store;

pub mod error;
pub mod normalize;
pub mod stats;

pub use error::{Error, Result};
pub use merge::{MergeOutcome, merge};
pub use normalize::{NormalizationReport, normalize_difficulty};
pub use stats::{Stats, stats};
pub use store::TsvStore;
