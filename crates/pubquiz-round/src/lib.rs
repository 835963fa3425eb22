//! Round sampling for the pubquiz question bank.
//!
//! Filters the canonical table down to the rows a quiz master asked for and
//! draws a random subset of them, either uniformly or one per difficulty
//! band.

pub mod catalogue;
pub mod code;
pub mod dump;
pub mod error;
pub mod request;
pub mod sampler;

pub use catalogue::{Catalogue, CatalogueEntry, catalogue};
pub use code::RoundCode;
pub use dump::{QuizDump, RoundDump, RoundKind};
pub use error::{RoundError, Result};
pub use request::{
  CategoryFilter, DifficultyFilter, RegionInclude, RoundRequest,
  eligible_indices,
};
pub use sampler::{Round, RoundSampler};
