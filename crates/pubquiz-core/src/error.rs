//! Error types for `pubquiz-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// A source table lacks one or more canonical-required columns.
  #[error("source {source_id:?} is missing required columns: {}", missing.join(", "))]
  MissingColumns {
    source_id: String,
    missing:   Vec<String>,
  },

  #[error("ladder {name:?} must have {expected} values, got {actual}")]
  LadderLength {
    name:     String,
    expected: usize,
    actual:   usize,
  },

  #[error("ladder {name:?} is not in ascending order at position {position}")]
  LadderOrder { name: String, position: usize },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
