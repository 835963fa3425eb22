//! Error types for the pubquiz-tsv codec.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("duplicate column in header: {0:?}")]
  DuplicateColumn(String),

  #[error("malformed TSV: {0}")]
  Csv(#[from] csv::Error),

  #[error("I/O error: {0}")]
  Io(#[from] std::io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
