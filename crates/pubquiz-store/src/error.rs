//! Error type for `pubquiz-store`.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] pubquiz_core::Error),

  #[error("tsv error: {0}")]
  Tsv(#[from] pubquiz_tsv::Error),

  #[error("I/O error: {0}")]
  Io(#[from] std::io::Error),

  /// The canonical table does not exist at the configured path.
  #[error("canonical table not found: {}", .0.display())]
  NotFound(PathBuf),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
