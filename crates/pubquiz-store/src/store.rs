//! [`TsvStore`] is the tab-separated file implementation of [`RecordStore`].

use std::{
  fs,
  path::{Path, PathBuf},
};

use pubquiz_core::{
  Table, schema,
  store::{MergeReport, RecordStore, SourceTable},
};

use crate::{Error, Result, merge::merge};

// ─── Store ───────────────────────────────────────────────────────────────────

/// The canonical table, held in memory and backed by a single TSV file.
///
/// Every merge rewrites the whole file. The new contents are written beside
/// the old file and renamed over it, so a failed write leaves the previous
/// table intact.
#[derive(Debug, Clone)]
pub struct TsvStore {
  path:  Option<PathBuf>,
  table: Table,
}

impl TsvStore {
  /// Load the canonical table at `path`. A missing file is an error.
  pub fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    if !path.exists() {
      return Err(Error::NotFound(path.to_path_buf()));
    }

    let table = pubquiz_tsv::read_path(path)?;
    let table = if table.columns().is_empty() {
      Table::canonical()
    } else {
      schema::validate("canonical", &table)?;
      table
    };

    tracing::debug!(path = %path.display(), rows = table.len(), "opened canonical table");
    Ok(Self { path: Some(path.to_path_buf()), table })
  }

  /// Load the canonical table at `path`, starting empty if the file does not
  /// exist yet. Nothing is written until the first merge.
  pub fn open_or_init(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    match Self::open(path) {
      Err(Error::NotFound(_)) => {
        tracing::info!(path = %path.display(), "starting a new canonical table");
        Ok(Self { path: Some(path.to_path_buf()), table: Table::canonical() })
      }
      other => other,
    }
  }

  /// An empty store that is never persisted, for tests.
  pub fn in_memory() -> Self {
    Self { path: None, table: Table::canonical() }
  }

  pub fn path(&self) -> Option<&Path> { self.path.as_deref() }

  fn persist(&self) -> Result<()> {
    let Some(path) = &self.path else {
      return Ok(());
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
      fs::create_dir_all(parent)?;
    }

    let mut staging = path.clone().into_os_string();
    staging.push(".tmp");
    let staging = PathBuf::from(staging);

    pubquiz_tsv::write_path(&self.table, &staging)?;
    fs::rename(&staging, path)?;

    tracing::debug!(path = %path.display(), rows = self.table.len(), "persisted canonical table");
    Ok(())
  }
}

// ─── RecordStore impl ────────────────────────────────────────────────────────

impl RecordStore for TsvStore {
  type Error = Error;

  fn table(&self) -> &Table { &self.table }

  fn merge(&mut self, incoming: &[SourceTable]) -> Result<MergeReport> {
    let outcome = merge(&self.table, incoming);
    let previous = std::mem::replace(&mut self.table, outcome.table);
    if let Err(e) = self.persist() {
      self.table = previous;
      return Err(e);
    }
    Ok(outcome.report)
  }
}
