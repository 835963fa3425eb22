//! The `RecordStore` trait and the types passed across it.
//!
//! The trait is implemented by storage backends (e.g. `pubquiz-store`).
//! Higher layers (`pubquiz-round`, `pubquiz-cli`) depend on this abstraction,
//! not on any concrete backend.

use crate::{Table, TriviaRecord};

// ─── Input ───────────────────────────────────────────────────────────────────

/// One source adapter's latest snapshot.
#[derive(Debug, Clone)]
pub struct SourceTable {
  /// Adapter name; stamped into `domain` where the rows lack one.
  pub source_id: String,
  pub table:     Table,
}

impl SourceTable {
  pub fn new(source_id: impl Into<String>, table: Table) -> Self {
    Self { source_id: source_id.into(), table }
  }
}

// ─── Report ──────────────────────────────────────────────────────────────────

/// What happened to one incoming source during a merge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceOutcome {
  Accepted {
    source_id: String,
    rows:      usize,
  },
  /// Failed schema validation; none of its rows were merged.
  Rejected {
    source_id: String,
    missing:   Vec<String>,
  },
}

/// Summary of one merge run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeReport {
  pub sources:            Vec<SourceOutcome>,
  /// Rows in the existing table before the merge.
  pub existing_rows:      usize,
  /// Rows whose identity was not yet in the existing table.
  pub added_rows:         usize,
  /// Incoming rows dropped because their identity was already present.
  pub duplicate_rows:     usize,
  /// Null fields filled from a duplicate row.
  pub filled_fields:      usize,
  /// Normalized categories cleared for carrying too many alternatives.
  pub cleared_categories: usize,
  /// Rows dropped for an empty question or answer.
  pub incomplete_rows:    usize,
  pub total_rows:         usize,
}

impl MergeReport {
  pub fn rejected(&self) -> impl Iterator<Item = &SourceOutcome> {
    self
      .sources
      .iter()
      .filter(|o| matches!(o, SourceOutcome::Rejected { .. }))
  }
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a canonical record store backend.
///
/// Reads never mutate the store. The only write is [`RecordStore::merge`],
/// which replaces the canonical table with a freshly built one.
pub trait RecordStore {
  type Error: std::error::Error + Send + Sync + 'static;

  /// The canonical table as persisted.
  fn table(&self) -> &Table;

  /// Number of canonical rows.
  fn len(&self) -> usize { self.table().len() }

  fn is_empty(&self) -> bool { self.table().is_empty() }

  /// The record at `index`, with `normalized_category` reduced to its first
  /// alternative. The stored value is left untouched.
  fn get(&self, index: usize) -> Option<TriviaRecord> {
    self.table().get(index).map(|record| {
      let mut view = record.clone();
      view.normalized_category = record.primary_category().map(str::to_string);
      view
    })
  }

  /// Merge `incoming` into the canonical table and persist the result.
  ///
  /// Sources failing schema validation are skipped and reported; they never
  /// abort the merge.
  fn merge(
    &mut self,
    incoming: &[SourceTable],
  ) -> Result<MergeReport, Self::Error>;
}
