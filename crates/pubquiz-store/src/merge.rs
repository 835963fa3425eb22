//! Merge pipeline: existing canonical table + incoming source tables → a new
//! canonical table.
//!
//! Inputs are borrowed and never modified; the merged table is a fresh value.

use std::collections::{HashMap, HashSet};

use pubquiz_core::{
  Table, TriviaRecord, schema,
  store::{MergeReport, SourceOutcome, SourceTable},
};

/// The merged table and what the merge did.
#[derive(Debug, Clone)]
pub struct MergeOutcome {
  pub table:  Table,
  pub report: MergeReport,
}

/// Merge `incoming` into `existing`.
///
/// - Sources missing a required column are rejected and skipped.
/// - Rows without a `domain` are stamped with their source's id.
/// - Identity collisions keep the first row, in the order existing rows, then
///   sources in the order given. Null fields of the kept row are filled from
///   the rows it displaced.
/// - Normalized categories with too many alternatives are cleared; rows with
///   an empty question or answer are dropped.
pub fn merge(existing: &Table, incoming: &[SourceTable]) -> MergeOutcome {
  let mut report = MergeReport {
    existing_rows: existing.len(),
    ..MergeReport::default()
  };

  let mut columns = existing.canonical_header();
  let mut batch = Vec::new();

  for source in incoming {
    let missing = schema::missing_columns(&source.table);
    if !missing.is_empty() {
      tracing::warn!(
        source = %source.source_id,
        missing = %missing.join(", "),
        "rejecting source table"
      );
      report.sources.push(SourceOutcome::Rejected {
        source_id: source.source_id.clone(),
        missing,
      });
      continue;
    }

    for column in source.table.columns() {
      if !columns.contains(column) {
        columns.push(column.clone());
      }
    }

    batch.extend(source.table.iter().map(|record| {
      let mut record = record.clone();
      if record.domain.is_none() {
        record.domain = Some(source.source_id.clone());
      }
      record
    }));

    report.sources.push(SourceOutcome::Accepted {
      source_id: source.source_id.clone(),
      rows:      source.table.len(),
    });
  }

  // Within the batch: first source wins.
  let batch = dedup_fill(batch.into_iter().map(sanitize), &mut report);

  // Against the existing table: existing rows win.
  let existing_ids: HashSet<&str> =
    existing.iter().map(|r| r.uuid.as_str()).collect();
  let combined = existing
    .iter()
    .cloned()
    .map(sanitize)
    .chain(batch.into_iter().map(|record| (record, false)));
  let mut rows = dedup_fill(combined, &mut report);

  rows.retain(|record| {
    let keep = record.is_complete();
    if !keep {
      tracing::debug!(uuid = %record.uuid, "dropping incomplete row");
      report.incomplete_rows += 1;
    }
    keep
  });

  report.added_rows = rows
    .iter()
    .filter(|r| !existing_ids.contains(r.uuid.as_str()))
    .count();
  report.total_rows = rows.len();

  tracing::info!(
    existing = report.existing_rows,
    added = report.added_rows,
    duplicates = report.duplicate_rows,
    filled = report.filled_fields,
    total = report.total_rows,
    "merged source tables"
  );

  MergeOutcome {
    table: Table::from_parts(columns, rows),
    report,
  }
}

/// Keep the first row per identity, filling its nulls from later rows with
/// the same identity.
fn dedup_fill(
  records: impl IntoIterator<Item = (TriviaRecord, bool)>,
  report: &mut MergeReport,
) -> Vec<TriviaRecord> {
  let mut position: HashMap<String, usize> = HashMap::new();
  let mut kept: Vec<TriviaRecord> = Vec::new();

  for (record, cleared) in records {
    if cleared {
      report.cleared_categories += 1;
    }
    match position.get(&record.uuid) {
      Some(&i) => {
        report.filled_fields += kept[i].fill_nulls_from(&record);
        report.duplicate_rows += 1;
      }
      None => {
        position.insert(record.uuid.clone(), kept.len());
        kept.push(record);
      }
    }
  }

  kept
}

/// Clear an over-long normalized category. The flag reports whether it did,
/// so the count lands in the report once the row is processed.
fn sanitize(mut record: TriviaRecord) -> (TriviaRecord, bool) {
  if record.has_valid_normalized_category() {
    return (record, false);
  }
  tracing::debug!(
    uuid = %record.uuid,
    category = record.normalized_category.as_deref().unwrap_or_default(),
    "clearing normalized category with too many alternatives"
  );
  record.normalized_category = None;
  (record, true)
}
