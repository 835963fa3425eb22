//! TSV decoder.
//!
//! Pipeline:
//!   raw &str
//!     └─ csv::Reader (tab-delimited, header row)
//!          └─ header check        → Vec<String>
//!               └─ decode_record() → TriviaRecord per row
//!                    └─ Table::from_parts

use std::collections::HashSet;

use pubquiz_core::{
  Ordinal, Table, TriviaRecord,
  ladder::Prize,
  schema::{self, column},
};

use crate::{
  DELIMITER,
  error::{Error, Result},
};

pub(crate) fn decode(input: &str) -> Result<Table> {
  let mut reader = csv::ReaderBuilder::new()
    .delimiter(DELIMITER)
    .has_headers(true)
    .flexible(true)
    .from_reader(input.as_bytes());

  let columns: Vec<String> =
    reader.headers()?.iter().map(|h| h.trim().to_string()).collect();

  let mut seen = HashSet::new();
  for name in &columns {
    if !seen.insert(name.as_str()) {
      return Err(Error::DuplicateColumn(name.clone()));
    }
  }

  let mut records = Vec::new();
  for row in reader.records() {
    let row = row?;
    let line = row.position().map_or(0, |p| p.line());
    if row.len() > columns.len() {
      tracing::warn!(
        line,
        cells = row.len(),
        columns = columns.len(),
        "ignoring cells beyond the header"
      );
    }
    // Ragged rows are padded with nulls.
    let cells = columns.iter().enumerate().map(|(i, name)| {
      (name.as_str(), row.get(i).filter(|cell| !cell.is_empty()))
    });
    records.push(decode_record(cells, line));
  }

  Ok(Table::from_parts(columns, records))
}

/// Build a record from `(column, cell)` pairs. Unknown columns land in
/// `extra`; null cells are skipped.
fn decode_record<'a>(
  cells: impl Iterator<Item = (&'a str, Option<&'a str>)>,
  line: u64,
) -> TriviaRecord {
  let mut record = TriviaRecord::default();
  let mut uuid = None;

  for (name, cell) in cells {
    let Some(cell) = cell else {
      continue;
    };
    match name {
      column::UUID => uuid = Some(cell.to_string()),
      column::QUESTION => record.question = cell.to_string(),
      column::CORRECT_ANSWER => record.correct_answer = cell.to_string(),
      column::WRONG_ANSWER_1 => record.wrong_answers[0] = Some(cell.to_string()),
      column::WRONG_ANSWER_2 => record.wrong_answers[1] = Some(cell.to_string()),
      column::WRONG_ANSWER_3 => record.wrong_answers[2] = Some(cell.to_string()),
      column::CATEGORY => record.category = cell.to_string(),
      column::DIFFICULTY => {
        record.difficulty = parse_difficulty(cell);
        if record.difficulty.is_none() {
          tracing::warn!(line, value = cell, "unrecognised difficulty; treating as unknown");
        }
      }
      column::DOMAIN => record.domain = Some(cell.to_string()),
      column::NORMALIZED_CATEGORY => {
        record.normalized_category = Some(cell.to_string());
      }
      column::IS_UK => record.region.is_uk = flag(name, cell, line),
      column::IS_USA => record.region.is_usa = flag(name, cell, line),
      other => {
        record.extra.insert(other.to_string(), cell.to_string());
      }
    }
  }

  // Sources that did not hash their questions get the canonical identity.
  record.uuid = uuid.unwrap_or_else(|| schema::content_id(&record.question));
  record
}

fn flag(column: &str, cell: &str, line: u64) -> Option<bool> {
  let parsed = parse_flag(cell);
  if parsed.is_none() {
    tracing::warn!(line, column, value = cell, "unrecognised flag; treating as unknown");
  }
  parsed
}

// ─── Lenient cell parsers ────────────────────────────────────────────────────

/// Decode a difficulty cell.
///
/// Integer-like cells (`2`, `2.0`) are ordinals. The web sources' textual
/// levels map to `easy` = 0, `medium` = 1, `hard` = 2.
pub fn parse_difficulty(cell: &str) -> Option<Ordinal> {
  let cell = cell.trim();
  match cell.to_ascii_lowercase().as_str() {
    "easy" => return Some(0),
    "medium" => return Some(1),
    "hard" => return Some(2),
    _ => {}
  }
  if let Ok(n) = cell.parse::<Ordinal>() {
    return Some(n);
  }
  // Float-typed columns are written as `3.0`.
  let value = cell.parse::<f64>().ok()?;
  (value >= 0.0 && value.fract() == 0.0 && value <= f64::from(Ordinal::MAX))
    .then_some(value as Ordinal)
}

/// Decode a tri-state region flag cell. `None` when unrecognised.
pub fn parse_flag(cell: &str) -> Option<bool> {
  match cell.trim().to_ascii_lowercase().as_str() {
    "1" | "1.0" | "true" | "yes" | "y" => Some(true),
    "0" | "0.0" | "false" | "no" | "n" => Some(false),
    _ => None,
  }
}

/// Decode a prize value such as `1,000`, `$1,000`, `£500` or `64000`.
pub fn parse_prize(cell: &str) -> Option<Prize> {
  let digits: String = cell
    .trim()
    .trim_start_matches(&['$', '£', '€'][..])
    .chars()
    .filter(|c| *c != ',')
    .collect();
  if let Ok(v) = digits.parse::<Prize>() {
    return Some(v);
  }
  // Float-typed columns again.
  let value = digits.parse::<f64>().ok()?;
  (value >= 0.0 && value.fract() == 0.0).then_some(value as Prize)
}
