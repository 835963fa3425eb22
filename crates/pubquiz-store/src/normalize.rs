//! Difficulty normalization for the quiz-show source.
//!
//! The show's rows carry the prize value a question was played for rather
//! than a difficulty. Rows are grouped into sessions (one contestant's game,
//! keyed by the `url` column), the ladder in use is inferred from every value
//! in the session, and each row's difficulty becomes its rung on that ladder.
//!
//! Sessions the classifier cannot resolve keep no difficulty at all.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use pubquiz_core::{
  Table, TriviaRecord,
  ladder::{LadderSet, Prize, Region, Resolution},
};

/// Column grouping rows into sessions.
pub const SESSION_COLUMN: &str = "url";
/// Column holding the prize value each question was played for.
pub const VALUE_COLUMN: &str = "value";
/// Column holding the broadcast date.
pub const AIR_DATE_COLUMN: &str = "air_date";

const DATE_FORMATS: [&str; 6] = [
  "%B %d, %Y",
  "%b %d, %Y",
  "%d %B %Y",
  "%d %b %Y",
  "%Y-%m-%d",
  "%m/%d/%Y",
];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizationReport {
  pub sessions:     usize,
  pub unique:       usize,
  pub tie_broken:   usize,
  pub unresolved:   usize,
  /// Sessions with a value cell that is not a prize.
  pub unparsable:   usize,
  /// Rows that received a difficulty.
  pub ranked_rows:  usize,
  /// Rows of unresolved sessions, left with no difficulty.
  pub cleared_rows: usize,
}

/// Assign each row of `table` its rung on the inferred ladder.
///
/// `region` is the edition the whole table was broadcast in. The rows'
/// `is_uk`/`is_usa` flags describe what a question is about, so they never
/// pick the ladder.
pub fn normalize_difficulty(
  table: &Table,
  ladders: &LadderSet,
  region: Region,
) -> (Table, NormalizationReport) {
  let mut records = table.records().to_vec();
  let mut report = NormalizationReport::default();

  for (key, rows) in sessions(&records) {
    report.sessions += 1;

    let values: Option<Vec<Prize>> = rows
      .iter()
      .map(|&i| records[i].extra.get(VALUE_COLUMN).and_then(|v| pubquiz_tsv::parse_prize(v)))
      .collect();
    let Some(values) = values else {
      tracing::warn!(session = %key, "session has an unparsable prize value");
      report.unparsable += 1;
      report.cleared_rows += clear(&mut records, &rows);
      continue;
    };

    let year = rows.iter().find_map(|&i| {
      records[i].extra.get(AIR_DATE_COLUMN).and_then(|d| air_year(d))
    });

    let resolution = ladders.classify(&values, year, region);
    let ranks = match &resolution {
      Resolution::Unique { ladder, ranks } => {
        tracing::debug!(session = %key, ladder = ladder.name(), "resolved ladder");
        report.unique += 1;
        ranks
      }
      Resolution::TieBroken { ladder, candidates, ranks } => {
        tracing::debug!(
          session = %key,
          ladder = ladder.name(),
          candidates = candidates.len(),
          "resolved ladder by tie-break"
        );
        report.tie_broken += 1;
        ranks
      }
      Resolution::Unresolved(reason) => {
        tracing::warn!(session = %key, ?year, ?region, ?reason, "unresolved session");
        report.unresolved += 1;
        report.cleared_rows += clear(&mut records, &rows);
        continue;
      }
    };

    for (&i, &rank) in rows.iter().zip(ranks) {
      records[i].difficulty = Some(rank);
      report.ranked_rows += 1;
    }
  }

  tracing::info!(
    sessions = report.sessions,
    unique = report.unique,
    tie_broken = report.tie_broken,
    unresolved = report.unresolved + report.unparsable,
    "normalized show difficulties"
  );

  (Table::from_parts(table.columns().to_vec(), records), report)
}

/// Group row indices by session key, in first-seen order. Rows without a
/// session key form a session of their own.
fn sessions(records: &[TriviaRecord]) -> Vec<(String, Vec<usize>)> {
  let mut order: Vec<(String, Vec<usize>)> = Vec::new();
  let mut position: HashMap<&str, usize> = HashMap::new();

  for (i, record) in records.iter().enumerate() {
    let Some(key) = record.extra.get(SESSION_COLUMN).map(String::as_str) else {
      order.push((record.uuid.clone(), vec![i]));
      continue;
    };
    match position.get(key) {
      Some(&p) => order[p].1.push(i),
      None => {
        position.insert(key, order.len());
        order.push((key.to_string(), vec![i]));
      }
    }
  }

  order
}

fn clear(records: &mut [TriviaRecord], rows: &[usize]) -> usize {
  for &i in rows {
    records[i].difficulty = None;
  }
  rows.len()
}

/// The year of an air date. Falls back to the first plausible four-digit
/// year in the text.
pub fn air_year(text: &str) -> Option<i32> {
  let text = text.trim();
  if let Some(date) = DATE_FORMATS
    .iter()
    .find_map(|f| NaiveDate::parse_from_str(text, f).ok())
  {
    return Some(date.year());
  }

  text
    .split(|c: char| !c.is_ascii_digit())
    .filter(|token| token.len() == 4)
    .filter_map(|token| token.parse::<i32>().ok())
    .find(|year| (1900..2100).contains(year))
}
