//! The canonical column set and the validation every source table must pass
//! before it may enter the union store.

use md5::{Digest, Md5};

use crate::{Error, Result, table::Table};

// ─── Column names ────────────────────────────────────────────────────────────

/// Column names as they appear in the tab-separated tables.
pub mod column {
  pub const UUID: &str = "uuid";
  pub const QUESTION: &str = "question";
  pub const CORRECT_ANSWER: &str = "correct_answer";
  pub const WRONG_ANSWER_1: &str = "wrong_answers_1";
  pub const WRONG_ANSWER_2: &str = "wrong_answers_2";
  pub const WRONG_ANSWER_3: &str = "wrong_answers_3";
  pub const CATEGORY: &str = "category";
  pub const DIFFICULTY: &str = "difficulty";
  pub const DOMAIN: &str = "domain";
  pub const NORMALIZED_CATEGORY: &str = "o_category";
  pub const IS_UK: &str = "o_is_uk";
  pub const IS_USA: &str = "o_is_usa";
}

/// Columns a source table must expose (possibly all-null) to be merged.
pub const REQUIRED_COLUMNS: [&str; 8] = [
  column::UUID,
  column::QUESTION,
  column::CORRECT_ANSWER,
  column::WRONG_ANSWER_1,
  column::WRONG_ANSWER_2,
  column::WRONG_ANSWER_3,
  column::CATEGORY,
  column::DIFFICULTY,
];

/// Every column with a typed field on [`TriviaRecord`](crate::TriviaRecord),
/// in persisted order. Extra source columns follow these.
pub const CANONICAL_COLUMNS: [&str; 12] = [
  column::UUID,
  column::QUESTION,
  column::CORRECT_ANSWER,
  column::WRONG_ANSWER_1,
  column::WRONG_ANSWER_2,
  column::WRONG_ANSWER_3,
  column::CATEGORY,
  column::DIFFICULTY,
  column::DOMAIN,
  column::NORMALIZED_CATEGORY,
  column::IS_UK,
  column::IS_USA,
];

/// Maximum number of `|`-separated alternatives in a normalized category.
pub const MAX_CATEGORY_ALTERNATIVES: usize = 2;

pub fn is_canonical(name: &str) -> bool { CANONICAL_COLUMNS.contains(&name) }

// ─── Validation ──────────────────────────────────────────────────────────────

/// Check that `table` exposes every column in [`REQUIRED_COLUMNS`].
///
/// Columns may be entirely null; only their presence is checked. On failure
/// the error lists the missing columns in canonical order.
pub fn validate(source_id: &str, table: &Table) -> Result<()> {
  let missing = missing_columns(table);
  if missing.is_empty() {
    Ok(())
  } else {
    Err(Error::MissingColumns {
      source_id: source_id.to_string(),
      missing,
    })
  }
}

/// The required columns absent from `table`.
pub fn missing_columns(table: &Table) -> Vec<String> {
  REQUIRED_COLUMNS
    .iter()
    .filter(|c| !table.has_column(c))
    .map(|c| c.to_string())
    .collect()
}

// ─── Identity ────────────────────────────────────────────────────────────────

/// Stable identity for a question: MD5 of its UTF-8 text, hex-encoded.
pub fn content_id(question: &str) -> String {
  hex::encode(Md5::digest(question.as_bytes()))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn content_id_is_deterministic_and_fixed_width() {
    let a = content_id("What is the capital of France?");
    let b = content_id("What is the capital of France?");
    assert_eq!(a, b);
    assert_eq!(a.len(), 32);
    assert_ne!(a, content_id("What is the capital of Spain?"));
  }

  #[test]
  fn content_id_is_the_md5_hex_of_the_question() {
    assert_eq!(content_id("hello"), "5d41402abc4b2a76b9719d911017c592");
    assert_eq!(content_id(""), "d41d8cd98f00b204e9800998ecf8427e");
  }

  #[test]
  fn canonical_columns_start_with_required_columns() {
    for required in REQUIRED_COLUMNS {
      assert!(is_canonical(required), "{required} not canonical");
    }
  }

  #[test]
  fn validate_reports_every_missing_column() {
    let table = Table::with_columns(vec![
      column::UUID.to_string(),
      column::QUESTION.to_string(),
      column::CORRECT_ANSWER.to_string(),
      column::CATEGORY.to_string(),
    ]);
    let err = validate("opentdb", &table).unwrap_err();
    let Error::MissingColumns { source_id, missing } = err else {
      panic!("expected MissingColumns");
    };
    assert_eq!(source_id, "opentdb");
    assert_eq!(
      missing,
      ["wrong_answers_1", "wrong_answers_2", "wrong_answers_3", "difficulty"]
    );
  }

  #[test]
  fn validate_accepts_all_null_required_columns() {
    // Columns exist but the table is empty.
    let table = Table::canonical();
    assert!(validate("any", &table).is_ok());
  }
}
