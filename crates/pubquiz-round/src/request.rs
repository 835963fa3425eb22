//! [`RoundRequest`] and the row predicate it defines.

use std::collections::BTreeSet;

use pubquiz_core::{Ordinal, Table, TriviaRecord};
use serde::{Deserialize, Serialize};

/// Which category rows must belong to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryFilter {
  #[default]
  Any,
  /// Matched against [`TriviaRecord::display_category`].
  Named(String),
}

impl CategoryFilter {
  pub fn matches(&self, record: &TriviaRecord) -> bool {
    match self {
      Self::Any => true,
      Self::Named(name) => record.display_category().trim() == name.as_str(),
    }
  }
}

/// Which difficulties are acceptable. `None` inside the set matches rows of
/// unknown difficulty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyFilter {
  #[default]
  Any,
  Only(BTreeSet<Option<Ordinal>>),
}

impl DifficultyFilter {
  pub fn matches(&self, difficulty: Option<Ordinal>) -> bool {
    match self {
      Self::Any => true,
      Self::Only(set) => set.contains(&difficulty),
    }
  }
}

/// Opt-ins for region-specific rows. Rows not flagged for a region always
/// pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionInclude {
  pub uk:  bool,
  pub usa: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundRequest {
  /// Compared with each row's display category: the primary alternative of
  /// its normalized category, else its source label. A row whose raw
  /// `category` names the request but whose normalized category differs
  /// does not match.
  pub category:            CategoryFilter,
  pub count:               usize,
  pub difficulty:          DifficultyFilter,
  pub regions:             RegionInclude,
  /// Admit rows with exactly one wrong answer.
  pub allow_binary_choice: bool,
}

impl RoundRequest {
  /// A request for `count` rows from `category`, with no difficulty
  /// restriction, no region-specific rows and no binary-choice rows.
  pub fn new(category: CategoryFilter, count: usize) -> Self {
    Self {
      category,
      count,
      difficulty: DifficultyFilter::Any,
      regions: RegionInclude::default(),
      allow_binary_choice: false,
    }
  }

  pub fn accepts(&self, record: &TriviaRecord) -> bool {
    self.difficulty.matches(record.difficulty)
      && self.category.matches(record)
      && (self.allow_binary_choice || !record.is_binary_choice())
      && (self.regions.usa || record.region.is_usa != Some(true))
      && (self.regions.uk || record.region.is_uk != Some(true))
  }
}

/// Indices of the rows of `table` that `request` accepts, in table order.
pub fn eligible_indices(table: &Table, request: &RoundRequest) -> Vec<usize> {
  table
    .iter()
    .enumerate()
    .filter(|(_, record)| request.accepts(record))
    .map(|(i, _)| i)
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  fn row(question: &str, category: &str, difficulty: Option<Ordinal>) -> TriviaRecord {
    let mut r = TriviaRecord::new(question, "a", category);
    r.wrong_answers = [Some("b".into()), Some("c".into()), Some("d".into())];
    r.difficulty = difficulty;
    r
  }

  #[test]
  fn predicate_checks_every_condition() {
    let mut binary = row("Binary?", "Art", Some(1));
    binary.wrong_answers = [Some("b".into()), None, None];
    let mut usa = row("Usa?", "Art", Some(1));
    usa.region.is_usa = Some(true);
    let mut not_uk = row("Not uk?", "Art", Some(1));
    not_uk.region.is_uk = Some(false);

    let table = Table::from_records(vec![
      row("Plain?", "Art", Some(1)),
      row("Other category?", "Music", Some(1)),
      row("Too hard?", "Art", Some(2)),
      binary,
      usa,
      not_uk,
    ]);

    let mut request = RoundRequest::new(CategoryFilter::Named("Art".into()), 10);
    request.difficulty = DifficultyFilter::Only(BTreeSet::from([Some(0), Some(1)]));

    assert_eq!(eligible_indices(&table, &request), [0, 5]);

    request.allow_binary_choice = true;
    request.regions.usa = true;
    assert_eq!(eligible_indices(&table, &request), [0, 3, 4, 5]);
  }

  #[test]
  fn unknown_difficulty_is_its_own_value() {
    let table = Table::from_records(vec![
      row("Known?", "Art", Some(0)),
      row("Unknown?", "Art", None),
    ]);
    let mut request = RoundRequest::new(CategoryFilter::Any, 10);

    request.difficulty = DifficultyFilter::Only(BTreeSet::from([None]));
    assert_eq!(eligible_indices(&table, &request), [1]);

    request.difficulty = DifficultyFilter::Only(BTreeSet::from([Some(0)]));
    assert_eq!(eligible_indices(&table, &request), [0]);

    request.difficulty = DifficultyFilter::Any;
    assert_eq!(eligible_indices(&table, &request), [0, 1]);
  }

  #[test]
  fn named_category_uses_primary_normalized_category() {
    let mut r = row("Normalized?", "Round 3", None);
    r.normalized_category = Some("history|politics".into());
    let table = Table::from_records(vec![r]);

    let request = RoundRequest::new(CategoryFilter::Named("history".into()), 1);
    assert_eq!(eligible_indices(&table, &request), [0]);

    let request = RoundRequest::new(CategoryFilter::Named("Round 3".into()), 1);
    assert!(eligible_indices(&table, &request).is_empty());
  }

  #[test]
  fn named_category_falls_back_to_source_label() {
    let mut normalized = row("Normalized?", "Art", None);
    normalized.normalized_category = Some("history".into());
    let table = Table::from_records(vec![normalized, row("Raw?", "Art", None)]);

    let request = RoundRequest::new(CategoryFilter::Named("Art".into()), 5);
    let picked = eligible_indices(&table, &request);
    assert_eq!(picked, [1]);
    for i in picked {
      let record = table.get(i).unwrap();
      assert_eq!(record.display_category(), "Art");
      assert!(record.normalized_category.is_none());
    }
  }
}
