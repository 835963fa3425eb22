//! [`TriviaRecord`] is the canonical unit every source is normalised into.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::schema::{self, MAX_CATEGORY_ALTERNATIVES};

/// Difficulty rank. Small values are easier; the meaning of a given value is
/// relative to the store it lives in.
pub type Ordinal = u32;

// ─── Region ──────────────────────────────────────────────────────────────────

/// Tri-state cultural-origin tags. `None` means unknown, never `false`.
#[derive(
  Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
pub struct RegionFlags {
  pub is_uk:  Option<bool>,
  pub is_usa: Option<bool>,
}

// ─── Record ──────────────────────────────────────────────────────────────────

/// One trivia question in canonical form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriviaRecord {
  /// Content-derived identity; the deduplication key.
  pub uuid:                String,
  pub question:            String,
  pub correct_answer:      String,
  /// Up to three distractors. Free-response questions have none.
  pub wrong_answers:       [Option<String>; 3],
  /// Source-native category label.
  pub category:            String,
  pub difficulty:          Option<Ordinal>,
  /// Name of the source adapter the record came from.
  pub domain:              Option<String>,
  pub region:              RegionFlags,
  /// Coarse cross-source category, at most two `|`-separated alternatives.
  pub normalized_category: Option<String>,
  /// Source-specific columns, carried through untouched.
  #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
  pub extra:               BTreeMap<String, String>,
}

impl TriviaRecord {
  /// A record with its identity derived from `question`.
  pub fn new(
    question: impl Into<String>,
    correct_answer: impl Into<String>,
    category: impl Into<String>,
  ) -> Self {
    let question = question.into();
    Self {
      uuid: schema::content_id(&question),
      question,
      correct_answer: correct_answer.into(),
      category: category.into(),
      ..Self::default()
    }
  }

  pub fn wrong_answer_count(&self) -> usize {
    self.wrong_answers.iter().filter(|w| w.is_some()).count()
  }

  /// True/false style questions: exactly one distractor.
  pub fn is_binary_choice(&self) -> bool { self.wrong_answer_count() == 1 }

  /// Rows that may be persisted in the canonical table.
  pub fn is_complete(&self) -> bool {
    !self.question.trim().is_empty() && !self.correct_answer.trim().is_empty()
  }

  /// The first alternative of the normalized category, if any.
  pub fn primary_category(&self) -> Option<&str> {
    self
      .normalized_category
      .as_deref()
      .and_then(|c| c.split('|').next())
      .map(str::trim)
      .filter(|c| !c.is_empty())
  }

  /// `false` when the normalized category carries more alternatives than
  /// allowed. An absent category is valid.
  pub fn has_valid_normalized_category(&self) -> bool {
    self
      .normalized_category
      .as_deref()
      .is_none_or(|c| c.split('|').count() <= MAX_CATEGORY_ALTERNATIVES)
  }

  /// The category used when grouping across sources: the primary normalized
  /// category, falling back to the source-native label.
  pub fn display_category(&self) -> &str {
    self.primary_category().unwrap_or(&self.category)
  }

  /// Fill every `None` field on `self` from `other`. Fields already set are
  /// kept; the identity is never touched.
  ///
  /// Returns the number of fields filled.
  pub fn fill_nulls_from(&mut self, other: &TriviaRecord) -> usize {
    let mut filled = 0;

    filled += fill_str(&mut self.question, &other.question);
    filled += fill_str(&mut self.correct_answer, &other.correct_answer);
    filled += fill_str(&mut self.category, &other.category);
    for (mine, theirs) in self.wrong_answers.iter_mut().zip(&other.wrong_answers) {
      filled += fill(mine, theirs);
    }
    filled += fill(&mut self.difficulty, &other.difficulty);
    filled += fill(&mut self.domain, &other.domain);
    filled += fill(&mut self.region.is_uk, &other.region.is_uk);
    filled += fill(&mut self.region.is_usa, &other.region.is_usa);
    filled += fill(&mut self.normalized_category, &other.normalized_category);

    for (key, value) in &other.extra {
      if !self.extra.contains_key(key) {
        self.extra.insert(key.clone(), value.clone());
        filled += 1;
      }
    }

    filled
  }
}

fn fill<T: Clone>(mine: &mut Option<T>, theirs: &Option<T>) -> usize {
  if mine.is_none() && theirs.is_some() {
    mine.clone_from(theirs);
    1
  } else {
    0
  }
}

/// Required text fields use the empty string as their null.
fn fill_str(mine: &mut String, theirs: &str) -> usize {
  if mine.is_empty() && !theirs.is_empty() {
    theirs.clone_into(mine);
    1
  } else {
    0
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn record() -> TriviaRecord {
    TriviaRecord::new("Which planet is known as the red planet?", "Mars", "Science")
  }

  #[test]
  fn new_derives_uuid_from_question() {
    let r = record();
    assert_eq!(r.uuid, schema::content_id(&r.question));
  }

  #[test]
  fn binary_choice_needs_exactly_one_distractor() {
    let mut r = record();
    assert!(!r.is_binary_choice());

    r.wrong_answers[0] = Some("Venus".into());
    assert!(r.is_binary_choice());

    r.wrong_answers[2] = Some("Jupiter".into());
    assert!(!r.is_binary_choice());
    assert_eq!(r.wrong_answer_count(), 2);
  }

  #[test]
  fn primary_category_takes_first_alternative() {
    let mut r = record();
    assert_eq!(r.primary_category(), None);

    r.normalized_category = Some("science|history".into());
    assert_eq!(r.primary_category(), Some("science"));
    assert_eq!(r.display_category(), "science");
    assert!(r.has_valid_normalized_category());

    r.normalized_category = Some("science|history|art".into());
    assert!(!r.has_valid_normalized_category());
  }

  #[test]
  fn display_category_falls_back_to_source_label() {
    assert_eq!(record().display_category(), "Science");
  }

  #[test]
  fn fill_keeps_existing_values() {
    let mut kept = record();
    kept.difficulty = Some(1);
    kept.extra.insert("url".into(), "a".into());

    let mut dup = record();
    dup.difficulty = Some(2);
    dup.normalized_category = Some("science".into());
    dup.region.is_uk = Some(false);
    dup.extra.insert("url".into(), "b".into());
    dup.extra.insert("air_date".into(), "2001".into());

    let filled = kept.fill_nulls_from(&dup);
    assert_eq!(filled, 3);
    assert_eq!(kept.difficulty, Some(1));
    assert_eq!(kept.normalized_category.as_deref(), Some("science"));
    assert_eq!(kept.region.is_uk, Some(false));
    assert_eq!(kept.region.is_usa, None);
    assert_eq!(kept.extra["url"], "a");
    assert_eq!(kept.extra["air_date"], "2001");
  }

  #[test]
  fn incomplete_records_are_detected() {
    let mut r = record();
    assert!(r.is_complete());
    r.correct_answer = "  ".into();
    assert!(!r.is_complete());
  }
}
