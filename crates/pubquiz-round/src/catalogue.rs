//! The list of categories a quiz master can pick a round from.

use std::{collections::BTreeMap, fmt};

use pubquiz_core::Table;
use serde::Serialize;

use crate::request::CategoryFilter;

/// Name of the catalogue entry that matches every row.
pub const ANY: &str = "any";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogueEntry {
  pub name: String,
  pub rows: usize,
}

/// Entry 0 is always [`ANY`] with the table's total; the named categories
/// follow, sorted by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Catalogue {
  entries: Vec<CatalogueEntry>,
}

/// Count the rows of each display category of `table`. Rows without any
/// category are only reachable through [`ANY`].
pub fn catalogue(table: &Table) -> Catalogue {
  let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
  for record in table {
    let name = record.display_category().trim();
    if !name.is_empty() {
      *counts.entry(name).or_default() += 1;
    }
  }

  let any = CatalogueEntry { name: ANY.to_string(), rows: table.len() };
  let entries = std::iter::once(any)
    .chain(counts.into_iter().map(|(name, rows)| CatalogueEntry {
      name: name.to_string(),
      rows,
    }))
    .collect();
  Catalogue { entries }
}

impl Catalogue {
  pub fn entries(&self) -> &[CatalogueEntry] { &self.entries }

  pub fn len(&self) -> usize { self.entries.len() }

  pub fn is_empty(&self) -> bool { self.entries.is_empty() }

  pub fn get(&self, index: usize) -> Option<&CatalogueEntry> {
    self.entries.get(index)
  }

  /// The category filter selected by entry `index`.
  pub fn filter(&self, index: usize) -> Option<CategoryFilter> {
    match index {
      0 => Some(CategoryFilter::Any),
      i => self.get(i).map(|e| CategoryFilter::Named(e.name.clone())),
    }
  }
}

impl fmt::Display for Catalogue {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let width = self.entries.iter().map(|e| e.name.len()).max().unwrap_or(0);
    for (i, entry) in self.entries.iter().enumerate() {
      writeln!(f, "{i:>4}  {:<width$}  {:>6}", entry.name, entry.rows)?;
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use pubquiz_core::TriviaRecord;

  use super::*;

  #[test]
  fn any_first_then_sorted_categories() {
    let mut normalized = TriviaRecord::new("Q3", "a", "Round 2");
    normalized.normalized_category = Some("art|music".into());
    let table = Table::from_records(vec![
      TriviaRecord::new("Q1", "a", "science"),
      TriviaRecord::new("Q2", "a", "art"),
      normalized,
      TriviaRecord::new("Q4", "a", ""),
    ]);

    let c = catalogue(&table);
    let names: Vec<_> = c.entries().iter().map(|e| (e.name.as_str(), e.rows)).collect();
    assert_eq!(names, [("any", 4), ("art", 2), ("science", 1)]);
    assert_eq!(c.filter(0), Some(CategoryFilter::Any));
    assert_eq!(c.filter(2), Some(CategoryFilter::Named("science".into())));
    assert_eq!(c.filter(3), None);
  }

  #[test]
  fn empty_table_still_lists_any() {
    let c = catalogue(&Table::canonical());
    assert_eq!(c.len(), 1);
    assert_eq!(c.entries()[0].rows, 0);
  }
}
