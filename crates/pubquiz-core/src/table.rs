//! [`Table`] is an ordered header plus the records decoded under it.
//!
//! The header is kept separately from the records so schema validation can
//! tell a column that is absent from one that is present but entirely null.

use crate::{TriviaRecord, schema::CANONICAL_COLUMNS};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
  columns: Vec<String>,
  records: Vec<TriviaRecord>,
}

impl Table {
  /// An empty table with the given header.
  pub fn with_columns(columns: Vec<String>) -> Self {
    Self { columns, records: Vec::new() }
  }

  /// An empty table with every canonical column.
  pub fn canonical() -> Self {
    Self::with_columns(CANONICAL_COLUMNS.iter().map(|c| c.to_string()).collect())
  }

  /// Build a table from records, using the canonical header followed by the
  /// extra columns the records carry, in first-seen order.
  pub fn from_records(records: Vec<TriviaRecord>) -> Self {
    let mut table = Self::canonical();
    for record in records {
      table.push(record);
    }
    table
  }

  /// Build a table from an explicit header and records. Extra columns the
  /// records carry but the header lacks are appended.
  pub fn from_parts(columns: Vec<String>, records: Vec<TriviaRecord>) -> Self {
    let mut table = Self::with_columns(columns);
    for record in records {
      table.push(record);
    }
    table
  }

  pub fn columns(&self) -> &[String] { &self.columns }

  pub fn records(&self) -> &[TriviaRecord] { &self.records }

  pub fn into_records(self) -> Vec<TriviaRecord> { self.records }

  pub fn len(&self) -> usize { self.records.len() }

  pub fn is_empty(&self) -> bool { self.records.is_empty() }

  pub fn get(&self, index: usize) -> Option<&TriviaRecord> {
    self.records.get(index)
  }

  pub fn iter(&self) -> std::slice::Iter<'_, TriviaRecord> {
    self.records.iter()
  }

  pub fn has_column(&self, name: &str) -> bool {
    self.columns.iter().any(|c| c == name)
  }

  /// Append a record, extending the header with any extra column it carries.
  pub fn push(&mut self, record: TriviaRecord) {
    for key in record.extra.keys() {
      self.add_column(key);
    }
    self.records.push(record);
  }

  /// Append `name` to the header if absent.
  pub fn add_column(&mut self, name: &str) {
    if !self.has_column(name) {
      self.columns.push(name.to_string());
    }
  }

  /// The same records under a header that starts with every canonical
  /// column, followed by this table's other columns in their current order.
  pub fn with_canonical_columns(&self) -> Self {
    Self {
      columns: self.canonical_header(),
      records: self.records.clone(),
    }
  }

  /// Every canonical column, then this table's other columns in order.
  pub fn canonical_header(&self) -> Vec<String> {
    let mut columns: Vec<String> =
      CANONICAL_COLUMNS.iter().map(|c| c.to_string()).collect();
    for column in &self.columns {
      if !columns.contains(column) {
        columns.push(column.clone());
      }
    }
    columns
  }

  /// Columns that are not canonical, in header order.
  pub fn extra_columns(&self) -> impl Iterator<Item = &str> {
    self
      .columns
      .iter()
      .map(String::as_str)
      .filter(|c| !CANONICAL_COLUMNS.contains(c))
  }
}

impl<'a> IntoIterator for &'a Table {
  type Item = &'a TriviaRecord;
  type IntoIter = std::slice::Iter<'a, TriviaRecord>;

  fn into_iter(self) -> Self::IntoIter { self.records.iter() }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::schema::column;

  #[test]
  fn from_records_appends_extra_columns_in_first_seen_order() {
    let mut a = TriviaRecord::new("Q1", "A1", "cat");
    a.extra.insert("value".into(), "100".into());
    let mut b = TriviaRecord::new("Q2", "A2", "cat");
    b.extra.insert("air_date".into(), "2001".into());
    b.extra.insert("value".into(), "200".into());

    let table = Table::from_records(vec![a, b]);
    let extras: Vec<&str> = table.extra_columns().collect();
    assert_eq!(extras, ["value", "air_date"]);
    assert_eq!(table.columns()[0], column::UUID);
    assert_eq!(table.len(), 2);
  }

  #[test]
  fn with_canonical_columns_keeps_source_extras() {
    let table = Table::with_columns(vec![
      "url".to_string(),
      column::QUESTION.to_string(),
    ]);
    let widened = table.with_canonical_columns();
    assert!(widened.has_column(column::DOMAIN));
    assert_eq!(widened.columns().last().map(String::as_str), Some("url"));
    assert_eq!(widened.columns().iter().filter(|c| *c == "question").count(), 1);
  }
}
