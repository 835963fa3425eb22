//! Summary counts over a canonical table.

use std::{collections::BTreeMap, fmt};

use pubquiz_core::{Ordinal, Table};

/// Row counts by domain and by display category × difficulty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stats {
  pub total:      usize,
  pub by_domain:  BTreeMap<String, usize>,
  /// `None` difficulty counts rows whose difficulty is unknown.
  pub crosstab:   BTreeMap<String, BTreeMap<Option<Ordinal>, usize>>,
  pub difficulty: BTreeMap<Option<Ordinal>, usize>,
}

pub fn stats(table: &Table) -> Stats {
  let mut stats = Stats { total: table.len(), ..Stats::default() };

  for record in table {
    let domain = record.domain.clone().unwrap_or_default();
    *stats.by_domain.entry(domain).or_default() += 1;
    *stats
      .crosstab
      .entry(record.display_category().to_string())
      .or_default()
      .entry(record.difficulty)
      .or_default() += 1;
    *stats.difficulty.entry(record.difficulty).or_default() += 1;
  }

  stats
}

fn label(difficulty: Option<Ordinal>) -> String {
  difficulty.map_or_else(|| "?".to_string(), |d| d.to_string())
}

impl fmt::Display for Stats {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    writeln!(f, "rows: {}", self.total)?;

    writeln!(f)?;
    writeln!(f, "| domain | rows |")?;
    writeln!(f, "|---|---:|")?;
    for (domain, n) in &self.by_domain {
      let domain = if domain.is_empty() { "?" } else { domain };
      writeln!(f, "| {domain} | {n} |")?;
    }

    let levels: Vec<Option<Ordinal>> = self.difficulty.keys().copied().collect();
    writeln!(f)?;
    write!(f, "| category |")?;
    for level in &levels {
      write!(f, " {} |", label(*level))?;
    }
    writeln!(f, " total |")?;
    write!(f, "|---|")?;
    for _ in &levels {
      write!(f, "---:|")?;
    }
    writeln!(f, "---:|")?;

    for (category, row) in &self.crosstab {
      write!(f, "| {category} |")?;
      for level in &levels {
        write!(f, " {} |", row.get(level).copied().unwrap_or(0))?;
      }
      writeln!(f, " {} |", row.values().sum::<usize>())?;
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use pubquiz_core::TriviaRecord;

  use super::*;

  fn row(question: &str, domain: &str, category: &str, difficulty: Option<Ordinal>) -> TriviaRecord {
    let mut r = TriviaRecord::new(question, "a", category);
    r.domain = Some(domain.into());
    r.difficulty = difficulty;
    r
  }

  #[test]
  fn counts_by_domain_and_category() {
    let mut normalized = row("Q3", "show", "Round 1", Some(3));
    normalized.normalized_category = Some("history|politics".into());
    let table = Table::from_records(vec![
      row("Q1", "opentdb", "History", Some(0)),
      row("Q2", "opentdb", "History", None),
      normalized,
    ]);

    let s = stats(&table);
    assert_eq!(s.total, 3);
    assert_eq!(s.by_domain["opentdb"], 2);
    assert_eq!(s.by_domain["show"], 1);
    assert_eq!(s.crosstab["History"][&Some(0)], 1);
    assert_eq!(s.crosstab["History"][&None], 1);
    assert_eq!(s.crosstab["history"][&Some(3)], 1);
  }

  #[test]
  fn renders_markdown_tables() {
    let table = Table::from_records(vec![row("Q1", "opentdb", "Art", Some(1))]);
    let text = stats(&table).to_string();
    assert!(text.starts_with("rows: 1\n"));
    assert!(text.contains("| opentdb | 1 |"));
    assert!(text.contains("| category | 1 | total |"));
    assert!(text.contains("| Art | 1 | 1 |"));
  }
}
