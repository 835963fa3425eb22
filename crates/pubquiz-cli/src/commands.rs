//! Subcommand implementations.

use std::{collections::BTreeSet, fs};

use anyhow::{Context as _, bail};
use pubquiz_core::{
  Ordinal,
  store::{RecordStore, SourceOutcome, SourceTable},
};
use pubquiz_round::{
  CategoryFilter, DifficultyFilter, QuizDump, RegionInclude, RoundCode,
  RoundKind, RoundRequest, RoundSampler, catalogue::ANY,
};
use pubquiz_store::{NormalizationReport, TsvStore};

use crate::{RoundArgs, config::AppConfig};

// ─── merge ───────────────────────────────────────────────────────────────────

pub fn merge(cfg: &AppConfig) -> anyhow::Result<()> {
  if cfg.sources.is_empty() {
    bail!("no sources configured");
  }

  let ladders = cfg.ladder_set();
  let mut incoming = Vec::with_capacity(cfg.sources.len());

  for source in &cfg.sources {
    let table = pubquiz_tsv::read_path(&source.path).with_context(|| {
      format!("failed to read source {:?} at {:?}", source.id, source.path)
    })?;

    let table = match source.ladder_region {
      Some(region) => {
        let (table, report) =
          pubquiz_store::normalize_difficulty(&table, &ladders, region);
        println!("{}: {}", source.id, normalization_summary(&report));
        table
      }
      None => table,
    };

    tracing::info!(source = %source.id, rows = table.len(), "read source table");
    incoming.push(SourceTable::new(source.id.clone(), table));
  }

  let mut store = TsvStore::open_or_init(&cfg.store_path).with_context(|| {
    format!("failed to open store at {:?}", cfg.store_path)
  })?;
  let report = store.merge(&incoming).context("merge failed")?;

  for outcome in &report.sources {
    if let SourceOutcome::Rejected { source_id, missing } = outcome {
      eprintln!("rejected {source_id}: missing {}", missing.join(", "));
    }
  }
  println!(
    "{} rows ({} added, {} duplicates, {} fields filled, {} incomplete dropped)",
    report.total_rows,
    report.added_rows,
    report.duplicate_rows,
    report.filled_fields,
    report.incomplete_rows,
  );
  Ok(())
}

fn normalization_summary(report: &NormalizationReport) -> String {
  format!(
    "{} sessions ({} unique, {} tie-broken, {} unresolved, {} unparsable), {} rows ranked, {} cleared",
    report.sessions,
    report.unique,
    report.tie_broken,
    report.unresolved,
    report.unparsable,
    report.ranked_rows,
    report.cleared_rows,
  )
}

// ─── round ───────────────────────────────────────────────────────────────────

pub fn round(cfg: &AppConfig, args: &RoundArgs) -> anyhow::Result<()> {
  let store = open(cfg)?;
  let table = store.table();

  let requests = if args.code.is_empty() {
    vec![request_from_flags(args)?]
  } else {
    let catalogue = pubquiz_round::catalogue(table);
    args
      .code
      .iter()
      .map(|code| {
        RoundCode::parse(code)
          .and_then(|c| c.to_request(&catalogue))
          .with_context(|| format!("invalid round code {code:?}"))
      })
      .collect::<anyhow::Result<Vec<_>>>()?
  };

  let mut sampler = match args.seed {
    Some(seed) => RoundSampler::seeded(seed),
    None => RoundSampler::from_os_rng(),
  };
  let kind = if args.binned { RoundKind::Ladder } else { RoundKind::Trivia };

  let mut quiz = QuizDump::new(args.title.clone(), args.author.clone());
  for request in &requests {
    let round = match kind {
      RoundKind::Trivia => sampler.select(table, request),
      RoundKind::Ladder => sampler.select_binned(table, request),
    };
    if round.is_short() {
      eprintln!(
        "round {}: only {} of {} questions available",
        quiz.rounds.len() + 1,
        round.records.len(),
        request.count,
      );
    }
    quiz.push_round(&round, kind);
  }

  let json = quiz.to_json().context("failed to serialise quiz")?;
  match &args.out {
    Some(path) => {
      fs::write(path, json).with_context(|| format!("failed to write {path:?}"))?;
      tracing::info!(path = %path.display(), rounds = quiz.rounds.len(), "wrote quiz");
    }
    None => println!("{json}"),
  }
  Ok(())
}

fn request_from_flags(args: &RoundArgs) -> anyhow::Result<RoundRequest> {
  let category = if args.category.eq_ignore_ascii_case(ANY) {
    CategoryFilter::Any
  } else {
    CategoryFilter::Named(args.category.clone())
  };

  let mut request = RoundRequest::new(category, args.count);
  request.regions = RegionInclude { uk: args.uk, usa: args.usa };
  request.allow_binary_choice = args.allow_binary;
  if !args.difficulty.is_empty() {
    let levels = args
      .difficulty
      .iter()
      .map(|d| parse_difficulty_arg(d))
      .collect::<anyhow::Result<BTreeSet<_>>>()?;
    request.difficulty = DifficultyFilter::Only(levels);
  }
  Ok(request)
}

fn parse_difficulty_arg(value: &str) -> anyhow::Result<Option<Ordinal>> {
  if matches!(value.to_ascii_lowercase().as_str(), "unknown" | "none" | "?") {
    return Ok(None);
  }
  match pubquiz_tsv::parse_difficulty(value) {
    Some(level) => Ok(Some(level)),
    None => bail!("invalid difficulty {value:?}"),
  }
}

// ─── categories / stats ──────────────────────────────────────────────────────

pub fn categories(cfg: &AppConfig) -> anyhow::Result<()> {
  let store = open(cfg)?;
  print!("{}", pubquiz_round::catalogue(store.table()));
  Ok(())
}

pub fn stats(cfg: &AppConfig) -> anyhow::Result<()> {
  let store = open(cfg)?;
  print!("{}", pubquiz_store::stats(store.table()));
  Ok(())
}

fn open(cfg: &AppConfig) -> anyhow::Result<TsvStore> {
  TsvStore::open(&cfg.store_path)
    .with_context(|| format!("failed to open store at {:?}", cfg.store_path))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn difficulty_arguments() {
    assert_eq!(parse_difficulty_arg("easy").unwrap(), Some(0));
    assert_eq!(parse_difficulty_arg("7").unwrap(), Some(7));
    assert_eq!(parse_difficulty_arg("Unknown").unwrap(), None);
    assert!(parse_difficulty_arg("tricky").is_err());
  }

  #[test]
  fn normalization_summary_counts_unresolved_sessions() {
    let report = NormalizationReport {
      sessions:     3,
      unique:       1,
      tie_broken:   0,
      unresolved:   1,
      unparsable:   1,
      ranked_rows:  4,
      cleared_rows: 6,
    };
    assert_eq!(
      normalization_summary(&report),
      "3 sessions (1 unique, 0 tie-broken, 1 unresolved, 1 unparsable), 4 rows ranked, 6 cleared"
    );
  }
}
