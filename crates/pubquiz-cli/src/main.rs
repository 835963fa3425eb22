//! pubquiz binary.
//!
//! Reads `pubquiz.toml` (or the path given with `--config`), then merges the
//! configured source tables into the canonical store or draws quiz rounds
//! from it.
//!
//! ```text
//! pubquiz merge
//! pubquiz categories
//! pubquiz round --code 0-10-KA --code 3-5-H --out quiz.json
//! pubquiz round --category history --count 8 --difficulty easy --seed 7
//! ```

mod commands;
mod config;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;

#[derive(Parser)]
#[command(author, version, about = "Pub quiz question bank")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "pubquiz.toml")]
  config: PathBuf,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Merge every configured source table into the canonical store.
  Merge,
  /// Draw one or more rounds and write them as a JSON quiz.
  Round(RoundArgs),
  /// List the selectable categories with their indices.
  Categories,
  /// Print row counts by domain, category and difficulty.
  Stats,
}

#[derive(Args)]
pub(crate) struct RoundArgs {
  /// Round code `<category>-<count>[-<flags>]`; repeat for several rounds.
  #[arg(long, conflicts_with_all = ["category", "count", "difficulty", "uk", "usa", "allow_binary"])]
  pub code: Vec<String>,

  /// Category name, or `any`.
  #[arg(long, default_value = "any")]
  pub category: String,

  #[arg(long, default_value_t = 10)]
  pub count: usize,

  /// Accepted difficulty (`0`, `easy`, `unknown`, ...); repeatable.
  #[arg(long)]
  pub difficulty: Vec<String>,

  /// Include UK-specific questions.
  #[arg(long)]
  pub uk: bool,

  /// Include USA-specific questions.
  #[arg(long)]
  pub usa: bool,

  /// Allow questions with a single wrong answer.
  #[arg(long)]
  pub allow_binary: bool,

  /// Draw one question per difficulty band, easiest first.
  #[arg(long)]
  pub binned: bool,

  /// Seed for reproducible draws.
  #[arg(long)]
  pub seed: Option<u64>,

  #[arg(long, default_value = "Pub quiz")]
  pub title: String,

  #[arg(long, default_value = "Quizmaster")]
  pub author: String,

  /// Write the quiz here instead of stdout.
  #[arg(short, long)]
  pub out: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
  // Initialise tracing. Logs go to stderr so stdout stays clean for output.
  tracing_subscriber::fmt()
    .with_writer(std::io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();
  let cfg = AppConfig::load(&cli.config)?;

  match cli.command {
    Command::Merge => commands::merge(&cfg),
    Command::Round(args) => commands::round(&cfg, &args),
    Command::Categories => commands::categories(&cfg),
    Command::Stats => commands::stats(&cfg),
  }
}
