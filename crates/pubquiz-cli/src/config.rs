//! Application configuration: a TOML file layered under `PUBQUIZ_*`
//! environment variables.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use pubquiz_core::ladder::{LadderSet, Region};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
  /// Where the canonical table is kept.
  #[serde(default = "default_store_path")]
  pub store_path: PathBuf,
  /// Source tables merged by `pubquiz merge`, in precedence order.
  #[serde(default)]
  pub sources:    Vec<SourceConfig>,
  /// Replaces the built-in prize ladders when present.
  #[serde(default)]
  pub ladders:    Option<LadderSet>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
  pub id:            String,
  pub path:          PathBuf,
  /// Set for sources whose difficulty comes from the prize ladder; sessions
  /// without a region flag are classified under this region.
  #[serde(default)]
  pub ladder_region: Option<Region>,
}

fn default_store_path() -> PathBuf { PathBuf::from("cache/pubquiz.tsv") }

impl AppConfig {
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    let settings = config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("PUBQUIZ"))
      .build()
      .context("failed to read config file")?;

    let mut cfg: AppConfig = settings
      .try_deserialize()
      .context("failed to deserialise AppConfig")?;

    cfg.store_path = expand_tilde(&cfg.store_path);
    for source in &mut cfg.sources {
      source.path = expand_tilde(&source.path);
    }
    Ok(cfg)
  }

  pub fn ladder_set(&self) -> LadderSet {
    self.ladders.clone().unwrap_or_default()
  }
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
