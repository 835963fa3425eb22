//! Round codes: the compact form a quiz master types to request a round.
//!
//! `<category>-<count>[-<flags>]`, e.g. `3-10-KE`. `category` indexes the
//! [`Catalogue`]. Flags:
//!
//! | flag | meaning                                |
//! |------|----------------------------------------|
//! | `K`  | include UK-specific rows               |
//! | `A`  | include USA-specific rows              |
//! | `B`  | allow binary-choice rows               |
//! | `E`  | easy rows (difficulty 0)               |
//! | `M`  | medium rows (difficulty 1)             |
//! | `H`  | hard rows (difficulty 2)               |
//! | `U`  | rows of unknown difficulty             |
//!
//! Without any of `E`, `M`, `H`, `U` every difficulty is accepted.

use std::{collections::BTreeSet, str::FromStr};

use pubquiz_core::Ordinal;

use crate::{
  catalogue::Catalogue,
  error::{Result, RoundError},
  request::{DifficultyFilter, RegionInclude, RoundRequest},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundCode {
  pub category:            usize,
  pub count:               usize,
  pub regions:             RegionInclude,
  pub allow_binary_choice: bool,
  /// Empty when no difficulty flag was given.
  pub difficulties:        BTreeSet<Option<Ordinal>>,
}

impl FromStr for RoundCode {
  type Err = RoundError;

  fn from_str(code: &str) -> Result<Self> {
    let malformed = || RoundError::Malformed { code: code.to_string() };

    let mut parts = code.trim().split('-');
    let category = parts
      .next()
      .and_then(|p| p.trim().parse::<usize>().ok())
      .ok_or_else(malformed)?;
    let count = parts
      .next()
      .and_then(|p| p.trim().parse::<usize>().ok())
      .ok_or_else(malformed)?;
    let flags = parts.next().unwrap_or("").trim();
    if parts.next().is_some() {
      return Err(malformed());
    }
    if count == 0 {
      return Err(RoundError::ZeroCount);
    }

    let mut parsed = Self {
      category,
      count,
      regions: RegionInclude::default(),
      allow_binary_choice: false,
      difficulties: BTreeSet::new(),
    };
    for flag in flags.chars() {
      match flag.to_ascii_uppercase() {
        'K' => parsed.regions.uk = true,
        'A' => parsed.regions.usa = true,
        'B' => parsed.allow_binary_choice = true,
        'E' => {
          parsed.difficulties.insert(Some(0));
        }
        'M' => {
          parsed.difficulties.insert(Some(1));
        }
        'H' => {
          parsed.difficulties.insert(Some(2));
        }
        'U' => {
          parsed.difficulties.insert(None);
        }
        _ => return Err(RoundError::UnknownFlag(flag)),
      }
    }
    Ok(parsed)
  }
}

impl RoundCode {
  pub fn parse(code: &str) -> Result<Self> { code.parse() }

  /// Resolve the category index against `catalogue`.
  pub fn to_request(&self, catalogue: &Catalogue) -> Result<RoundRequest> {
    let category = catalogue.filter(self.category).ok_or(
      RoundError::UnknownCategory {
        index:     self.category,
        available: catalogue.len(),
      },
    )?;

    let mut request = RoundRequest::new(category, self.count);
    request.regions = self.regions;
    request.allow_binary_choice = self.allow_binary_choice;
    if !self.difficulties.is_empty() {
      request.difficulty = DifficultyFilter::Only(self.difficulties.clone());
    }
    Ok(request)
  }
}
