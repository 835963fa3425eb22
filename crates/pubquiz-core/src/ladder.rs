//! Prize-ladder difficulty classifier.
//!
//! The historical quiz show paid a fixed sequence of 15 prize values per
//! game, and that sequence changed with region and era. Each question only
//! records the value it was played for, so the ladder in use has to be
//! inferred from every value a contestant saw before a value can be turned
//! into a rank.
//!
//! Pipeline:
//!   (values, year, region)
//!     └─ eligible ladders  (region + validity window, plus the rounded fallback)
//!          └─ matching     (every value contained in the ladder)
//!               └─ tie-break (highest floor, then declaration order)
//!                    └─ ranks

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::{Error, Ordinal, Result};

/// Number of rungs on every ladder.
pub const LADDER_LEN: usize = 15;

/// Prize value in the show's currency unit.
pub type Prize = u64;

// ─── Region ──────────────────────────────────────────────────────────────────

/// Broadcast region of a session: the primary (US) or secondary (UK) edition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
  Us,
  Uk,
}

impl std::str::FromStr for Region {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_ascii_lowercase().as_str() {
      "us" | "usa" | "primary" => Ok(Self::Us),
      "uk" | "secondary" => Ok(Self::Uk),
      other => Err(format!("unknown region: {other:?}")),
    }
  }
}

// ─── Ladder ──────────────────────────────────────────────────────────────────

/// Serialised form of a [`Ladder`], validated on conversion.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LadderSpec {
  pub name:        String,
  /// `None` marks a region-agnostic ladder, eligible for every session.
  #[serde(default)]
  pub region:      Option<Region>,
  #[serde(default)]
  pub valid_from:  Option<i32>,
  #[serde(default)]
  pub valid_until: Option<i32>,
  pub values:      Vec<Prize>,
}

/// One historical pay scale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "LadderSpec", into = "LadderSpec")]
pub struct Ladder {
  name:        String,
  region:      Option<Region>,
  valid_from:  Option<i32>,
  valid_until: Option<i32>,
  values:      [Prize; LADDER_LEN],
  set:         BTreeSet<Prize>,
}

impl Ladder {
  /// Values must number exactly [`LADDER_LEN`] and never decrease. Equal
  /// neighbours are allowed (a threshold repeated across two rungs).
  pub fn new(
    name: impl Into<String>,
    region: Option<Region>,
    valid_from: Option<i32>,
    valid_until: Option<i32>,
    values: &[Prize],
  ) -> Result<Self> {
    let name = name.into();
    let values: [Prize; LADDER_LEN] =
      values.try_into().map_err(|_| Error::LadderLength {
        name:     name.clone(),
        expected: LADDER_LEN,
        actual:   values.len(),
      })?;
    if let Some(position) = values.windows(2).position(|w| w[1] < w[0]) {
      return Err(Error::LadderOrder { name, position: position + 1 });
    }
    Ok(Self {
      name,
      region,
      valid_from,
      valid_until,
      set: values.iter().copied().collect(),
      values,
    })
  }

  pub fn name(&self) -> &str { &self.name }

  pub fn region(&self) -> Option<Region> { self.region }

  pub fn values(&self) -> &[Prize; LADDER_LEN] { &self.values }

  /// The lowest rung.
  pub fn floor(&self) -> Prize { self.values[0] }

  pub fn contains(&self, value: Prize) -> bool { self.set.contains(&value) }

  /// 0-based index of the first rung paying `value`.
  pub fn rank_of(&self, value: Prize) -> Option<Ordinal> {
    self
      .values
      .iter()
      .position(|v| *v == value)
      .and_then(|i| Ordinal::try_from(i).ok())
  }

  /// Whether this ladder may have produced a session from `region` in `year`.
  pub fn is_eligible(&self, year: Option<i32>, region: Region) -> bool {
    let Some(own) = self.region else {
      return true;
    };
    if own != region {
      return false;
    }
    let Some(year) = year else {
      return true;
    };
    self.valid_from.is_none_or(|from| year >= from)
      && self.valid_until.is_none_or(|until| year <= until)
  }

  fn matches(&self, values: &[Prize]) -> bool {
    values.iter().all(|v| self.contains(*v))
  }
}

impl TryFrom<LadderSpec> for Ladder {
  type Error = Error;

  fn try_from(spec: LadderSpec) -> Result<Self> {
    Ladder::new(
      spec.name,
      spec.region,
      spec.valid_from,
      spec.valid_until,
      &spec.values,
    )
  }
}

impl From<Ladder> for LadderSpec {
  fn from(ladder: Ladder) -> Self {
    LadderSpec {
      name:        ladder.name,
      region:      ladder.region,
      valid_from:  ladder.valid_from,
      valid_until: ladder.valid_until,
      values:      ladder.values.to_vec(),
    }
  }
}

// ─── Resolution ──────────────────────────────────────────────────────────────

/// Why a session could not be ranked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unresolved {
  /// The session had no values to classify.
  NoValues,
  /// No ladder is eligible for the session's region and year.
  NoEligibleLadder,
  /// Ladders were eligible but none contains every observed value.
  NoMatch { eligible: usize },
}

/// Outcome of [`LadderSet::classify`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution<'a> {
  /// Exactly one eligible ladder contains every value.
  Unique {
    ladder: &'a Ladder,
    ranks:  Vec<Ordinal>,
  },
  /// Several ladders matched; `ladder` won the tie-break over `candidates`
  /// (which includes the winner).
  TieBroken {
    ladder:     &'a Ladder,
    candidates: Vec<&'a Ladder>,
    ranks:      Vec<Ordinal>,
  },
  Unresolved(Unresolved),
}

impl<'a> Resolution<'a> {
  pub fn ladder(&self) -> Option<&'a Ladder> {
    match self {
      Self::Unique { ladder, .. } | Self::TieBroken { ladder, .. } => {
        Some(*ladder)
      }
      Self::Unresolved(_) => None,
    }
  }

  /// One rank per classified value, or `None` when unresolved.
  pub fn ranks(&self) -> Option<&[Ordinal]> {
    match self {
      Self::Unique { ranks, .. } | Self::TieBroken { ranks, .. } => {
        Some(ranks.as_slice())
      }
      Self::Unresolved(_) => None,
    }
  }

  pub fn is_resolved(&self) -> bool { !matches!(self, Self::Unresolved(_)) }
}

// ─── LadderSet ───────────────────────────────────────────────────────────────

/// The candidate ladders, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LadderSet {
  ladders: Vec<Ladder>,
}

impl LadderSet {
  pub fn new(ladders: Vec<Ladder>) -> Self { Self { ladders } }

  pub fn ladders(&self) -> &[Ladder] { &self.ladders }

  /// Infer the ladder that produced `values` and rank each value on it.
  pub fn classify(
    &self,
    values: &[Prize],
    year: Option<i32>,
    region: Region,
  ) -> Resolution<'_> {
    if values.is_empty() {
      return Resolution::Unresolved(Unresolved::NoValues);
    }

    let eligible: Vec<&Ladder> = self
      .ladders
      .iter()
      .filter(|l| l.is_eligible(year, region))
      .collect();
    if eligible.is_empty() {
      return Resolution::Unresolved(Unresolved::NoEligibleLadder);
    }

    let candidates: Vec<&Ladder> =
      eligible.iter().copied().filter(|l| l.matches(values)).collect();

    // Highest floor wins; the first declared wins among equal floors.
    let Some(winner) = candidates
      .iter()
      .copied()
      .reduce(|best, l| if l.floor() > best.floor() { l } else { best })
    else {
      return Resolution::Unresolved(Unresolved::NoMatch {
        eligible: eligible.len(),
      });
    };

    let ranks = values
      .iter()
      .filter_map(|v| winner.rank_of(*v))
      .collect::<Vec<_>>();

    if candidates.len() == 1 {
      Resolution::Unique { ladder: winner, ranks }
    } else {
      Resolution::TieBroken { ladder: winner, candidates, ranks }
    }
  }
}

impl Default for LadderSet {
  /// The known pay scales of the US and UK editions, plus a rounded
  /// region-agnostic fallback.
  fn default() -> Self {
    const CLASSIC: [Prize; LADDER_LEN] = [
      100, 200, 300, 500, 1_000, 2_000, 4_000, 8_000, 16_000, 32_000, 64_000,
      125_000, 250_000, 500_000, 1_000_000,
    ];
    let builtin: [(&str, Option<Region>, Option<i32>, Option<i32>, [Prize; LADDER_LEN]); 6] = [
      ("us-classic", Some(Region::Us), Some(1999), Some(2004), CLASSIC),
      (
        "us-syndicated-2004",
        Some(Region::Us),
        Some(2004),
        Some(2008),
        [
          100, 200, 300, 500, 1_000, 2_000, 4_000, 8_000, 16_000, 25_000,
          50_000, 100_000, 250_000, 500_000, 1_000_000,
        ],
      ),
      (
        "us-syndicated-2008",
        Some(Region::Us),
        Some(2008),
        Some(2010),
        [
          500, 1_000, 2_000, 3_000, 5_000, 7_500, 10_000, 12_500, 15_000,
          25_000, 50_000, 100_000, 250_000, 500_000, 1_000_000,
        ],
      ),
      ("uk-classic", Some(Region::Uk), Some(1998), Some(2007), CLASSIC),
      ("uk-revival", Some(Region::Uk), Some(2018), None, CLASSIC),
      (
        "rounded",
        None,
        None,
        None,
        [
          100, 200, 300, 500, 1_000, 2_000, 4_000, 8_000, 15_000, 25_000,
          50_000, 100_000, 250_000, 500_000, 1_000_000,
        ],
      ),
    ];

    let ladders = builtin
      .into_iter()
      .map(|(name, region, from, until, values)| Ladder {
        name: name.to_string(),
        region,
        valid_from: from,
        valid_until: until,
        set: values.iter().copied().collect(),
        values,
      })
      .collect();
    Self { ladders }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn ladder(name: &str, floor: Prize, region: Option<Region>) -> Ladder {
    let mut values = [0; LADDER_LEN];
    values[0] = floor;
    values[1] = 999.max(floor);
    values[2] = 1_000.max(floor);
    for (i, v) in values.iter_mut().enumerate().skip(3) {
      *v = 2_000 * (i as Prize - 2);
    }
    Ladder::new(name, region, None, None, &values).unwrap()
  }

  #[test]
  fn classic_values_in_2002_resolve_deterministically() {
    let set = LadderSet::default();
    let values = [100, 200, 300, 500, 1_000];

    let first = set.classify(&values, Some(2002), Region::Us);
    for _ in 0..10 {
      assert_eq!(set.classify(&values, Some(2002), Region::Us), first);
    }
    assert_eq!(first.ladder().map(Ladder::name), Some("us-classic"));
    assert_eq!(first.ranks(), Some(&[0, 1, 2, 3, 4][..]));
    // The rounded fallback shares the floor, so this is a tie-break.
    let Resolution::TieBroken { candidates, .. } = &first else {
      panic!("expected a tie-break, got {first:?}");
    };
    let names: Vec<&str> = candidates.iter().map(|l| l.name()).collect();
    assert_eq!(names, ["us-classic", "rounded"]);
  }

  #[test]
  fn higher_floor_wins_ambiguity() {
    let low = ladder("low", 100, Some(Region::Us));
    let high = ladder("high", 500, Some(Region::Us));
    let set = LadderSet::new(vec![low, high]);

    let res = set.classify(&[999, 1_000, 2_000], None, Region::Us);
    assert_eq!(res.ladder().map(Ladder::name), Some("high"));
    assert_eq!(res.ranks(), Some(&[1, 2, 3][..]));
    assert!(matches!(res, Resolution::TieBroken { .. }));
  }

  #[test]
  fn unique_match_is_reported_as_unique() {
    let set = LadderSet::default();
    // 7,500 only appears on the 2008 syndicated scale.
    let res = set.classify(&[500, 7_500, 25_000], Some(2009), Region::Us);
    let Resolution::Unique { ladder, ranks } = &res else {
      panic!("expected unique match, got {res:?}");
    };
    assert_eq!(ladder.name(), "us-syndicated-2008");
    assert_eq!(ranks[..], [0, 5, 9]);
  }

  #[test]
  fn no_match_is_unresolved_not_guessed() {
    let set = LadderSet::default();
    let res = set.classify(&[100, 123], Some(2002), Region::Us);
    assert_eq!(res, Resolution::Unresolved(Unresolved::NoMatch { eligible: 2 }));
    assert_eq!(res.ranks(), None);
  }

  #[test]
  fn empty_session_is_unresolved() {
    let set = LadderSet::default();
    assert_eq!(
      set.classify(&[], Some(2002), Region::Uk),
      Resolution::Unresolved(Unresolved::NoValues)
    );
  }

  #[test]
  fn no_eligible_ladder_when_only_regional_ladders_exist() {
    let set = LadderSet::new(vec![ladder("us", 100, Some(Region::Us))]);
    assert_eq!(
      set.classify(&[100], None, Region::Uk),
      Resolution::Unresolved(Unresolved::NoEligibleLadder)
    );
  }

  #[test]
  fn year_window_excludes_ladders() {
    let set = LadderSet::default();
    // 25,000 with a 2002 air date: the 2004 scale is out of its window, so
    // only the rounded fallback remains.
    let res = set.classify(&[8_000, 25_000], Some(2002), Region::Us);
    assert_eq!(res.ladder().map(Ladder::name), Some("rounded"));
    // With an unknown year the 2004 scale is eligible again and has the same
    // floor, so it wins on declaration order.
    let res = set.classify(&[8_000, 25_000], None, Region::Us);
    assert_eq!(res.ladder().map(Ladder::name), Some("us-syndicated-2004"));
  }

  #[test]
  fn repeated_value_ranks_first_occurrence() {
    let mut values = [0; LADDER_LEN];
    for (i, v) in values.iter_mut().enumerate() {
      *v = 100 * (i as Prize + 1);
    }
    values[5] = values[4];
    let l = Ladder::new("dup", None, None, None, &values).unwrap();
    assert_eq!(l.rank_of(500), Some(4));
  }

  #[test]
  fn invalid_ladders_are_rejected() {
    let err = Ladder::new("short", None, None, None, &[1, 2, 3]).unwrap_err();
    assert!(matches!(err, Error::LadderLength { actual: 3, .. }));

    let mut values = [0; LADDER_LEN];
    for (i, v) in values.iter_mut().enumerate() {
      *v = i as Prize;
    }
    values[7] = 0;
    let err = Ladder::new("bumpy", None, None, None, &values).unwrap_err();
    assert!(matches!(err, Error::LadderOrder { position: 7, .. }));
  }
}
