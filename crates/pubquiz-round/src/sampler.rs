//! [`RoundSampler`] makes random draws over the eligible rows of a table.

use pubquiz_core::{Ordinal, Table, TriviaRecord};
use rand::{
  SeedableRng,
  rngs::StdRng,
  seq::{IndexedRandom, SliceRandom},
};

use crate::request::{RoundRequest, eligible_indices};

/// The rows drawn for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round {
  pub request:  RoundRequest,
  pub records:  Vec<TriviaRecord>,
  /// Rows the request accepted before drawing.
  pub eligible: usize,
}

impl Round {
  /// How many rows short of the requested count this round is.
  pub fn shortfall(&self) -> usize {
    self.request.count.saturating_sub(self.records.len())
  }

  pub fn is_short(&self) -> bool { self.shortfall() > 0 }

  fn finish(request: &RoundRequest, records: Vec<TriviaRecord>, eligible: usize) -> Self {
    let round = Self { request: request.clone(), records, eligible };
    if round.is_short() {
      tracing::warn!(
        category = ?round.request.category,
        requested = round.request.count,
        returned = round.records.len(),
        eligible,
        "short round"
      );
    }
    round
  }
}

pub struct RoundSampler<R = StdRng> {
  rng: R,
}

impl RoundSampler<StdRng> {
  /// A sampler whose draws are reproducible for a given seed.
  pub fn seeded(seed: u64) -> Self { Self::with_rng(StdRng::seed_from_u64(seed)) }

  pub fn from_os_rng() -> Self { Self::with_rng(StdRng::from_os_rng()) }
}

impl<R: rand::Rng> RoundSampler<R> {
  pub fn with_rng(rng: R) -> Self { Self { rng } }

  /// Draw up to `request.count` distinct eligible rows, uniformly at random.
  /// Fewer rows are returned when fewer are eligible.
  pub fn select(&mut self, table: &Table, request: &RoundRequest) -> Round {
    let mut indices = eligible_indices(table, request);
    let eligible = indices.len();

    indices.shuffle(&mut self.rng);
    indices.truncate(request.count);

    let records = indices
      .into_iter()
      .filter_map(|i| table.get(i).cloned())
      .collect();
    Round::finish(request, records, eligible)
  }

  /// Draw one row per difficulty band, easiest band first.
  ///
  /// The levels of the observed difficulty range of the eligible rows are
  /// split into `request.count` bands of `ceil(levels / count)` levels each,
  /// the last band taking whatever is left over. There are never more bands
  /// than levels. Bands with no rows are skipped. Rows of unknown difficulty
  /// are never drawn.
  pub fn select_binned(&mut self, table: &Table, request: &RoundRequest) -> Round {
    let ranked: Vec<(usize, Ordinal)> = eligible_indices(table, request)
      .into_iter()
      .filter_map(|i| table.get(i)?.difficulty.map(|d| (i, d)))
      .collect();
    let eligible = ranked.len();

    let (Some(min), Some(max)) = (
      ranked.iter().map(|(_, d)| *d).min(),
      ranked.iter().map(|(_, d)| *d).max(),
    ) else {
      return Round::finish(request, Vec::new(), eligible);
    };
    if request.count == 0 {
      return Round::finish(request, Vec::new(), eligible);
    }

    let levels = (max - min) as usize + 1;
    let width = levels.div_ceil(request.count).max(1);
    let bin_count = request.count.min(levels);
    let mut bins: Vec<Vec<usize>> = vec![Vec::new(); bin_count];
    for (i, d) in ranked {
      let bin = ((d - min) as usize / width).min(bin_count - 1);
      bins[bin].push(i);
    }

    let records = bins
      .iter()
      .filter_map(|bin| bin.choose(&mut self.rng))
      .filter_map(|&i| table.get(i).cloned())
      .collect();
    Round::finish(request, records, eligible)
  }
}

#[cfg(test)]
mod tests {
  use std::collections::HashSet;

  use super::*;
  use crate::request::CategoryFilter;

  fn table(rows: &[(&str, Option<Ordinal>)]) -> Table {
    Table::from_records(
      rows
        .iter()
        .enumerate()
        .map(|(n, (category, difficulty))| {
          let mut r = TriviaRecord::new(format!("Question {n}?"), "a", *category);
          r.wrong_answers = [Some("b".into()), Some("c".into()), Some("d".into())];
          r.difficulty = *difficulty;
          r
        })
        .collect(),
    )
  }

  fn request(category: &str, count: usize) -> RoundRequest {
    let category = match category {
      "any" => CategoryFilter::Any,
      name => CategoryFilter::Named(name.into()),
    };
    RoundRequest::new(category, count)
  }

  #[test]
  fn short_category_returns_every_eligible_row() {
    let t = table(&[("Art", Some(0)), ("Music", Some(1)), ("Art", None)]);
    let round = RoundSampler::seeded(7).select(&t, &request("Art", 5));

    assert_eq!(round.records.len(), 2);
    assert_eq!(round.eligible, 2);
    assert_eq!(round.shortfall(), 3);
    assert!(round.records.iter().all(|r| r.category == "Art"));
  }

  #[test]
  fn draws_are_distinct_and_bounded() {
    let rows: Vec<_> = (0..50).map(|_| ("Art", Some(1))).collect();
    let t = table(&rows);
    let round = RoundSampler::seeded(1).select(&t, &request("any", 10));

    assert_eq!(round.records.len(), 10);
    let ids: HashSet<_> = round.records.iter().map(|r| &r.uuid).collect();
    assert_eq!(ids.len(), 10);
    assert!(!round.is_short());
  }

  #[test]
  fn zero_count_and_unknown_category_are_empty() {
    let t = table(&[("Art", Some(0))]);
    let mut sampler = RoundSampler::seeded(3);

    let round = sampler.select(&t, &request("Art", 0));
    assert!(round.records.is_empty());
    assert_eq!(round.shortfall(), 0);

    let round = sampler.select(&t, &request("Nope", 4));
    assert!(round.records.is_empty());
    assert_eq!(round.eligible, 0);
  }

  #[test]
  fn same_seed_same_round() {
    let rows: Vec<_> = (0..30).map(|_| ("Art", None)).collect();
    let t = table(&rows);
    let a = RoundSampler::seeded(42).select(&t, &request("any", 5));
    let b = RoundSampler::seeded(42).select(&t, &request("any", 5));
    assert_eq!(a.records, b.records);
  }

  #[test]
  fn binned_draws_one_per_band_in_order() {
    // Difficulties 0..=14, three rows each.
    let rows: Vec<_> = (0..45).map(|n| ("Show", Some(n / 3))).collect();
    let t = table(&rows);
    let round = RoundSampler::seeded(9).select_binned(&t, &request("any", 5));

    let got: Vec<_> = round.records.iter().filter_map(|r| r.difficulty).collect();
    assert_eq!(got.len(), 5);
    // Width 3: bands [0,2] [3,5] [6,8] [9,11] [12,14].
    let bands = [(0, 2), (3, 5), (6, 8), (9, 11), (12, 14)];
    for (d, (lo, hi)) in got.iter().zip(bands) {
      assert!((lo..=hi).contains(d), "{d} outside [{lo}, {hi}]");
    }
  }

  #[test]
  fn binned_skips_empty_bands_and_unknown_difficulty() {
    let t = table(&[("Show", Some(0)), ("Show", Some(14)), ("Show", None)]);
    let round = RoundSampler::seeded(2).select_binned(&t, &request("any", 5));

    let got: Vec<_> = round.records.iter().map(|r| r.difficulty).collect();
    assert_eq!(got, [Some(0), Some(14)]);
    assert_eq!(round.eligible, 2);
    assert_eq!(round.shortfall(), 3);
  }

  #[test]
  fn binned_last_band_is_no_wider_than_the_rest() {
    let rows: Vec<_> = (0..45).map(|n| ("Show", Some(n / 3))).collect();
    let t = table(&rows);
    for seed in 0..50 {
      let round = RoundSampler::seeded(seed).select_binned(&t, &request("any", 5));
      let last = round.records.last().and_then(|r| r.difficulty);
      assert!(matches!(last, Some(12..=14)), "seed {seed}: last band drew {last:?}");
    }
  }

  #[test]
  fn binned_huge_count_draws_one_per_level() {
    let rows: Vec<_> = (0..10).map(|n| ("Show", Some(n / 2))).collect();
    let t = table(&rows);
    let round = RoundSampler::seeded(4).select_binned(&t, &request("any", 100_000_000_000));

    let got: Vec<_> = round.records.iter().map(|r| r.difficulty).collect();
    assert_eq!(got, [Some(0), Some(1), Some(2), Some(3), Some(4)]);
    assert_eq!(round.shortfall(), 100_000_000_000 - 5);
  }

  #[test]
  fn binned_single_level_yields_one_row() {
    let t = table(&[("Show", Some(3)), ("Show", Some(3))]);
    let round = RoundSampler::seeded(5).select_binned(&t, &request("any", 4));
    assert_eq!(round.records.len(), 1);
  }
}
