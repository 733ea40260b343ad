//! Percentile utilities.
//!
//! Two deliberately distinct formulas coexist: leaderboards annotate entries
//! with a rank-position percentile, while peer comparison uses the count of
//! strictly smaller population values. They are not interchangeable and must
//! not be unified.

use crate::estimate::round2;

/// `100 × position / population`, where `position` is 1-indexed within the
/// population sorted in the requested direction. `None` for an empty
/// population.
pub fn rank_percentile(position: usize, population: usize) -> Option<f64> {
  if population == 0 {
    return None;
  }
  Some(round2(position as f64 / population as f64 * 100.0))
}

/// `100 × (count of totals strictly below value) / population`. Tied values
/// all receive the same percentile. `None` for an empty population.
pub fn below_count_percentile(totals: &[f64], value: f64) -> Option<f64> {
  if totals.is_empty() {
    return None;
  }
  let below = totals.iter().filter(|t| **t < value).count();
  Some(round2(below as f64 / totals.len() as f64 * 100.0))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn rank_percentile_spans_first_to_last() {
    assert_eq!(rank_percentile(1, 4), Some(25.0));
    assert_eq!(rank_percentile(4, 4), Some(100.0));
    assert_eq!(rank_percentile(1, 3), Some(33.33));
  }

  #[test]
  fn rank_percentile_guards_empty_population() {
    assert_eq!(rank_percentile(1, 0), None);
  }

  #[test]
  fn below_count_percentile_shares_ties() {
    let totals = [10.0, 20.0, 20.0, 30.0];
    // One value strictly below 20.
    assert_eq!(below_count_percentile(&totals, 20.0), Some(25.0));
    assert_eq!(below_count_percentile(&totals, 30.0), Some(75.0));
    assert_eq!(below_count_percentile(&totals, 5.0), Some(0.0));
  }

  #[test]
  fn below_count_percentile_guards_empty_population() {
    assert_eq!(below_count_percentile(&[], 10.0), None);
  }
}
