//! Subject-scoped queries: one community's history and its standing against
//! the national population.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::percentile::below_count_percentile;
use crate::{estimate::round2, sector::Sector, submission::SubmissionRecord};

// ─── Rows ────────────────────────────────────────────────────────────────────

/// One subject's totals per (day, sector).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserTrendRow {
  pub date:            NaiveDate,
  pub sector:          Sector,
  pub total_emissions: f64,
}

/// One subject's total and submission count for a sector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSectorTotal {
  pub sector:          Sector,
  pub total_emissions: f64,
  pub count:           u64,
}

/// One sector of the subject-vs-population comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorComparison {
  pub sector:          Sector,
  pub user_total:      f64,
  pub national_avg:    f64,
  pub difference:      f64,
  /// Share of the population with a strictly smaller total.
  pub percentile_rank: f64,
  /// Number of subjects contributing to the population for this sector.
  pub entries:         u64,
}

// ─── Queries ─────────────────────────────────────────────────────────────────

/// One subject's daily totals per sector, ordered by date ascending.
pub fn user_trend(
  submissions: &[SubmissionRecord],
  subject_id: Uuid,
) -> Vec<UserTrendRow> {
  let mut groups: BTreeMap<(NaiveDate, Sector), f64> = BTreeMap::new();
  for sub in submissions.iter().filter(|s| s.subject_id == subject_id) {
    *groups
      .entry((sub.created_at.date_naive(), sub.sector()))
      .or_default() += sub.estimated_co2e_kg;
  }
  groups
    .into_iter()
    .map(|((date, sector), total)| UserTrendRow {
      date,
      sector,
      total_emissions: round2(total),
    })
    .collect()
}

/// One subject's total and submission count per sector, ordered by sector
/// ascending.
pub fn user_summary(
  submissions: &[SubmissionRecord],
  subject_id: Uuid,
) -> Vec<UserSectorTotal> {
  let mut groups: BTreeMap<Sector, (f64, u64)> = BTreeMap::new();
  for sub in submissions.iter().filter(|s| s.subject_id == subject_id) {
    let entry = groups.entry(sub.sector()).or_default();
    entry.0 += sub.estimated_co2e_kg;
    entry.1 += 1;
  }
  groups
    .into_iter()
    .map(|(sector, (total, count))| UserSectorTotal {
      sector,
      total_emissions: round2(total),
      count,
    })
    .collect()
}

/// Compare one subject's per-sector totals against the national population.
///
/// The population for a sector is the set of per-subject totals over every
/// submission in that sector. Sectors with no submissions nationally are
/// absent from the result, so the subject total defaults to zero only for
/// sectors somebody has reported. Ordered by sector ascending.
pub fn compare_to_average(
  submissions: &[SubmissionRecord],
  subject_id: Uuid,
) -> Vec<SectorComparison> {
  let mut per_subject: BTreeMap<Sector, BTreeMap<Uuid, f64>> = BTreeMap::new();
  for sub in submissions {
    *per_subject
      .entry(sub.sector())
      .or_default()
      .entry(sub.subject_id)
      .or_default() += sub.estimated_co2e_kg;
  }

  per_subject
    .into_iter()
    .filter_map(|(sector, totals)| {
      let user_total = totals.get(&subject_id).copied().unwrap_or(0.0);
      let population: Vec<f64> = totals.into_values().collect();
      let percentile_rank = below_count_percentile(&population, user_total)?;
      let national_avg =
        population.iter().sum::<f64>() / population.len() as f64;
      Some(SectorComparison {
        sector,
        user_total: round2(user_total),
        national_avg: round2(national_avg),
        difference: round2(user_total - national_avg),
        percentile_rank,
        entries: population.len() as u64,
      })
    })
    .collect()
}
