//! Cross-sectional and time-series totals grouped on community metadata.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::RegionFilter;
use crate::{
  estimate::round2, subject::SubjectProfile, submission::SubmissionRecord,
};

// ─── Rows ────────────────────────────────────────────────────────────────────

/// Totals per (region, city).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommunitySummaryRow {
  pub region:          Option<String>,
  pub city:            Option<String>,
  pub total_emissions: f64,
  pub count:           u64,
}

/// Totals per UTC calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeseriesPoint {
  pub date:            NaiveDate,
  pub total_emissions: f64,
  pub count:           u64,
}

/// Totals per community type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommunityTypeRow {
  pub community_type:  String,
  pub total_emissions: f64,
  pub count:           u64,
}

/// Totals per (day, region).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionalTrendRow {
  pub date:            NaiveDate,
  pub region:          Option<String>,
  pub total_emissions: f64,
}

// ─── Queries ─────────────────────────────────────────────────────────────────

/// Total emissions and submission count per (region, city), ordered by
/// region then city ascending.
pub fn community_summary(
  submissions: &[SubmissionRecord],
  profiles: &HashMap<Uuid, SubjectProfile>,
) -> Vec<CommunitySummaryRow> {
  let mut groups: BTreeMap<(Option<String>, Option<String>), (f64, u64)> =
    BTreeMap::new();
  for sub in submissions {
    let Some(profile) = profiles.get(&sub.subject_id) else { continue };
    let entry = groups
      .entry((profile.region.clone(), profile.city.clone()))
      .or_default();
    entry.0 += sub.estimated_co2e_kg;
    entry.1 += 1;
  }
  groups
    .into_iter()
    .map(|((region, city), (total, count))| CommunitySummaryRow {
      region,
      city,
      total_emissions: round2(total),
      count,
    })
    .collect()
}

/// Daily total emissions and submission count, ordered by date ascending.
pub fn daily_timeseries(
  submissions: &[SubmissionRecord],
  profiles: &HashMap<Uuid, SubjectProfile>,
  filter: &RegionFilter,
) -> Vec<TimeseriesPoint> {
  let mut groups: BTreeMap<NaiveDate, (f64, u64)> = BTreeMap::new();
  for sub in submissions {
    let Some(profile) = profiles.get(&sub.subject_id) else { continue };
    if !filter.matches(profile.region.as_deref()) {
      continue;
    }
    let entry = groups.entry(sub.created_at.date_naive()).or_default();
    entry.0 += sub.estimated_co2e_kg;
    entry.1 += 1;
  }
  groups
    .into_iter()
    .map(|(date, (total, count))| TimeseriesPoint {
      date,
      total_emissions: round2(total),
      count,
    })
    .collect()
}

/// Total emissions and submission count per community type, ordered by type
/// ascending.
pub fn totals_by_community_type(
  submissions: &[SubmissionRecord],
  profiles: &HashMap<Uuid, SubjectProfile>,
  filter: &RegionFilter,
) -> Vec<CommunityTypeRow> {
  let mut groups: BTreeMap<String, (f64, u64)> = BTreeMap::new();
  for sub in submissions {
    let Some(profile) = profiles.get(&sub.subject_id) else { continue };
    if !filter.matches(profile.region.as_deref()) {
      continue;
    }
    let entry = groups.entry(profile.community_type.clone()).or_default();
    entry.0 += sub.estimated_co2e_kg;
    entry.1 += 1;
  }
  groups
    .into_iter()
    .map(|(community_type, (total, count))| CommunityTypeRow {
      community_type,
      total_emissions: round2(total),
      count,
    })
    .collect()
}

/// Daily total emissions per region, ordered by date ascending.
pub fn regional_trend(
  submissions: &[SubmissionRecord],
  profiles: &HashMap<Uuid, SubjectProfile>,
  filter: &RegionFilter,
) -> Vec<RegionalTrendRow> {
  let mut groups: BTreeMap<(NaiveDate, Option<String>), f64> = BTreeMap::new();
  for sub in submissions {
    let Some(profile) = profiles.get(&sub.subject_id) else { continue };
    if !filter.matches(profile.region.as_deref()) {
      continue;
    }
    *groups
      .entry((sub.created_at.date_naive(), profile.region.clone()))
      .or_default() += sub.estimated_co2e_kg;
  }
  groups
    .into_iter()
    .map(|((date, region), total)| RegionalTrendRow {
      date,
      region,
      total_emissions: round2(total),
    })
    .collect()
}
