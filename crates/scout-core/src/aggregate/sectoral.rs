//! Sector decomposition queries: which sectors dominate where, and how each
//! sector moves over time.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::RegionFilter;
use crate::{
  estimate::round2, sector::Sector, subject::SubjectProfile,
  submission::SubmissionRecord,
};

// ─── Rows ────────────────────────────────────────────────────────────────────

/// Totals per (region, sector).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorRegionRow {
  pub region:          Option<String>,
  pub sector:          Sector,
  pub total_emissions: f64,
}

/// Totals per (sector, day). No metadata join: every submission counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorTrendRow {
  pub sector:          Sector,
  pub date:            NaiveDate,
  pub total_emissions: f64,
}

/// Totals per (community type, sector).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorCommunityTypeRow {
  pub community_type:  String,
  pub sector:          Sector,
  pub total_emissions: f64,
}

// ─── Queries ─────────────────────────────────────────────────────────────────

/// Total emissions per (region, sector), ordered by region then sector
/// ascending.
pub fn sectoral_by_region(
  submissions: &[SubmissionRecord],
  profiles: &HashMap<Uuid, SubjectProfile>,
  filter: &RegionFilter,
) -> Vec<SectorRegionRow> {
  let mut groups: BTreeMap<(Option<String>, Sector), f64> = BTreeMap::new();
  for sub in submissions {
    let Some(profile) = profiles.get(&sub.subject_id) else { continue };
    if !filter.matches(profile.region.as_deref()) {
      continue;
    }
    *groups.entry((profile.region.clone(), sub.sector())).or_default() +=
      sub.estimated_co2e_kg;
  }
  groups
    .into_iter()
    .map(|((region, sector), total)| SectorRegionRow {
      region,
      sector,
      total_emissions: round2(total),
    })
    .collect()
}

/// National total emissions per (sector, day), ordered by date ascending.
pub fn sectoral_trend(submissions: &[SubmissionRecord]) -> Vec<SectorTrendRow> {
  let mut groups: BTreeMap<(NaiveDate, Sector), f64> = BTreeMap::new();
  for sub in submissions {
    *groups
      .entry((sub.created_at.date_naive(), sub.sector()))
      .or_default() += sub.estimated_co2e_kg;
  }
  groups
    .into_iter()
    .map(|((date, sector), total)| SectorTrendRow {
      sector,
      date,
      total_emissions: round2(total),
    })
    .collect()
}

/// Total emissions per (community type, sector), ordered by type then sector
/// ascending.
pub fn sectoral_by_community_type(
  submissions: &[SubmissionRecord],
  profiles: &HashMap<Uuid, SubjectProfile>,
  filter: &RegionFilter,
) -> Vec<SectorCommunityTypeRow> {
  let mut groups: BTreeMap<(String, Sector), f64> = BTreeMap::new();
  for sub in submissions {
    let Some(profile) = profiles.get(&sub.subject_id) else { continue };
    if !filter.matches(profile.region.as_deref()) {
      continue;
    }
    *groups
      .entry((profile.community_type.clone(), sub.sector()))
      .or_default() += sub.estimated_co2e_kg;
  }
  groups
    .into_iter()
    .map(|((community_type, sector), total)| SectorCommunityTypeRow {
      community_type,
      sector,
      total_emissions: round2(total),
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::aggregate::{community_summary, fixtures, profile_map};

  #[test]
  fn sectoral_by_region_orders_by_region_then_sector() {
    let (a, b) = (fixtures::subject(1), fixtures::subject(2));
    let profiles = profile_map(vec![
      fixtures::profile(a, "LGU", "Pasig LGU", Some("NCR"), Some("Pasig")),
      fixtures::profile(b, "LGU", "Cebu LGU", Some("Region VII"), Some("Cebu")),
    ]);
    let subs = vec![
      fixtures::submission(a, Sector::Waste, 1, 5.0),
      fixtures::submission(a, Sector::Energy, 2, 10.0),
      fixtures::submission(b, Sector::Energy, 1, 20.0),
    ];

    let rows = sectoral_by_region(&subs, &profiles, &RegionFilter::default());
    assert_eq!(rows.len(), 3);
    assert_eq!((rows[0].region.as_deref(), rows[0].sector), (Some("NCR"), Sector::Energy));
    assert_eq!((rows[1].region.as_deref(), rows[1].sector), (Some("NCR"), Sector::Waste));
    assert_eq!(
      (rows[2].region.as_deref(), rows[2].sector),
      (Some("Region VII"), Sector::Energy)
    );
  }

  #[test]
  fn sectoral_trend_needs_no_profile() {
    let orphan = fixtures::subject(42);
    let subs = vec![
      fixtures::submission(orphan, Sector::Energy, 2, 7.0),
      fixtures::submission(orphan, Sector::Energy, 1, 3.0),
      fixtures::submission(orphan, Sector::Transport, 1, 4.0),
    ];

    let rows = sectoral_trend(&subs);
    assert_eq!(rows.len(), 3);
    // Day 1 (energy then transport by string order), then day 2.
    assert_eq!(rows[0].sector, Sector::Energy);
    assert_eq!(rows[0].total_emissions, 3.0);
    assert_eq!(rows[1].sector, Sector::Transport);
    assert_eq!(rows[2].total_emissions, 7.0);
  }

  #[test]
  fn region_totals_decompose_into_sector_totals() {
    let (a, b) = (fixtures::subject(1), fixtures::subject(2));
    let profiles = profile_map(vec![
      fixtures::profile(a, "LGU", "Pasig LGU", Some("NCR"), Some("Pasig")),
      fixtures::profile(b, "School", "MHS", Some("NCR"), Some("Manila")),
    ]);
    let subs = vec![
      fixtures::submission(a, Sector::Energy, 1, 10.25),
      fixtures::submission(a, Sector::Waste, 2, 4.75),
      fixtures::submission(b, Sector::Transport, 3, 8.5),
    ];

    let region_total: f64 = community_summary(&subs, &profiles)
      .iter()
      .filter(|row| row.region.as_deref() == Some("NCR"))
      .map(|row| row.total_emissions)
      .sum();
    let sector_total: f64 =
      sectoral_by_region(&subs, &profiles, &RegionFilter::default())
        .iter()
        .filter(|row| row.region.as_deref() == Some("NCR"))
        .map(|row| row.total_emissions)
        .sum();

    assert_eq!(region_total, sector_total);
    assert_eq!(sector_total, 23.5);
  }

  #[test]
  fn community_type_decomposition_honors_the_filter() {
    let (a, b) = (fixtures::subject(1), fixtures::subject(2));
    let profiles = profile_map(vec![
      fixtures::profile(a, "School", "MHS", Some("NCR"), Some("Manila")),
      fixtures::profile(b, "School", "CHS", Some("Region VII"), Some("Cebu")),
    ]);
    let subs = vec![
      fixtures::submission(a, Sector::Energy, 1, 10.0),
      fixtures::submission(b, Sector::Energy, 1, 20.0),
    ];

    let rows = sectoral_by_community_type(
      &subs,
      &profiles,
      &RegionFilter::parse(Some("region vii")),
    );
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].total_emissions, 20.0);
  }
}
