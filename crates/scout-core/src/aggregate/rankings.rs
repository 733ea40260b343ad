//! Leaderboard queries: top and bottom emitters, per sector and globally.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{RankDirection, RegionFilter, percentile::rank_percentile};
use crate::{
  estimate::round2, sector::Sector, subject::SubjectProfile,
  submission::SubmissionRecord,
};

// ─── Rows ────────────────────────────────────────────────────────────────────

/// One ranked subject within a sector leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
  pub subject_id:      Uuid,
  pub community_name:  String,
  pub region:          Option<String>,
  pub city:            Option<String>,
  pub total_emissions: f64,
}

/// The top (or bottom) K subjects for one sector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorLeaderboard {
  pub sector:  Sector,
  pub entries: Vec<LeaderboardEntry>,
}

/// One ranked subject in the global leaderboard, annotated with the
/// rank-position percentile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmitterRow {
  pub subject_id:      Uuid,
  pub community_name:  String,
  pub region:          Option<String>,
  pub city:            Option<String>,
  pub total_emissions: f64,
  pub percentile_rank: f64,
}

// ─── Queries ─────────────────────────────────────────────────────────────────

fn sort_by_direction(subjects: &mut [(Uuid, f64)], direction: RankDirection) {
  subjects.sort_by(|a, b| {
    let by_total = match direction {
      RankDirection::Top => b.1.total_cmp(&a.1),
      RankDirection::Bottom => a.1.total_cmp(&b.1),
    };
    // Ties order by subject id so repeated queries rank identically.
    by_total.then_with(|| a.0.cmp(&b.0))
  });
}

/// Per-sector subject totals, ranked in `direction` and truncated to `limit`
/// per sector. Subjects whose profile is missing are ranked but dropped from
/// the returned entries.
pub fn sector_leaderboard(
  submissions: &[SubmissionRecord],
  profiles: &HashMap<Uuid, SubjectProfile>,
  filter: &RegionFilter,
  limit: usize,
  direction: RankDirection,
) -> Vec<SectorLeaderboard> {
  let mut totals: HashMap<(Sector, Uuid), f64> = HashMap::new();
  for sub in submissions {
    if !filter.is_empty() {
      let Some(profile) = profiles.get(&sub.subject_id) else { continue };
      if !filter.matches(profile.region.as_deref()) {
        continue;
      }
    }
    *totals.entry((sub.sector(), sub.subject_id)).or_default() +=
      sub.estimated_co2e_kg;
  }

  let mut by_sector: BTreeMap<Sector, Vec<(Uuid, f64)>> = BTreeMap::new();
  for ((sector, subject_id), total) in totals {
    by_sector.entry(sector).or_default().push((subject_id, total));
  }

  by_sector
    .into_iter()
    .map(|(sector, mut subjects)| {
      sort_by_direction(&mut subjects, direction);
      let entries = subjects
        .into_iter()
        .take(limit)
        .filter_map(|(subject_id, total)| {
          let profile = profiles.get(&subject_id)?;
          Some(LeaderboardEntry {
            subject_id,
            community_name: profile.community_name.clone(),
            region: profile.region.clone(),
            city: profile.city.clone(),
            total_emissions: round2(total),
          })
        })
        .collect();
      SectorLeaderboard { sector, entries }
    })
    .collect()
}

/// Global per-subject totals ranked in `direction`, truncated to `limit`, and
/// annotated with the rank-position percentile.
///
/// The percentile population is every subject with at least one submission,
/// including subjects whose profile row has not been mirrored yet; those
/// subjects are then dropped from the returned rows.
pub fn global_emitters(
  submissions: &[SubmissionRecord],
  profiles: &HashMap<Uuid, SubjectProfile>,
  limit: usize,
  direction: RankDirection,
) -> Vec<EmitterRow> {
  let mut totals: HashMap<Uuid, f64> = HashMap::new();
  for sub in submissions {
    *totals.entry(sub.subject_id).or_default() += sub.estimated_co2e_kg;
  }

  let mut ranked: Vec<(Uuid, f64)> = totals.into_iter().collect();
  sort_by_direction(&mut ranked, direction);
  let population = ranked.len();

  ranked
    .into_iter()
    .enumerate()
    .take(limit)
    .filter_map(|(index, (subject_id, total))| {
      let profile = profiles.get(&subject_id)?;
      let percentile_rank = rank_percentile(index + 1, population)?;
      Some(EmitterRow {
        subject_id,
        community_name: profile.community_name.clone(),
        region: profile.region.clone(),
        city: profile.city.clone(),
        total_emissions: round2(total),
        percentile_rank,
      })
    })
    .collect()
}
