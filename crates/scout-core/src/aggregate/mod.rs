//! The aggregator — read-only queries over the submission history.
//!
//! Every query is a pure function over an in-memory snapshot: the full
//! submission list plus a subject-id → profile map (a hash-join, so no
//! relational engine is required). Queries that group on profile metadata
//! drop submissions whose subject has no profile row; subject-keyed
//! population statistics keep them. Queries are independent, idempotent, and
//! safe to evaluate in parallel; an empty history yields empty results,
//! never an error.

mod community;
mod percentile;
mod rankings;
mod sectoral;
mod users;

pub use community::{
  CommunitySummaryRow, CommunityTypeRow, RegionalTrendRow, TimeseriesPoint,
  community_summary, daily_timeseries, regional_trend, totals_by_community_type,
};
pub use percentile::{below_count_percentile, rank_percentile};
pub use rankings::{
  EmitterRow, LeaderboardEntry, SectorLeaderboard, global_emitters,
  sector_leaderboard,
};
pub use sectoral::{
  SectorCommunityTypeRow, SectorRegionRow, SectorTrendRow, sectoral_by_region,
  sectoral_by_community_type, sectoral_trend,
};
pub use users::{
  SectorComparison, UserSectorTotal, UserTrendRow, compare_to_average,
  user_summary, user_trend,
};

use std::collections::HashMap;

use uuid::Uuid;

use crate::subject::SubjectProfile;

/// Build the hash-join side: subject id → denormalized profile.
pub fn profile_map(profiles: Vec<SubjectProfile>) -> HashMap<Uuid, SubjectProfile> {
  profiles.into_iter().map(|p| (p.subject_id, p)).collect()
}

/// Ranking direction for the leaderboard queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankDirection {
  /// Largest totals first.
  Top,
  /// Smallest totals first.
  Bottom,
}

// ─── Region filter ───────────────────────────────────────────────────────────

/// Comma-separated, case-insensitive substring filter over region names.
///
/// Substring matching tolerates naming variants: a filter of "Region III"
/// matches a profile region of "Region III – Central Luzon".
#[derive(Debug, Clone, Default)]
pub struct RegionFilter {
  needles: Vec<String>,
}

impl RegionFilter {
  pub fn parse(raw: Option<&str>) -> Self {
    let needles = raw
      .map(|r| {
        r.split(',')
          .map(|s| s.trim().to_lowercase())
          .filter(|s| !s.is_empty())
          .collect()
      })
      .unwrap_or_default();
    Self { needles }
  }

  pub fn is_empty(&self) -> bool { self.needles.is_empty() }

  /// An empty filter matches every region. Against a non-empty filter, a
  /// missing region matches nothing.
  pub fn matches(&self, region: Option<&str>) -> bool {
    if self.needles.is_empty() {
      return true;
    }
    let Some(region) = region else { return false };
    let region = region.to_lowercase();
    self.needles.iter().any(|needle| region.contains(needle.as_str()))
  }
}


// ─── Test fixtures ───────────────────────────────────────────────────────────

#[cfg(test)]
pub(crate) mod fixtures {
  use chrono::{TimeZone, Utc};
  use uuid::Uuid;

  use crate::{
    activity::{
      ActivityRecord, AgricultureActivity, EnergyActivity, IppuActivity,
      TransportActivity, WasteActivity,
    },
    sector::Sector,
    subject::SubjectProfile,
    submission::SubmissionRecord,
  };

  pub fn subject(n: u128) -> Uuid { Uuid::from_u128(n) }

  fn empty_activity(sector: Sector) -> ActivityRecord {
    match sector {
      Sector::Energy => ActivityRecord::Energy(EnergyActivity::default()),
      Sector::Transport => {
        ActivityRecord::Transport(TransportActivity::default())
      }
      Sector::Waste => ActivityRecord::Waste(WasteActivity::default()),
      Sector::Agriculture => {
        ActivityRecord::Agriculture(AgricultureActivity::default())
      }
      Sector::Ippu => ActivityRecord::Ippu(IppuActivity::default()),
    }
  }

  /// A submission on the given January 2025 day with a fixed estimate.
  /// The aggregator never re-derives estimates, so the payload stays empty.
  pub fn submission(
    subject_id: Uuid,
    sector: Sector,
    day: u32,
    kg: f64,
  ) -> SubmissionRecord {
    let at = Utc.with_ymd_and_hms(2025, 1, day, 8, 30, 0).unwrap();
    SubmissionRecord {
      submission_id: Uuid::new_v4(),
      subject_id,
      activity: empty_activity(sector),
      estimated_co2e_kg: kg,
      created_at: at,
      updated_at: at,
    }
  }

  pub fn profile(
    subject_id: Uuid,
    community_type: &str,
    name: &str,
    region: Option<&str>,
    city: Option<&str>,
  ) -> SubjectProfile {
    SubjectProfile {
      subject_id,
      community_type: community_type.to_owned(),
      community_name: name.to_owned(),
      region: region.map(str::to_owned),
      city: city.map(str::to_owned),
      created_at: Utc.with_ymd_and_hms(2024, 12, 1, 0, 0, 0).unwrap(),
    }
  }
}
