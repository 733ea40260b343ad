//! Handlers for the community and trend analytics endpoints.
//!
//! Each handler loads a snapshot (full submission history plus the profile
//! hash-join map) and evaluates the matching pure query from
//! [`scout_core::aggregate`]. The queries are independent and idempotent, so
//! callers are free to cache responses with a staleness window.

use std::collections::HashMap;

use axum::{
  Json,
  extract::{Query, State},
};
use scout_core::{
  aggregate::{
    self, CommunitySummaryRow, CommunityTypeRow, RegionFilter,
    RegionalTrendRow, SectorCommunityTypeRow, SectorRegionRow, SectorTrendRow,
    TimeseriesPoint,
  },
  narrative::NarrativeGenerator,
  store::{ActionLog, SubjectDirectory, SubmissionStore},
  subject::SubjectProfile,
  submission::SubmissionRecord,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
  AppState,
  error::{ApiError, store_err},
};

/// Query params shared by the filterable read endpoints.
#[derive(Debug, Deserialize, Default)]
pub struct RegionsParams {
  /// Comma-separated region names; matched case-insensitively as substrings.
  pub regions: Option<String>,
}

impl RegionsParams {
  pub(crate) fn filter(&self) -> RegionFilter {
    RegionFilter::parse(self.regions.as_deref())
  }
}

/// Load the aggregation inputs: every submission plus the profile join map.
pub(crate) async fn snapshot<S>(
  store: &S,
) -> Result<(Vec<SubmissionRecord>, HashMap<Uuid, SubjectProfile>), ApiError>
where
  S: SubmissionStore + SubjectDirectory,
{
  let submissions = store.list_submissions().await.map_err(store_err)?;
  let profiles = store.list_profiles().await.map_err(store_err)?;
  Ok((submissions, aggregate::profile_map(profiles)))
}

/// `GET /community-summary`
pub async fn community_summary<S, G>(
  State(state): State<AppState<S, G>>,
) -> Result<Json<Vec<CommunitySummaryRow>>, ApiError>
where
  S: SubmissionStore + SubjectDirectory + ActionLog + 'static,
  G: NarrativeGenerator + 'static,
{
  let (submissions, profiles) = snapshot(state.store.as_ref()).await?;
  Ok(Json(aggregate::community_summary(&submissions, &profiles)))
}

/// `GET /timeseries[?regions=...]`
pub async fn timeseries<S, G>(
  State(state): State<AppState<S, G>>,
  Query(params): Query<RegionsParams>,
) -> Result<Json<Vec<TimeseriesPoint>>, ApiError>
where
  S: SubmissionStore + SubjectDirectory + ActionLog + 'static,
  G: NarrativeGenerator + 'static,
{
  let (submissions, profiles) = snapshot(state.store.as_ref()).await?;
  Ok(Json(aggregate::daily_timeseries(
    &submissions,
    &profiles,
    &params.filter(),
  )))
}

/// `GET /aggregated-by-type[?regions=...]`
pub async fn aggregated_by_type<S, G>(
  State(state): State<AppState<S, G>>,
  Query(params): Query<RegionsParams>,
) -> Result<Json<Vec<CommunityTypeRow>>, ApiError>
where
  S: SubmissionStore + SubjectDirectory + ActionLog + 'static,
  G: NarrativeGenerator + 'static,
{
  let (submissions, profiles) = snapshot(state.store.as_ref()).await?;
  Ok(Json(aggregate::totals_by_community_type(
    &submissions,
    &profiles,
    &params.filter(),
  )))
}

/// `GET /regional-trend-summary[?regions=...]`
pub async fn regional_trend_summary<S, G>(
  State(state): State<AppState<S, G>>,
  Query(params): Query<RegionsParams>,
) -> Result<Json<Vec<RegionalTrendRow>>, ApiError>
where
  S: SubmissionStore + SubjectDirectory + ActionLog + 'static,
  G: NarrativeGenerator + 'static,
{
  let (submissions, profiles) = snapshot(state.store.as_ref()).await?;
  Ok(Json(aggregate::regional_trend(
    &submissions,
    &profiles,
    &params.filter(),
  )))
}

/// `GET /sectoral-by-region[?regions=...]`
pub async fn sectoral_by_region<S, G>(
  State(state): State<AppState<S, G>>,
  Query(params): Query<RegionsParams>,
) -> Result<Json<Vec<SectorRegionRow>>, ApiError>
where
  S: SubmissionStore + SubjectDirectory + ActionLog + 'static,
  G: NarrativeGenerator + 'static,
{
  let (submissions, profiles) = snapshot(state.store.as_ref()).await?;
  Ok(Json(aggregate::sectoral_by_region(
    &submissions,
    &profiles,
    &params.filter(),
  )))
}

/// `GET /sectoral-trend`
pub async fn sectoral_trend<S, G>(
  State(state): State<AppState<S, G>>,
) -> Result<Json<Vec<SectorTrendRow>>, ApiError>
where
  S: SubmissionStore + SubjectDirectory + ActionLog + 'static,
  G: NarrativeGenerator + 'static,
{
  let submissions = state
    .store
    .list_submissions()
    .await
    .map_err(store_err)?;
  Ok(Json(aggregate::sectoral_trend(&submissions)))
}

/// `GET /sectoral-by-community-type[?regions=...]`
pub async fn sectoral_by_community_type<S, G>(
  State(state): State<AppState<S, G>>,
  Query(params): Query<RegionsParams>,
) -> Result<Json<Vec<SectorCommunityTypeRow>>, ApiError>
where
  S: SubmissionStore + SubjectDirectory + ActionLog + 'static,
  G: NarrativeGenerator + 'static,
{
  let (submissions, profiles) = snapshot(state.store.as_ref()).await?;
  Ok(Json(aggregate::sectoral_by_community_type(
    &submissions,
    &profiles,
    &params.filter(),
  )))
}
