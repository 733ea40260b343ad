//! Handlers for the leaderboard endpoints.

use axum::{
  Json,
  extract::{Query, State},
};
use scout_core::{
  aggregate::{self, EmitterRow, RankDirection, SectorLeaderboard},
  narrative::NarrativeGenerator,
  store::{ActionLog, SubjectDirectory, SubmissionStore},
};
use serde::Deserialize;

use crate::{
  AppState,
  analytics::snapshot,
  error::ApiError,
};

const DEFAULT_LIMIT: usize = 5;

#[derive(Debug, Deserialize, Default)]
pub struct RankingParams {
  pub limit:   Option<usize>,
  /// Comma-separated region names; matched case-insensitively as substrings.
  pub regions: Option<String>,
}

async fn leaderboard<S, G>(
  state: &AppState<S, G>,
  params: &RankingParams,
  direction: RankDirection,
) -> Result<Vec<SectorLeaderboard>, ApiError>
where
  S: SubmissionStore + SubjectDirectory + ActionLog + 'static,
  G: NarrativeGenerator + 'static,
{
  let (submissions, profiles) = snapshot(state.store.as_ref()).await?;
  Ok(aggregate::sector_leaderboard(
    &submissions,
    &profiles,
    &aggregate::RegionFilter::parse(params.regions.as_deref()),
    params.limit.unwrap_or(DEFAULT_LIMIT),
    direction,
  ))
}

/// `GET /top-by-sector[?limit=5][&regions=...]`
pub async fn top_by_sector<S, G>(
  State(state): State<AppState<S, G>>,
  Query(params): Query<RankingParams>,
) -> Result<Json<Vec<SectorLeaderboard>>, ApiError>
where
  S: SubmissionStore + SubjectDirectory + ActionLog + 'static,
  G: NarrativeGenerator + 'static,
{
  Ok(Json(leaderboard(&state, &params, RankDirection::Top).await?))
}

/// `GET /bottom-by-sector[?limit=5][&regions=...]`
pub async fn bottom_by_sector<S, G>(
  State(state): State<AppState<S, G>>,
  Query(params): Query<RankingParams>,
) -> Result<Json<Vec<SectorLeaderboard>>, ApiError>
where
  S: SubmissionStore + SubjectDirectory + ActionLog + 'static,
  G: NarrativeGenerator + 'static,
{
  Ok(Json(leaderboard(&state, &params, RankDirection::Bottom).await?))
}

async fn emitters<S, G>(
  state: &AppState<S, G>,
  limit: Option<usize>,
  direction: RankDirection,
) -> Result<Vec<EmitterRow>, ApiError>
where
  S: SubmissionStore + SubjectDirectory + ActionLog + 'static,
  G: NarrativeGenerator + 'static,
{
  let (submissions, profiles) = snapshot(state.store.as_ref()).await?;
  Ok(aggregate::global_emitters(
    &submissions,
    &profiles,
    limit.unwrap_or(DEFAULT_LIMIT),
    direction,
  ))
}

/// `GET /top-emitters[?limit=5]`
pub async fn top_emitters<S, G>(
  State(state): State<AppState<S, G>>,
  Query(params): Query<RankingParams>,
) -> Result<Json<Vec<EmitterRow>>, ApiError>
where
  S: SubmissionStore + SubjectDirectory + ActionLog + 'static,
  G: NarrativeGenerator + 'static,
{
  Ok(Json(emitters(&state, params.limit, RankDirection::Top).await?))
}

/// `GET /lowest-emitters[?limit=5]`
pub async fn lowest_emitters<S, G>(
  State(state): State<AppState<S, G>>,
  Query(params): Query<RankingParams>,
) -> Result<Json<Vec<EmitterRow>>, ApiError>
where
  S: SubmissionStore + SubjectDirectory + ActionLog + 'static,
  G: NarrativeGenerator + 'static,
{
  Ok(Json(emitters(&state, params.limit, RankDirection::Bottom).await?))
}
