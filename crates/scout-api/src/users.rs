//! Handlers for subject-scoped analytics endpoints.
//!
//! These intentionally return empty result sets (not 404) for subjects with
//! no history: an absent history is a degenerate aggregation, not an error.

use axum::{
  Json,
  extract::{Path, State},
};
use scout_core::{
  aggregate::{self, SectorComparison, UserSectorTotal, UserTrendRow},
  narrative::NarrativeGenerator,
  store::{ActionLog, SubjectDirectory, SubmissionStore},
};
use uuid::Uuid;

use crate::{
  AppState,
  error::{ApiError, store_err},
};

/// `GET /user-trend/:subject_id`
pub async fn user_trend<S, G>(
  State(state): State<AppState<S, G>>,
  Path(subject_id): Path<Uuid>,
) -> Result<Json<Vec<UserTrendRow>>, ApiError>
where
  S: SubmissionStore + SubjectDirectory + ActionLog + 'static,
  G: NarrativeGenerator + 'static,
{
  let submissions = state
    .store
    .list_for_subject(subject_id)
    .await
    .map_err(store_err)?;
  Ok(Json(aggregate::user_trend(&submissions, subject_id)))
}

/// `GET /user-summary/:subject_id`
pub async fn user_summary<S, G>(
  State(state): State<AppState<S, G>>,
  Path(subject_id): Path<Uuid>,
) -> Result<Json<Vec<UserSectorTotal>>, ApiError>
where
  S: SubmissionStore + SubjectDirectory + ActionLog + 'static,
  G: NarrativeGenerator + 'static,
{
  let submissions = state
    .store
    .list_for_subject(subject_id)
    .await
    .map_err(store_err)?;
  Ok(Json(aggregate::user_summary(&submissions, subject_id)))
}

/// `GET /compare-user-to-average/:subject_id`
///
/// The population is national, so this reads the full history rather than
/// the subject's slice.
pub async fn compare_to_average<S, G>(
  State(state): State<AppState<S, G>>,
  Path(subject_id): Path<Uuid>,
) -> Result<Json<Vec<SectorComparison>>, ApiError>
where
  S: SubmissionStore + SubjectDirectory + ActionLog + 'static,
  G: NarrativeGenerator + 'static,
{
  let submissions = state
    .store
    .list_submissions()
    .await
    .map_err(store_err)?;
  Ok(Json(aggregate::compare_to_average(&submissions, subject_id)))
}
