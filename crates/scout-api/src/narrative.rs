//! Handler for the gated narrative-summary endpoint.

use axum::{
  Json,
  extract::{Path, State},
};
use chrono::Utc;
use scout_core::{
  aggregate::{self, UserSectorTotal},
  narrative::{self, NARRATIVE_ACTION, NarrativeGenerator},
  ratelimit::{self, GateDecision},
  store::{ActionLog, SubjectDirectory, SubmissionStore},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  AppState,
  error::{ApiError, store_err},
};

#[derive(Debug, Serialize, Deserialize)]
pub struct NarrativeResponse {
  pub description: String,
  pub prompt:      String,
  pub guidance:    String,
  pub sectors:     Vec<UserSectorTotal>,
}

/// `GET /narrative/:subject_id`
///
/// Gated to one request per subject per 7 days. The window is consumed only
/// by a successful generation, so an upstream failure leaves it open.
pub async fn interpret<S, G>(
  State(state): State<AppState<S, G>>,
  Path(subject_id): Path<Uuid>,
) -> Result<Json<NarrativeResponse>, ApiError>
where
  S: SubmissionStore + SubjectDirectory + ActionLog + 'static,
  G: NarrativeGenerator + 'static,
{
  let now = Utc::now();

  let last = state
    .store
    .last_action(subject_id, NARRATIVE_ACTION)
    .await
    .map_err(store_err)?;
  if let GateDecision::Reject { next_allowed_at } = ratelimit::evaluate(last, now)
  {
    return Err(ApiError::CooldownActive { next_allowed_at });
  }

  let profile = state
    .store
    .get_profile(subject_id)
    .await
    .map_err(store_err)?
    .ok_or(scout_core::Error::SubjectNotFound(subject_id))?;

  let submissions = state
    .store
    .list_for_subject(subject_id)
    .await
    .map_err(store_err)?;
  let sectors = aggregate::user_summary(&submissions, subject_id);
  if sectors.is_empty() {
    return Err(scout_core::Error::NoSubmissions(subject_id).into());
  }

  let prompt = narrative::build_prompt(&profile, &sectors);
  let description = narrative::describe(&profile, &sectors);

  let guidance = state
    .generator
    .generate(&prompt)
    .await
    .map_err(|e| scout_core::Error::Upstream(e.to_string()))?;

  state
    .store
    .record_action(subject_id, NARRATIVE_ACTION, now)
    .await
    .map_err(store_err)?;

  Ok(Json(NarrativeResponse { description, prompt, guidance, sectors }))
}
