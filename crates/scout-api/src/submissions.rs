//! Handlers for the submission write path and the subject-profile mirror.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/submit` | Rate-gated; 403 inside the cooldown window |
//! | `PUT`  | `/subjects` | Upsert denormalized metadata |
//! | `GET`  | `/subjects/:id` | 404 if not found |

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use chrono::{DateTime, Utc};
use scout_core::{
  activity::ActivityRecord,
  narrative::NarrativeGenerator,
  ratelimit,
  sector::Sector,
  store::{ActionLog, SubjectDirectory, SubmissionStore},
  subject::{NewProfile, SubjectProfile},
  submission::NewSubmission,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  AppState,
  error::{ApiError, store_err},
};

// ─── Submit ──────────────────────────────────────────────────────────────────

/// `POST /submit` — body: `{"subject_id": ..., "sector": "energy", ...}`.
/// The sector tag picks the activity payload; unknown tags are rejected by
/// deserialisation before the gate or estimator run.
#[derive(Debug, Deserialize)]
pub struct SubmitBody {
  pub subject_id: Uuid,
  #[serde(flatten)]
  pub activity:   ActivityRecord,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitResponse {
  pub submission_id:     Uuid,
  pub sector:            Sector,
  pub estimated_co2e_kg: f64,
  pub created_at:        DateTime<Utc>,
}

pub async fn submit<S, G>(
  State(state): State<AppState<S, G>>,
  Json(body): Json<SubmitBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: SubmissionStore + SubjectDirectory + ActionLog + 'static,
  G: NarrativeGenerator + 'static,
{
  let now = Utc::now();
  let sector = body.activity.sector();

  ratelimit::check(state.store.as_ref(), body.subject_id, sector, now)
    .await
    .map_err(store_err)?
    .into_result(sector)?;

  let record = state
    .store
    .record_submission(NewSubmission {
      subject_id: body.subject_id,
      activity:   body.activity,
    })
    .await
    .map_err(store_err)?;

  Ok((
    StatusCode::CREATED,
    Json(SubmitResponse {
      submission_id:     record.submission_id,
      sector,
      estimated_co2e_kg: record.estimated_co2e_kg,
      created_at:        record.created_at,
    }),
  ))
}

// ─── Subject profiles ────────────────────────────────────────────────────────

/// `PUT /subjects` — mirror a profile from the identity service.
pub async fn upsert_subject<S, G>(
  State(state): State<AppState<S, G>>,
  Json(body): Json<NewProfile>,
) -> Result<Json<SubjectProfile>, ApiError>
where
  S: SubmissionStore + SubjectDirectory + ActionLog + 'static,
  G: NarrativeGenerator + 'static,
{
  let profile = state.store.upsert_profile(body).await.map_err(store_err)?;
  Ok(Json(profile))
}

/// `GET /subjects/:id`
pub async fn get_subject<S, G>(
  State(state): State<AppState<S, G>>,
  Path(subject_id): Path<Uuid>,
) -> Result<Json<SubjectProfile>, ApiError>
where
  S: SubmissionStore + SubjectDirectory + ActionLog + 'static,
  G: NarrativeGenerator + 'static,
{
  let profile = state
    .store
    .get_profile(subject_id)
    .await
    .map_err(store_err)?
    .ok_or(scout_core::Error::SubjectNotFound(subject_id))?;
  Ok(Json(profile))
}
