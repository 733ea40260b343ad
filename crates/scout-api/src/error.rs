//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use scout_core::Error as CoreError;
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error(transparent)]
  Core(#[from] CoreError),

  /// The narrative cooldown window is still open.
  #[error("only one narrative summary is allowed every 7 days")]
  CooldownActive { next_allowed_at: DateTime<Utc> },

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  fn next_allowed_at(&self) -> Option<DateTime<Utc>> {
    match self {
      ApiError::Core(CoreError::RateLimited { next_allowed_at, .. })
      | ApiError::CooldownActive { next_allowed_at } => Some(*next_allowed_at),
      _ => None,
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = match &self {
      ApiError::Core(CoreError::RateLimited { .. }) => StatusCode::FORBIDDEN,
      ApiError::Core(
        CoreError::SubjectNotFound(_) | CoreError::NoSubmissions(_),
      ) => StatusCode::NOT_FOUND,
      ApiError::Core(CoreError::Upstream(_)) => StatusCode::BAD_GATEWAY,
      ApiError::Core(CoreError::Serialization(_)) | ApiError::Store(_) => {
        StatusCode::INTERNAL_SERVER_ERROR
      }
      ApiError::CooldownActive { .. } => StatusCode::TOO_MANY_REQUESTS,
    };

    let mut body = json!({ "error": self.to_string() });
    if let Some(at) = self.next_allowed_at() {
      body["next_allowed_at"] = json!(at);
    }
    (status, Json(body)).into_response()
  }
}

/// Wrap a backend error for the internal-error path.
pub(crate) fn store_err<E>(err: E) -> ApiError
where
  E: std::error::Error + Send + Sync + 'static,
{
  ApiError::Store(Box::new(err))
}
