//! Error types for `scout-core`.

use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::sector::Sector;

#[derive(Debug, Error)]
pub enum Error {
  #[error(
    "only one {sector} submission is allowed every 7 days; next allowed at {next_allowed_at}"
  )]
  RateLimited {
    sector:          Sector,
    next_allowed_at: DateTime<Utc>,
  },

  #[error("subject not found: {0}")]
  SubjectNotFound(Uuid),

  #[error("no submissions recorded for subject {0}")]
  NoSubmissions(Uuid),

  #[error("upstream generation service failed: {0}")]
  Upstream(String),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
