//! Subject profiles — denormalized community metadata.
//!
//! Subject identity and lifecycle belong to the external identity service;
//! this engine keeps only the metadata it joins against when aggregating.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Denormalized metadata for one reporting community.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectProfile {
  pub subject_id:     Uuid,
  /// Community category, e.g. "LGU", "Barangay", "School".
  pub community_type: String,
  pub community_name: String,
  pub region:         Option<String>,
  pub city:           Option<String>,
  pub created_at:     DateTime<Utc>,
}

/// Input to [`crate::store::SubjectDirectory::upsert_profile`].
/// `created_at` is assigned by the store on first insert and kept on update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProfile {
  pub subject_id:     Uuid,
  pub community_type: String,
  pub community_name: String,
  pub region:         Option<String>,
  pub city:           Option<String>,
}
