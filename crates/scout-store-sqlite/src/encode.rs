//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! All timestamps are stored as RFC 3339 strings. Activity payloads are
//! stored as compact JSON next to their sector discriminant column. UUIDs are
//! stored as hyphenated lowercase strings.

use chrono::{DateTime, Utc};
use scout_core::{
  activity::ActivityRecord,
  sector::Sector,
  subject::SubjectProfile,
  submission::SubmissionRecord,
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::Decode(format!("timestamp: {e}")))
}

// ─── Sector ──────────────────────────────────────────────────────────────────

pub fn encode_sector(sector: Sector) -> &'static str { sector.as_str() }

pub fn decode_sector(s: &str) -> Result<Sector> {
  Sector::parse(s).ok_or_else(|| Error::Decode(format!("unknown sector: {s:?}")))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read directly from a `submissions` row.
pub struct RawSubmission {
  pub submission_id:     String,
  pub subject_id:        String,
  pub sector:            String,
  pub activity_json:     String,
  pub estimated_co2e_kg: f64,
  pub created_at:        String,
  pub updated_at:        String,
}

impl RawSubmission {
  pub fn into_submission(self) -> Result<SubmissionRecord> {
    let sector = decode_sector(&self.sector)?;
    let payload: serde_json::Value = serde_json::from_str(&self.activity_json)?;
    let activity = ActivityRecord::from_parts(sector, payload)?;

    Ok(SubmissionRecord {
      submission_id: decode_uuid(&self.submission_id)?,
      subject_id: decode_uuid(&self.subject_id)?,
      activity,
      estimated_co2e_kg: self.estimated_co2e_kg,
      created_at: decode_dt(&self.created_at)?,
      updated_at: decode_dt(&self.updated_at)?,
    })
  }
}

/// Raw strings read directly from a `subjects` row.
pub struct RawProfile {
  pub subject_id:     String,
  pub community_type: String,
  pub community_name: String,
  pub region:         Option<String>,
  pub city:           Option<String>,
  pub created_at:     String,
}

impl RawProfile {
  pub fn into_profile(self) -> Result<SubjectProfile> {
    Ok(SubjectProfile {
      subject_id:     decode_uuid(&self.subject_id)?,
      community_type: self.community_type,
      community_name: self.community_name,
      region:         self.region,
      city:           self.city,
      created_at:     decode_dt(&self.created_at)?,
    })
  }
}
