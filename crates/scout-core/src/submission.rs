//! Submission records — the persisted unit of reported activity.
//!
//! A submission is immutable once written. Corrections require a fresh
//! submission, which is itself subject to the rate gate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{activity::ActivityRecord, sector::Sector};

/// One persisted submission. The serialised form is flat: the activity
/// payload's fields sit next to the envelope fields, tagged by `sector`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionRecord {
  pub submission_id:     Uuid,
  pub subject_id:        Uuid,
  #[serde(flatten)]
  pub activity:          ActivityRecord,
  /// Estimator output for `activity` at creation time; never recomputed, so
  /// aggregates reflect the factor table as of submission.
  pub estimated_co2e_kg: f64,
  pub created_at:        DateTime<Utc>,
  pub updated_at:        DateTime<Utc>,
}

impl SubmissionRecord {
  pub fn sector(&self) -> Sector { self.activity.sector() }
}

/// Input to [`crate::store::SubmissionStore::record_submission`].
/// The id, timestamps, and estimate are all assigned by the store.
#[derive(Debug, Clone)]
pub struct NewSubmission {
  pub subject_id: Uuid,
  pub activity:   ActivityRecord,
}
