//! Store trait abstractions implemented by storage backends.
//!
//! The traits are implemented by storage backends (e.g. `scout-store-sqlite`).
//! Higher layers depend on these abstractions, not on any concrete backend.
//! All methods return `Send` futures so the traits can be used in
//! multi-threaded async runtimes (e.g. tokio with `axum`).

use std::future::Future;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
  sector::Sector,
  subject::{NewProfile, SubjectProfile},
  submission::{NewSubmission, SubmissionRecord},
};

// ─── Submissions ─────────────────────────────────────────────────────────────

/// Append-only writer and reader for the submission history.
///
/// Writes never update or delete. The store attaches the estimator's output
/// for the record's own activity at append time, which is what makes the
/// estimate reflect the factor table as of submission.
pub trait SubmissionStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Persist a new submission, assigning id, timestamps, and estimate.
  fn record_submission(
    &self,
    input: NewSubmission,
  ) -> impl Future<Output = Result<SubmissionRecord, Self::Error>> + Send + '_;

  /// Most recent submission for a (subject, sector) pair by `created_at`.
  /// This is the rate gate's timestamp oracle.
  fn latest_for(
    &self,
    subject_id: Uuid,
    sector: Sector,
  ) -> impl Future<Output = Result<Option<SubmissionRecord>, Self::Error>> + Send + '_;

  /// The full submission history.
  fn list_submissions(
    &self,
  ) -> impl Future<Output = Result<Vec<SubmissionRecord>, Self::Error>> + Send + '_;

  /// All submissions for one subject.
  fn list_for_subject(
    &self,
    subject_id: Uuid,
  ) -> impl Future<Output = Result<Vec<SubmissionRecord>, Self::Error>> + Send + '_;
}

// ─── Subjects ────────────────────────────────────────────────────────────────

/// Read access to denormalized subject metadata, plus the upsert used to
/// mirror it from the external identity service.
pub trait SubjectDirectory: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  fn upsert_profile(
    &self,
    input: NewProfile,
  ) -> impl Future<Output = Result<SubjectProfile, Self::Error>> + Send + '_;

  fn get_profile(
    &self,
    subject_id: Uuid,
  ) -> impl Future<Output = Result<Option<SubjectProfile>, Self::Error>> + Send + '_;

  fn list_profiles(
    &self,
  ) -> impl Future<Output = Result<Vec<SubjectProfile>, Self::Error>> + Send + '_;
}

// ─── Action log ──────────────────────────────────────────────────────────────

/// Timestamp log for cooldown-gated actions other than submission itself
/// (e.g. narrative generation).
pub trait ActionLog: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// When the subject last performed `action`, if ever.
  fn last_action<'a>(
    &'a self,
    subject_id: Uuid,
    action: &'a str,
  ) -> impl Future<Output = Result<Option<DateTime<Utc>>, Self::Error>> + Send + 'a;

  fn record_action<'a>(
    &'a self,
    subject_id: Uuid,
    action: &'a str,
    at: DateTime<Utc>,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;
}
