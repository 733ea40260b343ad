//! [`SqliteStore`] — the SQLite implementation of the core store traits.

use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use scout_core::{
  estimate,
  sector::Sector,
  store::{ActionLog, SubjectDirectory, SubmissionStore},
  subject::{NewProfile, SubjectProfile},
  submission::{NewSubmission, SubmissionRecord},
};

use crate::{
  Error, Result,
  encode::{
    RawProfile, RawSubmission, encode_dt, encode_sector, encode_uuid,
  },
  schema::SCHEMA,
};

const SUBMISSION_COLUMNS: &str = "submission_id, subject_id, sector, \
   activity_json, estimated_co2e_kg, created_at, updated_at";

fn submission_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawSubmission> {
  Ok(RawSubmission {
    submission_id:     row.get(0)?,
    subject_id:        row.get(1)?,
    sector:            row.get(2)?,
    activity_json:     row.get(3)?,
    estimated_co2e_kg: row.get(4)?,
    created_at:        row.get(5)?,
    updated_at:        row.get(6)?,
  })
}

fn profile_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawProfile> {
  Ok(RawProfile {
    subject_id:     row.get(0)?,
    community_type: row.get(1)?,
    community_name: row.get(2)?,
    region:         row.get(3)?,
    city:           row.get(4)?,
    created_at:     row.get(5)?,
  })
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Scout store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── SubmissionStore impl ────────────────────────────────────────────────────

impl SubmissionStore for SqliteStore {
  type Error = Error;

  async fn record_submission(&self, input: NewSubmission) -> Result<SubmissionRecord> {
    let now = Utc::now();
    let record = SubmissionRecord {
      submission_id: Uuid::new_v4(),
      subject_id: input.subject_id,
      // The estimate is attached here, against the current factor table;
      // it is never recomputed after this point.
      estimated_co2e_kg: estimate::estimate(&input.activity).kg(),
      activity: input.activity,
      created_at: now,
      updated_at: now,
    };

    let submission_id_str = encode_uuid(record.submission_id);
    let subject_id_str    = encode_uuid(record.subject_id);
    let sector_str        = encode_sector(record.sector()).to_owned();
    let activity_json_str = record.activity.to_json()
      .map_err(Error::Core)?
      .to_string();
    let estimated         = record.estimated_co2e_kg;
    let created_at_str    = encode_dt(record.created_at);
    let updated_at_str    = encode_dt(record.updated_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO submissions (
             submission_id, subject_id, sector, activity_json,
             estimated_co2e_kg, created_at, updated_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
          rusqlite::params![
            submission_id_str,
            subject_id_str,
            sector_str,
            activity_json_str,
            estimated,
            created_at_str,
            updated_at_str,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(record)
  }

  async fn latest_for(
    &self,
    subject_id: Uuid,
    sector: Sector,
  ) -> Result<Option<SubmissionRecord>> {
    let subject_id_str = encode_uuid(subject_id);
    let sector_str     = encode_sector(sector).to_owned();

    let raw: Option<RawSubmission> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!(
                "SELECT {SUBMISSION_COLUMNS} FROM submissions
                 WHERE subject_id = ?1 AND sector = ?2
                 ORDER BY created_at DESC, rowid DESC
                 LIMIT 1"
              ),
              rusqlite::params![subject_id_str, sector_str],
              submission_from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawSubmission::into_submission).transpose()
  }

  async fn list_submissions(&self) -> Result<Vec<SubmissionRecord>> {
    let raws: Vec<RawSubmission> = self
      .conn
      .call(|conn| {
        let mut stmt = conn
          .prepare(&format!("SELECT {SUBMISSION_COLUMNS} FROM submissions"))?;
        let rows = stmt
          .query_map([], submission_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawSubmission::into_submission).collect()
  }

  async fn list_for_subject(&self, subject_id: Uuid) -> Result<Vec<SubmissionRecord>> {
    let subject_id_str = encode_uuid(subject_id);

    let raws: Vec<RawSubmission> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {SUBMISSION_COLUMNS} FROM submissions WHERE subject_id = ?1"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![subject_id_str], submission_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawSubmission::into_submission).collect()
  }
}

// ─── SubjectDirectory impl ───────────────────────────────────────────────────

impl SubjectDirectory for SqliteStore {
  type Error = Error;

  async fn upsert_profile(&self, input: NewProfile) -> Result<SubjectProfile> {
    let subject_id_str = encode_uuid(input.subject_id);
    let created_at_str = encode_dt(Utc::now());
    let community_type = input.community_type;
    let community_name = input.community_name;
    let region         = input.region;
    let city           = input.city;

    let raw: RawProfile = self
      .conn
      .call(move |conn| {
        // `created_at` survives updates: it marks the first mirror.
        conn.execute(
          "INSERT INTO subjects (
             subject_id, community_type, community_name, region, city, created_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
           ON CONFLICT(subject_id) DO UPDATE SET
             community_type = excluded.community_type,
             community_name = excluded.community_name,
             region         = excluded.region,
             city           = excluded.city",
          rusqlite::params![
            subject_id_str,
            community_type,
            community_name,
            region,
            city,
            created_at_str,
          ],
        )?;

        Ok(conn.query_row(
          "SELECT subject_id, community_type, community_name, region, city,
                  created_at
           FROM subjects WHERE subject_id = ?1",
          rusqlite::params![subject_id_str],
          profile_from_row,
        )?)
      })
      .await?;

    raw.into_profile()
  }

  async fn get_profile(&self, subject_id: Uuid) -> Result<Option<SubjectProfile>> {
    let subject_id_str = encode_uuid(subject_id);

    let raw: Option<RawProfile> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT subject_id, community_type, community_name, region,
                      city, created_at
               FROM subjects WHERE subject_id = ?1",
              rusqlite::params![subject_id_str],
              profile_from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawProfile::into_profile).transpose()
  }

  async fn list_profiles(&self) -> Result<Vec<SubjectProfile>> {
    let raws: Vec<RawProfile> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT subject_id, community_type, community_name, region, city,
                  created_at
           FROM subjects",
        )?;
        let rows = stmt
          .query_map([], profile_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawProfile::into_profile).collect()
  }
}

// ─── ActionLog impl ──────────────────────────────────────────────────────────

impl ActionLog for SqliteStore {
  type Error = Error;

  async fn last_action(
    &self,
    subject_id: Uuid,
    action: &str,
  ) -> Result<Option<DateTime<Utc>>> {
    let subject_id_str = encode_uuid(subject_id);
    let action = action.to_owned();

    let raw: Option<String> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT requested_at FROM action_log
               WHERE subject_id = ?1 AND action = ?2
               ORDER BY requested_at DESC
               LIMIT 1",
              rusqlite::params![subject_id_str, action],
              |row| row.get(0),
            )
            .optional()?,
        )
      })
      .await?;

    raw.as_deref().map(crate::encode::decode_dt).transpose()
  }

  async fn record_action(
    &self,
    subject_id: Uuid,
    action: &str,
    at: DateTime<Utc>,
  ) -> Result<()> {
    let subject_id_str = encode_uuid(subject_id);
    let action = action.to_owned();
    let at_str = encode_dt(at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO action_log (subject_id, action, requested_at)
           VALUES (?1, ?2, ?3)",
          rusqlite::params![subject_id_str, action, at_str],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}
