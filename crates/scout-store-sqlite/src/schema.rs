//! SQL schema for the Scout SQLite store.
//!
//! Executed once at connection startup via `PRAGMA user_version`. Future
//! migrations will be gated on that version number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

-- Denormalized community metadata, mirrored from the identity service.
CREATE TABLE IF NOT EXISTS subjects (
    subject_id     TEXT PRIMARY KEY,
    community_type TEXT NOT NULL,   -- 'LGU' | 'Barangay' | 'School' | ...
    community_name TEXT NOT NULL,
    region         TEXT,
    city           TEXT,
    created_at     TEXT NOT NULL    -- ISO 8601 UTC; store-assigned
);

-- Submissions are strictly append-only.
-- No UPDATE or DELETE is ever issued against this table.
-- No FK to subjects: profiles are mirrored asynchronously, so a submission
-- may precede its subject's profile row.
CREATE TABLE IF NOT EXISTS submissions (
    submission_id     TEXT PRIMARY KEY,
    subject_id        TEXT NOT NULL,
    sector            TEXT NOT NULL,   -- discriminant of ActivityRecord variant
    activity_json     TEXT NOT NULL,   -- JSON payload (fields only, no tag)
    estimated_co2e_kg REAL NOT NULL,
    created_at        TEXT NOT NULL,   -- ISO 8601 UTC; store-assigned
    updated_at        TEXT NOT NULL
);

-- Cooldown log for non-submission actions (narrative generation).
CREATE TABLE IF NOT EXISTS action_log (
    subject_id   TEXT NOT NULL,
    action       TEXT NOT NULL,
    requested_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS submissions_pair_idx
    ON submissions(subject_id, sector, created_at);
CREATE INDEX IF NOT EXISTS submissions_created_idx ON submissions(created_at);
CREATE INDEX IF NOT EXISTS action_log_idx
    ON action_log(subject_id, action, requested_at);

PRAGMA user_version = 1;
";
