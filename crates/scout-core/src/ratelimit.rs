//! The rate gate — one submission per (subject, sector) per cooldown window.

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::{Error, Result, sector::Sector, store::SubmissionStore};

/// Minimum spacing between two submissions for the same (subject, sector)
/// pair, and between two narrative requests for the same subject.
pub fn cooldown() -> Duration { Duration::days(7) }

/// Outcome of a gate check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
  Allow,
  Reject { next_allowed_at: DateTime<Utc> },
}

impl GateDecision {
  pub fn is_allowed(self) -> bool { matches!(self, Self::Allow) }

  /// Convert a rejection into [`Error::RateLimited`] for the given sector.
  pub fn into_result(self, sector: Sector) -> Result<()> {
    match self {
      Self::Allow => Ok(()),
      Self::Reject { next_allowed_at } => {
        Err(Error::RateLimited { sector, next_allowed_at })
      }
    }
  }
}

/// Decide whether a new action is admissible given the previous one.
///
/// Strictly less than the cooldown since the last action rejects; exactly the
/// cooldown (or more) allows. No previous action always allows.
pub fn evaluate(last: Option<DateTime<Utc>>, now: DateTime<Utc>) -> GateDecision {
  match last {
    Some(at) if now - at < cooldown() => {
      GateDecision::Reject { next_allowed_at: at + cooldown() }
    }
    _ => GateDecision::Allow,
  }
}

/// Gate check against the stored submission history.
///
/// The check and the subsequent insert are not atomic: two concurrent
/// submissions for the same pair can both pass inside one window. Downstream
/// consumers tolerate the duplicate.
pub async fn check<S: SubmissionStore>(
  store: &S,
  subject_id: Uuid,
  sector: Sector,
  now: DateTime<Utc>,
) -> Result<GateDecision, S::Error> {
  let latest = store.latest_for(subject_id, sector).await?;
  Ok(evaluate(latest.map(|s| s.created_at), now))
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone;

  use super::*;

  fn at(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, day, hour, 0, 0).unwrap()
  }

  #[test]
  fn no_history_allows() {
    assert_eq!(evaluate(None, at(1, 0)), GateDecision::Allow);
  }

  #[test]
  fn inside_the_window_rejects_with_next_allowed() {
    let t0 = at(1, 0);
    // 6 days 23 hours later: still closed.
    let decision = evaluate(Some(t0), at(7, 23));
    assert_eq!(
      decision,
      GateDecision::Reject { next_allowed_at: t0 + cooldown() }
    );
  }

  #[test]
  fn window_opens_at_exactly_the_cooldown() {
    let t0 = at(1, 0);
    assert_eq!(evaluate(Some(t0), t0 + cooldown()), GateDecision::Allow);
    // One second past the boundary is also open.
    assert_eq!(
      evaluate(Some(t0), t0 + cooldown() + Duration::seconds(1)),
      GateDecision::Allow
    );
  }

  #[test]
  fn rejection_converts_to_rate_limited_error() {
    let t0 = at(1, 0);
    let err = evaluate(Some(t0), at(2, 0))
      .into_result(Sector::Energy)
      .unwrap_err();
    assert!(matches!(
      err,
      Error::RateLimited { sector: Sector::Energy, next_allowed_at }
        if next_allowed_at == t0 + cooldown()
    ));
  }
}
