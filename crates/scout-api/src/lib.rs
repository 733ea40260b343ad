//! JSON REST API for the Scout emissions engine.
//!
//! Exposes an axum [`Router`] backed by any store implementing the core
//! traits, plus a [`NarrativeGenerator`] for the gated summary endpoint.
//! Auth, TLS, caching, and transport concerns are the caller's
//! responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", scout_api::api_router(store.clone(), generator.clone()))
//! ```

pub mod analytics;
pub mod error;
pub mod narrative;
pub mod rankings;
pub mod submissions;
pub mod users;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post, put},
};
use scout_core::{
  narrative::NarrativeGenerator,
  store::{ActionLog, SubjectDirectory, SubmissionStore},
};

pub use error::ApiError;

/// Shared state threaded through all handlers.
pub struct AppState<S, G> {
  pub store:     Arc<S>,
  pub generator: Arc<G>,
}

impl<S, G> Clone for AppState<S, G> {
  fn clone(&self) -> Self {
    Self {
      store:     self.store.clone(),
      generator: self.generator.clone(),
    }
  }
}

/// Build a fully-materialised API router for `store` and `generator`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S, G>(store: Arc<S>, generator: Arc<G>) -> Router<()>
where
  S: SubmissionStore + SubjectDirectory + ActionLog + 'static,
  G: NarrativeGenerator + 'static,
{
  Router::new()
    // Submission (the only write path besides the profile mirror)
    .route("/submit", post(submissions::submit::<S, G>))
    // Subject metadata mirror
    .route(
      "/subjects",
      put(submissions::upsert_subject::<S, G>),
    )
    .route("/subjects/{id}", get(submissions::get_subject::<S, G>))
    // Community analytics
    .route("/community-summary", get(analytics::community_summary::<S, G>))
    .route("/timeseries", get(analytics::timeseries::<S, G>))
    .route("/aggregated-by-type", get(analytics::aggregated_by_type::<S, G>))
    .route(
      "/regional-trend-summary",
      get(analytics::regional_trend_summary::<S, G>),
    )
    // Sector decomposition
    .route("/sectoral-by-region", get(analytics::sectoral_by_region::<S, G>))
    .route("/sectoral-trend", get(analytics::sectoral_trend::<S, G>))
    .route(
      "/sectoral-by-community-type",
      get(analytics::sectoral_by_community_type::<S, G>),
    )
    // Rankings
    .route("/top-by-sector", get(rankings::top_by_sector::<S, G>))
    .route("/bottom-by-sector", get(rankings::bottom_by_sector::<S, G>))
    .route("/top-emitters", get(rankings::top_emitters::<S, G>))
    .route("/lowest-emitters", get(rankings::lowest_emitters::<S, G>))
    // Subject-scoped analytics
    .route("/user-trend/{subject_id}", get(users::user_trend::<S, G>))
    .route("/user-summary/{subject_id}", get(users::user_summary::<S, G>))
    .route(
      "/compare-user-to-average/{subject_id}",
      get(users::compare_to_average::<S, G>),
    )
    // Narrative summary (gated)
    .route("/narrative/{subject_id}", get(narrative::interpret::<S, G>))
    .with_state(AppState { store, generator })
}

// ─── Integration tests ───────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use std::sync::Arc;

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use scout_store_sqlite::SqliteStore;
  use serde_json::{Value, json};
  use tower::ServiceExt as _;
  use uuid::Uuid;

  use super::*;

  /// Scripted stand-in for the external generation service.
  struct StubGenerator {
    reply: Option<&'static str>,
  }

  impl NarrativeGenerator for StubGenerator {
    type Error = std::io::Error;

    async fn generate(&self, _prompt: &str) -> Result<String, Self::Error> {
      match self.reply {
        Some(text) => Ok(text.to_owned()),
        None => Err(std::io::Error::other("generation backend offline")),
      }
    }
  }

  async fn router_with(reply: Option<&'static str>) -> Router {
    let store = SqliteStore::open_in_memory().await.unwrap();
    api_router(Arc::new(store), Arc::new(StubGenerator { reply }))
  }

  async fn call(
    router: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
  ) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
      Some(value) => {
        builder = builder.header(header::CONTENT_TYPE, "application/json");
        Body::from(value.to_string())
      }
      None => Body::empty(),
    };
    let response = router
      .clone()
      .oneshot(builder.body(body).unwrap())
      .await
      .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
      .await
      .unwrap();
    let value = if bytes.is_empty() {
      Value::Null
    } else {
      serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
  }

  fn profile_body(subject_id: Uuid, name: &str, region: &str, city: &str) -> Value {
    json!({
      "subject_id": subject_id,
      "community_type": "LGU",
      "community_name": name,
      "region": region,
      "city": city,
    })
  }

  /// Two profiled subjects: A submits energy (76.87) and waste (10.0),
  /// B submits energy (35.45).
  async fn seeded(router: &Router) -> (Uuid, Uuid) {
    let a = Uuid::new_v4();
    let b = Uuid::new_v4();

    let (status, _) = call(
      router,
      "PUT",
      "/subjects",
      Some(profile_body(a, "Pasig LGU", "NCR", "Pasig")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    call(
      router,
      "PUT",
      "/subjects",
      Some(profile_body(b, "Cebu LGU", "Region VII – Central Visayas", "Cebu")),
    )
    .await;

    let (status, body) = call(
      router,
      "POST",
      "/submit",
      Some(json!({
        "subject_id": a,
        "sector": "energy",
        "electricity_consumed_kwh": 100.0,
        "lpg_used_kg": 2.0,
      })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "seed submit failed: {body}");

    call(
      router,
      "POST",
      "/submit",
      Some(json!({
        "subject_id": a,
        "sector": "waste",
        "waste_generated_kg_per_month": 100.0,
        "organic_fraction_percent": 50.0,
        "waste_disposal_method": "composting",
      })),
    )
    .await;

    call(
      router,
      "POST",
      "/submit",
      Some(json!({
        "subject_id": b,
        "sector": "energy",
        "electricity_consumed_kwh": 50.0,
      })),
    )
    .await;

    (a, b)
  }

  // ── Submission ─────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn submit_estimates_and_returns_created() {
    let router = router_with(Some("ok")).await;
    let subject_id = Uuid::new_v4();

    let (status, body) = call(
      &router,
      "POST",
      "/submit",
      Some(json!({
        "subject_id": subject_id,
        "sector": "energy",
        "electricity_consumed_kwh": 100.0,
        "lpg_used_kg": 2.0,
      })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["sector"], "energy");
    assert_eq!(body["estimated_co2e_kg"], 76.87);
  }

  #[tokio::test]
  async fn second_submission_in_the_window_is_forbidden() {
    let router = router_with(Some("ok")).await;
    let subject_id = Uuid::new_v4();
    let energy = json!({
      "subject_id": subject_id,
      "sector": "energy",
      "electricity_consumed_kwh": 10.0,
    });

    let (status, _) = call(&router, "POST", "/submit", Some(energy.clone())).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = call(&router, "POST", "/submit", Some(energy)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(body["next_allowed_at"].is_string(), "body: {body}");

    // A different sector is not gated by the energy submission.
    let (status, _) = call(
      &router,
      "POST",
      "/submit",
      Some(json!({
        "subject_id": subject_id,
        "sector": "transport",
        "number_of_vehicles": 1,
        "distance_travelled_daily_km": 5.0,
        "travel_frequency_per_week": 5,
        "trips_per_day": 2,
      })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
  }

  #[tokio::test]
  async fn unknown_sector_is_rejected_before_the_estimator() {
    let router = router_with(Some("ok")).await;
    let (status, _) = call(
      &router,
      "POST",
      "/submit",
      Some(json!({ "subject_id": Uuid::new_v4(), "sector": "forestry" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
  }

  // ── Subject profiles ───────────────────────────────────────────────────────

  #[tokio::test]
  async fn subject_profile_round_trips() {
    let router = router_with(Some("ok")).await;
    let subject_id = Uuid::new_v4();

    call(
      &router,
      "PUT",
      "/subjects",
      Some(profile_body(subject_id, "Pasig LGU", "NCR", "Pasig")),
    )
    .await;

    let (status, body) =
      call(&router, "GET", &format!("/subjects/{subject_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["community_name"], "Pasig LGU");
  }

  #[tokio::test]
  async fn unknown_subject_is_not_found() {
    let router = router_with(Some("ok")).await;
    let (status, _) =
      call(&router, "GET", &format!("/subjects/{}", Uuid::new_v4()), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  // ── Aggregation endpoints ──────────────────────────────────────────────────

  #[tokio::test]
  async fn empty_history_yields_empty_result_sets() {
    let router = router_with(Some("ok")).await;
    for uri in [
      "/community-summary",
      "/timeseries",
      "/aggregated-by-type",
      "/regional-trend-summary",
      "/sectoral-by-region",
      "/sectoral-trend",
      "/sectoral-by-community-type",
      "/top-by-sector",
      "/bottom-by-sector",
      "/top-emitters",
      "/lowest-emitters",
    ] {
      let (status, body) = call(&router, "GET", uri, None).await;
      assert_eq!(status, StatusCode::OK, "uri: {uri}");
      assert_eq!(body, json!([]), "uri: {uri}");
    }
  }

  #[tokio::test]
  async fn community_summary_joins_profiles() {
    let router = router_with(Some("ok")).await;
    seeded(&router).await;

    let (status, body) = call(&router, "GET", "/community-summary", None).await;
    assert_eq!(status, StatusCode::OK);
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    // Ordered by region: NCR before Region VII.
    assert_eq!(rows[0]["region"], "NCR");
    assert_eq!(rows[0]["total_emissions"], 86.87);
    assert_eq!(rows[0]["count"], 2);
    assert_eq!(rows[1]["total_emissions"], 35.45);
  }

  #[tokio::test]
  async fn timeseries_buckets_todays_submissions_together() {
    let router = router_with(Some("ok")).await;
    seeded(&router).await;

    let (status, body) = call(&router, "GET", "/timeseries", None).await;
    assert_eq!(status, StatusCode::OK);
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["total_emissions"], 122.32);
    assert_eq!(rows[0]["count"], 3);
  }

  #[tokio::test]
  async fn sectoral_by_region_honors_the_substring_filter() {
    let router = router_with(Some("ok")).await;
    seeded(&router).await;

    let (status, body) =
      call(&router, "GET", "/sectoral-by-region?regions=ncr", None).await;
    assert_eq!(status, StatusCode::OK);
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["sector"], "energy");
    assert_eq!(rows[0]["total_emissions"], 76.87);
    assert_eq!(rows[1]["sector"], "waste");
    assert_eq!(rows[1]["total_emissions"], 10.0);
  }

  #[tokio::test]
  async fn top_emitters_carry_rank_percentiles() {
    let router = router_with(Some("ok")).await;
    seeded(&router).await;

    let (status, body) = call(&router, "GET", "/top-emitters", None).await;
    assert_eq!(status, StatusCode::OK);
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["community_name"], "Pasig LGU");
    assert_eq!(rows[0]["total_emissions"], 86.87);
    assert_eq!(rows[0]["percentile_rank"], 50.0);
    assert_eq!(rows[1]["percentile_rank"], 100.0);

    let (_, body) = call(&router, "GET", "/lowest-emitters?limit=1", None).await;
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["community_name"], "Cebu LGU");
  }

  #[tokio::test]
  async fn top_by_sector_groups_leaderboards() {
    let router = router_with(Some("ok")).await;
    seeded(&router).await;

    let (status, body) = call(&router, "GET", "/top-by-sector?limit=1", None).await;
    assert_eq!(status, StatusCode::OK);
    let boards = body.as_array().unwrap();
    assert_eq!(boards.len(), 2);
    assert_eq!(boards[0]["sector"], "energy");
    assert_eq!(boards[0]["entries"][0]["community_name"], "Pasig LGU");
    assert_eq!(boards[1]["sector"], "waste");
  }

  #[tokio::test]
  async fn user_summary_and_comparison_agree_on_totals() {
    let router = router_with(Some("ok")).await;
    let (a, b) = seeded(&router).await;

    let (status, body) =
      call(&router, "GET", &format!("/user-summary/{a}"), None).await;
    assert_eq!(status, StatusCode::OK);
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["sector"], "energy");
    assert_eq!(rows[0]["total_emissions"], 76.87);

    let (status, body) =
      call(&router, "GET", &format!("/compare-user-to-average/{b}"), None).await;
    assert_eq!(status, StatusCode::OK);
    let rows = body.as_array().unwrap();
    // B only appears in the energy population; waste still reports B at zero.
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["sector"], "energy");
    assert_eq!(rows[0]["user_total"], 35.45);
    assert_eq!(rows[0]["national_avg"], 56.16);
    assert_eq!(rows[0]["difference"], -20.71);
    assert_eq!(rows[0]["percentile_rank"], 0.0);
    assert_eq!(rows[0]["entries"], 2);
    assert_eq!(rows[1]["sector"], "waste");
    assert_eq!(rows[1]["user_total"], 0.0);
  }

  #[tokio::test]
  async fn user_queries_for_unknown_subjects_are_empty_not_errors() {
    let router = router_with(Some("ok")).await;
    seeded(&router).await;

    let unknown = Uuid::new_v4();
    for uri in [
      format!("/user-summary/{unknown}"),
      format!("/user-trend/{unknown}"),
    ] {
      let (status, body) = call(&router, "GET", &uri, None).await;
      assert_eq!(status, StatusCode::OK);
      assert_eq!(body, json!([]));
    }
  }

  // ── Narrative ──────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn narrative_generates_then_enters_cooldown() {
    let router = router_with(Some("• Plant mangroves")).await;
    let (a, _) = seeded(&router).await;

    let (status, body) =
      call(&router, "GET", &format!("/narrative/{a}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["guidance"], "• Plant mangroves");
    assert!(
      body["description"]
        .as_str()
        .unwrap()
        .contains("Pasig LGU")
    );
    assert_eq!(body["sectors"].as_array().unwrap().len(), 2);

    let (status, body) =
      call(&router, "GET", &format!("/narrative/{a}"), None).await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert!(body["next_allowed_at"].is_string());
  }

  #[tokio::test]
  async fn narrative_requires_profile_and_history() {
    let router = router_with(Some("ok")).await;

    // No profile at all.
    let (status, _) =
      call(&router, "GET", &format!("/narrative/{}", Uuid::new_v4()), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Profile but no submissions.
    let lurker = Uuid::new_v4();
    call(
      &router,
      "PUT",
      "/subjects",
      Some(profile_body(lurker, "Quiet LGU", "NCR", "Taguig")),
    )
    .await;
    let (status, _) =
      call(&router, "GET", &format!("/narrative/{lurker}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn upstream_failure_maps_to_bad_gateway_and_keeps_the_window_open() {
    let router = router_with(None).await;
    let (a, _) = seeded(&router).await;

    let (status, _) = call(&router, "GET", &format!("/narrative/{a}"), None).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);

    // The failed call did not consume the window: still 502, not 429.
    let (status, _) = call(&router, "GET", &format!("/narrative/{a}"), None).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
  }
}
