//! Narrative summaries — the numeric roll-up and prompt handed to the
//! external text-generation collaborator.
//!
//! The engine's only obligations here are assembling the per-sector numbers
//! into text and gating generation to one request per subject per cooldown
//! window (via the action log, under [`NARRATIVE_ACTION`]). The generation
//! call itself is behind [`NarrativeGenerator`].

use std::future::Future;

use crate::{
  aggregate::UserSectorTotal, estimate::round2, subject::SubjectProfile,
};

/// Action-log key under which narrative requests are rate-limited.
pub const NARRATIVE_ACTION: &str = "summary-interpret";

/// Abstraction over the external text-generation service.
pub trait NarrativeGenerator: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Produce free-text guidance for an assembled prompt.
  fn generate<'a>(
    &'a self,
    prompt: &'a str,
  ) -> impl Future<Output = Result<String, Self::Error>> + Send + 'a;
}

fn sector_details(rows: &[UserSectorTotal]) -> String {
  rows
    .iter()
    .map(|row| format!("{} kg from {}", row.total_emissions, row.sector))
    .collect::<Vec<_>>()
    .join("; ")
}

fn place(profile: &SubjectProfile) -> (String, &str) {
  (
    profile.city.as_deref().unwrap_or("").to_owned(),
    profile.region.as_deref().unwrap_or("the Philippines"),
  )
}

/// Plain-language description of a subject's reported totals.
pub fn describe(profile: &SubjectProfile, rows: &[UserSectorTotal]) -> String {
  let total: f64 = rows.iter().map(|row| row.total_emissions).sum();
  let (city, region) = place(profile);
  format!(
    "The {} '{}' located in {}, {} has reported a total annual greenhouse \
     gas emission of approximately {} kg CO2e. The emissions come from the \
     following sectors: {}.",
    profile.community_type.to_lowercase(),
    profile.community_name,
    city,
    region,
    round2(total),
    sector_details(rows),
  )
}

/// Prompt for the generation service: two locally relevant reduction actions
/// plus one offset strategy, as bullet points.
pub fn build_prompt(profile: &SubjectProfile, rows: &[UserSectorTotal]) -> String {
  let community_type = profile.community_type.to_lowercase();
  let (city, region) = place(profile);
  format!(
    "You are a sustainability expert in the Philippines. A {community_type} \
     named {} located in {}, {} has reported these annual greenhouse gas \
     emissions: {}. Give 2 locally relevant ways this {community_type} can \
     reduce its emissions, and 1 practical carbon offset strategy suitable \
     for Philippine communities. List them clearly using bullet points.",
    profile.community_name,
    city,
    region,
    sector_details(rows),
  )
}
