//! HTTP-backed narrative generator.
//!
//! Talks to an OpenAI-compatible chat-completions endpoint (the hosted
//! inference routers all speak this shape). Generation stays entirely
//! optional: without an API token every call reports an upstream failure and
//! the rest of the API is unaffected.

use scout_core::narrative::NarrativeGenerator;
use serde::Deserialize;
use thiserror::Error;

/// Configuration block for the generator, from the `[narrative]` table.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NarrativeConfig {
  pub endpoint:  String,
  pub model:     String,
  pub api_token: Option<String>,
}

impl Default for NarrativeConfig {
  fn default() -> Self {
    Self {
      endpoint:  "https://router.huggingface.co/v1/chat/completions".to_owned(),
      model:     "mistralai/Mistral-7B-Instruct-v0.2".to_owned(),
      api_token: None,
    }
  }
}

#[derive(Debug, Error)]
pub enum GeneratorError {
  #[error("narrative generation is not configured (no api token)")]
  Unconfigured,

  #[error("completion request failed: {0}")]
  Http(#[from] reqwest::Error),

  #[error("completion response had no message content")]
  MalformedResponse,
}

/// A [`NarrativeGenerator`] over a chat-completions HTTP endpoint.
pub struct HttpNarrativeGenerator {
  client: reqwest::Client,
  config: NarrativeConfig,
}

impl HttpNarrativeGenerator {
  pub fn new(config: NarrativeConfig) -> Self {
    Self { client: reqwest::Client::new(), config }
  }
}

impl NarrativeGenerator for HttpNarrativeGenerator {
  type Error = GeneratorError;

  async fn generate(&self, prompt: &str) -> Result<String, GeneratorError> {
    let token = self
      .config
      .api_token
      .as_deref()
      .ok_or(GeneratorError::Unconfigured)?;

    let body = serde_json::json!({
      "model": self.config.model,
      "messages": [
        { "role": "system", "content": "You are a helpful sustainability expert." },
        { "role": "user", "content": prompt },
      ],
      "temperature": 0.7,
      "max_tokens": 400,
    });

    let response = self
      .client
      .post(&self.config.endpoint)
      .bearer_auth(token)
      .json(&body)
      .send()
      .await?
      .error_for_status()?;

    let completion: serde_json::Value = response.json().await?;
    completion["choices"][0]["message"]["content"]
      .as_str()
      .map(|text| text.trim().to_owned())
      .ok_or(GeneratorError::MalformedResponse)
  }
}
