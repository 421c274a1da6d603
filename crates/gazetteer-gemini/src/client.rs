//! [`GeminiClient`] and the `generateContent` wire types.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use gazetteer_core::upstream::FactGenerator;

use crate::{Error, Result};

/// Default public endpoint for the generative-language API.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Default model identifier.
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

// ─── Configuration ───────────────────────────────────────────────────────────

/// Connection settings for the generative-language API.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
  pub api_key:  String,
  pub model:    String,
  pub base_url: String,
}

impl GeminiConfig {
  /// Config for `api_key` with the default model and endpoint.
  pub fn new(api_key: impl Into<String>) -> Self {
    Self {
      api_key:  api_key.into(),
      model:    DEFAULT_MODEL.to_string(),
      base_url: DEFAULT_BASE_URL.to_string(),
    }
  }
}

// ─── Prompt ──────────────────────────────────────────────────────────────────

/// The fixed prompt template, parameterised only by the city name: restate
/// the name, give the population if available, then five notable points,
/// one numbered fact per line.
pub fn fact_prompt(city: &str) -> String {
  format!(
    "You are a knowledgeable assistant who provides interesting facts about \
     different cities.\n\
     Provide information about the city {city} in the following format:\n\
     \n\
     1. First state the name of the city clearly.\n\
     2. Then provide its population if available.\n\
     3. Then provide five interesting points about its history, culture, \
     economy, or other notable aspects.\n\
     \n\
     Present the information in a clear, numbered list format with each \
     fact on a new line."
  )
}

// ─── Wire types ──────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
  contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
  parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
  text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
  #[serde(default)]
  candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
  content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
  #[serde(default)]
  parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
  #[serde(default)]
  text: String,
}

impl GenerateResponse {
  /// Concatenated text parts of the first candidate, or `None` when the
  /// response carries no usable text.
  fn into_text(self) -> Option<String> {
    let content = self.candidates.into_iter().next()?.content?;
    let text: String = content.parts.into_iter().map(|p| p.text).collect();
    if text.trim().is_empty() { None } else { Some(text) }
  }
}

// ─── Client ──────────────────────────────────────────────────────────────────

/// Async client for the `generateContent` endpoint.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct GeminiClient {
  client: Client,
  config: GeminiConfig,
}

impl GeminiClient {
  /// Build a client with a bounded request timeout. There is no retry or
  /// backoff; a timeout surfaces as an upstream failure.
  pub fn new(config: GeminiConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()?;
    Ok(Self { client, config })
  }

  fn url(&self) -> String {
    format!(
      "{}/v1beta/models/{}:generateContent",
      self.config.base_url.trim_end_matches('/'),
      self.config.model,
    )
  }
}

impl FactGenerator for GeminiClient {
  type Error = Error;

  async fn generate(&self, city: &str) -> Result<String> {
    let prompt  = fact_prompt(city);
    let request = GenerateRequest {
      contents: vec![Content {
        parts: vec![Part { text: &prompt }],
      }],
    };

    tracing::debug!(model = %self.config.model, city, "requesting city facts");

    let resp = self
      .client
      .post(self.url())
      .query(&[("key", self.config.api_key.as_str())])
      .json(&request)
      .send()
      .await?;

    let status = resp.status();
    if !status.is_success() {
      let message = resp.text().await.unwrap_or_default();
      return Err(Error::Api { status, message });
    }

    let body: GenerateResponse = resp.json().await?;
    body.into_text().ok_or(Error::EmptyResponse)
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn prompt_mentions_the_city_and_format() {
    let prompt = fact_prompt("Berlin");
    assert!(prompt.contains("the city Berlin"));
    assert!(prompt.contains("numbered list"));
    assert!(prompt.contains("population"));
  }

  #[test]
  fn response_text_is_taken_from_the_first_candidate() {
    let resp: GenerateResponse = serde_json::from_str(
      r#"{
        "candidates": [
          {"content": {"parts": [{"text": "Berlin facts.\n"}, {"text": "More."}]}},
          {"content": {"parts": [{"text": "ignored"}]}}
        ]
      }"#,
    )
    .unwrap();
    assert_eq!(resp.into_text().as_deref(), Some("Berlin facts.\nMore."));
  }

  #[test]
  fn response_without_candidates_is_empty() {
    let resp: GenerateResponse = serde_json::from_str(r#"{}"#).unwrap();
    assert!(resp.into_text().is_none());
  }

  #[test]
  fn whitespace_only_response_is_empty() {
    let resp: GenerateResponse = serde_json::from_str(
      r#"{"candidates": [{"content": {"parts": [{"text": "  \n "}]}}]}"#,
    )
    .unwrap();
    assert!(resp.into_text().is_none());
  }

  #[test]
  fn url_joins_base_model_and_method() {
    let client = GeminiClient::new(GeminiConfig {
      api_key:  "k".into(),
      model:    "gemini-2.0-flash".into(),
      base_url: "https://example.test/".into(),
    })
    .unwrap();
    assert_eq!(
      client.url(),
      "https://example.test/v1beta/models/gemini-2.0-flash:generateContent"
    );
  }
}
