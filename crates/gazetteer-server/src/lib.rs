//! HTTP layer for Gazetteer.
//!
//! Exposes an axum [`Router`] serving the city-facts API, backed by any
//! [`CityStore`] and [`FactGenerator`].
//!
//! # Response contract
//!
//! Both the cache-hit and the fetch-on-miss paths of `GET /city/{name}`
//! rebuild the facts text from the stored rows, so a city always renders
//! the same way regardless of which path produced it.

pub mod error;
pub mod handlers;

pub use error::ApiError;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  routing::{get, post},
};
use gazetteer_core::{store::CityStore, upstream::FactGenerator};
use serde::Deserialize;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` layered
/// under `GAZETTEER_*` environment variables.
///
/// The generative API key is required and has no default; startup fails
/// fast without it.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host: String,
  #[serde(default = "default_port")]
  pub port: u16,
  /// SQLite database file.
  #[serde(default = "default_db_path")]
  pub db_path: PathBuf,
  /// `GAZETTEER_GEMINI_API_KEY` in the environment.
  pub gemini_api_key: String,
  #[serde(default = "default_model")]
  pub gemini_model: String,
}

fn default_host() -> String { "127.0.0.1".to_string() }
fn default_port() -> u16 { 8000 }
fn default_db_path() -> PathBuf { PathBuf::from("city_facts.db") }
fn default_model() -> String { gazetteer_gemini::DEFAULT_MODEL.to_string() }

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState<S, G> {
  pub store:     Arc<S>,
  pub generator: Arc<G>,
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build an axum [`Router`] for the city-facts API.
pub fn router<S, G>(state: AppState<S, G>) -> Router
where
  S: CityStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
  G: FactGenerator + Clone + Send + Sync + 'static,
  G::Error: std::error::Error + Send + Sync + 'static,
{
  Router::new()
    .route("/city/{name}", get(handlers::get_city::<S, G>))
    .route("/city", post(handlers::save_city::<S, G>))
    .route("/city/display", post(handlers::display_city))
    .with_state(state)
    .layer(TraceLayer::new_for_http())
    .layer(CorsLayer::permissive())
}

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;
  use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
  };

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use gazetteer_store_sqlite::SqliteStore;
  use tower::ServiceExt as _;

  // ── Stub generator ──────────────────────────────────────────────────────────

  #[derive(Debug, thiserror::Error)]
  #[error("stub generator failure")]
  struct StubError;

  /// Canned generator; counts calls so tests can assert cache behaviour.
  #[derive(Clone)]
  struct StubGenerator {
    response: Option<&'static str>,
    calls:    Arc<AtomicUsize>,
  }

  impl StubGenerator {
    fn ok(response: &'static str) -> Self {
      Self {
        response: Some(response),
        calls:    Arc::new(AtomicUsize::new(0)),
      }
    }

    fn failing() -> Self {
      Self {
        response: None,
        calls:    Arc::new(AtomicUsize::new(0)),
      }
    }

    fn calls(&self) -> usize { self.calls.load(Ordering::SeqCst) }
  }

  impl FactGenerator for StubGenerator {
    type Error = StubError;

    async fn generate(&self, _city: &str) -> Result<String, StubError> {
      self.calls.fetch_add(1, Ordering::SeqCst);
      match self.response {
        Some(text) => Ok(text.to_string()),
        None => Err(StubError),
      }
    }
  }

  const BERLIN_FACTS: &str = "\
1. The city is Berlin.
Population: 3.7 million

History: Berlin was divided by a wall until 1989.
Culture: The city has three opera houses.
Economy: Startups cluster around Silicon Allee.
Transit: The U-Bahn network is over 140 km long.";

  // ── Helpers ─────────────────────────────────────────────────────────────────

  async fn make_state(
    generator: StubGenerator,
  ) -> AppState<SqliteStore, StubGenerator> {
    let store = SqliteStore::open_in_memory().await.unwrap();
    AppState {
      store:     Arc::new(store),
      generator: Arc::new(generator),
    }
  }

  async fn send(
    state:  AppState<SqliteStore, StubGenerator>,
    method: &str,
    uri:    &str,
    body:   Option<serde_json::Value>,
  ) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
      Some(v) => {
        builder = builder.header(header::CONTENT_TYPE, "application/json");
        Body::from(v.to_string())
      }
      None => Body::empty(),
    };
    let req  = builder.body(body).unwrap();
    let resp = router(state).oneshot(req).await.unwrap();

    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
      .await
      .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, json)
  }

  // ── GET /city/{name} ────────────────────────────────────────────────────────

  #[tokio::test]
  async fn miss_fetches_persists_then_serves_from_cache() {
    let generator = StubGenerator::ok(BERLIN_FACTS);
    let state = make_state(generator.clone()).await;

    let (status, body) = send(state.clone(), "GET", "/city/Berlin", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Berlin");

    let facts = body["facts"].as_str().unwrap();
    assert!(facts.starts_with("Facts about Berlin:\n\n"), "facts: {facts}");
    assert!(facts.contains("Population: 3.7 million"));
    assert!(facts.contains("Fact: 1. The city is Berlin."));
    // Header, separator, and the six parsed lines; the blank source line is
    // dropped rather than stored.
    assert_eq!(facts.lines().count(), 8);
    assert_eq!(generator.calls(), 1);

    // A differently-cased lookup must hit the cache, not the generator.
    let (status, body) = send(state, "GET", "/city/berlin", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Berlin");
    assert_eq!(body["facts"].as_str().unwrap(), facts);
    assert_eq!(generator.calls(), 1);
  }

  #[tokio::test]
  async fn generator_failure_returns_502_and_persists_nothing() {
    let state = make_state(StubGenerator::failing()).await;

    let (status, body) = send(state.clone(), "GET", "/city/Atlantis", None).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(
      body["error"]
        .as_str()
        .unwrap()
        .contains("failed to fetch city facts")
    );

    // The failure must leave no partial city behind.
    assert!(state.store.find_city("Atlantis").await.unwrap().is_none());
  }

  #[tokio::test]
  async fn empty_generator_response_is_an_upstream_failure() {
    let state = make_state(StubGenerator::ok("  \n  ")).await;

    let (status, _) = send(state.clone(), "GET", "/city/Erewhon", None).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(state.store.find_city("Erewhon").await.unwrap().is_none());
  }

  #[tokio::test]
  async fn city_with_no_facts_is_a_cache_miss() {
    let generator = StubGenerator::ok("Population: 1.8 million");
    let state = make_state(generator.clone()).await;

    // Create the city row with an empty fact set.
    let (status, _) = send(
      state.clone(),
      "POST",
      "/city",
      Some(serde_json::json!({ "name": "Quito", "facts": "" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(state, "GET", "/city/Quito", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(generator.calls(), 1);
    assert!(
      body["facts"]
        .as_str()
        .unwrap()
        .contains("Population: 1.8 million")
    );
  }

  // ── POST /city ──────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn save_echoes_input_and_get_serves_the_saved_facts() {
    let generator = StubGenerator::failing();
    let state = make_state(generator.clone()).await;

    let (status, body) = send(
      state.clone(),
      "POST",
      "/city",
      Some(serde_json::json!({
        "name": "Rome",
        "facts": "Population: 2.8 million\nFounded in 753 BC",
      })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Rome");
    assert_eq!(body["facts"], "Population: 2.8 million\nFounded in 753 BC");

    let (status, body) = send(state, "GET", "/city/ROME", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Rome");
    let facts = body["facts"].as_str().unwrap();
    assert!(facts.contains("Population: 2.8 million"));
    assert!(facts.contains("Fact: Founded in 753 BC"));
    // Served from storage; the generator was never consulted.
    assert_eq!(generator.calls(), 0);
  }

  #[tokio::test]
  async fn save_replaces_the_prior_fact_set() {
    let state = make_state(StubGenerator::failing()).await;

    send(
      state.clone(),
      "POST",
      "/city",
      Some(serde_json::json!({ "name": "Oslo", "facts": "Old: stale" })),
    )
    .await;
    send(
      state.clone(),
      "POST",
      "/city",
      Some(serde_json::json!({ "name": "oslo", "facts": "New: fresh" })),
    )
    .await;

    let (status, body) = send(state, "GET", "/city/Oslo", None).await;
    assert_eq!(status, StatusCode::OK);
    let facts = body["facts"].as_str().unwrap();
    assert!(facts.contains("New: fresh"));
    assert!(!facts.contains("Old: stale"));
  }

  // ── POST /city/display ──────────────────────────────────────────────────────

  #[tokio::test]
  async fn display_formats_without_touching_storage() {
    let state = make_state(StubGenerator::failing()).await;

    let (status, body) = send(
      state.clone(),
      "POST",
      "/city/display",
      Some(serde_json::json!({ "name": "Rome", "facts": "A\nB" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let facts = body["facts"].as_str().unwrap();
    assert!(facts.contains("ROME"));
    assert!(facts.contains("1. A"));
    assert!(facts.contains("2. B"));

    assert!(state.store.find_city("Rome").await.unwrap().is_none());
  }

  // ── Validation ──────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn blank_name_is_rejected() {
    let state = make_state(StubGenerator::failing()).await;

    let (status, _) = send(state.clone(), "GET", "/city/%20%20", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
      state,
      "POST",
      "/city",
      Some(serde_json::json!({ "name": "", "facts": "A" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
  }
}
