//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("bad request: {0}")]
  BadRequest(String),

  /// The generative API failed or returned nothing usable. Not retried,
  /// and never cached as a negative result.
  #[error("upstream failure: {0}")]
  Upstream(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  /// Wrap a storage failure, logging the operation and city it belongs to.
  pub(crate) fn store<E>(operation: &'static str, city: &str, err: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    tracing::error!(operation, city, error = %err, "storage failure");
    ApiError::Store(Box::new(err))
  }

  /// Wrap a generator failure, logging the city it belongs to.
  pub(crate) fn upstream<E>(city: &str, err: E) -> Self
  where
    E: std::error::Error,
  {
    tracing::error!(city, error = %err, "generator failure");
    ApiError::Upstream(err.to_string())
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
      ApiError::Upstream(m) => (
        StatusCode::BAD_GATEWAY,
        format!("failed to fetch city facts: {m}"),
      ),
      ApiError::Store(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
