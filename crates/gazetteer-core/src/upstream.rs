//! The upstream generative-text capability.
//!
//! The fact service depends on this trait rather than on a concrete API
//! client, so tests can substitute a canned implementation.

use std::future::Future;

/// A source of free-text facts about a named city.
///
/// One call per cache miss; callers apply no retry or backoff. An empty or
/// whitespace-only result is treated by callers as an upstream failure.
pub trait FactGenerator: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Produce the raw fact text for `city`.
  fn generate<'a>(
    &'a self,
    city: &'a str,
  ) -> impl Future<Output = Result<String, Self::Error>> + Send + 'a;
}
