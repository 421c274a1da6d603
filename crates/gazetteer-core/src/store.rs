//! The `CityStore` trait.
//!
//! The trait is implemented by storage backends (e.g.
//! `gazetteer-store-sqlite`). The HTTP layer depends on this abstraction,
//! not on any concrete backend.

use std::future::Future;

use crate::{
  city::City,
  facts::{CityFact, NewFact},
};

/// Abstraction over a Gazetteer storage backend.
///
/// Reads that find nothing signal it through an empty value (`None`, empty
/// `Vec`), never an error. Writes are all-or-nothing: [`replace_facts`]
/// swaps a city's whole fact set inside one transaction.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
///
/// [`replace_facts`]: CityStore::replace_facts
pub trait CityStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Case-insensitive exact-match lookup. Returns `None` when no city with
  /// that name exists. No partial or fuzzy matching.
  fn find_city<'a>(
    &'a self,
    name: &'a str,
  ) -> impl Future<Output = Result<Option<City>, Self::Error>> + Send + 'a;

  /// Return the existing city matching `name` case-insensitively, or create
  /// and persist a new one with the caller's casing.
  ///
  /// Two concurrent creations of the same name race benignly: the loser of
  /// the uniqueness constraint re-runs the lookup and returns the winner.
  fn get_or_create_city<'a>(
    &'a self,
    name: &'a str,
  ) -> impl Future<Output = Result<City, Self::Error>> + Send + 'a;

  /// All fact rows for a city. Row order is not contractual. An unknown
  /// `city_id` yields an empty list.
  fn list_facts(
    &self,
    city_id: i64,
  ) -> impl Future<Output = Result<Vec<CityFact>, Self::Error>> + Send + '_;

  /// Delete every existing fact row for the city, then insert `facts` as
  /// the new set, inside a single transaction. On any failure the deletion
  /// rolls back too, leaving the prior facts intact. Returns the stored
  /// rows.
  fn replace_facts(
    &self,
    city_id: i64,
    facts: Vec<NewFact>,
  ) -> impl Future<Output = Result<Vec<CityFact>, Self::Error>> + Send + '_;
}
