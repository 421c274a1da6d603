//! `GET /city/{name}` — cached city facts, fetched from the generator on a
//! miss.

use axum::{
  Json,
  extract::{Path, State},
};
use gazetteer_core::{
  city::validate_city_name,
  facts::{parse_facts, render_facts},
  store::CityStore,
  upstream::FactGenerator,
};

use crate::{
  AppState,
  error::ApiError,
  handlers::CityFactsResponse,
};

/// `GET /city/{name}`
///
/// Cache hit (the city exists and has at least one fact): rebuild the text
/// block from the stored rows. Miss: ask the generator once, parse its text
/// into fact rows, persist them as the city's new fact set, and respond
/// with the same reconstruction — both paths render identically for the
/// same stored facts. A generator failure is surfaced as-is; nothing is
/// persisted and nothing is retried.
pub async fn get_city<S, G>(
  State(state): State<AppState<S, G>>,
  Path(name): Path<String>,
) -> Result<Json<CityFactsResponse>, ApiError>
where
  S: CityStore,
  S::Error: std::error::Error + Send + Sync + 'static,
  G: FactGenerator,
  G::Error: std::error::Error + Send + Sync + 'static,
{
  let name = validate_city_name(&name)
    .map_err(|e| ApiError::BadRequest(e.to_string()))?;

  if let Some(city) = state
    .store
    .find_city(name)
    .await
    .map_err(|e| ApiError::store("find_city", name, e))?
  {
    let facts = state
      .store
      .list_facts(city.city_id)
      .await
      .map_err(|e| ApiError::store("list_facts", name, e))?;

    if !facts.is_empty() {
      tracing::debug!(city = %city.name, "serving cached facts");
      return Ok(Json(CityFactsResponse {
        facts: render_facts(&city.name, &facts),
        name:  city.name,
      }));
    }
  }

  tracing::info!(city = name, "no cached facts, querying generator");
  let text = state
    .generator
    .generate(name)
    .await
    .map_err(|e| ApiError::upstream(name, e))?;

  if text.trim().is_empty() {
    return Err(ApiError::Upstream(format!(
      "empty response from generator for {name:?}"
    )));
  }

  let parsed = parse_facts(&text);

  let city = state
    .store
    .get_or_create_city(name)
    .await
    .map_err(|e| ApiError::store("get_or_create_city", name, e))?;
  let stored = state
    .store
    .replace_facts(city.city_id, parsed)
    .await
    .map_err(|e| ApiError::store("replace_facts", name, e))?;

  Ok(Json(CityFactsResponse {
    facts: render_facts(&city.name, &stored),
    name:  city.name,
  }))
}
