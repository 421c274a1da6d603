//! `POST /city` — parse and persist a submitted facts text.

use axum::{Json, extract::State};
use gazetteer_core::{
  city::validate_city_name,
  facts::parse_facts,
  store::CityStore,
  upstream::FactGenerator,
};

use crate::{
  AppState,
  error::ApiError,
  handlers::{CityFactsRequest, CityFactsResponse},
};

/// `POST /city` — body: `{"name": ..., "facts": ...}`.
///
/// The facts text is split into rows with the same line rule the fetch path
/// uses, and replaces the city's whole fact set. The submitted text is
/// echoed back unchanged; the stored rows are its parsed form.
pub async fn save_city<S, G>(
  State(state): State<AppState<S, G>>,
  Json(body): Json<CityFactsRequest>,
) -> Result<Json<CityFactsResponse>, ApiError>
where
  S: CityStore,
  S::Error: std::error::Error + Send + Sync + 'static,
  G: FactGenerator,
  G::Error: std::error::Error + Send + Sync + 'static,
{
  let CityFactsRequest { name, facts } = body;
  let name = validate_city_name(&name)
    .map_err(|e| ApiError::BadRequest(e.to_string()))?;

  tracing::info!(city = name, "saving submitted facts");

  let parsed = parse_facts(&facts);

  let city = state
    .store
    .get_or_create_city(name)
    .await
    .map_err(|e| ApiError::store("get_or_create_city", name, e))?;
  state
    .store
    .replace_facts(city.city_id, parsed)
    .await
    .map_err(|e| ApiError::store("replace_facts", name, e))?;

  Ok(Json(CityFactsResponse { name: city.name, facts }))
}
