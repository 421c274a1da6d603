//! `POST /city/display` — decorate facts text for display. No persistence.

use axum::Json;
use gazetteer_core::{city::validate_city_name, facts::render_display};

use crate::{
  error::ApiError,
  handlers::{CityFactsRequest, CityFactsResponse},
};

/// `POST /city/display` — body: `{"name": ..., "facts": ...}`.
pub async fn display_city(
  Json(body): Json<CityFactsRequest>,
) -> Result<Json<CityFactsResponse>, ApiError> {
  let name = validate_city_name(&body.name)
    .map_err(|e| ApiError::BadRequest(e.to_string()))?;

  Ok(Json(CityFactsResponse {
    facts: render_display(name, &body.facts),
    name:  name.to_string(),
  }))
}
