//! Handlers for the city-facts endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/city/{name}` | Cached facts; fetches from the generator on a miss |
//! | `POST` | `/city` | Body: [`CityFactsRequest`]; parses and persists |
//! | `POST` | `/city/display` | Pure formatting; never touches storage |

mod display;
mod get;
mod save;

pub use display::display_city;
pub use get::get_city;
pub use save::save_city;

use serde::{Deserialize, Serialize};

/// JSON body of `POST /city` and `POST /city/display`.
#[derive(Debug, Deserialize)]
pub struct CityFactsRequest {
  pub name:  String,
  pub facts: String,
}

/// Response shape shared by every endpoint: the stored city name paired
/// with a facts text block.
#[derive(Debug, Serialize)]
pub struct CityFactsResponse {
  pub name:  String,
  pub facts: String,
}
