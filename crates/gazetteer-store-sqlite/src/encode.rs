//! Encoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings; ids are SQLite integers and
//! need no translation.

use chrono::{DateTime, Utc};
use gazetteer_core::city::City;

use crate::{Error, Result};

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

/// Raw strings read directly from a `cities` row.
pub struct RawCity {
  pub city_id:    i64,
  pub name:       String,
  pub created_at: String,
}

impl RawCity {
  pub fn into_city(self) -> Result<City> {
    Ok(City {
      city_id:    self.city_id,
      name:       self.name,
      created_at: decode_dt(&self.created_at)?,
    })
  }
}
