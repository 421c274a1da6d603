//! City — the named envelope that owns facts.
//!
//! A city row holds only identity metadata. Everything interesting about the
//! city lives in its fact rows.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A named city. `city_id` is assigned by the storage backend.
///
/// Name uniqueness is case-insensitive and enforced at the storage layer;
/// the stored name keeps the casing of whoever created the row first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct City {
  pub city_id:    i64,
  pub name:       String,
  /// Server-assigned timestamp; never changes after creation.
  pub created_at: DateTime<Utc>,
}

/// Reject names that are empty or all whitespace; returns the trimmed name.
///
/// Lookups are case-insensitive, so no case normalisation happens here.
pub fn validate_city_name(name: &str) -> Result<&str> {
  let trimmed = name.trim();
  if trimmed.is_empty() {
    return Err(Error::EmptyCityName);
  }
  Ok(trimmed)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn validate_trims_surrounding_whitespace() {
    assert_eq!(validate_city_name("  Berlin ").unwrap(), "Berlin");
  }

  #[test]
  fn validate_rejects_blank_names() {
    assert!(matches!(validate_city_name(""), Err(Error::EmptyCityName)));
    assert!(matches!(validate_city_name("   "), Err(Error::EmptyCityName)));
  }
}
