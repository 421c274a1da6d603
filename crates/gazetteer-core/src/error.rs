//! Error types for `gazetteer-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("city name must not be empty")]
  EmptyCityName,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
