//! Error type for `gazetteer-gemini`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("http error: {0}")]
  Http(#[from] reqwest::Error),

  #[error("generative api returned {status}: {message}")]
  Api {
    status:  reqwest::StatusCode,
    message: String,
  },

  #[error("generative api returned an empty response")]
  EmptyResponse,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
