//! Error type for `sliotar-scrape`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// Network failure, timeout, or non-2xx status. Aborts the run before
  /// any persistence — a partial fetch never reaches the store.
  #[error("fetch failed: {0}")]
  Fetch(String),

  /// A second `run()` while one is in flight. The caller decides whether
  /// to wait or drop the trigger; nothing was fetched.
  #[error("an ingestion run is already in progress")]
  RunInProgress,

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl From<reqwest::Error> for Error {
  fn from(e: reqwest::Error) -> Self {
    Error::Fetch(e.to_string())
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
