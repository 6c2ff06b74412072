//! Error types for `sliotar-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// The time string carried no parseable clock value at all. Callers
  /// building a timestamp from a fixture must skip that fixture rather
  /// than abort their batch.
  #[error("time string {0:?} has no parseable clock value")]
  UnparseableTime(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
