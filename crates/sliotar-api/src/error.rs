//! Error type shared by all fixture API handlers.
//!
//! Every variant maps to one HTTP status and a JSON `{"error": …}` body.
//! Scoped lookups (id, venue, competition) use `NotFound`; plain list
//! endpoints return empty pages instead, never 404.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error surfaced to an HTTP client.
#[derive(Debug, Error)]
pub enum ApiError {
  /// A scoped lookup matched nothing.
  #[error("not found: {0}")]
  NotFound(String),

  /// The request itself is unusable, e.g. a zero page size.
  #[error("bad request: {0}")]
  BadRequest(String),

  /// The store failed; surfaced verbatim, never silently degraded.
  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  /// Wrap a store backend error.
  pub fn store(e: impl std::error::Error + Send + Sync + 'static) -> Self {
    ApiError::Store(Box::new(e))
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = match &self {
      ApiError::NotFound(_) => StatusCode::NOT_FOUND,
      ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
      ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let message = match self {
      ApiError::NotFound(m) | ApiError::BadRequest(m) => m,
      ApiError::Store(e) => e.to_string(),
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
