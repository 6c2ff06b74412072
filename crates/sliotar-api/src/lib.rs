//! JSON + iCalendar HTTP API for Sliotar.
//!
//! Exposes an axum [`Router`] backed by any
//! [`sliotar_core::store::FixtureStore`]. Ingestion is owned by a separate
//! scheduler task; the API only hands it refresh triggers over a channel,
//! so handlers never block on the network.

pub mod calendar;
pub mod error;
pub mod etag;
pub mod fixtures;

pub use error::ApiError;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  routing::{get, post},
};
use serde::Deserialize;
use sliotar_core::store::FixtureStore;
use tokio::sync::mpsc;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml`.
#[derive(Deserialize, Clone)]
pub struct ServerConfig {
  pub host:                   String,
  pub port:                   u16,
  /// Root of the upstream club website, no trailing slash needed.
  pub base_url:               String,
  pub club_id:                String,
  pub county_board_id:        String,
  pub store_path:             PathBuf,
  pub fetch_interval_minutes: u64,
  /// `X-WR-CALNAME` of the published calendar.
  pub calendar_name:          String,
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState<S: FixtureStore> {
  pub store:   Arc<S>,
  /// Capacity-1 channel into the ingestion scheduler; `try_send` so a
  /// pending trigger coalesces with new ones.
  pub refresh: mpsc::Sender<()>,
  pub config:  Arc<ServerConfig>,
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build an axum [`Router`] for the fixtures server.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: FixtureStore + Clone + Send + Sync + 'static,
{
  Router::new()
    .route("/health", get(fixtures::health::<S>))
    .route("/fixtures", get(fixtures::list::<S>))
    .route("/fixtures/calendar.ics", get(calendar::feed::<S>))
    .route("/fixtures/venues", get(fixtures::venues::<S>))
    .route("/fixtures/competitions", get(fixtures::competitions::<S>))
    .route("/fixtures/by-venue/{venue}", get(fixtures::by_venue::<S>))
    .route(
      "/fixtures/by-competition/{competition}",
      get(fixtures::by_competition::<S>),
    )
    .route("/fixtures/refresh", post(fixtures::refresh::<S>))
    .route("/fixtures/{id}", get(fixtures::get_one::<S>))
    .with_state(state)
}

// ─── Integration tests ────────────────────────────────────────────────────────
