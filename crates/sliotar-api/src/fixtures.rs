//! Handlers for the fixture endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/health` | Store status summary |
//! | `GET`  | `/fixtures` | `?limit=&offset=&include_past=&venue=&competition=` |
//! | `GET`  | `/fixtures/venues` | Distinct non-empty venues |
//! | `GET`  | `/fixtures/competitions` | Distinct non-empty competitions |
//! | `GET`  | `/fixtures/by-venue/:venue` | `?limit=&offset=&include_past=`, 404 if nothing matches |
//! | `GET`  | `/fixtures/by-competition/:competition` | `?limit=&offset=&include_past=`, 404 if nothing matches |
//! | `GET`  | `/fixtures/:id` | 404 if not found |
//! | `POST` | `/fixtures/refresh` | 202, triggers an ingestion run |

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sliotar_core::{
  fixture::Fixture,
  store::{DistinctField, FixtureQuery, FixtureStore},
};
use tokio::sync::mpsc::error::TrySendError;

use crate::{AppState, error::ApiError};

// ─── Pagination params ───────────────────────────────────────────────────────

/// Pagination and date-window params shared by the list and scoped-lookup
/// endpoints.
#[derive(Debug, Deserialize)]
pub struct PageParams {
  pub limit:        Option<u32>,
  pub offset:       Option<u32>,
  pub include_past: Option<bool>,
}

impl PageParams {
  /// Validate and translate into a store query. Defaults: first page of
  /// 50, past fixtures excluded.
  fn into_query(self) -> Result<FixtureQuery, ApiError> {
    if self.limit == Some(0) {
      return Err(ApiError::BadRequest("limit must be at least 1".to_string()));
    }

    let mut query = FixtureQuery::upcoming(Utc::now().date_naive());
    if let Some(limit) = self.limit {
      query.limit = limit;
    }
    query.offset = self.offset.unwrap_or(0);
    query.include_past = self.include_past.unwrap_or(false);
    Ok(query)
  }
}

// ─── List ─────────────────────────────────────────────────────────────────────

// Not nested via serde(flatten): the urlencoded deserializer cannot decode
// numeric fields through a flattened struct.
#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub limit:        Option<u32>,
  pub offset:       Option<u32>,
  pub include_past: Option<bool>,
  pub venue:        Option<String>,
  pub competition:  Option<String>,
}

#[derive(Debug, Serialize)]
pub struct FixtureListResponse {
  pub fixtures:        Vec<Fixture>,
  pub total_count:     u64,
  pub club_id:         String,
  pub county_board_id: String,
}

/// `GET /fixtures`
pub async fn list<S>(
  State(state): State<AppState<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<FixtureListResponse>, ApiError>
where
  S: FixtureStore,
{
  let page_params = PageParams {
    limit:        params.limit,
    offset:       params.offset,
    include_past: params.include_past,
  };
  let mut query = page_params.into_query()?;
  query.venue = params.venue;
  query.competition = params.competition;

  let page = state.store.query(&query).await.map_err(ApiError::store)?;

  Ok(Json(FixtureListResponse {
    fixtures:        page.fixtures,
    total_count:     page.total,
    club_id:         state.config.club_id.clone(),
    county_board_id: state.config.county_board_id.clone(),
  }))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /fixtures/:id`
pub async fn get_one<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<i64>,
) -> Result<Json<Fixture>, ApiError>
where
  S: FixtureStore,
{
  let fixture = state
    .store
    .get(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("fixture {id} not found")))?;
  Ok(Json(fixture))
}

// ─── Scoped lookups ───────────────────────────────────────────────────────────

/// `GET /fixtures/by-venue/:venue` — substring match, past excluded by
/// default.
pub async fn by_venue<S>(
  State(state): State<AppState<S>>,
  Path(venue): Path<String>,
  Query(params): Query<PageParams>,
) -> Result<Json<FixtureListResponse>, ApiError>
where
  S: FixtureStore,
{
  let mut query = params.into_query()?;
  query.venue = Some(venue.clone());
  scoped(state, query, || {
    format!("no upcoming fixtures at venue {venue:?}")
  })
  .await
}

/// `GET /fixtures/by-competition/:competition` — exact match, past excluded
/// by default.
pub async fn by_competition<S>(
  State(state): State<AppState<S>>,
  Path(competition): Path<String>,
  Query(params): Query<PageParams>,
) -> Result<Json<FixtureListResponse>, ApiError>
where
  S: FixtureStore,
{
  let mut query = params.into_query()?;
  query.competition = Some(competition.clone());
  scoped(state, query, || {
    format!("no upcoming fixtures in competition {competition:?}")
  })
  .await
}

/// A scoped lookup distinguishes "nothing there" (404) from an empty page
/// of a valid unscoped listing (200).
async fn scoped<S>(
  state: AppState<S>,
  query: FixtureQuery,
  not_found: impl FnOnce() -> String,
) -> Result<Json<FixtureListResponse>, ApiError>
where
  S: FixtureStore,
{
  let page = state.store.query(&query).await.map_err(ApiError::store)?;

  if page.total == 0 {
    return Err(ApiError::NotFound(not_found()));
  }

  Ok(Json(FixtureListResponse {
    fixtures:        page.fixtures,
    total_count:     page.total,
    club_id:         state.config.club_id.clone(),
    county_board_id: state.config.county_board_id.clone(),
  }))
}

// ─── Distinct values ──────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct VenuesResponse {
  pub venues: Vec<String>,
}

/// `GET /fixtures/venues`
pub async fn venues<S>(
  State(state): State<AppState<S>>,
) -> Result<Json<VenuesResponse>, ApiError>
where
  S: FixtureStore,
{
  let venues = state
    .store
    .distinct(DistinctField::Venue)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(VenuesResponse { venues }))
}

#[derive(Debug, Serialize)]
pub struct CompetitionsResponse {
  pub competitions: Vec<String>,
}

/// `GET /fixtures/competitions`
pub async fn competitions<S>(
  State(state): State<AppState<S>>,
) -> Result<Json<CompetitionsResponse>, ApiError>
where
  S: FixtureStore,
{
  let competitions = state
    .store
    .distinct(DistinctField::Competition)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(CompetitionsResponse { competitions }))
}

// ─── Health ───────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct HealthResponse {
  pub status:          &'static str,
  pub club_id:         String,
  pub county_board_id: String,
  pub database_path:   String,
  pub last_update:     Option<DateTime<Utc>>,
  pub total_fixtures:  u64,
}

/// `GET /health`
pub async fn health<S>(
  State(state): State<AppState<S>>,
) -> Result<Json<HealthResponse>, ApiError>
where
  S: FixtureStore,
{
  let status = state.store.status().await.map_err(ApiError::store)?;

  Ok(Json(HealthResponse {
    status:          "ok",
    club_id:         state.config.club_id.clone(),
    county_board_id: state.config.county_board_id.clone(),
    database_path:   state.config.store_path.display().to_string(),
    last_update:     status.last_ingested_at,
    total_fixtures:  status.total,
  }))
}

// ─── Refresh ──────────────────────────────────────────────────────────────────

/// `POST /fixtures/refresh`
///
/// Hands a trigger to the ingestion scheduler and returns immediately; the
/// run happens out of band. A trigger arriving while one is already pending
/// coalesces with it, so repeated requests cannot queue up redundant runs.
pub async fn refresh<S>(
  State(state): State<AppState<S>>,
) -> Result<impl IntoResponse, ApiError>
where
  S: FixtureStore,
{
  match state.refresh.try_send(()) {
    Ok(()) => {}
    // A pending trigger already covers this request.
    Err(TrySendError::Full(())) => {}
    Err(TrySendError::Closed(())) => {
      return Err(ApiError::Store("ingestion scheduler is not running".into()));
    }
  }

  Ok((
    StatusCode::ACCEPTED,
    Json(json!({ "message": "refresh scheduled" })),
  ))
}
