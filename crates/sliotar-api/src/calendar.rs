//! Handler for `GET /fixtures/calendar.ics`.

use axum::{
  extract::{Query, State},
  http::{HeaderMap, StatusCode, header},
  response::{IntoResponse, Response},
};
use chrono::Utc;
use serde::Deserialize;
use sliotar_core::store::{FixtureQuery, FixtureStore};
use sliotar_ical::{Feed, MAX_EVENTS};

use crate::{AppState, error::ApiError, etag::compute_etag};

#[derive(Debug, Deserialize)]
pub struct CalendarParams {
  pub include_past: Option<bool>,
  pub venue:        Option<String>,
}

/// `GET /fixtures/calendar.ics`
///
/// Serves the upcoming fixtures as an iCalendar document. The ETag depends
/// only on the fixture set, so clients revalidating with `If-None-Match`
/// get a 304 until the next ingestion run actually changes something.
pub async fn feed<S>(
  State(state): State<AppState<S>>,
  Query(params): Query<CalendarParams>,
  headers: HeaderMap,
) -> Result<Response, ApiError>
where
  S: FixtureStore,
{
  let mut query = FixtureQuery::upcoming(Utc::now().date_naive());
  query.include_past = params.include_past.unwrap_or(false);
  query.venue = params.venue;
  query.limit = MAX_EVENTS as u32;

  let page = state.store.query(&query).await.map_err(ApiError::store)?;

  let etag = compute_etag(&page.fixtures);

  if let Some(candidate) = headers.get(header::IF_NONE_MATCH)
    && candidate.to_str().is_ok_and(|v| v == etag)
  {
    return Ok(
      (StatusCode::NOT_MODIFIED, [(header::ETAG, etag)]).into_response(),
    );
  }

  let feed = Feed {
    owner: format!("club-{}.gaa", state.config.club_id),
    name:  state.config.calendar_name.clone(),
  };
  let body = feed.render(&page.fixtures, Utc::now());

  Ok(
    (
      [
        (header::CONTENT_TYPE, "text/calendar; charset=utf-8".to_string()),
        (
          header::CONTENT_DISPOSITION,
          "attachment; filename=\"gaa-fixtures.ics\"".to_string(),
        ),
        (header::ETAG, etag),
        (header::CACHE_CONTROL, "max-age=3600".to_string()),
      ],
      body,
    )
      .into_response(),
  )
}
