//! The `FixtureStore` trait and supporting query types.
//!
//! The trait is implemented by storage backends (e.g.
//! `sliotar-store-sqlite`). Higher layers (`sliotar-api`, the ingestion
//! pipeline) depend on this abstraction, not on any concrete backend.

use std::future::Future;

use chrono::NaiveDate;

use crate::fixture::{Fixture, RawFixture, StoreStatus};

// ─── Query types ─────────────────────────────────────────────────────────────

/// Parameters for [`FixtureStore::query`].
#[derive(Debug, Clone)]
pub struct FixtureQuery {
  /// Reference date for the not-past predicate. Supplied by the caller so
  /// "today" is explicit rather than read from a wall clock inside the
  /// store.
  pub today:        NaiveDate,
  /// Include fixtures with `date_parsed < today`. Off by default.
  pub include_past: bool,
  /// Substring match on venue (`LIKE %…%`).
  pub venue:        Option<String>,
  /// Exact match on competition.
  pub competition:  Option<String>,
  pub limit:        u32,
  pub offset:       u32,
}

impl FixtureQuery {
  /// Upcoming fixtures from `today`, first page of 50.
  pub fn upcoming(today: NaiveDate) -> Self {
    Self {
      today,
      include_past: false,
      venue: None,
      competition: None,
      limit: 50,
      offset: 0,
    }
  }

  /// Everything in the store, ascending. Used by the ingestion pipeline to
  /// return the full set after a run.
  pub fn everything(today: NaiveDate) -> Self {
    Self {
      today,
      include_past: true,
      venue: None,
      competition: None,
      limit: u32::MAX,
      offset: 0,
    }
  }
}

/// One page of query results, plus the total match count before pagination.
#[derive(Debug, Clone)]
pub struct Page {
  pub fixtures: Vec<Fixture>,
  pub total:    u64,
}

/// Column selector for [`FixtureStore::distinct`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistinctField {
  Venue,
  Competition,
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a fixtures store backend.
///
/// The store is append-only and idempotent: [`upsert`](Self::upsert) is the
/// only write, and a natural-key collision is silently ignored. No operation
/// updates or deletes rows.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait FixtureStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Persist extracted fixtures, computing `date_parsed` per record.
  /// Returns the count of rows actually added; natural-key collisions do
  /// not count.
  fn upsert(
    &self,
    fixtures: Vec<RawFixture>,
  ) -> impl Future<Output = Result<usize, Self::Error>> + Send + '_;

  /// Filtered, paginated view, sorted ascending by `(date_parsed, time)`.
  /// The text sort on `time` is valid only because the format is always
  /// zero-padded `HH:MM`.
  fn query<'a>(
    &'a self,
    query: &'a FixtureQuery,
  ) -> impl Future<Output = Result<Page, Self::Error>> + Send + 'a;

  /// Retrieve a fixture by id. Returns `None` if not found.
  fn get(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Fixture>, Self::Error>> + Send + '_;

  /// Sorted unique non-empty values of the given column.
  fn distinct(
    &self,
    field: DistinctField,
  ) -> impl Future<Output = Result<Vec<String>, Self::Error>> + Send + '_;

  /// Row count and last ingestion timestamp.
  fn status(
    &self,
  ) -> impl Future<Output = Result<StoreStatus, Self::Error>> + Send + '_;
}
