//! Fixture — one scheduled match record.
//!
//! [`RawFixture`] is what the extractor emits; the store assigns the
//! surrogate id and the derived sort date, producing a [`Fixture`].

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// An extracted fixture, not yet persisted.
///
/// `home_team`, `away_team`, `time`, `venue` and `referee` may all be empty
/// when the listing markup is missing the corresponding sub-element; only
/// `competition` is guaranteed non-empty by the extractor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawFixture {
  /// Raw display string, e.g. "Sunday 15th Jun 2025". Source of truth for
  /// display; never rewritten.
  pub date:        String,
  pub competition: String,
  pub home_team:   String,
  pub away_team:   String,
  /// Clock value, "HH:MM" or empty.
  pub time:        String,
  pub venue:       String,
  pub referee:     String,
  /// Verbatim captured markup fragment, retained for audit.
  pub raw_source:  String,
  /// Set at extraction time; immutable thereafter.
  pub created_at:  DateTime<Utc>,
}

/// A persisted fixture.
///
/// Never mutated after creation: re-ingesting the same listing is a silent
/// no-op on the natural key (date, competition, home_team, away_team, time),
/// preserving `id` and `created_at` of the original row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fixture {
  /// Store-assigned surrogate key, stable once assigned.
  pub id:          i64,
  pub date:        String,
  /// Derived monotonic sort key; unparseable dates carry
  /// [`crate::date::SENTINEL_DATE`] and sort last.
  pub date_parsed: NaiveDate,
  pub competition: String,
  pub home_team:   String,
  pub away_team:   String,
  pub time:        String,
  pub venue:       String,
  pub referee:     String,
  pub created_at:  DateTime<Utc>,
}

/// Store-level summary backing the health endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreStatus {
  pub total:            u64,
  /// `created_at` of the most recently ingested fixture, if any.
  pub last_ingested_at: Option<DateTime<Utc>>,
}
