//! Encoding and decoding helpers between Rust domain types and the
//! plain-text representations stored in SQLite columns.
//!
//! Ingestion timestamps are stored as RFC 3339 strings; sort dates as plain
//! ISO `YYYY-MM-DD` so SQLite's text ordering matches date ordering.

use chrono::{DateTime, NaiveDate, Utc};
use sliotar_core::fixture::Fixture;

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339()
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── NaiveDate ───────────────────────────────────────────────────────────────

pub fn encode_date(d: NaiveDate) -> String {
  d.format("%Y-%m-%d").to_string()
}

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, "%Y-%m-%d")
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Row type ────────────────────────────────────────────────────────────────

/// Raw strings read directly from a `fixtures` row. The typed [`Fixture`]
/// is constructed here, once, at the store boundary; nothing downstream
/// indexes rows by column name.
pub struct RawRow {
  pub id:          i64,
  pub date:        String,
  pub date_parsed: String,
  pub competition: String,
  pub home_team:   String,
  pub away_team:   String,
  pub time:        String,
  pub venue:       String,
  pub referee:     String,
  pub created_at:  String,
}

impl RawRow {
  pub fn into_fixture(self) -> Result<Fixture> {
    Ok(Fixture {
      id:          self.id,
      date:        self.date,
      date_parsed: decode_date(&self.date_parsed)?,
      competition: self.competition,
      home_team:   self.home_team,
      away_team:   self.away_team,
      time:        self.time,
      venue:       self.venue,
      referee:     self.referee,
      created_at:  decode_dt(&self.created_at)?,
    })
  }
}
