//! Date normalization for GAA listing date strings.
//!
//! Listings publish dates as `"<Weekday> <Day><ordinal> <Mon> <Year>"`,
//! e.g. `"Sunday 15th Jun 2025"`. This module turns those into sortable
//! [`NaiveDate`]s and, combined with a `"HH:MM"` clock value, into event
//! timestamps.

use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;

use crate::{Error, Result};

/// Far-future placeholder assigned when a date cannot be parsed.
///
/// Never a real fixture date; it exists so unparseable entries sort last.
pub const SENTINEL_DATE: NaiveDate = match NaiveDate::from_ymd_opt(9999, 12, 31) {
  Some(d) => d,
  None => panic!("sentinel date is valid"),
};

static ORDINAL: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"(\d+)(st|nd|rd|th)").expect("ordinal pattern compiles"));

/// `"15th"` → `"15"`, `"1st"` → `"1"`, etc.
fn strip_ordinals(s: &str) -> String {
  ORDINAL.replace_all(s, "${1}").into_owned()
}

/// Normalize a listing date to a sortable [`NaiveDate`].
///
/// Any failure (format mismatch, nonexistent date) yields [`SENTINEL_DATE`]
/// rather than an error; callers must treat the sentinel as "unparseable,
/// sort last", never as a real date.
pub fn normalize_date(raw: &str) -> NaiveDate {
  let cleaned = strip_ordinals(raw.trim());
  match NaiveDate::parse_from_str(&cleaned, "%A %d %b %Y") {
    Ok(d) => d,
    Err(e) => {
      tracing::warn!(date = raw, error = %e, "could not parse listing date");
      SENTINEL_DATE
    }
  }
}

/// Combine a raw listing date with a `"HH:MM"` clock value into a timestamp.
///
/// Tries a strict parse of `"<Day> <Mon> <Year> HH:MM"` first (weekday and
/// ordinal suffix stripped). On failure it falls back to the sortable date
/// plus hour/minute read leniently from the time string; a missing minute
/// component defaults to 0. A time string with no leading digits is a hard
/// error — one bad fixture must not take a whole calendar feed down, so
/// callers skip it.
pub fn combine(raw_date: &str, raw_time: &str) -> Result<NaiveDateTime> {
  let cleaned = strip_ordinals(raw_date.trim());
  let time = raw_time.trim();

  // Drop the leading weekday name: "Sunday 15 Jun 2025" -> "15 Jun 2025".
  let parts: Vec<&str> = cleaned.split_whitespace().collect();
  let date_part = if parts.len() >= 4 {
    parts[1..].join(" ")
  } else {
    cleaned.clone()
  };

  if let Ok(dt) = NaiveDateTime::parse_from_str(&format!("{date_part} {time}"), "%d %b %Y %H:%M")
  {
    return Ok(dt);
  }

  let date = normalize_date(raw_date);
  let mut clock = time.splitn(2, ':');
  let hour: u32 = clock
    .next()
    .and_then(|h| h.trim().parse().ok())
    .ok_or_else(|| Error::UnparseableTime(raw_time.to_owned()))?;
  let minute: u32 = clock
    .next()
    .and_then(|m| m.trim().parse().ok())
    .unwrap_or(0);

  date
    .and_hms_opt(hour, minute, 0)
    .ok_or_else(|| Error::UnparseableTime(raw_time.to_owned()))
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
  }

  // ── normalize_date ──────────────────────────────────────────────────────────

  #[test]
  fn parses_listing_date() {
    assert_eq!(normalize_date("Sunday 15th Jun 2025"), d(2025, 6, 15));
  }

  #[test]
  fn strips_all_ordinal_suffixes() {
    assert_eq!(normalize_date("Sunday 1st Jun 2025"), d(2025, 6, 1));
    assert_eq!(normalize_date("Monday 2nd Jun 2025"), d(2025, 6, 2));
    assert_eq!(normalize_date("Tuesday 3rd Jun 2025"), d(2025, 6, 3));
    assert_eq!(normalize_date("Wednesday 4th Jun 2025"), d(2025, 6, 4));
  }

  #[test]
  fn garbage_yields_sentinel() {
    assert_eq!(normalize_date("TBC"), SENTINEL_DATE);
    assert_eq!(normalize_date(""), SENTINEL_DATE);
  }

  #[test]
  fn nonexistent_date_yields_sentinel() {
    assert_eq!(normalize_date("Friday 31st Feb 2025"), SENTINEL_DATE);
  }

  #[test]
  fn sentinel_sorts_after_real_dates() {
    assert!(SENTINEL_DATE > d(2999, 12, 31));
  }

  // ── combine ─────────────────────────────────────────────────────────────────

  #[test]
  fn combine_strict_parse() {
    let dt = combine("Sunday 15th Jun 2025", "14:30").unwrap();
    assert_eq!(dt, d(2025, 6, 15).and_hms_opt(14, 30, 0).unwrap());
  }

  #[test]
  fn combine_hour_only_defaults_minutes_to_zero() {
    let dt = combine("Sunday 15th Jun 2025", "14").unwrap();
    assert_eq!(dt, d(2025, 6, 15).and_hms_opt(14, 0, 0).unwrap());
  }

  #[test]
  fn combine_unparseable_date_falls_back_to_sentinel() {
    let dt = combine("TBC", "14:30").unwrap();
    assert_eq!(dt, SENTINEL_DATE.and_hms_opt(14, 30, 0).unwrap());
  }

  #[test]
  fn combine_time_without_digits_is_a_hard_error() {
    let err = combine("Sunday 15th Jun 2025", "TBC").unwrap_err();
    assert!(matches!(err, Error::UnparseableTime(_)));
  }

  #[test]
  fn combine_out_of_range_hour_is_a_hard_error() {
    let err = combine("Sunday 15th Jun 2025", "29:00").unwrap_err();
    assert!(matches!(err, Error::UnparseableTime(_)));
  }
}
