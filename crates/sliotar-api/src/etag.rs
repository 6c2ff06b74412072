//! ETag computation for the calendar feed.
//!
//! ETags are SHA-256 hashes over the sorted (id, created_at) pairs of the
//! fixtures backing a feed. Ordering is deterministic regardless of the
//! order the store returned the rows in, so the tag only changes when the
//! fixture set changes.

use sha2::{Digest, Sha256};
use sliotar_core::fixture::Fixture;

/// Compute an ETag for the given fixture set.
///
/// Stable: same fixtures in any order → same ETag.
pub fn compute_etag(fixtures: &[Fixture]) -> String {
  let mut pairs: Vec<(i64, i64)> = fixtures
    .iter()
    .map(|f| (f.id, f.created_at.timestamp_micros()))
    .collect();
  pairs.sort_unstable();

  let mut hasher = Sha256::new();
  for (id, ts) in pairs.iter() {
    hasher.update(id.to_le_bytes());
    hasher.update(ts.to_le_bytes());
  }
  let hash = hasher.finalize();
  format!("\"{}\"", hex::encode(hash))
}

#[cfg(test)]
mod tests {
  use chrono::{TimeZone, Utc};
  use sliotar_core::date::normalize_date;

  use super::*;

  fn make_fixture(id: i64, created_secs: i64) -> Fixture {
    Fixture {
      id,
      date:        "Sunday 15th Jun 2025".to_string(),
      date_parsed: normalize_date("Sunday 15th Jun 2025"),
      competition: "SHC".to_string(),
      home_team:   "A".to_string(),
      away_team:   "B".to_string(),
      time:        "14:30".to_string(),
      venue:       "Nowlan Park".to_string(),
      referee:     String::new(),
      created_at:  Utc.timestamp_opt(created_secs, 0).unwrap(),
    }
  }

  #[test]
  fn row_order_does_not_matter() {
    let a = make_fixture(1, 1000);
    let b = make_fixture(2, 2000);

    assert_eq!(
      compute_etag(&[a.clone(), b.clone()]),
      compute_etag(&[b, a]),
    );
  }

  #[test]
  fn adding_a_fixture_changes_the_etag() {
    let a = make_fixture(1, 1000);
    let b = make_fixture(2, 2000);

    assert_ne!(
      compute_etag(std::slice::from_ref(&a)),
      compute_etag(&[a, b]),
    );
  }

  #[test]
  fn etag_is_a_quoted_hex_string() {
    let tag = compute_etag(&[make_fixture(1, 1000)]);
    assert!(tag.starts_with('"') && tag.ends_with('"'));
    assert_eq!(tag.len(), 66); // 64 hex chars + quotes
  }
}
