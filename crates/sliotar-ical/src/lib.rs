//! iCalendar feed renderer for fixtures.
//!
//! Emits the RFC 5545 subset needed for a valid single-file calendar
//! export: CRLF line endings, folding at 75 octets, value escaping. Not a
//! general-purpose iCalendar implementation.

use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use sliotar_core::{date, fixture::Fixture};

/// Ceiling on events per render, bounding feed size regardless of store
/// growth.
pub const MAX_EVENTS: usize = 200;

/// Fixed event duration; listings carry no real duration data.
const EVENT_HOURS: i64 = 2;

// ─── RFC 5545 line folding ───────────────────────────────────────────────────

/// Emit `s` as one logical line, folding at 75 octets with CRLF + SP
/// continuation.
fn fold_line(s: &str) -> String {
  if s.len() <= 75 {
    return format!("{}\r\n", s);
  }

  let mut result = String::new();
  let total = s.len();
  let mut pos = 0usize;
  let mut first = true;

  while pos < total {
    let limit = if first { 75 } else { 74 };
    let end = if pos + limit >= total {
      total
    } else {
      // Walk back to the nearest valid UTF-8 char boundary
      let mut e = pos + limit;
      while e > pos && !s.is_char_boundary(e) {
        e -= 1;
      }
      // Guarantee at least one byte per segment
      if e == pos { pos + 1 } else { e }
    };

    if !first {
      result.push(' ');
    }
    result.push_str(&s[pos..end]);
    result.push_str("\r\n");
    pos = end;
    first = false;
  }

  result
}

// ─── Value escaping ──────────────────────────────────────────────────────────

/// Escape a property value per RFC 5545 §3.3.11: `\`, `;`, `,`, newline.
fn escape_value(s: &str) -> String {
  s.replace('\\', "\\\\")
    .replace(';', "\\;")
    .replace(',', "\\,")
    .replace('\n', "\\n")
}

// ─── Timestamp formatting ────────────────────────────────────────────────────

/// Floating local time, e.g. `20250615T143000`.
fn format_local(dt: NaiveDateTime) -> String {
  dt.format("%Y%m%dT%H%M%S").to_string()
}

/// UTC instant, e.g. `20250615T120000Z`.
fn format_utc(dt: DateTime<Utc>) -> String {
  dt.format("%Y%m%dT%H%M%SZ").to_string()
}

// ─── Feed ────────────────────────────────────────────────────────────────────

/// Identity of one published calendar feed.
///
/// `owner` is the feed-owner identifier baked into every event UID (e.g.
/// `club-2107.gaa`); keeping it stable keeps UIDs stable across re-renders
/// so calendar clients can de-duplicate.
#[derive(Debug, Clone)]
pub struct Feed {
  pub owner: String,
  pub name:  String,
}

impl Feed {
  /// Render `fixtures` as an iCalendar document.
  ///
  /// A fixture whose start cannot be computed (no parseable clock value)
  /// is skipped; one bad record never fails the whole feed. At most
  /// [`MAX_EVENTS`] events are emitted.
  pub fn render(&self, fixtures: &[Fixture], now: DateTime<Utc>) -> String {
    let stamp = format_utc(now);

    let mut out = String::new();
    out.push_str("BEGIN:VCALENDAR\r\n");
    out.push_str("VERSION:2.0\r\n");
    out.push_str(&fold_line(&format!("PRODID:-//Sliotar//{}//EN", self.owner)));
    out.push_str("CALSCALE:GREGORIAN\r\n");
    out.push_str("METHOD:PUBLISH\r\n");
    out.push_str(&fold_line(&format!("X-WR-CALNAME:{}", escape_value(&self.name))));

    for fixture in fixtures.iter().take(MAX_EVENTS) {
      if let Some(event) = self.render_event(fixture, &stamp) {
        out.push_str(&event);
      }
    }

    out.push_str("END:VCALENDAR\r\n");
    out
  }

  fn render_event(&self, fixture: &Fixture, stamp: &str) -> Option<String> {
    let start = date::combine(&fixture.date, &fixture.time).ok()?;
    let end = start + Duration::hours(EVENT_HOURS);

    let summary = format!("{} v {}", fixture.home_team, fixture.away_team);
    let description = format!(
      "Competition: {}\nVenue: {}\nReferee: {}",
      fixture.competition, fixture.venue, fixture.referee
    );

    let mut categories = String::from("GAA");
    if let Some(token) = fixture.competition.split_whitespace().next() {
      categories.push(',');
      categories.push_str(&escape_value(token));
    }

    let mut ev = String::new();
    ev.push_str("BEGIN:VEVENT\r\n");
    ev.push_str(&fold_line(&format!("UID:fixture-{}@{}", fixture.id, self.owner)));
    ev.push_str(&fold_line(&format!("DTSTAMP:{stamp}")));
    ev.push_str(&fold_line(&format!("DTSTART:{}", format_local(start))));
    ev.push_str(&fold_line(&format!("DTEND:{}", format_local(end))));
    ev.push_str(&fold_line(&format!("SUMMARY:{}", escape_value(&summary))));
    ev.push_str(&fold_line(&format!("DESCRIPTION:{}", escape_value(&description))));
    ev.push_str(&fold_line(&format!("LOCATION:{}", escape_value(&fixture.venue))));
    ev.push_str(&fold_line(&format!("CREATED:{}", format_utc(fixture.created_at))));
    ev.push_str(&fold_line(&format!("LAST-MODIFIED:{stamp}")));
    ev.push_str(&fold_line(&format!("CATEGORIES:{categories}")));
    ev.push_str("END:VEVENT\r\n");
    Some(ev)
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
