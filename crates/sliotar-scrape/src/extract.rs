//! Fixture extraction from listing HTML.
//!
//! Listings are a flat run of `h3.fix_res_date` headings, each followed by
//! the `div.competition` blocks belonging to that date until the next
//! heading. Sections are emitted in document order; sorting is a query-time
//! concern.

use std::sync::LazyLock;

use chrono::Utc;
use scraper::{ElementRef, Html, Selector};
use sliotar_core::fixture::RawFixture;

static DATE_HEADING: LazyLock<Selector> =
  LazyLock::new(|| Selector::parse("h3.fix_res_date").expect("selector compiles"));
static COMPETITION_NAME: LazyLock<Selector> =
  LazyLock::new(|| Selector::parse("div.competition-name").expect("selector compiles"));
static HOME_TEAM_LINK: LazyLock<Selector> =
  LazyLock::new(|| Selector::parse("div.home_team a").expect("selector compiles"));
static AWAY_TEAM_LINK: LazyLock<Selector> =
  LazyLock::new(|| Selector::parse("div.away_team a").expect("selector compiles"));
static TIME: LazyLock<Selector> =
  LazyLock::new(|| Selector::parse("div.time").expect("selector compiles"));
static MORE_INFO: LazyLock<Selector> =
  LazyLock::new(|| Selector::parse("div.more_info").expect("selector compiles"));

/// Result of one extraction pass.
///
/// `dropped_blocks` counts competition blocks that were skipped as
/// malformed, so callers can tell "listing had no fixtures" apart from
/// "N blocks were silently unusable".
#[derive(Debug, Default)]
pub struct Extraction {
  pub fixtures:       Vec<RawFixture>,
  pub dropped_blocks: usize,
}

/// Extract every fixture from a listing document.
///
/// A malformed block is dropped (and counted), never fatal: one corrupt
/// fixture must not abort extraction of the remaining sections.
pub fn extract(html: &str) -> Extraction {
  let document = Html::parse_document(html);
  let mut out = Extraction::default();

  for heading in document.select(&DATE_HEADING) {
    let date = text_of(heading);

    // The section runs until the next h3 or end of document.
    for sibling in heading.next_siblings() {
      let Some(el) = ElementRef::wrap(sibling) else { continue };
      if el.value().name() == "h3" {
        break;
      }
      if el.value().name() == "div" && el.value().classes().any(|c| c == "competition") {
        match parse_block(&date, el) {
          Some(fixture) => out.fixtures.push(fixture),
          None => out.dropped_blocks += 1,
        }
      }
    }
  }

  out
}

/// Parse one `div.competition` block into at most one fixture.
///
/// A missing competition-name sub-element drops the block — the primary
/// corrupt-markup defense. Every other missing sub-element degrades to an
/// empty string.
fn parse_block(date: &str, block: ElementRef<'_>) -> Option<RawFixture> {
  let Some(name_el) = block.select(&COMPETITION_NAME).next() else {
    tracing::warn!(date, "competition block without a name element, dropping");
    return None;
  };
  let competition = text_of(name_el);

  let home_team = block
    .select(&HOME_TEAM_LINK)
    .next()
    .map(text_of)
    .unwrap_or_default();
  let away_team = block
    .select(&AWAY_TEAM_LINK)
    .next()
    .map(text_of)
    .unwrap_or_default();
  let time = block.select(&TIME).next().map(text_of).unwrap_or_default();

  let (venue, referee) = block
    .select(&MORE_INFO)
    .next()
    .map(|el| split_more_info(&el.text().collect::<String>()))
    .unwrap_or_default();

  Some(RawFixture {
    date: date.to_owned(),
    competition,
    home_team,
    away_team,
    time,
    venue,
    referee,
    raw_source: block.html(),
    created_at: Utc::now(),
  })
}

fn text_of(el: ElementRef<'_>) -> String {
  el.text().collect::<String>().trim().to_owned()
}

/// Split the combined free-text info block into venue and referee.
///
/// The two labelled extractions are independent — either can be present
/// without the other — and the venue value stops at the referee label so
/// the fields never bleed into each other.
fn split_more_info(text: &str) -> (String, String) {
  const VENUE: &str = "Venue:";
  const REFEREE: &str = "Referee:";

  let venue = match text.find(VENUE) {
    Some(i) => {
      let rest = &text[i + VENUE.len()..];
      let end = rest.find(REFEREE).unwrap_or(rest.len());
      rest[..end].trim().to_owned()
    }
    None => String::new(),
  };

  let referee = match text.find(REFEREE) {
    Some(i) => text[i + REFEREE.len()..].trim().to_owned(),
    None => String::new(),
  };

  (venue, referee)
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  fn block(competition: &str, home: &str, away: &str, time: &str, info: &str) -> String {
    format!(
      r#"<div class="competition">
           <div class="competition-name">{competition}</div>
           <div class="home_team"><a href="/match">{home}</a></div>
           <div class="away_team"><a href="/match">{away}</a></div>
           <div class="time">{time}</div>
           <div class="more_info">{info}</div>
         </div>"#
    )
  }

  #[test]
  fn groups_blocks_under_their_date_heading() {
    let html = format!(
      r#"<h3 class="fix_res_date">Sunday 15th Jun 2025</h3>
         {}
         {}
         <h3 class="fix_res_date">Sunday 22nd Jun 2025</h3>
         {}"#,
      block("SHC", "Ballyhale", "Tullaroan", "14:30", ""),
      block("SHC", "Dicksboro", "Clara", "16:00", ""),
      block("IHC", "Graigue", "Bennettsbridge", "12:00", ""),
    );

    let result = extract(&html);
    assert_eq!(result.fixtures.len(), 3);
    assert_eq!(result.dropped_blocks, 0);
    assert_eq!(result.fixtures[0].date, "Sunday 15th Jun 2025");
    assert_eq!(result.fixtures[1].date, "Sunday 15th Jun 2025");
    assert_eq!(result.fixtures[2].date, "Sunday 22nd Jun 2025");
    // Natural document order, not re-sorted.
    assert_eq!(result.fixtures[0].home_team, "Ballyhale");
    assert_eq!(result.fixtures[1].home_team, "Dicksboro");
  }

  #[test]
  fn block_without_competition_name_is_dropped_and_counted() {
    let html = format!(
      r#"<h3 class="fix_res_date">Sunday 15th Jun 2025</h3>
         {}
         <div class="competition">
           <div class="home_team"><a href="/match">Orphan</a></div>
         </div>"#,
      block("SHC", "Ballyhale", "Tullaroan", "14:30", ""),
    );

    let result = extract(&html);
    assert_eq!(result.fixtures.len(), 1);
    assert_eq!(result.dropped_blocks, 1);
    assert_eq!(result.fixtures[0].competition, "SHC");
  }

  #[test]
  fn missing_team_link_yields_empty_string() {
    let html = r#"<h3 class="fix_res_date">Sunday 15th Jun 2025</h3>
      <div class="competition">
        <div class="competition-name">SHC</div>
        <div class="home_team">no link here</div>
      </div>"#;

    let result = extract(html);
    assert_eq!(result.fixtures.len(), 1);
    assert_eq!(result.fixtures[0].home_team, "");
    assert_eq!(result.fixtures[0].away_team, "");
    assert_eq!(result.fixtures[0].time, "");
  }

  #[test]
  fn venue_and_referee_split_from_combined_info() {
    let html = format!(
      r#"<h3 class="fix_res_date">Sunday 15th Jun 2025</h3>{}"#,
      block("SHC", "A", "B", "14:30", "Venue: Nowlan Park Referee: J. Murphy"),
    );

    let f = &extract(&html).fixtures[0];
    assert_eq!(f.venue, "Nowlan Park");
    assert_eq!(f.referee, "J. Murphy");
  }

  #[test]
  fn venue_without_referee() {
    let html = format!(
      r#"<h3 class="fix_res_date">Sunday 15th Jun 2025</h3>{}"#,
      block("SHC", "A", "B", "14:30", "Venue: Nowlan Park"),
    );

    let f = &extract(&html).fixtures[0];
    assert_eq!(f.venue, "Nowlan Park");
    assert_eq!(f.referee, "");
  }

  #[test]
  fn referee_without_venue() {
    let html = format!(
      r#"<h3 class="fix_res_date">Sunday 15th Jun 2025</h3>{}"#,
      block("SHC", "A", "B", "14:30", "Referee: J. Murphy"),
    );

    let f = &extract(&html).fixtures[0];
    assert_eq!(f.venue, "");
    assert_eq!(f.referee, "J. Murphy");
  }

  #[test]
  fn plain_h3_ends_a_section() {
    let html = format!(
      r#"<h3 class="fix_res_date">Sunday 15th Jun 2025</h3>
         {}
         <h3>Results</h3>
         {}"#,
      block("SHC", "A", "B", "14:30", ""),
      block("SHC", "C", "D", "16:00", ""),
    );

    // The second block sits after a non-date h3 and belongs to no section.
    let result = extract(&html);
    assert_eq!(result.fixtures.len(), 1);
    assert_eq!(result.fixtures[0].home_team, "A");
  }

  #[test]
  fn unrelated_siblings_are_ignored() {
    let html = format!(
      r#"<h3 class="fix_res_date">Sunday 15th Jun 2025</h3>
         <p>some advert</p>
         <div class="sponsor">logo</div>
         {}"#,
      block("SHC", "A", "B", "14:30", ""),
    );

    assert_eq!(extract(&html).fixtures.len(), 1);
  }

  #[test]
  fn empty_document_extracts_nothing() {
    let result = extract("<html><body></body></html>");
    assert!(result.fixtures.is_empty());
    assert_eq!(result.dropped_blocks, 0);
  }

  #[test]
  fn raw_source_keeps_the_block_fragment() {
    let html = format!(
      r#"<h3 class="fix_res_date">Sunday 15th Jun 2025</h3>{}"#,
      block("SHC", "A", "B", "14:30", ""),
    );

    let f = &extract(&html).fixtures[0];
    assert!(f.raw_source.contains("competition-name"));
    assert!(f.raw_source.contains("14:30"));
  }
}
