//! The `FixtureSource` trait and its HTTP implementation.
//!
//! The pipeline depends on the trait, not on the network, so ingestion is
//! testable with canned markup.

use std::{future::Future, time::Duration};

use crate::error::Result;

/// Where raw listing markup comes from.
pub trait FixtureSource: Send + Sync {
  /// Fetch one listing document. Must apply a bounded timeout and fail
  /// fast rather than hang.
  fn fetch(&self) -> impl Future<Output = Result<String>> + Send + '_;
}

// ─── HTTP implementation ─────────────────────────────────────────────────────

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Fetches the vendor's fixtures-only AJAX listing for one club.
pub struct HttpSource {
  client: reqwest::Client,
  url:    String,
}

impl HttpSource {
  pub fn new(base_url: &str, club_id: &str, county_board_id: &str) -> Result<Self> {
    let client = reqwest::Client::builder().timeout(FETCH_TIMEOUT).build()?;
    let url = format!(
      "{}/fixtures-results/fixtures-results-ajax/?clubID={}&countyBoardID={}&fixturesOnly=Y",
      base_url.trim_end_matches('/'),
      club_id,
      county_board_id,
    );
    Ok(Self { client, url })
  }
}

impl FixtureSource for HttpSource {
  async fn fetch(&self) -> Result<String> {
    let response = self
      .client
      .get(&self.url)
      .send()
      .await?
      .error_for_status()?;
    let body = response.text().await?;
    tracing::debug!(bytes = body.len(), "fetched listing");
    Ok(body)
  }
}
