//! The ingestion pipeline: fetch → extract → upsert → summarize.
//!
//! One [`Ingestor::run`] is a single-shot, stateless-between-runs operation;
//! repeated full runs are safe because the store upsert is idempotent. The
//! scheduler below owns the ingestor and serializes timer ticks with manual
//! refresh triggers, so runs never overlap.

use std::{sync::Arc, time::Duration};

use chrono::Utc;
use sliotar_core::{
  fixture::Fixture,
  store::{FixtureQuery, FixtureStore},
};
use tokio::sync::{Mutex, mpsc};

use crate::{
  error::{Error, Result},
  extract::extract,
  fetch::FixtureSource,
};

/// Per-run summary. `fixtures` is the current full store contents in
/// ascending date order, not just the rows this run added.
#[derive(Debug)]
pub struct IngestOutcome {
  pub extracted:      usize,
  pub dropped_blocks: usize,
  pub inserted:       usize,
  pub fixtures:       Vec<Fixture>,
}

/// Orchestrates one fetch-extract-upsert cycle against a store.
///
/// Constructed explicitly and passed around; there is no module-level
/// instance.
pub struct Ingestor<F, S> {
  source:  F,
  store:   Arc<S>,
  running: Mutex<()>,
}

impl<F, S> Ingestor<F, S>
where
  F: FixtureSource,
  S: FixtureStore,
{
  pub fn new(source: F, store: Arc<S>) -> Self {
    Self {
      source,
      store,
      running: Mutex::new(()),
    }
  }

  /// Run the pipeline once.
  ///
  /// Any stage's failure propagates to the caller; no stage is retried
  /// internally. A fetch failure aborts before any persistence. A second
  /// call while one is in flight returns [`Error::RunInProgress`] instead
  /// of issuing a duplicate fetch.
  pub async fn run(&self) -> Result<IngestOutcome> {
    let _guard = self.running.try_lock().map_err(|_| Error::RunInProgress)?;

    tracing::debug!("fetching listing");
    let html = self.source.fetch().await?;

    tracing::debug!(bytes = html.len(), "extracting fixtures");
    let extraction = extract(&html);
    let extracted = extraction.fixtures.len();
    let dropped_blocks = extraction.dropped_blocks;
    if extracted == 0 {
      // An empty upstream listing is valid, but must not look like a
      // fetch failure in the logs.
      tracing::info!(dropped_blocks, "listing contained no fixtures");
    }

    tracing::debug!(extracted, "persisting fixtures");
    let inserted = self
      .store
      .upsert(extraction.fixtures)
      .await
      .map_err(|e| Error::Store(Box::new(e)))?;

    let page = self
      .store
      .query(&FixtureQuery::everything(Utc::now().date_naive()))
      .await
      .map_err(|e| Error::Store(Box::new(e)))?;

    tracing::info!(
      extracted,
      dropped_blocks,
      inserted,
      total = page.total,
      "ingestion run complete"
    );

    Ok(IngestOutcome {
      extracted,
      dropped_blocks,
      inserted,
      fixtures: page.fixtures,
    })
  }
}

// ─── Scheduler ───────────────────────────────────────────────────────────────

/// Drive `ingestor` on a fixed interval, interleaved with manual refresh
/// triggers from `refresh`.
///
/// The first tick fires immediately (initial ingest at startup). The task
/// owns the ingestor, so timer and manual triggers are serialized by
/// construction; callers should give `refresh` capacity 1 and `try_send`
/// into it, which coalesces triggers that arrive while a run is active.
/// Returns when every refresh sender is dropped.
pub async fn run_scheduler<F, S>(
  ingestor: Ingestor<F, S>,
  every: Duration,
  mut refresh: mpsc::Receiver<()>,
) where
  F: FixtureSource,
  S: FixtureStore,
{
  let mut ticker = tokio::time::interval(every);
  ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

  loop {
    tokio::select! {
      _ = ticker.tick() => {}
      triggered = refresh.recv() => {
        if triggered.is_none() {
          tracing::info!("refresh channel closed, scheduler stopping");
          return;
        }
        tracing::info!("manual refresh triggered");
      }
    }

    if let Err(e) = ingestor.run().await {
      // The next trigger retries; partial upserts already committed stay
      // valid because ingestion is idempotent.
      tracing::error!(error = %e, "ingestion run failed");
    }
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
