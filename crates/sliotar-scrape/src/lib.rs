//! Ingestion side of Sliotar: HTML fixture extraction, listing fetch, and
//! the fetch → extract → upsert pipeline with its scheduler.

pub mod error;
pub mod extract;
pub mod fetch;
pub mod pipeline;

pub use error::{Error, Result};
pub use extract::{Extraction, extract};
pub use fetch::{FixtureSource, HttpSource};
pub use pipeline::{IngestOutcome, Ingestor, run_scheduler};
