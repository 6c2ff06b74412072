//! sliotar fixtures server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), opens an
//! in-process SQLite store, starts the ingestion scheduler, and serves the
//! fixtures API over HTTP. The first ingestion run fires immediately at
//! startup, so a fresh deployment is populated within one fetch.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
  time::Duration,
};

use anyhow::Context as _;
use clap::Parser;
use sliotar_api::{AppState, ServerConfig};
use sliotar_scrape::{HttpSource, Ingestor, run_scheduler};
use sliotar_store_sqlite::SqliteStore;
use tokio::{net::TcpListener, sync::mpsc};
use tower_http::trace::TraceLayer;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "GAA fixtures server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  // Load configuration.
  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("SLIOTAR"))
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  // Expand `~` in store path.
  let store_path = expand_tilde(&server_cfg.store_path);

  // Open SQLite store.
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;
  let store = Arc::new(store);

  // Wire up the ingestion scheduler. The API only holds the refresh sender;
  // the scheduler task owns the ingestor.
  let source = HttpSource::new(
    &server_cfg.base_url,
    &server_cfg.club_id,
    &server_cfg.county_board_id,
  )
  .context("failed to build HTTP source")?;
  let ingestor = Ingestor::new(source, store.clone());
  let (refresh_tx, refresh_rx) = mpsc::channel(1);
  let interval = Duration::from_secs(server_cfg.fetch_interval_minutes * 60);
  tokio::spawn(run_scheduler(ingestor, interval, refresh_rx));

  // Build application state.
  let state = AppState {
    store,
    refresh: refresh_tx,
    config: Arc::new(server_cfg.clone()),
  };

  let app = sliotar_api::router(state).layer(TraceLayer::new_for_http());
  let address = format!("{}:{}", server_cfg.host, server_cfg.port);

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
