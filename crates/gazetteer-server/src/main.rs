//! Gazetteer server binary.
//!
//! Reads `config.toml` (or the path given with `--config`) layered under
//! `GAZETTEER_*` environment variables, opens the SQLite store, configures
//! the Gemini client, and serves the city-facts API over HTTP.

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use gazetteer_gemini::{GeminiClient, GeminiConfig};
use gazetteer_server::{AppState, ServerConfig};
use gazetteer_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Gazetteer city-facts server")]
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

  // Load configuration. The API key has no default; startup fails here
  // when it is missing.
  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("GAZETTEER"))
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings.try_deserialize().context(
    "failed to deserialise ServerConfig (is GAZETTEER_GEMINI_API_KEY set?)",
  )?;

  // Open SQLite store.
  let store = SqliteStore::open(&server_cfg.db_path)
    .await
    .with_context(|| format!("failed to open store at {:?}", server_cfg.db_path))?;

  // Configure the generative-API client once at startup; handlers receive
  // it as shared state rather than reaching for a global.
  let generator = GeminiClient::new(GeminiConfig {
    api_key:  server_cfg.gemini_api_key.clone(),
    model:    server_cfg.gemini_model.clone(),
    base_url: gazetteer_gemini::DEFAULT_BASE_URL.to_string(),
  })
  .context("failed to build Gemini client")?;

  let state = AppState {
    store:     Arc::new(store),
    generator: Arc::new(generator),
  };

  let app = gazetteer_server::router(state);
  let address = format!("{}:{}", server_cfg.host, server_cfg.port);

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
