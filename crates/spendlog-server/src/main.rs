//! spendlog server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), overlays
//! `SPENDLOG_*` environment variables, opens the SQLite ledger, and serves
//! the JSON API over HTTP.
//!
//! ```
//! SPENDLOG_DATA_DIR=/var/lib/spendlog SPENDLOG_SCHEMA_INIT=lazy \
//!   cargo run -p spendlog-server --bin server
//! ```

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use anyhow::Context as _;
use clap::Parser;
use spendlog_core::store::{ExpenseStore, SchemaInit};
use spendlog_server::{AppState, ServerConfig};
use spendlog_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "spendlog expense ledger server")]
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
    .add_source(config::Environment::with_prefix("SPENDLOG").try_parsing(true))
    .build()
    .context("failed to read config file")?;

  let mut server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  // Expand `~` in configured paths.
  server_cfg.data_dir = expand_tilde(&server_cfg.data_dir);
  server_cfg.categories_path = server_cfg.categories_path.as_deref().map(expand_tilde);

  std::fs::create_dir_all(&server_cfg.data_dir).with_context(|| {
    format!("failed to create data directory {:?}", server_cfg.data_dir)
  })?;

  let db_path = server_cfg.db_path();
  tracing::info!(path = %db_path.display(), schema_init = ?server_cfg.schema_init, "opening database");

  let store = SqliteStore::open_with(&db_path, server_cfg.store_options())
    .await
    .with_context(|| format!("failed to open store at {db_path:?}"))?;

  // Counting rows would create the schema, so only report it when eager.
  match server_cfg.schema_init {
    SchemaInit::Eager => {
      let info = store.debug_info().await.context("failed to probe database")?;
      tracing::info!(rows = info.total_rows, "database ready");
    }
    SchemaInit::Lazy => tracing::info!("schema creation deferred to first request"),
  }

  let address = format!("{}:{}", server_cfg.host, server_cfg.port);

  let state = AppState {
    store:  Arc::new(store),
    config: Arc::new(server_cfg),
  };

  let app = spendlog_server::router(state);

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("server error")?;

  Ok(())
}

/// Resolve on Ctrl-C.
async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    tracing::warn!(error = %e, "failed to listen for ctrl-c");
    std::future::pending::<()>().await;
  }
  tracing::info!("shutting down");
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
