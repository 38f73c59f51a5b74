//! HTTP server assembly for spendlog.
//!
//! Mounts the ledger API from [`spendlog_api`] and the category catalog
//! resource under `/api`, backed by any [`ExpenseStore`].

pub mod catalog;
pub mod error;

pub use error::Error;

use std::{path::PathBuf, sync::Arc, time::Duration};

use axum::{Router, routing::get};
use serde::Deserialize;
use spendlog_core::store::{ExpenseStore, SchemaInit};
use spendlog_store_sqlite::StoreOptions;
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `SPENDLOG_*` environment variables. Every key is optional.
#[derive(Deserialize, Clone, Debug)]
#[serde(default)]
pub struct ServerConfig {
  pub host:            String,
  pub port:            u16,
  /// Directory holding the database file; created at startup if missing.
  pub data_dir:        PathBuf,
  pub db_file:         String,
  /// Optional JSON catalog served by `/api/categories`.
  pub categories_path: Option<PathBuf>,
  pub schema_init:     SchemaInit,
  pub busy_timeout_ms: u64,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:            "0.0.0.0".to_string(),
      port:            8000,
      data_dir:        PathBuf::from("."),
      db_file:         "expenses.db".to_string(),
      categories_path: None,
      schema_init:     SchemaInit::Eager,
      busy_timeout_ms: 5000,
    }
  }
}

impl ServerConfig {
  pub fn db_path(&self) -> PathBuf { self.data_dir.join(&self.db_file) }

  pub fn store_options(&self) -> StoreOptions {
    StoreOptions {
      schema_init:  self.schema_init,
      busy_timeout: Duration::from_millis(self.busy_timeout_ms),
    }
  }
}

// ─── Application state ────────────────────────────────────────────────────────

/// Everything the router needs.
#[derive(Clone)]
pub struct AppState<S: ExpenseStore> {
  pub store:  Arc<S>,
  pub config: Arc<ServerConfig>,
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the axum [`Router`] for the whole service.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: ExpenseStore + Clone + 'static,
{
  let resources = Router::new()
    .route("/categories", get(catalog::handler))
    .with_state(state.config);

  Router::new()
    .nest("/api", spendlog_api::api_router(state.store).merge(resources))
    .layer(TraceLayer::new_for_http())
}

// ─── Integration tests ────────────────────────────────────────────────────────
