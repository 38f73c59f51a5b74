//! The category catalog resource — `GET /api/categories`.
//!
//! Serves the configured catalog file verbatim when it exists, otherwise the
//! built-in default list. The file is read on every request so edits show up
//! without a restart.

use std::{
  io,
  path::{Path, PathBuf},
  sync::Arc,
};

use axum::{
  extract::State,
  http::{HeaderValue, header},
  response::{IntoResponse, Response},
};
use spendlog_core::catalog::CategoryCatalog;

use crate::{ServerConfig, error::Error};

const CONTENT_TYPE_JSON: &str = "application/json";

/// Raw catalog bytes: the file at `path` if present, else the default list.
///
/// A file that exists but cannot be read is an error, not a fallback.
pub async fn load_catalog(path: Option<&Path>) -> Result<Vec<u8>, Error> {
  if let Some(path) = path {
    match tokio::fs::read(path).await {
      Ok(bytes) => return Ok(bytes),
      Err(e) if e.kind() == io::ErrorKind::NotFound => {
        tracing::debug!(path = %path.display(), "catalog file absent; serving defaults");
      }
      Err(source) => {
        return Err(Error::Catalog { path: PathBuf::from(path), source });
      }
    }
  }
  Ok(CategoryCatalog::default().to_json_pretty()?.into_bytes())
}

pub async fn handler(State(config): State<Arc<ServerConfig>>) -> Result<Response, Error> {
  let body = load_catalog(config.categories_path.as_deref()).await?;
  Ok(
    (
      [(header::CONTENT_TYPE, HeaderValue::from_static(CONTENT_TYPE_JSON))],
      body,
    )
      .into_response(),
  )
}
