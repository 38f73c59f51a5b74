//! Error types and axum `IntoResponse` implementation for the server's own
//! routes. Ledger operations report through [`spendlog_api::ApiError`], and
//! these errors are rendered the same way.

use std::path::PathBuf;

use axum::response::{IntoResponse, Response};
use spendlog_api::ApiError;
use spendlog_core::{Classify, ErrorKind};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("cannot read category catalog {path:?}: {source}")]
  Catalog {
    path:   PathBuf,
    #[source]
    source: std::io::Error,
  },
  #[error("core error: {0}")]
  Core(#[from] spendlog_core::Error),
}

impl Classify for Error {
  fn kind(&self) -> ErrorKind {
    match self {
      Error::Catalog { .. } => ErrorKind::StorageReadFailed,
      Error::Core(e) => e.kind(),
    }
  }
}

impl IntoResponse for Error {
  fn into_response(self) -> Response { ApiError::store(self).into_response() }
}
