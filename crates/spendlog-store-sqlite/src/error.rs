//! Error type for `spendlog-store-sqlite`.

use spendlog_core::{Classify, ErrorKind};
use thiserror::Error;

/// Every variant wraps the underlying SQLite failure; the variant records
/// which phase of the operation failed.
#[derive(Debug, Error)]
pub enum Error {
  /// Opening the database or running the schema DDL failed.
  #[error("storage unavailable: {0}")]
  StorageUnavailable(#[source] tokio_rusqlite::Error),

  #[error("storage write failed: {0}")]
  StorageWriteFailed(#[source] tokio_rusqlite::Error),

  #[error("storage read failed: {0}")]
  StorageReadFailed(#[source] tokio_rusqlite::Error),
}

impl Classify for Error {
  fn kind(&self) -> ErrorKind {
    match self {
      Error::StorageUnavailable(_) => ErrorKind::StorageUnavailable,
      Error::StorageWriteFailed(_) => ErrorKind::StorageWriteFailed,
      Error::StorageReadFailed(_) => ErrorKind::StorageReadFailed,
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
