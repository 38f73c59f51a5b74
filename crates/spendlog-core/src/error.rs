//! Error types for `spendlog-core`, and the failure taxonomy shared by every
//! store backend.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ─── Taxonomy ────────────────────────────────────────────────────────────────

/// Machine-distinguishable failure kind surfaced to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
  /// The schema could not be created or the storage location accessed.
  StorageUnavailable,
  /// An insert could not be committed.
  StorageWriteFailed,
  /// A query could not execute.
  StorageReadFailed,
  /// A mandatory argument was absent.
  InvalidArgument,
}

impl ErrorKind {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::StorageUnavailable => "storage_unavailable",
      Self::StorageWriteFailed => "storage_write_failed",
      Self::StorageReadFailed => "storage_read_failed",
      Self::InvalidArgument => "invalid_argument",
    }
  }
}

impl fmt::Display for ErrorKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Implemented by backend error types so higher layers can report an
/// [`ErrorKind`] without knowing the concrete backend.
pub trait Classify {
  fn kind(&self) -> ErrorKind;
}

// ─── Core error ──────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum Error {
  #[error("missing required argument: {0}")]
  MissingArgument(&'static str),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

impl Classify for Error {
  fn kind(&self) -> ErrorKind {
    match self {
      Error::MissingArgument(_) => ErrorKind::InvalidArgument,
      Error::Serialization(_) => ErrorKind::StorageReadFailed,
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

// ─── Wire shape ──────────────────────────────────────────────────────────────

/// Body of every failed HTTP response:
/// `{"error": {"kind": "<kind>", "message": "<message>"}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
  pub error: ErrorDetail,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
  pub kind:    ErrorKind,
  pub message: String,
}

impl ErrorBody {
  pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
    Self { error: ErrorDetail { kind, message: message.into() } }
  }
}
