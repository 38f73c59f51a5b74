//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  extract::rejection::JsonRejection,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use spendlog_core::{Classify, ErrorBody, ErrorKind};
use thiserror::Error;

/// An error returned by an API handler.
///
/// Rendered as [`ErrorBody`]: `{"error": {"kind": "<kind>", "message": "<message>"}}`.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error(transparent)]
  Core(#[from] spendlog_core::Error),

  /// The request body was not JSON of the expected shape.
  #[error(transparent)]
  Body(#[from] JsonRejection),

  #[error("{source}")]
  Store {
    kind:   ErrorKind,
    #[source]
    source: Box<dyn std::error::Error + Send + Sync>,
  },
}

impl ApiError {
  /// Wrap a backend error, capturing its kind before erasing the type.
  pub fn store<E>(err: E) -> Self
  where
    E: std::error::Error + Classify + Send + Sync + 'static,
  {
    ApiError::Store { kind: err.kind(), source: Box::new(err) }
  }

  pub fn kind(&self) -> ErrorKind {
    match self {
      ApiError::Core(e) => e.kind(),
      ApiError::Body(_) => ErrorKind::InvalidArgument,
      ApiError::Store { kind, .. } => *kind,
    }
  }

  pub fn status(&self) -> StatusCode { status_for(self.kind()) }
}

/// HTTP status for a failure of `kind`.
pub fn status_for(kind: ErrorKind) -> StatusCode {
  match kind {
    ErrorKind::InvalidArgument => StatusCode::BAD_REQUEST,
    ErrorKind::StorageUnavailable => StatusCode::SERVICE_UNAVAILABLE,
    ErrorKind::StorageWriteFailed | ErrorKind::StorageReadFailed => {
      StatusCode::INTERNAL_SERVER_ERROR
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let kind   = self.kind();
    let status = status_for(kind);
    if status.is_server_error() {
      tracing::error!(%kind, error = %self, "request failed");
    }
    (status, Json(ErrorBody::new(kind, self.to_string()))).into_response()
  }
}
