//! Handler for `GET /debug` — the diagnostics probe.

use std::sync::Arc;

use axum::{Json, extract::State};
use spendlog_core::{expense::DebugInfo, store::ExpenseStore};

use crate::error::ApiError;

/// `GET /debug` — storage location, existence, and row count.
pub async fn handler<S>(State(store): State<Arc<S>>) -> Result<Json<DebugInfo>, ApiError>
where
  S: ExpenseStore,
{
  let info = store.debug_info().await.map_err(ApiError::store)?;
  Ok(Json(info))
}
