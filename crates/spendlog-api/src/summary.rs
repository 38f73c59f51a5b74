//! Handler for `GET /summary`.
//!
//! Query params are the same date bounds as `/expenses`, plus an optional
//! exact-match `category`. An empty `category=` is treated as absent.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Query, State},
};
use serde::Deserialize;
use spendlog_core::{expense::CategorySummary, store::ExpenseStore};

use crate::{error::ApiError, expenses::RangeParams};

#[derive(Debug, Deserialize, Default)]
pub struct SummaryParams {
  pub start_date: Option<String>,
  pub end_date:   Option<String>,
  /// Restrict to one category; omitted or empty means every category.
  pub category:   Option<String>,
}

impl SummaryParams {
  fn category_filter(&self) -> Option<&str> {
    self.category.as_deref().filter(|c| !c.is_empty())
  }
}

/// `GET /summary?start_date=<date>&end_date=<date>[&category=<name>]`
pub async fn handler<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<SummaryParams>,
) -> Result<Json<Vec<CategorySummary>>, ApiError>
where
  S: ExpenseStore,
{
  let category = params.category_filter().map(str::to_owned);
  let range = RangeParams {
    start_date: params.start_date,
    end_date:   params.end_date,
  }
  .into_range()?;

  let buckets = store
    .summarize(&range, category.as_deref())
    .await
    .map_err(ApiError::store)?;
  Ok(Json(buckets))
}
