//! Handlers for `/expenses` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/expenses` | `?start_date` and `?end_date` required; inclusive, lexical |
//! | `POST` | `/expenses` | Body: [`AddExpenseBody`]; returns 201 + [`AddExpenseResponse`] |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Query, State, rejection::JsonRejection},
  http::StatusCode,
  response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use spendlog_core::{
  Error,
  expense::{DateRange, Expense, NewExpense},
  store::ExpenseStore,
};

use crate::error::ApiError;

// ─── Shared params ────────────────────────────────────────────────────────────

/// Date bounds accepted by the read endpoints.
///
/// Both fields are `Option` so that an absent bound surfaces as an
/// `invalid_argument` error body rather than a bare extractor rejection.
#[derive(Debug, Deserialize, Default)]
pub struct RangeParams {
  pub start_date: Option<String>,
  pub end_date:   Option<String>,
}

impl RangeParams {
  pub fn into_range(self) -> Result<DateRange, Error> {
    let start = self.start_date.ok_or(Error::MissingArgument("start_date"))?;
    let end   = self.end_date.ok_or(Error::MissingArgument("end_date"))?;
    Ok(DateRange::new(start, end))
  }
}

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /expenses?start_date=<date>&end_date=<date>`
pub async fn list<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<RangeParams>,
) -> Result<Json<Vec<Expense>>, ApiError>
where
  S: ExpenseStore,
{
  let range = params.into_range()?;
  let expenses = store.list_expenses(&range).await.map_err(ApiError::store)?;
  Ok(Json(expenses))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// JSON body accepted by `POST /expenses`.
#[derive(Debug, Deserialize, Default)]
pub struct AddExpenseBody {
  pub date:        Option<String>,
  pub amount:      Option<f64>,
  pub category:    Option<String>,
  #[serde(default)]
  pub subcategory: String,
  #[serde(default)]
  pub note:        String,
}

impl TryFrom<AddExpenseBody> for NewExpense {
  type Error = Error;

  fn try_from(b: AddExpenseBody) -> Result<Self, Error> {
    Ok(NewExpense {
      date:        b.date.ok_or(Error::MissingArgument("date"))?,
      amount:      b.amount.ok_or(Error::MissingArgument("amount"))?,
      category:    b.category.ok_or(Error::MissingArgument("category"))?,
      subcategory: b.subcategory,
      note:        b.note,
    })
  }
}

/// Success body for `POST /expenses`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddExpenseResponse {
  pub status:  String,
  pub id:      i64,
  pub message: String,
}

impl AddExpenseResponse {
  pub fn success(id: i64) -> Self {
    Self {
      status:  "success".to_owned(),
      id,
      message: "Expense added successfully".to_owned(),
    }
  }
}

/// `POST /expenses` — returns 201 + [`AddExpenseResponse`].
///
/// A body that is not valid JSON, or has a field of the wrong type, is an
/// `invalid_argument` failure like a missing field.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  body: Result<Json<AddExpenseBody>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ExpenseStore,
{
  let Json(body) = body?;
  let input = NewExpense::try_from(body)?;
  let id = store.add_expense(input).await.map_err(ApiError::store)?;
  Ok((StatusCode::CREATED, Json(AddExpenseResponse::success(id))))
}
