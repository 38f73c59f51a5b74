//! Async HTTP client wrapping the spendlog JSON API.

use anyhow::{Context, Result, anyhow};
use reqwest::{Client, Response};
use serde::Serialize;
use serde_json::Value;
use spendlog_core::{
  ErrorBody,
  catalog::CategoryCatalog,
  expense::{CategorySummary, DateRange, DebugInfo, Expense},
};
use std::time::Duration;

/// Connection settings for the spendlog API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  pub base_url: String,
}

/// Body sent to `POST /api/expenses`.
#[derive(Debug, Clone, Serialize)]
pub struct AddExpense {
  pub date:        String,
  pub amount:      f64,
  pub category:    String,
  pub subcategory: String,
  pub note:        String,
}

/// Async HTTP client for the spendlog JSON REST API.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client: Client,
  config: ApiConfig,
}

impl ApiClient {
  pub fn new(config: ApiConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self { client, config })
  }

  fn url(&self, path: &str) -> String {
    format!(
      "{}/api{}",
      self.config.base_url.trim_end_matches('/'),
      path
    )
  }

  // ── Expenses ──────────────────────────────────────────────────────────────

  /// `POST /api/expenses` — returns the server's success envelope.
  pub async fn add_expense(&self, body: &AddExpense) -> Result<Value> {
    let resp = self
      .client
      .post(self.url("/expenses"))
      .json(body)
      .send()
      .await
      .context("POST /expenses failed")?;

    check(resp, "POST /expenses").await?
      .json()
      .await
      .context("deserialising add response")
  }

  /// `GET /api/expenses?start_date=<d>&end_date=<d>`
  pub async fn list_expenses(&self, range: &DateRange) -> Result<Vec<Expense>> {
    let resp = self
      .client
      .get(self.url("/expenses"))
      .query(&[("start_date", &range.start), ("end_date", &range.end)])
      .send()
      .await
      .context("GET /expenses failed")?;

    check(resp, "GET /expenses").await?
      .json()
      .await
      .context("deserialising expenses")
  }

  /// `GET /api/summary?start_date=<d>&end_date=<d>[&category=<c>]`
  pub async fn summarize(
    &self,
    range: &DateRange,
    category: Option<&str>,
  ) -> Result<Vec<CategorySummary>> {
    let mut query = vec![("start_date", range.start.as_str()), ("end_date", range.end.as_str())];
    if let Some(c) = category {
      query.push(("category", c));
    }

    let resp = self
      .client
      .get(self.url("/summary"))
      .query(&query)
      .send()
      .await
      .context("GET /summary failed")?;

    check(resp, "GET /summary").await?
      .json()
      .await
      .context("deserialising summary")
  }

  // ── Diagnostics & resources ───────────────────────────────────────────────

  /// `GET /api/debug`
  pub async fn debug_info(&self) -> Result<DebugInfo> {
    let resp = self
      .client
      .get(self.url("/debug"))
      .send()
      .await
      .context("GET /debug failed")?;

    check(resp, "GET /debug").await?
      .json()
      .await
      .context("deserialising debug info")
  }

  /// `GET /api/categories`
  pub async fn categories(&self) -> Result<CategoryCatalog> {
    let resp = self
      .client
      .get(self.url("/categories"))
      .send()
      .await
      .context("GET /categories failed")?;

    check(resp, "GET /categories").await?
      .json()
      .await
      .context("deserialising category catalog")
  }
}

/// Turn a non-2xx response into an error carrying the server's kind and
/// message.
async fn check(resp: Response, what: &str) -> Result<Response> {
  let status = resp.status();
  if status.is_success() {
    return Ok(resp);
  }
  let body = resp.bytes().await.unwrap_or_default();
  Err(anyhow!("{what} → {status} {}", describe_failure(&body)))
}

/// `[kind] message` from an [`ErrorBody`], or the raw text when the body has
/// some other shape.
fn describe_failure(body: &[u8]) -> String {
  match serde_json::from_slice::<ErrorBody>(body) {
    Ok(ErrorBody { error }) => format!("[{}] {}", error.kind, error.message),
    Err(_) => String::from_utf8_lossy(body).trim().to_owned(),
  }
}
