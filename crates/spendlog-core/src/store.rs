//! The `ExpenseStore` trait and the schema-initialisation policy.
//!
//! The trait is implemented by storage backends (e.g. `spendlog-store-sqlite`).
//! Higher layers (`spendlog-api`, `spendlog-server`) depend on this
//! abstraction, not on any concrete backend.

use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::{
  error::Classify,
  expense::{CategorySummary, DateRange, DebugInfo, Expense, NewExpense},
};

// ─── Init policy ─────────────────────────────────────────────────────────────

/// When the backend creates its schema.
///
/// Either way every operation still calls
/// [`ExpenseStore::ensure_schema`] first; the policy only decides whether the
/// first call happens while opening the store or inside the first operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaInit {
  /// Create the schema while opening. Startup pays the cost and fails fast
  /// when storage is unusable.
  #[default]
  Eager,
  /// Defer creation to the first operation, which observes the extra latency.
  Lazy,
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over an expense ledger backend.
///
/// The ledger is append-only: rows are created by
/// [`add_expense`](Self::add_expense) and never updated or deleted.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait ExpenseStore: Send + Sync {
  type Error: std::error::Error + Classify + Send + Sync + 'static;

  /// Create the expense table if it does not exist. Idempotent and safe to
  /// call concurrently.
  fn ensure_schema(&self) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Append one expense and return its newly assigned id.
  fn add_expense(
    &self,
    input: NewExpense,
  ) -> impl Future<Output = Result<i64, Self::Error>> + Send + '_;

  /// Every expense dated within `range`, newest date first, ties broken by
  /// descending id.
  fn list_expenses<'a>(
    &'a self,
    range: &'a DateRange,
  ) -> impl Future<Output = Result<Vec<Expense>, Self::Error>> + Send + 'a;

  /// Per-category totals for expenses within `range`, largest total first.
  ///
  /// When `category` is `Some`, rows are filtered to that exact category
  /// before grouping, so at most one bucket is returned.
  fn summarize<'a>(
    &'a self,
    range: &'a DateRange,
    category: Option<&'a str>,
  ) -> impl Future<Output = Result<Vec<CategorySummary>, Self::Error>> + Send + 'a;

  /// Storage location, existence, and total row count.
  fn debug_info(&self) -> impl Future<Output = Result<DebugInfo, Self::Error>> + Send + '_;
}
