//! Integration tests for `SqliteStore` against in-memory and on-disk
//! databases.

use std::collections::HashSet;

use spendlog_core::{
  error::{Classify, ErrorKind},
  expense::{DateRange, NewExpense},
  store::{ExpenseStore, SchemaInit},
};

use crate::{SqliteStore, StoreOptions};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

async fn lazy_store() -> SqliteStore {
  SqliteStore::open_in_memory_with(StoreOptions {
    schema_init: SchemaInit::Lazy,
    ..StoreOptions::default()
  })
  .await
  .expect("lazy in-memory store")
}

fn january() -> DateRange { DateRange::new("2024-01-01", "2024-01-31") }

fn everything() -> DateRange { DateRange::new("0000-00-00", "9999-12-31") }

/// Number of `expenses` table definitions in `sqlite_master`.
async fn expense_table_count(s: &SqliteStore) -> i64 {
  s.conn
    .call(|conn| {
      Ok(conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'expenses'",
        [],
        |r| r.get(0),
      )?)
    })
    .await
    .unwrap()
}

// ─── Schema ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn ensure_schema_is_idempotent() {
  let s = store().await;
  for _ in 0..5 {
    s.ensure_schema().await.unwrap();
  }
  assert_eq!(expense_table_count(&s).await, 1);
}

#[tokio::test]
async fn lazy_policy_defers_table_creation() {
  let s = lazy_store().await;
  assert!(!s.schema_ready());
  assert_eq!(expense_table_count(&s).await, 0);

  let rows = s.list_expenses(&january()).await.unwrap();
  assert!(rows.is_empty());
  assert!(s.schema_ready());
  assert_eq!(expense_table_count(&s).await, 1);
}

/// The connection's current `journal_mode`.
async fn journal_mode(s: &SqliteStore) -> String {
  s.conn
    .call(|conn| Ok(conn.query_row("PRAGMA journal_mode", [], |r| r.get(0))?))
    .await
    .unwrap()
}

#[tokio::test]
async fn lazy_file_store_uses_wal_before_first_operation() {
  let dir = tempfile::tempdir().unwrap();
  let s = SqliteStore::open_with(dir.path().join("expenses.db"), StoreOptions {
    schema_init: SchemaInit::Lazy,
    ..StoreOptions::default()
  })
  .await
  .unwrap();
  assert!(!s.schema_ready());
  assert_eq!(journal_mode(&s).await, "wal");
}

#[tokio::test]
async fn eager_policy_creates_table_on_open() {
  let s = store().await;
  assert!(s.schema_ready());
  assert_eq!(expense_table_count(&s).await, 1);
}

#[tokio::test]
async fn concurrent_first_use_across_connections() {
  let dir  = tempfile::tempdir().unwrap();
  let path = dir.path().join("expenses.db");
  let opts = StoreOptions { schema_init: SchemaInit::Lazy, ..StoreOptions::default() };

  // Two independent connections stand in for two processes.
  let a = SqliteStore::open_with(&path, opts).await.unwrap();
  let b = SqliteStore::open_with(&path, opts).await.unwrap();

  let (ra, rb) = tokio::join!(a.ensure_schema(), b.ensure_schema());
  ra.unwrap();
  rb.unwrap();
  assert_eq!(expense_table_count(&a).await, 1);

  let id = a
    .add_expense(NewExpense::new("2024-01-05", 3.0, "Other"))
    .await
    .unwrap();
  let seen = b.list_expenses(&january()).await.unwrap();
  assert_eq!(seen.len(), 1);
  assert_eq!(seen[0].id, id);
}

#[tokio::test]
async fn open_in_missing_directory_is_storage_unavailable() {
  let dir  = tempfile::tempdir().unwrap();
  let path = dir.path().join("no-such-dir").join("expenses.db");

  let err = match SqliteStore::open(&path).await {
    Ok(_) => panic!("opening inside a missing directory should fail"),
    Err(e) => e,
  };
  assert_eq!(err.kind(), ErrorKind::StorageUnavailable);
}

// ─── Record store ────────────────────────────────────────────────────────────

#[tokio::test]
async fn insert_then_read() {
  let s = store().await;

  let id = s
    .add_expense(NewExpense::new("2024-01-05", 12.50, "Food & Dining"))
    .await
    .unwrap();

  let rows = s.list_expenses(&january()).await.unwrap();
  assert_eq!(rows.len(), 1);
  let row = &rows[0];
  assert_eq!(row.id, id);
  assert_eq!(row.date, "2024-01-05");
  assert_eq!(row.amount, 12.50);
  assert_eq!(row.category, "Food & Dining");
  assert_eq!(row.subcategory, "");
  assert_eq!(row.note, "");
}

#[tokio::test]
async fn optional_fields_roundtrip() {
  let s = store().await;
  let input = NewExpense::new("2024-01-09", 42.0, "Shopping")
    .with_subcategory("Electronics")
    .with_note("usb cables");
  s.add_expense(input).await.unwrap();

  let rows = s.list_expenses(&january()).await.unwrap();
  assert_eq!(rows[0].subcategory, "Electronics");
  assert_eq!(rows[0].note, "usb cables");
}

#[tokio::test]
async fn store_accepts_free_text_without_validation() {
  let s = store().await;

  // Not in the catalog, negative, and not a date at all.
  s.add_expense(NewExpense::new("someday", -5.0, "Refund Bucket"))
    .await
    .unwrap();
  s.add_expense(NewExpense::new("", 0.0, "")).await.unwrap();

  let info = s.debug_info().await.unwrap();
  assert_eq!(info.total_rows, 2);
}

#[tokio::test]
async fn ids_increase_monotonically() {
  let s = store().await;
  let mut last = 0;
  for day in 1..=5 {
    let id = s
      .add_expense(NewExpense::new(format!("2024-01-0{day}"), 1.0, "Other"))
      .await
      .unwrap();
    assert!(id > last, "id {id} did not increase past {last}");
    last = id;
  }
}

#[tokio::test]
async fn nan_amount_is_write_failure() {
  let s = store().await;
  // SQLite binds NaN as NULL, which the NOT NULL constraint rejects.
  let err = s
    .add_expense(NewExpense::new("2024-01-05", f64::NAN, "Other"))
    .await
    .unwrap_err();
  assert_eq!(err.kind(), ErrorKind::StorageWriteFailed);
  assert_eq!(s.debug_info().await.unwrap().total_rows, 0);
}

#[tokio::test]
async fn concurrent_adds_get_distinct_ids() {
  let s = lazy_store().await;

  let handles: Vec<_> = (0..25)
    .map(|i| {
      let s = s.clone();
      tokio::spawn(async move {
        s.add_expense(NewExpense::new("2024-01-10", f64::from(i), "Other"))
          .await
          .unwrap()
      })
    })
    .collect();

  let mut ids = HashSet::new();
  for h in handles {
    ids.insert(h.await.unwrap());
  }
  assert_eq!(ids.len(), 25);
  assert_eq!(s.list_expenses(&january()).await.unwrap().len(), 25);
  assert_eq!(expense_table_count(&s).await, 1);
}

// ─── Listing ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn listing_orders_by_date_then_id_descending() {
  let s = store().await;
  let first  = s.add_expense(NewExpense::new("2024-01-01", 1.0, "Other")).await.unwrap();
  let second = s.add_expense(NewExpense::new("2024-01-01", 2.0, "Other")).await.unwrap();
  let later  = s.add_expense(NewExpense::new("2024-01-20", 3.0, "Other")).await.unwrap();

  let ids: Vec<i64> = s
    .list_expenses(&january())
    .await
    .unwrap()
    .into_iter()
    .map(|e| e.id)
    .collect();
  assert_eq!(ids, vec![later, second, first]);
}

#[tokio::test]
async fn listing_excludes_rows_outside_range() {
  let s = store().await;
  s.add_expense(NewExpense::new("2024-01-31", 1.0, "Other")).await.unwrap();
  s.add_expense(NewExpense::new("2024-02-01", 1.0, "Other")).await.unwrap();
  s.add_expense(NewExpense::new("2023-12-31", 1.0, "Other")).await.unwrap();

  let rows = s.list_expenses(&january()).await.unwrap();
  assert_eq!(rows.len(), 1);
  assert_eq!(rows[0].date, "2024-01-31");
}

#[tokio::test]
async fn inverted_range_is_empty_not_error() {
  let s = store().await;
  s.add_expense(NewExpense::new("2024-01-15", 10.0, "Travel")).await.unwrap();

  let backwards = DateRange::new("2024-01-31", "2024-01-01");
  assert!(s.list_expenses(&backwards).await.unwrap().is_empty());
  assert!(s.summarize(&backwards, None).await.unwrap().is_empty());
  assert!(s.summarize(&backwards, Some("Travel")).await.unwrap().is_empty());
}

// ─── Summaries ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn summarize_totals_and_counts_per_category() {
  let s = store().await;
  s.add_expense(NewExpense::new("2024-01-03", 100.0, "Travel")).await.unwrap();
  s.add_expense(NewExpense::new("2024-01-17", 50.0, "Travel")).await.unwrap();
  s.add_expense(NewExpense::new("2024-03-01", 999.0, "Travel")).await.unwrap();
  s.add_expense(NewExpense::new("2024-01-10", 20.0, "Food & Dining")).await.unwrap();

  let buckets = s.summarize(&january(), None).await.unwrap();
  assert_eq!(buckets.len(), 2);

  assert_eq!(buckets[0].category, "Travel");
  assert_eq!(buckets[0].total_amount, 150.0);
  assert_eq!(buckets[0].count, 2);

  assert_eq!(buckets[1].category, "Food & Dining");
  assert_eq!(buckets[1].total_amount, 20.0);
  assert_eq!(buckets[1].count, 1);
}

#[tokio::test]
async fn summarize_category_filter_returns_single_bucket() {
  let s = store().await;
  s.add_expense(NewExpense::new("2024-01-03", 100.0, "Travel")).await.unwrap();
  s.add_expense(NewExpense::new("2024-01-04", 500.0, "Business")).await.unwrap();
  s.add_expense(NewExpense::new("2024-01-05", 5.0, "Other")).await.unwrap();

  let buckets = s.summarize(&january(), Some("Travel")).await.unwrap();
  assert_eq!(buckets.len(), 1);
  assert_eq!(buckets[0].category, "Travel");
  assert_eq!(buckets[0].total_amount, 100.0);
  assert_eq!(buckets[0].count, 1);
}

#[tokio::test]
async fn summarize_unknown_category_is_empty() {
  let s = store().await;
  s.add_expense(NewExpense::new("2024-01-03", 100.0, "Travel")).await.unwrap();
  let buckets = s.summarize(&january(), Some("Yachts")).await.unwrap();
  assert!(buckets.is_empty());
}

#[tokio::test]
async fn summarize_breaks_ties_by_category_name() {
  let s = store().await;
  s.add_expense(NewExpense::new("2024-01-03", 10.0, "Shopping")).await.unwrap();
  s.add_expense(NewExpense::new("2024-01-04", 10.0, "Education")).await.unwrap();
  s.add_expense(NewExpense::new("2024-01-05", 30.0, "Healthcare")).await.unwrap();

  let order: Vec<String> = s
    .summarize(&january(), None)
    .await
    .unwrap()
    .into_iter()
    .map(|b| b.category)
    .collect();
  assert_eq!(order, vec!["Healthcare", "Education", "Shopping"]);
}

// ─── Diagnostics ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn debug_info_matches_full_listing() {
  let s = store().await;
  s.add_expense(NewExpense::new("2023-06-01", 1.0, "Other")).await.unwrap();
  s.add_expense(NewExpense::new("2024-01-01", 2.0, "Travel")).await.unwrap();
  s.add_expense(NewExpense::new("2025-12-31", 3.0, "Business")).await.unwrap();

  let info = s.debug_info().await.unwrap();
  let all  = s.list_expenses(&everything()).await.unwrap();
  assert_eq!(info.total_rows, all.len() as i64);
  assert_eq!(info.total_rows, 3);
  assert_eq!(info.storage_location, ":memory:");
  assert!(info.exists);
}

#[tokio::test]
async fn debug_info_reports_file_location() {
  let dir  = tempfile::tempdir().unwrap();
  let path = dir.path().join("ledger.db");
  let s    = SqliteStore::open(&path).await.unwrap();

  assert_eq!(s.path(), Some(path.as_path()));
  let info = s.debug_info().await.unwrap();
  assert_eq!(info.storage_location, path.display().to_string());
  assert!(info.exists);
  assert_eq!(info.total_rows, 0);
}

#[tokio::test]
async fn debug_info_triggers_lazy_schema() {
  let s = lazy_store().await;
  let info = s.debug_info().await.unwrap();
  assert_eq!(info.total_rows, 0);
  assert!(s.schema_ready());
}
