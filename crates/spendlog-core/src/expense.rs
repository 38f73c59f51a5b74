//! Expense types — the persisted ledger row and its read models.
//!
//! Rows are append-only. The store never updates or deletes an expense once
//! its `id` has been assigned.

use serde::{Deserialize, Serialize};

// ─── Expense ─────────────────────────────────────────────────────────────────

/// One persisted ledger row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
  /// Store-assigned, monotonically increasing, never reused.
  pub id:          i64,
  /// Opaque, lexically sortable date string (e.g. ISO 8601).
  pub date:        String,
  pub amount:      f64,
  /// Free text; not checked against the category catalog.
  pub category:    String,
  pub subcategory: String,
  pub note:        String,
}

// ─── NewExpense ──────────────────────────────────────────────────────────────

/// Input to [`crate::store::ExpenseStore::add_expense`].
/// `id` is always assigned by the store; it is not accepted from callers.
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
  pub date:        String,
  pub amount:      f64,
  pub category:    String,
  pub subcategory: String,
  pub note:        String,
}

impl NewExpense {
  /// Convenience constructor with `subcategory` and `note` left empty.
  pub fn new(date: impl Into<String>, amount: f64, category: impl Into<String>) -> Self {
    Self {
      date: date.into(),
      amount,
      category: category.into(),
      subcategory: String::new(),
      note: String::new(),
    }
  }

  pub fn with_subcategory(mut self, subcategory: impl Into<String>) -> Self {
    self.subcategory = subcategory.into();
    self
  }

  pub fn with_note(mut self, note: impl Into<String>) -> Self {
    self.note = note.into();
    self
  }
}

// ─── Date range ──────────────────────────────────────────────────────────────

/// Inclusive `[start, end]` bounds compared lexically against `date`.
///
/// No parsing is performed; callers supply dates in a format that sorts
/// correctly as text. A range whose `start` sorts after its `end` matches
/// nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
  pub start: String,
  pub end:   String,
}

impl DateRange {
  pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
    Self { start: start.into(), end: end.into() }
  }

  /// `true` when the bounds are inverted and no date can fall inside.
  pub fn is_inverted(&self) -> bool { self.start > self.end }
}

// ─── Read models ─────────────────────────────────────────────────────────────

/// One bucket of [`crate::store::ExpenseStore::summarize`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySummary {
  pub category:     String,
  pub total_amount: f64,
  pub count:        i64,
}

/// Operational snapshot returned by the diagnostics probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebugInfo {
  /// Configured database file path, or `":memory:"`.
  pub storage_location: String,
  pub exists:           bool,
  pub total_rows:       i64,
}
