//! The category catalog — a static reference list served alongside the
//! ledger.
//!
//! Categories are advisory. Expenses accept any category string; nothing in
//! the store checks membership.

use serde::{Deserialize, Serialize};

use crate::Result;

/// Built-in list served when no catalog file is configured or present.
pub const DEFAULT_CATEGORIES: [&str; 10] = [
  "Food & Dining",
  "Transportation",
  "Shopping",
  "Entertainment",
  "Bills & Utilities",
  "Healthcare",
  "Travel",
  "Education",
  "Business",
  "Other",
];

/// Wire shape: `{"categories": [...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCatalog {
  pub categories: Vec<String>,
}

impl Default for CategoryCatalog {
  fn default() -> Self {
    Self {
      categories: DEFAULT_CATEGORIES.iter().map(|c| (*c).to_owned()).collect(),
    }
  }
}

impl CategoryCatalog {
  /// Pretty-printed JSON with two-space indentation.
  pub fn to_json_pretty(&self) -> Result<String> {
    Ok(serde_json::to_string_pretty(self)?)
  }
}
