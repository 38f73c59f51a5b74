//! [`SqliteStore`] — the SQLite implementation of [`ExpenseStore`].

use std::{
  fmt,
  path::{Path, PathBuf},
  sync::Arc,
  time::Duration,
};

use spendlog_core::{
  expense::{CategorySummary, DateRange, DebugInfo, Expense, NewExpense},
  store::{ExpenseStore, SchemaInit},
};
use tokio::sync::OnceCell;

use crate::{schema::SCHEMA, Error, Result};

const EXPENSE_COLUMNS: &str = "id, date, amount, category, subcategory, note";

// ─── Options ─────────────────────────────────────────────────────────────────

/// Knobs applied when opening a [`SqliteStore`].
#[derive(Debug, Clone, Copy)]
pub struct StoreOptions {
  pub schema_init:  SchemaInit,
  /// How long a writer waits on another process's lock before failing.
  pub busy_timeout: Duration,
}

impl Default for StoreOptions {
  fn default() -> Self {
    Self {
      schema_init:  SchemaInit::default(),
      busy_timeout: Duration::from_secs(5),
    }
  }
}

#[derive(Debug, Clone)]
enum Location {
  File(PathBuf),
  Memory,
}

impl Location {
  fn path(&self) -> Option<&Path> {
    match self {
      Location::File(p) => Some(p),
      Location::Memory => None,
    }
  }
}

impl fmt::Display for Location {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Location::File(p) => write!(f, "{}", p.display()),
      Location::Memory => f.write_str(":memory:"),
    }
  }
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// An expense ledger backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection and the schema guard are
/// reference-counted, so clones share both.
///
/// All statements run on the one background thread owned by
/// [`tokio_rusqlite::Connection`], in submission order. Concurrent writers in
/// this process therefore queue rather than contend; writers in other
/// processes are serialised by SQLite's own locking, waiting up to
/// [`StoreOptions::busy_timeout`].
#[derive(Clone)]
pub struct SqliteStore {
  pub(crate) conn: tokio_rusqlite::Connection,
  location:        Location,
  schema:          Arc<OnceCell<()>>,
}

impl SqliteStore {
  /// Open (or create) a store at `path` with default options.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    Self::open_with(path, StoreOptions::default()).await
  }

  /// Open (or create) a store at `path`. With [`SchemaInit::Eager`] the
  /// schema is created before this returns.
  pub async fn open_with(path: impl AsRef<Path>, options: StoreOptions) -> Result<Self> {
    let path = path.as_ref().to_path_buf();
    let conn = tokio_rusqlite::Connection::open(&path)
      .await
      .map_err(Error::StorageUnavailable)?;
    Self::from_connection(conn, Location::File(path), options).await
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    Self::open_in_memory_with(StoreOptions::default()).await
  }

  pub async fn open_in_memory_with(options: StoreOptions) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory()
      .await
      .map_err(Error::StorageUnavailable)?;
    Self::from_connection(conn, Location::Memory, options).await
  }

  async fn from_connection(
    conn:     tokio_rusqlite::Connection,
    location: Location,
    options:  StoreOptions,
  ) -> Result<Self> {
    let busy_timeout = options.busy_timeout;
    let journal_mode = conn
      .call(move |conn| {
        conn.busy_timeout(busy_timeout)?;
        // In-memory databases stay in "memory" mode; files switch to WAL.
        let mode: String =
          conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;
        Ok(mode)
      })
      .await
      .map_err(Error::StorageUnavailable)?;
    tracing::debug!(%location, journal_mode = %journal_mode, "connection configured");

    let store = Self { conn, location, schema: Arc::new(OnceCell::new()) };
    if options.schema_init == SchemaInit::Eager {
      store.ensure_schema().await?;
    }
    Ok(store)
  }

  /// The configured database path, or `None` for an in-memory store.
  pub fn path(&self) -> Option<&Path> { self.location.path() }

  /// `true` once this store (or a clone of it) has run the schema DDL.
  pub fn schema_ready(&self) -> bool { self.schema.initialized() }
}

fn expense_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Expense> {
  Ok(Expense {
    id:          row.get(0)?,
    date:        row.get(1)?,
    amount:      row.get(2)?,
    category:    row.get(3)?,
    subcategory: row.get(4)?,
    note:        row.get(5)?,
  })
}

fn summary_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<CategorySummary> {
  Ok(CategorySummary {
    category:     row.get(0)?,
    total_amount: row.get(1)?,
    count:        row.get(2)?,
  })
}

// ─── ExpenseStore impl ───────────────────────────────────────────────────────

impl ExpenseStore for SqliteStore {
  type Error = Error;

  // ── Schema ────────────────────────────────────────────────────────────────

  async fn ensure_schema(&self) -> Result<()> {
    // The DDL is idempotent on its own; the cell only spares later calls a
    // round trip to the connection thread.
    self
      .schema
      .get_or_try_init(|| async move {
        self
          .conn
          .call(|conn| {
            conn.execute_batch(SCHEMA)?;
            Ok(())
          })
          .await
          .map_err(Error::StorageUnavailable)?;
        tracing::debug!(location = %self.location, "expense schema ready");
        Ok::<_, Error>(())
      })
      .await?;
    Ok(())
  }

  // ── Writes ────────────────────────────────────────────────────────────────

  async fn add_expense(&self, input: NewExpense) -> Result<i64> {
    self.ensure_schema().await?;

    let NewExpense { date, amount, category, subcategory, note } = input;

    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO expenses (date, amount, category, subcategory, note)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![date, amount, category, subcategory, note],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await
      .map_err(Error::StorageWriteFailed)?;

    tracing::debug!(id, "expense recorded");
    Ok(id)
  }

  // ── Reads ─────────────────────────────────────────────────────────────────

  async fn list_expenses(&self, range: &DateRange) -> Result<Vec<Expense>> {
    self.ensure_schema().await?;
    if range.is_inverted() {
      return Ok(Vec::new());
    }

    let start = range.start.clone();
    let end   = range.end.clone();

    self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {EXPENSE_COLUMNS}
           FROM expenses
           WHERE date BETWEEN ?1 AND ?2
           ORDER BY date DESC, id DESC"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![start, end], expense_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await
      .map_err(Error::StorageReadFailed)
  }

  async fn summarize(
    &self,
    range:    &DateRange,
    category: Option<&str>,
  ) -> Result<Vec<CategorySummary>> {
    self.ensure_schema().await?;
    if range.is_inverted() {
      return Ok(Vec::new());
    }

    // Build WHERE clause and its bindings together so they stay in step.
    let mut conds: Vec<&'static str> = vec!["date BETWEEN ?1 AND ?2"];
    let mut binds: Vec<String>       = vec![range.start.clone(), range.end.clone()];
    if let Some(c) = category {
      conds.push("category = ?3");
      binds.push(c.to_owned());
    }

    // Equal totals fall back to category name so the order is deterministic.
    let sql = format!(
      "SELECT category, SUM(amount) AS total_amount, COUNT(*) AS count
       FROM expenses
       WHERE {}
       GROUP BY category
       ORDER BY total_amount DESC, category ASC",
      conds.join(" AND ")
    );

    self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params_from_iter(binds.iter()), summary_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await
      .map_err(Error::StorageReadFailed)
  }

  // ── Diagnostics ───────────────────────────────────────────────────────────

  async fn debug_info(&self) -> Result<DebugInfo> {
    self.ensure_schema().await?;

    let path = self.location.path().map(Path::to_path_buf);

    let (total_rows, exists) = self
      .conn
      .call(move |conn| {
        let total: i64 =
          conn.query_row("SELECT COUNT(*) FROM expenses", [], |r| r.get(0))?;
        let exists = path.as_deref().is_none_or(Path::exists);
        Ok((total, exists))
      })
      .await
      .map_err(Error::StorageReadFailed)?;

    Ok(DebugInfo {
      storage_location: self.location.to_string(),
      exists,
      total_rows,
    })
  }
}
