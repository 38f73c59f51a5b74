//! SQL schema for the spendlog SQLite store.
//!
//! Run through [`crate::SqliteStore`]'s schema guard before the first
//! operation. There is a single table and no migrations. Connection pragmas
//! are applied when the store is opened, not here.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
-- Rows are strictly append-only.
-- No UPDATE or DELETE is ever issued against this table.
CREATE TABLE IF NOT EXISTS expenses (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    date        TEXT NOT NULL,   -- opaque, compared lexically
    amount      REAL NOT NULL,
    category    TEXT NOT NULL,
    subcategory TEXT NOT NULL DEFAULT '',
    note        TEXT NOT NULL DEFAULT ''
);

CREATE INDEX IF NOT EXISTS expenses_date_idx ON expenses(date);
";
