//! SQLite storage bootstrap and schema migration entry points.
//!
//! # Responsibility
//! - Open and configure SQLite connections for the warehouse core.
//! - Apply schema migrations in deterministic order.
//!
//! # Invariants
//! - Migration version is tracked via `PRAGMA user_version`.
//! - Repositories must not touch tables before migrations succeed.
//! - Foreign key enforcement is always on for returned connections.

use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory, open_db_with_busy_timeout, DEFAULT_BUSY_TIMEOUT};

pub type DbResult<T> = Result<T, DbError>;

/// Tables created by the migrations, parents before children.
pub const TABLES: &[&str] = &[
    "localities",
    "warehouses",
    "buyers",
    "product_types",
    "sellers",
    "carriers",
    "employees",
    "sections",
    "products",
    "product_batches",
    "inbound_orders",
    "purchase_orders",
];

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "database schema version {db_version} is newer than supported {latest_supported}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// Returns `(table, row_count)` for every table in [`TABLES`].
pub fn table_row_counts(conn: &Connection) -> DbResult<Vec<(&'static str, i64)>> {
    TABLES
        .iter()
        .map(|&table| -> DbResult<(&'static str, i64)> {
            let count: i64 =
                conn.query_row(&format!("SELECT COUNT(*) FROM {table};"), [], |row| row.get(0))?;
            Ok((table, count))
        })
        .collect()
}
