//! SQLite constraint-violation classification.
//!
//! # Responsibility
//! - Turn a raw `rusqlite::Error` into a structured constraint outcome.
//! - Contain the only message parsing done on driver errors.
//!
//! # Invariants
//! - Classification keys on the extended result code first; the message is
//!   read only to name the offending `table.column` of a unique violation.
//! - SQLite does not name the failed foreign key, so `ForeignKey` carries no
//!   table; callers resolve it by probing their declared references.
//! - Any other constraint (NOT NULL, CHECK, ...) is not classified here.

use once_cell::sync::Lazy;
use regex::Regex;
use rusqlite::{ffi, ErrorCode};

static UNIQUE_FAILED_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^UNIQUE constraint failed: (.+)$").expect("valid unique constraint regex")
});
static QUALIFIED_COLUMN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([A-Za-z_][A-Za-z0-9_]*)\.([A-Za-z_][A-Za-z0-9_]*)")
        .expect("valid qualified column regex")
});

/// One `table.column` named by a unique-constraint message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintColumn {
    pub table: String,
    pub column: String,
}

/// Classified storage constraint violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstraintViolation {
    /// `SQLITE_CONSTRAINT_UNIQUE` or `SQLITE_CONSTRAINT_PRIMARYKEY`.
    Unique { columns: Vec<ConstraintColumn> },
    /// `SQLITE_CONSTRAINT_FOREIGNKEY`.
    ForeignKey,
}

impl ConstraintViolation {
    /// First violated column belonging to `table`, if the message named one.
    pub fn unique_column_for(&self, table: &str) -> Option<&str> {
        match self {
            Self::Unique { columns } => columns
                .iter()
                .find(|column| column.table == table)
                .map(|column| column.column.as_str()),
            Self::ForeignKey => None,
        }
    }
}

/// Classifies a write error; `None` means "not a classified constraint".
pub fn classify_constraint(err: &rusqlite::Error) -> Option<ConstraintViolation> {
    let rusqlite::Error::SqliteFailure(failure, message) = err else {
        return None;
    };
    if failure.code != ErrorCode::ConstraintViolation {
        return None;
    }

    match failure.extended_code {
        ffi::SQLITE_CONSTRAINT_UNIQUE | ffi::SQLITE_CONSTRAINT_PRIMARYKEY => {
            Some(ConstraintViolation::Unique {
                columns: message
                    .as_deref()
                    .map(parse_unique_columns)
                    .unwrap_or_default(),
            })
        }
        ffi::SQLITE_CONSTRAINT_FOREIGNKEY => Some(ConstraintViolation::ForeignKey),
        _ => None,
    }
}

/// Parses `UNIQUE constraint failed: t.a, t.b` into its qualified columns.
pub fn parse_unique_columns(message: &str) -> Vec<ConstraintColumn> {
    let Some(caps) = UNIQUE_FAILED_RE.captures(message.trim()) else {
        return Vec::new();
    };
    let Some(list) = caps.get(1) else {
        return Vec::new();
    };

    QUALIFIED_COLUMN_RE
        .captures_iter(list.as_str())
        .filter_map(|column| {
            Some(ConstraintColumn {
                table: column.get(1)?.as_str().to_string(),
                column: column.get(2)?.as_str().to_string(),
            })
        })
        .collect()
}
