//! Per-entity declaration consumed by the generic repository and service.
//!
//! # Responsibility
//! - Describe one persisted record shape: table, columns, unique key and
//!   foreign references.
//! - Convert records to bound values and back from rows.
//!
//! # Invariants
//! - `COLUMNS` excludes `id`; `column_values()` yields values in the same order.
//! - `foreign_key_values()` yields values in `FOREIGN_KEYS` order.
//! - `id() == 0` means the record has not been created yet.

use crate::model::validation::ValidationError;
use rusqlite::types::Value;
use rusqlite::Row;
use std::fmt::Debug;

/// Storage-assigned numeric identifier.
pub type RecordId = i64;

/// Declared foreign reference from one entity column to another table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForeignKey {
    /// Referencing column on the entity table.
    pub column: &'static str,
    /// Referenced table; the target column is always its primary key `id`.
    pub table: &'static str,
    /// Referenced entity name used in errors and logs.
    pub entity: &'static str,
}

/// How `get` reports a missing record for one entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingRecordPolicy {
    /// Surface as `NotFound`.
    NotFound,
    /// Widen to `Invalid` (caller asked for an id that cannot be used).
    Invalid,
}

/// Record type persisted through `SqliteRepository`.
pub trait Entity: Clone + Debug {
    /// Singular entity name, e.g. `carrier`.
    const NAME: &'static str;
    /// Backing table.
    const TABLE: &'static str;
    /// Persisted attribute columns, `id` excluded.
    const COLUMNS: &'static [&'static str];
    /// Column holding the unique key.
    const UNIQUE_KEY: &'static str;
    /// Foreign references checked before insert, in check order.
    const FOREIGN_KEYS: &'static [ForeignKey] = &[];
    /// Miss policy applied by `EntityService::get`.
    const MISSING_ON_GET: MissingRecordPolicy = MissingRecordPolicy::NotFound;

    fn id(&self) -> RecordId;
    fn set_id(&mut self, id: RecordId);
    /// Current unique key value.
    fn unique_key(&self) -> Value;
    /// Current foreign reference values, aligned with `FOREIGN_KEYS`.
    fn foreign_key_values(&self) -> Vec<Value> {
        Vec::new()
    }
    /// Bound values aligned with `COLUMNS`.
    fn column_values(&self) -> Vec<Value>;
    /// Decodes one row selected with `id` plus `COLUMNS`.
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self>;
    /// Model-level checks run before every write.
    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }
}

/// Pairs each declared foreign key with the record's current value.
pub fn foreign_references<E: Entity>(record: &E) -> Vec<(&'static ForeignKey, Value)> {
    E::FOREIGN_KEYS
        .iter()
        .zip(record.foreign_key_values())
        .collect()
}

/// Renders a bound value for errors and log lines.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Integer(number) => number.to_string(),
        Value::Real(number) => number.to_string(),
        Value::Text(text) => text.clone(),
        Value::Blob(bytes) => format!("<{} bytes>", bytes.len()),
    }
}
