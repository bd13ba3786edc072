//! Generic entity repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide find/exists/insert/update/delete over any [`Entity`] table.
//! - Classify storage failures into [`ErrorKind`]s exactly once, here.
//!
//! # Invariants
//! - Write paths call `Entity::validate()` before SQL mutations.
//! - Listing is all-or-nothing: one undecodable row fails the whole read.
//! - Existence checks never fail upward; `CheckFailed` collapses to `false`
//!   at the trait boundary.
//! - SQL text is derived once per repository and never mutated.

use crate::context::{Interrupted, OpContext};
use crate::db::DbError;
use crate::error::ErrorKind;
use crate::model::entity::{display_value, foreign_references, Entity, ForeignKey, RecordId};
use crate::model::validation::ValidationError;
use crate::repo::constraint::{classify_constraint, ConstraintViolation};
use crate::repo::readiness::ensure_connection_ready;
use log::{debug, warn};
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::marker::PhantomData;

pub type RepoResult<T> = Result<T, RepoError>;

/// Classified repository error.
#[derive(Debug)]
pub enum RepoError {
    /// No row matched the requested id.
    NotFound { entity: &'static str, id: String },
    /// Unique constraint on `column` rejected `key`.
    AlreadyExists {
        entity: &'static str,
        column: String,
        key: String,
    },
    /// Foreign reference points at an absent row.
    ///
    /// `reference` names the referenced entity when it could be resolved.
    ForeignKeyMissing {
        entity: &'static str,
        reference: Option<&'static str>,
        value: Option<String>,
    },
    Validation(ValidationError),
    Db(DbError),
    /// Persisted row cannot be decoded into its record type.
    InvalidData(String),
    /// Write affected a row count other than the one required.
    UnexpectedRowCount {
        entity: &'static str,
        expected: usize,
        actual: usize,
    },
    /// Context was cancelled or expired before the statement ran.
    Interrupted(Interrupted),
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl RepoError {
    /// Domain classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::AlreadyExists { .. } => ErrorKind::AlreadyExists,
            Self::ForeignKeyMissing { .. } => ErrorKind::ForeignKeyMissing,
            Self::Validation(_) => ErrorKind::Invalid,
            Self::Db(_)
            | Self::InvalidData(_)
            | Self::UnexpectedRowCount { .. }
            | Self::Interrupted(_)
            | Self::UninitializedConnection { .. }
            | Self::MissingRequiredTable(_)
            | Self::MissingRequiredColumn { .. } => ErrorKind::StorageFailure,
        }
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::AlreadyExists {
                entity,
                column,
                key,
            } => write!(f, "{entity} with {column} `{key}` already exists"),
            Self::ForeignKeyMissing {
                entity,
                reference: Some(reference),
                value,
            } => match value {
                Some(value) => write!(f, "{entity} references missing {reference} `{value}`"),
                None => write!(f, "{entity} references missing {reference}"),
            },
            Self::ForeignKeyMissing { entity, .. } => {
                write!(f, "{entity} references a missing record")
            }
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
            Self::UnexpectedRowCount {
                entity,
                expected,
                actual,
            } => write!(
                f,
                "{entity} write affected {actual} rows, expected {expected}"
            ),
            Self::Interrupted(reason) => write!(f, "{reason}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "repository requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "repository requires table `{table}`")
            }
            Self::MissingRequiredColumn { table, column } => write!(
                f,
                "repository requires column `{column}` in table `{table}`"
            ),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::Interrupted(reason) => Some(reason),
            _ => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<Interrupted> for RepoError {
    fn from(value: Interrupted) -> Self {
        Self::Interrupted(value)
    }
}

/// Outcome of one existence probe before it is collapsed to `bool`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Existence {
    Found,
    Absent,
    /// The probe itself failed; callers treat this as absent.
    CheckFailed,
}

impl Existence {
    pub fn is_found(self) -> bool {
        matches!(self, Self::Found)
    }
}

/// Capability interface services depend on, one instance per entity.
pub trait Repository<E: Entity> {
    /// Returns every record, or fails as a whole.
    fn find_all(&self, ctx: &OpContext) -> RepoResult<Vec<E>>;
    /// Loads one record; `NotFound` when no row matches.
    fn find_by_id(&self, ctx: &OpContext, id: RecordId) -> RepoResult<E>;
    /// `true` iff a row holds `key`. Probe failures read as `false`.
    fn exists_by_unique_key(&self, ctx: &OpContext, key: &Value) -> bool;
    /// `true` iff `foreign_key.table` holds `value`. Probe failures read as `false`.
    fn exists_foreign_key(&self, ctx: &OpContext, foreign_key: &ForeignKey, value: &Value)
        -> bool;
    /// Inserts one record and returns its storage-assigned id.
    fn insert(&self, ctx: &OpContext, record: &E) -> RepoResult<RecordId>;
    /// Rewrites every column of the row with `record.id()`.
    fn update(&self, ctx: &OpContext, record: &E) -> RepoResult<()>;
    /// Hard-deletes one row; `NotFound` when nothing was deleted.
    fn delete(&self, ctx: &OpContext, id: RecordId) -> RepoResult<()>;
}

impl<E: Entity, R: Repository<E> + ?Sized> Repository<E> for &R {
    fn find_all(&self, ctx: &OpContext) -> RepoResult<Vec<E>> {
        (**self).find_all(ctx)
    }

    fn find_by_id(&self, ctx: &OpContext, id: RecordId) -> RepoResult<E> {
        (**self).find_by_id(ctx, id)
    }

    fn exists_by_unique_key(&self, ctx: &OpContext, key: &Value) -> bool {
        (**self).exists_by_unique_key(ctx, key)
    }

    fn exists_foreign_key(
        &self,
        ctx: &OpContext,
        foreign_key: &ForeignKey,
        value: &Value,
    ) -> bool {
        (**self).exists_foreign_key(ctx, foreign_key, value)
    }

    fn insert(&self, ctx: &OpContext, record: &E) -> RepoResult<RecordId> {
        (**self).insert(ctx, record)
    }

    fn update(&self, ctx: &OpContext, record: &E) -> RepoResult<()> {
        (**self).update(ctx, record)
    }

    fn delete(&self, ctx: &OpContext, id: RecordId) -> RepoResult<()> {
        (**self).delete(ctx, id)
    }
}

/// SQL text for one entity table, derived from its declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statements {
    pub select_all: String,
    pub select_by_id: String,
    pub exists_by_unique_key: String,
    pub insert: String,
    pub update: String,
    pub delete: String,
}

impl Statements {
    pub fn for_entity<E: Entity>() -> Self {
        let columns = E::COLUMNS.join(", ");
        let placeholders = (1..=E::COLUMNS.len())
            .map(|idx| format!("?{idx}"))
            .collect::<Vec<_>>()
            .join(", ");
        let assignments = E::COLUMNS
            .iter()
            .enumerate()
            .map(|(idx, column)| format!("{column} = ?{}", idx + 1))
            .collect::<Vec<_>>()
            .join(", ");
        let id_slot = E::COLUMNS.len() + 1;
        let table = E::TABLE;

        Self {
            select_all: format!("SELECT id, {columns} FROM {table} ORDER BY id ASC;"),
            select_by_id: format!("SELECT id, {columns} FROM {table} WHERE id = ?1;"),
            exists_by_unique_key: format!(
                "SELECT EXISTS(SELECT 1 FROM {table} WHERE {} = ?1);",
                E::UNIQUE_KEY
            ),
            insert: format!("INSERT INTO {table} ({columns}) VALUES ({placeholders});"),
            update: format!("UPDATE {table} SET {assignments} WHERE id = ?{id_slot};"),
            delete: format!("DELETE FROM {table} WHERE id = ?1;"),
        }
    }
}

fn foreign_key_exists_sql(foreign_key: &ForeignKey) -> String {
    format!(
        "SELECT EXISTS(SELECT 1 FROM {} WHERE id = ?1);",
        foreign_key.table
    )
}

/// SQLite-backed repository for one entity type.
pub struct SqliteRepository<'conn, E: Entity> {
    conn: &'conn Connection,
    statements: Statements,
    _entity: PhantomData<E>,
}

impl<'conn, E: Entity> SqliteRepository<'conn, E> {
    /// Creates a repository over a migrated connection.
    ///
    /// # Errors
    /// - `UninitializedConnection` when the schema version is not current.
    /// - `MissingRequiredTable`/`MissingRequiredColumn` when the table does
    ///   not match the entity declaration.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let mut columns = vec!["id"];
        columns.extend_from_slice(E::COLUMNS);
        ensure_connection_ready(conn, E::TABLE, &columns)?;
        Ok(Self {
            conn,
            statements: Statements::for_entity::<E>(),
            _entity: PhantomData,
        })
    }

    pub fn statements(&self) -> &Statements {
        &self.statements
    }

    /// Unique-key probe without collapsing the failure case.
    pub fn probe_unique_key(&self, ctx: &OpContext, key: &Value) -> Existence {
        self.probe(ctx, E::UNIQUE_KEY, &self.statements.exists_by_unique_key, key)
    }

    /// Foreign-key probe without collapsing the failure case.
    pub fn probe_foreign_key(
        &self,
        ctx: &OpContext,
        foreign_key: &ForeignKey,
        value: &Value,
    ) -> Existence {
        self.probe(
            ctx,
            foreign_key.column,
            &foreign_key_exists_sql(foreign_key),
            value,
        )
    }

    fn probe(&self, ctx: &OpContext, check: &str, sql: &str, value: &Value) -> Existence {
        if let Err(reason) = ctx.check() {
            warn!(
                "event=exists_check module=repo status=error entity={} check={} request_id={} error={}",
                E::NAME,
                check,
                ctx.request_id(),
                reason
            );
            return Existence::CheckFailed;
        }

        let result = self
            .conn
            .prepare_cached(sql)
            .and_then(|mut stmt| stmt.query_row([value], |row| row.get::<_, i64>(0)));
        match result {
            Ok(1) => Existence::Found,
            Ok(_) => Existence::Absent,
            Err(err) => {
                warn!(
                    "event=exists_check module=repo status=error entity={} check={} request_id={} error={}",
                    E::NAME,
                    check,
                    ctx.request_id(),
                    err
                );
                Existence::CheckFailed
            }
        }
    }

    fn decode_error(err: rusqlite::Error) -> RepoError {
        RepoError::InvalidData(format!("cannot decode {} row: {err}", E::TABLE))
    }

    /// Maps a failed insert/update into its domain classification.
    fn classify_write_error(&self, ctx: &OpContext, record: &E, err: rusqlite::Error) -> RepoError {
        let Some(violation) = classify_constraint(&err) else {
            return err.into();
        };
        debug!(
            "event=constraint_violation module=repo entity={} request_id={} violation={:?}",
            E::NAME,
            ctx.request_id(),
            violation
        );

        match violation {
            ConstraintViolation::Unique { .. } => {
                let column = violation
                    .unique_column_for(E::TABLE)
                    .unwrap_or(E::UNIQUE_KEY)
                    .to_string();
                let key = column_value(record, &column)
                    .map(|value| display_value(&value))
                    .unwrap_or_default();
                RepoError::AlreadyExists {
                    entity: E::NAME,
                    column,
                    key,
                }
            }
            ConstraintViolation::ForeignKey => self.resolve_missing_reference(ctx, record),
        }
    }

    /// Names the first declared reference whose target row is absent.
    fn resolve_missing_reference(&self, ctx: &OpContext, record: &E) -> RepoError {
        for (foreign_key, value) in foreign_references(record) {
            if self.probe_foreign_key(ctx, foreign_key, &value) == Existence::Absent {
                return RepoError::ForeignKeyMissing {
                    entity: E::NAME,
                    reference: Some(foreign_key.entity),
                    value: Some(display_value(&value)),
                };
            }
        }
        RepoError::ForeignKeyMissing {
            entity: E::NAME,
            reference: None,
            value: None,
        }
    }
}

impl<E: Entity> Repository<E> for SqliteRepository<'_, E> {
    fn find_all(&self, ctx: &OpContext) -> RepoResult<Vec<E>> {
        ctx.check()?;
        let mut stmt = self.conn.prepare_cached(&self.statements.select_all)?;
        let mut rows = stmt.query([])?;
        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            records.push(E::from_row(row).map_err(Self::decode_error)?);
        }
        Ok(records)
    }

    fn find_by_id(&self, ctx: &OpContext, id: RecordId) -> RepoResult<E> {
        ctx.check()?;
        let mut stmt = self.conn.prepare_cached(&self.statements.select_by_id)?;
        match stmt.query_row([id], |row| Ok(E::from_row(row))) {
            Ok(decoded) => decoded.map_err(Self::decode_error),
            Err(rusqlite::Error::QueryReturnedNoRows) => Err(RepoError::NotFound {
                entity: E::NAME,
                id: id.to_string(),
            }),
            Err(err) => Err(err.into()),
        }
    }

    fn exists_by_unique_key(&self, ctx: &OpContext, key: &Value) -> bool {
        self.probe_unique_key(ctx, key).is_found()
    }

    fn exists_foreign_key(
        &self,
        ctx: &OpContext,
        foreign_key: &ForeignKey,
        value: &Value,
    ) -> bool {
        self.probe_foreign_key(ctx, foreign_key, value).is_found()
    }

    fn insert(&self, ctx: &OpContext, record: &E) -> RepoResult<RecordId> {
        ctx.check()?;
        record.validate()?;

        let mut stmt = self.conn.prepare_cached(&self.statements.insert)?;
        let changed = stmt
            .execute(params_from_iter(record.column_values()))
            .map_err(|err| self.classify_write_error(ctx, record, err))?;
        if changed != 1 {
            return Err(RepoError::UnexpectedRowCount {
                entity: E::NAME,
                expected: 1,
                actual: changed,
            });
        }

        Ok(self.conn.last_insert_rowid())
    }

    fn update(&self, ctx: &OpContext, record: &E) -> RepoResult<()> {
        ctx.check()?;
        record.validate()?;

        let mut values = record.column_values();
        values.push(Value::Integer(record.id()));
        let mut stmt = self.conn.prepare_cached(&self.statements.update)?;
        let changed = stmt
            .execute(params_from_iter(values))
            .map_err(|err| self.classify_write_error(ctx, record, err))?;

        match changed {
            0 => Err(RepoError::NotFound {
                entity: E::NAME,
                id: record.id().to_string(),
            }),
            1 => Ok(()),
            actual => Err(RepoError::UnexpectedRowCount {
                entity: E::NAME,
                expected: 1,
                actual,
            }),
        }
    }

    fn delete(&self, ctx: &OpContext, id: RecordId) -> RepoResult<()> {
        ctx.check()?;
        let mut stmt = self.conn.prepare_cached(&self.statements.delete)?;
        let changed = stmt.execute([id])?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: E::NAME,
                id: id.to_string(),
            });
        }
        Ok(())
    }
}

fn column_value<E: Entity>(record: &E, column: &str) -> Option<Value> {
    let position = E::COLUMNS.iter().position(|candidate| *candidate == column)?;
    record.column_values().into_iter().nth(position)
}
