//! Locality repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist text-keyed localities referenced by carriers, sellers and
//!   warehouses.
//!
//! # Invariants
//! - `insert` validates before writing; a duplicate id is `AlreadyExists`.
//! - `exists` follows the same fail-closed policy as entity probes.

use crate::context::OpContext;
use crate::model::locality::Locality;
use crate::repo::constraint::classify_constraint;
use crate::repo::entity_repo::{RepoError, RepoResult};
use crate::repo::readiness::ensure_connection_ready;
use log::warn;
use rusqlite::{params, Connection, Row};

const LOCALITY_COLUMNS: &[&str] = &["id", "locality_name", "province_name", "country_name"];

const SELECT_ALL_SQL: &str = "SELECT id, locality_name, province_name, country_name
FROM localities
ORDER BY id ASC;";
const SELECT_BY_ID_SQL: &str = "SELECT id, locality_name, province_name, country_name
FROM localities
WHERE id = ?1;";
const EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM localities WHERE id = ?1);";
const INSERT_SQL: &str = "INSERT INTO localities (id, locality_name, province_name, country_name)
VALUES (?1, ?2, ?3, ?4);";

/// Repository contract for locality reference data.
pub trait LocalityRepository {
    fn find_all(&self, ctx: &OpContext) -> RepoResult<Vec<Locality>>;
    /// `NotFound` when no locality carries `id`.
    fn find_by_id(&self, ctx: &OpContext, id: &str) -> RepoResult<Locality>;
    /// `true` iff a locality carries `id`. Probe failures read as `false`.
    fn exists(&self, ctx: &OpContext, id: &str) -> bool;
    fn insert(&self, ctx: &OpContext, locality: &Locality) -> RepoResult<()>;
}

/// SQLite-backed locality repository.
pub struct SqliteLocalityRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteLocalityRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, "localities", LOCALITY_COLUMNS)?;
        Ok(Self { conn })
    }
}

impl LocalityRepository for SqliteLocalityRepository<'_> {
    fn find_all(&self, ctx: &OpContext) -> RepoResult<Vec<Locality>> {
        ctx.check()?;
        let mut stmt = self.conn.prepare_cached(SELECT_ALL_SQL)?;
        let mut rows = stmt.query([])?;
        let mut localities = Vec::new();
        while let Some(row) = rows.next()? {
            localities.push(parse_locality_row(row).map_err(decode_error)?);
        }
        Ok(localities)
    }

    fn find_by_id(&self, ctx: &OpContext, id: &str) -> RepoResult<Locality> {
        ctx.check()?;
        let mut stmt = self.conn.prepare_cached(SELECT_BY_ID_SQL)?;
        match stmt.query_row([id], |row| Ok(parse_locality_row(row))) {
            Ok(decoded) => decoded.map_err(decode_error),
            Err(rusqlite::Error::QueryReturnedNoRows) => Err(RepoError::NotFound {
                entity: "locality",
                id: id.to_string(),
            }),
            Err(err) => Err(err.into()),
        }
    }

    fn exists(&self, ctx: &OpContext, id: &str) -> bool {
        let result = ctx.check().map_err(RepoError::from).and_then(|()| {
            let mut stmt = self.conn.prepare_cached(EXISTS_SQL)?;
            let exists: i64 = stmt.query_row([id], |row| row.get(0))?;
            Ok(exists == 1)
        });
        match result {
            Ok(found) => found,
            Err(err) => {
                warn!(
                    "event=exists_check module=repo status=error entity=locality check=id request_id={} error={}",
                    ctx.request_id(),
                    err
                );
                false
            }
        }
    }

    fn insert(&self, ctx: &OpContext, locality: &Locality) -> RepoResult<()> {
        ctx.check()?;
        locality.validate()?;

        let mut stmt = self.conn.prepare_cached(INSERT_SQL)?;
        let changed = stmt
            .execute(params![
                locality.id.as_str(),
                locality.locality_name.as_str(),
                locality.province_name.as_str(),
                locality.country_name.as_str(),
            ])
            .map_err(|err| match classify_constraint(&err) {
                Some(_) => RepoError::AlreadyExists {
                    entity: "locality",
                    column: "id".to_string(),
                    key: locality.id.clone(),
                },
                None => err.into(),
            })?;

        if changed != 1 {
            return Err(RepoError::UnexpectedRowCount {
                entity: "locality",
                expected: 1,
                actual: changed,
            });
        }
        Ok(())
    }
}

fn parse_locality_row(row: &Row<'_>) -> rusqlite::Result<Locality> {
    Ok(Locality {
        id: row.get("id")?,
        locality_name: row.get("locality_name")?,
        province_name: row.get("province_name")?,
        country_name: row.get("country_name")?,
    })
}

fn decode_error(err: rusqlite::Error) -> RepoError {
    RepoError::InvalidData(format!("cannot decode localities row: {err}"))
}
