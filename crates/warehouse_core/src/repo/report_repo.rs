//! Aggregate report queries.
//!
//! # Responsibility
//! - Count child rows per parent row (carriers per locality, orders per
//!   employee, ...).
//!
//! # Invariants
//! - Reports `LEFT JOIN` from the parent table, so every parent appears,
//!   including those with a zero count.
//! - A filtered report on an absent parent yields `NotFound`, never an empty
//!   list.

use crate::context::OpContext;
use crate::model::entity::RecordId;
use crate::model::report::{
    BuyerPurchaseOrders, EmployeeInboundOrders, LocalityCount, SectionProducts,
};
use crate::repo::entity_repo::{RepoError, RepoResult};
use crate::repo::readiness::ensure_connection_ready;
use rusqlite::types::ToSql;
use rusqlite::{Connection, Row};

const CARRIERS_PER_LOCALITY_SQL: &str = "SELECT l.id, l.locality_name, COUNT(c.id)
FROM localities l
LEFT JOIN carriers c ON c.locality_id = l.id
WHERE (?1 IS NULL OR l.id = ?1)
GROUP BY l.id, l.locality_name
ORDER BY l.id ASC;";

const SELLERS_PER_LOCALITY_SQL: &str = "SELECT l.id, l.locality_name, COUNT(s.id)
FROM localities l
LEFT JOIN sellers s ON s.locality_id = l.id
WHERE (?1 IS NULL OR l.id = ?1)
GROUP BY l.id, l.locality_name
ORDER BY l.id ASC;";

const INBOUND_ORDERS_PER_EMPLOYEE_SQL: &str = "SELECT
    e.id,
    e.card_number_id,
    e.first_name,
    e.last_name,
    e.warehouse_id,
    COUNT(io.id)
FROM employees e
LEFT JOIN inbound_orders io ON io.employee_id = e.id
WHERE (?1 IS NULL OR e.id = ?1)
GROUP BY e.id
ORDER BY e.id ASC;";

const PRODUCTS_PER_SECTION_SQL: &str = "SELECT
    s.id,
    s.section_number,
    COALESCE(SUM(pb.current_quantity), 0)
FROM sections s
LEFT JOIN product_batches pb ON pb.section_id = s.id
WHERE (?1 IS NULL OR s.id = ?1)
GROUP BY s.id
ORDER BY s.id ASC;";

const PURCHASE_ORDERS_PER_BUYER_SQL: &str = "SELECT
    b.id,
    b.card_number_id,
    b.first_name,
    b.last_name,
    COUNT(po.id)
FROM buyers b
LEFT JOIN purchase_orders po ON po.buyer_id = b.id
WHERE (?1 IS NULL OR b.id = ?1)
GROUP BY b.id
ORDER BY b.id ASC;";

/// Read-only report contract.
///
/// `None` reports every parent row; `Some(id)` reports exactly one row or
/// fails with `NotFound`.
pub trait ReportRepository {
    fn carriers_per_locality(
        &self,
        ctx: &OpContext,
        locality_id: Option<&str>,
    ) -> RepoResult<Vec<LocalityCount>>;
    fn sellers_per_locality(
        &self,
        ctx: &OpContext,
        locality_id: Option<&str>,
    ) -> RepoResult<Vec<LocalityCount>>;
    fn inbound_orders_per_employee(
        &self,
        ctx: &OpContext,
        employee_id: Option<RecordId>,
    ) -> RepoResult<Vec<EmployeeInboundOrders>>;
    fn products_per_section(
        &self,
        ctx: &OpContext,
        section_id: Option<RecordId>,
    ) -> RepoResult<Vec<SectionProducts>>;
    fn purchase_orders_per_buyer(
        &self,
        ctx: &OpContext,
        buyer_id: Option<RecordId>,
    ) -> RepoResult<Vec<BuyerPurchaseOrders>>;
}

/// SQLite-backed report repository.
pub struct SqliteReportRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteReportRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        for (table, columns) in [
            ("localities", &["id", "locality_name"][..]),
            ("carriers", &["id", "locality_id"][..]),
            ("sellers", &["id", "locality_id"][..]),
            ("employees", &["id", "card_number_id", "warehouse_id"][..]),
            ("inbound_orders", &["id", "employee_id"][..]),
            ("sections", &["id", "section_number"][..]),
            ("product_batches", &["id", "current_quantity", "section_id"][..]),
            ("buyers", &["id", "card_number_id"][..]),
            ("purchase_orders", &["id", "buyer_id"][..]),
        ] {
            ensure_connection_ready(conn, table, columns)?;
        }
        Ok(Self { conn })
    }

    fn run<T, F>(
        &self,
        ctx: &OpContext,
        sql: &str,
        parent: (&'static str, Option<String>),
        filter: &dyn ToSql,
        parse: F,
    ) -> RepoResult<Vec<T>>
    where
        F: Fn(&Row<'_>) -> rusqlite::Result<T>,
    {
        ctx.check()?;
        let mut stmt = self.conn.prepare_cached(sql)?;
        let mut rows = stmt.query([filter])?;
        let mut report = Vec::new();
        while let Some(row) = rows.next()? {
            report.push(parse(row).map_err(|err| {
                RepoError::InvalidData(format!("cannot decode {} report row: {err}", parent.0))
            })?);
        }

        if let (true, Some(id)) = (report.is_empty(), parent.1) {
            return Err(RepoError::NotFound {
                entity: parent.0,
                id,
            });
        }
        Ok(report)
    }
}

impl ReportRepository for SqliteReportRepository<'_> {
    fn carriers_per_locality(
        &self,
        ctx: &OpContext,
        locality_id: Option<&str>,
    ) -> RepoResult<Vec<LocalityCount>> {
        self.run(
            ctx,
            CARRIERS_PER_LOCALITY_SQL,
            ("locality", locality_id.map(str::to_string)),
            &locality_id,
            parse_locality_count,
        )
    }

    fn sellers_per_locality(
        &self,
        ctx: &OpContext,
        locality_id: Option<&str>,
    ) -> RepoResult<Vec<LocalityCount>> {
        self.run(
            ctx,
            SELLERS_PER_LOCALITY_SQL,
            ("locality", locality_id.map(str::to_string)),
            &locality_id,
            parse_locality_count,
        )
    }

    fn inbound_orders_per_employee(
        &self,
        ctx: &OpContext,
        employee_id: Option<RecordId>,
    ) -> RepoResult<Vec<EmployeeInboundOrders>> {
        self.run(
            ctx,
            INBOUND_ORDERS_PER_EMPLOYEE_SQL,
            ("employee", employee_id.map(|id| id.to_string())),
            &employee_id,
            |row| {
                Ok(EmployeeInboundOrders {
                    id: row.get(0)?,
                    card_number_id: row.get(1)?,
                    first_name: row.get(2)?,
                    last_name: row.get(3)?,
                    warehouse_id: row.get(4)?,
                    inbound_orders_count: row.get(5)?,
                })
            },
        )
    }

    fn products_per_section(
        &self,
        ctx: &OpContext,
        section_id: Option<RecordId>,
    ) -> RepoResult<Vec<SectionProducts>> {
        self.run(
            ctx,
            PRODUCTS_PER_SECTION_SQL,
            ("section", section_id.map(|id| id.to_string())),
            &section_id,
            |row| {
                Ok(SectionProducts {
                    section_id: row.get(0)?,
                    section_number: row.get(1)?,
                    products_count: row.get(2)?,
                })
            },
        )
    }

    fn purchase_orders_per_buyer(
        &self,
        ctx: &OpContext,
        buyer_id: Option<RecordId>,
    ) -> RepoResult<Vec<BuyerPurchaseOrders>> {
        self.run(
            ctx,
            PURCHASE_ORDERS_PER_BUYER_SQL,
            ("buyer", buyer_id.map(|id| id.to_string())),
            &buyer_id,
            |row| {
                Ok(BuyerPurchaseOrders {
                    id: row.get(0)?,
                    card_number_id: row.get(1)?,
                    first_name: row.get(2)?,
                    last_name: row.get(3)?,
                    purchase_orders_count: row.get(4)?,
                })
            },
        )
    }
}

fn parse_locality_count(row: &Row<'_>) -> rusqlite::Result<LocalityCount> {
    Ok(LocalityCount {
        locality_id: row.get(0)?,
        locality_name: row.get(1)?,
        count: row.get(2)?,
    })
}
