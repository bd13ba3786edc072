//! Inbound and purchase order models.
//!
//! # Responsibility
//! - Inbound orders record stock received by an employee into a warehouse.
//! - Purchase orders record buyer orders shipped by a carrier.
//!
//! # Invariants
//! - `order_number` is unique per order table.
//! - Inbound orders reference three tables; a missing reference is reported
//!   per referenced entity (employee, product batch, warehouse).

use crate::model::entity::{Entity, ForeignKey, MissingRecordPolicy, RecordId};
use crate::model::validation::{require_date, require_text, ValidationError};
use rusqlite::types::Value;
use rusqlite::Row;
use serde::{Deserialize, Serialize};

/// Stock receipt for one product batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundOrder {
    #[serde(default)]
    pub id: RecordId,
    pub order_number: String,
    pub order_date: String,
    pub employee_id: RecordId,
    pub product_batch_id: RecordId,
    pub warehouse_id: RecordId,
}

impl InboundOrder {
    pub fn new(
        order_number: impl Into<String>,
        order_date: impl Into<String>,
        employee_id: RecordId,
        product_batch_id: RecordId,
        warehouse_id: RecordId,
    ) -> Self {
        Self {
            id: 0,
            order_number: order_number.into(),
            order_date: order_date.into(),
            employee_id,
            product_batch_id,
            warehouse_id,
        }
    }
}

impl Entity for InboundOrder {
    const NAME: &'static str = "inbound_order";
    const TABLE: &'static str = "inbound_orders";
    const COLUMNS: &'static [&'static str] = &[
        "order_number",
        "order_date",
        "employee_id",
        "product_batch_id",
        "warehouse_id",
    ];
    const UNIQUE_KEY: &'static str = "order_number";
    const FOREIGN_KEYS: &'static [ForeignKey] = &[
        ForeignKey {
            column: "employee_id",
            table: "employees",
            entity: "employee",
        },
        ForeignKey {
            column: "product_batch_id",
            table: "product_batches",
            entity: "product_batch",
        },
        ForeignKey {
            column: "warehouse_id",
            table: "warehouses",
            entity: "warehouse",
        },
    ];
    // `get` on a missing id reports `Invalid`, not `NotFound`.
    const MISSING_ON_GET: MissingRecordPolicy = MissingRecordPolicy::Invalid;

    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn unique_key(&self) -> Value {
        Value::Text(self.order_number.clone())
    }

    fn foreign_key_values(&self) -> Vec<Value> {
        vec![
            Value::Integer(self.employee_id),
            Value::Integer(self.product_batch_id),
            Value::Integer(self.warehouse_id),
        ]
    }

    fn column_values(&self) -> Vec<Value> {
        vec![
            Value::Text(self.order_number.clone()),
            Value::Text(self.order_date.clone()),
            Value::Integer(self.employee_id),
            Value::Integer(self.product_batch_id),
            Value::Integer(self.warehouse_id),
        ]
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            order_number: row.get("order_number")?,
            order_date: row.get("order_date")?,
            employee_id: row.get("employee_id")?,
            product_batch_id: row.get("product_batch_id")?,
            warehouse_id: row.get("warehouse_id")?,
        })
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_text(Self::NAME, "order_number", &self.order_number)?;
        require_date(Self::NAME, "order_date", &self.order_date)
    }
}

/// Buyer order shipped through one carrier from one warehouse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseOrder {
    #[serde(default)]
    pub id: RecordId,
    pub order_number: String,
    pub order_date: String,
    pub tracking_code: String,
    pub buyer_id: RecordId,
    pub carrier_id: RecordId,
    pub warehouse_id: RecordId,
}

impl PurchaseOrder {
    pub fn new(
        order_number: impl Into<String>,
        order_date: impl Into<String>,
        tracking_code: impl Into<String>,
        buyer_id: RecordId,
        carrier_id: RecordId,
        warehouse_id: RecordId,
    ) -> Self {
        Self {
            id: 0,
            order_number: order_number.into(),
            order_date: order_date.into(),
            tracking_code: tracking_code.into(),
            buyer_id,
            carrier_id,
            warehouse_id,
        }
    }
}

impl Entity for PurchaseOrder {
    const NAME: &'static str = "purchase_order";
    const TABLE: &'static str = "purchase_orders";
    const COLUMNS: &'static [&'static str] = &[
        "order_number",
        "order_date",
        "tracking_code",
        "buyer_id",
        "carrier_id",
        "warehouse_id",
    ];
    const UNIQUE_KEY: &'static str = "order_number";
    const FOREIGN_KEYS: &'static [ForeignKey] = &[
        ForeignKey {
            column: "buyer_id",
            table: "buyers",
            entity: "buyer",
        },
        ForeignKey {
            column: "carrier_id",
            table: "carriers",
            entity: "carrier",
        },
        ForeignKey {
            column: "warehouse_id",
            table: "warehouses",
            entity: "warehouse",
        },
    ];

    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn unique_key(&self) -> Value {
        Value::Text(self.order_number.clone())
    }

    fn foreign_key_values(&self) -> Vec<Value> {
        vec![
            Value::Integer(self.buyer_id),
            Value::Integer(self.carrier_id),
            Value::Integer(self.warehouse_id),
        ]
    }

    fn column_values(&self) -> Vec<Value> {
        vec![
            Value::Text(self.order_number.clone()),
            Value::Text(self.order_date.clone()),
            Value::Text(self.tracking_code.clone()),
            Value::Integer(self.buyer_id),
            Value::Integer(self.carrier_id),
            Value::Integer(self.warehouse_id),
        ]
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            order_number: row.get("order_number")?,
            order_date: row.get("order_date")?,
            tracking_code: row.get("tracking_code")?,
            buyer_id: row.get("buyer_id")?,
            carrier_id: row.get("carrier_id")?,
            warehouse_id: row.get("warehouse_id")?,
        })
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_text(Self::NAME, "order_number", &self.order_number)?;
        require_text(Self::NAME, "tracking_code", &self.tracking_code)?;
        require_date(Self::NAME, "order_date", &self.order_date)
    }
}
