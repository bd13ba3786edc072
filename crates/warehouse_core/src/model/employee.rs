//! Employee domain model.
//!
//! # Invariants
//! - `card_number_id` is unique across live employees.
//! - `warehouse_id` must reference an existing warehouse.

use crate::model::entity::{Entity, ForeignKey, RecordId};
use crate::model::validation::{require_text, ValidationError};
use rusqlite::types::Value;
use rusqlite::Row;
use serde::{Deserialize, Serialize};

/// Warehouse staff member; receives inbound orders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    #[serde(default)]
    pub id: RecordId,
    pub card_number_id: String,
    pub first_name: String,
    pub last_name: String,
    pub warehouse_id: RecordId,
}

impl Employee {
    pub fn new(
        card_number_id: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        warehouse_id: RecordId,
    ) -> Self {
        Self {
            id: 0,
            card_number_id: card_number_id.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            warehouse_id,
        }
    }
}

impl Entity for Employee {
    const NAME: &'static str = "employee";
    const TABLE: &'static str = "employees";
    const COLUMNS: &'static [&'static str] =
        &["card_number_id", "first_name", "last_name", "warehouse_id"];
    const UNIQUE_KEY: &'static str = "card_number_id";
    const FOREIGN_KEYS: &'static [ForeignKey] = &[ForeignKey {
        column: "warehouse_id",
        table: "warehouses",
        entity: "warehouse",
    }];

    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn unique_key(&self) -> Value {
        Value::Text(self.card_number_id.clone())
    }

    fn foreign_key_values(&self) -> Vec<Value> {
        vec![Value::Integer(self.warehouse_id)]
    }

    fn column_values(&self) -> Vec<Value> {
        vec![
            Value::Text(self.card_number_id.clone()),
            Value::Text(self.first_name.clone()),
            Value::Text(self.last_name.clone()),
            Value::Integer(self.warehouse_id),
        ]
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            card_number_id: row.get("card_number_id")?,
            first_name: row.get("first_name")?,
            last_name: row.get("last_name")?,
            warehouse_id: row.get("warehouse_id")?,
        })
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_text(Self::NAME, "card_number_id", &self.card_number_id)?;
        require_text(Self::NAME, "first_name", &self.first_name)?;
        require_text(Self::NAME, "last_name", &self.last_name)
    }
}
