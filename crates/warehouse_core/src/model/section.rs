//! Section domain model.
//!
//! # Invariants
//! - `section_number` is unique across live sections.
//! - `minimum_capacity <= maximum_capacity` and
//!   `current_capacity <= maximum_capacity`.
//! - `minimum_temperature <= current_temperature`.

use crate::model::entity::{Entity, ForeignKey, RecordId};
use crate::model::validation::{require_non_negative, require_ordered, ValidationError};
use rusqlite::types::Value;
use rusqlite::Row;
use serde::{Deserialize, Serialize};

/// Temperature-controlled area of a warehouse holding one product type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    #[serde(default)]
    pub id: RecordId,
    pub section_number: i64,
    pub current_temperature: f64,
    pub minimum_temperature: f64,
    pub current_capacity: i64,
    pub minimum_capacity: i64,
    pub maximum_capacity: i64,
    pub warehouse_id: RecordId,
    pub product_type_id: RecordId,
}

impl Section {
    /// Creates an empty section with capacity bounds `0..=maximum_capacity`.
    pub fn new(
        section_number: i64,
        maximum_capacity: i64,
        warehouse_id: RecordId,
        product_type_id: RecordId,
    ) -> Self {
        Self {
            id: 0,
            section_number,
            current_temperature: 0.0,
            minimum_temperature: 0.0,
            current_capacity: 0,
            minimum_capacity: 0,
            maximum_capacity,
            warehouse_id,
            product_type_id,
        }
    }
}

impl Entity for Section {
    const NAME: &'static str = "section";
    const TABLE: &'static str = "sections";
    const COLUMNS: &'static [&'static str] = &[
        "section_number",
        "current_temperature",
        "minimum_temperature",
        "current_capacity",
        "minimum_capacity",
        "maximum_capacity",
        "warehouse_id",
        "product_type_id",
    ];
    const UNIQUE_KEY: &'static str = "section_number";
    const FOREIGN_KEYS: &'static [ForeignKey] = &[
        ForeignKey {
            column: "warehouse_id",
            table: "warehouses",
            entity: "warehouse",
        },
        ForeignKey {
            column: "product_type_id",
            table: "product_types",
            entity: "product_type",
        },
    ];

    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn unique_key(&self) -> Value {
        Value::Integer(self.section_number)
    }

    fn foreign_key_values(&self) -> Vec<Value> {
        vec![
            Value::Integer(self.warehouse_id),
            Value::Integer(self.product_type_id),
        ]
    }

    fn column_values(&self) -> Vec<Value> {
        vec![
            Value::Integer(self.section_number),
            Value::Real(self.current_temperature),
            Value::Real(self.minimum_temperature),
            Value::Integer(self.current_capacity),
            Value::Integer(self.minimum_capacity),
            Value::Integer(self.maximum_capacity),
            Value::Integer(self.warehouse_id),
            Value::Integer(self.product_type_id),
        ]
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            section_number: row.get("section_number")?,
            current_temperature: row.get("current_temperature")?,
            minimum_temperature: row.get("minimum_temperature")?,
            current_capacity: row.get("current_capacity")?,
            minimum_capacity: row.get("minimum_capacity")?,
            maximum_capacity: row.get("maximum_capacity")?,
            warehouse_id: row.get("warehouse_id")?,
            product_type_id: row.get("product_type_id")?,
        })
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_non_negative(Self::NAME, "section_number", self.section_number)?;
        require_non_negative(Self::NAME, "current_capacity", self.current_capacity)?;
        require_non_negative(Self::NAME, "minimum_capacity", self.minimum_capacity)?;
        require_ordered(
            Self::NAME,
            ("minimum_capacity", self.minimum_capacity),
            ("maximum_capacity", self.maximum_capacity),
        )?;
        require_ordered(
            Self::NAME,
            ("current_capacity", self.current_capacity),
            ("maximum_capacity", self.maximum_capacity),
        )?;
        require_ordered(
            Self::NAME,
            ("minimum_temperature", self.minimum_temperature),
            ("current_temperature", self.current_temperature),
        )
    }
}
