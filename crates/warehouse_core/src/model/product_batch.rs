//! Product batch domain model.
//!
//! # Invariants
//! - `batch_number` is unique across live batches.
//! - `current_quantity <= initial_quantity`, both non-negative.
//! - `minimum_temperature <= current_temperature`.
//! - `manufacturing_date` and `due_date` are `YYYY-MM-DD` days, due not
//!   earlier than manufacturing.

use crate::model::entity::{Entity, ForeignKey, RecordId};
use crate::model::validation::{
    require_date, require_in_range, require_non_negative, require_ordered, ValidationError,
};
use rusqlite::types::Value;
use rusqlite::Row;
use serde::{Deserialize, Serialize};

/// Stock lot of one product stored in one section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductBatch {
    #[serde(default)]
    pub id: RecordId,
    pub batch_number: i64,
    pub current_quantity: i64,
    pub current_temperature: f64,
    pub due_date: String,
    pub initial_quantity: i64,
    pub manufacturing_date: String,
    /// Hour of day, `0..=23`.
    pub manufacturing_hour: i64,
    pub minimum_temperature: f64,
    pub product_id: RecordId,
    pub section_id: RecordId,
}

impl ProductBatch {
    /// Creates a full batch (`current_quantity == initial_quantity`).
    pub fn new(
        batch_number: i64,
        quantity: i64,
        manufacturing_date: impl Into<String>,
        due_date: impl Into<String>,
        product_id: RecordId,
        section_id: RecordId,
    ) -> Self {
        Self {
            id: 0,
            batch_number,
            current_quantity: quantity,
            current_temperature: 0.0,
            due_date: due_date.into(),
            initial_quantity: quantity,
            manufacturing_date: manufacturing_date.into(),
            manufacturing_hour: 0,
            minimum_temperature: 0.0,
            product_id,
            section_id,
        }
    }
}

impl Entity for ProductBatch {
    const NAME: &'static str = "product_batch";
    const TABLE: &'static str = "product_batches";
    const COLUMNS: &'static [&'static str] = &[
        "batch_number",
        "current_quantity",
        "current_temperature",
        "due_date",
        "initial_quantity",
        "manufacturing_date",
        "manufacturing_hour",
        "minimum_temperature",
        "product_id",
        "section_id",
    ];
    const UNIQUE_KEY: &'static str = "batch_number";
    const FOREIGN_KEYS: &'static [ForeignKey] = &[
        ForeignKey {
            column: "product_id",
            table: "products",
            entity: "product",
        },
        ForeignKey {
            column: "section_id",
            table: "sections",
            entity: "section",
        },
    ];

    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn unique_key(&self) -> Value {
        Value::Integer(self.batch_number)
    }

    fn foreign_key_values(&self) -> Vec<Value> {
        vec![
            Value::Integer(self.product_id),
            Value::Integer(self.section_id),
        ]
    }

    fn column_values(&self) -> Vec<Value> {
        vec![
            Value::Integer(self.batch_number),
            Value::Integer(self.current_quantity),
            Value::Real(self.current_temperature),
            Value::Text(self.due_date.clone()),
            Value::Integer(self.initial_quantity),
            Value::Text(self.manufacturing_date.clone()),
            Value::Integer(self.manufacturing_hour),
            Value::Real(self.minimum_temperature),
            Value::Integer(self.product_id),
            Value::Integer(self.section_id),
        ]
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            batch_number: row.get("batch_number")?,
            current_quantity: row.get("current_quantity")?,
            current_temperature: row.get("current_temperature")?,
            due_date: row.get("due_date")?,
            initial_quantity: row.get("initial_quantity")?,
            manufacturing_date: row.get("manufacturing_date")?,
            manufacturing_hour: row.get("manufacturing_hour")?,
            minimum_temperature: row.get("minimum_temperature")?,
            product_id: row.get("product_id")?,
            section_id: row.get("section_id")?,
        })
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_non_negative(Self::NAME, "current_quantity", self.current_quantity)?;
        require_ordered(
            Self::NAME,
            ("current_quantity", self.current_quantity),
            ("initial_quantity", self.initial_quantity),
        )?;
        require_ordered(
            Self::NAME,
            ("minimum_temperature", self.minimum_temperature),
            ("current_temperature", self.current_temperature),
        )?;
        require_in_range(
            Self::NAME,
            "manufacturing_hour",
            self.manufacturing_hour,
            0..=23,
        )?;
        require_date(Self::NAME, "manufacturing_date", &self.manufacturing_date)?;
        require_date(Self::NAME, "due_date", &self.due_date)?;
        // ISO days compare correctly as strings once both are well-formed.
        require_ordered(
            Self::NAME,
            ("manufacturing_date", self.manufacturing_date.as_str()),
            ("due_date", self.due_date.as_str()),
        )
    }
}
