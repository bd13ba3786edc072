//! Warehouse, buyer and product type reference models.
//!
//! These records are mostly targets of foreign references from inventory
//! entities, but they go through the same generic CRUD protocol.

use crate::model::entity::{Entity, ForeignKey, RecordId};
use crate::model::validation::{require_non_negative, require_text, ValidationError};
use rusqlite::types::Value;
use rusqlite::Row;
use serde::{Deserialize, Serialize};

/// Physical storage site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Warehouse {
    #[serde(default)]
    pub id: RecordId,
    pub warehouse_code: String,
    pub address: String,
    pub telephone: String,
    pub minimum_capacity: i64,
    pub minimum_temperature: f64,
    pub locality_id: String,
}

impl Warehouse {
    pub fn new(
        warehouse_code: impl Into<String>,
        address: impl Into<String>,
        telephone: impl Into<String>,
        locality_id: impl Into<String>,
    ) -> Self {
        Self {
            id: 0,
            warehouse_code: warehouse_code.into(),
            address: address.into(),
            telephone: telephone.into(),
            minimum_capacity: 0,
            minimum_temperature: 0.0,
            locality_id: locality_id.into(),
        }
    }
}

impl Entity for Warehouse {
    const NAME: &'static str = "warehouse";
    const TABLE: &'static str = "warehouses";
    const COLUMNS: &'static [&'static str] = &[
        "warehouse_code",
        "address",
        "telephone",
        "minimum_capacity",
        "minimum_temperature",
        "locality_id",
    ];
    const UNIQUE_KEY: &'static str = "warehouse_code";
    const FOREIGN_KEYS: &'static [ForeignKey] = &[ForeignKey {
        column: "locality_id",
        table: "localities",
        entity: "locality",
    }];

    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn unique_key(&self) -> Value {
        Value::Text(self.warehouse_code.clone())
    }

    fn foreign_key_values(&self) -> Vec<Value> {
        vec![Value::Text(self.locality_id.clone())]
    }

    fn column_values(&self) -> Vec<Value> {
        vec![
            Value::Text(self.warehouse_code.clone()),
            Value::Text(self.address.clone()),
            Value::Text(self.telephone.clone()),
            Value::Integer(self.minimum_capacity),
            Value::Real(self.minimum_temperature),
            Value::Text(self.locality_id.clone()),
        ]
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            warehouse_code: row.get("warehouse_code")?,
            address: row.get("address")?,
            telephone: row.get("telephone")?,
            minimum_capacity: row.get("minimum_capacity")?,
            minimum_temperature: row.get("minimum_temperature")?,
            locality_id: row.get("locality_id")?,
        })
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_text(Self::NAME, "warehouse_code", &self.warehouse_code)?;
        require_text(Self::NAME, "address", &self.address)?;
        require_non_negative(Self::NAME, "minimum_capacity", self.minimum_capacity)
    }
}

/// Customer placing purchase orders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Buyer {
    #[serde(default)]
    pub id: RecordId,
    pub card_number_id: String,
    pub first_name: String,
    pub last_name: String,
}

impl Buyer {
    pub fn new(
        card_number_id: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            id: 0,
            card_number_id: card_number_id.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }
}

impl Entity for Buyer {
    const NAME: &'static str = "buyer";
    const TABLE: &'static str = "buyers";
    const COLUMNS: &'static [&'static str] = &["card_number_id", "first_name", "last_name"];
    const UNIQUE_KEY: &'static str = "card_number_id";

    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn unique_key(&self) -> Value {
        Value::Text(self.card_number_id.clone())
    }

    fn column_values(&self) -> Vec<Value> {
        vec![
            Value::Text(self.card_number_id.clone()),
            Value::Text(self.first_name.clone()),
            Value::Text(self.last_name.clone()),
        ]
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            card_number_id: row.get("card_number_id")?,
            first_name: row.get("first_name")?,
            last_name: row.get("last_name")?,
        })
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_text(Self::NAME, "card_number_id", &self.card_number_id)?;
        require_text(Self::NAME, "first_name", &self.first_name)?;
        require_text(Self::NAME, "last_name", &self.last_name)
    }
}

/// Product category (frozen, fresh, ...). Sections and products point at it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductType {
    #[serde(default)]
    pub id: RecordId,
    pub description: String,
}

impl ProductType {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            id: 0,
            description: description.into(),
        }
    }
}

impl Entity for ProductType {
    const NAME: &'static str = "product_type";
    const TABLE: &'static str = "product_types";
    const COLUMNS: &'static [&'static str] = &["description"];
    const UNIQUE_KEY: &'static str = "description";

    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn unique_key(&self) -> Value {
        Value::Text(self.description.clone())
    }

    fn column_values(&self) -> Vec<Value> {
        vec![Value::Text(self.description.clone())]
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            description: row.get("description")?,
        })
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_text(Self::NAME, "description", &self.description)
    }
}
