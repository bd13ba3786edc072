//! Product domain model.

use crate::model::entity::{Entity, ForeignKey, RecordId};
use crate::model::validation::{require_text, ValidationError};
use rusqlite::types::Value;
use rusqlite::Row;
use serde::{Deserialize, Serialize};

/// Catalogue product sold by one seller.
///
/// Dimensions and rates are stored as reals; only `product_code` is unique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(default)]
    pub id: RecordId,
    pub product_code: String,
    pub description: String,
    pub width: f64,
    pub height: f64,
    pub length: f64,
    pub net_weight: f64,
    pub expiration_rate: f64,
    pub recommended_freezing_temperature: f64,
    pub freezing_rate: f64,
    pub product_type_id: RecordId,
    pub seller_id: RecordId,
}

impl Product {
    pub fn new(
        product_code: impl Into<String>,
        description: impl Into<String>,
        product_type_id: RecordId,
        seller_id: RecordId,
    ) -> Self {
        Self {
            id: 0,
            product_code: product_code.into(),
            description: description.into(),
            width: 0.0,
            height: 0.0,
            length: 0.0,
            net_weight: 0.0,
            expiration_rate: 0.0,
            recommended_freezing_temperature: 0.0,
            freezing_rate: 0.0,
            product_type_id,
            seller_id,
        }
    }
}

impl Entity for Product {
    const NAME: &'static str = "product";
    const TABLE: &'static str = "products";
    const COLUMNS: &'static [&'static str] = &[
        "product_code",
        "description",
        "width",
        "height",
        "length",
        "net_weight",
        "expiration_rate",
        "recommended_freezing_temperature",
        "freezing_rate",
        "product_type_id",
        "seller_id",
    ];
    const UNIQUE_KEY: &'static str = "product_code";
    const FOREIGN_KEYS: &'static [ForeignKey] = &[
        ForeignKey {
            column: "product_type_id",
            table: "product_types",
            entity: "product_type",
        },
        ForeignKey {
            column: "seller_id",
            table: "sellers",
            entity: "seller",
        },
    ];

    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn unique_key(&self) -> Value {
        Value::Text(self.product_code.clone())
    }

    fn foreign_key_values(&self) -> Vec<Value> {
        vec![
            Value::Integer(self.product_type_id),
            Value::Integer(self.seller_id),
        ]
    }

    fn column_values(&self) -> Vec<Value> {
        vec![
            Value::Text(self.product_code.clone()),
            Value::Text(self.description.clone()),
            Value::Real(self.width),
            Value::Real(self.height),
            Value::Real(self.length),
            Value::Real(self.net_weight),
            Value::Real(self.expiration_rate),
            Value::Real(self.recommended_freezing_temperature),
            Value::Real(self.freezing_rate),
            Value::Integer(self.product_type_id),
            Value::Integer(self.seller_id),
        ]
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            product_code: row.get("product_code")?,
            description: row.get("description")?,
            width: row.get("width")?,
            height: row.get("height")?,
            length: row.get("length")?,
            net_weight: row.get("net_weight")?,
            expiration_rate: row.get("expiration_rate")?,
            recommended_freezing_temperature: row.get("recommended_freezing_temperature")?,
            freezing_rate: row.get("freezing_rate")?,
            product_type_id: row.get("product_type_id")?,
            seller_id: row.get("seller_id")?,
        })
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_text(Self::NAME, "product_code", &self.product_code)?;
        require_text(Self::NAME, "description", &self.description)
    }
}
