//! Carrier domain model.
//!
//! # Responsibility
//! - Define the transport company record used by purchase orders.
//! - Declare its persisted shape for the generic repository.
//!
//! # Invariants
//! - `cid` is unique across live carriers.
//! - `locality_id` must reference an existing locality.

use crate::model::entity::{Entity, ForeignKey, RecordId};
use crate::model::validation::{require_text, ValidationError};
use rusqlite::types::Value;
use rusqlite::Row;
use serde::{Deserialize, Serialize};

/// Transport company registered in one locality.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Carrier {
    /// Storage-assigned id; `0` before creation.
    #[serde(default)]
    pub id: RecordId,
    /// Business carrier code, e.g. `ABC34`.
    pub cid: String,
    pub company_name: String,
    pub address: String,
    pub telephone: String,
    /// Text id of the locality the carrier operates from.
    pub locality_id: String,
}

impl Carrier {
    /// Creates a not-yet-persisted carrier.
    pub fn new(
        cid: impl Into<String>,
        company_name: impl Into<String>,
        address: impl Into<String>,
        telephone: impl Into<String>,
        locality_id: impl Into<String>,
    ) -> Self {
        Self {
            id: 0,
            cid: cid.into(),
            company_name: company_name.into(),
            address: address.into(),
            telephone: telephone.into(),
            locality_id: locality_id.into(),
        }
    }
}

impl Entity for Carrier {
    const NAME: &'static str = "carrier";
    const TABLE: &'static str = "carriers";
    const COLUMNS: &'static [&'static str] = &[
        "cid",
        "company_name",
        "address",
        "telephone",
        "locality_id",
    ];
    const UNIQUE_KEY: &'static str = "cid";
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
        Value::Text(self.cid.clone())
    }

    fn foreign_key_values(&self) -> Vec<Value> {
        vec![Value::Text(self.locality_id.clone())]
    }

    fn column_values(&self) -> Vec<Value> {
        vec![
            Value::Text(self.cid.clone()),
            Value::Text(self.company_name.clone()),
            Value::Text(self.address.clone()),
            Value::Text(self.telephone.clone()),
            Value::Text(self.locality_id.clone()),
        ]
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            cid: row.get("cid")?,
            company_name: row.get("company_name")?,
            address: row.get("address")?,
            telephone: row.get("telephone")?,
            locality_id: row.get("locality_id")?,
        })
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_text(Self::NAME, "cid", &self.cid)?;
        require_text(Self::NAME, "company_name", &self.company_name)?;
        require_text(Self::NAME, "address", &self.address)?;
        require_text(Self::NAME, "telephone", &self.telephone)?;
        require_text(Self::NAME, "locality_id", &self.locality_id)
    }
}
