//! Locality reference model.
//!
//! Localities are keyed by a caller-supplied text id (e.g. `L001`) instead of
//! a storage-assigned number, so they live outside the generic `Entity` path.

use crate::model::validation::{require_text, ValidationError};
use serde::{Deserialize, Serialize};

/// Text identifier of a locality.
pub type LocalityId = String;

/// City/province/country triple that carriers, sellers and warehouses point at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Locality {
    pub id: LocalityId,
    pub locality_name: String,
    pub province_name: String,
    pub country_name: String,
}

impl Locality {
    pub fn new(
        id: impl Into<String>,
        locality_name: impl Into<String>,
        province_name: impl Into<String>,
        country_name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            locality_name: locality_name.into(),
            province_name: province_name.into(),
            country_name: country_name.into(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("locality", "id", &self.id)?;
        require_text("locality", "locality_name", &self.locality_name)?;
        require_text("locality", "province_name", &self.province_name)?;
        require_text("locality", "country_name", &self.country_name)
    }
}
