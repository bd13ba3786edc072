//! Read-only aggregate report rows.

use crate::model::entity::RecordId;
use crate::model::locality::LocalityId;
use serde::{Deserialize, Serialize};

/// Number of carriers or sellers registered in one locality.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalityCount {
    pub locality_id: LocalityId,
    pub locality_name: String,
    pub count: i64,
}

/// Inbound orders handled by one employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeInboundOrders {
    pub id: RecordId,
    pub card_number_id: String,
    pub first_name: String,
    pub last_name: String,
    pub warehouse_id: RecordId,
    pub inbound_orders_count: i64,
}

/// Stock held by one section, summed over its batches' current quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionProducts {
    pub section_id: RecordId,
    pub section_number: i64,
    pub products_count: i64,
}

/// Purchase orders placed by one buyer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuyerPurchaseOrders {
    pub id: RecordId,
    pub card_number_id: String,
    pub first_name: String,
    pub last_name: String,
    pub purchase_orders_count: i64,
}
