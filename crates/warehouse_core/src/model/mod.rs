//! Warehouse domain records.
//!
//! # Responsibility
//! - Define the records persisted by the core and their validation rules.
//! - Declare each record's table, unique key and foreign references once,
//!   through [`entity::Entity`], so persistence logic is written only once.
//!
//! # Invariants
//! - Identifiers are assigned by storage on creation and never reused.
//! - Deletion is a hard delete; there are no tombstones.

pub mod carrier;
pub mod employee;
pub mod entity;
pub mod locality;
pub mod order;
pub mod product;
pub mod product_batch;
pub mod report;
pub mod section;
pub mod seller;
pub mod validation;
pub mod warehouse;
