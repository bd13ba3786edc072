//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the data access contract services depend on.
//! - Isolate SQLite query details and constraint classification from
//!   service orchestration.
//!
//! # Invariants
//! - Repository writes enforce `Entity::validate()` before persistence.
//! - Repository APIs return classified errors (`NotFound`, `AlreadyExists`,
//!   `ForeignKeyMissing`) in addition to storage transport errors.

pub mod constraint;
pub mod entity_repo;
pub mod locality_repo;
mod readiness;
pub mod report_repo;

use crate::model::carrier::Carrier;
use crate::model::employee::Employee;
use crate::model::order::{InboundOrder, PurchaseOrder};
use crate::model::product::Product;
use crate::model::product_batch::ProductBatch;
use crate::model::section::Section;
use crate::model::seller::Seller;
use crate::model::warehouse::{Buyer, ProductType, Warehouse};

pub use entity_repo::{Existence, RepoError, RepoResult, Repository, SqliteRepository};

pub type WarehouseRepository<'conn> = SqliteRepository<'conn, Warehouse>;
pub type BuyerRepository<'conn> = SqliteRepository<'conn, Buyer>;
pub type ProductTypeRepository<'conn> = SqliteRepository<'conn, ProductType>;
pub type SellerRepository<'conn> = SqliteRepository<'conn, Seller>;
pub type CarrierRepository<'conn> = SqliteRepository<'conn, Carrier>;
pub type EmployeeRepository<'conn> = SqliteRepository<'conn, Employee>;
pub type SectionRepository<'conn> = SqliteRepository<'conn, Section>;
pub type ProductRepository<'conn> = SqliteRepository<'conn, Product>;
pub type ProductBatchRepository<'conn> = SqliteRepository<'conn, ProductBatch>;
pub type InboundOrderRepository<'conn> = SqliteRepository<'conn, InboundOrder>;
pub type PurchaseOrderRepository<'conn> = SqliteRepository<'conn, PurchaseOrder>;
