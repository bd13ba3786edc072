#![allow(dead_code)]

use rusqlite::Connection;
use warehouse_core::model::carrier::Carrier;
use warehouse_core::model::employee::Employee;
use warehouse_core::model::locality::Locality;
use warehouse_core::model::product::Product;
use warehouse_core::model::product_batch::ProductBatch;
use warehouse_core::model::section::Section;
use warehouse_core::model::seller::Seller;
use warehouse_core::model::warehouse::{Buyer, ProductType, Warehouse};
use warehouse_core::repo::locality_repo::{LocalityRepository, SqliteLocalityRepository};
use warehouse_core::{Entity, OpContext, RecordId, Repository, SqliteRepository};

/// Ids of one fully linked set of reference rows.
pub struct Seeded {
    pub warehouse_id: RecordId,
    pub product_type_id: RecordId,
    pub seller_id: RecordId,
    pub carrier_id: RecordId,
    pub buyer_id: RecordId,
    pub employee_id: RecordId,
    pub section_id: RecordId,
    pub product_id: RecordId,
    pub product_batch_id: RecordId,
}

pub fn seed_locality(conn: &Connection, id: &str) {
    let repo = SqliteLocalityRepository::try_new(conn).unwrap();
    repo.insert(
        &OpContext::background(),
        &Locality::new(id, format!("City {id}"), "Province", "Country"),
    )
    .unwrap();
}

pub fn insert<E: Entity>(conn: &Connection, record: &E) -> RecordId {
    let repo = SqliteRepository::<E>::try_new(conn).unwrap();
    repo.insert(&OpContext::background(), record).unwrap()
}

/// Seeds locality `L001` and one row per reference table.
pub fn seed(conn: &Connection) -> Seeded {
    seed_locality(conn, "L001");
    let warehouse_id = insert(conn, &Warehouse::new("WH-1", "Main St 1", "555-0100", "L001"));
    let product_type_id = insert(conn, &ProductType::new("frozen"));
    let seller_id = insert(
        conn,
        &Seller::new("SEL1", "Acme Foods", "Dock 4", "555-0101", "L001"),
    );
    let carrier_id = insert(
        conn,
        &Carrier::new("CAR1", "Fast Freight", "Yard 2", "555-0102", "L001"),
    );
    let buyer_id = insert(conn, &Buyer::new("B-100", "Ada", "Byron"));
    let employee_id = insert(conn, &Employee::new("E-100", "Grace", "Hopper", warehouse_id));
    let section_id = insert(conn, &Section::new(1, 100, warehouse_id, product_type_id));
    let product_id = insert(conn, &Product::new("P-100", "Peas", product_type_id, seller_id));
    let product_batch_id = insert(
        conn,
        &ProductBatch::new(10, 40, "2024-01-10", "2024-06-10", product_id, section_id),
    );

    Seeded {
        warehouse_id,
        product_type_id,
        seller_id,
        carrier_id,
        buyer_id,
        employee_id,
        section_id,
        product_id,
        product_batch_id,
    }
}
