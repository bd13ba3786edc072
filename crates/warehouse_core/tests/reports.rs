mod common;

use common::{insert, seed, seed_locality};
use warehouse_core::db::open_db_in_memory;
use warehouse_core::model::carrier::Carrier;
use warehouse_core::model::employee::Employee;
use warehouse_core::model::order::{InboundOrder, PurchaseOrder};
use warehouse_core::model::product_batch::ProductBatch;
use warehouse_core::model::section::Section;
use warehouse_core::model::seller::Seller;
use warehouse_core::model::warehouse::Buyer;
use warehouse_core::repo::report_repo::SqliteReportRepository;
use warehouse_core::{ErrorKind, OpContext, ReportService, ServiceError};

fn service(conn: &rusqlite::Connection) -> ReportService<SqliteReportRepository<'_>> {
    ReportService::new(SqliteReportRepository::try_new(conn).unwrap())
}

#[test]
fn carriers_report_lists_every_locality_including_empty_ones() {
    let conn = open_db_in_memory().unwrap();
    seed(&conn);
    seed_locality(&conn, "L002");
    insert(&conn, &Carrier::new("CAR2", "Co", "Addr", "555", "L001"));
    let reports = service(&conn);
    let ctx = OpContext::background();

    let rows = reports.report_carriers(&ctx, None).unwrap();
    let counts: Vec<(&str, i64)> = rows
        .iter()
        .map(|row| (row.locality_id.as_str(), row.count))
        .collect();
    assert_eq!(counts, vec![("L001", 2), ("L002", 0)]);

    let one = reports.report_carriers(&ctx, Some("L002")).unwrap();
    assert_eq!(one.len(), 1);
    assert_eq!(one[0].locality_name, "City L002");
    assert_eq!(one[0].count, 0);
}

#[test]
fn sellers_report_counts_per_locality() {
    let conn = open_db_in_memory().unwrap();
    seed(&conn);
    seed_locality(&conn, "L002");
    insert(&conn, &Seller::new("SEL2", "Beta", "Dock 5", "555", "L002"));
    insert(&conn, &Seller::new("SEL3", "Gamma", "Dock 6", "555", "L002"));

    let rows = service(&conn)
        .report_sellers(&OpContext::background(), Some("L002"))
        .unwrap();
    assert_eq!(rows[0].count, 2);
}

#[test]
fn report_on_unknown_parent_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    seed(&conn);
    let reports = service(&conn);
    let ctx = OpContext::background();

    let err = reports.report_carriers(&ctx, Some("L999")).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::NotFound {
            entity: "locality",
            ref id
        } if id == "L999"
    ));
    assert_eq!(
        reports.report_inbound_orders(&ctx, Some(404)).unwrap_err().kind(),
        ErrorKind::NotFound
    );
    assert_eq!(
        reports.report_products(&ctx, Some(404)).unwrap_err().kind(),
        ErrorKind::NotFound
    );
    assert_eq!(
        reports
            .report_purchase_orders(&ctx, Some(404))
            .unwrap_err()
            .kind(),
        ErrorKind::NotFound
    );
}

#[test]
fn inbound_orders_report_counts_per_employee() {
    let conn = open_db_in_memory().unwrap();
    let seeded = seed(&conn);
    let idle = insert(
        &conn,
        &Employee::new("E-200", "Alan", "Turing", seeded.warehouse_id),
    );
    for number in ["IO-1", "IO-2"] {
        insert(
            &conn,
            &InboundOrder::new(
                number,
                "2024-02-01",
                seeded.employee_id,
                seeded.product_batch_id,
                seeded.warehouse_id,
            ),
        );
    }
    let reports = service(&conn);
    let ctx = OpContext::background();

    let rows = reports.report_inbound_orders(&ctx, None).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].id, seeded.employee_id);
    assert_eq!(rows[0].card_number_id, "E-100");
    assert_eq!(rows[0].inbound_orders_count, 2);
    assert_eq!(rows[1].id, idle);
    assert_eq!(rows[1].inbound_orders_count, 0);
}

#[test]
fn products_report_sums_current_quantity_per_section() {
    let conn = open_db_in_memory().unwrap();
    let seeded = seed(&conn);
    let empty_section = insert(
        &conn,
        &Section::new(2, 50, seeded.warehouse_id, seeded.product_type_id),
    );
    let mut partial = ProductBatch::new(
        11,
        30,
        "2024-01-10",
        "2024-06-10",
        seeded.product_id,
        seeded.section_id,
    );
    partial.current_quantity = 12;
    insert(&conn, &partial);
    let reports = service(&conn);
    let ctx = OpContext::background();

    let rows = reports.report_products(&ctx, Some(seeded.section_id)).unwrap();
    assert_eq!(rows[0].section_number, 1);
    assert_eq!(rows[0].products_count, 40 + 12);

    let empty = reports.report_products(&ctx, Some(empty_section)).unwrap();
    assert_eq!(empty[0].products_count, 0);
}

#[test]
fn purchase_orders_report_counts_per_buyer() {
    let conn = open_db_in_memory().unwrap();
    let seeded = seed(&conn);
    let other = insert(&conn, &Buyer::new("B-200", "Alan", "Kay"));
    insert(
        &conn,
        &PurchaseOrder::new(
            "PO-1",
            "2024-03-01",
            "TRK-1",
            seeded.buyer_id,
            seeded.carrier_id,
            seeded.warehouse_id,
        ),
    );
    let reports = service(&conn);
    let ctx = OpContext::background();

    let rows = reports.report_purchase_orders(&ctx, None).unwrap();
    let counts: Vec<_> = rows
        .iter()
        .map(|row| (row.id, row.purchase_orders_count))
        .collect();
    assert_eq!(counts, vec![(seeded.buyer_id, 1), (other, 0)]);
}
