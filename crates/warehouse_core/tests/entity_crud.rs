mod common;

use common::{insert, seed, seed_locality};
use warehouse_core::db::open_db_in_memory;
use warehouse_core::model::carrier::Carrier;
use warehouse_core::model::employee::Employee;
use warehouse_core::model::order::InboundOrder;
use warehouse_core::model::product_batch::ProductBatch;
use warehouse_core::model::section::Section;
use warehouse_core::model::validation::ValidationError;
use warehouse_core::model::warehouse::Warehouse;
use warehouse_core::{ErrorKind, OpContext, RepoError, Repository, SqliteRepository};

#[test]
fn insert_assigns_ids_and_find_by_id_roundtrips() {
    let conn = open_db_in_memory().unwrap();
    seed_locality(&conn, "L001");
    let repo = SqliteRepository::<Carrier>::try_new(&conn).unwrap();
    let ctx = OpContext::background();

    let carrier = Carrier::new("ABC34", "Fast Freight", "Yard 2", "555-0102", "L001");
    let first = repo.insert(&ctx, &carrier).unwrap();
    let second = repo
        .insert(
            &ctx,
            &Carrier::new("XYZ99", "Slow Freight", "Yard 3", "555-0103", "L001"),
        )
        .unwrap();
    assert!(first > 0);
    assert!(second > first);

    let loaded = repo.find_by_id(&ctx, first).unwrap();
    assert_eq!(loaded.id, first);
    assert_eq!(loaded.cid, "ABC34");
    assert_eq!(loaded.company_name, "Fast Freight");
    assert_eq!(loaded.locality_id, "L001");
}

#[test]
fn find_all_returns_rows_in_id_order() {
    let conn = open_db_in_memory().unwrap();
    seed_locality(&conn, "L001");
    let repo = SqliteRepository::<Carrier>::try_new(&conn).unwrap();
    let ctx = OpContext::background();
    assert!(repo.find_all(&ctx).unwrap().is_empty());

    for cid in ["C3", "C1", "C2"] {
        repo.insert(&ctx, &Carrier::new(cid, "Co", "Addr", "555", "L001"))
            .unwrap();
    }

    let cids: Vec<String> = repo
        .find_all(&ctx)
        .unwrap()
        .into_iter()
        .map(|carrier| carrier.cid)
        .collect();
    assert_eq!(cids, vec!["C3", "C1", "C2"]);
}

#[test]
fn find_by_missing_id_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteRepository::<Section>::try_new(&conn).unwrap();

    let err = repo.find_by_id(&OpContext::background(), 42).unwrap_err();
    assert!(matches!(
        err,
        RepoError::NotFound {
            entity: "section",
            ref id
        } if id == "42"
    ));
}

#[test]
fn update_rewrites_all_columns() {
    let conn = open_db_in_memory().unwrap();
    let seeded = seed(&conn);
    let repo = SqliteRepository::<Section>::try_new(&conn).unwrap();
    let ctx = OpContext::background();

    let mut section = repo.find_by_id(&ctx, seeded.section_id).unwrap();
    section.current_capacity = 30;
    section.maximum_capacity = 120;
    section.minimum_temperature = -25.0;
    section.current_temperature = -18.5;
    repo.update(&ctx, &section).unwrap();

    let loaded = repo.find_by_id(&ctx, seeded.section_id).unwrap();
    assert_eq!(loaded, section);
}

#[test]
fn update_and_delete_on_missing_rows_return_not_found() {
    let conn = open_db_in_memory().unwrap();
    let seeded = seed(&conn);
    let repo = SqliteRepository::<Section>::try_new(&conn).unwrap();
    let ctx = OpContext::background();

    let mut ghost = Section::new(77, 10, seeded.warehouse_id, seeded.product_type_id);
    ghost.id = 9_999;
    assert!(matches!(
        repo.update(&ctx, &ghost),
        Err(RepoError::NotFound { .. })
    ));
    assert!(matches!(
        repo.delete(&ctx, 9_999),
        Err(RepoError::NotFound { .. })
    ));
}

#[test]
fn delete_removes_exactly_one_row() {
    let conn = open_db_in_memory().unwrap();
    seed_locality(&conn, "L001");
    let repo = SqliteRepository::<Carrier>::try_new(&conn).unwrap();
    let ctx = OpContext::background();

    let id = repo
        .insert(&ctx, &Carrier::new("ABC34", "Co", "Addr", "555", "L001"))
        .unwrap();
    repo.delete(&ctx, id).unwrap();

    assert!(matches!(
        repo.find_by_id(&ctx, id),
        Err(RepoError::NotFound { .. })
    ));
    assert!(matches!(repo.delete(&ctx, id), Err(RepoError::NotFound { .. })));
}

#[test]
fn insert_with_duplicate_key_is_classified_from_the_constraint() {
    let conn = open_db_in_memory().unwrap();
    seed_locality(&conn, "L001");
    let repo = SqliteRepository::<Carrier>::try_new(&conn).unwrap();
    let ctx = OpContext::background();

    repo.insert(&ctx, &Carrier::new("ABC34", "Co", "Addr", "555", "L001"))
        .unwrap();
    let err = repo
        .insert(&ctx, &Carrier::new("ABC34", "Other", "Addr", "555", "L001"))
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::AlreadyExists);
    match err {
        RepoError::AlreadyExists {
            entity,
            column,
            key,
        } => {
            assert_eq!(entity, "carrier");
            assert_eq!(column, "cid");
            assert_eq!(key, "ABC34");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn update_onto_existing_key_is_classified_from_the_constraint() {
    let conn = open_db_in_memory().unwrap();
    let seeded = seed(&conn);
    let repo = SqliteRepository::<Warehouse>::try_new(&conn).unwrap();
    let ctx = OpContext::background();

    let second = repo
        .insert(&ctx, &Warehouse::new("WH-2", "Side St 2", "555-0200", "L001"))
        .unwrap();
    let mut moved = repo.find_by_id(&ctx, second).unwrap();
    moved.warehouse_code = "WH-1".to_string();

    let err = repo.update(&ctx, &moved).unwrap_err();
    assert!(matches!(
        err,
        RepoError::AlreadyExists { ref column, .. } if column == "warehouse_code"
    ));
    assert_eq!(
        repo.find_by_id(&ctx, seeded.warehouse_id).unwrap().warehouse_code,
        "WH-1"
    );
}

#[test]
fn insert_with_missing_locality_names_the_reference() {
    let conn = open_db_in_memory().unwrap();
    seed_locality(&conn, "L001");
    let repo = SqliteRepository::<Carrier>::try_new(&conn).unwrap();

    let err = repo
        .insert(
            &OpContext::background(),
            &Carrier::new("ABC34", "Co", "Addr", "555", "L999"),
        )
        .unwrap_err();
    match err {
        RepoError::ForeignKeyMissing {
            entity,
            reference,
            value,
        } => {
            assert_eq!(entity, "carrier");
            assert_eq!(reference, Some("locality"));
            assert_eq!(value.as_deref(), Some("L999"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn update_onto_missing_reference_is_classified_from_the_constraint() {
    let conn = open_db_in_memory().unwrap();
    let seeded = seed(&conn);
    let repo = SqliteRepository::<Employee>::try_new(&conn).unwrap();
    let ctx = OpContext::background();

    let before = repo.find_by_id(&ctx, seeded.employee_id).unwrap();
    let mut moved = before.clone();
    moved.warehouse_id = 404;

    let err = repo.update(&ctx, &moved).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ForeignKeyMissing);
    match err {
        RepoError::ForeignKeyMissing {
            entity,
            reference,
            value,
        } => {
            assert_eq!(entity, "employee");
            assert_eq!(reference, Some("warehouse"));
            assert_eq!(value.as_deref(), Some("404"));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(repo.find_by_id(&ctx, seeded.employee_id).unwrap(), before);
}

#[test]
fn multi_reference_insert_names_the_absent_reference() {
    let conn = open_db_in_memory().unwrap();
    let seeded = seed(&conn);
    let repo = SqliteRepository::<InboundOrder>::try_new(&conn).unwrap();
    let ctx = OpContext::background();

    let cases = [
        (
            InboundOrder::new("IO-1", "2024-02-01", 404, seeded.product_batch_id, seeded.warehouse_id),
            "employee",
        ),
        (
            InboundOrder::new("IO-2", "2024-02-01", seeded.employee_id, 404, seeded.warehouse_id),
            "product_batch",
        ),
        (
            InboundOrder::new("IO-3", "2024-02-01", seeded.employee_id, seeded.product_batch_id, 404),
            "warehouse",
        ),
    ];

    for (order, expected) in cases {
        let err = repo.insert(&ctx, &order).unwrap_err();
        assert!(
            matches!(
                err,
                RepoError::ForeignKeyMissing { reference: Some(reference), .. } if reference == expected
            ),
            "order {} should miss {expected}, got {err}",
            order.order_number
        );
    }
    assert!(repo.find_all(&ctx).unwrap().is_empty());
}

#[test]
fn validation_runs_before_any_write() {
    let conn = open_db_in_memory().unwrap();
    let seeded = seed(&conn);
    let repo = SqliteRepository::<ProductBatch>::try_new(&conn).unwrap();
    let ctx = OpContext::background();

    let backwards = ProductBatch::new(
        11,
        5,
        "2024-06-10",
        "2024-01-10",
        seeded.product_id,
        seeded.section_id,
    );
    let err = repo.insert(&ctx, &backwards).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Invalid);
    assert!(matches!(
        err,
        RepoError::Validation(ValidationError::OutOfOrder {
            lower: "manufacturing_date",
            ..
        })
    ));

    let mut bad_date = backwards.clone();
    bad_date.manufacturing_date = "2024-02-30".to_string();
    assert!(matches!(
        repo.insert(&ctx, &bad_date),
        Err(RepoError::Validation(ValidationError::InvalidDate { .. }))
    ));

    assert_eq!(repo.find_all(&ctx).unwrap().len(), 1);
}

#[test]
fn undecodable_row_fails_the_whole_listing() {
    let conn = open_db_in_memory().unwrap();
    seed(&conn);
    insert(&conn, &Warehouse::new("WH-2", "Side St 2", "555-0200", "L001"));
    conn.execute(
        "INSERT INTO warehouses
            (warehouse_code, address, telephone, minimum_capacity, minimum_temperature, locality_id)
         VALUES ('WH-BAD', 'Nowhere', '555', 'lots', 0.0, 'L001');",
        [],
    )
    .unwrap();
    let repo = SqliteRepository::<Warehouse>::try_new(&conn).unwrap();

    let err = repo.find_all(&OpContext::background()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::StorageFailure);
    assert!(matches!(err, RepoError::InvalidData(_)));
}

#[test]
fn existence_probes_fail_closed_to_false() {
    let conn = open_db_in_memory().unwrap();
    seed(&conn);
    let repo = SqliteRepository::<Carrier>::try_new(&conn).unwrap();
    let ctx = OpContext::background();
    let key = rusqlite::types::Value::Text("CAR1".to_string());
    let locality = &<Carrier as warehouse_core::Entity>::FOREIGN_KEYS[0];
    let l001 = rusqlite::types::Value::Text("L001".to_string());

    assert!(repo.exists_by_unique_key(&ctx, &key));
    assert!(repo.exists_foreign_key(&ctx, locality, &l001));

    conn.execute_batch(
        "PRAGMA foreign_keys = OFF;
         ALTER TABLE carriers RENAME TO carriers_archived;
         ALTER TABLE localities RENAME TO localities_archived;",
    )
    .unwrap();

    assert_eq!(
        repo.probe_unique_key(&ctx, &key),
        warehouse_core::Existence::CheckFailed
    );
    assert!(!repo.exists_by_unique_key(&ctx, &key));
    assert!(!repo.exists_foreign_key(&ctx, locality, &l001));
}
