mod common;

use common::seed_locality;
use rusqlite::types::Value;
use std::time::{Duration, Instant};
use warehouse_core::db::open_db_in_memory;
use warehouse_core::model::carrier::Carrier;
use warehouse_core::model::warehouse::Buyer;
use warehouse_core::{
    EntityService, ErrorKind, Existence, Interrupted, OpContext, RepoError, Repository,
    ServiceError, SqliteRepository,
};

fn carrier(cid: &str) -> Carrier {
    Carrier::new(cid, "Fast Freight", "Yard 2", "555-0102", "L001")
}

#[test]
fn cancelled_context_stops_every_repository_call() {
    let conn = open_db_in_memory().unwrap();
    seed_locality(&conn, "L001");
    let repo = SqliteRepository::<Carrier>::try_new(&conn).unwrap();
    let id = repo
        .insert(&OpContext::background(), &carrier("ABC34"))
        .unwrap();

    let ctx = OpContext::background();
    ctx.cancel_handle().cancel();

    assert!(matches!(
        repo.find_all(&ctx),
        Err(RepoError::Interrupted(Interrupted::Cancelled))
    ));
    assert!(matches!(
        repo.find_by_id(&ctx, id),
        Err(RepoError::Interrupted(Interrupted::Cancelled))
    ));
    let err = repo.insert(&ctx, &carrier("XYZ99")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::StorageFailure);
    assert!(repo.delete(&ctx, id).is_err());

    assert_eq!(
        repo.find_all(&OpContext::background()).unwrap().len(),
        1,
        "interrupted calls must not write"
    );
}

#[test]
fn expired_deadline_reads_as_failed_probe() {
    let conn = open_db_in_memory().unwrap();
    seed_locality(&conn, "L001");
    let repo = SqliteRepository::<Carrier>::try_new(&conn).unwrap();
    repo.insert(&OpContext::background(), &carrier("ABC34"))
        .unwrap();

    let expired = OpContext::background().deadline_at(Instant::now() - Duration::from_millis(1));
    let key = Value::Text("ABC34".to_string());

    assert_eq!(repo.probe_unique_key(&expired, &key), Existence::CheckFailed);
    assert!(!repo.exists_by_unique_key(&expired, &key));
}

#[test]
fn service_reports_expired_context_as_storage_failure() {
    let conn = open_db_in_memory().unwrap();
    let service: EntityService<Buyer, _> =
        EntityService::new(SqliteRepository::<Buyer>::try_new(&conn).unwrap());

    let ctx = OpContext::with_timeout(Duration::ZERO);
    let err = service
        .create(&ctx, Buyer::new("B-100", "Ada", "Byron"))
        .unwrap_err();

    assert!(matches!(
        err,
        ServiceError::Storage(RepoError::Interrupted(Interrupted::DeadlineExceeded))
    ));
    assert_eq!(err.status_code(), 500);
    assert!(service
        .list(&OpContext::background())
        .unwrap()
        .is_empty());
}

#[test]
fn live_context_with_generous_deadline_succeeds() {
    let conn = open_db_in_memory().unwrap();
    seed_locality(&conn, "L001");
    let service: EntityService<Carrier, _> =
        EntityService::new(SqliteRepository::<Carrier>::try_new(&conn).unwrap());

    let ctx = OpContext::with_timeout(Duration::from_secs(30));
    let created = service.create(&ctx, carrier("ABC34")).unwrap();
    assert_eq!(service.get(&ctx, created.id).unwrap(), created);
}
