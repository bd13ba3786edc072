use warehouse_core::db::open_db_in_memory;
use warehouse_core::model::locality::Locality;
use warehouse_core::repo::locality_repo::{LocalityRepository, SqliteLocalityRepository};
use warehouse_core::{ErrorKind, LocalityService, OpContext, RepoError, ServiceError};

fn locality(id: &str) -> Locality {
    Locality::new(id, "Springfield", "Buenos Aires", "Argentina")
}

#[test]
fn create_get_and_list_localities() {
    let conn = open_db_in_memory().unwrap();
    let service = LocalityService::new(SqliteLocalityRepository::try_new(&conn).unwrap());
    let ctx = OpContext::background();

    service.create(&ctx, locality("L002")).unwrap();
    service.create(&ctx, locality("L001")).unwrap();

    assert_eq!(service.get(&ctx, "L001").unwrap(), locality("L001"));
    let ids: Vec<String> = service
        .list(&ctx)
        .unwrap()
        .into_iter()
        .map(|locality| locality.id)
        .collect();
    assert_eq!(ids, vec!["L001", "L002"]);
}

#[test]
fn duplicate_locality_is_already_exists() {
    let conn = open_db_in_memory().unwrap();
    let service = LocalityService::new(SqliteLocalityRepository::try_new(&conn).unwrap());
    let ctx = OpContext::background();
    service.create(&ctx, locality("L001")).unwrap();

    let err = service.create(&ctx, locality("L001")).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::AlreadyExists { ref key, .. } if key == "L001"
    ));
}

#[test]
fn primary_key_violation_is_classified_by_the_repository() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteLocalityRepository::try_new(&conn).unwrap();
    let ctx = OpContext::background();
    repo.insert(&ctx, &locality("L001")).unwrap();

    let err = repo.insert(&ctx, &locality("L001")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AlreadyExists);
    assert!(matches!(err, RepoError::AlreadyExists { ref column, .. } if column == "id"));
}

#[test]
fn missing_locality_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = LocalityService::new(SqliteLocalityRepository::try_new(&conn).unwrap());

    let err = service.get(&OpContext::background(), "L999").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn blank_locality_fields_are_invalid() {
    let conn = open_db_in_memory().unwrap();
    let service = LocalityService::new(SqliteLocalityRepository::try_new(&conn).unwrap());
    let ctx = OpContext::background();

    let err = service
        .create(&ctx, Locality::new("L003", " ", "Province", "Country"))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Invalid);
    assert!(service.list(&ctx).unwrap().is_empty());
}

#[test]
fn cancelled_context_probe_reads_as_absent() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteLocalityRepository::try_new(&conn).unwrap();
    repo.insert(&OpContext::background(), &locality("L001"))
        .unwrap();

    let ctx = OpContext::background();
    assert!(repo.exists(&ctx, "L001"));
    ctx.cancel_handle().cancel();
    assert!(!repo.exists(&ctx, "L001"));
}
