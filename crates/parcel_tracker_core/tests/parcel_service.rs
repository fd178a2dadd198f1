use parcel_tracker_core::db::open_db_in_memory;
use parcel_tracker_core::{
    ParcelRepository, ParcelService, ParcelServiceError, ParcelStatus, SqliteParcelRepository,
};

#[test]
fn register_stores_registered_parcel_with_rfc3339_timestamp() {
    let conn = open_db_in_memory().unwrap();
    let service = ParcelService::new(SqliteParcelRepository::new(&conn));

    let parcel = service.register(10, "Tver, Sovetskaya 3").unwrap();
    assert!(parcel.number > 0);
    assert!(parcel.status.is_registered());
    assert!(chrono::DateTime::parse_from_rfc3339(&parcel.created_at).is_ok());

    let stored = SqliteParcelRepository::new(&conn).get(parcel.number).unwrap();
    assert_eq!(stored, parcel);
}

#[test]
fn next_status_walks_chain_and_stops_at_delivered() {
    let conn = open_db_in_memory().unwrap();
    let service = ParcelService::new(SqliteParcelRepository::new(&conn));
    let parcel = service.register(10, "Omsk").unwrap();

    assert_eq!(
        service.next_status(parcel.number).unwrap(),
        Some(ParcelStatus::sent())
    );
    assert_eq!(
        service.next_status(parcel.number).unwrap(),
        Some(ParcelStatus::delivered())
    );
    assert_eq!(service.next_status(parcel.number).unwrap(), None);

    let stored = SqliteParcelRepository::new(&conn).get(parcel.number).unwrap();
    assert_eq!(stored.status, ParcelStatus::delivered());
}

#[test]
fn next_status_on_missing_parcel_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = ParcelService::new(SqliteParcelRepository::new(&conn));

    let err = service.next_status(31337).unwrap_err();
    assert!(matches!(err, ParcelServiceError::ParcelNotFound(31337)));
}

#[test]
fn change_address_and_delete_respect_registered_gate() {
    let conn = open_db_in_memory().unwrap();
    let service = ParcelService::new(SqliteParcelRepository::new(&conn));
    let repo = SqliteParcelRepository::new(&conn);

    let kept = service.register(20, "old").unwrap();
    let removed = service.register(20, "gone soon").unwrap();

    service.change_address(kept.number, "new").unwrap();
    service.next_status(kept.number).unwrap();
    service.change_address(kept.number, "ignored").unwrap();
    service.delete(kept.number).unwrap();
    service.delete(removed.number).unwrap();

    let remaining = service.client_parcels(20).unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].number, kept.number);
    assert_eq!(remaining[0].address, "new");
    assert!(repo.get(removed.number).is_err());
}
