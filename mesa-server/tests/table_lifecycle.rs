//! Table/seat lifecycle integration tests
//! Run: cargo test -p mesa-server --test table_lifecycle

use mesa_server::db::models::TableCreate;
use mesa_server::db::repository::{SeatRepository, TableRepository};
use mesa_server::lifecycle::LifecycleService;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

async fn open_db(tmp: &tempfile::TempDir) -> Surreal<Db> {
    mesa_server::db::open(&tmp.path().join("mesa.db"))
        .await
        .unwrap()
}

#[tokio::test]
async fn first_guest_occupies_and_gets_seat_one() {
    let tmp = tempfile::tempdir().unwrap();
    let db = open_db(&tmp).await;

    let tables = TableRepository::new(db.clone());
    let table = tables
        .create(TableCreate {
            number: 5,
            capacity: Some(4),
        })
        .await
        .unwrap();
    assert!(!table.is_occupied);
    assert!(table.session_id.is_none());

    let lifecycle = LifecycleService::new(db.clone());
    let outcome = lifecycle
        .join_by_token(&table.token, Some("Ana".into()), "dev-ana".into())
        .await
        .unwrap();

    assert!(outcome.table.is_occupied);
    assert_eq!(outcome.table.session_id.as_deref(), Some(outcome.session_id.as_str()));
    assert_eq!(outcome.seat.seat_number, 1);
    assert_eq!(outcome.seat.guest_name.as_deref(), Some("Ana"));

    // The session id embeds the table key
    let key = outcome.table.id.as_ref().unwrap().key().to_string();
    assert!(outcome.session_id.starts_with(&key));
}

#[tokio::test]
async fn second_guest_joins_same_session_with_next_seat() {
    let tmp = tempfile::tempdir().unwrap();
    let db = open_db(&tmp).await;

    let tables = TableRepository::new(db.clone());
    let table = tables
        .create(TableCreate {
            number: 7,
            capacity: None,
        })
        .await
        .unwrap();

    let lifecycle = LifecycleService::new(db.clone());
    let first = lifecycle
        .join_by_token(&table.token, Some("Ana".into()), "dev-ana".into())
        .await
        .unwrap();
    let second = lifecycle
        .join_by_token(&table.token, Some("Bruno".into()), "dev-bruno".into())
        .await
        .unwrap();

    // One session, two seats, server-assigned numbers
    assert_eq!(first.session_id, second.session_id);
    assert_eq!(first.seat.seat_number, 1);
    assert_eq!(second.seat.seat_number, 2);

    let seats = SeatRepository::new(db.clone());
    let table_id = first.table.id.clone().unwrap();
    let listed = seats.find_by_table(&table_id).await.unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].seat_number, 1);
    assert_eq!(listed[1].seat_number, 2);
}

#[tokio::test]
async fn occupancy_and_session_stay_in_lockstep() {
    let tmp = tempfile::tempdir().unwrap();
    let db = open_db(&tmp).await;

    let tables = TableRepository::new(db.clone());
    let table = tables
        .create(TableCreate {
            number: 1,
            capacity: None,
        })
        .await
        .unwrap();
    let lifecycle = LifecycleService::new(db.clone());

    // Free table: not occupied, no session
    let fresh = tables
        .find_by_id(&table.id.as_ref().unwrap().to_string())
        .await
        .unwrap()
        .unwrap();
    assert!(!fresh.is_occupied && fresh.session_id.is_none());

    // Occupied: both set
    let outcome = lifecycle
        .join_by_token(&table.token, None, "dev-1".into())
        .await
        .unwrap();
    assert!(outcome.table.is_occupied && outcome.table.session_id.is_some());

    // Closed: both cleared, counter reset
    let closed = lifecycle
        .close_table(&outcome.table.id.as_ref().unwrap().to_string())
        .await
        .unwrap();
    assert!(!closed.is_occupied && closed.session_id.is_none());
    assert_eq!(closed.seat_counter, 0);
}

#[tokio::test]
async fn close_removes_seats_and_is_idempotent() {
    let tmp = tempfile::tempdir().unwrap();
    let db = open_db(&tmp).await;

    let tables = TableRepository::new(db.clone());
    let table = tables
        .create(TableCreate {
            number: 3,
            capacity: None,
        })
        .await
        .unwrap();
    let lifecycle = LifecycleService::new(db.clone());

    lifecycle
        .join_by_token(&table.token, Some("Ana".into()), "dev-1".into())
        .await
        .unwrap();
    lifecycle
        .join_by_token(&table.token, Some("Bruno".into()), "dev-2".into())
        .await
        .unwrap();

    let table_id = table.id.as_ref().unwrap().to_string();
    let closed = lifecycle.close_table(&table_id).await.unwrap();
    assert!(!closed.is_occupied);

    let seats = SeatRepository::new(db.clone())
        .find_by_table(table.id.as_ref().unwrap())
        .await
        .unwrap();
    assert!(seats.is_empty());

    // Closing again succeeds and changes nothing
    let again = lifecycle.close_table(&table_id).await.unwrap();
    assert!(!again.is_occupied && again.session_id.is_none());
}

#[tokio::test]
async fn leaving_last_seat_never_frees_the_table() {
    let tmp = tempfile::tempdir().unwrap();
    let db = open_db(&tmp).await;

    let tables = TableRepository::new(db.clone());
    let table = tables
        .create(TableCreate {
            number: 9,
            capacity: None,
        })
        .await
        .unwrap();
    let lifecycle = LifecycleService::new(db.clone());

    let outcome = lifecycle
        .join_by_token(&table.token, Some("Ana".into()), "dev-1".into())
        .await
        .unwrap();

    let removed = lifecycle
        .leave_seat(&outcome.seat.id.as_ref().unwrap().to_string())
        .await
        .unwrap();
    assert!(removed);

    // Zero seats, still occupied: only close_table releases
    let current = tables
        .find_by_id(&table.id.as_ref().unwrap().to_string())
        .await
        .unwrap()
        .unwrap();
    assert!(current.is_occupied);
    assert_eq!(current.session_id.as_deref(), Some(outcome.session_id.as_str()));
}

#[tokio::test]
async fn new_session_after_close_gets_fresh_id_and_seat_numbers() {
    let tmp = tempfile::tempdir().unwrap();
    let db = open_db(&tmp).await;

    let tables = TableRepository::new(db.clone());
    let table = tables
        .create(TableCreate {
            number: 4,
            capacity: None,
        })
        .await
        .unwrap();
    let lifecycle = LifecycleService::new(db.clone());
    let table_id = table.id.as_ref().unwrap().to_string();

    let first = lifecycle
        .join_by_token(&table.token, None, "dev-1".into())
        .await
        .unwrap();
    lifecycle
        .join_by_token(&table.token, None, "dev-2".into())
        .await
        .unwrap();
    lifecycle.close_table(&table_id).await.unwrap();

    let second = lifecycle
        .join_by_token(&table.token, None, "dev-3".into())
        .await
        .unwrap();
    assert_ne!(first.session_id, second.session_id);
    // Counter was reset on close, numbering starts over
    assert_eq!(second.seat.seat_number, 1);
}

#[tokio::test]
async fn duplicate_table_number_rejected() {
    let tmp = tempfile::tempdir().unwrap();
    let db = open_db(&tmp).await;

    let tables = TableRepository::new(db.clone());
    tables
        .create(TableCreate {
            number: 12,
            capacity: None,
        })
        .await
        .unwrap();
    let err = tables
        .create(TableCreate {
            number: 12,
            capacity: None,
        })
        .await;
    assert!(err.is_err());
}
