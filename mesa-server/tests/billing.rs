//! Bill computation and split payment integration tests
//! Run: cargo test -p mesa-server --test billing

use mesa_server::billing::BillingService;
use mesa_server::db::models::{MenuItemCreate, PaymentCreate, TableCreate};
use mesa_server::db::repository::{
    MenuItemRepository, PaymentRepository, SeatRepository, TableRepository,
};
use mesa_server::lifecycle::{JoinOutcome, LifecycleService};
use mesa_server::orders::{OrderPipeline, SubmitOrder};
use shared::cart::CartLine;
use shared::status::{PaymentMethod, PaymentStatus};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

async fn open_db(tmp: &tempfile::TempDir) -> Surreal<Db> {
    mesa_server::db::open(&tmp.path().join("mesa.db"))
        .await
        .unwrap()
}

async fn seed_item(db: &Surreal<Db>, name: &str, price: f64) -> String {
    MenuItemRepository::new(db.clone())
        .create(MenuItemCreate {
            name: name.into(),
            description: String::new(),
            price,
            category: "Mains".into(),
            image_url: None,
            is_available: None,
            modifiers: vec![],
        })
        .await
        .unwrap()
        .id
        .unwrap()
        .to_string()
}

async fn order_for(
    pipeline: &OrderPipeline,
    outcome: &JoinOutcome,
    menu_item_id: &str,
    quantity: i32,
) {
    pipeline
        .submit(SubmitOrder {
            table_id: outcome.table.id.as_ref().unwrap().to_string(),
            seat_id: outcome.seat.id.as_ref().unwrap().to_string(),
            lines: vec![CartLine {
                menu_item_id: menu_item_id.to_string(),
                quantity,
                selections: vec![],
                notes: None,
            }],
            notes: None,
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn split_bill_applies_service_charge_per_seat() {
    let tmp = tempfile::tempdir().unwrap();
    let db = open_db(&tmp).await;

    let pasta = seed_item(&db, "Pasta", 40.00).await;
    let fish = seed_item(&db, "Fish", 60.00).await;

    let table = TableRepository::new(db.clone())
        .create(TableCreate {
            number: 8,
            capacity: None,
        })
        .await
        .unwrap();
    let lifecycle = LifecycleService::new(db.clone());
    let ana = lifecycle
        .join_by_token(&table.token, Some("Ana".into()), "dev-ana".into())
        .await
        .unwrap();
    let bruno = lifecycle
        .join_by_token(&table.token, Some("Bruno".into()), "dev-bruno".into())
        .await
        .unwrap();

    let pipeline = OrderPipeline::new(db.clone());
    order_for(&pipeline, &ana, &pasta, 1).await;
    order_for(&pipeline, &bruno, &fish, 1).await;

    let billing = BillingService::new(db.clone(), 10.0);
    let table_id = table.id.as_ref().unwrap().to_string();
    let bill = billing.table_bill(&table_id).await.unwrap();

    assert_eq!(bill.seats.len(), 2);
    let ana_bill = &bill.seats[0];
    let bruno_bill = &bill.seats[1];
    assert_eq!(ana_bill.subtotal, 40.00);
    assert_eq!(ana_bill.service_charge, 4.00);
    assert_eq!(ana_bill.total_due, 44.00);
    assert_eq!(bruno_bill.subtotal, 60.00);
    assert_eq!(bruno_bill.total_due, 66.00);

    assert_eq!(bill.subtotal, 100.00);
    assert_eq!(bill.service_charge, 10.00);
    assert_eq!(bill.total_due, 110.00);
}

#[tokio::test]
async fn cancelled_orders_are_excluded_from_the_bill() {
    let tmp = tempfile::tempdir().unwrap();
    let db = open_db(&tmp).await;

    let pasta = seed_item(&db, "Pasta", 40.00).await;
    let table = TableRepository::new(db.clone())
        .create(TableCreate {
            number: 2,
            capacity: None,
        })
        .await
        .unwrap();
    let ana = LifecycleService::new(db.clone())
        .join_by_token(&table.token, Some("Ana".into()), "dev-ana".into())
        .await
        .unwrap();

    let pipeline = OrderPipeline::new(db.clone());
    order_for(&pipeline, &ana, &pasta, 1).await;
    order_for(&pipeline, &ana, &pasta, 1).await;

    // Cancel the second order
    let orders = pipeline
        .list(mesa_server::db::repository::OrderListFilter::default())
        .await
        .unwrap();
    let second_id = orders[0].id.as_ref().unwrap().to_string();
    pipeline.cancel(&second_id).await.unwrap();

    let bill = BillingService::new(db.clone(), 10.0)
        .table_bill(&table.id.as_ref().unwrap().to_string())
        .await
        .unwrap();
    assert_eq!(bill.subtotal, 40.00);
    assert_eq!(bill.total_due, 44.00);
}

#[tokio::test]
async fn split_payments_then_close_leaves_a_clean_table() {
    let tmp = tempfile::tempdir().unwrap();
    let db = open_db(&tmp).await;

    let pasta = seed_item(&db, "Pasta", 40.00).await;
    let fish = seed_item(&db, "Fish", 60.00).await;

    let table = TableRepository::new(db.clone())
        .create(TableCreate {
            number: 6,
            capacity: None,
        })
        .await
        .unwrap();
    let lifecycle = LifecycleService::new(db.clone());
    let ana = lifecycle
        .join_by_token(&table.token, Some("Ana".into()), "dev-ana".into())
        .await
        .unwrap();
    let bruno = lifecycle
        .join_by_token(&table.token, Some("Bruno".into()), "dev-bruno".into())
        .await
        .unwrap();

    let pipeline = OrderPipeline::new(db.clone());
    order_for(&pipeline, &ana, &pasta, 1).await;
    order_for(&pipeline, &bruno, &fish, 1).await;

    let table_rid = table.id.clone().unwrap();
    let bill = BillingService::new(db.clone(), 10.0)
        .table_bill(&table_rid.to_string())
        .await
        .unwrap();

    // One payment record per paying seat, amount incl. service charge
    let payments = PaymentRepository::new(db.clone());
    for seat_bill in &bill.seats {
        let payment = payments
            .create(PaymentCreate {
                table: table_rid.clone(),
                seat: seat_bill.seat.id.clone(),
                amount: seat_bill.total_due,
                method: PaymentMethod::Card,
            })
            .await
            .unwrap();
        assert_eq!(payment.status, PaymentStatus::Completed);
    }
    let recorded = payments.find_by_table(&table_rid).await.unwrap();
    assert_eq!(recorded.len(), 2);
    assert_eq!(recorded.iter().map(|p| p.amount).sum::<f64>(), 110.00);

    // Close: table free, zero seats; payment history survives
    let closed = lifecycle
        .close_table(&table_rid.to_string())
        .await
        .unwrap();
    assert!(!closed.is_occupied);
    let seats = SeatRepository::new(db.clone())
        .find_by_table(&table_rid)
        .await
        .unwrap();
    assert!(seats.is_empty());
    assert_eq!(payments.find_by_table(&table_rid).await.unwrap().len(), 2);
}
