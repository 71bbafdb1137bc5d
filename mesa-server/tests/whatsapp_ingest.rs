//! WhatsApp webhook ingestion integration tests
//! Run: cargo test -p mesa-server --test whatsapp_ingest

use mesa_server::db::models::MenuItemCreate;
use mesa_server::db::repository::{MenuItemRepository, OrderListFilter, OrderRepository};
use mesa_server::utils::AppError;
use mesa_server::whatsapp::WhatsAppIngest;
use shared::status::{OrderOrigin, OrderStatus, PaymentMethod, PaymentStatus};
use shared::webhook::{WebhookItem, WhatsAppWebhookPayload};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

async fn open_db(tmp: &tempfile::TempDir) -> Surreal<Db> {
    mesa_server::db::open(&tmp.path().join("mesa.db"))
        .await
        .unwrap()
}

async fn seed_menu(db: &Surreal<Db>, name: &str, price: f64, available: bool) -> String {
    let menu = MenuItemRepository::new(db.clone());
    let item = menu
        .create(MenuItemCreate {
            name: name.into(),
            description: String::new(),
            price,
            category: "Delivery".into(),
            image_url: None,
            is_available: Some(available),
            modifiers: vec![],
        })
        .await
        .unwrap();
    item.id.unwrap().to_string()
}

fn payload(order_id: &str, items: Vec<WebhookItem>) -> WhatsAppWebhookPayload {
    WhatsAppWebhookPayload {
        order_id: order_id.into(),
        customer_phone: "11999999999".into(),
        customer_name: Some("João Silva".into()),
        customer_address: Some("Rua A, 123".into()),
        items,
        payment_method: Some(PaymentMethod::Pix),
        notes: None,
        delivery_fee: None,
        timestamp: "2024-06-01T19:30:00Z".parse().unwrap(),
    }
}

fn item(menu_item_id: &str, quantity: i32) -> WebhookItem {
    WebhookItem {
        menu_item_id: menu_item_id.into(),
        quantity,
        notes: None,
        customizations: vec![],
    }
}

#[tokio::test]
async fn ingested_order_enters_the_shared_pipeline() {
    let tmp = tempfile::tempdir().unwrap();
    let db = open_db(&tmp).await;
    let burger = seed_menu(&db, "X-Burger", 42.90, true).await;

    let ingest = WhatsAppIngest::new(db.clone(), 8.00);
    let order = ingest
        .ingest(payload("WA-2024-001", vec![item(&burger, 2)]))
        .await
        .unwrap();

    assert_eq!(order.origin, OrderOrigin::Whatsapp);
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.subtotal, 85.80);
    assert_eq!(order.delivery_fee, 8.00);
    assert_eq!(order.total, 93.80);
    assert_eq!(order.external_ref.as_deref(), Some("WA-2024-001"));
    assert_eq!(order.customer_phone.as_deref(), Some("11999999999"));
    assert_eq!(order.payment_status, Some(PaymentStatus::Pending));
    assert!(order.table.is_none() && order.seat.is_none());

    // Visible on the same poll endpoint as table orders
    let listed = OrderRepository::new(db.clone())
        .find_all(OrderListFilter {
            origin: Some(OrderOrigin::Whatsapp),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);
}

#[tokio::test]
async fn payload_fee_overrides_the_default() {
    let tmp = tempfile::tempdir().unwrap();
    let db = open_db(&tmp).await;
    let burger = seed_menu(&db, "X-Burger", 42.90, true).await;

    let ingest = WhatsAppIngest::new(db.clone(), 8.00);
    let mut p = payload("WA-2024-002", vec![item(&burger, 1)]);
    p.delivery_fee = Some(12.50);
    let order = ingest.ingest(p).await.unwrap();
    assert_eq!(order.delivery_fee, 12.50);
    assert_eq!(order.total, 55.40);
}

#[tokio::test]
async fn unknown_item_rejects_the_whole_payload() {
    let tmp = tempfile::tempdir().unwrap();
    let db = open_db(&tmp).await;
    let burger = seed_menu(&db, "X-Burger", 42.90, true).await;

    let ingest = WhatsAppIngest::new(db.clone(), 0.0);
    let err = ingest
        .ingest(payload(
            "WA-2024-003",
            vec![item(&burger, 1), item("menu_items:nope", 1)],
        ))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    // All-or-nothing: the valid line was not persisted either
    let listed = OrderRepository::new(db.clone())
        .find_all(OrderListFilter::default())
        .await
        .unwrap();
    assert!(listed.is_empty());
}

#[tokio::test]
async fn unavailable_item_rejects_the_payload() {
    let tmp = tempfile::tempdir().unwrap();
    let db = open_db(&tmp).await;
    let soup = seed_menu(&db, "Soup of Yesterday", 19.00, false).await;

    let ingest = WhatsAppIngest::new(db.clone(), 0.0);
    let err = ingest
        .ingest(payload("WA-2024-004", vec![item(&soup, 1)]))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn duplicate_external_ref_conflicts() {
    let tmp = tempfile::tempdir().unwrap();
    let db = open_db(&tmp).await;
    let burger = seed_menu(&db, "X-Burger", 42.90, true).await;

    let ingest = WhatsAppIngest::new(db.clone(), 0.0);
    ingest
        .ingest(payload("WA-2024-005", vec![item(&burger, 1)]))
        .await
        .unwrap();
    let err = ingest
        .ingest(payload("WA-2024-005", vec![item(&burger, 1)]))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    let listed = OrderRepository::new(db.clone())
        .find_all(OrderListFilter::default())
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);
}

#[tokio::test]
async fn store_itself_rejects_a_duplicate_external_ref() {
    let tmp = tempfile::tempdir().unwrap();
    let db = open_db(&tmp).await;

    // Writing straight through the repository skips the ingest
    // service's pre-check, the path two concurrent deliveries of the
    // same orderId would race down.
    let repo = OrderRepository::new(db.clone());
    repo.create(raw_order("WA-2024-007")).await.unwrap();
    let err = repo.create(raw_order("WA-2024-007")).await.unwrap_err();
    assert!(matches!(
        err,
        mesa_server::db::repository::RepoError::Duplicate(_)
    ));

    let listed = repo.find_all(OrderListFilter::default()).await.unwrap();
    assert_eq!(listed.len(), 1);
}

#[tokio::test]
async fn orders_without_external_ref_never_collide() {
    let tmp = tempfile::tempdir().unwrap();
    let db = open_db(&tmp).await;

    // Table orders carry no external_ref; the unique index must not
    // treat the absent field as a shared value.
    let repo = OrderRepository::new(db.clone());
    let mut first = raw_order("unused");
    first.external_ref = None;
    let mut second = raw_order("unused");
    second.external_ref = None;
    repo.create(first).await.unwrap();
    repo.create(second).await.unwrap();

    let listed = repo.find_all(OrderListFilter::default()).await.unwrap();
    assert_eq!(listed.len(), 2);
}

fn raw_order(external_ref: &str) -> mesa_server::db::models::Order {
    mesa_server::db::models::Order {
        id: None,
        origin: OrderOrigin::Whatsapp,
        table: None,
        seat: None,
        customer_phone: Some("11999999999".into()),
        customer_name: None,
        customer_address: None,
        external_ref: Some(external_ref.into()),
        items: vec![],
        subtotal: 0.0,
        delivery_fee: 0.0,
        total: 0.0,
        status: OrderStatus::Pending,
        payment_method: None,
        payment_status: Some(PaymentStatus::Pending),
        notes: None,
        created_at: 0,
        updated_at: 0,
    }
}

#[tokio::test]
async fn empty_items_fail_shape_validation() {
    let tmp = tempfile::tempdir().unwrap();
    let db = open_db(&tmp).await;

    let ingest = WhatsAppIngest::new(db.clone(), 0.0);
    let err = ingest.ingest(payload("WA-2024-006", vec![])).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}
