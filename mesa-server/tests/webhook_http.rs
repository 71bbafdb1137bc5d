//! Webhook HTTP contract tests
//!
//! The n8n flow expects its own envelope, not the standard error
//! responses, so these assert on raw status codes and bodies.
//! Run: cargo test -p mesa-server --test webhook_http

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use mesa_server::core::{Config, ServerState};
use mesa_server::db::models::MenuItemCreate;
use mesa_server::db::repository::MenuItemRepository;
use tower::ServiceExt;

async fn test_state(tmp: &tempfile::TempDir) -> ServerState {
    let db = mesa_server::db::open(&tmp.path().join("mesa.db"))
        .await
        .unwrap();
    ServerState {
        config: Config::with_overrides(tmp.path().to_string_lossy(), 0),
        db,
    }
}

fn webhook_request(body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/webhook/whatsapp")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn valid_payload_returns_success_envelope() {
    let tmp = tempfile::tempdir().unwrap();
    let state = test_state(&tmp).await;

    let item = MenuItemRepository::new(state.db.clone())
        .create(MenuItemCreate {
            name: "X-Burger".into(),
            description: String::new(),
            price: 42.90,
            category: "Burgers".into(),
            image_url: None,
            is_available: None,
            modifiers: vec![],
        })
        .await
        .unwrap();

    let app = mesa_server::api::build_app(state);
    let response = app
        .oneshot(webhook_request(serde_json::json!({
            "orderId": "WA-2024-001",
            "customerPhone": "11999999999",
            "items": [{"menuItemId": item.id.unwrap().to_string(), "quantity": 2}],
            "timestamp": "2024-06-01T19:30:00Z"
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["orderId"], "WA-2024-001");
    assert_eq!(body["total"], 85.80);
}

#[tokio::test]
async fn unknown_item_returns_400_with_error_envelope() {
    let tmp = tempfile::tempdir().unwrap();
    let state = test_state(&tmp).await;

    let app = mesa_server::api::build_app(state);
    let response = app
        .oneshot(webhook_request(serde_json::json!({
            "orderId": "WA-2024-002",
            "customerPhone": "11999999999",
            "items": [{"menuItemId": "menu_items:nope", "quantity": 1}],
            "timestamp": "2024-06-01T19:30:00Z"
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("menu_items:nope"));
}

#[tokio::test]
async fn missing_required_field_returns_400_with_error_envelope() {
    let tmp = tempfile::tempdir().unwrap();
    let state = test_state(&tmp).await;

    // No customerPhone: must still be the 400 JSON envelope, not an
    // extractor rejection
    let app = mesa_server::api::build_app(state);
    let response = app
        .oneshot(webhook_request(serde_json::json!({
            "orderId": "WA-2024-003",
            "items": [{"menuItemId": "menu_items:burger", "quantity": 1}],
            "timestamp": "2024-06-01T19:30:00Z"
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("customerPhone"));
}

#[tokio::test]
async fn malformed_json_returns_400_with_error_envelope() {
    let tmp = tempfile::tempdir().unwrap();
    let state = test_state(&tmp).await;

    let app = mesa_server::api::build_app(state);
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/webhook/whatsapp")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("Invalid payload"));
}

#[tokio::test]
async fn wrong_method_returns_405() {
    let tmp = tempfile::tempdir().unwrap();
    let state = test_state(&tmp).await;

    let app = mesa_server::api::build_app(state);
    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/webhook/whatsapp")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}
