//! Order API 模块

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::submit))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/advance", post(handler::advance))
        .route("/{id}/cancel", post(handler::cancel))
        .route("/{id}/items/{item_id}/status", put(handler::update_item_status))
}
