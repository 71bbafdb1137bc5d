//! Dining Table API 模块

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/tables", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
        .route("/{id}/seats", get(handler::list_seats))
        .route("/{id}/bill", get(handler::bill))
        .route("/{id}/close", post(handler::close))
        .route("/by-token/{token}", get(handler::get_by_token))
        .route("/by-token/{token}/join", post(handler::join))
}
