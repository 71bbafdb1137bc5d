//! Seat API 模块

mod handler;

use axum::{Router, routing::delete};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/seats", routes())
}

fn routes() -> Router<ServerState> {
    Router::new().route("/{id}", delete(handler::leave))
}
