//! Session API 模块

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/session", routes())
}

fn routes() -> Router<ServerState> {
    Router::new().route("/resolve", post(handler::resolve))
}
