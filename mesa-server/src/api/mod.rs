//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`tables`] - 桌台管理接口 (含加入/关台/账单)
//! - [`seats`] - 座位接口
//! - [`menu_items`] - 菜单管理接口
//! - [`orders`] - 订单管理接口
//! - [`payments`] - 支付记录接口
//! - [`session`] - 会话解析接口
//! - [`webhook`] - WhatsApp 订单入口

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::core::ServerState;

pub mod health;
pub mod menu_items;
pub mod orders;
pub mod payments;
pub mod seats;
pub mod session;
pub mod tables;
pub mod webhook;

// Re-export common types for handlers
pub use crate::utils::{AppResponse, AppResult};

/// Build a router with all routes registered (no middleware, no state)
pub fn build_router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(tables::router())
        .merge(seats::router())
        .merge(menu_items::router())
        .merge(orders::router())
        .merge(payments::router())
        .merge(session::router())
        .merge(webhook::router())
}

/// Build a fully configured application with all middleware and state
pub fn build_app(state: ServerState) -> Router {
    build_router()
        // CORS - the guest PWA and the n8n flow call from other origins
        .layer(CorsLayer::permissive())
        // Trace - request tracing (logs at INFO level)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
