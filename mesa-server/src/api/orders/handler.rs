//! Order API Handlers
//!
//! 列表接口服务于厨房显示屏和后台看板的轮询；状态迁移的合法性由
//! shared::status 统一校验，这里只负责编排。

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use shared::status::{ItemStatus, OrderOrigin, OrderStatus};

use crate::core::ServerState;
use crate::db::models::Order;
use crate::db::repository::OrderListFilter;
use crate::orders::SubmitOrder;
use crate::utils::{AppError, AppResult};

/// GET /api/orders query parameters
#[derive(Debug, Deserialize, Default)]
pub struct ListQuery {
    #[serde(default)]
    pub status: Option<OrderStatus>,
    #[serde(default)]
    pub origin: Option<OrderOrigin>,
    /// "tables:key" 形式的桌台 id
    #[serde(default)]
    pub table: Option<String>,
    /// 仅返回仍需厨房处理的订单
    #[serde(default)]
    pub active: Option<bool>,
    #[serde(default)]
    pub limit: Option<usize>,
    #[serde(default)]
    pub offset: Option<usize>,
}

/// PUT /api/orders/:id/items/:item_id/status request body
#[derive(Debug, Deserialize)]
pub struct ItemStatusUpdate {
    pub status: ItemStatus,
}

/// GET /api/orders - 订单列表 (轮询端点)
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Order>>> {
    let table = match query.table {
        Some(raw) => Some(
            raw.parse()
                .map_err(|_| AppError::Validation(format!("Invalid table id: {}", raw)))?,
        ),
        None => None,
    };

    let filter = OrderListFilter {
        status: query.status,
        origin: query.origin,
        table,
        active: query.active.unwrap_or(false),
        limit: query.limit.unwrap_or(0),
        offset: query.offset.unwrap_or(0),
    };
    Ok(Json(state.orders().list(filter).await?))
}

/// GET /api/orders/:id - 获取单个订单
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Order>> {
    Ok(Json(state.orders().get(&id).await?))
}

/// POST /api/orders - 提交购物车
pub async fn submit(
    State(state): State<ServerState>,
    Json(payload): Json<SubmitOrder>,
) -> AppResult<Json<Order>> {
    Ok(Json(state.orders().submit(payload).await?))
}

/// POST /api/orders/:id/advance - 订单状态前进一步
pub async fn advance(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Order>> {
    Ok(Json(state.orders().advance(&id).await?))
}

/// POST /api/orders/:id/cancel - 取消待确认订单
pub async fn cancel(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Order>> {
    Ok(Json(state.orders().cancel(&id).await?))
}

/// PUT /api/orders/:id/items/:item_id/status - 单品状态推进
pub async fn update_item_status(
    State(state): State<ServerState>,
    Path((id, item_id)): Path<(String, String)>,
    Json(payload): Json<ItemStatusUpdate>,
) -> AppResult<Json<Order>> {
    Ok(Json(
        state
            .orders()
            .update_item_status(&id, &item_id, payload.status)
            .await?,
    ))
}
