//! Session API Handlers

use axum::{Json, extract::State};
use shared::session::SessionContext;

use crate::core::ServerState;
use crate::db::repository::{SeatRepository, TableRepository};
use crate::session::SessionResolution;
use crate::utils::AppResult;

/// POST /api/session/resolve - 解析客户端本地会话
///
/// 客户端重新打开页面时上报本地存储的 (table, session, seat) 三元组，
/// 服务端对照当前桌台/座位记录给出结论。解析永不报错，只会降级。
pub async fn resolve(
    State(state): State<ServerState>,
    Json(ctx): Json<SessionContext>,
) -> AppResult<Json<SessionResolution>> {
    let tables = TableRepository::new(state.db.clone()).find_all().await?;
    let seats = SeatRepository::new(state.db.clone()).find_all().await?;
    Ok(Json(crate::session::resolve(&ctx, &tables, &seats)))
}
