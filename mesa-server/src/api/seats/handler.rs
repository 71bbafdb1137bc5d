//! Seat API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::utils::{AppError, AppResult};

/// DELETE /api/seats/:id - 离座
///
/// 只移除座位，永远不会释放桌台；关台走 /api/tables/:id/close。
pub async fn leave(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let removed = state.lifecycle().leave_seat(&id).await?;
    if !removed {
        return Err(AppError::NotFound(format!("Seat {} not found", id)));
    }
    Ok(Json(true))
}
