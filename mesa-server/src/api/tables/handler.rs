//! Dining Table API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;

use crate::billing::TableBill;
use crate::core::ServerState;
use crate::db::models::{Seat, Table, TableCreate, TableUpdate};
use crate::db::repository::{SeatRepository, TableRepository};
use crate::lifecycle::JoinOutcome;
use crate::utils::{AppError, AppResult};

/// POST /api/tables/by-token/:token/join request body
#[derive(Debug, Deserialize)]
pub struct JoinRequest {
    #[serde(default)]
    pub guest_name: Option<String>,
    pub device_id: String,
}

/// GET /api/tables - 获取所有桌台
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Table>>> {
    let repo = TableRepository::new(state.db.clone());
    Ok(Json(repo.find_all().await?))
}

/// GET /api/tables/:id - 获取单个桌台
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Table>> {
    let repo = TableRepository::new(state.db.clone());
    let table = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Table {} not found", id)))?;
    Ok(Json(table))
}

/// GET /api/tables/by-token/:token - 扫码入口解析桌台
pub async fn get_by_token(
    State(state): State<ServerState>,
    Path(token): Path<String>,
) -> AppResult<Json<Table>> {
    let repo = TableRepository::new(state.db.clone());
    let table = repo
        .find_by_token(&token)
        .await?
        .ok_or_else(|| AppError::NotFound("Table not found".to_string()))?;
    Ok(Json(table))
}

/// POST /api/tables - 创建桌台
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<TableCreate>,
) -> AppResult<Json<Table>> {
    let repo = TableRepository::new(state.db.clone());
    Ok(Json(repo.create(payload).await?))
}

/// PUT /api/tables/:id - 更新桌台
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<TableUpdate>,
) -> AppResult<Json<Table>> {
    let repo = TableRepository::new(state.db.clone());
    Ok(Json(repo.update(&id, payload).await?))
}

/// DELETE /api/tables/:id - 删除桌台
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = TableRepository::new(state.db.clone());
    let table = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Table {} not found", id)))?;
    if table.is_occupied {
        return Err(AppError::Conflict(
            "Cannot delete an occupied table".to_string(),
        ));
    }
    Ok(Json(repo.delete(&id).await?))
}

/// GET /api/tables/:id/seats - 当前座位列表
pub async fn list_seats(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<Seat>>> {
    let tables = TableRepository::new(state.db.clone());
    let table = tables
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Table {} not found", id)))?;
    let record_id = table
        .id
        .ok_or_else(|| AppError::Internal("table row without id".to_string()))?;
    let seats = SeatRepository::new(state.db.clone());
    Ok(Json(seats.find_by_table(&record_id).await?))
}

/// GET /api/tables/:id/bill - 当前账单
pub async fn bill(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<TableBill>> {
    Ok(Json(state.billing().table_bill(&id).await?))
}

/// POST /api/tables/by-token/:token/join - 加入桌台
pub async fn join(
    State(state): State<ServerState>,
    Path(token): Path<String>,
    Json(payload): Json<JoinRequest>,
) -> AppResult<Json<JoinOutcome>> {
    if payload.device_id.trim().is_empty() {
        return Err(AppError::Validation("device_id is required".to_string()));
    }
    let outcome = state
        .lifecycle()
        .join_by_token(&token, payload.guest_name, payload.device_id)
        .await?;
    Ok(Json(outcome))
}

/// POST /api/tables/:id/close - 关台结账
pub async fn close(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Table>> {
    Ok(Json(state.lifecycle().close_table(&id).await?))
}
