//! Payment API Handlers
//!
//! 只记录申报的支付方式和金额，没有网关集成。整单支付一条记录，
//! 分账支付每个座位一条。

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use shared::status::PaymentStatus;

use crate::core::ServerState;
use crate::db::models::{Payment, PaymentCreate};
use crate::db::repository::PaymentRepository;
use crate::utils::money;
use crate::utils::{AppError, AppResult};

/// GET /api/payments query parameters
#[derive(Debug, Deserialize, Default)]
pub struct ListQuery {
    /// "tables:key" 形式的桌台 id
    #[serde(default)]
    pub table: Option<String>,
}

/// PUT /api/payments/:id/status request body
#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: PaymentStatus,
}

/// GET /api/payments - 支付记录列表
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Payment>>> {
    let repo = PaymentRepository::new(state.db.clone());
    let payments = match query.table {
        Some(raw) => {
            let table = raw
                .parse()
                .map_err(|_| AppError::Validation(format!("Invalid table id: {}", raw)))?;
            repo.find_by_table(&table).await?
        }
        None => repo.find_all().await?,
    };
    Ok(Json(payments))
}

/// POST /api/payments - 记录一笔支付
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<PaymentCreate>,
) -> AppResult<Json<Payment>> {
    money::validate_price(payload.amount, "amount")?;
    if payload.amount <= 0.0 {
        return Err(AppError::Validation(
            "amount must be positive".to_string(),
        ));
    }
    let repo = PaymentRepository::new(state.db.clone());
    Ok(Json(repo.create(payload).await?))
}

/// PUT /api/payments/:id/status - 更新支付状态
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<StatusUpdate>,
) -> AppResult<Json<Payment>> {
    let repo = PaymentRepository::new(state.db.clone());
    Ok(Json(repo.update_status(&id, payload.status).await?))
}
