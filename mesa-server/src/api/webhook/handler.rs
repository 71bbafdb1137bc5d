//! Webhook API Handlers
//!
//! 对外回包格式由自动化侧 (n8n 流程) 约定，不走统一错误信封：
//! 成功 `200 {success, orderId, total}`，失败 `400/500 {success, error}`。
//! 请求体手动反序列化：`Json` 提取器的拒绝 (缺字段 422、坏 JSON 纯文本)
//! 会绕过该信封，所以语法错误和数据错误都在这里统一映射为
//! `400 {success:false, error}`。

use axum::{Json, body::Bytes, extract::State, http::StatusCode};
use shared::webhook::{WebhookResponse, WhatsAppWebhookPayload};
use tracing::warn;

use crate::core::ServerState;
use crate::utils::AppError;

/// POST /api/webhook/whatsapp - WhatsApp 订单入口
pub async fn whatsapp(
    State(state): State<ServerState>,
    body: Bytes,
) -> (StatusCode, Json<WebhookResponse>) {
    let payload: WhatsAppWebhookPayload = match serde_json::from_slice(&body) {
        Ok(payload) => payload,
        Err(err) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(WebhookResponse::err(format!("Invalid payload: {}", err))),
            );
        }
    };

    let external_ref = payload.order_id.clone();
    match state.whatsapp().ingest(payload).await {
        Ok(order) => (
            StatusCode::OK,
            Json(WebhookResponse::ok(external_ref, order.total)),
        ),
        Err(err) => {
            let status = match &err {
                AppError::Database(_) | AppError::Internal(_) => {
                    warn!(external_ref = %external_ref, error = %err, "Webhook ingestion failed");
                    StatusCode::INTERNAL_SERVER_ERROR
                }
                // Validation, duplicates, unknown items: caller error
                _ => StatusCode::BAD_REQUEST,
            };
            (status, Json(WebhookResponse::err(err.to_string())))
        }
    }
}
