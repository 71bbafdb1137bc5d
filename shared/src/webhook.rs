//! WhatsApp webhook payload shapes
//!
//! The inbound contract is fixed by the automation side (n8n flow), so
//! the field names stay camelCase on the wire. Validation attributes
//! cover shape-level checks; menu existence/availability is checked by
//! the ingestion service against the store.

use crate::status::PaymentMethod;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// One line of an inbound WhatsApp order
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct WebhookItem {
    #[validate(length(min = 1, message = "menuItemId is required"))]
    pub menu_item_id: String,
    #[validate(range(min = 1, message = "quantity must be at least 1"))]
    pub quantity: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Free-text customizations forwarded verbatim to the kitchen
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub customizations: Vec<String>,
}

/// Inbound WhatsApp order payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct WhatsAppWebhookPayload {
    /// Caller-supplied unique order id (e.g. "WA-2024-001")
    #[validate(length(min = 1, message = "orderId is required"))]
    pub order_id: String,
    #[validate(length(min = 1, message = "customerPhone is required"))]
    pub customer_phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_address: Option<String>,
    #[validate(length(min = 1, message = "items must not be empty"))]
    #[validate(nested)]
    pub items: Vec<WebhookItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<PaymentMethod>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Per-payload delivery fee override; the system default applies
    /// when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_fee: Option<f64>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Webhook response envelope
///
/// `200 {success:true, orderId, total}` on success, `400/500
/// {success:false, error}` otherwise.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl WebhookResponse {
    pub fn ok(order_id: impl Into<String>, total: f64) -> Self {
        Self {
            success: true,
            order_id: Some(order_id.into()),
            total: Some(total),
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            order_id: None,
            total: None,
            error: Some(message.into()),
        }
    }
}
