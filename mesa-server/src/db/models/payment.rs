//! Payment Model
//!
//! Records a declared payment only — no gateway integration. A
//! full-table payment has no seat reference; a split payment is one
//! record per paying seat.

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use shared::status::{PaymentMethod, PaymentStatus};
use surrealdb::RecordId;

/// Payment entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    #[serde(with = "serde_helpers::record_id")]
    pub table: RecordId,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub seat: Option<RecordId>,
    pub amount: f64,
    pub method: PaymentMethod,
    #[serde(default)]
    pub status: PaymentStatus,
    pub created_at: i64,
}

/// Create payment payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentCreate {
    #[serde(with = "serde_helpers::record_id")]
    pub table: RecordId,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub seat: Option<RecordId>,
    pub amount: f64,
    pub method: PaymentMethod,
}
