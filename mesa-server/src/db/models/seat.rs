//! Seat Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// One guest's presence at an occupied table
///
/// Seats live for the duration of one dining session; closing the
/// table removes them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Seat {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    /// Owning table
    #[serde(with = "serde_helpers::record_id")]
    pub table: RecordId,
    /// Server-assigned sequence number within the session
    pub seat_number: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guest_name: Option<String>,
    /// Identifies a returning browser/device
    pub device_id: String,
    pub joined_at: i64,
}

/// Create seat payload (internal, built by the lifecycle service)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeatCreate {
    #[serde(with = "serde_helpers::record_id")]
    pub table: RecordId,
    pub seat_number: i32,
    pub guest_name: Option<String>,
    pub device_id: String,
}
