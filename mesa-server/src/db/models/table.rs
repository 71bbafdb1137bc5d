//! Dining Table Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Dining table entity
///
/// Invariant: `is_occupied` is true iff `session_id` is set. The token
/// is the opaque secret embedded in the printed QR code url and never
/// changes after creation; regenerating it would invalidate printed
/// codes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Table {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    /// Human-facing table number (unique)
    pub number: i32,
    /// Secret routing token for the guest-facing url (unique, immutable)
    pub token: String,
    pub capacity: i32,
    #[serde(default, deserialize_with = "serde_helpers::bool_false")]
    pub is_occupied: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    /// Per-table monotonic counter backing server-assigned seat numbers
    #[serde(default)]
    pub seat_counter: i32,
    pub created_at: i64,
}

/// Create dining table payload (token is generated server-side)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableCreate {
    pub number: i32,
    pub capacity: Option<i32>,
}

/// Update dining table payload
///
/// The token and occupancy fields are deliberately absent: the token is
/// immutable and occupancy only changes through the lifecycle
/// operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<i32>,
}
