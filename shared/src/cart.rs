//! Cart input shapes
//!
//! What a client sends when submitting a cart. Lines reference menu
//! items and modifier options by id only; the server resolves them
//! against the live menu and snapshots the result into the order, so a
//! cart never carries prices of its own.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Chosen options for one modifier group
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModifierSelection {
    pub modifier_id: String,
    pub option_ids: Vec<String>,
}

/// One cart line
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CartLine {
    #[validate(length(min = 1, message = "menu_item_id is required"))]
    pub menu_item_id: String,
    #[validate(range(min = 1, message = "quantity must be at least 1"))]
    pub quantity: i32,
    #[serde(default)]
    pub selections: Vec<ModifierSelection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}
