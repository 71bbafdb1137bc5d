//! Order Model (unified)
//!
//! One entity for both channels: table orders carry table/seat
//! references, WhatsApp orders carry customer contact fields plus
//! inline delivery/payment fields. The `origin` discriminant replaces
//! structural checks on the presence of a phone number.

use super::menu_item::{MenuItem, ModifierOption};
use super::serde_helpers;
use serde::{Deserialize, Serialize};
use shared::status::{ItemStatus, OrderOrigin, OrderStatus, PaymentMethod, PaymentStatus};
use surrealdb::RecordId;

/// The concrete choices made for one modifier group, copied by value
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SelectedModifier {
    pub modifier_id: String,
    pub modifier_name: String,
    pub options: Vec<ModifierOption>,
}

/// One order line
///
/// `snapshot` is a deep copy of the menu item as it existed at order
/// time; the line price is only ever recomputed from it, so later menu
/// edits cannot change historical orders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: String,
    /// The live menu item this line referenced ("menu_items:key")
    pub menu_item: String,
    pub snapshot: MenuItem,
    pub quantity: i32,
    #[serde(default)]
    pub selected_modifiers: Vec<SelectedModifier>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Free-text customizations (WhatsApp channel)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub customizations: Vec<String>,
    /// Per-item fulfillment status, independent of the parent order
    #[serde(default)]
    pub status: ItemStatus,
    /// Line total, computed once from the snapshot
    pub line_total: f64,
}

/// Order entity
///
/// The item list is immutable after creation; only `status`, per-item
/// statuses and the inline payment fields mutate. Orders are never
/// deleted — they form the append-only history used for reporting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    #[serde(default)]
    pub origin: OrderOrigin,

    // === Table channel ===
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub table: Option<RecordId>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub seat: Option<RecordId>,

    // === WhatsApp channel ===
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_address: Option<String>,
    /// Caller-supplied external order id (unique per ingestion)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_ref: Option<String>,

    pub items: Vec<OrderItem>,
    pub subtotal: f64,
    #[serde(default)]
    pub delivery_fee: f64,
    pub total: f64,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<PaymentMethod>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_status: Option<PaymentStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Order {
    /// Find an item by its line id
    pub fn item(&self, item_id: &str) -> Option<&OrderItem> {
        self.items.iter().find(|i| i.id == item_id)
    }
}
