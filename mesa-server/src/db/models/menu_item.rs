//! Menu Item Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Modifier group kind
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ModifierKind {
    /// Exactly one option (e.g. meat doneness)
    Single,
    /// Any subset of options (e.g. extras)
    Multi,
}

/// One selectable, individually priced value of a modifier
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModifierOption {
    pub id: String,
    pub name: String,
    pub price: f64,
}

/// A named customization choice group attached to a menu item
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Modifier {
    pub id: String,
    pub name: String,
    pub kind: ModifierKind,
    #[serde(default, deserialize_with = "serde_helpers::bool_false")]
    pub required: bool,
    pub options: Vec<ModifierOption>,
}

/// Menu item entity
///
/// Orders embed a full copy of this struct as their snapshot, so every
/// field must round-trip through serde unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MenuItem {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    pub name: String,
    pub description: String,
    /// Decimal currency unit; computation happens on Decimal, storage on f64
    pub price: f64,
    /// Free-form grouping/filtering key
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(
        default = "default_true",
        deserialize_with = "serde_helpers::bool_true"
    )]
    pub is_available: bool,
    #[serde(default)]
    pub modifiers: Vec<Modifier>,
}

fn default_true() -> bool {
    true
}

impl MenuItem {
    /// Look up a modifier group by id
    pub fn modifier(&self, modifier_id: &str) -> Option<&Modifier> {
        self.modifiers.iter().find(|m| m.id == modifier_id)
    }
}

impl Modifier {
    /// Look up an option by id
    pub fn option(&self, option_id: &str) -> Option<&ModifierOption> {
        self.options.iter().find(|o| o.id == option_id)
    }
}

/// Create menu item payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItemCreate {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub image_url: Option<String>,
    pub is_available: Option<bool>,
    #[serde(default)]
    pub modifiers: Vec<Modifier>,
}

/// Update menu item payload
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MenuItemUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_available: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifiers: Option<Vec<Modifier>>,
}
