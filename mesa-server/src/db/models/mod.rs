//! Database models
//!
//! Persisted row shapes for the five collections (tables, seats,
//! menu_items, orders, payments). Status enums come from `shared` so
//! every consumer speaks the same vocabulary.

pub mod menu_item;
pub mod order;
pub mod payment;
pub mod seat;
pub mod serde_helpers;
pub mod table;

pub use menu_item::{MenuItem, MenuItemCreate, MenuItemUpdate, Modifier, ModifierKind, ModifierOption};
pub use order::{Order, OrderItem, SelectedModifier};
pub use payment::{Payment, PaymentCreate};
pub use seat::{Seat, SeatCreate};
pub use table::{Table, TableCreate, TableUpdate};
