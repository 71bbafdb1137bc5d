//! Shared types for the Mesa ordering platform
//!
//! Common vocabulary used by the server and every consumer of its API
//! (client app, kitchen display, admin dashboard): the order status
//! state machine, session context, webhook payload shapes, and small
//! time/id helpers.

pub mod cart;
pub mod session;
pub mod status;
pub mod util;
pub mod webhook;

// Re-exports
pub use serde::{Deserialize, Serialize};
pub use cart::{CartLine, ModifierSelection};
pub use session::SessionContext;
pub use status::{ItemStatus, OrderOrigin, OrderStatus, PaymentMethod, PaymentStatus};
pub use webhook::{WebhookItem, WebhookResponse, WhatsAppWebhookPayload};
