//! Order status vocabulary and transition rules
//!
//! One status enum and one transition validator shared by every
//! consumer (client app, kitchen display, admin dashboard, WhatsApp
//! channel). The kitchen and admin views mutate order status through
//! the same chain, so the legality check lives here and nowhere else.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Transition rejected by the status state machine
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("order is in terminal status {0}")]
    Terminal(OrderStatus),

    #[error("illegal transition {from} -> {to}")]
    Illegal { from: OrderStatus, to: OrderStatus },

    #[error("illegal item transition {from} -> {to}")]
    IllegalItem { from: ItemStatus, to: ItemStatus },
}

// ============================================================================
// Order status
// ============================================================================

/// Order lifecycle status
///
/// Strict forward chain `pending -> confirmed -> preparing -> ready ->
/// delivered` with a single side exit `pending -> cancelled`. Once the
/// kitchen has accepted an order (confirmed) it can no longer be
/// cancelled.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Confirmed,
    Preparing,
    Ready,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// The single legal successor along the forward chain
    ///
    /// `None` for terminal states. Cancellation is not a successor; it
    /// is only reachable through [`OrderStatus::can_transition`].
    pub fn next(&self) -> Option<OrderStatus> {
        match self {
            OrderStatus::Pending => Some(OrderStatus::Confirmed),
            OrderStatus::Confirmed => Some(OrderStatus::Preparing),
            OrderStatus::Preparing => Some(OrderStatus::Ready),
            OrderStatus::Ready => Some(OrderStatus::Delivered),
            OrderStatus::Delivered | OrderStatus::Cancelled => None,
        }
    }

    /// Whether no further transition is allowed
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    /// Validate a transition to `to`
    pub fn can_transition(&self, to: OrderStatus) -> Result<(), TransitionError> {
        if self.is_terminal() {
            return Err(TransitionError::Terminal(*self));
        }
        if to == OrderStatus::Cancelled {
            // Only an unaccepted order may be cancelled
            return if *self == OrderStatus::Pending {
                Ok(())
            } else {
                Err(TransitionError::Illegal { from: *self, to })
            };
        }
        if self.next() == Some(to) {
            Ok(())
        } else {
            Err(TransitionError::Illegal { from: *self, to })
        }
    }

    /// Advance along the forward chain
    pub fn advance(&self) -> Result<OrderStatus, TransitionError> {
        self.next().ok_or(TransitionError::Terminal(*self))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Ready => "ready",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Per-item status
// ============================================================================

/// Fulfillment status of one order line
///
/// Nested state machine independent of the parent order, used to show
/// partial kitchen progress (appetizer ready while the entrée is still
/// preparing). Same value domain as [`OrderStatus`] minus
/// confirmed/cancelled.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    #[default]
    Pending,
    Preparing,
    Ready,
    Delivered,
}

impl ItemStatus {
    fn rank(&self) -> u8 {
        match self {
            ItemStatus::Pending => 0,
            ItemStatus::Preparing => 1,
            ItemStatus::Ready => 2,
            ItemStatus::Delivered => 3,
        }
    }

    /// Validate a forward-only transition to `to`
    pub fn can_transition(&self, to: ItemStatus) -> Result<(), TransitionError> {
        if to.rank() > self.rank() {
            Ok(())
        } else {
            Err(TransitionError::IllegalItem { from: *self, to })
        }
    }
}

impl std::fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ItemStatus::Pending => "pending",
            ItemStatus::Preparing => "preparing",
            ItemStatus::Ready => "ready",
            ItemStatus::Delivered => "delivered",
        };
        f.write_str(s)
    }
}

// ============================================================================
// Order origin
// ============================================================================

/// Which channel an order came from
///
/// Tagged discriminant instead of structural checks on the presence of
/// a customer phone field. Table orders carry table/seat references;
/// WhatsApp orders carry customer contact fields.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderOrigin {
    #[default]
    Table,
    Whatsapp,
}

// ============================================================================
// Payments
// ============================================================================

/// Declared payment method (recorded only, no gateway integration)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Cash,
    Card,
    Pix,
}

/// Payment record status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Completed,
    Failed,
}
