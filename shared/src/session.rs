//! Guest session context
//!
//! A guest's locally persisted identity, threaded explicitly through
//! session resolution instead of being read from ambient storage. The
//! server never stores a session row; it only ever sees table and seat
//! records, so the context is whatever the client saved after joining.

use serde::{Deserialize, Serialize};

/// The identifiers a client device holds for its current table session
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct SessionContext {
    /// Stable identifier of the browser/device
    pub device_id: String,
    /// Table the client believes it is seated at
    pub table_id: Option<String>,
    /// Session the table carried when the client joined
    pub session_id: Option<String>,
    /// The client's own seat
    pub seat_id: Option<String>,
    /// Display name chosen at join time
    pub guest_name: Option<String>,
}

impl SessionContext {
    /// Whether the context carries a complete (table, session, seat) tuple
    pub fn is_complete(&self) -> bool {
        self.table_id.is_some() && self.session_id.is_some() && self.seat_id.is_some()
    }

    /// Wipe the four session identifiers, keeping the device id
    ///
    /// Idempotent: clearing an already-cleared context is a no-op.
    pub fn clear(&mut self) {
        self.table_id = None;
        self.session_id = None;
        self.seat_id = None;
        self.guest_name = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_is_idempotent() {
        let mut ctx = SessionContext {
            device_id: "dev-1".into(),
            table_id: Some("tables:a".into()),
            session_id: Some("s-1".into()),
            seat_id: Some("seats:b".into()),
            guest_name: Some("Ana".into()),
        };
        assert!(ctx.is_complete());

        ctx.clear();
        let cleared = ctx.clone();
        ctx.clear();
        assert_eq!(ctx, cleared);
        assert!(!ctx.is_complete());
        assert_eq!(ctx.device_id, "dev-1");
    }
}
