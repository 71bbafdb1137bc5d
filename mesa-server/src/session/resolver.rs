//! Session resolution
//!
//! Decides whether a client's locally persisted (table, session, seat)
//! tuple still identifies an active participant of a table, reconciled
//! against the authoritative records. Resolution never fails: it only
//! degrades, and it distinguishes "not loaded yet" from "confirmed
//! absent" so callers never flash an error before the first fetch.

use crate::db::models::{Seat, Table};
use serde::Serialize;
use shared::session::SessionContext;

/// Outcome of resolving a session context
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SessionResolution {
    /// Table records are not loaded yet — unknown, not invalid
    Loading,
    /// The client is an active participant
    Active { table: Table, seat: Seat },
    /// The stored tuple no longer matches reality; the client must
    /// clear its identifiers (clearing is idempotent on its side)
    Stale,
    /// No stored session, or the table does not exist
    NotInSession,
}

impl SessionResolution {
    pub fn is_active(&self) -> bool {
        matches!(self, SessionResolution::Active { .. })
    }
}

/// Resolve `ctx` against the current table/seat records
///
/// A matching session id validates the session even when the occupancy
/// flag disagrees — the flag may lag behind the session write and is
/// not the source of truth here.
pub fn resolve(ctx: &SessionContext, tables: &[Table], seats: &[Seat]) -> SessionResolution {
    // An empty table list means the first fetch has not completed;
    // callers must not declare "table not found" yet.
    if tables.is_empty() {
        return SessionResolution::Loading;
    }

    let (Some(table_id), Some(session_id)) = (&ctx.table_id, &ctx.session_id) else {
        return SessionResolution::NotInSession;
    };

    let Some(table) = tables
        .iter()
        .find(|t| t.id.as_ref().is_some_and(|id| &id.to_string() == table_id))
    else {
        return SessionResolution::NotInSession;
    };

    if table.session_id.as_deref() != Some(session_id.as_str()) {
        // The table moved on to another session (or none); the local
        // tuple is stale.
        return SessionResolution::Stale;
    }

    let seat = ctx.seat_id.as_ref().and_then(|seat_id| {
        seats
            .iter()
            .find(|s| s.id.as_ref().is_some_and(|id| &id.to_string() == seat_id))
    });

    match seat {
        Some(seat) => SessionResolution::Active {
            table: table.clone(),
            seat: seat.clone(),
        },
        // Session matches but the seat row is gone (removed while this
        // device was away) — treat as stale so the client re-joins.
        None => SessionResolution::Stale,
    }
}
