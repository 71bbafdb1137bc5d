//! Table/Seat Lifecycle
//!
//! Occupy/free transitions for a table and join/leave transitions for
//! seats within an occupied table. The table row is the mutual
//! exclusion point: occupying goes through a compare-and-swap, seat
//! numbers come from a server-side atomic counter, and a failed join
//! rolls its occupancy back so no residual state is left behind.
//!
//! Invariant preserved by every operation here: a table is occupied iff
//! it carries a session id, and a table with live seats is never
//! reported available.

use serde::Serialize;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use tracing::{info, warn};

use crate::db::models::{Seat, SeatCreate, Table};
use crate::db::repository::{SeatRepository, TableRepository};
use crate::utils::{AppError, AppResult};

/// Result of a successful join
#[derive(Debug, Clone, Serialize)]
pub struct JoinOutcome {
    pub table: Table,
    pub seat: Seat,
    pub session_id: String,
}

#[derive(Clone)]
pub struct LifecycleService {
    tables: TableRepository,
    seats: SeatRepository,
}

impl LifecycleService {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            tables: TableRepository::new(db.clone()),
            seats: SeatRepository::new(db),
        }
    }

    /// Join via the guest-facing url token
    pub async fn join_by_token(
        &self,
        token: &str,
        guest_name: Option<String>,
        device_id: String,
    ) -> AppResult<JoinOutcome> {
        let table = self
            .tables
            .find_by_token(token)
            .await?
            .ok_or_else(|| AppError::NotFound("Table not found".to_string()))?;
        let table_id = table
            .id
            .as_ref()
            .ok_or_else(|| AppError::Internal("table row without id".to_string()))?
            .to_string();
        self.join_table(&table_id, guest_name, device_id).await
    }

    /// Join a table: first guest occupies it, later guests attach to
    /// the live session
    pub async fn join_table(
        &self,
        table_id: &str,
        guest_name: Option<String>,
        device_id: String,
    ) -> AppResult<JoinOutcome> {
        let table = self
            .tables
            .find_by_id(table_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Table {} not found", table_id)))?;
        let record_id = table
            .id
            .clone()
            .ok_or_else(|| AppError::Internal("table row without id".to_string()))?;

        // Try to take the table. Exactly one device wins a free table;
        // everyone else attaches to whatever session the winner opened.
        let candidate = shared::util::session_id(&record_id.key().to_string());
        let (table, session_id, occupied_here) =
            match self.tables.occupy_if_free(&record_id, &candidate).await? {
                Some(updated) => {
                    info!(table = %record_id, session_id = %candidate, "Table occupied");
                    (updated, candidate, true)
                }
                None => {
                    // Lost the CAS (or the table was already occupied):
                    // re-read and join the existing session.
                    let current = self
                        .tables
                        .find_by_id(table_id)
                        .await?
                        .ok_or_else(|| AppError::NotFound(format!("Table {} not found", table_id)))?;
                    match current.session_id.clone() {
                        Some(existing) => (current, existing, false),
                        // Closed between the CAS and the re-read.
                        None => {
                            return Err(AppError::Conflict(
                                "Table state changed during join, try again".to_string(),
                            ));
                        }
                    }
                }
            };

        // Server-assigned seat number: atomic counter, no re-fetch of
        // the seat list, no duplicate numbers under concurrent joins.
        let seat_number = match self.tables.next_seat_number(&record_id, &session_id).await? {
            Some(n) => n,
            None => {
                if occupied_here {
                    self.rollback_occupancy(&record_id, &session_id).await;
                }
                return Err(AppError::Conflict(
                    "Table state changed during join, try again".to_string(),
                ));
            }
        };

        let seat = match self
            .seats
            .create(SeatCreate {
                table: record_id.clone(),
                seat_number,
                guest_name,
                device_id,
            })
            .await
        {
            Ok(seat) => seat,
            Err(e) => {
                // Seat creation failed after the table write succeeded:
                // compensate so the table is not left occupied by a
                // session with no guests.
                if occupied_here {
                    self.rollback_occupancy(&record_id, &session_id).await;
                }
                return Err(e.into());
            }
        };

        info!(
            table = %record_id,
            seat_number,
            session_id = %session_id,
            "Guest joined table"
        );

        Ok(JoinOutcome {
            table,
            seat,
            session_id,
        })
    }

    /// Free a table and remove all its seats
    ///
    /// The only way a table returns to "available"; called after a
    /// successful full or split payment. Idempotent: closing a closed
    /// table succeeds and leaves zero seats.
    pub async fn close_table(&self, table_id: &str) -> AppResult<Table> {
        let table = self
            .tables
            .find_by_id(table_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Table {} not found", table_id)))?;
        let record_id = table
            .id
            .clone()
            .ok_or_else(|| AppError::Internal("table row without id".to_string()))?;

        // Seats first: a table must never read as available while
        // seats still reference it.
        self.seats.delete_by_table(&record_id).await?;
        let released = self.tables.release(&record_id).await?;

        info!(table = %record_id, "Table closed");
        Ok(released)
    }

    /// Remove one guest's seat
    ///
    /// The table stays occupied even when the last seat leaves;
    /// `close_table` is the only release path.
    pub async fn leave_seat(&self, seat_id: &str) -> AppResult<bool> {
        let removed = self.seats.delete(seat_id).await?;
        if removed {
            info!(seat = %seat_id, "Seat left table");
        }
        Ok(removed)
    }

    async fn rollback_occupancy(&self, record_id: &surrealdb::RecordId, session_id: &str) {
        match self.tables.release_if_session(record_id, session_id).await {
            Ok(true) => {
                info!(table = %record_id, "Rolled back table occupancy after failed join");
            }
            Ok(false) => {}
            Err(e) => {
                // The table stays occupied by a guestless session until
                // an admin closes it; reconciliation on next close.
                warn!(table = %record_id, error = %e, "Failed to roll back table occupancy");
            }
        }
    }
}
