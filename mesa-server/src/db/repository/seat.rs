//! Seat Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{Seat, SeatCreate};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const TABLE: &str = "seats";

#[derive(Clone)]
pub struct SeatRepository {
    base: BaseRepository,
}

impl SeatRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// All seats, join order
    pub async fn find_all(&self) -> RepoResult<Vec<Seat>> {
        let seats: Vec<Seat> = self
            .base
            .db()
            .query("SELECT * FROM seats ORDER BY joined_at")
            .await?
            .take(0)?;
        Ok(seats)
    }

    /// Seats of one table, in seat-number order
    pub async fn find_by_table(&self, table: &RecordId) -> RepoResult<Vec<Seat>> {
        let seats: Vec<Seat> = self
            .base
            .db()
            .query("SELECT * FROM seats WHERE table = $table ORDER BY seat_number")
            .bind(("table", table.clone()))
            .await?
            .take(0)?;
        Ok(seats)
    }

    /// Find seat by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Seat>> {
        let thing = self.base.parse_id(id)?;
        let seat: Option<Seat> = self.base.db().select(thing).await?;
        Ok(seat)
    }

    /// Create a seat (called by the lifecycle service after the seat
    /// number was allocated)
    pub async fn create(&self, data: SeatCreate) -> RepoResult<Seat> {
        let seat = Seat {
            id: None,
            table: data.table,
            seat_number: data.seat_number,
            guest_name: data.guest_name,
            device_id: data.device_id,
            joined_at: shared::util::now_millis(),
        };

        let created: Option<Seat> = self.base.db().create(TABLE).content(seat).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create seat".to_string()))
    }

    /// Delete one seat
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let thing = self.base.parse_id(id)?;
        let deleted: Option<Seat> = self.base.db().delete(thing).await?;
        Ok(deleted.is_some())
    }

    /// Remove every seat bound to a table (close-table cascade)
    pub async fn delete_by_table(&self, table: &RecordId) -> RepoResult<()> {
        self.base
            .db()
            .query("DELETE seats WHERE table = $table")
            .bind(("table", table.clone()))
            .await?;
        Ok(())
    }
}
