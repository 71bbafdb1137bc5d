//! Dining Table Repository
//!
//! Besides plain CRUD this owns the two conditional writes the
//! lifecycle depends on: the occupancy compare-and-swap and the atomic
//! seat counter. Both are single UPDATE statements so two devices
//! racing for the same table cannot interleave.

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{Table, TableCreate, TableUpdate};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const TABLE: &str = "tables";

#[derive(Clone)]
pub struct TableRepository {
    base: BaseRepository,
}

impl TableRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all tables ordered by display number
    pub async fn find_all(&self) -> RepoResult<Vec<Table>> {
        let tables: Vec<Table> = self
            .base
            .db()
            .query("SELECT * FROM tables ORDER BY number")
            .await?
            .take(0)?;
        Ok(tables)
    }

    /// Find table by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Table>> {
        let thing = self.base.parse_id(id)?;
        let table: Option<Table> = self.base.db().select(thing).await?;
        Ok(table)
    }

    /// Resolve the guest-facing url token to a table
    pub async fn find_by_token(&self, token: &str) -> RepoResult<Option<Table>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM tables WHERE token = $tok LIMIT 1")
            .bind(("tok", token.to_string()))
            .await?;
        let tables: Vec<Table> = result.take(0)?;
        Ok(tables.into_iter().next())
    }

    /// Find table by display number
    pub async fn find_by_number(&self, number: i32) -> RepoResult<Option<Table>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM tables WHERE number = $number LIMIT 1")
            .bind(("number", number))
            .await?;
        let tables: Vec<Table> = result.take(0)?;
        Ok(tables.into_iter().next())
    }

    /// Create a new table with a freshly generated routing token
    pub async fn create(&self, data: TableCreate) -> RepoResult<Table> {
        if self.find_by_number(data.number).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Table number {} already exists",
                data.number
            )));
        }

        let table = Table {
            id: None,
            number: data.number,
            token: uuid::Uuid::new_v4().simple().to_string(),
            capacity: data.capacity.unwrap_or(4),
            is_occupied: false,
            session_id: None,
            seat_counter: 0,
            created_at: shared::util::now_millis(),
        };

        let created: Option<Table> = self.base.db().create(TABLE).content(table).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create table".to_string()))
    }

    /// Update display number / capacity (token and occupancy are not
    /// reachable from here)
    pub async fn update(&self, id: &str, data: TableUpdate) -> RepoResult<Table> {
        let thing = self.base.parse_id(id)?;
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Table {} not found", id)))?;

        if let Some(number) = data.number
            && number != existing.number
            && self.find_by_number(number).await?.is_some()
        {
            return Err(RepoError::Duplicate(format!(
                "Table number {} already exists",
                number
            )));
        }

        let number = data.number.unwrap_or(existing.number);
        let capacity = data.capacity.unwrap_or(existing.capacity);

        let mut result = self
            .base
            .db()
            .query("UPDATE $thing SET number = $number, capacity = $capacity RETURN AFTER")
            .bind(("thing", thing))
            .bind(("number", number))
            .bind(("capacity", capacity))
            .await?;
        let tables: Vec<Table> = result.take(0)?;
        tables
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::Database("Failed to update table".to_string()))
    }

    /// Delete a table
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let thing = self.base.parse_id(id)?;
        let deleted: Option<Table> = self.base.db().delete(thing).await?;
        Ok(deleted.is_some())
    }

    /// Occupy the table iff it is currently free (compare-and-swap)
    ///
    /// Returns the updated row when this call won the table, `None`
    /// when another session already holds it. Single conditional
    /// UPDATE, never an unconditional write.
    pub async fn occupy_if_free(
        &self,
        id: &RecordId,
        session_id: &str,
    ) -> RepoResult<Option<Table>> {
        let mut result = self
            .base
            .db()
            .query(
                "UPDATE $thing SET is_occupied = true, session_id = $sid \
                 WHERE is_occupied = false RETURN AFTER",
            )
            .bind(("thing", id.clone()))
            .bind(("sid", session_id.to_string()))
            .await?;
        let tables: Vec<Table> = result.take(0)?;
        Ok(tables.into_iter().next())
    }

    /// Allocate the next seat number for the given live session
    ///
    /// Atomic increment of the per-table counter; returns `None` when
    /// the table no longer carries this session (closed mid-join).
    pub async fn next_seat_number(
        &self,
        id: &RecordId,
        session_id: &str,
    ) -> RepoResult<Option<i32>> {
        let mut result = self
            .base
            .db()
            .query(
                "UPDATE $thing SET seat_counter += 1 \
                 WHERE session_id = $sid RETURN AFTER",
            )
            .bind(("thing", id.clone()))
            .bind(("sid", session_id.to_string()))
            .await?;
        let tables: Vec<Table> = result.take(0)?;
        Ok(tables.into_iter().next().map(|t| t.seat_counter))
    }

    /// Unconditionally clear occupancy and reset the seat counter
    pub async fn release(&self, id: &RecordId) -> RepoResult<Table> {
        let mut result = self
            .base
            .db()
            .query(
                "UPDATE $thing SET is_occupied = false, session_id = NONE, \
                 seat_counter = 0 RETURN AFTER",
            )
            .bind(("thing", id.clone()))
            .await?;
        let tables: Vec<Table> = result.take(0)?;
        tables
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Table {} not found", id)))
    }

    /// Clear occupancy only while the table still carries `session_id`
    ///
    /// Compensating rollback for a failed join: a no-op when someone
    /// else's session holds the table.
    pub async fn release_if_session(&self, id: &RecordId, session_id: &str) -> RepoResult<bool> {
        let mut result = self
            .base
            .db()
            .query(
                "UPDATE $thing SET is_occupied = false, session_id = NONE, \
                 seat_counter = 0 WHERE session_id = $sid RETURN AFTER",
            )
            .bind(("thing", id.clone()))
            .bind(("sid", session_id.to_string()))
            .await?;
        let tables: Vec<Table> = result.take(0)?;
        Ok(!tables.is_empty())
    }
}
