//! Repository Module
//!
//! CRUD accessors over the embedded SurrealDB store, one repository per
//! collection.

pub mod menu_item;
pub mod order;
pub mod payment;
pub mod seat;
pub mod table;

// Re-exports
pub use menu_item::MenuItemRepository;
pub use order::{OrderListFilter, OrderRepository};
pub use payment::PaymentRepository;
pub use seat::SeatRepository;
pub use table::TableRepository;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        let msg = err.to_string();
        // Unique index violations surface as plain query errors
        // ("Database index `...` already contains ...")
        if msg.contains("already contains") {
            RepoError::Duplicate(msg)
        } else {
            RepoError::Database(msg)
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

// =============================================================================
// ID convention: "collection:key" strings everywhere outside the store.
//
// Use surrealdb::RecordId for all ids:
//   - parse:  let id: RecordId = "tables:abc".parse()?;
//   - build:  RecordId::from_table_key("tables", "abc")
//   - key:    id.key().to_string()
//   - CRUD:   db.select(id) / db.delete(id) take a RecordId directly
// =============================================================================

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }

    /// Parse an external id string into a RecordId
    pub fn parse_id(&self, id: &str) -> RepoResult<surrealdb::RecordId> {
        id.parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))
    }
}
