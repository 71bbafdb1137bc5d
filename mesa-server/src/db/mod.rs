//! Database Module
//!
//! Embedded SurrealDB (RocksDb engine). The logical schema is five
//! collections — tables, seats, menu_items, orders, payments — kept
//! schemaless except for the unique indexes defined at startup.

pub mod models;
pub mod repository;

use crate::utils::AppError;
use std::path::Path;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};

const NAMESPACE: &str = "mesa";
const DATABASE: &str = "mesa";

/// Open (or create) the embedded database at `path` and bootstrap the
/// schema
pub async fn open(path: &Path) -> Result<Surreal<Db>, AppError> {
    let db: Surreal<Db> = Surreal::new::<RocksDb>(path)
        .await
        .map_err(|e| AppError::Database(format!("Failed to open database: {}", e)))?;

    db.use_ns(NAMESPACE)
        .use_db(DATABASE)
        .await
        .map_err(|e| AppError::Database(format!("Failed to select namespace: {}", e)))?;

    bootstrap_schema(&db).await?;

    tracing::info!(path = %path.display(), "Database opened (embedded SurrealDB)");
    Ok(db)
}

/// Idempotent schema bootstrap
///
/// Unique indexes guard the identifiers the rest of the system assumes
/// are unique: the guest-facing routing token, the display number, and
/// the caller-supplied webhook order id. The last one is what makes
/// duplicate-delivery protection hold under concurrent ingestion; the
/// pre-check in the ingest service only exists for a friendlier
/// message. Records without an external_ref (table orders) are not
/// indexed, NONE values never collide.
async fn bootstrap_schema(db: &Surreal<Db>) -> Result<(), AppError> {
    db.query(
        "DEFINE INDEX IF NOT EXISTS uniq_tables_token ON TABLE tables COLUMNS token UNIQUE;
         DEFINE INDEX IF NOT EXISTS uniq_tables_number ON TABLE tables COLUMNS number UNIQUE;
         DEFINE INDEX IF NOT EXISTS uniq_orders_external_ref ON TABLE orders COLUMNS external_ref UNIQUE;",
    )
    .await
    .map_err(|e| AppError::Database(format!("Failed to bootstrap schema: {}", e)))?;
    Ok(())
}
