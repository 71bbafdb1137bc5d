//! Payment Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{Payment, PaymentCreate};
use shared::status::PaymentStatus;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const TABLE: &str = "payments";

#[derive(Clone)]
pub struct PaymentRepository {
    base: BaseRepository,
}

impl PaymentRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// All payments, newest first
    pub async fn find_all(&self) -> RepoResult<Vec<Payment>> {
        let payments: Vec<Payment> = self
            .base
            .db()
            .query("SELECT * FROM payments ORDER BY created_at DESC")
            .await?
            .take(0)?;
        Ok(payments)
    }

    /// Payments recorded against one table
    pub async fn find_by_table(&self, table: &RecordId) -> RepoResult<Vec<Payment>> {
        let payments: Vec<Payment> = self
            .base
            .db()
            .query("SELECT * FROM payments WHERE table = $table ORDER BY created_at")
            .bind(("table", table.clone()))
            .await?
            .take(0)?;
        Ok(payments)
    }

    /// Find payment by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Payment>> {
        let thing = self.base.parse_id(id)?;
        let payment: Option<Payment> = self.base.db().select(thing).await?;
        Ok(payment)
    }

    /// Record a declared payment
    pub async fn create(&self, data: PaymentCreate) -> RepoResult<Payment> {
        let payment = Payment {
            id: None,
            table: data.table,
            seat: data.seat,
            amount: data.amount,
            method: data.method,
            status: PaymentStatus::Completed,
            created_at: shared::util::now_millis(),
        };

        let created: Option<Payment> = self.base.db().create(TABLE).content(payment).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create payment".to_string()))
    }

    /// Update a payment's status
    pub async fn update_status(&self, id: &str, status: PaymentStatus) -> RepoResult<Payment> {
        let thing = self.base.parse_id(id)?;
        let mut result = self
            .base
            .db()
            .query("UPDATE $thing SET status = $status RETURN AFTER")
            .bind(("thing", thing))
            .bind(("status", status))
            .await?;
        let payments: Vec<Payment> = result.take(0)?;
        payments
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Payment {} not found", id)))
    }
}
