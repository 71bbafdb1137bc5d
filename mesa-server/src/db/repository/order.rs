//! Order Repository
//!
//! Orders are append-only: they are created once and only their status
//! fields are ever updated. There is deliberately no delete.

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{Order, OrderItem};
use shared::status::{OrderOrigin, OrderStatus, PaymentStatus};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const TABLE: &str = "orders";

/// Filters for the poll endpoints (kitchen display, admin dashboard)
#[derive(Debug, Clone, Default)]
pub struct OrderListFilter {
    pub status: Option<OrderStatus>,
    pub origin: Option<OrderOrigin>,
    pub table: Option<RecordId>,
    /// Only orders that still need kitchen attention
    pub active: bool,
    pub limit: usize,
    pub offset: usize,
}

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Persist a fully built order
    pub async fn create(&self, order: Order) -> RepoResult<Order> {
        let created: Option<Order> = self.base.db().create(TABLE).content(order).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create order".to_string()))
    }

    /// Find order by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Order>> {
        let thing = self.base.parse_id(id)?;
        let order: Option<Order> = self.base.db().select(thing).await?;
        Ok(order)
    }

    /// Find an ingested order by its caller-supplied external id
    pub async fn find_by_external_ref(&self, external_ref: &str) -> RepoResult<Option<Order>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM orders WHERE external_ref = $ref LIMIT 1")
            .bind(("ref", external_ref.to_string()))
            .await?;
        let orders: Vec<Order> = result.take(0)?;
        Ok(orders.into_iter().next())
    }

    /// List orders, newest first
    ///
    /// Pagination happens in memory: the embedded SDK mishandles
    /// WHERE + ORDER BY + LIMIT (drops the first record), so the query
    /// never carries LIMIT/START.
    pub async fn find_all(&self, filter: OrderListFilter) -> RepoResult<Vec<Order>> {
        let mut conditions: Vec<&str> = Vec::new();
        if filter.status.is_some() {
            conditions.push("status = $status");
        }
        if filter.origin.is_some() {
            conditions.push("origin = $origin");
        }
        if filter.table.is_some() {
            conditions.push("table = $table");
        }
        if filter.active {
            conditions.push("status NOT IN ['delivered', 'cancelled']");
        }

        let mut sql = String::from("SELECT * FROM orders");
        if !conditions.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&conditions.join(" AND "));
        }
        sql.push_str(" ORDER BY created_at DESC");

        let mut query = self.base.db().query(sql);
        if let Some(status) = filter.status {
            query = query.bind(("status", status));
        }
        if let Some(origin) = filter.origin {
            query = query.bind(("origin", origin));
        }
        if let Some(table) = filter.table {
            query = query.bind(("table", table));
        }

        let orders: Vec<Order> = query.await?.take(0)?;

        let limit = if filter.limit == 0 { 50 } else { filter.limit };
        Ok(orders.into_iter().skip(filter.offset).take(limit).collect())
    }

    /// All non-cancelled orders of a table (bill computation)
    pub async fn find_billable_by_table(&self, table: &RecordId) -> RepoResult<Vec<Order>> {
        let orders: Vec<Order> = self
            .base
            .db()
            .query(
                "SELECT * FROM orders WHERE table = $table \
                 AND status != 'cancelled' ORDER BY created_at",
            )
            .bind(("table", table.clone()))
            .await?
            .take(0)?;
        Ok(orders)
    }

    /// Orders of one seat, oldest first
    pub async fn find_by_seat(&self, seat: &RecordId) -> RepoResult<Vec<Order>> {
        let orders: Vec<Order> = self
            .base
            .db()
            .query("SELECT * FROM orders WHERE seat = $seat ORDER BY created_at")
            .bind(("seat", seat.clone()))
            .await?
            .take(0)?;
        Ok(orders)
    }

    /// Persist a status transition (legality is checked by the caller
    /// against `shared::status`)
    pub async fn update_status(&self, id: &RecordId, status: OrderStatus) -> RepoResult<Order> {
        let mut result = self
            .base
            .db()
            .query("UPDATE $thing SET status = $status, updated_at = $now RETURN AFTER")
            .bind(("thing", id.clone()))
            .bind(("status", status))
            .bind(("now", shared::util::now_millis()))
            .await?;
        let orders: Vec<Order> = result.take(0)?;
        orders
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Order {} not found", id)))
    }

    /// Replace the item array (per-item status updates only; the line
    /// contents never change)
    pub async fn update_items(&self, id: &RecordId, items: Vec<OrderItem>) -> RepoResult<Order> {
        let mut result = self
            .base
            .db()
            .query("UPDATE $thing SET items = $items, updated_at = $now RETURN AFTER")
            .bind(("thing", id.clone()))
            .bind(("items", items))
            .bind(("now", shared::util::now_millis()))
            .await?;
        let orders: Vec<Order> = result.take(0)?;
        orders
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Order {} not found", id)))
    }

    /// Update the inline payment status (WhatsApp channel)
    pub async fn update_payment_status(
        &self,
        id: &RecordId,
        payment_status: PaymentStatus,
    ) -> RepoResult<Order> {
        let mut result = self
            .base
            .db()
            .query(
                "UPDATE $thing SET payment_status = $payment_status, \
                 updated_at = $now RETURN AFTER",
            )
            .bind(("thing", id.clone()))
            .bind(("payment_status", payment_status))
            .bind(("now", shared::util::now_millis()))
            .await?;
        let orders: Vec<Order> = result.take(0)?;
        orders
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Order {} not found", id)))
    }
}
