//! WhatsApp Ingestion
//!
//! Turns an inbound webhook payload into a regular order. The payload
//! is validated as a whole before anything touches the store: one
//! unknown or unavailable menu item rejects the entire message, so a
//! partially-priced order can never land in the kitchen queue.
//!
//! Ingested orders enter the same status pipeline as table orders and
//! show up on the same kitchen display; only the origin discriminant
//! and the customer contact fields differ.

use std::collections::HashMap;

use shared::status::{ItemStatus, OrderOrigin, OrderStatus, PaymentStatus};
use shared::webhook::WhatsAppWebhookPayload;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::db::models::{MenuItem, Order, OrderItem};
use crate::db::repository::{MenuItemRepository, OrderRepository};
use crate::utils::money;
use crate::utils::{AppError, AppResult};

#[derive(Clone)]
pub struct WhatsAppIngest {
    orders: OrderRepository,
    menu: MenuItemRepository,
    default_delivery_fee: f64,
}

impl WhatsAppIngest {
    pub fn new(db: Surreal<Db>, default_delivery_fee: f64) -> Self {
        Self {
            orders: OrderRepository::new(db.clone()),
            menu: MenuItemRepository::new(db),
            default_delivery_fee,
        }
    }

    /// Ingest one webhook payload, all-or-nothing
    pub async fn ingest(&self, payload: WhatsAppWebhookPayload) -> AppResult<Order> {
        payload.validate()?;

        if self
            .orders
            .find_by_external_ref(&payload.order_id)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(format!(
                "Order {} was already ingested",
                payload.order_id
            )));
        }

        // Resolve every item up front; nothing persists on failure.
        let available: HashMap<String, MenuItem> = self
            .menu
            .find_available()
            .await?
            .into_iter()
            .filter_map(|item| {
                item.id
                    .as_ref()
                    .map(|id| (id.to_string(), item.clone()))
            })
            .collect();

        let mut items = Vec::with_capacity(payload.items.len());
        let mut subtotal = rust_decimal::Decimal::ZERO;
        for line in &payload.items {
            money::validate_quantity(line.quantity)?;
            let item = available.get(&line.menu_item_id).ok_or_else(|| {
                AppError::Validation(format!(
                    "Menu item {} not found or unavailable",
                    line.menu_item_id
                ))
            })?;
            money::validate_price(item.price, "price")?;

            let line_total = money::line_total(item.price, &[], line.quantity);
            subtotal += line_total;
            items.push(OrderItem {
                id: Uuid::new_v4().simple().to_string(),
                menu_item: line.menu_item_id.clone(),
                snapshot: item.clone(),
                quantity: line.quantity,
                selected_modifiers: Vec::new(),
                notes: line.notes.clone(),
                customizations: line.customizations.clone(),
                status: ItemStatus::Pending,
                line_total: money::to_f64(line_total),
            });
        }

        let delivery_fee = payload.delivery_fee.unwrap_or(self.default_delivery_fee);
        money::validate_price(delivery_fee, "deliveryFee")?;

        let subtotal = money::to_f64(subtotal);
        let total = money::to_f64(money::dec(subtotal) + money::dec(delivery_fee));

        let created_at = payload.timestamp.timestamp_millis();
        let order = Order {
            id: None,
            origin: OrderOrigin::Whatsapp,
            table: None,
            seat: None,
            customer_phone: Some(payload.customer_phone),
            customer_name: payload.customer_name,
            customer_address: payload.customer_address,
            external_ref: Some(payload.order_id.clone()),
            items,
            subtotal,
            delivery_fee,
            total,
            status: OrderStatus::Pending,
            payment_method: payload.payment_method,
            payment_status: Some(PaymentStatus::Pending),
            notes: payload.notes,
            created_at,
            updated_at: created_at,
        };

        let created = self.orders.create(order).await?;
        info!(
            external_ref = %payload.order_id,
            total,
            "WhatsApp order ingested"
        );
        Ok(created)
    }
}
