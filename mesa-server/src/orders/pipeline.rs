//! Order Pipeline
//!
//! Cart submission and the status progression used by the kitchen
//! display and admin dashboard. Carts arrive as id references only; the
//! pipeline resolves them against the live menu, snapshots each item
//! into the order line, and prices the line from the snapshot. After
//! creation an order's items never change content, only status.

use serde::Deserialize;
use shared::cart::CartLine;
use shared::status::{ItemStatus, OrderOrigin, OrderStatus};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::db::models::{MenuItem, Order, OrderItem, SelectedModifier};
use crate::db::repository::{
    MenuItemRepository, OrderListFilter, OrderRepository, SeatRepository, TableRepository,
};
use crate::utils::money;
use crate::utils::{AppError, AppResult};

/// Cart submission payload (table channel)
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SubmitOrder {
    #[validate(length(min = 1, message = "table_id is required"))]
    pub table_id: String,
    #[validate(length(min = 1, message = "seat_id is required"))]
    pub seat_id: String,
    #[validate(length(min = 1, message = "order must contain at least one item"))]
    #[validate(nested)]
    pub lines: Vec<CartLine>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Clone)]
pub struct OrderPipeline {
    orders: OrderRepository,
    menu: MenuItemRepository,
    tables: TableRepository,
    seats: SeatRepository,
}

impl OrderPipeline {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            orders: OrderRepository::new(db.clone()),
            menu: MenuItemRepository::new(db.clone()),
            tables: TableRepository::new(db.clone()),
            seats: SeatRepository::new(db),
        }
    }

    pub fn repository(&self) -> &OrderRepository {
        &self.orders
    }

    /// List orders for the poll endpoints
    pub async fn list(&self, filter: OrderListFilter) -> AppResult<Vec<Order>> {
        Ok(self.orders.find_all(filter).await?)
    }

    /// Fetch one order
    pub async fn get(&self, id: &str) -> AppResult<Order> {
        self.orders
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Order {} not found", id)))
    }

    /// Submit a cart as a new pending order
    ///
    /// All lines are validated against the live menu before anything is
    /// persisted; one bad line rejects the whole cart.
    pub async fn submit(&self, req: SubmitOrder) -> AppResult<Order> {
        req.validate()?;

        let table = self
            .tables
            .find_by_id(&req.table_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Table {} not found", req.table_id)))?;
        if !table.is_occupied {
            return Err(AppError::BusinessRule(
                "Cannot order on a table without an active session".to_string(),
            ));
        }
        let table_id = table
            .id
            .clone()
            .ok_or_else(|| AppError::Internal("table row without id".to_string()))?;

        let seat = self
            .seats
            .find_by_id(&req.seat_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Seat {} not found", req.seat_id)))?;
        if seat.table != table_id {
            return Err(AppError::Validation(
                "Seat does not belong to the given table".to_string(),
            ));
        }
        let seat_id = seat
            .id
            .clone()
            .ok_or_else(|| AppError::Internal("seat row without id".to_string()))?;

        let mut items = Vec::with_capacity(req.lines.len());
        let mut subtotal = rust_decimal::Decimal::ZERO;
        for line in &req.lines {
            let item = self.build_item(line).await?;
            subtotal += money::dec(item.line_total);
            items.push(item);
        }
        let subtotal = money::to_f64(subtotal);

        let now = shared::util::now_millis();
        let order = Order {
            id: None,
            origin: OrderOrigin::Table,
            table: Some(table_id.clone()),
            seat: Some(seat_id),
            customer_phone: None,
            customer_name: None,
            customer_address: None,
            external_ref: None,
            items,
            subtotal,
            delivery_fee: 0.0,
            total: subtotal,
            status: OrderStatus::Pending,
            payment_method: None,
            payment_status: None,
            notes: req.notes,
            created_at: now,
            updated_at: now,
        };

        let created = self.orders.create(order).await?;
        info!(
            table = %table_id,
            order = ?created.id,
            subtotal,
            "Order submitted"
        );
        Ok(created)
    }

    /// Resolve one cart line against the live menu and snapshot it
    async fn build_item(&self, line: &CartLine) -> AppResult<OrderItem> {
        money::validate_quantity(line.quantity)?;

        let item = self
            .menu
            .find_by_id(&line.menu_item_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Menu item {} not found", line.menu_item_id))
            })?;
        if !item.is_available {
            return Err(AppError::BusinessRule(format!(
                "Menu item {} is not available",
                item.name
            )));
        }
        money::validate_price(item.price, "price")?;

        let selected = resolve_selections(&item, line)?;
        let option_prices: Vec<f64> = selected
            .iter()
            .flat_map(|m| m.options.iter().map(|o| o.price))
            .collect();
        let line_total = money::to_f64(money::line_total(
            item.price,
            &option_prices,
            line.quantity,
        ));

        Ok(OrderItem {
            id: Uuid::new_v4().simple().to_string(),
            menu_item: line.menu_item_id.clone(),
            snapshot: item,
            quantity: line.quantity,
            selected_modifiers: selected,
            notes: line.notes.clone(),
            customizations: Vec::new(),
            status: ItemStatus::Pending,
            line_total,
        })
    }

    /// Advance an order one step along the forward chain
    pub async fn advance(&self, id: &str) -> AppResult<Order> {
        let order = self.get(id).await?;
        let record_id = order
            .id
            .clone()
            .ok_or_else(|| AppError::Internal("order row without id".to_string()))?;
        let next = order.status.advance()?;
        let updated = self.orders.update_status(&record_id, next).await?;
        info!(order = %record_id, from = order.status.as_str(), to = next.as_str(), "Order advanced");
        Ok(updated)
    }

    /// Cancel a still-pending order
    pub async fn cancel(&self, id: &str) -> AppResult<Order> {
        let order = self.get(id).await?;
        let record_id = order
            .id
            .clone()
            .ok_or_else(|| AppError::Internal("order row without id".to_string()))?;
        order.status.can_transition(OrderStatus::Cancelled)?;
        let updated = self
            .orders
            .update_status(&record_id, OrderStatus::Cancelled)
            .await?;
        info!(order = %record_id, "Order cancelled");
        Ok(updated)
    }

    /// Move one order line forward (kitchen display)
    pub async fn update_item_status(
        &self,
        id: &str,
        item_id: &str,
        to: ItemStatus,
    ) -> AppResult<Order> {
        let order = self.get(id).await?;
        let record_id = order
            .id
            .clone()
            .ok_or_else(|| AppError::Internal("order row without id".to_string()))?;

        let current = order
            .item(item_id)
            .ok_or_else(|| AppError::NotFound(format!("Order item {} not found", item_id)))?;
        current.status.can_transition(to)?;

        let mut items = order.items;
        for item in items.iter_mut() {
            if item.id == item_id {
                item.status = to;
            }
        }
        Ok(self.orders.update_items(&record_id, items).await?)
    }
}

/// Validate modifier selections against an item's modifier groups and
/// copy the chosen options by value
fn resolve_selections(item: &MenuItem, line: &CartLine) -> AppResult<Vec<SelectedModifier>> {
    use crate::db::models::ModifierKind;

    let mut selected = Vec::with_capacity(line.selections.len());
    for sel in &line.selections {
        let modifier = item.modifier(&sel.modifier_id).ok_or_else(|| {
            AppError::Validation(format!(
                "Unknown modifier {} for item {}",
                sel.modifier_id, item.name
            ))
        })?;

        if modifier.kind == ModifierKind::Single && sel.option_ids.len() != 1 {
            return Err(AppError::Validation(format!(
                "Modifier {} requires exactly one option",
                modifier.name
            )));
        }
        if sel.option_ids.is_empty() {
            return Err(AppError::Validation(format!(
                "Modifier {} selection carries no options",
                modifier.name
            )));
        }

        let mut options = Vec::with_capacity(sel.option_ids.len());
        for option_id in &sel.option_ids {
            let option = modifier.option(option_id).ok_or_else(|| {
                AppError::Validation(format!(
                    "Unknown option {} for modifier {}",
                    option_id, modifier.name
                ))
            })?;
            options.push(option.clone());
        }

        selected.push(SelectedModifier {
            modifier_id: modifier.id.clone(),
            modifier_name: modifier.name.clone(),
            options,
        });
    }

    // Required groups must be present in the cart line
    for modifier in &item.modifiers {
        if modifier.required && !selected.iter().any(|s| s.modifier_id == modifier.id) {
            return Err(AppError::Validation(format!(
                "Modifier {} is required for item {}",
                modifier.name, item.name
            )));
        }
    }

    Ok(selected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::{Modifier, ModifierKind, ModifierOption};
    use shared::cart::ModifierSelection;

    fn burger() -> MenuItem {
        MenuItem {
            id: None,
            name: "X-Burger".to_string(),
            description: "House burger".to_string(),
            price: 42.90,
            category: "Burgers".to_string(),
            image_url: None,
            is_available: true,
            modifiers: vec![
                Modifier {
                    id: "doneness".to_string(),
                    name: "Doneness".to_string(),
                    kind: ModifierKind::Single,
                    required: true,
                    options: vec![
                        ModifierOption {
                            id: "rare".to_string(),
                            name: "Rare".to_string(),
                            price: 0.0,
                        },
                        ModifierOption {
                            id: "well".to_string(),
                            name: "Well done".to_string(),
                            price: 0.0,
                        },
                    ],
                },
                Modifier {
                    id: "extras".to_string(),
                    name: "Extras".to_string(),
                    kind: ModifierKind::Multi,
                    required: false,
                    options: vec![ModifierOption {
                        id: "bacon".to_string(),
                        name: "Bacon".to_string(),
                        price: 6.00,
                    }],
                },
            ],
        }
    }

    fn line(selections: Vec<ModifierSelection>) -> CartLine {
        CartLine {
            menu_item_id: "menu_items:burger".to_string(),
            quantity: 2,
            selections,
            notes: None,
        }
    }

    #[test]
    fn selections_resolve_and_copy_options() {
        let item = burger();
        let line = line(vec![
            ModifierSelection {
                modifier_id: "doneness".to_string(),
                option_ids: vec!["well".to_string()],
            },
            ModifierSelection {
                modifier_id: "extras".to_string(),
                option_ids: vec!["bacon".to_string()],
            },
        ]);
        let selected = resolve_selections(&item, &line).unwrap();
        assert_eq!(selected.len(), 2);
        assert_eq!(selected[1].options[0].price, 6.00);
    }

    #[test]
    fn missing_required_modifier_rejected() {
        let item = burger();
        let line = line(vec![]);
        let err = resolve_selections(&item, &line).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn single_kind_requires_exactly_one_option() {
        let item = burger();
        let line = line(vec![ModifierSelection {
            modifier_id: "doneness".to_string(),
            option_ids: vec!["rare".to_string(), "well".to_string()],
        }]);
        assert!(resolve_selections(&item, &line).is_err());
    }

    #[test]
    fn unknown_option_rejected() {
        let item = burger();
        let line = line(vec![ModifierSelection {
            modifier_id: "doneness".to_string(),
            option_ids: vec!["blue".to_string()],
        }]);
        assert!(resolve_selections(&item, &line).is_err());
    }
}
