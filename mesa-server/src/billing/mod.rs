//! Bill Computation
//!
//! A bill is a read-model over the table's non-cancelled orders: per
//! seat subtotal, service charge and amount due, plus the table-wide
//! aggregate. All arithmetic happens on `Decimal`; f64 appears only in
//! the serialized response. Orders that joined after a seat left keep
//! their seat reference, so history stays attributable.

use serde::Serialize;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::db::models::{Seat, Table};
use crate::db::repository::{OrderRepository, SeatRepository, TableRepository};
use crate::utils::money;
use crate::utils::{AppError, AppResult};

/// Amount due for one seat
#[derive(Debug, Clone, Serialize)]
pub struct SeatBill {
    pub seat: Seat,
    pub subtotal: f64,
    pub service_charge: f64,
    pub total_due: f64,
}

/// Full table bill
#[derive(Debug, Clone, Serialize)]
pub struct TableBill {
    pub table: Table,
    pub seats: Vec<SeatBill>,
    pub subtotal: f64,
    pub service_charge: f64,
    pub total_due: f64,
}

#[derive(Clone)]
pub struct BillingService {
    tables: TableRepository,
    seats: SeatRepository,
    orders: OrderRepository,
    service_charge_pct: f64,
}

impl BillingService {
    pub fn new(db: Surreal<Db>, service_charge_pct: f64) -> Self {
        Self {
            tables: TableRepository::new(db.clone()),
            seats: SeatRepository::new(db.clone()),
            orders: OrderRepository::new(db),
            service_charge_pct,
        }
    }

    /// Compute the current bill for a table
    pub async fn table_bill(&self, table_id: &str) -> AppResult<TableBill> {
        let table = self
            .tables
            .find_by_id(table_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Table {} not found", table_id)))?;
        let record_id = table
            .id
            .clone()
            .ok_or_else(|| AppError::Internal("table row without id".to_string()))?;

        let seats = self.seats.find_by_table(&record_id).await?;
        let orders = self.orders.find_billable_by_table(&record_id).await?;

        let mut seat_bills = Vec::with_capacity(seats.len());
        let mut table_subtotal = rust_decimal::Decimal::ZERO;
        for seat in seats {
            let seat_id = seat
                .id
                .clone()
                .ok_or_else(|| AppError::Internal("seat row without id".to_string()))?;
            let subtotal: rust_decimal::Decimal = orders
                .iter()
                .filter(|o| o.seat.as_ref() == Some(&seat_id))
                .map(|o| money::dec(o.total))
                .sum();
            table_subtotal += subtotal;

            let subtotal = money::to_f64(subtotal);
            seat_bills.push(SeatBill {
                seat,
                subtotal,
                service_charge: money::service_charge(subtotal, self.service_charge_pct),
                total_due: money::apply_service_charge(subtotal, self.service_charge_pct),
            });
        }

        // Orders whose seat already left still count toward the table
        // aggregate.
        for order in &orders {
            if order
                .seat
                .as_ref()
                .map(|sid| !seat_bills.iter().any(|b| b.seat.id.as_ref() == Some(sid)))
                .unwrap_or(true)
            {
                table_subtotal += money::dec(order.total);
            }
        }

        let subtotal = money::to_f64(table_subtotal);
        Ok(TableBill {
            table,
            seats: seat_bills,
            subtotal,
            service_charge: money::service_charge(subtotal, self.service_charge_pct),
            total_due: money::apply_service_charge(subtotal, self.service_charge_pct),
        })
    }
}
