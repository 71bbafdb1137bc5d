//! Money calculation utilities using rust_decimal for precision
//!
//! All arithmetic is done on `Decimal` internally, then converted to
//! `f64` at the storage/serialization boundary. Order totals are
//! computed from item snapshots, never from live menu prices.

use crate::utils::error::AppError;
use rust_decimal::prelude::*;

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Maximum allowed price per item
const MAX_PRICE: f64 = 1_000_000.0;
/// Maximum allowed quantity per line
const MAX_QUANTITY: i32 = 9999;

/// Validate a price field: finite, non-negative, below the cap
pub fn validate_price(value: f64, field: &str) -> Result<(), AppError> {
    if !value.is_finite() {
        return Err(AppError::Validation(format!(
            "{} must be a finite number, got {}",
            field, value
        )));
    }
    if value < 0.0 {
        return Err(AppError::Validation(format!(
            "{} must be non-negative, got {}",
            field, value
        )));
    }
    if value > MAX_PRICE {
        return Err(AppError::Validation(format!(
            "{} exceeds maximum allowed ({}), got {}",
            field, MAX_PRICE, value
        )));
    }
    Ok(())
}

/// Validate a line quantity
pub fn validate_quantity(quantity: i32) -> Result<(), AppError> {
    if quantity < 1 || quantity > MAX_QUANTITY {
        return Err(AppError::Validation(format!(
            "quantity must be between 1 and {}, got {}",
            MAX_QUANTITY, quantity
        )));
    }
    Ok(())
}

/// Convert a pre-validated f64 to Decimal
pub fn dec(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Round to 2 decimal places, midpoint away from zero
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Convert back to f64 for storage, rounded
pub fn to_f64(value: Decimal) -> f64 {
    round_money(value).to_f64().unwrap_or(0.0)
}

/// Line total: (unit price + sum of selected option prices) * quantity
pub fn line_total(unit_price: f64, option_prices: &[f64], quantity: i32) -> Decimal {
    let options: Decimal = option_prices.iter().map(|p| dec(*p)).sum();
    (dec(unit_price) + options) * Decimal::from(quantity)
}

/// Amount due including the service charge percentage (e.g. 10 for 10%)
pub fn apply_service_charge(subtotal: f64, pct: f64) -> f64 {
    let factor = Decimal::ONE + dec(pct) / Decimal::from(100);
    to_f64(dec(subtotal) * factor)
}

/// Service charge amount alone
pub fn service_charge(subtotal: f64, pct: f64) -> f64 {
    to_f64(dec(subtotal) * dec(pct) / Decimal::from(100))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_total_adds_option_prices_per_unit() {
        // X-Burger 42.90 + Bacon 6.00, quantity 2 -> 97.80
        let total = line_total(42.90, &[0.0, 6.00], 2);
        assert_eq!(to_f64(total), 97.80);
    }

    #[test]
    fn line_total_without_options() {
        assert_eq!(to_f64(line_total(15.50, &[], 3)), 46.50);
    }

    #[test]
    fn service_charge_is_ten_percent() {
        assert_eq!(apply_service_charge(97.80, 10.0), 107.58);
        assert_eq!(service_charge(97.80, 10.0), 9.78);
        assert_eq!(apply_service_charge(0.0, 10.0), 0.0);
    }

    #[test]
    fn rounding_is_half_up() {
        // 0.125 is binary-exact, rounds away from zero
        assert_eq!(to_f64(dec(0.125)), 0.13);
        assert_eq!(to_f64(dec(0.124)), 0.12);
    }

    #[test]
    fn price_validation_rejects_bad_values() {
        assert!(validate_price(42.90, "price").is_ok());
        assert!(validate_price(-1.0, "price").is_err());
        assert!(validate_price(f64::NAN, "price").is_err());
        assert!(validate_price(f64::INFINITY, "price").is_err());
        assert!(validate_price(2_000_000.0, "price").is_err());
    }

    #[test]
    fn quantity_validation_bounds() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(10_000).is_err());
    }
}
