//! Totals computation and currency formatting.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::cart::LineItem;
use super::coupon::{Coupon, CouponKind};

/// Derived totals breakdown. Never stored on its own; recomputed from the
/// cart and active coupon on every change.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    pub subtotal: Decimal,
    pub discount: Decimal,
    pub delivery: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

/// Uniform rounding rule for discount and tax: nearest integer, ties away
/// from zero. Every amount the engine produces is non-negative, so this is
/// plain half-up rounding.
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Canonical amount formatting: currency symbol plus whole units, no decimal
/// places.
pub fn format_amount(amount: Decimal) -> String {
    format!("₹{}", round_money(amount).normalize())
}

pub fn subtotal(items: &[LineItem]) -> Decimal {
    items.iter().map(|i| i.price * Decimal::from(i.qty)).sum()
}

/// Delivery is free at or above 800, otherwise a flat 49.
fn baseline_delivery(subtotal: Decimal) -> Decimal {
    if subtotal >= Decimal::from(800) {
        Decimal::ZERO
    } else {
        Decimal::from(49)
    }
}

/// Pure, side-effect-free totals computation.
///
/// Discount by coupon kind: percent is `round(subtotal * value / 100)` capped
/// by `max_discount` when present; flat is the coupon value; free shipping
/// leaves the discount at zero but forces delivery to zero. Tax is a flat 18%
/// of the post-discount amount. The grand total floors at zero so a discount
/// larger than the subtotal cannot go negative.
pub fn compute_totals(items: &[LineItem], coupon: Option<&Coupon>) -> Totals {
    let subtotal = subtotal(items);
    let mut delivery = baseline_delivery(subtotal);
    let mut discount = Decimal::ZERO;
    if let Some(c) = coupon {
        match c.kind {
            CouponKind::Percent => {
                let raw = round_money(subtotal * c.value / Decimal::from(100));
                discount = match c.max_discount {
                    Some(cap) => raw.min(cap),
                    None => raw,
                };
            }
            CouponKind::Flat => discount = c.value,
            CouponKind::FreeShipping => delivery = Decimal::ZERO,
        }
    }
    let taxable = (subtotal - discount).max(Decimal::ZERO);
    let tax = round_money(taxable * Decimal::new(18, 2));
    let total = (subtotal - discount + tax + delivery).max(Decimal::ZERO);
    Totals {
        subtotal,
        discount,
        delivery,
        tax,
        total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::coupon;

    fn item(price: i64, qty: u32) -> LineItem {
        LineItem {
            id: format!("p{price}"),
            title: "item".into(),
            price: Decimal::from(price),
            qty,
            image: String::new(),
        }
    }

    fn d(v: i64) -> Decimal {
        Decimal::from(v)
    }

    #[test]
    fn test_no_coupon_above_free_delivery() {
        let t = compute_totals(&[item(500, 2)], None);
        assert_eq!(t.subtotal, d(1000));
        assert_eq!(t.discount, d(0));
        assert_eq!(t.delivery, d(0));
        assert_eq!(t.tax, d(180));
        assert_eq!(t.total, d(1180));
    }

    #[test]
    fn test_flat_coupon_below_free_delivery() {
        let c = coupon::lookup("FLAT100").unwrap();
        let t = compute_totals(&[item(400, 1)], Some(&c));
        assert_eq!(t.discount, d(100));
        assert_eq!(t.tax, d(54));
        assert_eq!(t.delivery, d(49));
        assert_eq!(t.total, d(403));
    }

    #[test]
    fn test_percent_coupon_hits_cap() {
        let c = coupon::lookup("WELCOME50").unwrap();
        let t = compute_totals(&[item(1000, 1)], Some(&c));
        assert_eq!(t.discount, d(250));
        assert_eq!(t.tax, d(135));
        assert_eq!(t.delivery, d(0));
        assert_eq!(t.total, d(885));
    }

    #[test]
    fn test_percent_coupon_without_cap_is_unbounded() {
        let mut c = coupon::lookup("WELCOME50").unwrap();
        c.max_discount = None;
        let t = compute_totals(&[item(1000, 1)], Some(&c));
        assert_eq!(t.discount, d(500));
    }

    #[test]
    fn test_free_shipping_forces_delivery_to_zero() {
        let c = coupon::lookup("FREESHIP").unwrap();
        let t = compute_totals(&[item(100, 1)], Some(&c));
        assert_eq!(t.discount, d(0));
        assert_eq!(t.delivery, d(0));
        assert_eq!(t.total, d(118));
    }

    #[test]
    fn test_discount_larger_than_subtotal_floors_at_zero() {
        let c = coupon::lookup("FLAT100").unwrap();
        let t = compute_totals(&[item(50, 1)], Some(&c));
        assert_eq!(t.tax, d(0));
        // 50 - 100 + 0 + 49 = -1, floored
        assert_eq!(t.total, d(0));
    }

    #[test]
    fn test_rounding_is_half_up() {
        assert_eq!(round_money("1.5".parse().unwrap()), d(2));
        assert_eq!(round_money("2.5".parse().unwrap()), d(3));
        assert_eq!(round_money("2.4".parse().unwrap()), d(2));
    }

    #[test]
    fn test_format_amount_whole_units() {
        assert_eq!(format_amount(d(1180)), "₹1180");
        assert_eq!(format_amount("49.50".parse().unwrap()), "₹50");
        assert_eq!(format_amount(d(0)), "₹0");
    }

    #[test]
    fn test_empty_cart_totals() {
        let t = compute_totals(&[], None);
        assert_eq!(t.subtotal, d(0));
        assert_eq!(t.delivery, d(49));
        assert_eq!(t.total, d(49));
    }
}
