//! Fixed promotional code table.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ShopError};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CouponKind {
    Percent,
    Flat,
    /// Waives the delivery fee; no direct discount.
    #[serde(rename = "shipping")]
    FreeShipping,
}

/// A promotional code with its effect and eligibility rules. At most one
/// coupon is active at a time, persisted whole with the code embedded.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coupon {
    pub code: String,
    #[serde(rename = "type")]
    pub kind: CouponKind,
    pub value: Decimal,
    #[serde(rename = "maxDiscount", skip_serializing_if = "Option::is_none")]
    pub max_discount: Option<Decimal>,
    #[serde(rename = "minCart", skip_serializing_if = "Option::is_none")]
    pub min_cart: Option<Decimal>,
}

/// Looks up a code in the fixed rule table. Matching is case-insensitive.
pub fn lookup(code: &str) -> Option<Coupon> {
    let code = code.trim().to_uppercase();
    let (kind, value, max_discount, min_cart) = match code.as_str() {
        "WELCOME50" => (CouponKind::Percent, 50, Some(250), Some(500)),
        "FLAT100" => (CouponKind::Flat, 100, None, Some(300)),
        "FREESHIP" => (CouponKind::FreeShipping, 1, None, Some(800)),
        _ => return None,
    };
    Some(Coupon {
        code,
        kind,
        value: Decimal::from(value),
        max_discount: max_discount.map(Decimal::from),
        min_cart: min_cart.map(Decimal::from),
    })
}

/// Validates `code` against the rule table and the current cart subtotal.
/// Ineligible codes never become active.
pub fn apply(code: &str, cart_subtotal: Decimal) -> Result<Coupon> {
    let coupon = lookup(code).ok_or(ShopError::UnknownCoupon)?;
    if let Some(required) = coupon.min_cart {
        if cart_subtotal < required {
            return Err(ShopError::MinCartNotMet { required });
        }
    }
    Ok(coupon)
}
