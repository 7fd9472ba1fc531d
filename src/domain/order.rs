//! Order records and checkout validation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::cart::LineItem;
use super::pricing::Totals;
use crate::error::{Result, ShopError};

/// Shipping address captured at checkout.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub name: String,
    pub phone: String,
}

impl Address {
    /// Both fields are required; whitespace-only values count as missing.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() || self.phone.trim().is_empty() {
            return Err(ShopError::IncompleteAddress);
        }
        Ok(())
    }
}

/// An immutable snapshot of a placed order: the line items and totals as they
/// were at placement time. Never mutated or deleted once it enters the
/// history.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    pub items: Vec<LineItem>,
    pub totals: Totals,
    pub address: Address,
}

impl Order {
    /// Builds an order snapshot from a non-empty cart and a complete address.
    pub fn build(items: Vec<LineItem>, totals: Totals, address: Address) -> Result<Self> {
        if items.is_empty() {
            return Err(ShopError::EmptyCart);
        }
        address.validate()?;
        let created_at = Utc::now();
        Ok(Self {
            id: generate_id(created_at),
            created_at,
            items,
            totals,
            address,
        })
    }
}

/// Order ids carry a time-derived prefix plus a random suffix so rapid
/// successive orders cannot collide on timestamp granularity alone.
fn generate_id(at: DateTime<Utc>) -> String {
    format!(
        "IC{:06}-{:04x}",
        at.timestamp_millis().rem_euclid(1_000_000),
        rand::random::<u16>()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::pricing::compute_totals;
    use rust_decimal::Decimal;

    fn line_item() -> LineItem {
        LineItem {
            id: "p1".into(),
            title: "Widget".into(),
            price: Decimal::from(100),
            qty: 1,
            image: String::new(),
        }
    }

    fn address() -> Address {
        Address {
            name: "Asha".into(),
            phone: "9999999999".into(),
        }
    }

    #[test]
    fn test_empty_cart_rejected() {
        let totals = compute_totals(&[], None);
        assert!(matches!(
            Order::build(vec![], totals, address()),
            Err(ShopError::EmptyCart)
        ));
    }

    #[test]
    fn test_incomplete_address_rejected() {
        let items = vec![line_item()];
        let totals = compute_totals(&items, None);
        let blank_phone = Address {
            name: "Asha".into(),
            phone: "   ".into(),
        };
        assert!(matches!(
            Order::build(items, totals, blank_phone),
            Err(ShopError::IncompleteAddress)
        ));
    }

    #[test]
    fn test_order_snapshot_and_id_shape() {
        let items = vec![line_item()];
        let totals = compute_totals(&items, None);
        let order = Order::build(items.clone(), totals.clone(), address()).unwrap();
        assert_eq!(order.items, items);
        assert_eq!(order.totals, totals);
        assert!(order.id.starts_with("IC"));
        assert!(order.id.contains('-'));
    }
}
