//! Cart aggregate.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::catalog::Product;

/// One cart entry. Title, price and thumbnail are captured at add time, not
/// live-joined to the catalog.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub price: Decimal,
    #[serde(default = "default_qty")]
    pub qty: u32,
    #[serde(default)]
    pub image: String,
}

fn default_qty() -> u32 {
    1
}

/// Ordered list of line items, at most one per product id.
#[derive(Clone, Debug, Default)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_items(items: Vec<LineItem>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total quantity across all line items (the cart badge count).
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|i| i.qty).sum()
    }

    /// Adds `qty` (floored at 1) of a product. An existing line item has its
    /// quantity increased; otherwise a new item is appended with display
    /// fields taken from `product`. An unknown product degrades to a
    /// placeholder item with the bare id as title and zero price.
    pub fn add(&mut self, id: &str, qty: u32, product: Option<&Product>) {
        let qty = qty.max(1);
        if let Some(existing) = self.items.iter_mut().find(|i| i.id == id) {
            existing.qty = existing.qty.saturating_add(qty);
            return;
        }
        let item = match product {
            Some(p) => LineItem {
                id: id.to_string(),
                title: p.title.clone(),
                price: p.price,
                qty,
                image: p.image.clone(),
            },
            None => LineItem {
                id: id.to_string(),
                title: id.to_string(),
                price: Decimal::ZERO,
                qty,
                image: String::new(),
            },
        };
        self.items.push(item);
    }

    /// Removes the line item for `id`, if any.
    pub fn remove(&mut self, id: &str) {
        self.items.retain(|i| i.id != id);
    }

    /// Sets the quantity for `id`, clamped to a minimum of 1. Returns `false`
    /// (and changes nothing) when the id is absent.
    pub fn set_qty(&mut self, id: &str, qty: u32) -> bool {
        match self.items.iter_mut().find(|i| i.id == id) {
            Some(item) => {
                item.qty = qty.max(1);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}
