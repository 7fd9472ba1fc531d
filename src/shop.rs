//! The storefront session.
//!
//! [`Shop`] owns the in-memory catalog and cart caches over the persistent
//! store and orchestrates every persisted mutation. The caches are just
//! caches: after a cross-context store change the host must call the
//! `reload_*` methods before trusting them. Cross-context change watching
//! itself stays outside the engine.

use chrono::Utc;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::ShopConfig;
use crate::domain::cart::{Cart, LineItem};
use crate::domain::catalog::{self, Product, RawProduct, PLACEHOLDER_IMAGE};
use crate::domain::coupon::{self, Coupon};
use crate::domain::events::ShopEvent;
use crate::domain::order::{Address, Order};
use crate::domain::pricing::{self, Totals};
use crate::error::{Result, ShopError};
use crate::feed::{CatalogFeed, HttpFeed, StaticFeed};
use crate::storage::{keys, FileBackend, StorageBackend};

/// Demo-only admin password; there is no real authentication.
pub const ADMIN_DEMO_PASSWORD: &str = "admin123";

/// Input for the admin catalog editor. Editing existing products is
/// unsupported; delete and re-add instead.
#[derive(Clone, Debug)]
pub struct NewProduct {
    pub title: String,
    pub category: String,
    pub price: Decimal,
    pub description: String,
    pub images: Vec<String>,
}

/// A single-user storefront session over a storage backend and a static feed.
pub struct Shop<S: StorageBackend> {
    storage: S,
    feed: Box<dyn CatalogFeed>,
    catalog: Vec<Product>,
    cart: Cart,
    events: Vec<ShopEvent>,
}

impl Shop<FileBackend> {
    /// Opens a file-backed shop from configuration. Without a feed URL the
    /// catalog is local-only.
    pub fn from_config(config: &ShopConfig) -> Result<Self> {
        let storage = FileBackend::open(&config.data_path)?;
        let feed: Box<dyn CatalogFeed> = match &config.feed_url {
            Some(url) => Box::new(HttpFeed::new(url)),
            None => Box::new(StaticFeed(Vec::new())),
        };
        Ok(Self::new(storage, feed))
    }
}

impl<S: StorageBackend> Shop<S> {
    pub fn new(storage: S, feed: Box<dyn CatalogFeed>) -> Self {
        Self {
            storage,
            feed,
            catalog: Vec::new(),
            cart: Cart::new(),
            events: Vec::new(),
        }
    }

    /// Events raised since the last drain, oldest first.
    pub fn take_events(&mut self) -> Vec<ShopEvent> {
        std::mem::take(&mut self.events)
    }

    fn raise(&mut self, event: ShopEvent) {
        self.events.push(event);
    }

    // ---- persistence helpers ----------------------------------------------

    /// Reads a JSON list; missing or corrupt values degrade to empty.
    fn read_list<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        let Some(raw) = self.storage.get(key) else {
            return Vec::new();
        };
        match serde_json::from_str(&raw) {
            Ok(list) => list,
            Err(e) => {
                tracing::warn!(key, error = %e, "corrupt stored list, treating as empty");
                Vec::new()
            }
        }
    }

    fn write_json<T: Serialize>(&self, key: &str, value: &T, pretty: bool) -> Result<()> {
        let raw = if pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        }
        .map_err(|e| ShopError::Storage(e.to_string()))?;
        self.storage.put(key, &raw)
    }

    // ---- catalog -----------------------------------------------------------

    /// Rebuilds the merged catalog: local products first (newest first,
    /// winning id conflicts), then non-conflicting static products in feed
    /// order. The sole source of truth for "current catalog"; feed failures
    /// and corrupt local data degrade to empty inputs, never errors.
    pub async fn reload_catalog(&mut self) -> &[Product] {
        let feed: Vec<Product> = self
            .feed
            .fetch()
            .await
            .into_iter()
            .map(|r| r.normalize("s"))
            .collect();
        let local = self.local_products();
        self.catalog = catalog::merge(local, feed);
        &self.catalog
    }

    pub fn catalog(&self) -> &[Product] {
        &self.catalog
    }

    pub fn find_product(&self, id: &str) -> Option<&Product> {
        self.catalog.iter().find(|p| p.id == id)
    }

    // ---- cart --------------------------------------------------------------

    /// Re-reads the persisted cart into the in-memory cache.
    pub fn reload_cart(&mut self) -> &[LineItem] {
        self.cart = Cart::from_items(self.read_list(keys::CART));
        self.cart.items()
    }

    pub fn cart(&self) -> &[LineItem] {
        self.cart.items()
    }

    fn persist_cart(&mut self) -> Result<()> {
        let items = self.cart.items();
        self.write_json(keys::CART, &items, false)?;
        let item_count = self.cart.item_count();
        self.raise(ShopEvent::CartUpdated { item_count });
        Ok(())
    }

    /// Adds a product to the cart, capturing its display fields from the
    /// current catalog. Unknown ids degrade to a placeholder line item rather
    /// than failing.
    pub fn add_to_cart(&mut self, id: &str, qty: u32) -> Result<()> {
        let product = self.find_product(id).cloned();
        self.cart.add(id, qty, product.as_ref());
        self.persist_cart()
    }

    pub fn remove_from_cart(&mut self, id: &str) -> Result<()> {
        self.cart.remove(id);
        self.persist_cart()
    }

    /// Clamps the quantity to a minimum of 1. Absent ids are a no-op with no
    /// event raised.
    pub fn set_quantity(&mut self, id: &str, qty: u32) -> Result<()> {
        if self.cart.set_qty(id, qty) {
            self.persist_cart()
        } else {
            Ok(())
        }
    }

    // ---- coupon ------------------------------------------------------------

    /// The persisted active coupon; corrupt or absent values read as `None`.
    pub fn active_coupon(&self) -> Option<Coupon> {
        let raw = self.storage.get(keys::ACTIVE_COUPON)?;
        match serde_json::from_str(&raw) {
            Ok(c) => Some(c),
            Err(e) => {
                tracing::warn!(error = %e, "corrupt active coupon, ignoring");
                None
            }
        }
    }

    /// Validates and activates a coupon against the current cart subtotal,
    /// replacing any previously active one.
    pub fn apply_coupon(&mut self, code: &str) -> Result<Coupon> {
        let subtotal = pricing::subtotal(self.cart.items());
        let applied = coupon::apply(code, subtotal)?;
        self.write_json(keys::ACTIVE_COUPON, &applied, false)?;
        self.raise(ShopEvent::CouponApplied {
            code: applied.code.clone(),
        });
        Ok(applied)
    }

    pub fn clear_coupon(&mut self) -> Result<()> {
        self.storage.remove(keys::ACTIVE_COUPON)?;
        self.raise(ShopEvent::CouponCleared);
        Ok(())
    }

    /// Totals for the current cart and active coupon.
    pub fn totals(&self) -> Totals {
        pricing::compute_totals(self.cart.items(), self.active_coupon().as_ref())
    }

    // ---- checkout ----------------------------------------------------------

    /// Places an order: re-reads the persisted cart, snapshots items and
    /// totals, prepends the order to the history, then clears the cart and
    /// deactivates the coupon as one logical unit. On rejection nothing is
    /// mutated; a failed storage write aborts the whole operation.
    pub fn place_order(&mut self, address: Address) -> Result<Order> {
        self.reload_cart();
        let active = self.active_coupon();
        let totals = pricing::compute_totals(self.cart.items(), active.as_ref());
        let order = Order::build(self.cart.items().to_vec(), totals, address)?;

        let mut history = self.order_history();
        history.insert(0, order.clone());
        self.write_json(keys::ORDERS, &history, true)?;

        // Both clears happen before control returns, or the operation fails.
        self.storage.remove(keys::CART)?;
        self.storage.remove(keys::ACTIVE_COUPON)?;
        self.cart.clear();

        tracing::info!(order_id = %order.id, total = %order.totals.total, "order placed");
        self.raise(ShopEvent::OrderPlaced {
            order_id: order.id.clone(),
        });
        self.raise(ShopEvent::CartUpdated { item_count: 0 });
        Ok(order)
    }

    /// Newest-first order history; corrupt data reads as empty.
    pub fn order_history(&self) -> Vec<Order> {
        self.read_list(keys::ORDERS)
    }

    // ---- admin -------------------------------------------------------------

    /// Demo login: any non-blank user name plus the static password.
    pub fn admin_login(&mut self, user: &str, password: &str) -> Result<()> {
        if user.trim().is_empty() || password != ADMIN_DEMO_PASSWORD {
            return Err(ShopError::InvalidCredentials);
        }
        self.storage.put(keys::ADMIN_SESSION, "1")
    }

    pub fn admin_logout(&mut self) -> Result<()> {
        self.storage.remove(keys::ADMIN_SESSION)
    }

    pub fn is_admin_logged_in(&self) -> bool {
        self.storage.get(keys::ADMIN_SESSION).as_deref() == Some("1")
    }

    /// The locally stored, admin-editable product list, newest first.
    pub fn local_products(&self) -> Vec<Product> {
        self.read_list::<RawProduct>(keys::LOCAL_PRODUCTS)
            .into_iter()
            .map(|r| r.normalize("local"))
            .collect()
    }

    /// Creates a local product and prepends it to the stored list. The
    /// catalog cache is stale afterwards; reload it before reading.
    pub fn add_product(&mut self, new: NewProduct) -> Result<Product> {
        if new.title.trim().is_empty() || new.images.is_empty() {
            return Err(ShopError::InvalidProduct);
        }
        let image = new
            .images
            .first()
            .cloned()
            .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string());
        let product = Product {
            id: catalog::fresh_id("local"),
            title: new.title,
            category: if new.category.trim().is_empty() {
                "Uncategorized".to_string()
            } else {
                new.category
            },
            price: new.price.max(Decimal::ZERO),
            description: new.description,
            images: new.images,
            image,
            created_at: Utc::now(),
        };
        let mut list = self.local_products();
        list.insert(0, product.clone());
        self.write_json(keys::LOCAL_PRODUCTS, &list, true)?;
        self.raise(ShopEvent::CatalogInvalidated);
        Ok(product)
    }

    /// Removes a local product; absent ids are a no-op, not an error.
    pub fn delete_product(&mut self, id: &str) -> Result<()> {
        let mut list = self.local_products();
        list.retain(|p| p.id != id);
        self.write_json(keys::LOCAL_PRODUCTS, &list, true)?;
        self.raise(ShopEvent::CatalogInvalidated);
        Ok(())
    }
}
