//! Persistent key-value store interface.
//!
//! The engine keeps all state under five logical keys, each holding one whole
//! JSON value. Reads tolerate missing or unreadable values by returning
//! `None`; writes are whole-value overwrites and a failed write is fatal for
//! the operation that triggered it.

pub mod file;
pub mod memory;

pub use file::FileBackend;
pub use memory::MemoryBackend;

use crate::error::Result;

/// Logical storage keys. The names match the persisted browser-store layout
/// this engine is data-compatible with.
pub mod keys {
    pub const LOCAL_PRODUCTS: &str = "ic_products_local";
    pub const CART: &str = "ic_cart";
    pub const ORDERS: &str = "ic_orders";
    pub const ACTIVE_COUPON: &str = "ic_active_coupon";
    pub const ADMIN_SESSION: &str = "ic_admin_logged_in";
}

/// A synchronous, single-user key-value store.
///
/// The store is shared across sessions of the same origin, so in-memory caches
/// built from it must be explicitly reloaded after an external change.
pub trait StorageBackend {
    /// Returns the stored value, or `None` when absent or unreadable.
    fn get(&self, key: &str) -> Option<String>;

    /// Overwrites the whole value under `key`.
    fn put(&self, key: &str, value: &str) -> Result<()>;

    /// Removes `key`; absent keys are a no-op.
    fn remove(&self, key: &str) -> Result<()>;
}
