//! Minikart: a local-first storefront engine.
//!
//! The engine owns catalog merge, cart state, coupon rules, totals
//! computation and order creation on top of a pluggable key-value store. It
//! renders nothing itself: a thin presentation layer calls into the engine,
//! drains its events and re-renders.
//!
//! ## Features
//! - Merged product catalog (static feed + locally managed products)
//! - Shopping cart with persisted, denormalized line items
//! - Fixed-table promotional coupons
//! - Deterministic totals: subtotal, discount, delivery fee, 18% tax
//! - Append-only order history with immutable snapshots
//! - Admin-managed local product list

pub mod config;
pub mod domain;
pub mod error;
pub mod feed;
pub mod shop;
pub mod storage;

pub use config::ShopConfig;
pub use domain::cart::LineItem;
pub use domain::catalog::Product;
pub use domain::coupon::{Coupon, CouponKind};
pub use domain::events::ShopEvent;
pub use domain::order::{Address, Order};
pub use domain::pricing::{compute_totals, format_amount, Totals};
pub use error::{Result, ShopError};
pub use shop::{NewProduct, Shop, ADMIN_DEMO_PASSWORD};
