//! Pure commerce logic: catalog, cart, coupons, pricing, orders.

pub mod cart;
pub mod catalog;
pub mod coupon;
pub mod events;
pub mod order;
pub mod pricing;

pub use cart::{Cart, LineItem};
pub use catalog::{Product, RawProduct};
pub use coupon::{Coupon, CouponKind};
pub use events::ShopEvent;
pub use order::{Address, Order};
pub use pricing::{compute_totals, format_amount, Totals};
