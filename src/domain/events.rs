//! Engine events drained by the presentation layer.

/// Raised by mutating operations on the shop session. The UI drains them with
/// [`Shop::take_events`](crate::shop::Shop::take_events) and re-renders; the
/// engine itself stays notification-agnostic.
#[derive(Clone, Debug, PartialEq)]
pub enum ShopEvent {
    /// Cart contents changed; carries the new badge count (sum of quantities).
    CartUpdated { item_count: u32 },
    /// The local product list changed; the merged catalog must be reloaded
    /// wholesale.
    CatalogInvalidated,
    CouponApplied { code: String },
    CouponCleared,
    OrderPlaced { order_id: String },
}
