//! Error types for the storefront engine.

use rust_decimal::Decimal;
use thiserror::Error;

/// Engine-level failures.
///
/// Everything except [`ShopError::Storage`] is a validation rejection: the
/// attempted operation performs no mutation and the variant is the
/// machine-checkable reason code for the presentation layer. Storage failures
/// are fatal for the triggering operation and never retried, since the
/// persisted state may be desynchronized from recent intent.
#[derive(Error, Debug)]
pub enum ShopError {
    #[error("empty cart")]
    EmptyCart,

    #[error("incomplete address")]
    IncompleteAddress,

    #[error("unknown coupon")]
    UnknownCoupon,

    #[error("minimum cart of {required} not met")]
    MinCartNotMet { required: Decimal },

    #[error("title and at least one image required")]
    InvalidProduct,

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("storage error: {0}")]
    Storage(String),
}

impl ShopError {
    pub fn is_rejection(&self) -> bool {
        !matches!(self, Self::Storage(_))
    }
}

pub type Result<T> = std::result::Result<T, ShopError>;
