//! Static catalog feed sources.
//!
//! The feed is read once at startup; it is the only asynchronous operation in
//! the engine. Implementations degrade every failure to an empty feed, so a
//! missing or malformed feed never blocks the rest of initialization.

pub mod file;
pub mod http;

pub use file::FileFeed;
pub use http::HttpFeed;

use async_trait::async_trait;

use crate::domain::catalog::RawProduct;

/// A read-only product feed. Infallible by contract: failures are logged and
/// degraded to an empty list by the implementation.
#[async_trait]
pub trait CatalogFeed: Send + Sync {
    async fn fetch(&self) -> Vec<RawProduct>;
}

/// Fixed in-memory feed, for tests and feed-less setups.
pub struct StaticFeed(pub Vec<RawProduct>);

#[async_trait]
impl CatalogFeed for StaticFeed {
    async fn fetch(&self) -> Vec<RawProduct> {
        self.0.clone()
    }
}
