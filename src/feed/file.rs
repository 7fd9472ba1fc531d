//! Bundled-resource feed source.

use std::path::PathBuf;

use async_trait::async_trait;

use super::CatalogFeed;
use crate::domain::catalog::RawProduct;

/// Reads the static feed from a JSON file shipped alongside the application.
pub struct FileFeed {
    path: PathBuf,
}

impl FileFeed {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CatalogFeed for FileFeed {
    async fn fetch(&self) -> Vec<RawProduct> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "static feed file unreadable");
                return Vec::new();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(list) => list,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "static feed file malformed");
                Vec::new()
            }
        }
    }
}
