//! HTTP feed source.

use async_trait::async_trait;

use super::CatalogFeed;
use crate::domain::catalog::RawProduct;

/// Fetches the static product feed over HTTP with no-cache semantics.
/// Network errors, non-success statuses and malformed payloads all degrade to
/// an empty feed.
pub struct HttpFeed {
    url: String,
    client: reqwest::Client,
}

impl HttpFeed {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl CatalogFeed for HttpFeed {
    async fn fetch(&self) -> Vec<RawProduct> {
        let response = match self
            .client
            .get(&self.url)
            .header("Cache-Control", "no-cache")
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(url = %self.url, error = %e, "static feed unreachable");
                return Vec::new();
            }
        };
        if !response.status().is_success() {
            tracing::warn!(url = %self.url, status = %response.status(), "static feed returned non-success");
            return Vec::new();
        }
        match response.json::<Vec<RawProduct>>().await {
            Ok(list) => list,
            Err(e) => {
                tracing::warn!(url = %self.url, error = %e, "static feed payload malformed");
                Vec::new()
            }
        }
    }
}
