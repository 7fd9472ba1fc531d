//! Engine configuration.

use std::path::PathBuf;

/// Where the engine reads its static feed and keeps its persistent store.
#[derive(Clone, Debug)]
pub struct ShopConfig {
    /// URL of the static product feed; `None` means no feed (local-only
    /// catalog).
    pub feed_url: Option<String>,
    /// Path of the JSON store file.
    pub data_path: PathBuf,
}

impl ShopConfig {
    /// Reads `MINIKART_FEED_URL` and `MINIKART_DATA_PATH` from the
    /// environment, defaulting the store to `minikart.json` in the working
    /// directory.
    pub fn from_env() -> Self {
        Self {
            feed_url: std::env::var("MINIKART_FEED_URL").ok(),
            data_path: std::env::var("MINIKART_DATA_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("minikart.json")),
        }
    }
}
