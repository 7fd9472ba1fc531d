//! JSON-file-backed storage.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use super::StorageBackend;
use crate::error::{Result, ShopError};

/// Keeps every key in a single JSON object file, rewritten whole on each
/// mutation. A corrupt file degrades to an empty store on open; a failed
/// rewrite surfaces as [`ShopError::Storage`].
pub struct FileBackend {
    path: PathBuf,
    map: Mutex<BTreeMap<String, String>>,
}

impl FileBackend {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let map = match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                tracing::warn!(path = %path.display(), error = %e, "corrupt store file, starting empty");
                BTreeMap::new()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                return Err(ShopError::Storage(format!("open {}: {e}", path.display())));
            }
        };
        Ok(Self {
            path,
            map: Mutex::new(map),
        })
    }

    fn flush(&self, map: &BTreeMap<String, String>) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)
                    .map_err(|e| ShopError::Storage(format!("create {}: {e}", dir.display())))?;
            }
        }
        let raw = serde_json::to_string_pretty(map).map_err(|e| ShopError::Storage(e.to_string()))?;
        fs::write(&self.path, raw)
            .map_err(|e| ShopError::Storage(format!("write {}: {e}", self.path.display())))
    }
}

impl StorageBackend for FileBackend {
    fn get(&self, key: &str) -> Option<String> {
        self.map.lock().ok()?.get(key).cloned()
    }

    fn put(&self, key: &str, value: &str) -> Result<()> {
        let mut map = self
            .map
            .lock()
            .map_err(|_| ShopError::Storage("store lock poisoned".into()))?;
        map.insert(key.to_string(), value.to_string());
        self.flush(&map)
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut map = self
            .map
            .lock()
            .map_err(|_| ShopError::Storage("store lock poisoned".into()))?;
        map.remove(key);
        self.flush(&map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn temp_store() -> PathBuf {
        std::env::temp_dir().join(format!("minikart-store-{}.json", Uuid::new_v4()))
    }

    #[test]
    fn test_roundtrip_across_opens() {
        let path = temp_store();
        let store = FileBackend::open(&path).unwrap();
        store.put("ic_cart", "[]").unwrap();
        assert_eq!(store.get("ic_cart").as_deref(), Some("[]"));
        drop(store);

        let reopened = FileBackend::open(&path).unwrap();
        assert_eq!(reopened.get("ic_cart").as_deref(), Some("[]"));
        reopened.remove("ic_cart").unwrap();
        assert_eq!(reopened.get("ic_cart"), None);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_corrupt_file_starts_empty() {
        let path = temp_store();
        fs::write(&path, "not json at all").unwrap();
        let store = FileBackend::open(&path).unwrap();
        assert_eq!(store.get("ic_cart"), None);
        let _ = fs::remove_file(&path);
    }
}
