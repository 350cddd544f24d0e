//! # Cart Persistence
//!
//! The cart survives restarts through a pluggable storage backend.
//!
//! ## Persisted Schema
//! Only the item list is persisted. Transient UI state (the open/closed
//! cart panel) deliberately has no column here; reopening the app never
//! pops the panel open.
//!
//! ```json
//! { "cart": [ { "id": "...", "productId": "...", ... } ] }
//! ```

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::debug;

use opaline_core::CartItem;

use crate::error::{ClientError, ClientResult};

/// The on-disk cart snapshot.
///
/// Deliberately narrow: item list only, no UI flags.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedCart {
    pub cart: Vec<CartItem>,
}

/// Storage backend for the persisted cart.
pub trait CartStorage {
    /// Loads the persisted cart, `None` if nothing was ever saved.
    fn load(&self) -> ClientResult<Option<PersistedCart>>;

    /// Saves the cart snapshot, replacing any previous one.
    fn save(&self, cart: &PersistedCart) -> ClientResult<()>;
}

// =============================================================================
// JSON File Storage
// =============================================================================

/// Cart storage as a single JSON file on disk.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileStorage { path: path.into() }
    }
}

impl CartStorage for JsonFileStorage {
    fn load(&self) -> ClientResult<Option<PersistedCart>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let raw = fs::read_to_string(&self.path)
            .map_err(|e| ClientError::Storage(e.to_string()))?;

        let cart = serde_json::from_str(&raw)
            .map_err(|e| ClientError::Storage(e.to_string()))?;

        debug!(path = %self.path.display(), "Loaded persisted cart");
        Ok(Some(cart))
    }

    fn save(&self, cart: &PersistedCart) -> ClientResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| ClientError::Storage(e.to_string()))?;
        }

        let raw = serde_json::to_string(cart)
            .map_err(|e| ClientError::Storage(e.to_string()))?;

        fs::write(&self.path, raw).map_err(|e| ClientError::Storage(e.to_string()))?;

        debug!(path = %self.path.display(), "Saved persisted cart");
        Ok(())
    }
}

// =============================================================================
// In-Memory Storage
// =============================================================================

/// In-memory storage backend, used by tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    snapshot: std::sync::Mutex<Option<String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        MemoryStorage::default()
    }

    /// Creates a backend pre-seeded with a raw snapshot.
    ///
    /// Tests use this to simulate earlier sessions and corrupt files.
    pub fn with_raw(raw: impl Into<String>) -> Self {
        MemoryStorage {
            snapshot: std::sync::Mutex::new(Some(raw.into())),
        }
    }

    /// Raw persisted JSON, if any. Lets tests assert on the exact schema.
    pub fn raw(&self) -> Option<String> {
        match self.snapshot.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl CartStorage for MemoryStorage {
    fn load(&self) -> ClientResult<Option<PersistedCart>> {
        let guard = self
            .snapshot
            .lock()
            .map_err(|_| ClientError::Storage("storage lock poisoned".to_string()))?;

        match guard.as_deref() {
            Some(raw) => {
                let cart = serde_json::from_str(raw)
                    .map_err(|e| ClientError::Storage(e.to_string()))?;
                Ok(Some(cart))
            }
            None => Ok(None),
        }
    }

    fn save(&self, cart: &PersistedCart) -> ClientResult<()> {
        let raw = serde_json::to_string(cart)
            .map_err(|e| ClientError::Storage(e.to_string()))?;

        let mut guard = self
            .snapshot
            .lock()
            .map_err(|_| ClientError::Storage("storage lock poisoned".to_string()))?;
        *guard = Some(raw);
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use opaline_core::Product;

    fn product() -> Product {
        Product {
            id: "p1".into(),
            name: "Ring".into(),
            price_cents: 2000,
            stock_quantity: 5,
            images: vec!["ring.jpg".into()],
        }
    }

    #[test]
    fn test_memory_round_trip() {
        let storage = MemoryStorage::new();
        assert!(storage.load().unwrap().is_none());

        let snapshot = PersistedCart {
            cart: vec![CartItem::from_product(&product(), 2)],
        };
        storage.save(&snapshot).unwrap();

        let loaded = storage.load().unwrap().unwrap();
        assert_eq!(loaded.cart.len(), 1);
        assert_eq!(loaded.cart[0].quantity, 2);
        assert_eq!(loaded.cart[0].unit_price_cents, 2000);
    }

    #[test]
    fn test_persisted_schema_is_cart_only() {
        let storage = MemoryStorage::new();
        storage
            .save(&PersistedCart {
                cart: vec![CartItem::from_product(&product(), 1)],
            })
            .unwrap();

        let raw = storage.raw().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["cart"]);
    }

    #[test]
    fn test_json_file_round_trip() {
        let path = std::env::temp_dir().join(format!("opaline-cart-{}.json", uuid::Uuid::new_v4()));
        let storage = JsonFileStorage::new(&path);
        assert!(storage.load().unwrap().is_none());

        storage
            .save(&PersistedCart {
                cart: vec![CartItem::from_product(&product(), 3)],
            })
            .unwrap();

        let loaded = storage.load().unwrap().unwrap();
        assert_eq!(loaded.cart[0].quantity, 3);

        let _ = std::fs::remove_file(&path);
    }
}
