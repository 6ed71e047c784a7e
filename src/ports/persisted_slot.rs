//! Typed, best-effort view over one key of a [`KeyValueStore`].
//!
//! Reads never fail: a missing, unreadable or corrupt value loads as `None`
//! and the caller substitutes its default. Writes are fire-and-forget; a
//! failed write is logged and the in-memory state stays authoritative.

use std::marker::PhantomData;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::KeyValueStore;

/// One JSON document stored under a fixed key.
pub struct PersistedSlot<T> {
    store: Arc<dyn KeyValueStore>,
    key: &'static str,
    _value: PhantomData<fn() -> T>,
}

impl<T> Clone for PersistedSlot<T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            key: self.key,
            _value: PhantomData,
        }
    }
}

impl<T> PersistedSlot<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(store: Arc<dyn KeyValueStore>, key: &'static str) -> Self {
        Self {
            store,
            key,
            _value: PhantomData,
        }
    }

    pub fn key(&self) -> &'static str {
        self.key
    }

    /// Loads the stored value; `None` if absent or unusable.
    pub async fn load(&self) -> Option<T> {
        let raw = match self.store.read(self.key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(key = self.key, error = %e, "Failed to read persisted slot");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(key = self.key, error = %e, "Discarding corrupt persisted slot");
                None
            }
        }
    }

    /// Overwrites the stored value, logging failures.
    pub async fn save(&self, value: &T) {
        let json = match serde_json::to_string(value) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!(key = self.key, error = %e, "Failed to serialize persisted slot");
                return;
            }
        };

        if let Err(e) = self.store.write(self.key, &json).await {
            tracing::warn!(key = self.key, error = %e, "Failed to write persisted slot");
        }
    }

    /// Removes the stored value, logging failures.
    pub async fn clear(&self) {
        if let Err(e) = self.store.remove(self.key).await {
            tracing::warn!(key = self.key, error = %e, "Failed to clear persisted slot");
        }
    }
}
