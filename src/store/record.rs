//! Write-through JSON records.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use super::storage::Storage;

/// A named record persisted as pretty-printed JSON through a storage
/// provider.
///
/// Loading never fails: a missing, unreadable, or corrupt record yields the
/// default value. Every mutation rewrites the record before returning.
/// Write failures are logged and swallowed, so the in-memory value stays
/// authoritative for the rest of the session.
pub struct JsonStore<T> {
    name: &'static str,
    storage: Arc<dyn Storage>,
    value: T,
}

impl<T> JsonStore<T>
where
    T: Default + Serialize + DeserializeOwned,
{
    /// Load the record, falling back to `T::default()` when absent or corrupt
    pub async fn load(storage: Arc<dyn Storage>, name: &'static str) -> Self {
        let value = match storage.read(name).await {
            Ok(Some(bytes)) => match serde_json::from_slice(&bytes) {
                Ok(value) => value,
                Err(err) => {
                    warn!("Corrupt {} record, starting empty: {}", name, err);
                    T::default()
                }
            },
            Ok(None) => T::default(),
            Err(err) => {
                warn!("Could not read {} record, starting empty: {}", name, err);
                T::default()
            }
        };

        Self {
            name,
            storage,
            value,
        }
    }

    /// Current value
    pub fn get(&self) -> &T {
        &self.value
    }

    /// Apply a mutation, then persist the result before returning
    pub async fn update(&mut self, mutate: impl FnOnce(&mut T)) {
        mutate(&mut self.value);
        self.save().await;
    }

    async fn save(&self) {
        let json = match serde_json::to_string_pretty(&self.value) {
            Ok(json) => json,
            Err(err) => {
                warn!("Could not serialize {} record: {}", self.name, err);
                return;
            }
        };

        if let Err(err) = self.storage.write(self.name, json.as_bytes()).await {
            warn!("Could not persist {} record: {}", self.name, err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::storage::MemoryStorage;

    #[tokio::test]
    async fn test_missing_record_loads_default() {
        let storage = Arc::new(MemoryStorage::new());
        let store: JsonStore<Vec<String>> = JsonStore::load(storage, "notes").await;

        assert!(store.get().is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_record_loads_default() {
        let storage = Arc::new(MemoryStorage::new());
        storage.write("notes", b"not json {{{").await.unwrap();

        let store: JsonStore<Vec<String>> = JsonStore::load(storage, "notes").await;

        assert!(store.get().is_empty());
    }

    #[tokio::test]
    async fn test_update_writes_through() {
        let storage = Arc::new(MemoryStorage::new());

        let mut store: JsonStore<Vec<String>> = JsonStore::load(storage.clone(), "notes").await;
        store.update(|notes| notes.push("hoppy".to_string())).await;

        // The provider holds the new state, not just the in-memory copy
        let bytes = storage.read("notes").await.unwrap().unwrap();
        let persisted: Vec<String> = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(persisted, vec!["hoppy".to_string()]);
    }
}
