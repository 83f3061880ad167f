//! Persisted star ratings.

use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::sync::broadcast;
use tracing::debug;

use super::record::JsonStore;
use super::storage::Storage;
use crate::domain::BeerKey;

/// Record name under the storage provider
const RECORD: &str = "ratings";

/// Event emitted when a rating is set or overwritten.
#[derive(Debug, Clone, PartialEq)]
pub struct RatingChange {
    pub key: BeerKey,
    pub rating: u8,
}

/// Star ratings persisted as one JSON object keyed by `"<name>|<brewery>"`.
///
/// A beer without an entry reads as 0. Ratings are conventionally 1 to 5;
/// the map stores whatever it is handed, so callers validate at the input
/// edge.
pub struct RatingMap {
    record: JsonStore<BTreeMap<String, u8>>,
    changes: broadcast::Sender<RatingChange>,
}

impl RatingMap {
    /// Load ratings from the provider; missing or corrupt state starts empty
    pub async fn load(storage: Arc<dyn Storage>) -> Self {
        let record = JsonStore::load(storage, RECORD).await;
        let (changes, _) = broadcast::channel(16);
        Self { record, changes }
    }

    /// Subscribe to change notifications
    pub fn subscribe(&self) -> broadcast::Receiver<RatingChange> {
        self.changes.subscribe()
    }

    /// Rating for a beer; 0 when none has been given
    pub fn get(&self, key: &BeerKey) -> u8 {
        self.record
            .get()
            .get(&key.storage_key())
            .copied()
            .unwrap_or(0)
    }

    /// Set or overwrite a rating, persisting before returning
    pub async fn set(&mut self, key: &BeerKey, rating: u8) {
        self.record
            .update(|ratings| {
                ratings.insert(key.storage_key(), rating);
            })
            .await;
        debug!("Rated {}: {}", key, rating);

        let _ = self.changes.send(RatingChange {
            key: key.clone(),
            rating,
        });
    }

    /// Remove a rating. Returns false and persists nothing when the beer
    /// was never rated; subscribers see the beer return to 0.
    pub async fn clear(&mut self, key: &BeerKey) -> bool {
        let storage_key = key.storage_key();
        if !self.record.get().contains_key(&storage_key) {
            return false;
        }

        self.record
            .update(|ratings| {
                ratings.remove(&storage_key);
            })
            .await;
        debug!("Rating cleared: {}", key);

        let _ = self.changes.send(RatingChange {
            key: key.clone(),
            rating: 0,
        });
        true
    }
}
