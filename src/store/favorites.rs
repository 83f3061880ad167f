//! Persisted favorites set.

use std::sync::Arc;

use tokio::sync::broadcast;
use tracing::debug;

use super::record::JsonStore;
use super::storage::Storage;
use crate::domain::{Beer, BeerKey};

/// Record name under the storage provider
const RECORD: &str = "favorites";

/// Event emitted when the favorites set changes.
#[derive(Debug, Clone, PartialEq)]
pub enum FavoriteChange {
    Added(BeerKey),
    Removed(BeerKey),
}

/// The user's saved beers, persisted as a JSON array of full items.
///
/// Membership is by natural key: adding a beer whose name and brewery are
/// already present is a no-op. Mutations persist before returning and
/// notify subscribers afterwards.
pub struct FavoriteSet {
    record: JsonStore<Vec<Beer>>,
    changes: broadcast::Sender<FavoriteChange>,
}

impl FavoriteSet {
    /// Load favorites from the provider; missing or corrupt state starts empty
    pub async fn load(storage: Arc<dyn Storage>) -> Self {
        let record = JsonStore::load(storage, RECORD).await;
        let (changes, _) = broadcast::channel(16);
        Self { record, changes }
    }

    /// Subscribe to change notifications
    pub fn subscribe(&self) -> broadcast::Receiver<FavoriteChange> {
        self.changes.subscribe()
    }

    /// All saved beers, oldest first
    pub fn beers(&self) -> &[Beer] {
        self.record.get()
    }

    pub fn len(&self) -> usize {
        self.record.get().len()
    }

    pub fn is_empty(&self) -> bool {
        self.record.get().is_empty()
    }

    /// Whether a beer with this key is saved
    pub fn contains(&self, key: &BeerKey) -> bool {
        self.record.get().iter().any(|beer| beer.key() == *key)
    }

    /// Look up a saved beer by key
    pub fn get(&self, key: &BeerKey) -> Option<&Beer> {
        self.record.get().iter().find(|beer| beer.key() == *key)
    }

    /// Save a beer. Returns false and persists nothing when the key is
    /// already present.
    pub async fn add(&mut self, beer: Beer) -> bool {
        let key = beer.key();
        if self.contains(&key) {
            return false;
        }

        self.record.update(|beers| beers.push(beer)).await;
        debug!("Favorite added: {}", key);

        let _ = self.changes.send(FavoriteChange::Added(key));
        true
    }

    /// Remove a beer by key, returning it if it was saved
    pub async fn remove(&mut self, key: &BeerKey) -> Option<Beer> {
        let position = self
            .record
            .get()
            .iter()
            .position(|beer| beer.key() == *key)?;

        let mut removed = None;
        self.record
            .update(|beers| removed = Some(beers.remove(position)))
            .await;
        debug!("Favorite removed: {}", key);

        let _ = self.changes.send(FavoriteChange::Removed(key.clone()));
        removed
    }

    /// Remove the beer if saved, save it otherwise. Returns true when the
    /// beer is saved after the call.
    pub async fn toggle(&mut self, beer: Beer) -> bool {
        let key = beer.key();
        if self.contains(&key) {
            self.remove(&key).await;
            false
        } else {
            self.add(beer).await
        }
    }
}
