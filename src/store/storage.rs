//! Storage providers for persisted records.
//!
//! Stores write through to a [`Storage`] implementation injected at
//! construction. [`FileStorage`] is the durable provider; [`MemoryStorage`]
//! backs tests and throwaway sessions.

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::fs;
use tokio::sync::Mutex;

/// A named-record byte store.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Read a record's bytes; `Ok(None)` when the record does not exist
    async fn read(&self, name: &str) -> Result<Option<Vec<u8>>>;

    /// Write a record's bytes, creating the record if missing
    async fn write(&self, name: &str, bytes: &[u8]) -> Result<()>;
}

/// Directory of `<name>.json` files.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Keep records under the given directory
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn record_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.json", name))
    }
}

#[async_trait]
impl Storage for FileStorage {
    async fn read(&self, name: &str) -> Result<Option<Vec<u8>>> {
        let path = self.record_path(name);

        if !path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&path)
            .await
            .with_context(|| format!("Failed to read record: {}", path.display()))?;

        Ok(Some(bytes))
    }

    async fn write(&self, name: &str, bytes: &[u8]) -> Result<()> {
        let path = self.record_path(name);

        // Ensure the data directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        fs::write(&path, bytes)
            .await
            .with_context(|| format!("Failed to write record: {}", path.display()))?;

        Ok(())
    }
}

/// In-memory provider for tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    records: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn read(&self, name: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.records.lock().await.get(name).cloned())
    }

    async fn write(&self, name: &str, bytes: &[u8]) -> Result<()> {
        self.records
            .lock()
            .await
            .insert(name.to_string(), bytes.to_vec());
        Ok(())
    }
}
