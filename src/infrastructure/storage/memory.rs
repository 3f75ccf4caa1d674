#[cfg(test)]
#[path = "memory_test.rs"]
mod tests;

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use dashmap::DashMap;

use crate::domain::models::Storage;
use crate::domain::models::StorageKey;

/// Keeps values in memory only. Clones share the same map.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    values: Arc<DashMap<StorageKey, String>>,
}

impl MemoryStorage {
    pub fn peek(&self, key: StorageKey) -> Option<String> {
        return self.values.get(&key).map(|val| return val.to_string());
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    #[allow(clippy::implicit_return)]
    async fn get(&self, key: StorageKey) -> Result<Option<String>> {
        return Ok(self.peek(key));
    }

    #[allow(clippy::implicit_return)]
    async fn set(&self, key: StorageKey, value: &str) -> Result<()> {
        self.values.insert(key, value.to_string());
        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn remove(&self, key: StorageKey) -> Result<()> {
        self.values.remove(&key);
        return Ok(());
    }
}
