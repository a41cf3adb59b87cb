use crate::storage::KeyValueStore;
use anyhow::Result;
use async_trait::async_trait;
use dashmap::DashMap;

/// Non-persistent backend. State lasts for the process lifetime only; used
/// in tests and when no durable attribution is wanted.
#[derive(Default)]
pub struct MemoryStore {
    map: DashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn init(&self) -> Result<()> {
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.map.get(key).map(|entry| entry.value().clone()))
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.map.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<bool> {
        Ok(self.map.remove(key).is_some())
    }
}
