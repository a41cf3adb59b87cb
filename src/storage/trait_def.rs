use anyhow::Result;
use async_trait::async_trait;

/// Storage port for the single referrer scalar. Backends only need to hold
/// plain string values under string keys; writes of one value are atomic.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Initialize the backing store (create tables, etc.)
    async fn init(&self) -> Result<()>;

    /// Read the value stored under `key`
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, overwriting any existing value
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove the value under `key`; returns whether a value was present
    async fn remove(&self, key: &str) -> Result<bool>;
}
