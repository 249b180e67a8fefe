//! # Storage Traits
//!
//! The ledger is persisted as a handful of JSON blobs under well-known keys,
//! so the only capability storage has to offer is string get/put.

use anyhow::Result;
use async_trait::async_trait;

/// Key-value persistence used by the gateway.
///
/// Writes replace the whole value for a key; there is no partial update.
#[async_trait]
pub trait KeyValueStore: Send + Sync + Clone + 'static {
    /// Retrieve the value stored under `key`, if any
    async fn get_value(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, overwriting any existing value
    async fn put_value(&self, key: &str, value: &str) -> Result<()>;
}
