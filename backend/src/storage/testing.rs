//! Store wrappers for exercising failure paths in tests.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{bail, Result};
use async_trait::async_trait;

use super::traits::KeyValueStore;

/// Delegates to an inner store, but refuses writes while switched to fail.
#[derive(Clone)]
pub struct FlakyStore<S: KeyValueStore> {
    inner: S,
    failing: Arc<AtomicBool>,
}

impl<S: KeyValueStore> FlakyStore<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            failing: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn fail_writes(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

#[async_trait]
impl<S: KeyValueStore> KeyValueStore for FlakyStore<S> {
    async fn get_value(&self, key: &str) -> Result<Option<String>> {
        self.inner.get_value(key).await
    }

    async fn put_value(&self, key: &str, value: &str) -> Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            bail!("disk full while writing {}", key);
        }
        self.inner.put_value(key, value).await
    }
}
