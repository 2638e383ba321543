//! In-process store backend. Nothing survives a restart, so this is meant for
//! local development and tests rather than deployment.

use super::RedirectStore;
use anyhow::Result;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::BTreeMap;

#[derive(Debug, Default)]
pub struct MemoryStore {
    redirects: RwLock<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RedirectStore for MemoryStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        let redirects = self.redirects.read();
        Ok(redirects.get(key).cloned())
    }

    async fn put(&self, key: &str, value: &str) -> Result<()> {
        let mut redirects = self.redirects.write();
        redirects.insert(key.to_string(), value.to_string());
        tracing::debug!("Stored mapping for key: {}", key);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let mut redirects = self.redirects.write();
        redirects.remove(key);
        tracing::debug!("Deleted mapping for key: {}", key);
        Ok(())
    }

    async fn list_keys(&self) -> Result<Vec<String>> {
        let redirects = self.redirects.read();
        Ok(redirects.keys().cloned().collect())
    }

    async fn health_check(&self) -> Result<()> {
        Ok(())
    }
}
