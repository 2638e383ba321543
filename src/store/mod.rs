//! Key-value storage for redirect mappings.
//!
//! The service treats its store as an external collaborator: a flat mapping
//! from short path to target URL with get/put/delete/list. Backends may be
//! eventually consistent, so a write is not guaranteed to be visible to the
//! next read.

use anyhow::Result;
use async_trait::async_trait;

pub mod memory;
pub mod spanner;

pub use memory::MemoryStore;
pub use spanner::SpannerStore;

#[async_trait]
pub trait RedirectStore: Send + Sync {
    /// Human-readable backend name used in logs.
    fn backend_name(&self) -> &'static str;

    /// Look up the target stored under `key`.
    ///
    /// A missing key is `Ok(None)`; errors are reserved for backend failures.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any existing value.
    async fn put(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Removing a key that does not exist succeeds.
    async fn delete(&self, key: &str) -> Result<()>;

    /// All stored keys, in whatever order the backend returns them.
    async fn list_keys(&self) -> Result<Vec<String>>;

    /// Verify the backend is reachable.
    async fn health_check(&self) -> Result<()>;
}

/// Behaviour every backend must share, run against each implementation.
#[cfg(test)]
pub(crate) mod contract {
    use super::RedirectStore;

    pub async fn get_missing(store: &dyn RedirectStore) {
        assert_eq!(store.get("/contract-missing").await.unwrap(), None);
    }

    pub async fn put_then_get(store: &dyn RedirectStore) {
        store.put("/contract-put", "https://example.com/a").await.unwrap();
        assert_eq!(
            store.get("/contract-put").await.unwrap().as_deref(),
            Some("https://example.com/a")
        );
    }

    pub async fn put_overwrites(store: &dyn RedirectStore) {
        store.put("/contract-overwrite", "https://example.com/old").await.unwrap();
        store.put("/contract-overwrite", "https://example.com/new").await.unwrap();
        assert_eq!(
            store.get("/contract-overwrite").await.unwrap().as_deref(),
            Some("https://example.com/new")
        );
    }

    pub async fn delete_removes(store: &dyn RedirectStore) {
        store.put("/contract-delete", "https://example.com/").await.unwrap();
        store.delete("/contract-delete").await.unwrap();
        assert_eq!(store.get("/contract-delete").await.unwrap(), None);
    }

    pub async fn delete_missing_is_ok(store: &dyn RedirectStore) {
        store.delete("/contract-never-existed").await.unwrap();
    }

    pub async fn list_contains_written_keys(store: &dyn RedirectStore) {
        store.put("/contract-list-a", "https://example.com/a").await.unwrap();
        store.put("/contract-list-b", "https://example.com/b").await.unwrap();

        let keys = store.list_keys().await.unwrap();
        assert!(keys.contains(&"/contract-list-a".to_string()));
        assert!(keys.contains(&"/contract-list-b".to_string()));
    }
}
