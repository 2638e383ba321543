use anyhow::{Context, Result};
use async_trait::async_trait;
use gcloud_spanner::client::{Client, ClientConfig};
use gcloud_spanner::key::Key;
use gcloud_spanner::mutation::{delete, insert_or_update};
use gcloud_spanner::statement::Statement;
use std::sync::Arc;

use super::RedirectStore;
use crate::config::SpannerConfig;

/// Redirect store backed by a single Spanner table
///
/// The table is provisioned outside this service (see `schema/redirects.sql`)
/// and holds one row per mapping: `short_path` as primary key and
/// `target_url` as the value.
#[derive(Clone)]
pub struct SpannerStore {
    inner: Arc<Client>,
    table: String,
}

impl SpannerStore {
    /// Connect to the configured database
    ///
    /// The gcloud-spanner library automatically detects the
    /// SPANNER_EMULATOR_HOST environment variable and connects to
    /// the emulator when set, or production Spanner otherwise.
    pub async fn from_config(config: &SpannerConfig) -> Result<Self> {
        let database_path = config.database_path();

        match &config.emulator_host {
            Some(host) => tracing::info!("Connecting to Spanner emulator at: {}", host),
            None => tracing::info!("Connecting to production Spanner"),
        }

        let client = Client::new(&database_path, ClientConfig::default())
            .await
            .context("Failed to create Spanner client")?;

        tracing::info!(
            "Successfully connected to Spanner database: {}",
            database_path
        );

        Ok(Self {
            inner: Arc::new(client),
            table: config.table.clone(),
        })
    }
}

#[async_trait]
impl RedirectStore for SpannerStore {
    fn backend_name(&self) -> &'static str {
        "spanner"
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut statement = Statement::new(&format!(
            "SELECT target_url FROM {} WHERE short_path = @short_path",
            self.table
        ));
        statement.add_param("short_path", &key.to_string());

        let mut tx = self
            .inner
            .single()
            .await
            .context("Failed to create read transaction")?;

        let mut result_set = tx
            .query(statement)
            .await
            .context("Failed to query mapping from Spanner")?;

        if let Some(row) = result_set.next().await? {
            let target_url: String = row.column_by_name("target_url")?;
            tracing::debug!("Read mapping for key: {}", key);
            Ok(Some(target_url))
        } else {
            tracing::debug!("No mapping for key: {}", key);
            Ok(None)
        }
    }

    async fn put(&self, key: &str, value: &str) -> Result<()> {
        let mutation = insert_or_update(
            &self.table,
            &["short_path", "target_url"],
            &[&key.to_string(), &value.to_string()],
        );

        self.inner
            .apply(vec![mutation])
            .await
            .context("Failed to upsert mapping to Spanner")?;

        tracing::debug!("Upserted mapping for key: {}", key);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        // Deleting an absent primary key is a no-op in Spanner.
        let mutation = delete(&self.table, Key::new(&key.to_string()));

        self.inner
            .apply(vec![mutation])
            .await
            .context("Failed to delete mapping from Spanner")?;

        tracing::debug!("Deleted mapping for key: {}", key);
        Ok(())
    }

    async fn list_keys(&self) -> Result<Vec<String>> {
        let statement = Statement::new(&format!(
            "SELECT short_path FROM {} ORDER BY short_path ASC",
            self.table
        ));

        let mut tx = self
            .inner
            .single()
            .await
            .context("Failed to create read transaction for listing")?;

        let mut result_set = tx
            .query(statement)
            .await
            .context("Failed to list mappings from Spanner")?;

        let mut keys = Vec::new();
        while let Some(row) = result_set.next().await? {
            keys.push(row.column_by_name::<String>("short_path")?);
        }

        tracing::debug!("Listed {} keys", keys.len());
        Ok(keys)
    }

    /// Perform a health check by executing a simple query
    async fn health_check(&self) -> Result<()> {
        let statement = Statement::new("SELECT 1");

        let mut tx = self
            .inner
            .single()
            .await
            .context("Failed to create health check transaction")?;

        let mut result_set = tx
            .query(statement)
            .await
            .context("Failed to execute health check query")?;

        if result_set.next().await?.is_some() {
            tracing::debug!("Health check query succeeded");
            Ok(())
        } else {
            Err(anyhow::anyhow!("Health check query returned no results"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::contract;

    fn emulator_config() -> SpannerConfig {
        SpannerConfig {
            emulator_host: Some("localhost:9010".to_string()),
            project: "test-project".to_string(),
            instance: "test-instance".to_string(),
            database: "test-database".to_string(),
            table: "redirects".to_string(),
        }
    }

    // Requires a running emulator with the `redirects` table from
    // schema/redirects.sql already created.
    async fn emulator_store() -> SpannerStore {
        unsafe {
            std::env::set_var("SPANNER_EMULATOR_HOST", "localhost:9010");
        }

        SpannerStore::from_config(&emulator_config())
            .await
            .expect("Failed to create Spanner store")
    }

    #[test]
    fn test_store_is_clonable() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<SpannerStore>();
    }

    #[test]
    fn test_store_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SpannerStore>();
    }

    #[tokio::test]
    #[ignore = "requires the Spanner emulator"]
    async fn get_missing() {
        contract::get_missing(&emulator_store().await).await;
    }

    #[tokio::test]
    #[ignore = "requires the Spanner emulator"]
    async fn put_then_get() {
        contract::put_then_get(&emulator_store().await).await;
    }

    #[tokio::test]
    #[ignore = "requires the Spanner emulator"]
    async fn put_overwrites() {
        contract::put_overwrites(&emulator_store().await).await;
    }

    #[tokio::test]
    #[ignore = "requires the Spanner emulator"]
    async fn delete_removes() {
        contract::delete_removes(&emulator_store().await).await;
    }

    #[tokio::test]
    #[ignore = "requires the Spanner emulator"]
    async fn delete_missing_is_ok() {
        contract::delete_missing_is_ok(&emulator_store().await).await;
    }

    #[tokio::test]
    #[ignore = "requires the Spanner emulator"]
    async fn list_contains_written_keys() {
        contract::list_contains_written_keys(&emulator_store().await).await;
    }

    #[tokio::test]
    #[ignore = "requires the Spanner emulator"]
    async fn health_check_succeeds() {
        emulator_store().await.health_check().await.unwrap();
    }
}
