use std::env;
use anyhow::{bail, Context, Result};

/// Which `RedirectStore` implementation backs the service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Spanner,
    Memory,
}

/// Connection settings for the Spanner backend
#[derive(Debug, Clone, PartialEq)]
pub struct SpannerConfig {
    pub emulator_host: Option<String>,
    pub project: String,
    pub instance: String,
    pub database: String,
    pub table: String,
}

impl SpannerConfig {
    pub fn database_path(&self) -> String {
        format!(
            "projects/{}/instances/{}/databases/{}",
            self.project, self.instance, self.database
        )
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub store_backend: StoreBackend,
    /// Present only when `store_backend` is `Spanner`
    pub spanner: Option<SpannerConfig>,
    pub service_port: u16,
    pub service_host: String,
    pub health_check_path: Option<String>,
    pub api_docs_enabled: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|name| env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    pub fn from_vars<F>(var: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let store_backend = match var("STORE_BACKEND").as_deref() {
            None | Some("spanner") => StoreBackend::Spanner,
            Some("memory") => StoreBackend::Memory,
            Some(other) => bail!("STORE_BACKEND must be one of: spanner, memory, got '{}'", other),
        };

        let spanner = match store_backend {
            StoreBackend::Spanner => Some(spanner_from_vars(&var)?),
            StoreBackend::Memory => None,
        };

        let service_port = var("SERVICE_PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse::<u16>()
            .context("SERVICE_PORT must be a valid port number (0-65535)")?;

        let service_host = var("SERVICE_HOST").unwrap_or_else(|| "0.0.0.0".to_string());

        let health_check_path = var("HEALTH_CHECK_PATH").filter(|p| !p.is_empty());
        if let Some(path) = &health_check_path {
            if !path.starts_with('/') {
                bail!("HEALTH_CHECK_PATH must start with '/', got '{}'", path);
            }
            if path == crate::routes::REGISTER {
                bail!("HEALTH_CHECK_PATH must not be {}", crate::routes::REGISTER);
            }
        }

        let api_docs_enabled = match var("API_DOCS_ENABLED").as_deref() {
            None | Some("") | Some("false") | Some("0") => false,
            Some("true") | Some("1") => true,
            Some(other) => bail!("API_DOCS_ENABLED must be true or false, got '{}'", other),
        };

        Ok(Config {
            store_backend,
            spanner,
            service_port,
            service_host,
            health_check_path,
            api_docs_enabled,
        })
    }

    pub fn log_startup(&self) {
        tracing::info!("Configuration loaded:");
        match &self.spanner {
            Some(spanner) => {
                tracing::info!("  Store backend: spanner");
                tracing::info!(
                    "  Spanner emulator: {}",
                    spanner.emulator_host.as_deref().unwrap_or("disabled (using production)")
                );
                tracing::info!("  Spanner database: {}", spanner.database_path());
                tracing::info!("  Spanner table: {}", spanner.table);
            }
            None => tracing::info!("  Store backend: memory (mappings are lost on restart)"),
        }
        tracing::info!(
            "  Health check: {}",
            self.health_check_path.as_deref().unwrap_or("disabled")
        );
        let api_docs = if self.api_docs_enabled { "enabled" } else { "disabled" };
        tracing::info!("  API docs: {}", api_docs);
        tracing::info!("  Service listening on: {}:{}", self.service_host, self.service_port);
    }
}

fn spanner_from_vars<F>(var: &F) -> Result<SpannerConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let emulator_host = var("SPANNER_EMULATOR_HOST");

    let project = var("SPANNER_PROJECT")
        .context("SPANNER_PROJECT environment variable is required")?;

    let instance = var("SPANNER_INSTANCE")
        .context("SPANNER_INSTANCE environment variable is required")?;

    let database = var("SPANNER_DATABASE")
        .context("SPANNER_DATABASE environment variable is required")?;

    let table = var("SPANNER_TABLE").unwrap_or_else(|| "redirects".to_string());
    if !is_sql_identifier(&table) {
        bail!("SPANNER_TABLE must be a plain SQL identifier, got '{}'", table);
    }

    Ok(SpannerConfig {
        emulator_host,
        project,
        instance,
        database,
        table,
    })
}

// The table name is spliced into SQL text, so only bare identifiers pass.
fn is_sql_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
