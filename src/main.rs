mod api_doc;
mod app;
mod config;
mod error;
mod extract;
mod handlers;
mod models;
mod page;
mod redirect;
mod routes;
mod state;
mod store;

use anyhow::Context;
use config::{Config, StoreBackend};
use state::AppState;
use std::sync::Arc;
use store::{MemoryStore, RedirectStore, SpannerStore};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; real deployments set the environment directly.
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("redirector=info,tower_http=info")),
        )
        .init();

    tracing::info!("redirector starting");

    let config = Config::from_env()?;
    config.log_startup();

    let store: Arc<dyn RedirectStore> = match (config.store_backend, &config.spanner) {
        (StoreBackend::Spanner, Some(spanner)) => {
            Arc::new(SpannerStore::from_config(spanner).await?)
        }
        (StoreBackend::Spanner, None) => {
            anyhow::bail!("Spanner backend selected without Spanner settings")
        }
        (StoreBackend::Memory, _) => Arc::new(MemoryStore::new()),
    };
    tracing::info!("Using {} store", store.backend_name());

    let addr = format!("{}:{}", config.service_host, config.service_port);
    let state = AppState {
        store,
        config: Arc::new(config),
    };

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("redirector stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
