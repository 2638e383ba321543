use crate::config::Config;
use crate::store::RedirectStore;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RedirectStore>,
    pub config: Arc<Config>,
}
