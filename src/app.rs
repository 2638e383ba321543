use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api_doc::ApiDoc;
use crate::handlers::{
    create_handler, delete_handler, health_handler, list_handler, redirect_handler,
};
use crate::routes;
use crate::state::AppState;

/// Build the service router
///
/// `/register` takes POST and DELETE; every other method on it renders the
/// management page. Every other path is a redirect lookup, except GET on the
/// optional health route and the docs routes when enabled.
pub fn router(state: AppState) -> Router {
    let mut router = Router::new().route(
        routes::REGISTER,
        post(create_handler)
            .delete(delete_handler)
            .fallback(list_handler),
    );

    if let Some(path) = &state.config.health_check_path {
        router = router.route(path, get(health_handler).fallback(redirect_handler));
    }

    if state.config.api_docs_enabled {
        router = router.merge(
            SwaggerUi::new(routes::SWAGGER_UI).url(routes::OPENAPI_JSON, ApiDoc::openapi()),
        );
    }

    router
        .fallback(redirect_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}


#[cfg(test)]
mod tests {
    use super::test_support::{memory_config, request};
    use super::*;
    use crate::store::MemoryStore;
    use axum::http::StatusCode;
    use std::sync::Arc;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_docs_disabled_by_default() {
        let state = AppState {
            store: Arc::new(MemoryStore::new()),
            config: Arc::new(memory_config()),
        };

        let response = router(state)
            .oneshot(request("GET", routes::OPENAPI_JSON))
            .await
            .unwrap();

        // Falls through to redirect lookup, which finds nothing.
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_docs_served_when_enabled() {
        let mut config = memory_config();
        config.api_docs_enabled = true;
        let state = AppState {
            store: Arc::new(MemoryStore::new()),
            config: Arc::new(config),
        };

        let response = router(state)
            .oneshot(request("GET", routes::OPENAPI_JSON))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let doc: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert!(doc["paths"]["/register"].is_object());
    }
}
