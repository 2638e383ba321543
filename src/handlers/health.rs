use crate::models::{HealthResponse, UnhealthyResponse};
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};

/// Health check handler, mounted at `HEALTH_CHECK_PATH` when configured
///
/// Asks the store to prove it is reachable.
/// Returns 200 OK if it is, 503 Service Unavailable otherwise.
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<HealthResponse>), (StatusCode, Json<UnhealthyResponse>)> {
    match state.store.health_check().await {
        Ok(_) => {
            tracing::debug!("Health check passed ({})", state.store.backend_name());
            Ok((
                StatusCode::OK,
                Json(HealthResponse {
                    status: "healthy".to_string(),
                }),
            ))
        }
        Err(e) => {
            tracing::error!("Health check failed ({}): {}", state.store.backend_name(), e);
            Err((
                StatusCode::SERVICE_UNAVAILABLE,
                Json(UnhealthyResponse {
                    status: "unhealthy".to_string(),
                    error: format!("Cannot reach store: {}", e),
                }),
            ))
        }
    }
}
