use crate::error::ApiError;
use crate::redirect::merge_query;
use crate::state::AppState;
use axum::{
    extract::State,
    http::{header, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use url::Url;

/// Fallback handler - Redirect any non-management path
///
/// The request path is the store key. Query parameters from the request are
/// merged onto the stored target, replacing same-named ones.
#[utoipa::path(
    get,
    path = "/{short_path}",
    params(
        ("short_path" = String, Path,
            description = "Registered short path, matched verbatim with its leading '/'")
    ),
    responses(
        (status = 301, description = "Redirect to the stored target, request query merged in"),
        (status = 404, description = "No mapping for this path",
            content_type = "text/plain", body = String),
        (status = 500, description = "Store error", content_type = "text/plain", body = String)
    ),
    tag = "redirect"
)]
pub async fn redirect_handler(
    State(state): State<AppState>,
    uri: Uri,
) -> Result<Response, ApiError> {
    let key = uri.path();

    let Some(stored) = state.store.get(key).await? else {
        tracing::info!("No redirect registered for {}", key);
        return Err(ApiError::NotFound);
    };

    let target = Url::parse(&stored).map_err(|source| ApiError::CorruptTarget {
        key: key.to_string(),
        source,
    })?;
    let location = merge_query(target, uri.query());

    tracing::info!("Redirecting {} -> {}", key, location);
    Ok((
        StatusCode::MOVED_PERMANENTLY,
        [(header::LOCATION, location.to_string())],
    )
        .into_response())
}
