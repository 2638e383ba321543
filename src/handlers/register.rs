use crate::error::ApiError;
use crate::models::{DeleteQuery, Mapping, MappingRow, RegisterForm, ValidationError};
use crate::page::render_register_page;
use crate::routes;
use crate::state::AppState;
use axum::extract::rejection::QueryRejection;
use axum::{extract::Query, extract::State, http::StatusCode, response::Html};
use futures_util::future::try_join_all;

/// GET /register handler - Management page
///
/// Lists every key, then reads each target back individually. The two steps
/// are not atomic: a key removed in between renders with an empty target.
/// Every method other than POST and DELETE lands here.
#[utoipa::path(
    get,
    path = routes::REGISTER,
    responses(
        (status = 200, description = "Management page with creation form and mapping table",
            content_type = "text/html", body = String),
        (status = 500, description = "Store error", content_type = "text/plain", body = String)
    ),
    tag = "register"
)]
pub async fn list_handler(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let keys = state.store.list_keys().await?;

    let store = &state.store;
    let rows = try_join_all(keys.into_iter().map(|key| async move {
        let target_url = store.get(&key).await?;
        Ok::<_, anyhow::Error>(MappingRow {
            short_path: key,
            target_url,
        })
    }))
    .await?;

    tracing::info!("Rendered management page with {} mappings", rows.len());
    Ok(Html(render_register_page(&rows)))
}

/// POST /register handler - Create or overwrite a mapping
///
/// Accepts url-encoded and multipart bodies. A repeated field keeps its
/// first value.
#[utoipa::path(
    post,
    path = routes::REGISTER,
    request_body(
        content = RegisterForm,
        description = "Also accepted as multipart/form-data",
        content_type = "application/x-www-form-urlencoded"
    ),
    responses(
        (status = 201, description = "Mapping stored", content_type = "text/plain", body = String),
        (status = 400, description = "Missing fields, bad short path or bad target URL",
            content_type = "text/plain", body = String),
        (status = 500, description = "Store error", content_type = "text/plain", body = String)
    ),
    tag = "register"
)]
pub async fn create_handler(
    State(state): State<AppState>,
    form: RegisterForm,
) -> Result<(StatusCode, &'static str), ApiError> {
    let mapping = Mapping::from_form(form)?;

    state
        .store
        .put(mapping.short_path.as_str(), mapping.target_url.as_str())
        .await?;

    tracing::info!(
        "Registered redirect {} -> {}",
        mapping.short_path.as_str(),
        mapping.target_url
    );
    Ok((StatusCode::CREATED, "Redirect created successfully!"))
}

/// DELETE /register handler - Remove a mapping
///
/// Deleting a key that does not exist still succeeds. A repeated `key`
/// keeps its first value.
#[utoipa::path(
    delete,
    path = routes::REGISTER,
    params(DeleteQuery),
    responses(
        (status = 200, description = "Mapping removed", content_type = "text/plain", body = String),
        (status = 400, description = "Missing key", content_type = "text/plain", body = String),
        (status = 500, description = "Store error", content_type = "text/plain", body = String)
    ),
    tag = "register"
)]
pub async fn delete_handler(
    State(state): State<AppState>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<(StatusCode, &'static str), ApiError> {
    let Query(pairs) = query.map_err(|_| ValidationError::MissingKey)?;
    let key = DeleteQuery::from_pairs(pairs).into_key()?;

    state.store.delete(&key).await?;

    tracing::info!("Deleted redirect {}", key);
    Ok((StatusCode::OK, "Redirect deleted successfully!"))
}
