use axum::extract::{FromRequest, Multipart, Request};
use axum::http::header::CONTENT_TYPE;
use axum::Form;

use crate::error::ApiError;
use crate::models::{RegisterForm, ValidationError};

/// Reads the registration form from either `multipart/form-data` or
/// `application/x-www-form-urlencoded`.
///
/// Unreadable bodies are reported as missing fields.
impl<S> FromRequest<S> for RegisterForm
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let pairs = if is_multipart(&req) {
            multipart_pairs(req, state).await?
        } else {
            let Form(pairs) = Form::<Vec<(String, String)>>::from_request(req, state)
                .await
                .map_err(|rejection| {
                    tracing::debug!("Rejected registration form: {}", rejection);
                    ValidationError::MissingFields
                })?;
            pairs
        };

        Ok(RegisterForm::from_pairs(pairs))
    }
}

fn is_multipart(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| {
            value
                .trim_start()
                .to_ascii_lowercase()
                .starts_with("multipart/form-data")
        })
}

async fn multipart_pairs<S>(req: Request, state: &S) -> Result<Vec<(String, String)>, ApiError>
where
    S: Send + Sync,
{
    let mut multipart = Multipart::from_request(req, state).await.map_err(|rejection| {
        tracing::debug!("Rejected multipart registration form: {}", rejection);
        ValidationError::MissingFields
    })?;

    let mut pairs = Vec::new();
    loop {
        let field = multipart.next_field().await.map_err(|err| {
            tracing::debug!("Malformed multipart registration form: {}", err);
            ValidationError::MissingFields
        })?;
        let Some(field) = field else {
            break;
        };
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        let value = field.text().await.map_err(|err| {
            tracing::debug!("Unreadable multipart field {}: {}", name, err);
            ValidationError::MissingFields
        })?;
        pairs.push((name, value));
    }

    Ok(pairs)
}
