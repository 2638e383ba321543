use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// Form body for creating a mapping
#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
pub struct RegisterForm {
    #[serde(rename = "shortPath")]
    pub short_path: Option<String>,
    #[serde(rename = "targetUrl")]
    pub target_url: Option<String>,
}

/// Query parameters for deleting a mapping
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DeleteQuery {
    /// Short path of the mapping to delete
    pub key: Option<String>,
}

/// Response type for the health check endpoint
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

/// Response type for unhealthy status
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct UnhealthyResponse {
    pub status: String,
    pub error: String,
}

/// Rejections produced while reading management requests
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    MissingKey,
    MissingFields,
    InvalidShortPath,
    InvalidTargetUrl,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            ValidationError::MissingKey => "Missing key",
            ValidationError::MissingFields => "Missing required fields",
            ValidationError::InvalidShortPath => "Short path must start with /",
            ValidationError::InvalidTargetUrl => "Invalid target URL",
        };
        f.write_str(message)
    }
}

impl std::error::Error for ValidationError {}

/// A store key: always non-empty and rooted at `/`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortPath(String);

impl ShortPath {
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        if raw.starts_with('/') {
            Ok(ShortPath(raw.to_string()))
        } else {
            Err(ValidationError::InvalidShortPath)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A validated short path to target URL association
#[derive(Debug, Clone, PartialEq)]
pub struct Mapping {
    pub short_path: ShortPath,
    pub target_url: Url,
}

impl Mapping {
    /// Validate a submitted form. Empty fields count as missing.
    pub fn from_form(form: RegisterForm) -> Result<Self, ValidationError> {
        let (Some(short_path), Some(target_url)) = (
            non_empty(form.short_path),
            non_empty(form.target_url),
        ) else {
            return Err(ValidationError::MissingFields);
        };

        let short_path = ShortPath::parse(&short_path)?;
        let target_url = Url::parse(&target_url).map_err(|_| ValidationError::InvalidTargetUrl)?;

        Ok(Mapping {
            short_path,
            target_url,
        })
    }
}

impl RegisterForm {
    /// Collect the form from raw name/value pairs; the first occurrence of
    /// a repeated field wins.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut form = RegisterForm::default();
        for (name, value) in pairs {
            let slot = match name.as_str() {
                "shortPath" => &mut form.short_path,
                "targetUrl" => &mut form.target_url,
                _ => continue,
            };
            slot.get_or_insert(value);
        }
        form
    }
}

impl DeleteQuery {
    /// Same first-occurrence rule as [`RegisterForm::from_pairs`].
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let key = pairs
            .into_iter()
            .find(|(name, _)| name == "key")
            .map(|(_, value)| value);
        DeleteQuery { key }
    }

    pub fn into_key(self) -> Result<String, ValidationError> {
        non_empty(self.key).ok_or(ValidationError::MissingKey)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// One row of the management table
///
/// `target_url` is `None` when the key vanished between listing and
/// reading it back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingRow {
    pub short_path: String,
    pub target_url: Option<String>,
}
