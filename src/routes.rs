// Route path constants - single source of truth for all fixed paths

pub const REGISTER: &str = "/register";
pub const SWAGGER_UI: &str = "/swagger-ui";
pub const OPENAPI_JSON: &str = "/api-docs/openapi.json";
