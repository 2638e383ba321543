use utoipa::OpenApi;

use crate::handlers;
use crate::models::RegisterForm;

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "redirector API",
        version = "0.1.0",
        description = "Short path to URL redirects with a small management page"
    ),
    paths(
        handlers::register::list_handler,
        handlers::register::create_handler,
        handlers::register::delete_handler,
        handlers::redirect::redirect_handler
    ),
    components(
        schemas(RegisterForm)
    ),
    tags(
        (name = "register", description = "Mapping management"),
        (name = "redirect", description = "Redirect lookup")
    )
)]
pub struct ApiDoc;
