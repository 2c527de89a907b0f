use utoipa::OpenApi;

use crate::error::{ErrorResponse, HealthResponse};
use crate::handlers;
use crate::models::{HrefResponse, RouteEntryResponse, RouteTableResponse};
use crate::router::{Location, RouteParams, ViewId};

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "payments-console dev server",
        version = "0.1.0",
        description = "Development server for the payments console: SPA hosting, route table introspection and API proxy"
    ),
    paths(
        handlers::health::health_handler,
        handlers::router::routes_handler,
        handlers::router::resolve_handler,
        handlers::router::href_handler
    ),
    components(
        schemas(
            HealthResponse,
            ErrorResponse,
            RouteTableResponse,
            RouteEntryResponse,
            HrefResponse,
            Location,
            RouteParams,
            ViewId
        )
    ),
    tags(
        (name = "health", description = "Health check operations"),
        (name = "router", description = "Client-side route table operations")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_router_paths() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();

        assert!(paths.iter().any(|p| p.as_str() == crate::routes::HEALTH));
        assert!(paths.iter().any(|p| p.as_str() == crate::routes::ROUTER_RESOLVE));
        assert!(paths.iter().any(|p| p.as_str() == crate::routes::ROUTER_HREF));
    }
}
