use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api_doc::ApiDoc;
use crate::handlers::{href_handler, health_handler, resolve_handler, routes_handler, spa_fallback};
use crate::routes;
use crate::state::AppState;

/// Build the dev server: introspection endpoints, API docs, and the
/// proxy/SPA fallback for everything else
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(routes::HEALTH, get(health_handler))
        .route(routes::ROUTER_TABLE, get(routes_handler))
        .route(routes::ROUTER_RESOLVE, get(resolve_handler))
        .route(routes::ROUTER_HREF, get(href_handler))
        .merge(SwaggerUi::new(routes::SWAGGER_UI).url(routes::OPENAPI_JSON, ApiDoc::openapi()))
        .fallback(spa_fallback)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
