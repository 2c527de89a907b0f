use crate::error::{ApiError, ErrorResponse};
use crate::models::{HrefQuery, HrefResponse, ResolveQuery, RouteEntryResponse, RouteTableResponse};
use crate::router::{Location, RouteParams};
use crate::routes;
use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, Query, State},
};

/// GET /__router/routes handler - List the route table in match order
#[utoipa::path(
    get,
    path = routes::ROUTER_TABLE,
    responses(
        (status = 200, description = "Route table", body = RouteTableResponse)
    ),
    tag = "router"
)]
pub async fn routes_handler(State(state): State<AppState>) -> Json<RouteTableResponse> {
    let routes = state
        .routes
        .routes()
        .iter()
        .map(|route| RouteEntryResponse {
            name: route.name().to_string(),
            path: route.path().to_string(),
            view: route.view(),
            params: route.param().into_iter().map(str::to_string).collect(),
            source: state
                .config
                .resolve_alias(route.view().module())
                .display()
                .to_string(),
        })
        .collect();

    Json(RouteTableResponse { routes })
}

/// GET /__router/resolve handler - Resolve a location to its view
#[utoipa::path(
    get,
    path = routes::ROUTER_RESOLVE,
    params(ResolveQuery),
    responses(
        (status = 200, description = "Location resolved", body = Location),
        (status = 404, description = "No route matches", body = ErrorResponse)
    ),
    tag = "router"
)]
pub async fn resolve_handler(
    State(state): State<AppState>,
    Query(query): Query<ResolveQuery>,
) -> Result<Json<Location>, ApiError> {
    let location = Location::from(state.routes.resolve(&query.path)?);
    tracing::debug!("Resolved {} to {:?}", query.path, location.view);
    Ok(Json(location))
}

/// GET /__router/href/{name} handler - Build the path for a named route
#[utoipa::path(
    get,
    path = routes::ROUTER_HREF,
    params(
        ("name" = String, Path, description = "Route name"),
        HrefQuery
    ),
    responses(
        (status = 200, description = "Path built", body = HrefResponse),
        (status = 400, description = "Required parameter missing", body = ErrorResponse),
        (status = 404, description = "Unknown route name", body = ErrorResponse)
    ),
    tag = "router"
)]
pub async fn href_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(query): Query<HrefQuery>,
) -> Result<Json<HrefResponse>, ApiError> {
    let mut params = RouteParams::new();
    if let Some(id) = query.id {
        params.insert("id", id);
    }

    let href = state.routes.resolve_by_name(&name, &params)?;
    Ok(Json(HrefResponse { href }))
}
