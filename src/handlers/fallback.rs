use crate::error::ApiError;
use crate::proxy;
use crate::state::AppState;
use axum::{
    body::Body,
    extract::{Request, State},
    http::Method,
    response::Response,
};
use tower::ServiceExt;
use tower_http::services::{ServeDir, ServeFile};

/// Name of the SPA shell inside the static directory
pub const INDEX_FILE: &str = "index.html";

/// Fallback for every request no dev server endpoint claims
///
/// API-prefixed requests go to the proxy. Reads of `/` or of any path in the
/// route table get the SPA shell so client-side history works on reload.
/// Everything else is served from the static directory.
pub async fn spa_fallback(
    State(state): State<AppState>,
    request: Request,
) -> Result<Response, ApiError> {
    let path = request.uri().path().to_string();

    if state.config.proxy.should_proxy(&path) {
        let response = proxy::forward(&state.http_client, &state.config.proxy, request).await?;
        tracing::info!("Proxied {} -> {}", path, response.status());
        return Ok(response);
    }

    let is_read = matches!(*request.method(), Method::GET | Method::HEAD);
    if is_read && (path == "/" || state.routes.resolve(&path).is_ok()) {
        tracing::debug!("Serving SPA shell for {}", path);
        let index = ServeFile::new(state.config.static_dir.join(INDEX_FILE));
        return match index.oneshot(request).await {
            Ok(response) => Ok(response.map(Body::new)),
            Err(never) => match never {},
        };
    }

    match ServeDir::new(&state.config.static_dir).oneshot(request).await {
        Ok(response) => Ok(response.map(Body::new)),
        Err(never) => match never {},
    }
}
