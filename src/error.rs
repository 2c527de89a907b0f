use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::proxy::ProxyError;
use crate::router::RouteError;

/// Error response type
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Response type for health check endpoint
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub mode: String,
}

/// Custom error type for dev server endpoints
///
/// Maps router and proxy failures to HTTP status codes and formats them as
/// JSON responses.
#[derive(Debug)]
pub enum ApiError {
    /// Route resolution failed
    Route(RouteError),
    /// Forwarding to the API upstream failed
    Proxy(ProxyError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Route(RouteError::NoMatch { .. } | RouteError::UnknownRoute { .. }) => {
                StatusCode::NOT_FOUND
            }
            ApiError::Route(RouteError::MissingParameter { .. }) => StatusCode::BAD_REQUEST,
            ApiError::Proxy(ProxyError::Upstream(_)) => StatusCode::BAD_GATEWAY,
            ApiError::Proxy(ProxyError::Body(_) | ProxyError::InvalidPath { .. }) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Proxy(ProxyError::PayloadTooLarge { .. }) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Proxy(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let error_message = match self {
            ApiError::Route(err) => err.to_string(),
            ApiError::Proxy(err) => {
                tracing::error!("Proxy error: {}", err);
                format!("Proxy error: {}", err)
            }
        };

        let body = Json(ErrorResponse {
            error: error_message,
        });

        (status, body).into_response()
    }
}

impl From<RouteError> for ApiError {
    fn from(err: RouteError) -> Self {
        ApiError::Route(err)
    }
}

impl From<ProxyError> for ApiError {
    fn from(err: ProxyError) -> Self {
        ApiError::Proxy(err)
    }
}
