use axum::body::{Body, to_bytes};
use axum::http::{HeaderMap, HeaderName, Request, Response, header};
use http_body_util::LengthLimitError;
use std::error::Error as StdError;

use super::ProxyRule;

/// Largest request body the dev proxy will buffer
const MAX_BODY_BYTES: usize = 32 * 1024 * 1024;

/// Errors while forwarding a single request upstream
#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    #[error("invalid upstream url: {0}")]
    InvalidUpstreamUrl(#[from] url::ParseError),

    #[error("path '{path}' contains dot segments or escapes the upstream base path")]
    InvalidPath { path: String },

    #[error("request body exceeds {limit} bytes")]
    PayloadTooLarge { limit: usize },

    #[error("failed to read request body: {0}")]
    Body(#[from] axum::Error),

    #[error("upstream request failed: {0}")]
    Upstream(#[from] reqwest::Error),

    #[error("failed to build proxied response: {0}")]
    Response(#[from] axum::http::Error),
}

fn is_hop_by_hop(name: &HeaderName) -> bool {
    matches!(
        name.as_str(),
        "connection"
            | "keep-alive"
            | "proxy-connection"
            | "proxy-authenticate"
            | "proxy-authorization"
            | "te"
            | "trailer"
            | "transfer-encoding"
            | "upgrade"
    )
}

/// Copy the end-to-end headers of one hop
///
/// Drops the fixed hop-by-hop set plus every header the `Connection` header
/// names for this hop.
fn end_to_end_headers(src: &HeaderMap, drop_host: bool) -> HeaderMap {
    let listed: Vec<HeaderName> = src
        .get_all(header::CONNECTION)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(','))
        .filter_map(|token| HeaderName::from_bytes(token.trim().as_bytes()).ok())
        .collect();

    let mut headers = HeaderMap::with_capacity(src.len());
    for (name, value) in src {
        if is_hop_by_hop(name) || listed.contains(name) || (drop_host && name == header::HOST) {
            continue;
        }
        headers.append(name.clone(), value.clone());
    }
    headers
}

fn is_length_limit(err: &axum::Error) -> bool {
    let mut source: Option<&(dyn StdError + 'static)> = Some(err);
    while let Some(current) = source {
        if current.is::<LengthLimitError>() {
            return true;
        }
        source = current.source();
    }
    false
}

/// Forward a request to the rule's upstream and relay the response
///
/// Method, end-to-end headers and body are preserved. With `change_origin`
/// the client's Host header is dropped so the upstream sees its own host.
/// Redirects are relayed, not followed; the client must be built that way.
/// The request body is buffered up to [`MAX_BODY_BYTES`]; the response body
/// is streamed back as it arrives.
pub async fn forward(
    client: &reqwest::Client,
    rule: &ProxyRule,
    request: Request<Body>,
) -> Result<Response<Body>, ProxyError> {
    let (parts, body) = request.into_parts();
    let url = rule.upstream_url(parts.uri.path(), parts.uri.query())?;
    let body = to_bytes(body, MAX_BODY_BYTES).await.map_err(|err| {
        if is_length_limit(&err) {
            ProxyError::PayloadTooLarge {
                limit: MAX_BODY_BYTES,
            }
        } else {
            ProxyError::Body(err)
        }
    })?;

    let headers = end_to_end_headers(&parts.headers, rule.change_origin());

    tracing::debug!("Proxying {} {} -> {}", parts.method, parts.uri, url);

    let upstream = client
        .request(parts.method, url)
        .headers(headers)
        .body(body)
        .send()
        .await?;

    let status = upstream.status();
    tracing::debug!("Upstream responded {}", status);

    let mut response = Response::builder().status(status);
    if let Some(out) = response.headers_mut() {
        *out = end_to_end_headers(upstream.headers(), false);
    }

    Ok(response.body(Body::from_stream(upstream.bytes_stream()))?)
}
