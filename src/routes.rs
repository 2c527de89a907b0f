// Route path constants - single source of truth for all dev server endpoints

pub const HEALTH: &str = "/health";
pub const ROUTER_TABLE: &str = "/__router/routes";
pub const ROUTER_RESOLVE: &str = "/__router/resolve";
pub const ROUTER_HREF: &str = "/__router/href/{name}";
pub const SWAGGER_UI: &str = "/swagger-ui";
pub const OPENAPI_JSON: &str = "/api-docs/openapi.json";

/// Endpoints the dev server answers itself, with whether the path is a subtree
const RESERVED: [(&str, bool); 7] = [
    (HEALTH, false),
    (ROUTER_TABLE, false),
    (ROUTER_RESOLVE, false),
    ("/__router/href/", true),
    (SWAGGER_UI, false),
    ("/swagger-ui/", true),
    (OPENAPI_JSON, false),
];

/// First dev endpoint a proxy prefix would overlap, if any
///
/// Endpoints are matched before the proxy fallback, so an overlapping prefix
/// would silently lose those requests.
pub fn shadowed_endpoint(prefix: &str) -> Option<&'static str> {
    RESERVED
        .iter()
        .find(|(endpoint, subtree)| {
            endpoint.starts_with(prefix) || (*subtree && prefix.starts_with(endpoint))
        })
        .map(|(endpoint, _)| *endpoint)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shadowed_endpoint() {
        assert_eq!(shadowed_endpoint("/api"), Some(OPENAPI_JSON));
        assert_eq!(shadowed_endpoint("/h"), Some(HEALTH));
        assert_eq!(shadowed_endpoint("/__router"), Some(ROUTER_TABLE));
        assert_eq!(shadowed_endpoint("/__router/href/Payments"), Some("/__router/href/"));
        assert_eq!(shadowed_endpoint("/swagger-ui/index.html"), Some("/swagger-ui/"));
    }

    #[test]
    fn test_default_prefix_shadows_nothing() {
        assert_eq!(shadowed_endpoint("/api/v1"), None);
        assert_eq!(shadowed_endpoint("/backend"), None);
        assert_eq!(shadowed_endpoint("/api-docs/openapi.json.bak"), None);
    }
}
