//! Development API proxy
//!
//! Requests under the API prefix are forwarded to the backend named by
//! `VITE_API_BASE_URL`, with the prefix stripped.

mod forward;

pub use forward::{ProxyError, forward};

use url::Url;

pub const DEFAULT_PREFIX: &str = "/api/v1";

/// Startup-time proxy configuration errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProxyConfigError {
    #[error("{var} environment variable is required")]
    Missing { var: &'static str },

    #[error("{var} is malformed ('{value}'): {reason}")]
    Malformed {
        var: &'static str,
        value: String,
        reason: String,
    },

    #[error("proxy prefix '{prefix}' must start with '/' and not be just '/'")]
    InvalidPrefix { prefix: String },

    #[error("proxy prefix '{prefix}' would shadow dev server endpoint '{endpoint}'")]
    ShadowsEndpoint {
        prefix: String,
        endpoint: &'static str,
    },
}

/// One request-rewriting rule of the dev server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyRule {
    match_prefix: String,
    target: Url,
    change_origin: bool,
}

impl ProxyRule {
    pub fn new(
        match_prefix: impl Into<String>,
        target: Url,
        change_origin: bool,
    ) -> Result<Self, ProxyConfigError> {
        let match_prefix = match_prefix.into();
        if !match_prefix.starts_with('/') || match_prefix == "/" {
            return Err(ProxyConfigError::InvalidPrefix {
                prefix: match_prefix,
            });
        }
        Ok(Self {
            match_prefix,
            target,
            change_origin,
        })
    }

    pub fn match_prefix(&self) -> &str {
        &self.match_prefix
    }

    pub fn change_origin(&self) -> bool {
        self.change_origin
    }

    pub fn target_origin(&self) -> &Url {
        &self.target
    }

    pub fn should_proxy(&self, request_path: &str) -> bool {
        request_path.starts_with(&self.match_prefix)
    }

    /// Strip the prefix once; the result always starts with '/'
    pub fn rewrite_path(&self, request_path: &str) -> String {
        let rest = request_path
            .strip_prefix(self.match_prefix.as_str())
            .unwrap_or(request_path);
        if rest.starts_with('/') {
            rest.to_string()
        } else {
            format!("/{rest}")
        }
    }

    /// Upstream URL for a request path, keeping any base path on the target
    ///
    /// Dot segments are rejected rather than normalized, so a request can
    /// never reach a path outside the target's base path.
    pub fn upstream_url(&self, request_path: &str, query: Option<&str>) -> Result<Url, ProxyError> {
        let path = self.rewrite_path(request_path);
        if path.contains('\\') || path.split('/').any(is_dot_segment) {
            return Err(ProxyError::InvalidPath { path });
        }

        let base = self.target.as_str().trim_end_matches('/');
        let mut raw = format!("{}{}", base, path);
        if let Some(query) = query {
            raw.push('?');
            raw.push_str(query);
        }
        let url = Url::parse(&raw)?;

        let base_path = self.target.path().trim_end_matches('/');
        if !url.path().starts_with(base_path) {
            return Err(ProxyError::InvalidPath { path });
        }
        Ok(url)
    }
}

/// `.` or `..`, including the percent-encoded forms URL parsers treat the same
fn is_dot_segment(segment: &str) -> bool {
    let lower = segment.to_ascii_lowercase();
    matches!(
        lower.as_str(),
        "." | ".." | "%2e" | "%2e%2e" | ".%2e" | "%2e."
    )
}

/// Parse the upstream base URL, rejecting anything that is not absolute http(s)
pub fn parse_target(var: &'static str, value: Option<String>) -> Result<Url, ProxyConfigError> {
    let value = value
        .filter(|v| !v.trim().is_empty())
        .ok_or(ProxyConfigError::Missing { var })?;

    let malformed = |reason: String| ProxyConfigError::Malformed {
        var,
        value: value.clone(),
        reason,
    };

    let url = Url::parse(value.trim()).map_err(|e| malformed(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(malformed(format!("unsupported scheme '{}'", url.scheme())));
    }
    if url.host_str().is_none() {
        return Err(malformed("missing host".to_string()));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(malformed("must not carry a query or fragment".to_string()));
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule() -> ProxyRule {
        let target = Url::parse("http://localhost:8080").unwrap();
        ProxyRule::new(DEFAULT_PREFIX, target, true).unwrap()
    }

    #[test]
    fn test_should_proxy() {
        let rule = rule();
        assert!(rule.should_proxy("/api/v1/payments"));
        assert!(rule.should_proxy("/api/v1"));
        assert!(!rule.should_proxy("/assets/logo.png"));
        assert!(!rule.should_proxy("/api/v2/payments"));
        assert!(!rule.should_proxy("/payments"));
    }

    #[test]
    fn test_rewrite_path_strips_prefix() {
        let rule = rule();
        assert_eq!(rule.rewrite_path("/api/v1/payments"), "/payments");
        assert_eq!(rule.rewrite_path("/api/v1/transactions/7"), "/transactions/7");
        assert_eq!(rule.rewrite_path("/api/v1"), "/");
        assert_eq!(rule.rewrite_path("/api/v1/"), "/");
    }

    #[test]
    fn test_rewrite_path_strips_only_leading_prefix() {
        let rule = rule();
        assert_eq!(rule.rewrite_path("/api/v1/api/v1/x"), "/api/v1/x");
    }

    #[test]
    fn test_upstream_url() {
        let rule = rule();
        let url = rule.upstream_url("/api/v1/payments", Some("page=2")).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/payments?page=2");
    }

    #[test]
    fn test_upstream_url_keeps_target_base_path() {
        let target = Url::parse("https://backend.test/service/").unwrap();
        let rule = ProxyRule::new("/api/v1", target, false).unwrap();

        let url = rule.upstream_url("/api/v1/payments/3", None).unwrap();
        assert_eq!(url.as_str(), "https://backend.test/service/payments/3");
    }

    #[test]
    fn test_upstream_url_rejects_dot_segments() {
        let target = Url::parse("https://backend.test/service/").unwrap();
        let rule = ProxyRule::new("/api/v1", target, true).unwrap();

        for path in [
            "/api/v1/../../admin",
            "/api/v1/payments/../../admin",
            "/api/v1/./payments",
            "/api/v1/%2e%2e/admin",
            "/api/v1/.%2E/admin",
            "/api/v1/..",
        ] {
            let result = rule.upstream_url(path, None);
            assert!(
                matches!(result, Err(ProxyError::InvalidPath { .. })),
                "{} should be rejected",
                path
            );
        }
    }

    #[test]
    fn test_upstream_url_allows_dots_inside_segments() {
        let rule = rule();
        let url = rule.upstream_url("/api/v1/files/report..v2.csv", None).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/files/report..v2.csv");
    }

    #[test]
    fn test_invalid_prefix() {
        let target = Url::parse("http://localhost:8080").unwrap();
        assert!(ProxyRule::new("api", target.clone(), true).is_err());
        assert!(ProxyRule::new("/", target, true).is_err());
    }

    #[test]
    fn test_parse_target() {
        let url = parse_target("VITE_API_BASE_URL", Some("http://localhost:8080".to_string())).unwrap();
        assert_eq!(url.host_str(), Some("localhost"));
        assert_eq!(url.port(), Some(8080));
    }

    #[test]
    fn test_parse_target_missing() {
        assert_eq!(
            parse_target("VITE_API_BASE_URL", None),
            Err(ProxyConfigError::Missing {
                var: "VITE_API_BASE_URL"
            })
        );
        assert!(parse_target("VITE_API_BASE_URL", Some("  ".to_string())).is_err());
    }

    #[test]
    fn test_parse_target_malformed() {
        for bad in ["not a url", "localhost:8080", "ftp://host", "http://host/?x=1"] {
            let err = parse_target("VITE_API_BASE_URL", Some(bad.to_string())).unwrap_err();
            assert!(
                matches!(err, ProxyConfigError::Malformed { .. }),
                "{} should be rejected",
                bad
            );
            assert!(err.to_string().contains("VITE_API_BASE_URL"));
        }
    }
}
