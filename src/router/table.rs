use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::error::{RouteError, RouteTableError};

/// External view components the router can activate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
pub enum ViewId {
    PaymentList,
    PaymentForm,
    PaymentEditForm,
    TransactionList,
    TransactionAdd,
    TransactionEditForm,
}

impl ViewId {
    /// Aliased module path of the component bound to this view
    pub fn module(self) -> &'static str {
        match self {
            ViewId::PaymentList => "@/components/PaymentList.vue",
            ViewId::PaymentForm => "@/components/PaymentForm.vue",
            ViewId::PaymentEditForm => "@/components/PaymentEditForm.vue",
            ViewId::TransactionList => "@/components/transaction/TransactionList.vue",
            ViewId::TransactionAdd => "@/components/transaction/TransactionAdd.vue",
            ViewId::TransactionEditForm => "@/components/transaction/TransactionEditForm.vue",
        }
    }
}

/// Literal route declaration, before validation
#[derive(Debug, Clone, Copy)]
pub struct RouteDef {
    pub name: &'static str,
    pub path: &'static str,
    pub view: ViewId,
}

/// The application's route table, in match order
pub const ROUTES: &[RouteDef] = &[
    RouteDef { name: "PaymentList", path: "/payments", view: ViewId::PaymentList },
    RouteDef { name: "AddPayment", path: "/add-payment", view: ViewId::PaymentForm },
    RouteDef { name: "EditPayment", path: "/payments/:id/edit", view: ViewId::PaymentEditForm },
    RouteDef { name: "Transactions", path: "/transactions/", view: ViewId::TransactionList },
    RouteDef { name: "Transactions Add", path: "/add-transaction", view: ViewId::TransactionAdd },
    RouteDef {
        name: "EditTransaction",
        path: "/transactions/:id/edit",
        view: ViewId::TransactionEditForm,
    },
];

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(&'static str),
    Param(&'static str),
}

impl Segment {
    /// Whether both segments could match the same request segment
    fn overlaps(&self, other: &Segment) -> bool {
        match (self, other) {
            (Segment::Literal(a), Segment::Literal(b)) => a.eq_ignore_ascii_case(b),
            _ => true,
        }
    }
}

/// A validated route: name, pattern and bound view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    name: &'static str,
    path: &'static str,
    view: ViewId,
    segments: Vec<Segment>,
    trailing_slash: bool,
}

impl Route {
    fn parse(def: &RouteDef) -> Result<Self, RouteTableError> {
        let invalid = |reason| RouteTableError::InvalidPattern {
            path: def.path.to_string(),
            reason,
        };

        let Some(rest) = def.path.strip_prefix('/') else {
            return Err(invalid("must start with '/'"));
        };
        let trailing_slash = !rest.is_empty() && rest.ends_with('/');
        let rest = rest.strip_suffix('/').unwrap_or(rest);

        let mut segments = Vec::new();
        if !rest.is_empty() {
            for raw in rest.split('/') {
                let segment = match raw.strip_prefix(':') {
                    Some("") => return Err(invalid("parameter name is empty")),
                    Some(param) => Segment::Param(param),
                    None if raw.is_empty() => return Err(invalid("contains an empty segment")),
                    None => Segment::Literal(raw),
                };
                segments.push(segment);
            }
        }

        let params = segments
            .iter()
            .filter(|s| matches!(s, Segment::Param(_)))
            .count();
        if params > 1 {
            return Err(RouteTableError::TooManyParams {
                path: def.path.to_string(),
            });
        }

        Ok(Route {
            name: def.name,
            path: def.path,
            view: def.view,
            segments,
            trailing_slash,
        })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn path(&self) -> &'static str {
        self.path
    }

    pub fn view(&self) -> ViewId {
        self.view
    }

    /// Name of the positional parameter, if the pattern declares one
    pub fn param(&self) -> Option<&'static str> {
        self.segments.iter().find_map(|s| match s {
            Segment::Param(name) => Some(*name),
            Segment::Literal(_) => None,
        })
    }

    fn conflicts_with(&self, other: &Route) -> bool {
        self.segments.len() == other.segments.len()
            && self
                .segments
                .iter()
                .zip(&other.segments)
                .all(|(a, b)| a.overlaps(b))
    }

    fn match_segments(&self, request: &[&str]) -> Option<RouteParams> {
        if request.len() != self.segments.len() {
            return None;
        }

        let mut params = RouteParams::new();
        for (segment, value) in self.segments.iter().zip(request) {
            match segment {
                Segment::Literal(lit) if lit.eq_ignore_ascii_case(value) => {}
                Segment::Literal(_) => return None,
                Segment::Param(_) if value.is_empty() => return None,
                Segment::Param(name) => {
                    let decoded = urlencoding::decode(value)
                        .map(|v| v.into_owned())
                        .unwrap_or_else(|_| value.to_string());
                    params.insert(*name, decoded);
                }
            }
        }
        Some(params)
    }

    fn build_path(&self, params: &RouteParams) -> Result<String, RouteError> {
        let mut path = String::new();
        for segment in &self.segments {
            path.push('/');
            match segment {
                Segment::Literal(lit) => path.push_str(lit),
                Segment::Param(name) => {
                    let value = params
                        .get(name)
                        .filter(|v| !v.is_empty())
                        .ok_or_else(|| RouteError::MissingParameter {
                            route: self.name.to_string(),
                            param: name.to_string(),
                        })?;
                    path.push_str(&urlencoding::encode(value));
                }
            }
        }
        if path.is_empty() || self.trailing_slash {
            path.push('/');
        }
        Ok(path)
    }
}

/// Parameters extracted from, or substituted into, a route path
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(transparent)]
pub struct RouteParams(BTreeMap<String, String>);

impl RouteParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Params carrying only the conventional `id`
    pub fn with_id(id: impl Into<String>) -> Self {
        let mut params = Self::new();
        params.insert("id", id);
        params
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn id(&self) -> Option<&str> {
        self.get("id")
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Successful resolution of a requested location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch<'a> {
    pub route: &'a Route,
    pub path: String,
    pub params: RouteParams,
    pub query: Option<String>,
    pub hash: Option<String>,
}

impl RouteMatch<'_> {
    pub fn view(&self) -> ViewId {
        self.route.view
    }
}

/// Immutable, validated route table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    /// Build a table from literal declarations
    ///
    /// Rejects duplicate names, malformed patterns, and patterns that could
    /// match the same request path as an earlier route.
    pub fn new(defs: &[RouteDef]) -> Result<Self, RouteTableError> {
        let mut routes: Vec<Route> = Vec::with_capacity(defs.len());

        for def in defs {
            let route = Route::parse(def)?;

            if routes.iter().any(|r| r.name == route.name) {
                return Err(RouteTableError::DuplicateName {
                    name: route.name.to_string(),
                });
            }
            if let Some(existing) = routes.iter().find(|r| r.conflicts_with(&route)) {
                return Err(RouteTableError::AmbiguousPath {
                    path: route.path.to_string(),
                    existing: existing.path.to_string(),
                });
            }

            routes.push(route);
        }

        Ok(RouteTable { routes })
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn get(&self, name: &str) -> Option<&Route> {
        self.routes.iter().find(|r| r.name == name)
    }

    /// Resolve a requested location to its route; first match wins
    ///
    /// The query string and fragment are split off before matching. A single
    /// trailing slash is optional and literal segments ignore ASCII case.
    pub fn resolve(&self, location: &str) -> Result<RouteMatch<'_>, RouteError> {
        let (rest, hash) = split_once_opt(location, '#');
        let (path, query) = split_once_opt(rest, '?');

        let no_match = || RouteError::NoMatch {
            path: path.to_string(),
        };

        let trimmed = path.strip_prefix('/').ok_or_else(no_match)?;
        let trimmed = trimmed.strip_suffix('/').unwrap_or(trimmed);
        let request: Vec<&str> = if trimmed.is_empty() {
            Vec::new()
        } else {
            trimmed.split('/').collect()
        };

        self.routes
            .iter()
            .find_map(|route| {
                route.match_segments(&request).map(|params| RouteMatch {
                    route,
                    path: path.to_string(),
                    params,
                    query: query.map(str::to_string),
                    hash: hash.map(str::to_string),
                })
            })
            .ok_or_else(no_match)
    }

    /// Build the concrete path for a named route
    pub fn resolve_by_name(&self, name: &str, params: &RouteParams) -> Result<String, RouteError> {
        let route = self.get(name).ok_or_else(|| RouteError::UnknownRoute {
            name: name.to_string(),
        })?;
        route.build_path(params)
    }
}

fn split_once_opt(s: &str, delim: char) -> (&str, Option<&str>) {
    match s.split_once(delim) {
        Some((head, tail)) => (head, Some(tail)),
        None => (s, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> RouteTable {
        RouteTable::new(ROUTES).unwrap()
    }

    #[test]
    fn test_resolve_static_route() {
        let table = table();
        let m = table.resolve("/payments").unwrap();

        assert_eq!(m.view(), ViewId::PaymentList);
        assert_eq!(m.route.name(), "PaymentList");
        assert!(m.params.is_empty());
    }

    #[test]
    fn test_resolve_extracts_id() {
        let table = table();
        let m = table.resolve("/payments/42/edit").unwrap();

        assert_eq!(m.view(), ViewId::PaymentEditForm);
        assert_eq!(m.params.id(), Some("42"));
    }

    #[test]
    fn test_resolve_id_is_not_coerced() {
        let table = table();
        let m = table.resolve("/transactions/abc-001/edit").unwrap();

        assert_eq!(m.view(), ViewId::TransactionEditForm);
        assert_eq!(m.params.id(), Some("abc-001"));
    }

    #[test]
    fn test_resolve_decodes_id() {
        let table = table();
        let m = table.resolve("/payments/a%20b/edit").unwrap();
        assert_eq!(m.params.id(), Some("a b"));
    }

    #[test]
    fn test_resolve_trailing_slash_is_optional() {
        let table = table();

        assert_eq!(table.resolve("/transactions/").unwrap().view(), ViewId::TransactionList);
        assert_eq!(table.resolve("/transactions").unwrap().view(), ViewId::TransactionList);
        assert_eq!(table.resolve("/payments/").unwrap().view(), ViewId::PaymentList);
    }

    #[test]
    fn test_resolve_ignores_case() {
        let table = table();
        assert_eq!(table.resolve("/Payments").unwrap().view(), ViewId::PaymentList);
    }

    #[test]
    fn test_add_transaction_not_confused_with_edit() {
        let table = table();
        let m = table.resolve("/add-transaction").unwrap();

        assert_eq!(m.view(), ViewId::TransactionAdd);
        assert_eq!(m.route.name(), "Transactions Add");
        assert!(m.params.is_empty());
    }

    #[test]
    fn test_resolve_splits_query_and_hash() {
        let table = table();
        let m = table.resolve("/payments/9/edit?tab=notes#top").unwrap();

        assert_eq!(m.path, "/payments/9/edit");
        assert_eq!(m.params.id(), Some("9"));
        assert_eq!(m.query.as_deref(), Some("tab=notes"));
        assert_eq!(m.hash.as_deref(), Some("top"));
    }

    #[test]
    fn test_resolve_no_match() {
        let table = table();

        assert_eq!(
            table.resolve("/nonexistent"),
            Err(RouteError::NoMatch {
                path: "/nonexistent".to_string()
            })
        );
        assert!(table.resolve("/").is_err());
        assert!(table.resolve("").is_err());
        assert!(table.resolve("payments").is_err());
    }

    #[test]
    fn test_empty_param_segment_does_not_match() {
        let table = table();
        assert!(table.resolve("/payments//edit").is_err());
    }

    #[test]
    fn test_extra_segments_do_not_match() {
        let table = table();
        assert!(table.resolve("/payments/1/edit/more").is_err());
        assert!(table.resolve("/payments/1").is_err());
    }

    #[test]
    fn test_resolve_by_name_with_param() {
        let table = table();
        let path = table
            .resolve_by_name("EditTransaction", &RouteParams::with_id("7"))
            .unwrap();
        assert_eq!(path, "/transactions/7/edit");
    }

    #[test]
    fn test_resolve_by_name_keeps_declared_trailing_slash() {
        let table = table();
        let path = table.resolve_by_name("Transactions", &RouteParams::new()).unwrap();
        assert_eq!(path, "/transactions/");
    }

    #[test]
    fn test_resolve_by_name_encodes_param() {
        let table = table();
        let path = table
            .resolve_by_name("EditPayment", &RouteParams::with_id("a/b"))
            .unwrap();
        assert_eq!(path, "/payments/a%2Fb/edit");
        assert_eq!(table.resolve(&path).unwrap().params.id(), Some("a/b"));
    }

    #[test]
    fn test_resolve_by_name_unknown() {
        let table = table();
        let err = table
            .resolve_by_name("Dashboard", &RouteParams::new())
            .unwrap_err();
        assert_eq!(
            err,
            RouteError::UnknownRoute {
                name: "Dashboard".to_string()
            }
        );
    }

    #[test]
    fn test_resolve_by_name_missing_param() {
        let table = table();

        let err = table
            .resolve_by_name("EditPayment", &RouteParams::new())
            .unwrap_err();
        assert_eq!(
            err,
            RouteError::MissingParameter {
                route: "EditPayment".to_string(),
                param: "id".to_string()
            }
        );

        let err = table
            .resolve_by_name("EditPayment", &RouteParams::with_id(""))
            .unwrap_err();
        assert!(matches!(err, RouteError::MissingParameter { .. }));
    }

    #[test]
    fn test_round_trip_every_route() {
        let table = table();
        let params = RouteParams::with_id("1");

        for route in table.routes() {
            let path = table.resolve_by_name(route.name(), &params).unwrap();
            let m = table.resolve(&path).unwrap();
            assert_eq!(m.route.name(), route.name(), "round trip of {}", path);
            assert_eq!(m.view(), route.view());
        }
    }

    #[test]
    fn test_route_names_unique() {
        let table = table();
        let mut names: Vec<_> = table.routes().iter().map(Route::name).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), ROUTES.len());
    }

    #[test]
    fn test_construction_is_deterministic() {
        assert_eq!(table(), table());
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let defs = [
            RouteDef { name: "PaymentList", path: "/payments", view: ViewId::PaymentList },
            RouteDef { name: "PaymentList", path: "/other", view: ViewId::PaymentForm },
        ];
        assert_eq!(
            RouteTable::new(&defs),
            Err(RouteTableError::DuplicateName {
                name: "PaymentList".to_string()
            })
        );
    }

    #[test]
    fn test_ambiguous_paths_rejected() {
        let defs = [
            RouteDef { name: "Edit", path: "/payments/:id/edit", view: ViewId::PaymentEditForm },
            RouteDef { name: "Bulk", path: "/payments/bulk/edit", view: ViewId::PaymentForm },
        ];
        assert!(matches!(
            RouteTable::new(&defs),
            Err(RouteTableError::AmbiguousPath { .. })
        ));

        let defs = [
            RouteDef { name: "A", path: "/transactions/", view: ViewId::TransactionList },
            RouteDef { name: "B", path: "/Transactions", view: ViewId::TransactionList },
        ];
        assert!(matches!(
            RouteTable::new(&defs),
            Err(RouteTableError::AmbiguousPath { .. })
        ));
    }

    #[test]
    fn test_invalid_patterns_rejected() {
        let bad = |path: &'static str| {
            RouteTable::new(&[RouteDef { name: "X", path, view: ViewId::PaymentList }])
        };

        assert!(matches!(bad("payments"), Err(RouteTableError::InvalidPattern { .. })));
        assert!(matches!(bad("/a//b"), Err(RouteTableError::InvalidPattern { .. })));
        assert!(matches!(bad("/a/:"), Err(RouteTableError::InvalidPattern { .. })));
        assert!(matches!(bad("/:a/:b"), Err(RouteTableError::TooManyParams { .. })));
    }

    #[test]
    fn test_route_param_names() {
        let table = table();
        assert_eq!(table.get("EditPayment").unwrap().param(), Some("id"));
        assert_eq!(table.get("PaymentList").unwrap().param(), None);
        assert!(table.get("Missing").is_none());
    }
}
