/// Errors raised while resolving a location against the route table
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    /// No route pattern matches the requested path
    #[error("no route matches path '{path}'")]
    NoMatch { path: String },

    /// Named navigation referenced a route that is not in the table
    #[error("unknown route name '{name}'")]
    UnknownRoute { name: String },

    /// Named navigation omitted a parameter the route pattern requires
    #[error("route '{route}' requires parameter '{param}'")]
    MissingParameter { route: String, param: String },
}

/// Errors raised while building the route table at startup
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteTableError {
    #[error("duplicate route name '{name}'")]
    DuplicateName { name: String },

    #[error("route path '{path}' is ambiguous with '{existing}'")]
    AmbiguousPath { path: String, existing: String },

    #[error("route path '{path}' declares more than one parameter")]
    TooManyParams { path: String },

    #[error("invalid route path '{path}': {reason}")]
    InvalidPattern { path: String, reason: &'static str },
}
