use serde::{Deserialize, Serialize};

use crate::router::ViewId;

/// One entry of the route table listing
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct RouteEntryResponse {
    pub name: String,
    pub path: String,
    pub view: ViewId,
    pub params: Vec<String>,
    pub source: String,
}

/// Response type for the route table listing
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct RouteTableResponse {
    pub routes: Vec<RouteEntryResponse>,
}

/// Query parameters for path resolution
#[derive(Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ResolveQuery {
    /// Location to resolve, may include a query string
    pub path: String,
}

/// Query parameters for named route lookup
#[derive(Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct HrefQuery {
    pub id: Option<String>,
}

/// Response type for named route lookup
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct HrefResponse {
    pub href: String,
}
