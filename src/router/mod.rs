//! Client-side route table and navigation
//!
//! Maps URL paths to the view components of the payments console. The table
//! is built once from [`ROUTES`] and never changes afterwards.

pub mod error;
pub mod navigation;
pub mod table;

pub use error::{RouteError, RouteTableError};
pub use navigation::{Location, NavigationState, NavigationTarget};
pub use table::{ROUTES, Route, RouteDef, RouteMatch, RouteParams, RouteTable, ViewId};
