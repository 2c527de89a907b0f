pub mod fallback;
pub mod health;
pub mod router;

pub use fallback::spa_fallback;
pub use health::health_handler;
pub use router::{href_handler, resolve_handler, routes_handler};
