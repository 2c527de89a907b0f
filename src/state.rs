use crate::config::Config;
use crate::router::RouteTable;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub routes: Arc<RouteTable>,
    pub http_client: reqwest::Client,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config, routes: RouteTable) -> anyhow::Result<Self> {
        // The proxy relays redirects to the browser instead of following them
        let http_client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()?;

        Ok(Self {
            routes: Arc::new(routes),
            http_client,
            config: Arc::new(config),
        })
    }
}
