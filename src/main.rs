use anyhow::Context;
use payments_console::app::build_router;
use payments_console::config::Config;
use payments_console::router::{ROUTES, RouteTable};
use payments_console::state::AppState;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .init();

    tracing::info!("payments-console dev server starting");

    let config = Config::from_env()?;
    config.log_startup();

    let routes = RouteTable::new(ROUTES).context("Route table is invalid")?;
    tracing::info!("Route table loaded with {} routes", routes.routes().len());

    let addr = format!("{}:{}", config.service_host, config.service_port);
    let state = AppState::new(config, routes)?;
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutting down");
}
