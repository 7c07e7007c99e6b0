//! order-relay server
//!
//! Serves the menu and order list over HTTP and relays order events to every connected
//! dashboard over `/ws`.

use anyhow::Context;
use order_relay::api;
use order_relay::config::Config;
use order_relay::lifecycle::{setup_tracing, OrderSystem};
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    let _ = dotenvy::dotenv();

    setup_tracing();

    let config = Config::from_env()?;
    let system = OrderSystem::from_config(&config).context("failed to load menu")?;
    let app = api::router(system.state());

    let listener = tokio::net::TcpListener::bind(config.bind_addr())
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr()))?;
    info!("order-relay listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Err(e) = system.shutdown().await {
        error!("Shutdown failed: {e}");
    }
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for Ctrl-C: {e}");
        std::future::pending::<()>().await;
    }
    info!("Ctrl-C received, shutting down");
}
