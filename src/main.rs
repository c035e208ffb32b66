use anyhow::Result;
use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

mod api;
mod config;
mod controller;
mod dashboard;
mod league;
mod view;

use api::ApiClient;
use config::Config;
use dashboard::{AppState, Sessions};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing / logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::parse();
    config.validate()?;

    let client = ApiClient::new(&config.api_base_url, config.request_timeout())?;
    info!("Reading predictions from {}", config.api_base_url);

    // Each page load opens its own view, starting on the overview tab
    let sessions = Sessions::new(Arc::new(client));

    let app = dashboard::router(AppState { sessions });
    let addr: SocketAddr = config.dashboard_addr.parse()?;
    info!("Dashboard listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;

    Ok(())
}
