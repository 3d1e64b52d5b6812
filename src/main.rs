use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tokio::sync::Mutex;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = daegwan::config::Cli::parse();
    run_server(cli.config).await
}

async fn run_server(config: daegwan::config::Config) -> Result<()> {
    if config.admin_password().is_none() {
        warn!("admin password is not configured; admin endpoints are disabled");
    }

    let store = Arc::new(Mutex::new(daegwan::store::ApplicationStore::new()));

    let app = daegwan::http::build_router(config.clone(), store)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    info!(
        bind = %config.bind,
        facility = %config.facility_name,
        "starting daegwan"
    );
    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).compact().init();
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
