use cafe_orders::config::Config;
use cafe_orders::http::{build_router, AppState};
use cafe_orders::lifecycle::{setup_tracing, CafeSystem};
use clap::Parser;
use std::net::SocketAddr;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_tracing();

    let config = Config::parse();
    config.validate()?;
    tokio::fs::create_dir_all(&config.dir).await?;

    let system = CafeSystem::open(&config.dir);
    let app = build_router(AppState::from(&system));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, dir = %config.dir.display(), "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    system.shutdown().await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
