use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod classifier;
mod config;
mod engine;
mod error;
mod explain;
mod features;
mod highlight;
mod lexical;
mod normalize;
mod routes;
mod terms;
mod types;
mod vectorizer;

use config::Config;
use engine::AnalysisEngine;
use routes::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "phishlens=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env();
    info!("Loaded configuration: {:?}", config);

    // Build the analysis engine once; artifacts and term tables live for the
    // whole process.
    let engine = AnalysisEngine::new(&config).context("failed to initialize analysis engine")?;
    info!("Analysis engine initialized");

    // Initialize metrics exporter
    let metrics_handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .expect("Failed to install Prometheus recorder");

    let state = AppState { engine: Arc::new(engine), metrics: metrics_handle };
    let app = routes::router(state);

    // Start server
    let addr: SocketAddr = config.bind_addr.parse().context("invalid bind address")?;
    info!("Starting PhishLens email analyzer on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    warn!("Shutdown signal received, starting graceful shutdown");
}
