//! BP Recommender Model Server
//!
//! Loads a pre-trained model artifact once at startup and serves
//! predictions over HTTP. The server keeps running without a model; model
//! routes then answer 503 until the process is restarted with a valid file.

use anyhow::Result;
use bpserve_models::{ModelLoader, ModelSlot};
use bpserve_server::{create_router, AppState, Cli, ServerConfig};
use clap::Parser;
use tokio::signal;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    info!("Starting BP Recommender Model Server...");

    let config = ServerConfig::load(&cli)?;
    let model_path = config.resolve_model_path()?;
    info!("Model path: {}", model_path.display());

    let slot = ModelSlot::new();
    if !slot.load(&ModelLoader::new(&model_path)) {
        warn!("Serving without a model; /predict and /model/info will answer 503");
    }

    let app = create_router(AppState::new(slot));

    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port)).await?;
    info!("Server starting on {}:{}", config.host, config.port);
    info!("Available endpoints:");
    info!("  GET  /health - Health check");
    info!("  POST /predict - Make predictions");
    info!("  GET  /model/info - Model information");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            shutdown_signal().await;
            warn!("Shutdown signal received, stopping server...");
        })
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Listen for shutdown signals (SIGTERM, SIGINT)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

/// Initialize tracing/logging
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("bpserve=debug,tower_http=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("bpserve=info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
