//! HTTP service for identity document field extraction.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use idscan_core::models::config::IdscanConfig;
use idscan_core::TesseractCli;
use idscan_server::{router, AppState};

/// Identity document OCR service
#[derive(Parser)]
#[command(name = "idscan-server")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listen port (overrides config and PORT)
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = IdscanConfig::load(cli.config.as_deref())?;

    let port = match cli.port {
        Some(port) => port,
        None => match std::env::var("PORT") {
            Ok(value) => value
                .parse()
                .map_err(|_| anyhow::anyhow!("Invalid PORT value: {}", value))?,
            Err(_) => config.server.port,
        },
    };
    let addr: SocketAddr = format!("{}:{}", config.server.host, port).parse()?;

    let ocr = TesseractCli::from_config(&config.ocr);
    match ocr.version() {
        Ok(version) => info!("Using {}", version),
        Err(e) => warn!("Tesseract check failed, uploads will error until fixed: {}", e),
    }

    let app = router(AppState::new(&config, Arc::new(ocr)));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server running on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
