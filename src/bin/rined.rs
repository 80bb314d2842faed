//! rined: the Rine daemon.
//!
//! Serves the [`ProfileGateway`](rine::ProfileGateway) over HTTP.

use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use rine::server::config::{Config, Secrets};
use rine::{ProfileGateway, Rine, RineError};

/// Rine daemon: player profile gateway service.
#[derive(Parser)]
#[command(name = "rined")]
#[command(version = rine::PKG_VERSION)]
#[command(about = "Rine player profile gateway daemon")]
struct Args {
    /// Path to configuration file.
    #[arg(short, long)]
    config: Option<std::path::PathBuf>,

    /// Address to bind to (overrides the config file).
    #[arg(short, long, env = "RINED_ADDRESS")]
    address: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("rine=info,rined=info,tower_http=info")),
        )
        .init();

    let args = Args::parse();

    // Load configuration
    let config = Config::load(args.config.as_deref())?;
    let secrets = Secrets::load()?;

    let gateway = build_gateway(&config, &secrets)?;

    // Parse address
    let address = args.address.unwrap_or(config.server.address);
    let addr: SocketAddr = address
        .parse()
        .map_err(|e| RineError::Configuration(format!("Invalid address {address:?}: {e}")))?;

    info!(version = rine::PKG_VERSION, %addr, "rined starting");

    let app = rine::server::router(Arc::new(gateway));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("rined stopped");
    Ok(())
}

/// Build a [`ProfileGateway`] from configuration.
fn build_gateway(config: &Config, secrets: &Secrets) -> Result<ProfileGateway, RineError> {
    let mut builder = Rine::builder()
        .public_endpoints(config.providers.public.endpoints.iter().cloned())
        .community_url(&config.providers.community.base_url);

    match secrets.community_key() {
        Some(key) => builder = builder.community_key(key),
        None => info!("no community API key configured, community source disabled"),
    }

    if config.providers.public.endpoints.is_empty() {
        warn!("no public source endpoints configured");
    }

    builder.build()
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
