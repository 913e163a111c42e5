// Kepler Dashboards - Web Server
// Server-rendered dashboards and JSON API with Axum

use anyhow::{Context, Result};
use clap::Parser;
use kepler_dashboards::{api, DashboardConfig, Registry};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "kepler-server", version, about = "Kepler Labs dashboards web server")]
struct Args {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Bind address; overrides the config file
    #[arg(short, long)]
    addr: Option<String>,
}

// ============================================================================
// Main Server
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = DashboardConfig::load(args.config.as_deref())?;
    let addr = args.addr.unwrap_or_else(|| config.server.addr.clone());

    let registry = Arc::new(Registry::new(&config));
    tracing::info!(dashboards = ?registry.ids(), "registry ready");

    let app = api::router(registry);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    tracing::info!("🌐 Server running on http://{}", addr);
    tracing::info!("   Dashboards: http://{}/d/sales, http://{}/d/audit", addr, addr);
    tracing::info!("   API:        http://{}/api/dashboards", addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
