use anyhow::Result;
use tracing_subscriber::EnvFilter;

use client_registry::{config, server};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = config::init()?;

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Start server
    server::start_server(config).await?;

    Ok(())
}
