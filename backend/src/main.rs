use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use livestock_ledger_backend::config::BackendConfig;
use livestock_ledger_backend::{create_router, initialize_backend};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = BackendConfig::from_env()?;
    let app_state = initialize_backend(&config).await?;
    let app = create_router(app_state, &config)?;

    info!("Starting server on {}", config.http_addr);
    let listener = tokio::net::TcpListener::bind(config.http_addr).await?;
    info!("Listening on {}", config.http_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
