use anyhow::Context as _;
use tracing_subscriber::EnvFilter;

use filmo_api::{config::Config, create_router, AppState, Context};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("filmo_api=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;

    // Catalog and index are built before the listener is bound
    let context = Context::from_path(&config.catalog_path)
        .with_context(|| format!("Failed to build catalog from {}", config.catalog_path))?;
    let state = AppState::new(context);

    let app = create_router(state);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;
    tracing::info!(address = %address, "Server running");

    axum::serve(listener, app).await?;
    Ok(())
}
