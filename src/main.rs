//! # Swimdash
//!
//! Serves the guardian account dashboard API.

use std::sync::Arc;

use anyhow::Context as _;
use tracing::info;
use tracing_subscriber::EnvFilter;

use swimdash::config::{Config, DEFAULT_LOG_FILTER};
use swimdash::db::PgStore;
use swimdash::routes::router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let config = Config::from_env()?;
    let store = PgStore::connect(&config).await?;
    let app = router(Arc::new(store));

    info!(address = %config.address, "Serving dashboard API");
    axum::Server::bind(&config.address)
        .serve(app.into_make_service())
        .await
        .context("Server stopped unexpectedly")
}
