//! Agricrowd Catalog API
//!
//! Serves the browser client:
//! 1. Approved projects (with search, category, target and sort filters)
//! 2. Project submissions and admin approval
//! 3. Categories and project photos

mod api;
mod catalog;
mod config;
mod db;
mod errors;
mod models;

use std::sync::Arc;

use anyhow::Context;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::api::ApiState;
use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .init();

    // Load .env file if present
    let _ = dotenvy::dotenv();

    let config = Config::from_env().context("loading configuration")?;
    config.validate().context("validating configuration")?;

    info!("Agricrowd API starting - database: {}", config.database_url);

    let pool = db::init_pool(&config.database_url)
        .await
        .context("opening catalog database")?;

    let state = Arc::new(ApiState {
        pool,
        max_photo_bytes: config.max_photo_bytes,
    });

    let app = api::router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("binding {}", config.bind_addr))?;
    info!("Listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving HTTP")?;

    info!("Agricrowd API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    info!("Shutdown signal received");
}
