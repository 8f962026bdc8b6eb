use anyhow::Context;
use docsearch::api::{self, app_state::AppState};
use docsearch::config::loader::ConfigLoader;
use docsearch::index::create_search_backend;
use docsearch::observability::{
    AppMetrics, ObservabilityState, create_observability_router, init_tracing,
};
use docsearch::services::create_search_service;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ConfigLoader::load().context("failed to load configuration")?;
    let _log_guard = init_tracing(&config.logging, env!("CARGO_PKG_NAME"));

    info!("Starting Docsearch...");

    ConfigLoader::validate(&config).context("invalid configuration")?;
    info!("Configuration loaded successfully");

    let backend = create_search_backend(&config.search)
        .await
        .context("failed to initialize search backend")?;

    let search_service = create_search_service(backend, config.search.clone());
    info!("Search service initialized");

    let metrics = Arc::new(AppMetrics::default());
    let app_state = AppState::new(search_service, metrics.clone());
    info!("Application state created");

    let observability_state = Arc::new(ObservabilityState::with_metrics(
        env!("CARGO_PKG_VERSION").to_string(),
        metrics,
    ));
    let router =
        create_observability_router(observability_state).merge(api::create_router(app_state));
    info!("API router created with observability endpoints");

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
    }
}
