// Main entry point for the crosspost API server

use std::sync::Arc;

use anyhow::{Context, Result};
use crosspost_core::kernel::{GeminiGenerator, HttpPageFetcher, PlaceholderSlideRenderer, ServerDeps};
use crosspost_core::server::{build_app, AppState};
use crosspost_core::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,crosspost_core=debug,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting crosspost API");

    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(
        model = %config.gemini_model,
        max_attempts = config.retry_policy.max_attempts,
        publishing = ?config.publishing.configured(),
        "Configuration loaded"
    );

    let http_client = reqwest::Client::new();
    let generator = GeminiGenerator::new(http_client.clone())
        .with_model(&config.gemini_model)
        .with_base_url(config.gemini_base_url.clone());
    let page_fetcher = HttpPageFetcher::new(config.fetch_timeout)?;

    let deps = ServerDeps::new(
        Arc::new(generator),
        Arc::new(page_fetcher),
        Arc::new(PlaceholderSlideRenderer),
        config.persona.clone(),
        config.retry_policy,
        config.publishing.clone(),
        http_client,
    );

    let app = build_app(
        AppState::new(deps, config.gemini_model.clone()),
        config.allowed_origins.as_deref(),
    );

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Health check: http://localhost:{}/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
