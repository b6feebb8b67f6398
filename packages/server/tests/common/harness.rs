//! Test harness: in-process servers on ephemeral ports.
//!
//! Run tests with: RUST_LOG=debug cargo test -- --nocapture

use anyhow::{Context, Result};
use axum::Router;
use crosspost_core::kernel::ServerDeps;
use crosspost_core::server::{build_app, AppState};
use tokio::net::TcpListener;

pub fn init_tracing() {
    // try_init so repeated calls across tests don't panic
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Serve `router` on 127.0.0.1 and return its base URL.
pub async fn spawn_router(router: Router) -> Result<String> {
    init_tracing();

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .context("Failed to bind test listener")?;
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });

    Ok(format!("http://{}", addr))
}

/// The full API over the given dependencies.
pub struct TestApi {
    pub base_url: String,
    pub client: reqwest::Client,
}

impl TestApi {
    pub async fn start(deps: ServerDeps) -> Result<Self> {
        let app = build_app(AppState::new(deps, "gemini-test"), None);
        Ok(Self {
            base_url: spawn_router(app).await?,
            client: reqwest::Client::new(),
        })
    }

    pub async fn post(&self, path: &str, body: serde_json::Value) -> Result<(u16, serde_json::Value)> {
        let response = self
            .client
            .post(format!("{}{}", self.base_url, path))
            .json(&body)
            .send()
            .await?;
        let status = response.status().as_u16();
        Ok((status, response.json().await?))
    }

    pub async fn get(&self, path: &str) -> Result<(u16, serde_json::Value)> {
        let response = self
            .client
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await?;
        let status = response.status().as_u16();
        Ok((status, response.json().await?))
    }
}
