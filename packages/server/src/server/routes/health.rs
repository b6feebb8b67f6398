use axum::{extract::Extension, http::StatusCode, Json};
use serde::Serialize;

use crate::server::app::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    model: String,
    /// Publishing targets usable right now
    publishing: Vec<&'static str>,
}

/// Health check endpoint
pub async fn health_handler(Extension(state): Extension<AppState>) -> (StatusCode, Json<HealthResponse>) {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "ok",
            version: env!("CARGO_PKG_VERSION"),
            model: state.gemini_model.clone(),
            publishing: state.deps.publishing.configured(),
        }),
    )
}
