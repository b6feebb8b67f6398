//! Application setup and router.

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::kernel::ServerDeps;
use crate::server::routes::{
    generate_handler, health_handler, post_handler, publish_batch_handler, regenerate_handler,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub deps: Arc<ServerDeps>,
    /// Reported by the health check
    pub gemini_model: String,
}

impl AppState {
    pub fn new(deps: ServerDeps, gemini_model: impl Into<String>) -> Self {
        Self {
            deps: Arc::new(deps),
            gemini_model: gemini_model.into(),
        }
    }
}

fn cors_layer(allowed_origins: Option<&[String]>) -> CorsLayer {
    let origin = match allowed_origins {
        Some(origins) => AllowOrigin::list(
            origins
                .iter()
                .filter_map(|origin| origin.parse::<HeaderValue>().ok()),
        ),
        None => AllowOrigin::from(Any),
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
}

/// Build the Axum application router
pub fn build_app(state: AppState, allowed_origins: Option<&[String]>) -> Router {
    Router::new()
        .route("/api/generate", post(generate_handler))
        .route("/api/regenerate", post(regenerate_handler))
        .route("/api/post", post(post_handler))
        .route("/api/publish", post(publish_batch_handler))
        .route("/health", get(health_handler))
        .layer(Extension(state))
        .layer(cors_layer(allowed_origins))
        .layer(TraceLayer::new_for_http())
}
