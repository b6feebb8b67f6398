use axum::{extract::rejection::JsonRejection, extract::Extension, Json};
use serde::Deserialize;

use super::{bad_request, ok, pipeline_failure, rejected, ApiResult};
use crate::common::{ContentBundle, InputType, Platform, SourceContent};
use crate::domains::generation::activities::{generate_bundle, regenerate_into};
use crate::server::app::AppState;

fn default_input_type() -> InputType {
    InputType::Text
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    #[serde(default)]
    pub content: String,
    #[serde(default = "default_input_type")]
    pub input_type: InputType,
    #[serde(default)]
    pub api_key: Option<String>,
    /// Platform ids; empty means all
    #[serde(default)]
    pub platforms: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegenerateRequest {
    #[serde(default)]
    pub content: String,
    #[serde(default = "default_input_type")]
    pub input_type: InputType,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub platform: String,
    /// Current bundle; only the regenerated platform is replaced
    #[serde(default)]
    pub bundle: Option<ContentBundle>,
}

fn parse_platforms(ids: &[String]) -> Result<Vec<Platform>, String> {
    ids.iter()
        .map(|id| id.parse::<Platform>().map_err(|e| e.to_string()))
        .collect()
}

/// POST /api/generate
pub async fn generate_handler(
    Extension(state): Extension<AppState>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> ApiResult<ContentBundle> {
    let Json(request) = match payload {
        Ok(json) => json,
        Err(rejection) => return rejected(rejection),
    };

    let platforms = match parse_platforms(&request.platforms) {
        Ok(platforms) => platforms,
        Err(message) => return bad_request(message),
    };

    let source = SourceContent {
        content: request.content,
        input_type: request.input_type,
    };

    match generate_bundle(&source, request.api_key.as_deref(), &platforms, &state.deps).await {
        Ok(bundle) => ok(bundle),
        Err(e) => {
            tracing::warn!(error = %e, kind = e.kind(), "Content generation failed");
            pipeline_failure(e)
        }
    }
}

/// POST /api/regenerate
pub async fn regenerate_handler(
    Extension(state): Extension<AppState>,
    payload: Result<Json<RegenerateRequest>, JsonRejection>,
) -> ApiResult<ContentBundle> {
    let Json(request) = match payload {
        Ok(json) => json,
        Err(rejection) => return rejected(rejection),
    };

    if request.platform.trim().is_empty() {
        return bad_request("A platform is required");
    }
    let platform = match request.platform.parse::<Platform>() {
        Ok(platform) => platform,
        Err(e) => return bad_request(e.to_string()),
    };

    let source = SourceContent {
        content: request.content,
        input_type: request.input_type,
    };

    // Deserialization already conformed any carousel entry to a full deck.
    let mut bundle = request.bundle.unwrap_or_default();

    match regenerate_into(&mut bundle, &source, request.api_key.as_deref(), platform, &state.deps)
        .await
    {
        Ok(()) => ok(bundle),
        Err(e) => {
            tracing::warn!(platform = %platform, error = %e, "Regeneration failed");
            pipeline_failure(e)
        }
    }
}
