//! Generation entry points: whole bundle, or one platform.
//!
//! Order of checks: empty input, credential, extraction, then the backend.
//! Extraction and credential failures never reach the backend.

use std::collections::BTreeMap;

use tracing::info;

use super::build_prompt::build_prompt;
use super::dispatch::{generate_all, generate_one};
use super::extract_content::extract_content;
use super::normalize::normalize;
use crate::common::{ApiCredential, ContentBundle, Platform, PlatformContent, SourceContent};
use crate::domains::generation::error::PipelineError;
use crate::kernel::ServerDeps;

/// Requested platforms, deduplicated, in stable order. Empty means all.
pub fn resolve_targets(platforms: &[Platform]) -> Vec<Platform> {
    if platforms.is_empty() {
        return Platform::ALL.to_vec();
    }
    let mut targets = platforms.to_vec();
    targets.sort();
    targets.dedup();
    targets
}

/// Check input and key, then turn the source into prompt-ready text.
async fn prepare(
    source: &SourceContent,
    api_key: Option<&str>,
    deps: &ServerDeps,
) -> Result<(ApiCredential, String), PipelineError> {
    if source.is_blank() {
        return Err(PipelineError::EmptyInput);
    }
    let credential = ApiCredential::from_optional(api_key)?;
    let text = extract_content(source, deps.page_fetcher.as_ref()).await?;
    Ok((credential, text))
}

/// Generate content for every requested platform concurrently.
pub async fn generate_bundle(
    source: &SourceContent,
    api_key: Option<&str>,
    platforms: &[Platform],
    deps: &ServerDeps,
) -> Result<ContentBundle, PipelineError> {
    let (credential, text) = prepare(source, api_key, deps).await?;
    let targets = resolve_targets(platforms);

    info!(
        input_type = ?source.input_type,
        source_chars = text.chars().count(),
        platforms = ?targets,
        "Generating content bundle"
    );

    let prompts: BTreeMap<Platform, String> = targets
        .iter()
        .map(|platform| (*platform, build_prompt(*platform, &text, &deps.persona)))
        .collect();

    let raw = generate_all(
        deps.text_generator.as_ref(),
        &deps.retry_policy,
        &prompts,
        &credential,
    )
    .await?;

    Ok(raw
        .into_iter()
        .map(|(platform, output)| (platform, normalize(platform, output)))
        .collect())
}

/// Same pipeline scoped to one platform.
pub async fn regenerate_platform(
    source: &SourceContent,
    api_key: Option<&str>,
    platform: Platform,
    deps: &ServerDeps,
) -> Result<PlatformContent, PipelineError> {
    let (credential, text) = prepare(source, api_key, deps).await?;

    info!(platform = %platform, "Regenerating content");

    let prompt = build_prompt(platform, &text, &deps.persona);
    let raw = generate_one(
        deps.text_generator.as_ref(),
        &deps.retry_policy,
        platform,
        &prompt,
        &credential,
    )
    .await?;

    Ok(normalize(platform, raw))
}

/// Regenerate one platform and swap it into `bundle`. On failure the bundle is untouched.
pub async fn regenerate_into(
    bundle: &mut ContentBundle,
    source: &SourceContent,
    api_key: Option<&str>,
    platform: Platform,
    deps: &ServerDeps,
) -> Result<(), PipelineError> {
    let content = regenerate_platform(source, api_key, platform, deps).await?;
    bundle.replace(platform, content);
    Ok(())
}
