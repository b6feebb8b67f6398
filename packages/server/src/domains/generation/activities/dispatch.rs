//! Fan-out of generation calls with per-call retry.

use std::collections::BTreeMap;
use std::time::Instant;

use futures::future::join_all;
use gemini_client::{message_indicates_rate_limit, GeminiError};
use tracing::{debug, info, warn};

use crate::common::{retry_with_backoff, ApiCredential, Platform, RetryPolicy};
use crate::domains::generation::error::PipelineError;
use crate::kernel::BaseTextGenerator;

const GENERIC_FAILURE: &str = "Content generation failed.";

/// Structured backend error first, message text as a fallback.
pub fn is_rate_limit_error(error: &anyhow::Error) -> bool {
    match error.downcast_ref::<GeminiError>() {
        Some(gemini) => gemini.is_rate_limited(),
        None => message_indicates_rate_limit(&format!("{:#}", error)),
    }
}

/// Backend message verbatim where there is one.
fn backend_message(error: &anyhow::Error) -> String {
    if let Some(GeminiError::Api { message, .. }) = error.downcast_ref::<GeminiError>() {
        if !message.trim().is_empty() {
            return message.clone();
        }
    }

    let message = format!("{:#}", error);
    if message.trim().is_empty() {
        GENERIC_FAILURE.to_string()
    } else {
        message
    }
}

fn indicates_exhausted_quota(message: &str) -> bool {
    let lower = message.to_lowercase();
    lower.contains("quota") || lower.contains("per day") || lower.contains("billing")
}

pub fn into_pipeline_error(platform: Platform, error: anyhow::Error) -> PipelineError {
    let message = backend_message(&error);
    if is_rate_limit_error(&error) {
        PipelineError::RateLimit {
            platform,
            quota_exhausted: indicates_exhausted_quota(&message),
            message,
        }
    } else {
        PipelineError::Generation { platform, message }
    }
}

/// One platform, retried on rate limits according to `policy`.
pub async fn generate_one(
    generator: &dyn BaseTextGenerator,
    policy: &RetryPolicy,
    platform: Platform,
    prompt: &str,
    credential: &ApiCredential,
) -> Result<String, PipelineError> {
    let start = Instant::now();

    let raw = retry_with_backoff(policy, is_rate_limit_error, |attempt| {
        debug!(platform = %platform, attempt, "Requesting generation");
        generator.generate(prompt, credential)
    })
    .await
    .map_err(|e| into_pipeline_error(platform, e))?;

    info!(
        platform = %platform,
        chars = raw.chars().count(),
        duration_ms = start.elapsed().as_millis() as u64,
        "Generated content"
    );

    Ok(raw)
}

/// Every platform at once; waits for all calls to settle before reporting.
///
/// Any failed platform fails the whole set (first failure in platform order).
pub async fn generate_all(
    generator: &dyn BaseTextGenerator,
    policy: &RetryPolicy,
    prompts: &BTreeMap<Platform, String>,
    credential: &ApiCredential,
) -> Result<BTreeMap<Platform, String>, PipelineError> {
    let calls = prompts.iter().map(|(platform, prompt)| async move {
        let result = generate_one(generator, policy, *platform, prompt, credential).await;
        (*platform, result)
    });

    let mut outputs = BTreeMap::new();
    let mut first_error = None;

    for (platform, result) in join_all(calls).await {
        match result {
            Ok(raw) => {
                outputs.insert(platform, raw);
            }
            Err(e) => {
                warn!(platform = %platform, error = %e, "Generation failed");
                first_error.get_or_insert(e);
            }
        }
    }

    match first_error {
        Some(e) => Err(e),
        None => Ok(outputs),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::test_dependencies::{MockFailure, MockTextGenerator};
    use std::time::Duration;

    const KEY: &str = "AIzaSyA1234567890abcdefghijklmnopqrs";

    fn credential() -> ApiCredential {
        ApiCredential::parse(KEY).unwrap()
    }

    fn prompts(platforms: &[Platform]) -> BTreeMap<Platform, String> {
        platforms
            .iter()
            .map(|p| (*p, format!("prompt for {}", p.id())))
            .collect()
    }

    #[test]
    fn structured_rate_limit_is_classified() {
        let err = anyhow::Error::from(GeminiError::Api {
            status: 429,
            code: None,
            message: "slow down".into(),
        });
        assert!(is_rate_limit_error(&err));
    }

    #[test]
    fn untyped_errors_fall_back_to_message() {
        assert!(is_rate_limit_error(&anyhow::anyhow!("HTTP 429 from upstream")));
        assert!(is_rate_limit_error(&anyhow::anyhow!("Quota exceeded")));
        assert!(!is_rate_limit_error(&anyhow::anyhow!("invalid argument")));
    }

    #[test]
    fn context_wrapped_gemini_error_is_still_classified() {
        let err = anyhow::Error::from(GeminiError::Api {
            status: 400,
            code: Some("RESOURCE_EXHAUSTED".into()),
            message: "nope".into(),
        })
        .context("calling Gemini");
        assert!(is_rate_limit_error(&err));
    }

    #[test]
    fn generation_error_keeps_backend_message() {
        let err = into_pipeline_error(
            Platform::Article,
            anyhow::Error::from(GeminiError::Api {
                status: 400,
                code: Some("INVALID_ARGUMENT".into()),
                message: "API key not valid. Please pass a valid API key.".into(),
            }),
        );

        match err {
            PipelineError::Generation { platform, message } => {
                assert_eq!(platform, Platform::Article);
                assert_eq!(message, "API key not valid. Please pass a valid API key.");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn generate_all_returns_one_output_per_platform() {
        let generator = MockTextGenerator::new()
            .with_response_for("prompt for x", "tweet")
            .with_response_for("prompt for note", "article");
        let platforms = [Platform::Microblog, Platform::Article];

        let outputs = generate_all(
            &generator,
            &RetryPolicy::default(),
            &prompts(&platforms),
            &credential(),
        )
        .await
        .unwrap();

        assert_eq!(outputs.len(), 2);
        assert_eq!(outputs[&Platform::Microblog], "tweet");
        assert_eq!(outputs[&Platform::Article], "article");
        assert_eq!(generator.call_count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn calls_run_concurrently() {
        let generator = MockTextGenerator::new().with_latency(Duration::from_secs(5));
        let start = tokio::time::Instant::now();

        generate_all(
            &generator,
            &RetryPolicy::default(),
            &prompts(&Platform::ALL),
            &credential(),
        )
        .await
        .unwrap();

        assert_eq!(generator.call_count(), Platform::ALL.len());
        assert!(start.elapsed() < Duration::from_secs(6));
    }

    #[tokio::test(start_paused = true)]
    async fn rate_limited_call_is_retried_then_succeeds() {
        let generator = MockTextGenerator::new()
            .with_default_response("ok")
            .with_failure(MockFailure::RateLimited)
            .with_failure(MockFailure::RateLimited);
        let start = tokio::time::Instant::now();

        let raw = generate_one(
            &generator,
            &RetryPolicy::default(),
            Platform::Thread,
            "prompt",
            &credential(),
        )
        .await
        .unwrap();

        assert_eq!(raw, "ok");
        assert_eq!(generator.call_count(), 3);
        assert!(start.elapsed() >= Duration::from_millis(3000));
    }

    #[tokio::test(start_paused = true)]
    async fn non_rate_limit_failure_is_not_retried() {
        let generator =
            MockTextGenerator::new().with_failure(MockFailure::Fatal("model not found".into()));

        let err = generate_one(
            &generator,
            &RetryPolicy::default(),
            Platform::Microblog,
            "prompt",
            &credential(),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, PipelineError::Generation { .. }));
        assert_eq!(generator.call_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn exhausted_retries_surface_rate_limit() {
        let generator = MockTextGenerator::new()
            .with_failure(MockFailure::QuotaExhausted)
            .with_failure(MockFailure::QuotaExhausted)
            .with_failure(MockFailure::QuotaExhausted);

        let err = generate_one(
            &generator,
            &RetryPolicy::default(),
            Platform::Microblog,
            "prompt",
            &credential(),
        )
        .await
        .unwrap_err();

        assert!(matches!(
            err,
            PipelineError::RateLimit {
                quota_exhausted: true,
                ..
            }
        ));
        assert_eq!(generator.call_count(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn one_failure_fails_the_set_after_all_calls_settle() {
        let generator = MockTextGenerator::new()
            .with_default_response("fine")
            .with_failure_for("prompt for note", MockFailure::Fatal("boom".into()));

        let err = generate_all(
            &generator,
            &RetryPolicy::default(),
            &prompts(&Platform::ALL),
            &credential(),
        )
        .await
        .unwrap_err();

        assert!(matches!(
            err,
            PipelineError::Generation {
                platform: Platform::Article,
                ..
            }
        ));
        assert_eq!(generator.call_count(), Platform::ALL.len());
    }
}
