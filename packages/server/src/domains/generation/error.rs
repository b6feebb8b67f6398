//! Errors of the generation pipeline.

use thiserror::Error;

use crate::common::{CredentialError, Platform};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("No content was provided. Enter some text or a URL.")]
    EmptyInput,

    #[error("Could not extract content from the URL: {0}")]
    Fetch(String),

    #[error(transparent)]
    Credential(#[from] CredentialError),

    #[error("Gemini API rate limit reached while generating {platform} content: {message}")]
    RateLimit {
        platform: Platform,
        message: String,
        /// Quota used up (plan limit) rather than a short burst
        quota_exhausted: bool,
    },

    #[error("Content generation failed for {platform}: {message}")]
    Generation { platform: Platform, message: String },
}

impl PipelineError {
    /// Stable machine-readable category.
    pub fn kind(&self) -> &'static str {
        match self {
            PipelineError::EmptyInput => "empty_input",
            PipelineError::Fetch(_) => "fetch",
            PipelineError::Credential(CredentialError::Missing) => "missing_credential",
            PipelineError::Credential(CredentialError::Invalid(_)) => "invalid_credential",
            PipelineError::RateLimit { .. } => "rate_limit",
            PipelineError::Generation { .. } => "generation",
        }
    }

    /// Next step for the user, where there is a useful one.
    pub fn hint(&self) -> Option<String> {
        match self {
            PipelineError::RateLimit {
                quota_exhausted: true,
                ..
            } => Some(
                "Your Gemini quota is used up. Check your plan and billing in Google AI Studio, \
                 or upgrade to a paid tier."
                    .to_string(),
            ),
            PipelineError::RateLimit { .. } => Some(
                "Too many requests in a short time. Wait about a minute and try again.".to_string(),
            ),
            PipelineError::Credential(_) => Some(
                "Create a key at https://aistudio.google.com/app/apikey and paste it in settings."
                    .to_string(),
            ),
            PipelineError::Fetch(_) => {
                Some("Check that the URL is public, or paste the text directly.".to_string())
            }
            PipelineError::EmptyInput | PipelineError::Generation { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_limit_hint_distinguishes_quota_from_burst() {
        let burst = PipelineError::RateLimit {
            platform: Platform::Microblog,
            message: "429".into(),
            quota_exhausted: false,
        };
        let quota = PipelineError::RateLimit {
            platform: Platform::Microblog,
            message: "quota exceeded".into(),
            quota_exhausted: true,
        };

        assert!(burst.hint().unwrap().contains("Wait"));
        assert!(quota.hint().unwrap().contains("upgrade"));
    }

    #[test]
    fn credential_errors_keep_distinct_kinds() {
        assert_eq!(
            PipelineError::from(CredentialError::Missing).kind(),
            "missing_credential"
        );
        assert_eq!(
            PipelineError::from(CredentialError::Invalid("too short")).kind(),
            "invalid_credential"
        );
    }
}
