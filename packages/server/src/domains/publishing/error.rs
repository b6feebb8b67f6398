//! Errors of the publishing adapters.

use thiserror::Error;

use crate::common::Platform;

#[derive(Debug, Error)]
pub enum PublishError {
    /// Adapter credentials are not configured (names the env vars to set)
    #[error("{platform} credentials are not configured (set {variables})")]
    MissingCredentials {
        platform: Platform,
        variables: &'static str,
    },

    #[error("A title is required to publish to {0}")]
    MissingTitle(Platform),

    #[error("Nothing to publish to {0}")]
    EmptyContent(Platform),

    #[error("{platform} request failed: {message}")]
    Network { platform: Platform, message: String },

    #[error("{platform} API error ({status}): {message}")]
    Api {
        platform: Platform,
        status: u16,
        message: String,
    },

    #[error("Unexpected {platform} response: {message}")]
    Parse { platform: Platform, message: String },

    #[error("Failed to render slide {position}: {message}")]
    Render { position: usize, message: String },
}

impl PublishError {
    pub fn kind(&self) -> &'static str {
        match self {
            PublishError::MissingCredentials { .. } => "missing_publish_credentials",
            PublishError::MissingTitle(_) | PublishError::EmptyContent(_) => "invalid_publish_request",
            PublishError::Network { .. }
            | PublishError::Api { .. }
            | PublishError::Parse { .. }
            | PublishError::Render { .. } => "publish",
        }
    }

    /// Caller can fix it without the platform changing anything.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            PublishError::MissingCredentials { .. }
                | PublishError::MissingTitle(_)
                | PublishError::EmptyContent(_)
        )
    }
}
