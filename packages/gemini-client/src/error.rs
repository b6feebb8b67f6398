//! Error types for the Gemini client.

use thiserror::Error;

/// Result type for Gemini client operations.
pub type Result<T> = std::result::Result<T, GeminiError>;

/// Backend status string Google uses for quota and rate-limit rejections.
pub const RESOURCE_EXHAUSTED: &str = "RESOURCE_EXHAUSTED";

/// Gemini client errors.
#[derive(Debug, Error)]
pub enum GeminiError {
    /// Configuration error (missing API key, invalid settings)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network error (connection failed, timeout)
    #[error("Network error: {0}")]
    Network(String),

    /// Non-2xx response from the API
    #[error("API error ({status}): {message}")]
    Api {
        status: u16,
        /// Google status string, e.g. `RESOURCE_EXHAUSTED`
        code: Option<String>,
        message: String,
    },

    /// Parse error (invalid JSON, unexpected response format)
    #[error("Parse error: {0}")]
    Parse(String),

    /// The model answered without any text (blocked prompt, empty candidate)
    #[error("Empty response from Gemini: {0}")]
    EmptyResponse(String),
}

impl GeminiError {
    /// HTTP status of an API error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            GeminiError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the backend rejected the call because of rate limits or quota.
    ///
    /// Structured fields win; the message is only inspected for errors that
    /// carry no status (e.g. a proxy that rewrote the body).
    pub fn is_rate_limited(&self) -> bool {
        match self {
            GeminiError::Api { status, code, message } => {
                *status == 429
                    || code.as_deref() == Some(RESOURCE_EXHAUSTED)
                    || message_indicates_rate_limit(message)
            }
            GeminiError::Network(message) => message_indicates_rate_limit(message),
            _ => false,
        }
    }
}

/// Fallback classification for error text that lost its structure.
pub fn message_indicates_rate_limit(message: &str) -> bool {
    let lower = message.to_lowercase();
    lower.contains("429") || lower.contains("quota") || lower.contains("rate limit")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(status: u16, code: Option<&str>, message: &str) -> GeminiError {
        GeminiError::Api {
            status,
            code: code.map(str::to_string),
            message: message.to_string(),
        }
    }

    #[test]
    fn status_429_is_rate_limited() {
        assert!(api(429, None, "slow down").is_rate_limited());
    }

    #[test]
    fn resource_exhausted_is_rate_limited_regardless_of_status() {
        assert!(api(400, Some(RESOURCE_EXHAUSTED), "nope").is_rate_limited());
    }

    #[test]
    fn quota_message_is_rate_limited() {
        assert!(api(403, None, "Quota exceeded for metric").is_rate_limited());
    }

    #[test]
    fn invalid_argument_is_not_rate_limited() {
        assert!(!api(400, Some("INVALID_ARGUMENT"), "API key not valid").is_rate_limited());
        assert!(!GeminiError::Parse("bad json".into()).is_rate_limited());
        assert!(!GeminiError::EmptyResponse("SAFETY".into()).is_rate_limited());
    }

    #[test]
    fn message_fallback_matches_known_substrings() {
        assert!(message_indicates_rate_limit("HTTP 429 Too Many Requests"));
        assert!(message_indicates_rate_limit("You exceeded your current QUOTA"));
        assert!(message_indicates_rate_limit("rate limit reached"));
        assert!(!message_indicates_rate_limit("connection reset by peer"));
    }

    #[test]
    fn display_includes_status_and_message() {
        let err = api(429, Some(RESOURCE_EXHAUSTED), "Resource has been exhausted");
        assert_eq!(
            err.to_string(),
            "API error (429): Resource has been exhausted"
        );
        assert_eq!(err.status(), Some(429));
    }
}
