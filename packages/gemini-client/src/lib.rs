//! Pure Gemini REST API client
//!
//! A minimal client for the `generateContent` endpoint with no domain logic.
//!
//! # Example
//!
//! ```rust,ignore
//! use gemini_client::GeminiClient;
//!
//! let client = GeminiClient::from_env()?.with_model("gemini-1.5-flash");
//! let text = client.generate_text("Summarize this article...").await?;
//! ```

pub mod error;
pub mod types;

pub use error::{message_indicates_rate_limit, GeminiError, Result, RESOURCE_EXHAUSTED};
pub use types::*;

use std::fmt;

use reqwest::Client;
use tracing::{debug, warn};

/// Public Generative Language API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Pure Gemini API client.
#[derive(Clone)]
pub struct GeminiClient {
    http_client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl GeminiClient {
    /// Create a new client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http_client: Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Create from environment variable `GEMINI_API_KEY`.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .map_err(|_| GeminiError::Config("GEMINI_API_KEY not set".into()))?;
        Ok(Self::new(api_key))
    }

    /// Set a custom base URL (proxies, tests).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Reuse an existing connection pool.
    pub fn with_http_client(mut self, http_client: Client) -> Self {
        self.http_client = http_client;
        self
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    /// Call `generateContent` and return the raw response.
    pub async fn generate_content(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        if self.api_key.is_empty() {
            return Err(GeminiError::Config("API key is empty".into()));
        }

        let start = std::time::Instant::now();

        let response = self
            .http_client
            .post(self.endpoint())
            .header(API_KEY_HEADER, &self.api_key)
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Gemini request failed");
                GeminiError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = %status, error = %error_text, "Gemini API error");
            return Err(api_error(status.as_u16(), &error_text));
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| GeminiError::Parse(e.to_string()))?;

        debug!(
            model = %self.model,
            duration_ms = start.elapsed().as_millis(),
            total_tokens = body.usage_metadata.as_ref().and_then(|u| u.total_token_count),
            "Gemini generateContent"
        );

        Ok(body)
    }

    /// Send a single prompt and return the model's text.
    pub async fn generate_text(&self, prompt: &str) -> Result<String> {
        let response = self
            .generate_content(&GenerateContentRequest::from_prompt(prompt))
            .await?;

        response
            .text()
            .ok_or_else(|| GeminiError::EmptyResponse(response.empty_reason()))
    }
}

impl fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiClient")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish()
    }
}

/// Build an `Api` error from a non-2xx body, keeping the raw text when it is not JSON.
fn api_error(status: u16, body: &str) -> GeminiError {
    match serde_json::from_str::<ApiErrorEnvelope>(body) {
        Ok(envelope) => GeminiError::Api {
            status,
            code: envelope.error.status,
            message: if envelope.error.message.is_empty() {
                body.to_string()
            } else {
                envelope.error.message
            },
        },
        Err(_) => GeminiError::Api {
            status,
            code: None,
            message: body.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_builder() {
        let client = GeminiClient::new("AIza-test")
            .with_base_url("https://proxy.example.com/v1beta/")
            .with_model("gemini-1.5-pro");

        assert_eq!(client.api_key, "AIza-test");
        assert_eq!(client.base_url, "https://proxy.example.com/v1beta");
        assert_eq!(
            client.endpoint(),
            "https://proxy.example.com/v1beta/models/gemini-1.5-pro:generateContent"
        );
    }

    #[test]
    fn debug_output_hides_key() {
        let client = GeminiClient::new("AIzaSecretValue");
        assert!(!format!("{:?}", client).contains("AIzaSecretValue"));
    }

    #[test]
    fn api_error_reads_google_envelope() {
        let err = api_error(
            429,
            r#"{"error": {"code": 429, "message": "Resource has been exhausted", "status": "RESOURCE_EXHAUSTED"}}"#,
        );

        match &err {
            GeminiError::Api { status, code, message } => {
                assert_eq!(*status, 429);
                assert_eq!(code.as_deref(), Some(RESOURCE_EXHAUSTED));
                assert_eq!(message, "Resource has been exhausted");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.is_rate_limited());
    }

    #[test]
    fn api_error_keeps_plain_text_body() {
        let err = api_error(502, "Bad Gateway");
        assert_eq!(err.to_string(), "API error (502): Bad Gateway");
        assert!(!err.is_rate_limited());
    }
}
