//! HTTP client for the crosspost API.

use anyhow::{Context, Result};
use crosspost_core::common::{ApiResponse, ContentBundle, InputType, PlatformContent};
use crosspost_core::domains::publishing::{PublishOutcome, PublishReceipt};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

pub const DEFAULT_SERVER_URL: &str = "http://localhost:8080";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateBody<'a> {
    pub content: &'a str,
    pub input_type: InputType,
    pub api_key: &'a str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub platforms: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegenerateBody<'a> {
    pub content: &'a str,
    pub input_type: InputType,
    pub api_key: &'a str,
    pub platform: &'a str,
    pub bundle: &'a ContentBundle,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostBody {
    pub platform: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub content: PlatformContent,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
}

#[derive(Debug, Serialize)]
struct BatchBody<'a> {
    posts: &'a [PostBody],
}

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// `CROSSPOST_SERVER_URL` or the local default
    pub fn from_env() -> Self {
        let url = std::env::var("CROSSPOST_SERVER_URL")
            .ok()
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string());
        Self::new(url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn generate(&self, body: &GenerateBody<'_>) -> Result<ContentBundle> {
        self.post("/api/generate", body).await
    }

    pub async fn regenerate(&self, body: &RegenerateBody<'_>) -> Result<ContentBundle> {
        self.post("/api/regenerate", body).await
    }

    pub async fn publish_one(&self, body: &PostBody) -> Result<PublishReceipt> {
        self.post("/api/post", body).await
    }

    pub async fn publish_many(&self, posts: &[PostBody]) -> Result<Vec<PublishOutcome>> {
        self.post("/api/publish", &BatchBody { posts }).await
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!(url = %url, "Calling crosspost API");

        let response = self
            .http
            .post(&url)
            .json(body)
            .send()
            .await
            .with_context(|| format!("Could not reach the crosspost server at {}", self.base_url))?;

        let status = response.status();
        let envelope: ApiResponse<T> = response
            .json()
            .await
            .with_context(|| format!("Unexpected response from {} ({})", path, status))?;

        let hint = envelope.hint.clone();
        envelope.into_result().map_err(|message| match hint {
            Some(hint) => anyhow::anyhow!("{}\n{}", message, hint),
            None => anyhow::anyhow!(message),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crosspost_core::common::Platform;

    #[test]
    fn generate_body_matches_the_api_field_names() {
        let body = GenerateBody {
            content: "hello",
            input_type: InputType::Url,
            api_key: "AIza...",
            platforms: vec![],
        };
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["inputType"], "url");
        assert_eq!(json["apiKey"], "AIza...");
        assert!(json.get("platforms").is_none());
    }

    #[test]
    fn post_body_sends_slides_as_a_list() {
        let body = PostBody {
            platform: Platform::Carousel.id().to_string(),
            title: None,
            content: PlatformContent::Slides(vec!["a".into(), "b".into()]),
            access_token: None,
        };
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["platform"], "instagram");
        assert_eq!(json["content"], serde_json::json!(["a", "b"]));
        assert!(json.get("title").is_none());
    }

    #[test]
    fn trailing_slash_is_dropped() {
        assert_eq!(ApiClient::new("http://localhost:9000/").base_url(), "http://localhost:9000");
    }
}
