//! Gemini-backed text generator.

use anyhow::Result;
use async_trait::async_trait;
use gemini_client::{GeminiClient, DEFAULT_MODEL};

use super::BaseTextGenerator;
use crate::common::ApiCredential;

/// Builds a per-call client from the caller's key; the connection pool is shared.
#[derive(Clone)]
pub struct GeminiGenerator {
    http_client: reqwest::Client,
    model: String,
    base_url: Option<String>,
}

impl GeminiGenerator {
    pub fn new(http_client: reqwest::Client) -> Self {
        Self {
            http_client,
            model: DEFAULT_MODEL.to_string(),
            base_url: None,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: Option<String>) -> Self {
        self.base_url = base_url;
        self
    }

    fn client_for(&self, credential: &ApiCredential) -> GeminiClient {
        let client = GeminiClient::new(credential.expose())
            .with_http_client(self.http_client.clone())
            .with_model(&self.model);

        match &self.base_url {
            Some(url) => client.with_base_url(url),
            None => client,
        }
    }
}

#[async_trait]
impl BaseTextGenerator for GeminiGenerator {
    async fn generate(&self, prompt: &str, credential: &ApiCredential) -> Result<String> {
        let text = self.client_for(credential).generate_text(prompt).await?;
        Ok(text)
    }
}
