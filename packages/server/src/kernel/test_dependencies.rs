// TestDependencies - mock implementations for testing
//
// Provides mock services that can be injected into ServerDeps for tests.

use anyhow::Result;
use async_trait::async_trait;
use gemini_client::{GeminiError, RESOURCE_EXHAUSTED};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::{
    BasePageFetcher, BaseSlideRenderer, BaseTextGenerator, PlaceholderSlideRenderer, ServerDeps,
};
use crate::common::{ApiCredential, RetryPolicy};
use crate::domains::generation::models::PersonaProfile;
use crate::domains::publishing::models::PublishingSettings;

// =============================================================================
// Mock Text Generator
// =============================================================================

/// Failure a mock call should produce.
#[derive(Debug, Clone)]
pub enum MockFailure {
    /// HTTP 429 from the backend
    RateLimited,
    /// 429 / RESOURCE_EXHAUSTED with a quota message
    QuotaExhausted,
    /// Any other backend rejection (HTTP 400)
    Fatal(String),
    /// Error without backend structure, only a message
    Untyped(String),
}

impl MockFailure {
    fn into_error(self) -> anyhow::Error {
        match self {
            MockFailure::RateLimited => GeminiError::Api {
                status: 429,
                code: None,
                message: "Too many requests, slow down.".to_string(),
            }
            .into(),
            MockFailure::QuotaExhausted => GeminiError::Api {
                status: 429,
                code: Some(RESOURCE_EXHAUSTED.to_string()),
                message: "You exceeded your current quota, please check your plan and billing details."
                    .to_string(),
            }
            .into(),
            MockFailure::Fatal(message) => GeminiError::Api {
                status: 400,
                code: Some("INVALID_ARGUMENT".to_string()),
                message,
            }
            .into(),
            MockFailure::Untyped(message) => anyhow::anyhow!(message),
        }
    }
}

pub struct MockTextGenerator {
    /// (prompt substring, response)
    responses: Arc<Mutex<Vec<(String, String)>>>,
    /// (optional prompt substring, failure); consumed once each
    failures: Arc<Mutex<Vec<(Option<String>, MockFailure)>>>,
    default_response: String,
    latency: Option<Duration>,
    calls: Arc<Mutex<Vec<String>>>,
    keys: Arc<Mutex<Vec<String>>>,
}

impl MockTextGenerator {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            failures: Arc::new(Mutex::new(Vec::new())),
            default_response: "Mock generated content".to_string(),
            latency: None,
            calls: Arc::new(Mutex::new(Vec::new())),
            keys: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Respond with `response` to any prompt containing `marker`
    pub fn with_response_for(self, marker: impl Into<String>, response: impl Into<String>) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push((marker.into(), response.into()));
        self
    }

    /// Response for prompts no marker matches
    pub fn with_default_response(mut self, response: impl Into<String>) -> Self {
        self.default_response = response.into();
        self
    }

    /// Fail the next call (any prompt) once
    pub fn with_failure(self, failure: MockFailure) -> Self {
        self.failures.lock().unwrap().push((None, failure));
        self
    }

    /// Fail the next call whose prompt contains `marker` once
    pub fn with_failure_for(self, marker: impl Into<String>, failure: MockFailure) -> Self {
        self.failures
            .lock()
            .unwrap()
            .push((Some(marker.into()), failure));
        self
    }

    /// Sleep this long inside every call
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Get all prompts that were sent
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Keys the calls were made with
    pub fn keys(&self) -> Vec<String> {
        self.keys.lock().unwrap().clone()
    }

    /// Check if a prompt containing the given text was sent
    pub fn was_called_with(&self, text: &str) -> bool {
        self.calls.lock().unwrap().iter().any(|p| p.contains(text))
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn take_failure(&self, prompt: &str) -> Option<MockFailure> {
        let mut failures = self.failures.lock().unwrap();
        let index = failures.iter().position(|(marker, _)| match marker {
            Some(marker) => prompt.contains(marker.as_str()),
            None => true,
        })?;
        Some(failures.remove(index).1)
    }
}

impl Default for MockTextGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseTextGenerator for MockTextGenerator {
    async fn generate(&self, prompt: &str, credential: &ApiCredential) -> Result<String> {
        self.calls.lock().unwrap().push(prompt.to_string());
        self.keys.lock().unwrap().push(credential.expose().to_string());

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        if let Some(failure) = self.take_failure(prompt) {
            return Err(failure.into_error());
        }

        let responses = self.responses.lock().unwrap();
        Ok(responses
            .iter()
            .find(|(marker, _)| prompt.contains(marker.as_str()))
            .map(|(_, response)| response.clone())
            .unwrap_or_else(|| self.default_response.clone()))
    }
}

// =============================================================================
// Mock Page Fetcher
// =============================================================================

pub struct MockPageFetcher {
    pages: Arc<Mutex<HashMap<String, String>>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockPageFetcher {
    pub fn new() -> Self {
        Self {
            pages: Arc::new(Mutex::new(HashMap::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Serve `html` for `url`; any other URL fails like an unreachable host
    pub fn with_page(self, url: impl Into<String>, html: impl Into<String>) -> Self {
        self.pages.lock().unwrap().insert(url.into(), html.into());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl Default for MockPageFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BasePageFetcher for MockPageFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        self.calls.lock().unwrap().push(url.to_string());

        self.pages
            .lock()
            .unwrap()
            .get(url)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("error sending request for url ({}): connection refused", url))
    }
}

// =============================================================================
// TestDependencies
// =============================================================================

pub struct TestDependencies {
    pub text_generator: Arc<MockTextGenerator>,
    pub page_fetcher: Arc<MockPageFetcher>,
    pub slide_renderer: Arc<dyn BaseSlideRenderer>,
    pub persona: PersonaProfile,
    pub retry_policy: RetryPolicy,
    pub publishing: PublishingSettings,
}

impl TestDependencies {
    pub fn new() -> Self {
        Self {
            text_generator: Arc::new(MockTextGenerator::new()),
            page_fetcher: Arc::new(MockPageFetcher::new()),
            slide_renderer: Arc::new(PlaceholderSlideRenderer),
            persona: PersonaProfile::default(),
            retry_policy: RetryPolicy::default(),
            publishing: PublishingSettings::default(),
        }
    }

    /// Set a mock text generator
    pub fn mock_generator(mut self, generator: MockTextGenerator) -> Self {
        self.text_generator = Arc::new(generator);
        self
    }

    /// Set a mock page fetcher
    pub fn mock_fetcher(mut self, fetcher: MockPageFetcher) -> Self {
        self.page_fetcher = Arc::new(fetcher);
        self
    }

    pub fn retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = policy;
        self
    }

    pub fn publishing(mut self, settings: PublishingSettings) -> Self {
        self.publishing = settings;
        self
    }

    /// Convert into ServerDeps; keep clones of the mock `Arc`s to inspect calls
    pub fn into_server_deps(self) -> ServerDeps {
        ServerDeps::new(
            self.text_generator,
            self.page_fetcher,
            self.slide_renderer,
            self.persona,
            self.retry_policy,
            self.publishing,
            reqwest::Client::new(),
        )
    }
}

impl Default for TestDependencies {
    fn default() -> Self {
        Self::new()
    }
}
