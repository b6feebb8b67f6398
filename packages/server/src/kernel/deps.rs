//! Server dependencies for activities (using traits for testability)
//!
//! Central dependency container shared by the HTTP handlers and domain activities.
//! All external services use trait abstractions to enable testing.

use std::sync::Arc;

use crate::common::RetryPolicy;
use crate::domains::generation::models::PersonaProfile;
use crate::domains::publishing::models::PublishingSettings;
use crate::kernel::{BasePageFetcher, BaseSlideRenderer, BaseTextGenerator};

#[derive(Clone)]
pub struct ServerDeps {
    pub text_generator: Arc<dyn BaseTextGenerator>,
    pub page_fetcher: Arc<dyn BasePageFetcher>,
    /// Hosts carousel slide images before upload
    pub slide_renderer: Arc<dyn BaseSlideRenderer>,
    pub persona: PersonaProfile,
    pub retry_policy: RetryPolicy,
    /// Publishing adapter credentials and endpoints
    pub publishing: PublishingSettings,
    /// Shared connection pool for the publishing adapters
    pub http_client: reqwest::Client,
}

impl ServerDeps {
    pub fn new(
        text_generator: Arc<dyn BaseTextGenerator>,
        page_fetcher: Arc<dyn BasePageFetcher>,
        slide_renderer: Arc<dyn BaseSlideRenderer>,
        persona: PersonaProfile,
        retry_policy: RetryPolicy,
        publishing: PublishingSettings,
        http_client: reqwest::Client,
    ) -> Self {
        Self {
            text_generator,
            page_fetcher,
            slide_renderer,
            persona,
            retry_policy,
            publishing,
            http_client,
        }
    }
}
