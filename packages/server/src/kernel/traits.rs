// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Prompt construction, normalization and retry live in the domains and use these traits.
//
// Naming convention: Base* for trait names (e.g., BaseTextGenerator, BasePageFetcher)

use anyhow::Result;
use async_trait::async_trait;

use crate::common::ApiCredential;

// =============================================================================
// Text generation (Infrastructure - generic LLM call)
// =============================================================================

#[async_trait]
pub trait BaseTextGenerator: Send + Sync {
    /// Send one prompt with the caller's key and return the model's raw text.
    ///
    /// Backend errors should stay downcastable (e.g. `gemini_client::GeminiError`)
    /// so callers can classify them.
    async fn generate(&self, prompt: &str, credential: &ApiCredential) -> Result<String>;
}

// =============================================================================
// Page fetching (Infrastructure - single HTTP GET)
// =============================================================================

#[async_trait]
pub trait BasePageFetcher: Send + Sync {
    /// Fetch a page body. Non-success statuses are errors.
    async fn fetch(&self, url: &str) -> Result<String>;
}

// =============================================================================
// Slide rendering (Infrastructure - image hosting for carousel slides)
// =============================================================================

#[async_trait]
pub trait BaseSlideRenderer: Send + Sync {
    /// Produce a publicly reachable image URL for a slide (1-based position).
    async fn render(&self, position: usize, text: &str) -> Result<String>;
}
