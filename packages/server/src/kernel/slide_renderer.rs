//! Default carousel slide renderer.

use anyhow::Result;
use async_trait::async_trait;

use super::BaseSlideRenderer;

const PLACEHOLDER_BASE: &str = "https://via.placeholder.com/1080x1080/4F46E5/FFFFFF";

/// Emits a hosted placeholder image per slide until a real renderer is wired in.
#[derive(Debug, Default, Clone)]
pub struct PlaceholderSlideRenderer;

#[async_trait]
impl BaseSlideRenderer for PlaceholderSlideRenderer {
    async fn render(&self, position: usize, _text: &str) -> Result<String> {
        Ok(format!("{}?text=Slide+{}", PLACEHOLDER_BASE, position))
    }
}
