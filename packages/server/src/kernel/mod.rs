//! Kernel module - server infrastructure and dependencies.

pub mod deps;
pub mod gemini;
pub mod page_fetcher;
pub mod slide_renderer;
pub mod test_dependencies;
pub mod traits;

pub use deps::ServerDeps;
pub use gemini::GeminiGenerator;
pub use page_fetcher::{HttpPageFetcher, BROWSER_USER_AGENT};
pub use slide_renderer::PlaceholderSlideRenderer;
pub use test_dependencies::TestDependencies;
pub use traits::*;
