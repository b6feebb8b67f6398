// Crosspost - API Core
//
// Turns one piece of source content (text or a URL) into platform-specific
// posts with Gemini, and publishes them through per-platform adapters.
//
// Business logic lives per-domain in domains/*/activities/.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
