//! Generation pipeline activities - entry-point business logic
//!
//! Called from the HTTP handlers. Each step is usable on its own.

pub mod build_prompt;
pub mod dispatch;
pub mod extract_content;
pub mod generate;
pub mod normalize;

pub use build_prompt::build_prompt;
pub use dispatch::{generate_all, generate_one, is_rate_limit_error};
pub use extract_content::{extract_content, html_to_text, MAX_EXTRACTED_CHARS};
pub use generate::{generate_bundle, regenerate_into, regenerate_platform, resolve_targets};
pub use normalize::{normalize, placeholder_slide, split_slides, CAROUSEL_SLIDE_COUNT};
