//! Turn user input into plain text for the prompt templates.

use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, warn};

use crate::common::{InputType, SourceContent};
use crate::domains::generation::error::PipelineError;
use crate::kernel::BasePageFetcher;

/// Extracted page text is capped at this many characters.
pub const MAX_EXTRACTED_CHARS: usize = 3000;

lazy_static! {
    static ref SCRIPT_BLOCK: Regex = Regex::new(r"(?is)<script[^>]*>.*?</script>").unwrap();
    static ref STYLE_BLOCK: Regex = Regex::new(r"(?is)<style[^>]*>.*?</style>").unwrap();
    static ref ANY_TAG: Regex = Regex::new(r"<[^>]*>").unwrap();
    static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();
}

/// Text passes through trimmed; a URL is fetched once (no retries) and reduced to text.
pub async fn extract_content(
    source: &SourceContent,
    fetcher: &dyn BasePageFetcher,
) -> Result<String, PipelineError> {
    let input = source.content.trim();
    if input.is_empty() {
        return Err(PipelineError::EmptyInput);
    }

    match source.input_type {
        InputType::Text => Ok(input.to_string()),
        InputType::Url => {
            let html = fetcher.fetch(input).await.map_err(|e| {
                warn!(url = %input, error = %e, "Failed to fetch source URL");
                PipelineError::Fetch(format!("{:#}", e))
            })?;

            let text = html_to_text(&html);
            debug!(
                url = %input,
                html_len = html.len(),
                text_chars = text.chars().count(),
                "Extracted text from URL"
            );

            if text.is_empty() {
                return Err(PipelineError::Fetch(format!("{} has no readable text", input)));
            }
            Ok(text)
        }
    }
}

/// Drop scripts, styles and tags; collapse whitespace; cap the length.
pub fn html_to_text(html: &str) -> String {
    let text = SCRIPT_BLOCK.replace_all(html, "");
    let text = STYLE_BLOCK.replace_all(&text, "");
    let text = ANY_TAG.replace_all(&text, "");
    let text = WHITESPACE_RUN.replace_all(&text, " ");
    truncate_chars(text.trim(), MAX_EXTRACTED_CHARS)
}

/// Character-based cut (never splits a multi-byte character), with `...` when cut.
fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}...", &text[..byte_idx]),
        None => text.to_string(),
    }
}
