//! Shared test data.

use std::time::Duration;

use crosspost_core::common::RetryPolicy;
use crosspost_core::kernel::test_dependencies::MockTextGenerator;

/// Passes format validation.
pub const VALID_KEY: &str = "AIzaSyA1234567890abcdefghijklmnopqrs";

pub const SOURCE_TEXT: &str = "Our town library now lends tools: drills, ladders and sewing \
machines. Membership is free and 1,200 residents signed up in the first month.";

/// Prompt markers, one per platform template.
pub const MICROBLOG_MARKER: &str = "X (Twitter) post";
pub const CAROUSEL_MARKER: &str = "Instagram carousel";
pub const ARTICLE_MARKER: &str = "note article";
pub const THREAD_MARKER: &str = "Threads post";
pub const PAGE_MARKER: &str = "standalone web page";

/// Same attempts as production, without the wait.
pub fn fast_retry() -> RetryPolicy {
    RetryPolicy::new(3, Duration::from_millis(1))
}

/// Distinct, recognizable output for every platform.
pub fn scripted_generator() -> MockTextGenerator {
    let slides = (1..=12)
        .map(|n| format!("Slide body {}", n))
        .collect::<Vec<_>>()
        .join("\n---\n");

    MockTextGenerator::new()
        .with_response_for(MICROBLOG_MARKER, "Tools at the library! #community")
        .with_response_for(CAROUSEL_MARKER, slides)
        .with_response_for(ARTICLE_MARKER, "# Borrow a drill\n\nThe library changed.")
        .with_response_for(THREAD_MARKER, "Would you borrow a ladder from the library?")
        .with_response_for(PAGE_MARKER, "## Why it matters\n\n- Free membership")
}
