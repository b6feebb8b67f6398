//! Post-processing of raw model output.

use crate::common::{fit_slides, Platform, PlatformContent};

pub use crate::common::{placeholder_slide, CAROUSEL_SLIDE_COUNT, SLIDE_DELIMITER};

/// Carousel output becomes exactly ten slides; everything else is kept as-is.
pub fn normalize(platform: Platform, raw: String) -> PlatformContent {
    match platform {
        Platform::Carousel => PlatformContent::Slides(split_slides(&raw)),
        Platform::Microblog | Platform::Article | Platform::Thread | Platform::StaticPage => {
            PlatformContent::Text(raw)
        }
    }
}

/// Split on the delimiter, drop empty segments, keep the first ten, then pad.
pub fn split_slides(raw: &str) -> Vec<String> {
    fit_slides(raw.split(SLIDE_DELIMITER))
}
