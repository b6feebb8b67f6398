//! Shared domain types: platforms, source content and the generated bundle.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// =============================================================================
// Platform
// =============================================================================

/// Publishing target. The wire id is what clients send and what keys the bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Platform {
    /// Short-form microblog (X)
    #[serde(rename = "x")]
    Microblog,
    /// Ten-slide image carousel (Instagram)
    #[serde(rename = "instagram")]
    Carousel,
    /// Long-form article (note)
    #[serde(rename = "note")]
    Article,
    /// Threaded text post (Threads)
    #[serde(rename = "threads")]
    Thread,
    /// Standalone HTML page
    #[serde(rename = "html")]
    StaticPage,
}

impl Platform {
    pub const ALL: [Platform; 5] = [
        Platform::Microblog,
        Platform::Carousel,
        Platform::Article,
        Platform::Thread,
        Platform::StaticPage,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Platform::Microblog => "x",
            Platform::Carousel => "instagram",
            Platform::Article => "note",
            Platform::Thread => "threads",
            Platform::StaticPage => "html",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Platform::Microblog => "X",
            Platform::Carousel => "Instagram",
            Platform::Article => "note",
            Platform::Thread => "Threads",
            Platform::StaticPage => "HTML",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported platform: {0}")]
pub struct UnknownPlatform(pub String);

impl FromStr for Platform {
    type Err = UnknownPlatform;

    /// Accepts wire ids plus `twitter` as an alias for the microblog.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "x" | "twitter" => Ok(Platform::Microblog),
            "instagram" => Ok(Platform::Carousel),
            "note" => Ok(Platform::Article),
            "threads" => Ok(Platform::Thread),
            "html" => Ok(Platform::StaticPage),
            _ => Err(UnknownPlatform(s.to_string())),
        }
    }
}

// =============================================================================
// Source content
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputType {
    Url,
    Text,
}

/// What the user handed us: raw text, or a URL to extract text from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceContent {
    pub content: String,
    pub input_type: InputType,
}

impl SourceContent {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            input_type: InputType::Text,
        }
    }

    pub fn url(url: impl Into<String>) -> Self {
        Self {
            content: url.into(),
            input_type: InputType::Url,
        }
    }

    pub fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
    }
}

// =============================================================================
// Generated content
// =============================================================================

/// Normalized output for one platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PlatformContent {
    Slides(Vec<String>),
    Text(String),
}

impl PlatformContent {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            PlatformContent::Text(text) => Some(text),
            PlatformContent::Slides(_) => None,
        }
    }

    pub fn as_slides(&self) -> Option<&[String]> {
        match self {
            PlatformContent::Slides(slides) => Some(slides),
            PlatformContent::Text(_) => None,
        }
    }

    /// Flatten to a single string; slides are joined with the carousel delimiter.
    pub fn to_plain_text(&self) -> String {
        match self {
            PlatformContent::Text(text) => text.clone(),
            PlatformContent::Slides(slides) => slides.join("\n---\n"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BundleEditError {
    #[error("no content for {0}")]
    Missing(Platform),

    #[error("{0} content is not a slide deck")]
    NotSlides(Platform),

    #[error("slide {index} out of range (deck has {len})")]
    SlideOutOfRange { index: usize, len: usize },
}

pub const CAROUSEL_SLIDE_COUNT: usize = 10;
pub const SLIDE_DELIMITER: &str = "---";

/// Filler for a missing slide at `position` (1-based).
pub fn placeholder_slide(position: usize) -> String {
    format!("Slide {}: add content for this slide.", position)
}

/// Trim, drop empty slides, keep the first ten, then pad with placeholders.
pub fn fit_slides<I, S>(slides: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut deck: Vec<String> = slides
        .into_iter()
        .filter_map(|s| {
            let s = s.as_ref().trim();
            (!s.is_empty()).then(|| s.to_string())
        })
        .take(CAROUSEL_SLIDE_COUNT)
        .collect();

    while deck.len() < CAROUSEL_SLIDE_COUNT {
        deck.push(placeholder_slide(deck.len() + 1));
    }

    deck
}

/// Carousel entries are always a full deck; text is re-segmented on the delimiter.
fn conform(platform: Platform, content: PlatformContent) -> PlatformContent {
    match (platform, content) {
        (Platform::Carousel, PlatformContent::Text(text)) => {
            PlatformContent::Slides(fit_slides(text.split(SLIDE_DELIMITER)))
        }
        (Platform::Carousel, PlatformContent::Slides(slides)) => {
            PlatformContent::Slides(fit_slides(slides))
        }
        (_, content) => content,
    }
}

/// Editable result of one generation cycle, keyed by platform.
///
/// Every write path, deserialization included, keeps the carousel at exactly
/// ten non-empty slides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<Platform, PlatformContent>",
    into = "BTreeMap<Platform, PlatformContent>"
)]
pub struct ContentBundle {
    entries: BTreeMap<Platform, PlatformContent>,
}

impl ContentBundle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, platform: Platform) -> Option<&PlatformContent> {
        self.entries.get(&platform)
    }

    pub fn contains(&self, platform: Platform) -> bool {
        self.entries.contains_key(&platform)
    }

    /// Replace one entry, leaving the others untouched. Returns the previous value.
    pub fn replace(
        &mut self,
        platform: Platform,
        content: PlatformContent,
    ) -> Option<PlatformContent> {
        self.entries.insert(platform, conform(platform, content))
    }

    /// Manual edit of a single carousel slide (0-based index).
    pub fn set_slide(
        &mut self,
        platform: Platform,
        index: usize,
        text: impl Into<String>,
    ) -> Result<(), BundleEditError> {
        let entry = self
            .entries
            .get_mut(&platform)
            .ok_or(BundleEditError::Missing(platform))?;

        let PlatformContent::Slides(slides) = entry else {
            return Err(BundleEditError::NotSlides(platform));
        };

        let len = slides.len();
        let slot = slides
            .get_mut(index)
            .ok_or(BundleEditError::SlideOutOfRange { index, len })?;
        let text = text.into();
        *slot = if text.trim().is_empty() {
            placeholder_slide(index + 1)
        } else {
            text.trim().to_string()
        };
        Ok(())
    }

    pub fn platforms(&self) -> impl Iterator<Item = Platform> + '_ {
        self.entries.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Platform, &PlatformContent)> {
        self.entries.iter().map(|(p, c)| (*p, c))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(Platform, PlatformContent)> for ContentBundle {
    fn from_iter<I: IntoIterator<Item = (Platform, PlatformContent)>>(iter: I) -> Self {
        let mut bundle = Self::new();
        for (platform, content) in iter {
            bundle.replace(platform, content);
        }
        bundle
    }
}

impl From<BTreeMap<Platform, PlatformContent>> for ContentBundle {
    fn from(entries: BTreeMap<Platform, PlatformContent>) -> Self {
        entries.into_iter().collect()
    }
}

impl From<ContentBundle> for BTreeMap<Platform, PlatformContent> {
    fn from(bundle: ContentBundle) -> Self {
        bundle.entries
    }
}
