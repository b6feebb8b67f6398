use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::{Platform, PlatformContent};

/// Rendered standalone page, ready to save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HtmlExport {
    pub filename: String,
    pub html: String,
}

/// What one publish call produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishReceipt {
    pub platform: Platform,

    /// Id assigned by the platform
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html: Option<HtmlExport>,

    pub published_at: DateTime<Utc>,
}

impl PublishReceipt {
    pub fn posted(platform: Platform, post_id: Option<String>) -> Self {
        Self {
            platform,
            post_id,
            html: None,
            published_at: Utc::now(),
        }
    }

    pub fn exported(export: HtmlExport) -> Self {
        Self {
            platform: Platform::StaticPage,
            post_id: None,
            html: Some(export),
            published_at: Utc::now(),
        }
    }
}

/// Finished content for one platform.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishRequest {
    pub platform: Platform,

    /// Article and page title; ignored by the other platforms
    #[serde(default)]
    pub title: Option<String>,

    pub content: PlatformContent,

    /// Caller's session token for the microblog
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
}

/// Per-platform outcome of a batch publish.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishOutcome {
    pub platform: Platform,
    pub success: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt: Option<PublishReceipt>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
