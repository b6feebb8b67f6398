//! note article publishing.

use chrono::Utc;
use serde_json::json;
use tracing::info;

use super::{id_at, send_json};
use crate::common::{Platform, SecretToken};
use crate::domains::publishing::error::PublishError;

pub struct NoteClient {
    http: reqwest::Client,
    base_url: String,
    api_key: SecretToken,
}

impl NoteClient {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>, api_key: SecretToken) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        }
    }

    /// Publish immediately. Returns the note key/id when the API reports one.
    pub async fn post_article(&self, title: &str, body: &str) -> Result<Option<String>, PublishError> {
        let payload = json!({
            "note": {
                "name": title,
                "body": body,
                "status": "published",
                "publish_at": Utc::now().to_rfc3339(),
            }
        });

        let response = send_json(
            Platform::Article,
            self.http
                .post(format!("{}/notes", self.base_url))
                .bearer_auth(self.api_key.expose())
                .json(&payload),
        )
        .await?;

        let id = id_at(&response, "/data/key")
            .or_else(|| id_at(&response, "/data/id"))
            .or_else(|| id_at(&response, "/id"));

        info!(note_id = ?id, title_chars = title.chars().count(), "Published note article");
        Ok(id)
    }
}
