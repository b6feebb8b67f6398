//! Threads text post: create a container, then publish it.

use serde_json::json;
use tracing::{debug, info};

use super::{require_id, send_json};
use crate::common::Platform;
use crate::domains::publishing::error::PublishError;
use crate::domains::publishing::models::AccountCredentials;

pub struct ThreadsClient {
    http: reqwest::Client,
    base_url: String,
    account: AccountCredentials,
}

impl ThreadsClient {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>, account: AccountCredentials) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            account,
        }
    }

    /// Returns the id of the published thread.
    pub async fn post_text(&self, text: &str) -> Result<String, PublishError> {
        let user = &self.account.user_id;
        let token = self.account.access_token.expose();

        let container = send_json(
            Platform::Thread,
            self.http
                .post(format!("{}/{}/threads", self.base_url, user))
                .json(&json!({
                    "media_type": "TEXT",
                    "text": text,
                    "access_token": token,
                })),
        )
        .await?;
        let creation_id = require_id(Platform::Thread, &container, "/id")?;
        debug!(creation_id = %creation_id, "Created Threads container");

        let published = send_json(
            Platform::Thread,
            self.http
                .post(format!("{}/{}/threads_publish", self.base_url, user))
                .json(&json!({
                    "creation_id": creation_id,
                    "access_token": token,
                })),
        )
        .await?;
        let id = require_id(Platform::Thread, &published, "/id")?;

        info!(thread_id = %id, "Published Threads post");
        Ok(id)
    }
}
