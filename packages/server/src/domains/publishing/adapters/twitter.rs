//! X (Twitter) v2 tweet creation.

use serde_json::json;
use tracing::info;

use super::{require_id, send_json};
use crate::common::{Platform, SecretToken};
use crate::domains::publishing::error::PublishError;

pub struct TwitterClient {
    http: reqwest::Client,
    base_url: String,
    access_token: SecretToken,
}

impl TwitterClient {
    /// `access_token` is an OAuth 2.0 user-context bearer token.
    pub fn new(http: reqwest::Client, base_url: impl Into<String>, access_token: SecretToken) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            access_token,
        }
    }

    /// Returns the tweet id.
    pub async fn post_tweet(&self, text: &str) -> Result<String, PublishError> {
        let response = send_json(
            Platform::Microblog,
            self.http
                .post(format!("{}/2/tweets", self.base_url))
                .bearer_auth(self.access_token.expose())
                .json(&json!({ "text": text })),
        )
        .await?;

        let id = require_id(Platform::Microblog, &response, "/data/id")?;
        info!(tweet_id = %id, "Published tweet");
        Ok(id)
    }
}
