//! Instagram carousel: upload each slide, group them, publish the group.

use serde_json::json;
use tracing::{debug, info};

use super::{require_id, send_json};
use crate::common::Platform;
use crate::domains::publishing::error::PublishError;
use crate::domains::publishing::models::AccountCredentials;
use crate::kernel::BaseSlideRenderer;

pub struct InstagramClient {
    http: reqwest::Client,
    base_url: String,
    account: AccountCredentials,
}

impl InstagramClient {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>, account: AccountCredentials) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            account,
        }
    }

    fn media_url(&self) -> String {
        format!("{}/{}/media", self.base_url, self.account.user_id)
    }

    /// Slides are uploaded in order. Returns the published media id.
    pub async fn post_carousel(
        &self,
        slides: &[String],
        renderer: &dyn BaseSlideRenderer,
    ) -> Result<String, PublishError> {
        if slides.is_empty() {
            return Err(PublishError::EmptyContent(Platform::Carousel));
        }

        let token = self.account.access_token.expose();
        let mut children = Vec::with_capacity(slides.len());

        for (index, slide) in slides.iter().enumerate() {
            let position = index + 1;
            let image_url = renderer
                .render(position, slide)
                .await
                .map_err(|e| PublishError::Render {
                    position,
                    message: format!("{:#}", e),
                })?;

            let media = send_json(
                Platform::Carousel,
                self.http.post(self.media_url()).json(&json!({
                    "image_url": image_url,
                    "caption": slide,
                    "is_carousel_item": true,
                    "access_token": token,
                })),
            )
            .await?;

            let media_id = require_id(Platform::Carousel, &media, "/id")?;
            debug!(position, media_id = %media_id, "Uploaded carousel slide");
            children.push(media_id);
        }

        let carousel = send_json(
            Platform::Carousel,
            self.http.post(self.media_url()).json(&json!({
                "media_type": "CAROUSEL",
                "children": children,
                "access_token": token,
            })),
        )
        .await?;
        let creation_id = require_id(Platform::Carousel, &carousel, "/id")?;

        let published = send_json(
            Platform::Carousel,
            self.http
                .post(format!("{}/{}/media_publish", self.base_url, self.account.user_id))
                .json(&json!({
                    "creation_id": creation_id,
                    "access_token": token,
                })),
        )
        .await?;
        let id = require_id(Platform::Carousel, &published, "/id")?;

        info!(media_id = %id, slides = slides.len(), "Published Instagram carousel");
        Ok(id)
    }
}
