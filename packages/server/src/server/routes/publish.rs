use axum::{extract::rejection::JsonRejection, extract::Extension, Json};
use serde::Deserialize;

use super::{bad_request, ok, publish_failure, rejected, ApiResult};
use crate::common::{Platform, PlatformContent};
use crate::domains::publishing::activities::{publish, publish_many};
use crate::domains::publishing::{PublishOutcome, PublishReceipt, PublishRequest};
use crate::server::app::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostRequest {
    #[serde(default)]
    pub platform: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<PlatformContent>,
    #[serde(default)]
    pub access_token: Option<String>,
}

impl PostRequest {
    fn into_publish_request(self) -> Result<PublishRequest, String> {
        let platform = self
            .platform
            .parse::<Platform>()
            .map_err(|e| e.to_string())?;
        let content = self
            .content
            .ok_or_else(|| format!("Content is required for {}", platform))?;

        Ok(PublishRequest {
            platform,
            title: self.title,
            content,
            access_token: self.access_token,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct BatchPublishRequest {
    #[serde(default)]
    pub posts: Vec<PostRequest>,
}

/// POST /api/post
pub async fn post_handler(
    Extension(state): Extension<AppState>,
    payload: Result<Json<PostRequest>, JsonRejection>,
) -> ApiResult<PublishReceipt> {
    let Json(request) = match payload {
        Ok(json) => json,
        Err(rejection) => return rejected(rejection),
    };

    let request = match request.into_publish_request() {
        Ok(request) => request,
        Err(message) => return bad_request(message),
    };

    match publish(&request, &state.deps).await {
        Ok(receipt) => ok(receipt),
        Err(e) => publish_failure(e),
    }
}

/// POST /api/publish - every listed platform at once, one outcome each
pub async fn publish_batch_handler(
    Extension(state): Extension<AppState>,
    payload: Result<Json<BatchPublishRequest>, JsonRejection>,
) -> ApiResult<Vec<PublishOutcome>> {
    let Json(batch) = match payload {
        Ok(json) => json,
        Err(rejection) => return rejected(rejection),
    };

    if batch.posts.is_empty() {
        return bad_request("Select at least one platform to publish");
    }

    let requests: Result<Vec<PublishRequest>, String> = batch
        .posts
        .into_iter()
        .map(PostRequest::into_publish_request)
        .collect();
    let requests = match requests {
        Ok(requests) => requests,
        Err(message) => return bad_request(message),
    };

    ok(publish_many(&requests, &state.deps).await)
}
