//! Dispatch finished content to the matching adapter.

use chrono::Local;
use futures::future::join_all;
use tracing::{info, warn};

use crate::common::{Platform, PlatformContent, SecretToken};
use crate::domains::generation::activities::normalize::SLIDE_DELIMITER;
use crate::domains::publishing::adapters::{
    render_page, InstagramClient, NoteClient, ThreadsClient, TwitterClient,
};
use crate::domains::publishing::error::PublishError;
use crate::domains::publishing::models::{PublishOutcome, PublishReceipt, PublishRequest};
use crate::kernel::ServerDeps;

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn require_title(request: &PublishRequest) -> Result<&str, PublishError> {
    non_blank(request.title.as_deref()).ok_or(PublishError::MissingTitle(request.platform))
}

fn require_text(request: &PublishRequest) -> Result<String, PublishError> {
    let text = request.content.to_plain_text();
    if text.trim().is_empty() {
        return Err(PublishError::EmptyContent(request.platform));
    }
    Ok(text)
}

/// Non-empty slides; plain text is split on the carousel delimiter.
fn slides_of(request: &PublishRequest) -> Vec<String> {
    let raw: Vec<String> = match &request.content {
        PlatformContent::Slides(slides) => slides.clone(),
        PlatformContent::Text(text) => text.split(SLIDE_DELIMITER).map(str::to_string).collect(),
    };
    raw.into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Publish one platform's content.
pub async fn publish(request: &PublishRequest, deps: &ServerDeps) -> Result<PublishReceipt, PublishError> {
    let settings = &deps.publishing;
    let platform = request.platform;

    info!(platform = %platform, "Publishing content");

    match platform {
        Platform::Microblog => {
            let token = non_blank(request.access_token.as_deref())
                .map(SecretToken::new)
                .or_else(|| settings.twitter_access_token.clone())
                .ok_or(PublishError::MissingCredentials {
                    platform,
                    variables: "TWITTER_ACCESS_TOKEN or a signed-in session",
                })?;
            let text = require_text(request)?;

            let id = TwitterClient::new(deps.http_client.clone(), &settings.endpoints.twitter, token)
                .post_tweet(&text)
                .await?;
            Ok(PublishReceipt::posted(platform, Some(id)))
        }

        Platform::Article => {
            let api_key = settings
                .note_api_key
                .clone()
                .ok_or(PublishError::MissingCredentials {
                    platform,
                    variables: "NOTE_API_KEY",
                })?;
            let title = require_title(request)?;
            let body = require_text(request)?;

            let id = NoteClient::new(deps.http_client.clone(), &settings.endpoints.note, api_key)
                .post_article(title, &body)
                .await?;
            Ok(PublishReceipt::posted(platform, id))
        }

        Platform::Thread => {
            let account = settings
                .threads
                .clone()
                .ok_or(PublishError::MissingCredentials {
                    platform,
                    variables: "THREADS_ACCESS_TOKEN and THREADS_USER_ID",
                })?;
            let text = require_text(request)?;

            let id = ThreadsClient::new(deps.http_client.clone(), &settings.endpoints.threads, account)
                .post_text(&text)
                .await?;
            Ok(PublishReceipt::posted(platform, Some(id)))
        }

        Platform::Carousel => {
            let account = settings
                .instagram
                .clone()
                .ok_or(PublishError::MissingCredentials {
                    platform,
                    variables: "INSTAGRAM_ACCESS_TOKEN and INSTAGRAM_USER_ID",
                })?;
            let slides = slides_of(request);

            let id = InstagramClient::new(
                deps.http_client.clone(),
                &settings.endpoints.instagram,
                account,
            )
            .post_carousel(&slides, deps.slide_renderer.as_ref())
            .await?;
            Ok(PublishReceipt::posted(platform, Some(id)))
        }

        Platform::StaticPage => {
            let title = require_title(request)?;
            let body = require_text(request)?;
            let export = render_page(title, &body, Local::now().date_naive());

            info!(filename = %export.filename, bytes = export.html.len(), "Rendered HTML page");
            Ok(PublishReceipt::exported(export))
        }
    }
}

/// Publish several platforms concurrently. One platform failing never blocks another.
pub async fn publish_many(requests: &[PublishRequest], deps: &ServerDeps) -> Vec<PublishOutcome> {
    let calls = requests.iter().map(|request| async move {
        match publish(request, deps).await {
            Ok(receipt) => PublishOutcome {
                platform: request.platform,
                success: true,
                receipt: Some(receipt),
                error: None,
            },
            Err(e) => {
                warn!(platform = %request.platform, error = %e, "Publish failed");
                PublishOutcome {
                    platform: request.platform,
                    success: false,
                    receipt: None,
                    error: Some(e.to_string()),
                }
            }
        }
    });

    join_all(calls).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::TestDependencies;

    fn request(platform: Platform, content: PlatformContent) -> PublishRequest {
        PublishRequest {
            platform,
            title: Some("Weekly notes".into()),
            content,
            access_token: None,
        }
    }

    #[tokio::test]
    async fn unconfigured_platforms_report_missing_credentials() {
        let deps = TestDependencies::new().into_server_deps();

        for platform in [Platform::Microblog, Platform::Article, Platform::Thread, Platform::Carousel] {
            let err = publish(&request(platform, PlatformContent::Text("hi".into())), &deps)
                .await
                .unwrap_err();
            assert!(
                matches!(err, PublishError::MissingCredentials { platform: p, .. } if p == platform),
                "{platform}: {err}"
            );
            assert!(err.is_client_error());
        }
    }

    #[tokio::test]
    async fn html_export_needs_no_credentials() {
        let deps = TestDependencies::new().into_server_deps();

        let receipt = publish(
            &request(Platform::StaticPage, PlatformContent::Text("## Hello\nworld".into())),
            &deps,
        )
        .await
        .unwrap();

        let export = receipt.html.unwrap();
        assert_eq!(export.filename, "Weekly_notes.html");
        assert!(export.html.contains("<h2>Hello</h2>"));
    }

    #[tokio::test]
    async fn html_export_requires_title() {
        let deps = TestDependencies::new().into_server_deps();
        let mut req = request(Platform::StaticPage, PlatformContent::Text("body".into()));
        req.title = Some("   ".into());

        let err = publish(&req, &deps).await.unwrap_err();
        assert!(matches!(err, PublishError::MissingTitle(Platform::StaticPage)));
    }

    #[tokio::test]
    async fn batch_reports_each_platform_independently() {
        let deps = TestDependencies::new().into_server_deps();
        let requests = vec![
            request(Platform::Article, PlatformContent::Text("article".into())),
            request(Platform::StaticPage, PlatformContent::Text("page".into())),
        ];

        let outcomes = publish_many(&requests, &deps).await;

        assert_eq!(outcomes.len(), 2);
        assert!(!outcomes[0].success);
        assert!(outcomes[0].error.as_deref().unwrap().contains("NOTE_API_KEY"));
        assert!(outcomes[1].success);
        assert!(outcomes[1].receipt.as_ref().unwrap().html.is_some());
    }

    #[test]
    fn slides_come_from_either_shape() {
        let from_text = request(Platform::Carousel, PlatformContent::Text("a\n---\n\n---\nb".into()));
        assert_eq!(slides_of(&from_text), vec!["a", "b"]);

        let from_slides = request(
            Platform::Carousel,
            PlatformContent::Slides(vec!["x".into(), " ".into(), "y".into()]),
        );
        assert_eq!(slides_of(&from_slides), vec!["x", "y"]);
    }
}
