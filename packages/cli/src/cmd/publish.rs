//! `crosspost publish` and `crosspost export-html`

use anyhow::{Context, Result};
use chrono::Local;
use colored::Colorize;
use crosspost_core::common::{ContentBundle, Platform};
use crosspost_core::domains::publishing::adapters::render_page;
use crosspost_core::domains::publishing::models::HtmlExport;
use std::fs;
use std::path::Path;

use crate::bundle_file;
use crate::client::PostBody;
use crate::context::CliContext;

/// One post per selected platform present in the bundle. Empty selection means all.
pub fn posts_from_bundle(
    bundle: &ContentBundle,
    platforms: &[Platform],
    title: Option<&str>,
    access_token: Option<&str>,
) -> Vec<PostBody> {
    let selected: Vec<Platform> = if platforms.is_empty() {
        bundle.platforms().collect()
    } else {
        platforms.to_vec()
    };

    selected
        .into_iter()
        .filter_map(|platform| {
            let content = bundle.get(platform)?.clone();
            Some(PostBody {
                platform: platform.id().to_string(),
                title: title.map(str::to_string),
                content,
                access_token: match platform {
                    Platform::Microblog => access_token.map(str::to_string),
                    _ => None,
                },
            })
        })
        .collect()
}

fn write_export(export: &HtmlExport, out_dir: &Path) -> Result<()> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create {}", out_dir.display()))?;
    let path = out_dir.join(&export.filename);
    fs::write(&path, &export.html).with_context(|| format!("Failed to write {}", path.display()))?;
    println!("  {} {}", "saved".dimmed(), path.display());
    Ok(())
}

pub async fn publish(
    ctx: &CliContext,
    platforms: &[Platform],
    title: Option<&str>,
    access_token: Option<&str>,
    out_dir: &Path,
) -> Result<()> {
    let bundle = bundle_file::load_existing(&ctx.bundle_path)?;
    let posts = posts_from_bundle(&bundle, platforms, title, access_token);

    if posts.is_empty() {
        anyhow::bail!("Nothing to publish; the bundle has none of the selected platforms");
    }

    let names: Vec<&str> = posts.iter().map(|p| p.platform.as_str()).collect();
    if !ctx.confirm(&format!("Publish to {}?", names.join(", ")), true)? {
        return Ok(());
    }

    ctx.print_header("Publishing");
    let outcomes = ctx.client.publish_many(&posts).await?;

    let mut failures = 0;
    for outcome in &outcomes {
        let label = outcome.platform.label();
        match (&outcome.receipt, &outcome.error) {
            (Some(receipt), _) if outcome.success => {
                let detail = receipt.post_id.as_deref().unwrap_or("published");
                println!("{} {} {}", "✓".green(), label.bold(), detail.dimmed());
                if let Some(export) = &receipt.html {
                    write_export(export, out_dir)?;
                }
            }
            (_, error) => {
                failures += 1;
                println!(
                    "{} {} {}",
                    "✗".red(),
                    label.bold(),
                    error.as_deref().unwrap_or("failed").red()
                );
            }
        }
    }

    if failures > 0 {
        ctx.print_warning(&format!("{} of {} platforms failed", failures, outcomes.len()));
    } else {
        ctx.print_success("All platforms published");
    }
    Ok(())
}

/// Render the bundle's page locally; no server needed.
pub fn export_html(ctx: &CliContext, title: &str, out_dir: &Path) -> Result<()> {
    let bundle = bundle_file::load_existing(&ctx.bundle_path)?;

    let content = bundle
        .get(Platform::StaticPage)
        .or_else(|| bundle.get(Platform::Article))
        .context("The bundle has no html or note content to export")?;

    let export = render_page(title, &content.to_plain_text(), Local::now().date_naive());
    write_export(&export, out_dir)?;
    ctx.print_success("Exported HTML page");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crosspost_core::common::PlatformContent;

    fn bundle() -> ContentBundle {
        [
            (Platform::Microblog, PlatformContent::Text("tweet".into())),
            (Platform::Article, PlatformContent::Text("article".into())),
            (
                Platform::Carousel,
                PlatformContent::Slides(vec!["one".into()]),
            ),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn empty_selection_publishes_everything_in_the_bundle() {
        let posts = posts_from_bundle(&bundle(), &[], Some("Title"), None);
        let ids: Vec<&str> = posts.iter().map(|p| p.platform.as_str()).collect();
        assert_eq!(ids, vec!["x", "instagram", "note"]);
    }

    #[test]
    fn platforms_missing_from_the_bundle_are_skipped() {
        let posts = posts_from_bundle(&bundle(), &[Platform::Thread, Platform::Article], None, None);
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].platform, "note");
    }

    #[test]
    fn session_token_only_goes_to_the_microblog() {
        let posts = posts_from_bundle(&bundle(), &[], None, Some("token"));
        for post in posts {
            let expected = (post.platform == "x").then_some("token");
            assert_eq!(post.access_token.as_deref(), expected);
        }
    }
}
