//! `crosspost generate` and `crosspost regenerate`

use anyhow::{Context, Result};
use colored::Colorize;
use crosspost_core::common::{ContentBundle, InputType, Platform, PlatformContent};

use crate::bundle_file;
use crate::client::{GenerateBody, RegenerateBody};
use crate::context::CliContext;

/// Source of the content to adapt
pub struct SourceArgs {
    pub content: String,
    pub is_url: bool,
}

impl SourceArgs {
    fn input_type(&self) -> InputType {
        if self.is_url {
            InputType::Url
        } else {
            InputType::Text
        }
    }
}

/// Key from the flag, the environment, then the store.
pub fn resolve_key(flag: Option<String>, stored: Option<&str>) -> Result<String> {
    flag.or_else(|| std::env::var("GEMINI_API_KEY").ok())
        .filter(|k| !k.trim().is_empty())
        .or_else(|| stored.map(str::to_string))
        .context("No Gemini API key. Run `crosspost key set` or pass --api-key.")
}

pub async fn generate(
    ctx: &CliContext,
    source: &SourceArgs,
    api_key: &str,
    platforms: &[Platform],
) -> Result<()> {
    ctx.print_info(&format!("Generating via {} ...", ctx.client.base_url()));

    let bundle = ctx
        .client
        .generate(&GenerateBody {
            content: &source.content,
            input_type: source.input_type(),
            api_key,
            platforms: platforms.iter().map(|p| p.id().to_string()).collect(),
        })
        .await?;

    print_bundle(&bundle);
    bundle_file::save(&ctx.bundle_path, &bundle)?;
    ctx.print_success(&format!("Saved bundle to {}", ctx.bundle_path.display()));
    Ok(())
}

pub async fn regenerate(
    ctx: &CliContext,
    source: &SourceArgs,
    api_key: &str,
    platform: Platform,
) -> Result<()> {
    let bundle = bundle_file::load(&ctx.bundle_path)?;

    ctx.print_info(&format!("Regenerating {} ...", platform.label()));
    let updated = ctx
        .client
        .regenerate(&RegenerateBody {
            content: &source.content,
            input_type: source.input_type(),
            api_key,
            platform: platform.id(),
            bundle: &bundle,
        })
        .await?;

    if let Some(content) = updated.get(platform) {
        print_platform(platform, content);
    }
    bundle_file::save(&ctx.bundle_path, &updated)?;
    ctx.print_success(&format!("Updated {} in {}", platform.label(), ctx.bundle_path.display()));
    Ok(())
}

pub fn print_bundle(bundle: &ContentBundle) {
    for (platform, content) in bundle.iter() {
        print_platform(platform, content);
    }
}

pub fn print_platform(platform: Platform, content: &PlatformContent) {
    println!();
    println!("{}", format!("── {} ──", platform.label()).bright_cyan().bold());
    match content {
        PlatformContent::Text(text) => {
            println!("{}", text);
            println!("{}", format!("{} characters", text.chars().count()).dimmed());
        }
        PlatformContent::Slides(slides) => {
            for (i, slide) in slides.iter().enumerate() {
                println!("{} {}", format!("[{}]", i + 1).yellow(), slide);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_wins_over_stored_key() {
        let key = resolve_key(Some("AIza-flag".into()), Some("AIza-stored")).unwrap();
        assert_eq!(key, "AIza-flag");
    }

    #[test]
    fn blank_flag_is_ignored() {
        std::env::remove_var("GEMINI_API_KEY");
        let key = resolve_key(Some("  ".into()), Some("AIza-stored")).unwrap();
        assert_eq!(key, "AIza-stored");
    }
}
