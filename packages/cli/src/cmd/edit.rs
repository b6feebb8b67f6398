//! `crosspost edit`: change one platform's text (or one slide) in the local bundle

use anyhow::{Context, Result};
use crosspost_core::common::{Platform, PlatformContent};

use crate::bundle_file;
use crate::context::CliContext;

pub fn edit(ctx: &CliContext, platform: Platform, slide: Option<usize>, text: String) -> Result<()> {
    let mut bundle = bundle_file::load_existing(&ctx.bundle_path)?;

    match slide {
        Some(position) => {
            let index = position.checked_sub(1).context("Slides are numbered from 1")?;
            bundle.set_slide(platform, index, text)?;
            ctx.print_success(&format!("Updated slide {} of {}", position, platform.label()));
        }
        None => {
            bundle.replace(platform, PlatformContent::Text(text));
            ctx.print_success(&format!("Updated {}", platform.label()));
        }
    }

    bundle_file::save(&ctx.bundle_path, &bundle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn context_with_deck(dir: &TempDir) -> CliContext {
        let ctx = CliContext::new(dir.path().join(bundle_file::DEFAULT_BUNDLE_FILE), true);
        let bundle: crosspost_core::common::ContentBundle = [
            (
                Platform::Carousel,
                PlatformContent::Slides((1..=10).map(|i| format!("slide {}", i)).collect()),
            ),
            (Platform::Microblog, PlatformContent::Text("tweet".into())),
        ]
        .into_iter()
        .collect();
        bundle_file::save(&ctx.bundle_path, &bundle).unwrap();
        ctx
    }

    fn carousel(ctx: &CliContext) -> Vec<String> {
        bundle_file::load_existing(&ctx.bundle_path)
            .unwrap()
            .get(Platform::Carousel)
            .and_then(|c| c.as_slides())
            .map(|s| s.to_vec())
            .unwrap()
    }

    #[test]
    fn whole_carousel_edit_keeps_ten_slides() {
        let dir = TempDir::new().unwrap();
        let ctx = context_with_deck(&dir);

        edit(&ctx, Platform::Carousel, None, "one blob".into()).unwrap();

        let slides = carousel(&ctx);
        assert_eq!(slides.len(), 10);
        assert_eq!(slides[0], "one blob");
        assert_eq!(slides[1], "Slide 2: add content for this slide.");
    }

    #[test]
    fn single_slide_edit_is_one_based() {
        let dir = TempDir::new().unwrap();
        let ctx = context_with_deck(&dir);

        edit(&ctx, Platform::Carousel, Some(3), "third".into()).unwrap();
        assert!(edit(&ctx, Platform::Carousel, Some(0), "zero".into()).is_err());
        assert!(edit(&ctx, Platform::Carousel, Some(11), "eleven".into()).is_err());

        let slides = carousel(&ctx);
        assert_eq!(slides.len(), 10);
        assert_eq!(slides[2], "third");
        assert_eq!(slides[3], "slide 4");
    }
}
