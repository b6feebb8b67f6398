//! Platform prompt templates.
//!
//! Templates describe structure and limits; the model is asked, not forced, to follow them.
//! The normalizer is what actually guarantees the carousel shape.

use crate::common::Platform;
use crate::domains::generation::models::PersonaProfile;

pub const MICROBLOG_CHAR_LIMIT: usize = 280;
pub const THREAD_CHAR_LIMIT: usize = 500;

/// Appended to every image prompt so the images come back consistent.
const IMAGE_PROMPT_SUFFIX: &str = "16:9 aspect ratio, white background, empty 50px square in \
the bottom-right corner, high quality, made for social media, number-focused design";

/// Shared sub-specification for platforms that ship with generated images.
fn image_prompt_rules(count: &str) -> String {
    format!(
        "[Image prompts]\n\
         Write {count} image prompt(s) that fit the post. When the source has numbers or data, \
         design for an instant first impression.\n\
         - Number them \"[Image 1]\", \"[Image 2]\", ...\n\
         - Landscape 16:9 aspect ratio\n\
         - Background must be plain white (#FFFFFF)\n\
         - Put a short, clear title across the top\n\
         - Show any figures, percentages or amounts large and centered (30-40% of the frame), \
         with a simple bar, pie or arrow chart and before/after comparisons where relevant\n\
         - Leave a blank 50px square in the bottom-right corner with nothing in it\n\
         - Any person shown must be specified as Japanese\n\
         - Be concrete: composition, colors, style, mood and the exact numbers to show\n\
         - Keep it realistic for an image model\n\
         - End every image prompt with: \"{IMAGE_PROMPT_SUFFIX}\""
    )
}

/// Build the full prompt for one platform. Pure; the source is embedded verbatim.
pub fn build_prompt(platform: Platform, content: &str, persona: &PersonaProfile) -> String {
    let persona_block = persona.render_block();

    match platform {
        Platform::Microblog => format!(
            "Task: write one X (Twitter) post in Japanese, plus one image prompt.\n\n\
             {persona_block}\n\n\
             [Requirements]\n\
             - At most {MICROBLOG_CHAR_LIMIT} characters for the post text (strict)\n\
             - Plain words a middle-school student understands\n\
             - Talk with the reader and include a natural emotional reaction\n\
             - Use line breaks for readability\n\
             - Add 3-5 trending hashtags and weave in searchable keywords\n\n\
             [Structure]\n\
             1. Hook (empathy, a question or a surprise)\n\
             2. Core content, explained simply\n\
             3. Reflection or takeaway\n\
             4. Call to action and hashtags\n\n\
             {images}\n\n\
             [Source content]\n\
             {content}\n\n\
             X post with image prompt:",
            images = image_prompt_rules("1"),
        ),

        Platform::Carousel => format!(
            "Task: write a 10-slide Instagram carousel in Japanese.\n\n\
             {persona_block}\n\n\
             [Requirements]\n\
             - Exactly 10 slides, 80-120 characters each\n\
             - Plain words a middle-school student understands\n\
             - Speak to the reader with empathy\n\
             - 2-3 relevant emojis per slide\n\
             - Generous line breaks; tell it as a story that ends on a memorable note\n\n\
             [Slide structure]\n\
             Slide 1: a striking title and hook\n\
             Slides 2-8: the content, step by step\n\
             Slide 9: reflection and what we learned\n\
             Slide 10: call to action, message and hashtags\n\n\
             [Source content]\n\
             {content}\n\n\
             Instagram carousel (separate every slide with a line containing only \"---\"):"
        ),

        Platform::Article => format!(
            "Task: write an SEO-friendly note article in Japanese Markdown, with image prompts.\n\n\
             {persona_block}\n\n\
             [Requirements]\n\
             - Well-structured Markdown: headings, bullet lists, quotes, bold\n\
             - Polite, plain Japanese a middle-school student understands\n\
             - Relatable, story-like narration that speaks to the reader\n\
             - 2000-2500 characters\n\
             - Place related keywords naturally and answer the search intent\n\
             - Finish with a message and call to action for the reader\n\n\
             [Article structure]\n\
             1. An attractive title (H1)\n\
             2. Introduction that empathizes with the reader's problem\n\
             3. Body in several H2 sections with examples, answering likely questions, \
             with an image placed in each section\n\
             4. Summary of what was learned\n\
             5. Closing thanks and message\n\n\
             {images}\n\n\
             [Source content]\n\
             {content}\n\n\
             note article with image prompts:",
            images = image_prompt_rules("3-5"),
        ),

        Platform::Thread => format!(
            "Task: write one Threads post in Japanese.\n\n\
             {persona_block}\n\n\
             [Requirements]\n\
             - At most {THREAD_CHAR_LIMIT} characters (strict)\n\
             - Conversational; end with a question that invites replies\n\
             - Short paragraphs separated by blank lines\n\
             - At most 2 hashtags\n\n\
             [Structure]\n\
             1. Hook\n\
             2. Core content in two or three short paragraphs\n\
             3. Personal reflection\n\
             4. Question or call to action\n\n\
             [Source content]\n\
             {content}\n\n\
             Threads post:"
        ),

        Platform::StaticPage => format!(
            "Task: write the body of a standalone web page in Japanese.\n\n\
             {persona_block}\n\n\
             [Requirements]\n\
             - Plain text lines only; no HTML\n\
             - Section headings start with \"## \", sub-headings with \"### \"\n\
             - Bullet points start with \"- \"\n\
             - Separate paragraphs with a blank line\n\
             - 1200-1800 characters\n\n\
             [Structure]\n\
             1. Opening paragraph that states why this matters\n\
             2. Three to five \"## \" sections covering the content\n\
             3. A closing \"## \" section with the key takeaways as bullets\n\n\
             [Source content]\n\
             {content}\n\n\
             Page body:"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOURCE: &str = "Remote work adoption rose 35% in 2024.\n\nSecond paragraph with {braces}.";

    #[test]
    fn every_template_embeds_source_and_persona_verbatim() {
        let persona = PersonaProfile::default();
        for platform in Platform::ALL {
            let prompt = build_prompt(platform, SOURCE, &persona);
            assert!(prompt.contains(SOURCE), "{platform} prompt lost the source");
            assert!(
                prompt.contains(&persona.render_block()),
                "{platform} prompt lost the persona"
            );
        }
    }

    #[test]
    fn templates_are_distinct() {
        let persona = PersonaProfile::default();
        let prompts: Vec<String> = Platform::ALL
            .iter()
            .map(|p| build_prompt(*p, SOURCE, &persona))
            .collect();

        for (i, a) in prompts.iter().enumerate() {
            for b in prompts.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn microblog_and_thread_state_character_ceilings() {
        let persona = PersonaProfile::default();
        assert!(build_prompt(Platform::Microblog, SOURCE, &persona).contains("At most 280 characters"));
        assert!(build_prompt(Platform::Thread, SOURCE, &persona).contains("At most 500 characters"));
    }

    #[test]
    fn carousel_asks_for_ten_delimited_slides() {
        let prompt = build_prompt(Platform::Carousel, SOURCE, &PersonaProfile::default());
        assert!(prompt.contains("Exactly 10 slides"));
        assert!(prompt.contains("\"---\""));
    }

    #[test]
    fn image_platforms_carry_image_rules() {
        let persona = PersonaProfile::default();
        for platform in [Platform::Microblog, Platform::Article] {
            let prompt = build_prompt(platform, SOURCE, &persona);
            assert!(prompt.contains("16:9"));
            assert!(prompt.contains("#FFFFFF"));
            assert!(prompt.contains("50px"));
            assert!(prompt.contains("Japanese"));
        }
        assert!(!build_prompt(Platform::Thread, SOURCE, &persona).contains("[Image prompts]"));
    }

    #[test]
    fn building_is_deterministic() {
        let persona = PersonaProfile::default();
        assert_eq!(
            build_prompt(Platform::Article, SOURCE, &persona),
            build_prompt(Platform::Article, SOURCE, &persona)
        );
    }
}
