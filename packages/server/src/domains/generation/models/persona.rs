use serde::{Deserialize, Serialize};

/// Who is writing, who is reading, and how it should sound.
///
/// Interpolated verbatim into every prompt template; never mutated at runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonaProfile {
    pub author: String,
    pub reader: String,
    pub tone: String,
}

impl Default for PersonaProfile {
    fn default() -> Self {
        Self {
            author: "A Japanese writer who turns news, research and business topics into \
                     plain, friendly explanations and shares honest first-person reactions."
                .to_string(),
            reader: "Japanese social-media users with no background in the topic; \
                     assume a middle-school reading level."
                .to_string(),
            tone: "Warm and conversational. Speak directly to readers (\"everyone\", \
                   \"let's think about it together\"), show natural emotion, \
                   avoid jargon, and use polite Japanese."
                .to_string(),
        }
    }
}

impl PersonaProfile {
    /// Start from the default persona and replace whichever fields are set.
    pub fn with_overrides(
        author: Option<String>,
        reader: Option<String>,
        tone: Option<String>,
    ) -> Self {
        let default = Self::default();
        Self {
            author: author.unwrap_or(default.author),
            reader: reader.unwrap_or(default.reader),
            tone: tone.unwrap_or(default.tone),
        }
    }

    /// Block pasted into every template.
    pub fn render_block(&self) -> String {
        format!(
            "[Persona]\nAuthor: {}\nTarget reader: {}\nTone: {}",
            self.author, self.reader, self.tone
        )
    }
}
