use crate::common::SecretToken;

pub const NOTE_API_BASE: &str = "https://note.com/api/v2";
pub const THREADS_API_BASE: &str = "https://graph.threads.net/v1.0";
pub const INSTAGRAM_API_BASE: &str = "https://graph.facebook.com/v18.0";
pub const TWITTER_API_BASE: &str = "https://api.twitter.com";

/// Access token plus the account it acts for.
#[derive(Debug, Clone)]
pub struct AccountCredentials {
    pub access_token: SecretToken,
    pub user_id: String,
}

impl AccountCredentials {
    /// Both halves present and non-blank, or nothing.
    pub fn from_parts(access_token: Option<String>, user_id: Option<String>) -> Option<Self> {
        let access_token = access_token.filter(|t| !t.trim().is_empty())?;
        let user_id = user_id.filter(|u| !u.trim().is_empty())?;
        Some(Self {
            access_token: SecretToken::new(access_token.trim()),
            user_id: user_id.trim().to_string(),
        })
    }
}

/// API base URLs, overridable for proxies and tests.
#[derive(Debug, Clone)]
pub struct PublishingEndpoints {
    pub note: String,
    pub threads: String,
    pub instagram: String,
    pub twitter: String,
}

impl Default for PublishingEndpoints {
    fn default() -> Self {
        Self {
            note: NOTE_API_BASE.to_string(),
            threads: THREADS_API_BASE.to_string(),
            instagram: INSTAGRAM_API_BASE.to_string(),
            twitter: TWITTER_API_BASE.to_string(),
        }
    }
}

/// Server-side credentials for each publishing adapter. Absent means "not configured".
#[derive(Debug, Clone, Default)]
pub struct PublishingSettings {
    pub note_api_key: Option<SecretToken>,
    pub threads: Option<AccountCredentials>,
    pub instagram: Option<AccountCredentials>,
    /// Used when the caller does not pass a session token
    pub twitter_access_token: Option<SecretToken>,
    pub endpoints: PublishingEndpoints,
}

impl PublishingSettings {
    /// Platform ids with credentials configured (HTML needs none).
    pub fn configured(&self) -> Vec<&'static str> {
        let mut ids = Vec::new();
        if self.twitter_access_token.is_some() {
            ids.push("x");
        }
        if self.instagram.is_some() {
            ids.push("instagram");
        }
        if self.note_api_key.is_some() {
            ids.push("note");
        }
        if self.threads.is_some() {
            ids.push("threads");
        }
        ids.push("html");
        ids
    }
}
