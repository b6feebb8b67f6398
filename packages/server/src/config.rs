use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::common::{RetryPolicy, SecretToken, DEFAULT_BASE_DELAY_MS, DEFAULT_MAX_ATTEMPTS};
use crate::domains::generation::models::PersonaProfile;
use crate::domains::publishing::models::{AccountCredentials, PublishingEndpoints, PublishingSettings};

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// `None` allows any origin
    pub allowed_origins: Option<Vec<String>>,
    pub gemini_model: String,
    pub gemini_base_url: Option<String>,
    pub retry_policy: RetryPolicy,
    pub fetch_timeout: Duration,
    pub persona: PersonaProfile,
    pub publishing: PublishingSettings,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let mut endpoints = PublishingEndpoints::default();
        if let Some(url) = get("NOTE_API_BASE_URL") {
            endpoints.note = url;
        }
        if let Some(url) = get("THREADS_API_BASE_URL") {
            endpoints.threads = url;
        }
        if let Some(url) = get("INSTAGRAM_API_BASE_URL") {
            endpoints.instagram = url;
        }
        if let Some(url) = get("TWITTER_API_BASE_URL") {
            endpoints.twitter = url;
        }

        Ok(Self {
            port: parse_or(get("PORT"), 8080).context("PORT must be a valid number")?,
            allowed_origins: get("ALLOWED_ORIGINS").map(|origins| {
                origins
                    .split(',')
                    .map(|o| o.trim().to_string())
                    .filter(|o| !o.is_empty())
                    .collect()
            }),
            gemini_model: get("GEMINI_MODEL")
                .unwrap_or_else(|| gemini_client::DEFAULT_MODEL.to_string()),
            gemini_base_url: get("GEMINI_BASE_URL"),
            retry_policy: RetryPolicy::new(
                parse_or(get("GENERATION_MAX_ATTEMPTS"), DEFAULT_MAX_ATTEMPTS)
                    .context("GENERATION_MAX_ATTEMPTS must be a positive number")?,
                Duration::from_millis(
                    parse_or(get("GENERATION_BASE_DELAY_MS"), DEFAULT_BASE_DELAY_MS)
                        .context("GENERATION_BASE_DELAY_MS must be a number of milliseconds")?,
                ),
            ),
            fetch_timeout: Duration::from_secs(
                parse_or(get("FETCH_TIMEOUT_SECS"), 30)
                    .context("FETCH_TIMEOUT_SECS must be a number of seconds")?,
            ),
            persona: PersonaProfile::with_overrides(
                get("PERSONA_AUTHOR"),
                get("PERSONA_READER"),
                get("PERSONA_TONE"),
            ),
            publishing: PublishingSettings {
                note_api_key: get("NOTE_API_KEY").map(SecretToken::from),
                threads: AccountCredentials::from_parts(
                    get("THREADS_ACCESS_TOKEN"),
                    get("THREADS_USER_ID"),
                ),
                instagram: AccountCredentials::from_parts(
                    get("INSTAGRAM_ACCESS_TOKEN"),
                    get("INSTAGRAM_USER_ID"),
                ),
                twitter_access_token: get("TWITTER_ACCESS_TOKEN").map(SecretToken::from),
                endpoints,
            },
        })
    }
}

fn parse_or<T>(value: Option<String>, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match value {
        Some(raw) => Ok(raw.trim().parse()?),
        None => Ok(default),
    }
}
