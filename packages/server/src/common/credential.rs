//! Secrets: the generation-backend key (format-checked) and publishing tokens.

use secrecy::{ExposeSecret, SecretBox};
use std::fmt;
use thiserror::Error;

/// Every Google API key starts with this prefix.
pub const KEY_PREFIX: &str = "AIza";

/// Shortest key we accept.
pub const MIN_KEY_LENGTH: usize = 30;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CredentialError {
    #[error("API key is not set. Enter your Gemini API key first.")]
    Missing,

    #[error("API key format is invalid: {0}")]
    Invalid(&'static str),
}

/// Check the key shape without keeping it.
pub fn validate_format(raw: &str) -> Result<(), CredentialError> {
    let key = raw.trim();
    if key.is_empty() {
        return Err(CredentialError::Missing);
    }
    if !key.starts_with(KEY_PREFIX) {
        return Err(CredentialError::Invalid("expected a key starting with \"AIza\""));
    }
    if key.chars().count() < MIN_KEY_LENGTH {
        return Err(CredentialError::Invalid("key is too short"));
    }
    Ok(())
}

/// Any secret string (API key, access token). `Debug` and `Display` never print it.
pub struct SecretToken(SecretBox<str>);

impl SecretToken {
    pub fn new(value: impl Into<String>) -> Self {
        Self(SecretBox::new(Box::from(value.into().as_str())))
    }

    /// Only call this when building the outbound request.
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl Clone for SecretToken {
    fn clone(&self) -> Self {
        Self::new(self.expose())
    }
}

impl fmt::Debug for SecretToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl fmt::Display for SecretToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl From<String> for SecretToken {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// A generation-backend key that passed the format check.
#[derive(Clone)]
pub struct ApiCredential(SecretToken);

impl ApiCredential {
    /// Trim and validate a user-entered key.
    pub fn parse(raw: &str) -> Result<Self, CredentialError> {
        validate_format(raw)?;
        Ok(Self(SecretToken::new(raw.trim())))
    }

    /// `None` and blank strings are both "missing".
    pub fn from_optional(raw: Option<&str>) -> Result<Self, CredentialError> {
        Self::parse(raw.unwrap_or_default())
    }

    pub fn expose(&self) -> &str {
        self.0.expose()
    }

    /// Prefix and last four characters, for status output.
    pub fn masked(&self) -> String {
        mask(self.expose())
    }
}

/// `AIza…wxyz` style preview of a key.
pub fn mask(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}…{}", head, tail)
}

impl fmt::Debug for ApiCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiCredential([REDACTED])")
    }
}

impl fmt::Display for ApiCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOOD_KEY: &str = "AIzaSyA1234567890abcdefghijklmnopqrs";

    #[test]
    fn well_formed_key_passes() {
        let credential = ApiCredential::parse(GOOD_KEY).unwrap();
        assert_eq!(credential.expose(), GOOD_KEY);
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        let credential = ApiCredential::parse(&format!("  {}\n", GOOD_KEY)).unwrap();
        assert_eq!(credential.expose(), GOOD_KEY);
    }

    #[test]
    fn wrong_prefix_is_rejected() {
        let err = ApiCredential::parse("sk-1234567890abcdefghijklmnopqrstuvwxyz").unwrap_err();
        assert!(matches!(err, CredentialError::Invalid(_)));
    }

    #[test]
    fn short_key_is_rejected() {
        let err = ApiCredential::parse("AIzaShort").unwrap_err();
        assert_eq!(err, CredentialError::Invalid("key is too short"));
    }

    #[test]
    fn exactly_min_length_passes() {
        let key = format!("{}{}", KEY_PREFIX, "x".repeat(MIN_KEY_LENGTH - KEY_PREFIX.len()));
        assert!(validate_format(&key).is_ok());
    }

    #[test]
    fn blank_or_absent_key_is_missing() {
        assert_eq!(ApiCredential::from_optional(None).unwrap_err(), CredentialError::Missing);
        assert_eq!(
            ApiCredential::from_optional(Some("   ")).unwrap_err(),
            CredentialError::Missing
        );
    }

    #[test]
    fn debug_and_display_are_redacted() {
        let credential = ApiCredential::parse(GOOD_KEY).unwrap();
        assert!(!format!("{:?}", credential).contains("AIzaSy"));
        assert_eq!(credential.to_string(), "[REDACTED]");
        assert_eq!(credential.masked(), "AIza…pqrs");
    }

    #[test]
    fn secret_token_clones_without_leaking() {
        let token = SecretToken::new("note-token");
        let copy = token.clone();
        assert_eq!(copy.expose(), "note-token");
        assert_eq!(format!("{:?} {}", copy, copy), "[REDACTED] [REDACTED]");
    }

    #[test]
    fn short_values_mask_completely() {
        assert_eq!(mask("abc"), "***");
    }
}
