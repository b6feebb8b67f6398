//! Gemini key persisted on the user's machine.
//!
//! Stored in ~/.config/crosspost/credentials.json. Loaded once, written on every
//! change, and the entry is removed entirely when cleared.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredCredentials {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    gemini_api_key: Option<String>,
}

#[derive(Debug)]
pub struct CredentialStore {
    path: PathBuf,
    stored: StoredCredentials,
}

impl CredentialStore {
    /// Store at the default location
    pub fn open_default() -> Result<Self> {
        let path = default_path().context("Could not determine the config directory")?;
        Self::load(path)
    }

    /// Load from `path`. A missing file is an empty store.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        let stored = match fs::read_to_string(&path) {
            Ok(data) => serde_json::from_str(&data)
                .with_context(|| format!("Corrupt credential file {}", path.display()))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => StoredCredentials::default(),
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to read {}", path.display()))
            }
        };

        Ok(Self { path, stored })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn api_key(&self) -> Option<&str> {
        self.stored.gemini_api_key.as_deref()
    }

    /// Save the trimmed key. An empty value clears the entry.
    pub fn set_api_key(&mut self, key: &str) -> Result<()> {
        let key = key.trim();
        if key.is_empty() {
            return self.clear();
        }
        self.stored.gemini_api_key = Some(key.to_string());
        self.save()
    }

    pub fn clear(&mut self) -> Result<()> {
        self.stored.gemini_api_key = None;

        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("Failed to remove {}", self.path.display())),
        }
    }

    fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let data = serde_json::to_string_pretty(&self.stored)?;
        fs::write(&self.path, data)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;

        restrict_permissions(&self.path)
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600))
        .with_context(|| format!("Failed to restrict permissions on {}", path.display()))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> Result<()> {
    Ok(())
}

/// ~/.config/crosspost/credentials.json (platform equivalent elsewhere)
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("crosspost").join("credentials.json"))
}
