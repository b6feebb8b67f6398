//! Local copy of the last generated bundle, edited and published from disk.

use anyhow::{Context, Result};
use crosspost_core::common::ContentBundle;
use std::fs;
use std::path::Path;

pub const DEFAULT_BUNDLE_FILE: &str = "crosspost-bundle.json";

/// Read a bundle; a missing file is an empty bundle.
pub fn load(path: &Path) -> Result<ContentBundle> {
    match fs::read_to_string(path) {
        Ok(data) => serde_json::from_str(&data)
            .with_context(|| format!("{} is not a content bundle", path.display())),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(ContentBundle::new()),
        Err(e) => Err(e).with_context(|| format!("Failed to read {}", path.display())),
    }
}

/// Read a bundle that must already exist.
pub fn load_existing(path: &Path) -> Result<ContentBundle> {
    if !path.exists() {
        anyhow::bail!(
            "No bundle at {}. Run `crosspost generate` first.",
            path.display()
        );
    }
    load(path)
}

pub fn save(path: &Path, bundle: &ContentBundle) -> Result<()> {
    let data = serde_json::to_string_pretty(bundle)?;
    fs::write(path, data).with_context(|| format!("Failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crosspost_core::common::{Platform, PlatformContent};
    use tempfile::TempDir;

    #[test]
    fn saved_bundle_loads_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(DEFAULT_BUNDLE_FILE);

        let bundle: ContentBundle = [
            (Platform::Microblog, PlatformContent::Text("tweet".into())),
            (
                Platform::Carousel,
                PlatformContent::Slides(vec!["one".into(), "two".into()]),
            ),
        ]
        .into_iter()
        .collect();
        save(&path, &bundle).unwrap();

        assert_eq!(load(&path).unwrap(), bundle);

        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"x\": \"tweet\""));
    }

    #[test]
    fn missing_bundle_is_empty_unless_required() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("none.json");

        assert!(load(&path).unwrap().is_empty());
        assert!(load_existing(&path).is_err());
    }
}
