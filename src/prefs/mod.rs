//! Persisted preferences
//!
//! A small string key/value store that survives between runs, kept as a
//! JSON file next to the site (by default `.folio/preferences.json`).

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// String key/value storage for user preferences
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Preferences persisted to a JSON file
#[derive(Debug, Clone)]
pub struct FilePreferences {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct PreferencesFile {
    version: u32,
    values: BTreeMap<String, String>,
}

impl FilePreferences {
    /// Current file format version
    const VERSION: u32 = 1;

    /// Load preferences from disk, starting empty if the file is missing or unreadable
    pub fn load<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let values = Self::read(&path).unwrap_or_default();
        Self { path, values }
    }

    fn read(path: &Path) -> Option<BTreeMap<String, String>> {
        let content = fs::read_to_string(path).ok()?;
        let file: PreferencesFile = match serde_json::from_str(&content) {
            Ok(file) => file,
            Err(e) => {
                tracing::warn!("Ignoring corrupt preferences file {:?}: {}", path, e);
                return None;
            }
        };

        if file.version != Self::VERSION {
            tracing::warn!(
                "Ignoring preferences file {:?} with version {} (expected {})",
                path,
                file.version,
                Self::VERSION
            );
            return None;
        }
        Some(file.values)
    }

    fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = PreferencesFile {
            version: Self::VERSION,
            values: self.values.clone(),
        };
        fs::write(&self.path, serde_json::to_string_pretty(&file)?)?;
        Ok(())
    }
}

impl PreferenceStore for FilePreferences {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        self.save()
    }
}

/// In-memory preferences
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub(crate) struct MemoryPreferences {
    values: BTreeMap<String, String>,
}

#[cfg(test)]
impl PreferenceStore for MemoryPreferences {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_preferences_persist() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".folio/preferences.json");

        let mut prefs = FilePreferences::load(&path);
        assert_eq!(prefs.get("theme"), None);
        prefs.set("theme", "light").unwrap();

        let reloaded = FilePreferences::load(&path);
        assert_eq!(reloaded.get("theme").as_deref(), Some("light"));
    }

    #[test]
    fn test_corrupt_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.json");
        fs::write(&path, "not json").unwrap();

        assert_eq!(FilePreferences::load(&path).get("theme"), None);
    }

    #[test]
    fn test_version_mismatch_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.json");
        fs::write(&path, r#"{"version": 99, "values": {"theme": "light"}}"#).unwrap();

        let mut prefs = FilePreferences::load(&path);
        assert_eq!(prefs.get("theme"), None);

        // The next write replaces the stale file with the current format
        prefs.set("theme", "dark").unwrap();
        let saved: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(saved["version"], 1);
        assert_eq!(saved["values"]["theme"], "dark");
    }
}
