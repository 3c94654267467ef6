use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur when writing preferences.
#[derive(Debug, Error)]
pub enum PreferencesError {
    #[error("failed to encode preferences: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path:   PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Per-user choices persisted across sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Preferences {
    /// Chosen locale; None until one has been resolved.
    pub locale: Option<String>,
    /// Start at login.
    pub autostart: bool,
}

/// On-disk shape: every field optional, unknown keys ignored.
#[derive(Debug, Default, Deserialize)]
struct StoredPreferences {
    #[serde(default)]
    locale: Option<String>,
    #[serde(default)]
    autostart: Option<bool>,
}

impl Preferences {
    /// Defaults for a first run: no locale, autostart mirrors the filesystem.
    pub fn defaults(autostart_file: &Path) -> Self {
        Self { locale: None, autostart: entry_exists(autostart_file) }
    }

    /// Load preferences from `path`. Never fails: a missing, unreadable or
    /// malformed file yields defaults.
    pub fn load(path: &Path, autostart_file: &Path) -> Self {
        let text = match fs::read_to_string(path) {
            Ok(t)  => t,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!("no preferences at {}, using defaults", path.display());
                return Self::defaults(autostart_file);
            }
            Err(e) => {
                tracing::warn!("cannot read {}: {}", path.display(), e);
                return Self::defaults(autostart_file);
            }
        };
        match serde_json::from_str::<StoredPreferences>(&text) {
            Ok(stored) => Self {
                locale:    stored.locale,
                autostart: stored.autostart.unwrap_or_else(|| entry_exists(autostart_file)),
            },
            Err(e) => {
                tracing::warn!("ignoring malformed preferences {}: {}", path.display(), e);
                Self::defaults(autostart_file)
            }
        }
    }

    /// Overwrite `path` with the current preferences. Parent directories
    /// are not created.
    pub fn save(&self, path: &Path) -> Result<(), PreferencesError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|source| PreferencesError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// True when something (file, link, or dangling link) sits at `path`.
pub fn entry_exists(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let prefs = Preferences::load(&dir.path().join("prefs.json"), &dir.path().join("hello.desktop"));
        assert_eq!(prefs, Preferences { locale: None, autostart: false });
    }

    #[test]
    fn invalid_json_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        let autostart = dir.path().join("hello.desktop");
        fs::write(&path, "{ not json").unwrap();
        fs::write(&autostart, "").unwrap();
        let prefs = Preferences::load(&path, &autostart);
        assert_eq!(prefs, Preferences { locale: None, autostart: true });
    }

    #[test]
    fn absent_fields_use_defaults_and_unknown_keys_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        fs::write(&path, r#"{"locale": "fr", "theme": "dark"}"#).unwrap();
        let prefs = Preferences::load(&path, &dir.path().join("hello.desktop"));
        assert_eq!(prefs.locale.as_deref(), Some("fr"));
        assert!(!prefs.autostart);
    }

    #[test]
    fn null_locale_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        fs::write(&path, r#"{"locale": null, "autostart": true}"#).unwrap();
        let prefs = Preferences::load(&path, &dir.path().join("hello.desktop"));
        assert_eq!(prefs, Preferences { locale: None, autostart: true });
    }

    #[test]
    fn save_then_load_keeps_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        let autostart = dir.path().join("hello.desktop");
        Preferences { locale: Some("de_DE".into()), autostart: true }.save(&path).unwrap();
        let first: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();

        Preferences::load(&path, &autostart).save(&path).unwrap();
        let second: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(first, second);
        assert_eq!(second["locale"], "de_DE");
        assert_eq!(second["autostart"], true);
    }

    #[test]
    fn save_does_not_create_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("prefs.json");
        let err = Preferences { locale: None, autostart: false }.save(&path).unwrap_err();
        assert!(matches!(err, PreferencesError::Write { .. }));
        assert!(!path.exists());
    }
}
