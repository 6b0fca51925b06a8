use std::env;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::fs;
use tracing::warn;

use crate::language::Language;

/// Storage-level failures. Validation failures (an out-of-range stored
/// value) are absorbed at the read boundary and never surface as errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to encode settings as TOML: {0}")]
    EncodeToml(#[from] toml::ser::Error),
    #[error("failed to encode settings as JSON: {0}")]
    EncodeJson(#[from] serde_json::Error),
}

/// On-disk shape of the settings file. The language is kept as a raw string
/// here so that a corrupted or pre-upgrade value can still be read and then
/// rejected by validation instead of failing deserialization.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct Settings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    language: Option<String>,
}

const SETTINGS_TOML_DOC_HEADER: &str = r#"# lang-prefs settings.toml
#
# Managed by `lang-prefs set <language>`; edit by hand at your own risk.
# Valid values for `language`: "en", "ur", "fr", "es".
"#;

/// Home directory for the settings namespace (and anything else the app
/// persists later).
pub fn prefs_home_dir() -> PathBuf {
    if let Ok(dir) = env::var("LANG_PREFS_HOME") {
        let trimmed = dir.trim();
        if !trimmed.is_empty() {
            return PathBuf::from(trimmed);
        }
    }

    #[cfg(test)]
    {
        static TEST_HOME: std::sync::OnceLock<PathBuf> = std::sync::OnceLock::new();
        TEST_HOME
            .get_or_init(|| {
                let mut dir = std::env::temp_dir();
                let unique = format!(
                    "lang-prefs-test-{}-{}",
                    std::process::id(),
                    std::time::SystemTime::now()
                        .duration_since(std::time::UNIX_EPOCH)
                        .map(|d| d.as_nanos())
                        .unwrap_or(0)
                );
                dir.push(unique);
                dir.push(".lang-prefs");
                let _ = std::fs::create_dir_all(&dir);
                dir
            })
            .clone()
    }

    #[cfg(not(test))]
    {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".lang-prefs")
    }
}

/// Single source of truth for "which language is active". One persisted key
/// (`language`) inside one settings file, durable across restarts.
///
/// The store itself holds no mutable state beyond the directory path; all
/// reads hit the file, so the derived locale always reflects the latest
/// committed write. Callers that share a store across tasks must serialize
/// writes themselves.
#[derive(Debug, Clone)]
pub struct PreferenceStore {
    dir: PathBuf,
}

impl PreferenceStore {
    /// Store rooted at an explicit directory. Mainly for tests and embedders
    /// that manage their own app dirs.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store rooted at `~/.lang-prefs` (or `$LANG_PREFS_HOME`).
    pub fn open_default() -> Self {
        Self::new(prefs_home_dir())
    }

    fn settings_toml_path(&self) -> PathBuf {
        self.dir.join("settings.toml")
    }

    fn settings_toml_backup_path(&self) -> PathBuf {
        self.dir.join("settings.toml.bak")
    }

    fn settings_json_path(&self) -> PathBuf {
        self.dir.join("settings.json")
    }

    fn settings_json_backup_path(&self) -> PathBuf {
        self.dir.join("settings.json.bak")
    }

    /// The settings file `resolve_language()` will actually use.
    pub fn settings_file_path(&self) -> PathBuf {
        let toml_path = self.settings_toml_path();
        if toml_path.exists() {
            toml_path
        } else if self.settings_json_path().exists() {
            self.settings_json_path()
        } else {
            toml_path
        }
    }

    /// Raw persisted language string, unvalidated. Absence is `Ok(None)`.
    ///
    /// A settings file that fails to parse is treated the same as a
    /// corrupted value: logged and reported as absent, so a broken file can
    /// never wedge startup. Only I/O failures are errors.
    pub async fn raw_language(&self) -> Result<Option<String>, StoreError> {
        let toml_path = self.settings_toml_path();
        if toml_path.exists() {
            let text = read_to_string(&toml_path).await?;
            return match toml::from_str::<Settings>(&text) {
                Ok(settings) => Ok(settings.language),
                Err(err) => {
                    warn!("ignoring unparseable settings file {:?}: {}", toml_path, err);
                    Ok(None)
                }
            };
        }

        let json_path = self.settings_json_path();
        if json_path.exists() {
            let text = read_to_string(&json_path).await?;
            return match serde_json::from_str::<Settings>(&text) {
                Ok(settings) => Ok(settings.language),
                Err(err) => {
                    warn!("ignoring unparseable settings file {:?}: {}", json_path, err);
                    Ok(None)
                }
            };
        }

        Ok(None)
    }

    /// The persisted language, if one is present and valid. An out-of-range
    /// stored value (e.g. left behind by an older build) is logged and
    /// reported as absent; it must never propagate past this boundary.
    pub async fn saved_language(&self) -> Result<Option<Language>, StoreError> {
        let Some(raw) = self.raw_language().await? else {
            return Ok(None);
        };
        match Language::from_code(&raw) {
            Some(lang) => Ok(Some(lang)),
            None => {
                warn!(
                    "ignoring invalid persisted language {:?} in {:?}",
                    raw,
                    self.settings_file_path()
                );
                Ok(None)
            }
        }
    }

    /// The active language: the saved one, or `en` when nothing valid is
    /// persisted. Storage failures propagate; there is no retry policy.
    pub async fn resolve_language(&self) -> Result<Language, StoreError> {
        Ok(self.saved_language().await?.unwrap_or_default())
    }

    /// Persist `language`, overwriting any previous value. Invalid codes are
    /// unrepresentable in [`Language`], so the write side cannot store an
    /// out-of-range value.
    ///
    /// The previous file (if any) is copied to a `.bak` sibling, then the new
    /// contents are written to a temp file and renamed into place so a crash
    /// mid-write cannot corrupt the settings.
    pub async fn set_language(&self, language: Language) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir).await.map_err(|source| StoreError::Write {
            path: self.dir.clone(),
            source,
        })?;

        let settings = Settings {
            language: Some(language.as_str().to_string()),
        };

        // Keep writing the legacy JSON file if that is what the user has;
        // new installs get TOML.
        let toml_path = self.settings_toml_path();
        let json_path = self.settings_json_path();
        let (path, backup_path, data) = if toml_path.exists() || !json_path.exists() {
            let body = toml::to_string_pretty(&settings)?;
            let text = format!("{SETTINGS_TOML_DOC_HEADER}\n{body}");
            (toml_path, self.settings_toml_backup_path(), text.into_bytes())
        } else {
            let body = serde_json::to_vec_pretty(&settings)?;
            (json_path, self.settings_json_backup_path(), body)
        };

        if path.exists()
            && let Err(err) = fs::copy(&path, &backup_path).await
        {
            warn!("failed to backup {:?} to {:?}: {}", path, backup_path, err);
        }

        let tmp_path = self.dir.join("settings.tmp");
        fs::write(&tmp_path, &data).await.map_err(|source| StoreError::Write {
            path: tmp_path.clone(),
            source,
        })?;
        fs::rename(&tmp_path, &path).await.map_err(|source| StoreError::Write {
            path: path.clone(),
            source,
        })?;
        Ok(())
    }

    /// Clear the persisted preference, returning the store to its
    /// uninitialized state (`resolve_language()` yields `en` again).
    pub async fn reset(&self) -> Result<(), StoreError> {
        for path in [self.settings_toml_path(), self.settings_json_path()] {
            if let Err(err) = fs::remove_file(&path).await
                && err.kind() != io::ErrorKind::NotFound
            {
                return Err(StoreError::Write { path, source: err });
            }
        }
        Ok(())
    }
}

async fn read_to_string(path: &Path) -> Result<String, StoreError> {
    fs::read_to_string(path).await.map_err(|source| StoreError::Read {
        path: path.to_path_buf(),
        source,
    })
}
