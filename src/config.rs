//! Data layout and display defaults
//!
//! Configuration is a YAML document; every key is optional.
//!
//! ```yaml
//! data_root: public/data
//! sessions_dir: sessions
//! tracks_dir: tracks
//! track_catalog_file: tracks.json
//! calendar_file_template: "calendar{year}.json"
//! default_year: 2025
//! default_session: Q
//! default_drivers: [VER, NOR]
//! fallback_driver_count: 4
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::series::DEFAULT_FALLBACK_DRIVERS;
use crate::types::SessionKey;
use crate::{PaddockError, Result};

/// File name of each session dataset inside its session directory.
pub const SESSION_FILE_NAME: &str = "session.json";

/// Placeholder replaced by the season in `calendar_file_template`.
const YEAR_PLACEHOLDER: &str = "{year}";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PaddockConfig {
    /// Root of all data documents
    pub data_root: PathBuf,
    /// Session datasets, relative to `data_root`
    pub sessions_dir: PathBuf,
    /// Track graphics, relative to `data_root`
    pub tracks_dir: PathBuf,
    /// Track catalog document, relative to `data_root`
    pub track_catalog_file: PathBuf,
    /// Calendar document name with a `{year}` placeholder
    pub calendar_file_template: String,
    pub default_year: i32,
    pub default_session: String,
    pub default_drivers: Vec<String>,
    /// Drivers charted when none of the selection is in the dataset
    pub fallback_driver_count: usize,
}

impl Default for PaddockConfig {
    fn default() -> Self {
        Self {
            data_root: PathBuf::from("public/data"),
            sessions_dir: PathBuf::from("sessions"),
            tracks_dir: PathBuf::from("tracks"),
            track_catalog_file: PathBuf::from("tracks.json"),
            calendar_file_template: format!("calendar{YEAR_PLACEHOLDER}.json"),
            default_year: 2025,
            default_session: "Q".to_string(),
            default_drivers: vec!["VER".to_string(), "NOR".to_string()],
            fallback_driver_count: DEFAULT_FALLBACK_DRIVERS,
        }
    }
}

impl PaddockConfig {
    /// Read and validate a YAML configuration file.
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| PaddockError::file_error(path, e))?;
        let config = Self::from_yaml_str(&text)?;
        debug!(path = %path.display(), data_root = %config.data_root.display(), "Loaded configuration");
        Ok(config)
    }

    /// Parse and validate YAML configuration text.
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let config: Self = if text.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml_ng::from_str(text).map_err(|e| PaddockError::config(e.to_string()))?
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.calendar_file_template.contains(YEAR_PLACEHOLDER) {
            return Err(PaddockError::config(format!(
                "calendar_file_template must contain {YEAR_PLACEHOLDER}, got {:?}",
                self.calendar_file_template
            )));
        }
        if self.default_session.trim().is_empty() {
            return Err(PaddockError::config("default_session must not be empty"));
        }
        Ok(())
    }

    /// `<data_root>/<sessions_dir>`
    pub fn sessions_root(&self) -> PathBuf {
        self.data_root.join(&self.sessions_dir)
    }

    /// `<data_root>/<tracks_dir>`
    pub fn tracks_root(&self) -> PathBuf {
        self.data_root.join(&self.tracks_dir)
    }

    /// `<sessions root>/<year>/<round>/<SESSION>/session.json`
    pub fn resolve_session_path(&self, key: &SessionKey) -> PathBuf {
        session_path(&self.sessions_root(), key)
    }

    pub fn resolve_graphic_path(&self, resource: &str) -> PathBuf {
        self.tracks_root().join(resource)
    }

    pub fn resolve_track_catalog_path(&self) -> PathBuf {
        self.data_root.join(&self.track_catalog_file)
    }

    pub fn resolve_calendar_path(&self, year: i32) -> PathBuf {
        self.data_root.join(self.calendar_file_template.replace(YEAR_PLACEHOLDER, &year.to_string()))
    }

    /// Session shown before the user picks one.
    pub fn default_session_key(&self, round: impl Into<String>) -> SessionKey {
        SessionKey::new(self.default_year, round, &self.default_session)
    }
}

/// Dataset location for `key` under `sessions_root`.
pub(crate) fn session_path(sessions_root: &Path, key: &SessionKey) -> PathBuf {
    sessions_root
        .join(key.year.to_string())
        .join(&key.round)
        .join(&key.session)
        .join(SESSION_FILE_NAME)
}
