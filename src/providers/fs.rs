//! Filesystem sources
//!
//! Layout under the data root:
//!
//! ```text
//! <data_root>/
//!   sessions/<year>/<round>/<SESSION>/session.json
//!   tracks/<name>.svg
//!   tracks.json
//!   calendar<year>.json
//! ```

use serde::de::DeserializeOwned;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::check_graphic_name;
use crate::config::{PaddockConfig, session_path};
use crate::filter::filter_session;
use crate::request::SessionRequest;
use crate::source::{SessionSource, TrackGraphicSource};
use crate::types::{Calendar, SessionKey, SessionRecord, TrackCatalog};
use crate::{PaddockError, Result};

/// Reads `session.json` datasets from a sessions directory.
#[derive(Debug, Clone)]
pub struct FsSessionSource {
    sessions_root: PathBuf,
}

impl FsSessionSource {
    pub fn new(sessions_root: impl Into<PathBuf>) -> Self {
        Self { sessions_root: sessions_root.into() }
    }

    pub fn from_config(config: &PaddockConfig) -> Self {
        Self::new(config.sessions_root())
    }

    pub fn session_path(&self, key: &SessionKey) -> PathBuf {
        session_path(&self.sessions_root, key)
    }

    /// Read the unfiltered record for `key`.
    pub async fn read_record(&self, key: &SessionKey) -> Result<SessionRecord> {
        if !is_path_segment(&key.round) || !is_path_segment(&key.session) {
            return Err(PaddockError::SessionNotFound {
                key: key.clone(),
                source: io::Error::new(io::ErrorKind::InvalidInput, "round and session must be plain names"),
            });
        }

        let path = self.session_path(key);
        let text = tokio::fs::read_to_string(&path).await.map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => PaddockError::SessionNotFound { key: key.clone(), source },
            _ => PaddockError::file_error(&path, source),
        })?;

        let record: SessionRecord = serde_json::from_str(&text)
            .map_err(|e| PaddockError::parse_error(path.display().to_string(), e))?;
        debug!(
            session = %key,
            drivers = record.drivers.len(),
            laps = record.laps.len(),
            "Read session dataset"
        );
        Ok(record)
    }
}

#[async_trait::async_trait]
impl SessionSource for FsSessionSource {
    async fn fetch_session(&self, request: &SessionRequest) -> Result<SessionRecord> {
        let record = self.read_record(&request.key).await?;
        Ok(filter_session(record, &request.drivers))
    }
}

/// Reads track graphics from a directory by file name.
#[derive(Debug, Clone)]
pub struct FsTrackGraphics {
    tracks_root: PathBuf,
}

impl FsTrackGraphics {
    pub fn new(tracks_root: impl Into<PathBuf>) -> Self {
        Self { tracks_root: tracks_root.into() }
    }

    pub fn from_config(config: &PaddockConfig) -> Self {
        Self::new(config.tracks_root())
    }
}

#[async_trait::async_trait]
impl TrackGraphicSource for FsTrackGraphics {
    async fn load_graphic(&self, resource: &str) -> Result<String> {
        check_graphic_name(resource)?;
        let path = self.tracks_root.join(resource);
        let source = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| PaddockError::graphic_load(resource, e))?;
        debug!(resource, bytes = source.len(), "Loaded track graphic");
        Ok(source)
    }
}

/// Read and validate the track catalog document.
pub async fn load_track_catalog<P: AsRef<Path>>(path: P) -> Result<TrackCatalog> {
    let path = path.as_ref();
    let catalog: TrackCatalog = read_json(path).await?;
    catalog.validate()?;
    info!(path = %path.display(), tracks = catalog.tracks.len(), "Loaded track catalog");
    Ok(catalog)
}

/// Read a season calendar document.
pub async fn load_calendar<P: AsRef<Path>>(path: P) -> Result<Calendar> {
    let path = path.as_ref();
    let calendar: Calendar = read_json(path).await?;
    info!(path = %path.display(), year = calendar.year, rounds = calendar.rounds.len(), "Loaded calendar");
    Ok(calendar)
}

async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = tokio::fs::read_to_string(path).await.map_err(|e| PaddockError::file_error(path, e))?;
    serde_json::from_str(&text).map_err(|e| PaddockError::parse_error(path.display().to_string(), e))
}

fn is_path_segment(value: &str) -> bool {
    !value.is_empty() && value != "." && value != ".." && !value.contains(['/', '\\'])
}
