//! In-memory sources for bundled assets

use std::collections::{BTreeMap, HashMap};
use std::io;
use std::sync::Arc;

use crate::filter::filter_session;
use crate::request::SessionRequest;
use crate::source::{SessionSource, TrackGraphicSource};
use crate::types::{SessionKey, SessionRecord};
use crate::{PaddockError, Result};

/// Session records keyed by [`SessionKey`].
#[derive(Debug, Clone, Default)]
pub struct StaticSessionSource {
    records: HashMap<SessionKey, Arc<SessionRecord>>,
}

impl StaticSessionSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_record(mut self, key: SessionKey, record: SessionRecord) -> Self {
        self.insert(key, record);
        self
    }

    pub fn insert(&mut self, key: SessionKey, record: SessionRecord) {
        self.records.insert(key, Arc::new(record));
    }
}

#[async_trait::async_trait]
impl SessionSource for StaticSessionSource {
    async fn fetch_session(&self, request: &SessionRequest) -> Result<SessionRecord> {
        let record = self.records.get(&request.key).ok_or_else(|| PaddockError::SessionNotFound {
            key: request.key.clone(),
            source: io::Error::new(io::ErrorKind::NotFound, "no bundled dataset"),
        })?;
        Ok(filter_session(SessionRecord::clone(record), &request.drivers))
    }
}

/// Track graphics bundled by resource name.
///
/// Names not registered fail with `UnsupportedGraphic`.
#[derive(Debug, Clone, Default)]
pub struct StaticTrackGraphics {
    graphics: BTreeMap<String, Arc<str>>,
}

impl StaticTrackGraphics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_graphic(mut self, resource: impl Into<String>, source: impl Into<Arc<str>>) -> Self {
        self.graphics.insert(resource.into(), source.into());
        self
    }

    pub fn contains(&self, resource: &str) -> bool {
        self.graphics.contains_key(resource)
    }
}

#[async_trait::async_trait]
impl TrackGraphicSource for StaticTrackGraphics {
    async fn load_graphic(&self, resource: &str) -> Result<String> {
        self.graphics
            .get(resource)
            .map(|source| source.to_string())
            .ok_or_else(|| PaddockError::UnsupportedGraphic { resource: resource.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{RecordBuilder, SAMPLE_TRACK_SVG, lap};

    #[tokio::test]
    async fn bundled_graphics_resolve_by_name() {
        let graphics = StaticTrackGraphics::new().with_graphic("sample.svg", SAMPLE_TRACK_SVG);
        assert!(graphics.contains("sample.svg"));
        assert_eq!(graphics.load_graphic("sample.svg").await.unwrap(), SAMPLE_TRACK_SVG);

        let error = graphics.load_graphic("imola.svg").await.unwrap_err();
        assert_eq!(error.to_string(), "Unsupported track SVG: imola.svg");
    }

    #[tokio::test]
    async fn bundled_sessions_are_filtered_per_request() {
        let key = SessionKey::new(2025, "bahrain", "Q");
        let source = StaticSessionSource::new().with_record(
            key.clone(),
            RecordBuilder::new(2025, "bahrain", "Q")
                .driver("VER", "Red Bull Racing")
                .driver("NOR", "McLaren")
                .lap(lap("VER", 1, Some(91.0)))
                .build(),
        );

        let record = source.fetch_session(&SessionRequest::new(key.clone(), &["NOR"])).await.unwrap();
        assert!(record.laps.is_empty());
        assert_eq!(record.meta.filtered_drivers, Some(vec!["NOR".to_string()]));

        let other = SessionRequest::new(SessionKey::new(2025, "bahrain", "R"), &[] as &[&str]);
        assert!(matches!(
            source.fetch_session(&other).await,
            Err(PaddockError::SessionNotFound { .. })
        ));
    }
}
