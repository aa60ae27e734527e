//! Session selection and its derived chart and table views

use std::sync::Arc;
use tokio::sync::watch;
use tracing::info;

use crate::corners::CornerTable;
use crate::loader::{LatestLoader, LoadState, Snapshot};
use crate::request::SessionRequest;
use crate::series::{ChartState, DEFAULT_FALLBACK_DRIVERS};
use crate::source::SessionSource;
use crate::types::{LapSummary, SessionRecord, TrackInfo};

/// Owns the current session load.
///
/// Selecting a different session cancels the in-flight fetch; only the
/// latest selection's record is ever applied.
pub struct SessionPanel<S> {
    source: Arc<S>,
    loader: LatestLoader<SessionRecord>,
    request: Option<SessionRequest>,
    fallback_count: usize,
}

impl<S: SessionSource> SessionPanel<S> {
    pub fn new(source: Arc<S>) -> Self {
        Self {
            source,
            loader: LatestLoader::new("session"),
            request: None,
            fallback_count: DEFAULT_FALLBACK_DRIVERS,
        }
    }

    /// Number of drivers charted when none of the selection is present.
    pub fn with_fallback_count(mut self, fallback_count: usize) -> Self {
        self.fallback_count = fallback_count;
        self
    }

    /// Change the selected session. Re-selecting the current request is a
    /// no-op; use [`reload`](Self::reload) to fetch again.
    ///
    /// Returns the loader generation now current.
    pub fn select(&mut self, request: Option<SessionRequest>) -> u64 {
        if request == self.request {
            return self.loader.generation();
        }
        self.request = request;
        self.reload()
    }

    /// Fetch the current selection again.
    pub fn reload(&mut self) -> u64 {
        let Some(request) = self.request.clone() else {
            return self.loader.clear();
        };

        info!(session = %request.key, drivers = ?request.drivers, "Loading session");
        let source = Arc::clone(&self.source);
        self.loader.request(async move { source.fetch_session(&request).await })
    }

    pub fn request(&self) -> Option<&SessionRequest> {
        self.request.as_ref()
    }

    pub fn state(&self) -> LoadState<SessionRecord> {
        self.loader.state()
    }

    pub fn subscribe(&self) -> watch::Receiver<Snapshot<SessionRecord>> {
        self.loader.subscribe()
    }

    /// Wait for the current selection to finish loading.
    pub async fn settled(&self) -> LoadState<SessionRecord> {
        self.loader.settled().await
    }

    /// Chart view for `selected` competitors.
    pub fn chart<C: AsRef<str>>(&self, selected: &[C], include_outliers: bool) -> ChartState {
        ChartState::derive(&self.loader.state(), selected, include_outliers, self.fallback_count)
    }

    /// Corner table for `track`, once the session is loaded.
    pub fn corner_table<C: AsRef<str>>(&self, track: &TrackInfo, selected: &[C]) -> Option<CornerTable> {
        let state = self.loader.state();
        let record = state.ready()?;
        Some(CornerTable::build(&record.corners, &track.corners, selected))
    }

    pub fn lap_summary(&self) -> Option<LapSummary> {
        self.loader.state().ready().map(|record| record.lap_summary())
    }

    /// Advisory notes of the loaded record.
    pub fn notes(&self) -> Vec<String> {
        self.loader.state().ready().map(|record| record.notes.clone()).unwrap_or_default()
    }
}
