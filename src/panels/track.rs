//! Track selection and overlay rendering

use std::sync::Arc;
use tokio::sync::watch;
use tracing::info;

use crate::PaddockError;
use crate::loader::{LatestLoader, LoadState, Snapshot};
use crate::overlay::RenderedTrack;
use crate::source::TrackGraphicSource;
use crate::types::{TrackCatalog, TrackInfo};

/// Owns the current track graphic load.
///
/// Tracks resolve through the catalog to a graphic resource. While a graphic
/// loads the state is `Loading`, so the previous track's graphic is never
/// shown for a new selection.
pub struct TrackPanel<G> {
    graphics: Arc<G>,
    catalog: Arc<TrackCatalog>,
    loader: LatestLoader<RenderedTrack>,
    selected: Option<String>,
}

impl<G: TrackGraphicSource> TrackPanel<G> {
    pub fn new(graphics: Arc<G>, catalog: Arc<TrackCatalog>) -> Self {
        Self { graphics, catalog, loader: LatestLoader::new("track"), selected: None }
    }

    /// Change the selected track. Blank ids clear the selection.
    /// Re-selecting the current track is a no-op; use
    /// [`reload`](Self::reload) to fetch its graphic again.
    ///
    /// Returns the loader generation now current.
    pub fn select(&mut self, track_id: Option<&str>) -> u64 {
        let track_id = track_id.map(str::trim).filter(|id| !id.is_empty());
        if track_id == self.selected.as_deref() {
            return self.loader.generation();
        }
        self.selected = track_id.map(str::to_string);
        self.reload()
    }

    /// Load the selected track's graphic again, e.g. after a failed load.
    pub fn reload(&mut self) -> u64 {
        let Some(track_id) = self.selected.as_deref() else {
            return self.loader.clear();
        };
        let Some(track) = self.catalog.get(track_id) else {
            return self.loader.fail(PaddockError::unknown_track(track_id));
        };

        info!(track = track_id, resource = %track.svg_file, "Loading track graphic");
        let graphics = Arc::clone(&self.graphics);
        let resource = track.svg_file.clone();
        let corners = track.corners.clone();
        self.loader.request(async move {
            let source = graphics.load_graphic(&resource).await?;
            Ok(RenderedTrack::render(&source, &corners))
        })
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Catalog entry of the selected track.
    pub fn track(&self) -> Option<&TrackInfo> {
        self.catalog.get(self.selected.as_deref()?)
    }

    pub fn catalog(&self) -> &TrackCatalog {
        &self.catalog
    }

    pub fn state(&self) -> LoadState<RenderedTrack> {
        self.loader.state()
    }

    pub fn subscribe(&self) -> watch::Receiver<Snapshot<RenderedTrack>> {
        self.loader.subscribe()
    }

    pub async fn settled(&self) -> LoadState<RenderedTrack> {
        self.loader.settled().await
    }
}
