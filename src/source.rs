//! Source traits for the two asynchronous inputs
//!
//! Sessions and track graphics are owned by external collaborators. Panels
//! and the request boundary only see these traits, so storage can be swapped
//! (filesystem, embedded assets, test doubles) without touching the pipeline.

use std::sync::Arc;

use crate::Result;
use crate::request::SessionRequest;
use crate::types::SessionRecord;

/// Supplies session records.
#[async_trait::async_trait]
pub trait SessionSource: Send + Sync + 'static {
    /// Fetch the record addressed by `request.key`, filtered to
    /// `request.drivers`.
    ///
    /// Returns:
    /// - `Ok(record)` - Record found; missing drivers are reported in its notes
    /// - `Err(PaddockError::SessionNotFound)` - No dataset for the key
    /// - `Err(e)` - The dataset exists but could not be read or parsed
    async fn fetch_session(&self, request: &SessionRequest) -> Result<SessionRecord>;
}

/// Supplies raw track graphic source text by resource name.
#[async_trait::async_trait]
pub trait TrackGraphicSource: Send + Sync + 'static {
    /// Load the graphic named `resource` (e.g. "bahrain.svg").
    ///
    /// Unknown resources fail with `UnsupportedGraphic`; read failures with
    /// `GraphicLoad`.
    async fn load_graphic(&self, resource: &str) -> Result<String>;
}

#[async_trait::async_trait]
impl<S: SessionSource + ?Sized> SessionSource for Arc<S> {
    async fn fetch_session(&self, request: &SessionRequest) -> Result<SessionRecord> {
        (**self).fetch_session(request).await
    }
}

#[async_trait::async_trait]
impl<G: TrackGraphicSource + ?Sized> TrackGraphicSource for Arc<G> {
    async fn load_graphic(&self, resource: &str) -> Result<String> {
        (**self).load_graphic(resource).await
    }
}
