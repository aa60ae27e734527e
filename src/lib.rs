//! Telemetry preparation for motorsport session comparisons.
//!
//! Paddock turns per-session timing datasets into the structures a comparison
//! view needs: lap time series for a chart, a padded time axis, a corner table,
//! and corner markers aligned to an arbitrary track graphic.
//!
//! # Features
//!
//! - **Session filtering**: restrict a record to requested competitors, with
//!   found/missing bookkeeping and advisory notes
//! - **Lap series**: one datum per lap number with explicit gaps, outlier-aware
//! - **Axis range**: padded, never negative, auto-scale when there is no data
//! - **Track overlay**: `viewBox` extraction, responsive rewrite, marker layout
//! - **Last request wins**: cancellable session and graphic loads
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use paddock::{Paddock, PaddockConfig, SessionKey, SessionRequest};
//!
//! #[tokio::main]
//! async fn main() -> paddock::Result<()> {
//!     let config = PaddockConfig::load("paddock.yaml").await?;
//!
//!     let mut sessions = Paddock::sessions(&config);
//!     let request = SessionRequest::new(SessionKey::new(2025, "bahrain", "Q"), &["VER", "NOR"]);
//!     sessions.select(Some(request));
//!     sessions.settled().await;
//!     println!("{:?}", sessions.chart(&["VER", "NOR"], false));
//!
//!     let mut tracks = Paddock::tracks(&config).await?;
//!     tracks.select(Some("bahrain"));
//!     if let Some(track) = tracks.settled().await.ready() {
//!         println!("{} markers", track.markers.len());
//!     }
//!     Ok(())
//! }
//! ```

// Core types and error handling
pub mod config;
mod error;
mod serde_utils;
#[cfg_attr(any(test, feature = "benchmark"), path = "test_utils.rs")]
#[cfg(any(test, feature = "benchmark"))]
pub mod test_utils;
pub mod types;

// Pure transformations
pub mod corners;
pub mod filter;
pub mod overlay;
pub mod series;

// Boundary and loading
pub mod loader;
pub mod panels;
pub mod providers;
pub mod request;
pub mod source;

// Core exports
pub use config::PaddockConfig;
pub use error::*;
pub use types::*;

// Main API exports
pub use corners::CornerTable;
pub use filter::{filter_session, parse_driver_codes};
pub use loader::{LatestLoader, LoadState, Snapshot};
pub use overlay::{RenderedTrack, ViewFrame};
pub use panels::{SessionPanel, TrackPanel};
pub use providers::{FsSessionSource, FsTrackGraphics};
pub use request::{SessionRequest, SessionResponse, respond};
pub use series::{AxisRange, ChartDatum, ChartState, axis_range, build_lap_series};
pub use source::{SessionSource, TrackGraphicSource};

use std::sync::Arc;

/// Entry point wiring the filesystem sources to the panels.
///
/// # Examples
///
/// ```rust,no_run
/// use paddock::{Paddock, PaddockConfig};
///
/// # #[tokio::main]
/// # async fn main() -> paddock::Result<()> {
/// let config = PaddockConfig::default();
/// let calendar = Paddock::calendar(&config, config.default_year).await?;
/// for (id, name) in calendar.track_list() {
///     println!("{id}: {name}");
/// }
/// # Ok(())
/// # }
/// ```
pub struct Paddock;

impl Paddock {
    /// Session panel reading datasets under the configured sessions directory.
    pub fn sessions(config: &PaddockConfig) -> SessionPanel<FsSessionSource> {
        SessionPanel::new(Arc::new(FsSessionSource::from_config(config)))
            .with_fallback_count(config.fallback_driver_count)
    }

    /// Track panel over the configured catalog and graphics directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the track catalog cannot be read, parsed or
    /// validated.
    pub async fn tracks(config: &PaddockConfig) -> Result<TrackPanel<FsTrackGraphics>> {
        let catalog = providers::load_track_catalog(config.resolve_track_catalog_path()).await?;
        Ok(TrackPanel::new(Arc::new(FsTrackGraphics::from_config(config)), Arc::new(catalog)))
    }

    /// Season calendar for `year`.
    pub async fn calendar(config: &PaddockConfig, year: i32) -> Result<Calendar> {
        providers::load_calendar(config.resolve_calendar_path(year)).await
    }
}
