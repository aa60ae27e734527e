//! Track Overlay Mapper
//!
//! Corner coordinates are stored in each track graphic's own `viewBox` units.
//! Rendering keeps that relationship scale-independent: the base graphic is
//! rewritten to fill its container, and markers are drawn into a separate
//! transparent layer that declares the same frame, so both scale together.
//!
//! ```rust
//! use paddock::overlay::RenderedTrack;
//! use paddock::types::{CornerDescriptor, CornerSeverity};
//!
//! let svg = r#"<svg width="1000" height="500" viewBox="0 0 1000 500"></svg>"#;
//! let corners = [CornerDescriptor { number: 1, severity: CornerSeverity::Slow, x: 500.0, y: 250.0 }];
//! let track = RenderedTrack::render(svg, &corners);
//!
//! assert_eq!(track.markers[0].radius, 5.0);
//! assert!(track.base_svg.contains(r#"width="100%""#));
//! assert!(track.overlay_svg().is_some());
//! ```
//!
//! A graphic without a usable frame still renders; it just has no markers.

mod markers;
mod responsive;
mod view_frame;

pub use markers::{
    CornerMarker, LABEL_FONT_RATIO, LABEL_OFFSET_RATIO, MARKER_OPACITY, MARKER_RADIUS_RATIO,
    MIN_LABEL_FONT_SIZE, MIN_MARKER_RADIUS, MarkerScale, layout_markers, overlay_svg,
};
pub use responsive::{RESPONSIVE_ATTRIBUTES, make_responsive};
pub use view_frame::ViewFrame;

use serde::Serialize;
use tracing::debug;

use crate::types::CornerDescriptor;

/// A track graphic prepared for display with its corner markers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
#[serde(rename_all = "camelCase")]
pub struct RenderedTrack {
    /// Base graphic with responsive sizing
    pub base_svg: String,
    /// Declared frame, if the graphic has a well-formed one
    pub frame: Option<ViewFrame>,
    /// Empty when `frame` is `None`
    pub markers: Vec<CornerMarker>,
}

impl RenderedTrack {
    pub fn render(source: &str, corners: &[CornerDescriptor]) -> Self {
        let frame = ViewFrame::from_svg(source);
        let markers = match &frame {
            Some(frame) => layout_markers(frame, corners),
            None => {
                debug!(corners = corners.len(), "Track graphic has no usable viewBox; skipping markers");
                Vec::new()
            }
        };

        Self { base_svg: make_responsive(source), frame, markers }
    }

    /// Marker layer to stack over `base_svg`, if a frame was found.
    pub fn overlay_svg(&self) -> Option<String> {
        self.frame.as_ref().map(|frame| overlay_svg(frame, &self.markers))
    }
}
