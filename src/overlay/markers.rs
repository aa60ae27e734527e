//! Corner marker layout in a graphic's own coordinate frame

use serde::Serialize;
use std::fmt::Write as _;

use super::ViewFrame;
use crate::types::{CornerDescriptor, CornerSeverity};

/// Smallest marker radius, in frame units.
pub const MIN_MARKER_RADIUS: f64 = 4.0;
/// Marker radius as a fraction of the frame's smaller dimension.
pub const MARKER_RADIUS_RATIO: f64 = 0.01;
/// Smallest label font size, in frame units.
pub const MIN_LABEL_FONT_SIZE: f64 = 10.0;
pub const LABEL_FONT_RATIO: f64 = 0.03;
/// Label lift above the marker centre, as a fraction of the smaller dimension.
pub const LABEL_OFFSET_RATIO: f64 = 0.02;
pub const MARKER_OPACITY: f64 = 0.85;

/// Size parameters shared by every marker in one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
#[serde(rename_all = "camelCase")]
pub struct MarkerScale {
    pub radius: f64,
    pub font_size: f64,
    pub label_offset: f64,
}

impl MarkerScale {
    pub fn for_frame(frame: &ViewFrame) -> Self {
        let extent = frame.smaller_dimension();
        Self {
            radius: (extent * MARKER_RADIUS_RATIO).max(MIN_MARKER_RADIUS),
            font_size: (extent * LABEL_FONT_RATIO).round().max(MIN_LABEL_FONT_SIZE),
            label_offset: extent * LABEL_OFFSET_RATIO,
        }
    }
}

/// A positioned corner marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
#[serde(rename_all = "camelCase")]
pub struct CornerMarker {
    pub number: u32,
    pub severity: CornerSeverity,
    pub cx: f64,
    pub cy: f64,
    pub radius: f64,
    pub label_x: f64,
    pub label_y: f64,
    pub font_size: f64,
    pub fill: String,
}

/// Lay out one marker per corner with finite coordinates.
pub fn layout_markers(frame: &ViewFrame, corners: &[CornerDescriptor]) -> Vec<CornerMarker> {
    let scale = MarkerScale::for_frame(frame);
    corners
        .iter()
        .filter(|corner| corner.x.is_finite() && corner.y.is_finite())
        .map(|corner| CornerMarker {
            number: corner.number,
            severity: corner.severity,
            cx: corner.x,
            cy: corner.y,
            radius: scale.radius,
            label_x: corner.x,
            label_y: corner.y - scale.label_offset,
            font_size: scale.font_size,
            fill: corner.severity.color().to_string(),
        })
        .collect()
}

/// Transparent overlay layer sharing `frame`, to be stacked over the
/// responsive base graphic.
pub fn overlay_svg(frame: &ViewFrame, markers: &[CornerMarker]) -> String {
    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{frame}" width="100%" height="100%" preserveAspectRatio="xMidYMid meet" pointer-events="none">"#
    );
    for marker in markers {
        let _ = write!(
            svg,
            r##"<g class="corner corner-{severity}" data-corner="{number}"><circle cx="{cx}" cy="{cy}" r="{r}" fill="{fill}" opacity="{MARKER_OPACITY}"/><text x="{lx}" y="{ly}" font-size="{size}" text-anchor="middle" fill="#ffffff">{number}</text></g>"##,
            severity = marker.severity.label(),
            number = marker.number,
            cx = marker.cx,
            cy = marker.cy,
            r = marker.radius,
            fill = marker.fill,
            lx = marker.label_x,
            ly = marker.label_y,
            size = marker.font_size,
        );
    }
    svg.push_str("</svg>");
    svg
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn frame(width: f64, height: f64) -> ViewFrame {
        ViewFrame { min_x: 0.0, min_y: 0.0, width, height }
    }

    fn corner(number: u32, severity: CornerSeverity, x: f64, y: f64) -> CornerDescriptor {
        CornerDescriptor { number, severity, x, y }
    }

    #[test]
    fn scale_follows_smaller_dimension() {
        let scale = MarkerScale::for_frame(&frame(1000.0, 500.0));
        assert_eq!(scale.radius, 5.0);
        assert_eq!(scale.font_size, 15.0);
        assert_eq!(scale.label_offset, 10.0);
    }

    #[test]
    fn small_frames_use_minimums() {
        let scale = MarkerScale::for_frame(&frame(120.0, 80.0));
        assert_eq!(scale.radius, MIN_MARKER_RADIUS);
        assert_eq!(scale.font_size, MIN_LABEL_FONT_SIZE);
    }

    #[test]
    fn markers_sit_at_native_coordinates() {
        let markers = layout_markers(
            &frame(1000.0, 500.0),
            &[corner(1, CornerSeverity::Slow, 500.0, 250.0), corner(7, CornerSeverity::Fast, 10.0, 20.0)],
        );
        assert_eq!(markers.len(), 2);
        assert_eq!((markers[0].cx, markers[0].cy), (500.0, 250.0));
        assert_eq!(markers[0].radius, 5.0);
        assert_eq!(markers[0].label_y, 240.0);
        assert_eq!(markers[0].fill, "#ef4444");
        assert_eq!(markers[1].fill, "#10b981");
    }

    #[test]
    fn non_finite_coordinates_are_skipped() {
        let markers = layout_markers(
            &frame(100.0, 100.0),
            &[corner(1, CornerSeverity::Medium, f64::NAN, 5.0), corner(2, CornerSeverity::Medium, 5.0, 5.0)],
        );
        assert_eq!(markers.iter().map(|m| m.number).collect::<Vec<_>>(), vec![2]);
        assert_eq!(markers[0].fill, "#f59e0b");
    }

    #[test]
    fn overlay_shares_frame_and_draws_each_marker() {
        let frame = ViewFrame { min_x: -50.0, min_y: 0.0, width: 1000.0, height: 500.0 };
        let markers = layout_markers(&frame, &[corner(3, CornerSeverity::Slow, 500.0, 250.0)]);
        let svg = overlay_svg(&frame, &markers);

        assert!(svg.contains(r#"viewBox="-50 0 1000 500""#));
        assert!(svg.contains(r##"<circle cx="500" cy="250" r="5" fill="#ef4444" opacity="0.85"/>"##));
        assert!(svg.contains(r#"data-corner="3""#));
        assert!(svg.contains(">3</text>"));
        assert!(svg.ends_with("</svg>"));
    }

    proptest! {
        #[test]
        fn prop_scale_never_below_minimums(width in 0.01f64..100_000.0, height in 0.01f64..100_000.0) {
            let scale = MarkerScale::for_frame(&frame(width, height));
            prop_assert!(scale.radius >= MIN_MARKER_RADIUS);
            prop_assert!(scale.font_size >= MIN_LABEL_FONT_SIZE);
            prop_assert!(scale.label_offset > 0.0);
        }
    }
}
