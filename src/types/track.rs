//! Track geometry and corner structures

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use crate::serde_utils::lenient_f64;
use crate::{PaddockError, Result};

/// Corner speed classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
#[serde(rename_all = "lowercase")]
pub enum CornerSeverity {
    Slow,
    Medium,
    Fast,
}

impl CornerSeverity {
    /// Marker fill colour.
    pub fn color(self) -> &'static str {
        match self {
            CornerSeverity::Slow => "#ef4444",
            CornerSeverity::Medium => "#f59e0b",
            CornerSeverity::Fast => "#10b981",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CornerSeverity::Slow => "slow",
            CornerSeverity::Medium => "medium",
            CornerSeverity::Fast => "fast",
        }
    }
}

/// A corner positioned in the track graphic's own coordinate frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct CornerDescriptor {
    /// Corner number, unique within a track
    pub number: u32,
    /// Speed classification
    #[serde(rename = "type")]
    pub severity: CornerSeverity,
    /// X in the graphic's viewBox units
    pub x: f64,
    /// Y in the graphic's viewBox units
    pub y: f64,
}

/// Telemetry for one competitor through one corner.
#[derive(Default, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
#[serde(rename_all = "camelCase")]
#[serde(default)]
pub struct CornerTelemetry {
    pub corner_number: u32,
    #[serde(deserialize_with = "lenient_f64", skip_serializing_if = "Option::is_none")]
    pub entry_speed_kph: Option<f64>,
    #[serde(deserialize_with = "lenient_f64", skip_serializing_if = "Option::is_none")]
    pub apex_speed_kph: Option<f64>,
    #[serde(deserialize_with = "lenient_f64", skip_serializing_if = "Option::is_none")]
    pub exit_speed_kph: Option<f64>,
    /// Distance before the apex where braking started
    #[serde(deserialize_with = "lenient_f64", skip_serializing_if = "Option::is_none")]
    pub braking_point_m: Option<f64>,
    /// Time gained (negative) or lost relative to the session reference
    #[serde(deserialize_with = "lenient_f64", skip_serializing_if = "Option::is_none")]
    pub time_delta_seconds: Option<f64>,
}

/// Catalog entry for one track.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
#[serde(rename_all = "camelCase")]
pub struct TrackInfo {
    pub id: String,
    /// Display name
    pub name: String,
    /// Graphic resource name, e.g. "bahrain.svg"
    pub svg_file: String,
    #[serde(default)]
    pub corners: Vec<CornerDescriptor>,
}

impl TrackInfo {
    /// Corner numbers must be unique within a track.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::with_capacity(self.corners.len());
        for corner in &self.corners {
            if !seen.insert(corner.number) {
                return Err(PaddockError::parse_error(
                    format!("track {}", self.id),
                    format!("duplicate corner number {}", corner.number),
                ));
            }
        }
        Ok(())
    }

    pub fn corner(&self, number: u32) -> Option<&CornerDescriptor> {
        self.corners.iter().find(|corner| corner.number == number)
    }
}

/// Track identifier -> track metadata.
#[derive(Default, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct TrackCatalog {
    #[serde(default)]
    pub tracks: BTreeMap<String, TrackInfo>,
}

impl TrackCatalog {
    pub fn get(&self, track_id: &str) -> Option<&TrackInfo> {
        self.tracks.get(track_id)
    }

    /// Validate every track in the catalog.
    pub fn validate(&self) -> Result<()> {
        self.tracks.values().try_for_each(TrackInfo::validate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = r#"{
        "tracks": {
            "bahrain": {
                "id": "bahrain",
                "name": "Bahrain International Circuit",
                "svgFile": "bahrain.svg",
                "corners": [
                    {"number": 1, "type": "slow", "x": 120.5, "y": 88},
                    {"number": 4, "type": "medium", "x": 300, "y": 410},
                    {"number": 12, "type": "fast", "x": 512, "y": 64}
                ]
            }
        }
    }"#;

    #[test]
    fn parses_catalog_document() {
        let catalog: TrackCatalog = serde_json::from_str(CATALOG).unwrap();
        let track = catalog.get("bahrain").expect("bahrain present");
        assert_eq!(track.svg_file, "bahrain.svg");
        assert_eq!(track.corners.len(), 3);
        assert_eq!(track.corner(4).map(|c| c.severity), Some(CornerSeverity::Medium));
        assert!(catalog.validate().is_ok());
        assert!(catalog.get("monaco").is_none());
    }

    #[test]
    fn duplicate_corner_numbers_fail_validation() {
        let mut catalog: TrackCatalog = serde_json::from_str(CATALOG).unwrap();
        let track = catalog.tracks.get_mut("bahrain").unwrap();
        let duplicate = track.corners[0];
        track.corners.push(duplicate);

        let error = catalog.validate().unwrap_err();
        assert!(error.to_string().contains("duplicate corner number 1"));
    }

    #[test]
    fn severity_colors() {
        assert_eq!(CornerSeverity::Slow.color(), "#ef4444");
        assert_eq!(CornerSeverity::Medium.color(), "#f59e0b");
        assert_eq!(CornerSeverity::Fast.color(), "#10b981");
    }

    #[test]
    fn corner_telemetry_skips_absent_measurements() {
        let telemetry = CornerTelemetry {
            corner_number: 3,
            apex_speed_kph: Some(142.0),
            ..Default::default()
        };
        let json = serde_json::to_value(&telemetry).unwrap();
        assert_eq!(json, serde_json::json!({"cornerNumber": 3, "apexSpeedKph": 142.0}));
    }
}
