//! Corner-by-corner comparison table
//!
//! Rows come from the track's corner descriptors, columns from the selected
//! competitors. A cell holds that competitor's telemetry for the corner when
//! the session has it.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::types::{CornerDescriptor, CornerSeverity, CornerTelemetry};

/// Shown instead of the table when the session carries no corner telemetry.
pub const NO_CORNER_DATA_NOTE: &str = "Live corner telemetry is not yet generated for this session.";

/// One competitor's entry in a corner row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
#[serde(rename_all = "camelCase")]
pub struct CornerCell {
    pub driver: String,
    pub telemetry: Option<CornerTelemetry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
#[serde(rename_all = "camelCase")]
pub struct CornerRow {
    pub number: u32,
    pub severity: CornerSeverity,
    /// One cell per selected competitor, in selection order
    pub cells: Vec<CornerCell>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
#[serde(rename_all = "camelCase")]
pub struct CornerTable {
    pub has_corner_data: bool,
    /// Column headers, upper-cased
    pub drivers: Vec<String>,
    /// Empty when `has_corner_data` is false
    pub rows: Vec<CornerRow>,
}

impl CornerTable {
    pub fn build<S: AsRef<str>>(
        corners: &BTreeMap<String, Vec<CornerTelemetry>>,
        descriptors: &[CornerDescriptor],
        selected: &[S],
    ) -> Self {
        let drivers: Vec<String> = selected.iter().map(|code| code.as_ref().to_uppercase()).collect();
        let has_corner_data = corners.values().any(|entries| !entries.is_empty());
        if !has_corner_data {
            return Self { has_corner_data, drivers, rows: Vec::new() };
        }

        let rows = descriptors
            .iter()
            .map(|descriptor| CornerRow {
                number: descriptor.number,
                severity: descriptor.severity,
                cells: drivers
                    .iter()
                    .map(|driver| CornerCell {
                        driver: driver.clone(),
                        telemetry: corners
                            .get(driver)
                            .and_then(|entries| {
                                entries.iter().find(|entry| entry.corner_number == descriptor.number)
                            })
                            .cloned(),
                    })
                    .collect(),
            })
            .collect();

        Self { has_corner_data, drivers, rows }
    }
}
