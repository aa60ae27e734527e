//! Session record structures
//!
//! A [`SessionRecord`] is produced per request by the external data pipeline
//! and is never mutated here; filtering builds a new record.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;

use super::{CornerTelemetry, LapRecord};
use crate::serde_utils::{
    lenient_record_lists, lenient_record_map, lenient_records, lenient_seq, lenient_string, lenient_text,
    lenient_u32,
};

/// Address of one session dataset: season, round slug and session code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct SessionKey {
    /// Championship year
    pub year: i32,
    /// Round slug matching the track catalog (e.g. "bahrain")
    pub round: String,
    /// Session code (FP1, FP2, FP3, SQ, S, Q, R)
    pub session: String,
}

impl SessionKey {
    /// Create a key; the session code is upper-cased.
    pub fn new(year: i32, round: impl Into<String>, session: impl AsRef<str>) -> Self {
        Self { year, round: round.into(), session: session.as_ref().trim().to_uppercase() }
    }
}

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.year, self.round, self.session)
    }
}

/// Event details attached to the session metadata.
#[derive(Default, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
#[serde(rename_all = "camelCase")]
#[serde(default)]
pub struct EventInfo {
    /// Event name (e.g. "Bahrain Grand Prix")
    pub name: Option<String>,
    /// Host country
    pub country: Option<String>,
    /// Official event name
    pub official_name: Option<String>,
}

/// Session metadata, including the filter bookkeeping added per request.
#[derive(Default, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
#[serde(rename_all = "camelCase")]
#[serde(default)]
pub struct SessionMeta {
    pub year: i32,
    pub round: String,
    pub session: String,
    /// ISO-8601 generation timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<String>,
    /// Codes requested by the last filter, normalised
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requested_drivers: Option<Vec<String>>,
    /// Requested codes present in the dataset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filtered_drivers: Option<Vec<String>>,
    /// Requested codes absent from the dataset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missing_drivers: Option<Vec<String>>,
    /// Pipeline fetch status ("ok", "error", ...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event: Option<EventInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_drivers: Option<Vec<String>>,
    #[serde(deserialize_with = "lenient_u32", skip_serializing_if = "Option::is_none")]
    pub total_lap_count: Option<u32>,
    #[serde(deserialize_with = "lenient_u32", skip_serializing_if = "Option::is_none")]
    pub valid_lap_count: Option<u32>,
    #[serde(deserialize_with = "lenient_u32", skip_serializing_if = "Option::is_none")]
    pub outlier_lap_count: Option<u32>,
}

/// Competitor descriptor keyed by code in [`SessionRecord::drivers`].
#[derive(Default, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
#[serde(rename_all = "camelCase")]
#[serde(default)]
pub struct DriverEntry {
    #[serde(deserialize_with = "lenient_text")]
    pub code: String,
    #[serde(deserialize_with = "lenient_string")]
    pub team: Option<String>,
    /// Car number
    #[serde(deserialize_with = "lenient_u32")]
    pub number: Option<u32>,
    /// Tyre compound of the first recorded lap
    #[serde(deserialize_with = "lenient_string")]
    pub default_compound: Option<String>,
}

/// Complete timing record for one session.
///
/// Unreadable laps, driver entries, corner entries and notes are dropped
/// while reading, so one malformed entry never loses the session.
#[derive(Default, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
#[serde(default)]
pub struct SessionRecord {
    pub meta: SessionMeta,
    /// Competitor code -> descriptor
    #[serde(deserialize_with = "lenient_record_map")]
    pub drivers: BTreeMap<String, DriverEntry>,
    #[serde(deserialize_with = "lenient_records")]
    pub laps: Vec<LapRecord>,
    /// Competitor code -> per-corner telemetry (may be empty)
    #[serde(deserialize_with = "lenient_record_lists")]
    pub corners: BTreeMap<String, Vec<CornerTelemetry>>,
    /// Human-readable advisory notes
    #[serde(deserialize_with = "lenient_seq")]
    pub notes: Vec<String>,
}

impl SessionRecord {
    /// Driver codes present in the dataset, upper-cased.
    ///
    /// Ordered as the pipeline listed them in `meta.availableDrivers`, then
    /// by first lap, then alphabetically for drivers without laps.
    pub fn available_drivers(&self) -> Vec<String> {
        let listed = self.meta.available_drivers.iter().flatten().map(String::as_str);
        let lapped = self.laps.iter().map(|lap| lap.driver.as_str());
        let keyed = self.drivers.keys().map(String::as_str);

        let mut seen = HashSet::with_capacity(self.drivers.len());
        listed
            .chain(lapped)
            .chain(keyed)
            .filter(|code| self.drivers.contains_key(*code) && seen.insert(*code))
            .map(str::to_uppercase)
            .collect()
    }

    /// Whether any competitor has corner telemetry.
    pub fn has_corner_data(&self) -> bool {
        self.corners.values().any(|entries| !entries.is_empty())
    }

    /// Lap counts for the session summary line.
    ///
    /// Uses the counts recorded in `meta` when the pipeline provided them,
    /// otherwise counts the laps present in this record.
    pub fn lap_summary(&self) -> LapSummary {
        let computed = || {
            let total = self.laps.len() as u32;
            let outliers = self.laps.iter().filter(|lap| lap.is_outlier()).count() as u32;
            LapSummary { total, valid: total - outliers, outliers }
        };

        match (self.meta.total_lap_count, self.meta.valid_lap_count) {
            (Some(total), Some(valid)) => LapSummary {
                total,
                valid,
                outliers: self.meta.outlier_lap_count.unwrap_or(total.saturating_sub(valid)),
            },
            _ => computed(),
        }
    }
}

/// Valid/outlier lap counts for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct LapSummary {
    pub total: u32,
    pub valid: u32,
    pub outliers: u32,
}

impl LapSummary {
    /// "42 valid laps / 50"
    pub fn label(&self) -> String {
        format!("{} valid laps / {}", self.valid, self.total)
    }
}
