//! Lap time series construction for charting.
//!
//! Turns the irregular per-lap records of a [`SessionRecord`] into one
//! [`ChartDatum`] per lap number, each holding a value (or an explicit gap)
//! for every selected competitor seen on that lap.
//!
//! ```text
//! laps ──► selection / outlier / lap-number checks ──► group by lap ──► sort
//!                                                          │
//!                                        DuplicateLapPolicy┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use paddock::series::{axis_range, build_lap_series};
//! use paddock::types::SessionRecord;
//!
//! let record: SessionRecord = serde_json::from_str(r#"{
//!     "drivers": {"VER": {"code": "VER"}, "NOR": {"code": "NOR"}},
//!     "laps": [
//!         {"driver": "VER", "lapNumber": 1, "lapTimeSeconds": 91.234, "isValid": true},
//!         {"driver": "NOR", "lapNumber": 1, "lapTimeSeconds": 91.900, "isValid": true}
//!     ]
//! }"#).unwrap();
//!
//! let series = build_lap_series(Some(&record), &["VER", "NOR"], false);
//! assert_eq!(series.len(), 1);
//! assert_eq!(series[0].time("VER"), Some(91.234));
//!
//! let range = axis_range(&series, &["VER", "NOR"]).unwrap();
//! assert!((range.min - 90.934).abs() < 1e-9);
//! assert!((range.max - 92.2).abs() < 1e-9);
//! ```

mod chart;
mod range;

pub use chart::{ChartState, DEFAULT_FALLBACK_DRIVERS, drivers_to_display, format_lap_time};
pub use range::{AxisRange, MIN_PADDING_SECONDS, PADDING_RATIO, axis_range};

use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashSet};
use std::collections::btree_map::Entry;
use tracing::trace;

use crate::types::SessionRecord;

/// All selected competitors' times for one lap number.
///
/// Serializes flat, e.g. `{"lapNumber": 1, "VER": 91.234, "NOR": null}`.
/// Lap numbers are any finite value the pipeline wrote, fractional and
/// negative ones included.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
#[serde(rename_all = "camelCase")]
pub struct ChartDatum {
    #[serde(serialize_with = "serialize_lap_number")]
    pub lap_number: f64,
    /// Upper-cased competitor code -> lap time; `None` marks a gap
    #[serde(flatten)]
    pub times: BTreeMap<String, Option<f64>>,
}

impl ChartDatum {
    fn new(lap_number: f64) -> Self {
        Self { lap_number, times: BTreeMap::new() }
    }

    /// Time for `code` (case-insensitive) when present and numeric.
    pub fn time(&self, code: &str) -> Option<f64> {
        self.times.get(&code.to_uppercase()).copied().flatten()
    }

    /// Whether `code` appears on this lap, with or without a time.
    pub fn has_entry(&self, code: &str) -> bool {
        self.times.contains_key(&code.to_uppercase())
    }
}

/// Whole lap numbers serialize as integers (`1`, not `1.0`).
fn serialize_lap_number<S: Serializer>(lap_number: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if lap_number.fract() == 0.0 && lap_number.abs() < i64::MAX as f64 {
        serializer.serialize_i64(*lap_number as i64)
    } else {
        serializer.serialize_f64(*lap_number)
    }
}

/// Finite lap number with a total order, for grouping.
#[derive(Debug, Clone, Copy)]
struct LapKey(f64);

impl LapKey {
    fn new(lap_number: f64) -> Self {
        // -0.0 and 0.0 are the same lap
        Self(if lap_number == 0.0 { 0.0 } else { lap_number })
    }
}

impl PartialEq for LapKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for LapKey {}

impl PartialOrd for LapKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for LapKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// How repeated entries for the same competitor and lap number are merged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DuplicateLapPolicy {
    /// The entry encountered last replaces earlier ones
    #[default]
    LastWins,
    /// The entry encountered first is kept
    FirstWins,
    /// The fastest numeric time is kept; a time always beats a gap
    Fastest,
}

impl DuplicateLapPolicy {
    fn merge(self, existing: Option<f64>, incoming: Option<f64>) -> Option<f64> {
        match self {
            DuplicateLapPolicy::LastWins => incoming,
            DuplicateLapPolicy::FirstWins => existing,
            DuplicateLapPolicy::Fastest => match (existing, incoming) {
                (Some(a), Some(b)) => Some(a.min(b)),
                (a, b) => a.or(b),
            },
        }
    }
}

/// Configurable lap series builder.
///
/// Pure: holds only its configuration, so one builder can be reused for
/// any number of records.
#[derive(Debug, Clone)]
pub struct SeriesBuilder {
    selection: HashSet<String>,
    include_outliers: bool,
    duplicates: DuplicateLapPolicy,
}

impl SeriesBuilder {
    /// Builder for the given competitor codes (case-insensitive).
    pub fn new<S: AsRef<str>>(selected: &[S]) -> Self {
        Self {
            selection: selected.iter().map(|code| code.as_ref().to_uppercase()).collect(),
            include_outliers: false,
            duplicates: DuplicateLapPolicy::default(),
        }
    }

    /// Keep laps whose validity flag is explicitly false.
    pub fn include_outliers(mut self, include: bool) -> Self {
        self.include_outliers = include;
        self
    }

    pub fn duplicates(mut self, policy: DuplicateLapPolicy) -> Self {
        self.duplicates = policy;
        self
    }

    /// Build the series, ascending by lap number with one datum per lap.
    pub fn build(&self, record: &SessionRecord) -> Vec<ChartDatum> {
        if self.selection.is_empty() {
            return Vec::new();
        }

        let mut by_lap: BTreeMap<LapKey, ChartDatum> = BTreeMap::new();
        let mut skipped = 0usize;

        for lap in &record.laps {
            let driver = lap.driver.to_uppercase();
            if !self.selection.contains(&driver) {
                continue;
            }
            if !self.include_outliers && lap.is_outlier() {
                skipped += 1;
                continue;
            }
            let Some(lap_number) = lap.lap() else {
                skipped += 1;
                continue;
            };

            let key = LapKey::new(lap_number);
            let datum = by_lap.entry(key).or_insert_with(|| ChartDatum::new(key.0));
            match datum.times.entry(driver) {
                Entry::Vacant(slot) => {
                    slot.insert(lap.lap_time());
                }
                Entry::Occupied(mut slot) => {
                    let merged = self.duplicates.merge(*slot.get(), lap.lap_time());
                    slot.insert(merged);
                }
            }
        }

        trace!(laps = by_lap.len(), skipped, "Built lap series");
        by_lap.into_values().collect()
    }
}

/// Build a lap series with the default duplicate policy.
///
/// Returns an empty series when there is no record or no selection.
pub fn build_lap_series<S: AsRef<str>>(
    record: Option<&SessionRecord>,
    selected: &[S],
    include_outliers: bool,
) -> Vec<ChartDatum> {
    match record {
        Some(record) => SeriesBuilder::new(selected).include_outliers(include_outliers).build(record),
        None => Vec::new(),
    }
}
