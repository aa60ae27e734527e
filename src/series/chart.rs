//! Chart display state derived from the session load and the selection

use serde::Serialize;

use super::{AxisRange, ChartDatum, axis_range, build_lap_series};
use crate::loader::LoadState;
use crate::types::SessionRecord;

/// Number of drivers charted when none of the selection is in the dataset.
pub const DEFAULT_FALLBACK_DRIVERS: usize = 4;

/// What the lap time chart should show.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum ChartState {
    /// No session requested yet
    AwaitingSession,
    /// Session fetch in flight
    Loading,
    /// Session fetch failed; the message keeps the underlying reason
    Failed { message: String },
    /// Session loaded but no competitors are selected
    NoSelection { available: Vec<String> },
    /// None of the selected competitors exist in the session
    SelectionUnavailable { available: Vec<String> },
    /// Selected competitors exist but have no usable laps
    NoLapTimes { drivers: Vec<String> },
    Ready {
        drivers: Vec<String>,
        series: Vec<ChartDatum>,
        /// `None` lets the chart auto-scale
        range: Option<AxisRange>,
    },
}

impl ChartState {
    /// Derive the chart state for the current session load.
    pub fn derive<S: AsRef<str>>(
        session: &LoadState<SessionRecord>,
        selected: &[S],
        include_outliers: bool,
        fallback_count: usize,
    ) -> Self {
        match session {
            LoadState::Idle => ChartState::AwaitingSession,
            LoadState::Loading => ChartState::Loading,
            LoadState::Failed(error) => ChartState::Failed { message: error.detailed_message() },
            LoadState::Ready(record) => {
                Self::from_record(record, selected, include_outliers, fallback_count)
            }
        }
    }

    /// Derive the chart state for a loaded record.
    pub fn from_record<S: AsRef<str>>(
        record: &SessionRecord,
        selected: &[S],
        include_outliers: bool,
        fallback_count: usize,
    ) -> Self {
        let selected: Vec<String> = selected.iter().map(|c| c.as_ref().to_uppercase()).collect();
        let available = record.available_drivers();

        if selected.is_empty() {
            return ChartState::NoSelection { available };
        }

        let drivers = drivers_to_display(record, &selected, fallback_count);
        if !drivers.iter().any(|code| selected.contains(code)) {
            return ChartState::SelectionUnavailable { available };
        }

        let series = build_lap_series(Some(record), &drivers, include_outliers);
        if series.is_empty() {
            return ChartState::NoLapTimes { drivers };
        }

        let range = axis_range(&series, &drivers);
        ChartState::Ready { drivers, series, range }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, ChartState::Ready { .. })
    }
}

/// Competitors to chart: the selected codes present in the record, or the
/// first `fallback_count` available competitors when none are.
pub fn drivers_to_display<S: AsRef<str>>(
    record: &SessionRecord,
    selected: &[S],
    fallback_count: usize,
) -> Vec<String> {
    let present: Vec<String> = selected
        .iter()
        .map(|code| code.as_ref().to_uppercase())
        .filter(|code| record.drivers.contains_key(code))
        .collect();

    if present.is_empty() {
        record.available_drivers().into_iter().take(fallback_count).collect()
    } else {
        present
    }
}

/// "91.234 s", or "-" when there is no usable time.
pub fn format_lap_time(value: Option<f64>) -> String {
    match value {
        Some(seconds) if seconds.is_finite() => format!("{seconds:.3} s"),
        _ => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PaddockError;
    use crate::test_utils::{RecordBuilder, lap, lap_with_validity};
    use std::sync::Arc;

    fn record() -> SessionRecord {
        RecordBuilder::new(2025, "bahrain", "Q")
            .driver("VER", "Red Bull Racing")
            .driver("NOR", "McLaren")
            .driver("LEC", "Ferrari")
            .lap(lap("VER", 1, Some(91.234)))
            .lap(lap("NOR", 1, Some(91.900)))
            .lap(lap_with_validity("LEC", 1, Some(95.0), false))
            .build()
    }

    #[test]
    fn load_states_map_to_distinct_chart_states() {
        let selected = ["VER"];
        assert_eq!(
            ChartState::derive(&LoadState::Idle, &selected, false, 4),
            ChartState::AwaitingSession
        );
        assert_eq!(ChartState::derive(&LoadState::Loading, &selected, false, 4), ChartState::Loading);

        let failed = LoadState::Failed(Arc::new(PaddockError::unknown_track("atlantis")));
        assert_eq!(
            ChartState::derive(&failed, &selected, false, 4),
            ChartState::Failed { message: "Unknown track: atlantis".to_string() }
        );
    }

    #[test]
    fn ready_with_series_and_range() {
        let state = ChartState::derive(&LoadState::Ready(Arc::new(record())), &["ver", "NOR"], false, 4);
        let ChartState::Ready { drivers, series, range } = &state else {
            panic!("expected ready chart, got {state:?}");
        };
        assert_eq!(drivers, &vec!["VER".to_string(), "NOR".to_string()]);
        assert_eq!(series.len(), 1);
        assert!(range.is_some());
    }

    #[test]
    fn empty_selection_is_distinct_from_unavailable_selection() {
        let record = record();
        assert_eq!(
            ChartState::from_record(&record, &[] as &[&str], false, 4),
            ChartState::NoSelection { available: vec!["LEC".into(), "NOR".into(), "VER".into()] }
        );
        assert!(matches!(
            ChartState::from_record(&record, &["HAM"], false, 4),
            ChartState::SelectionUnavailable { .. }
        ));
    }

    #[test]
    fn selected_driver_with_only_outlier_laps_has_no_lap_times() {
        let state = ChartState::from_record(&record(), &["LEC"], false, 4);
        assert_eq!(state, ChartState::NoLapTimes { drivers: vec!["LEC".into()] });

        assert!(ChartState::from_record(&record(), &["LEC"], true, 4).is_ready());
    }

    #[test]
    fn display_falls_back_to_first_available() {
        let record = record();
        assert_eq!(drivers_to_display(&record, &["HAM"], 2), vec!["LEC", "NOR"]);
        assert_eq!(drivers_to_display(&record, &["nor", "HAM"], 2), vec!["NOR"]);
    }

    #[test]
    fn lap_time_formatting() {
        assert_eq!(format_lap_time(Some(91.2344)), "91.234 s");
        assert_eq!(format_lap_time(Some(90.0)), "90.000 s");
        assert_eq!(format_lap_time(None), "-");
        assert_eq!(format_lap_time(Some(f64::NAN)), "-");
    }
}
