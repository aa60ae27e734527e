//! Lap records and lap classification flags

use serde::{Deserialize, Deserializer, Serialize};

use crate::serde_utils::{
    lenient_bool, lenient_f64, lenient_f64_seq, lenient_seq, lenient_string, lenient_text, lenient_u32,
};

/// Reason a lap was classified as unrepresentative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
#[serde(rename_all = "kebab-case")]
pub enum LapFlag {
    OutLap,
    InLap,
    SafetyCar,
    VirtualSafetyCar,
    YellowFlag,
    RedFlag,
    FormationLap,
    Deleted,
    Inaccurate,
    MissingLaptime,
    /// Flag written by a newer pipeline version
    #[serde(other)]
    Unknown,
}

impl LapFlag {
    /// Whether this flag excludes the lap from comparisons.
    pub fn is_outlier(self) -> bool {
        !matches!(self, LapFlag::Unknown)
    }
}

/// One competitor's timing data for one lap.
///
/// Fields are read leniently: a malformed value becomes `None` (or empty)
/// rather than failing the whole session document.
#[derive(Default, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
#[serde(rename_all = "camelCase")]
#[serde(default)]
pub struct LapRecord {
    /// Competitor code
    #[serde(deserialize_with = "lenient_text")]
    pub driver: String,
    /// Raw lap number as recorded; see [`LapRecord::lap`]
    #[serde(deserialize_with = "lenient_f64")]
    pub lap_number: Option<f64>,
    #[serde(deserialize_with = "lenient_u32")]
    pub stint: Option<u32>,
    #[serde(deserialize_with = "lenient_string")]
    pub compound: Option<String>,
    /// Tyre age in laps
    #[serde(deserialize_with = "lenient_u32")]
    pub tyre_life: Option<u32>,
    /// Lap time in seconds; `None` means no time, never zero
    #[serde(deserialize_with = "lenient_f64")]
    pub lap_time_seconds: Option<f64>,
    #[serde(deserialize_with = "lenient_f64_seq")]
    pub sector_times_seconds: Vec<Option<f64>>,
    #[serde(deserialize_with = "flag_or_false")]
    pub is_personal_best: bool,
    /// Track status digits active during the lap
    #[serde(deserialize_with = "lenient_string")]
    pub track_status: Option<String>,
    #[serde(deserialize_with = "lenient_bool", skip_serializing_if = "Option::is_none")]
    pub has_data: Option<bool>,
    #[serde(deserialize_with = "lenient_seq", skip_serializing_if = "Vec::is_empty")]
    pub flags: Vec<LapFlag>,
    /// Validity for comparison; absent means valid
    #[serde(deserialize_with = "lenient_bool", skip_serializing_if = "Option::is_none")]
    pub is_valid: Option<bool>,
}

impl LapRecord {
    /// Lap number usable for grouping; `None` when absent or not finite.
    pub fn lap(&self) -> Option<f64> {
        self.lap_number.filter(|number| number.is_finite())
    }

    /// Lap time in seconds when it is a finite number.
    pub fn lap_time(&self) -> Option<f64> {
        self.lap_time_seconds.filter(|seconds| seconds.is_finite())
    }

    /// Sector time by zero-based index, when recorded.
    pub fn sector_time(&self, index: usize) -> Option<f64> {
        self.sector_times_seconds.get(index).copied().flatten().filter(|s| s.is_finite())
    }

    /// A lap is an outlier only when explicitly marked invalid.
    pub fn is_outlier(&self) -> bool {
        self.is_valid == Some(false)
    }

    /// Outlier flags carried by this lap.
    pub fn outlier_flags(&self) -> impl Iterator<Item = LapFlag> + '_ {
        self.flags.iter().copied().filter(|flag| flag.is_outlier())
    }
}

fn flag_or_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_bool(deserializer)?.unwrap_or(false))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lap(json: &str) -> LapRecord {
        serde_json::from_str(json).expect("lap should deserialize")
    }

    #[test]
    fn parses_pipeline_lap() {
        let record = lap(r#"{
            "driver": "VER",
            "lapNumber": 12,
            "stint": 2,
            "compound": "SOFT",
            "tyreLife": 3,
            "lapTimeSeconds": 91.234,
            "sectorTimesSeconds": [28.1, 33.2, null],
            "isPersonalBest": true,
            "trackStatus": "1",
            "hasData": true,
            "flags": [],
            "isValid": true
        }"#);

        assert_eq!(record.lap(), Some(12.0));
        assert_eq!(record.lap_time(), Some(91.234));
        assert_eq!(record.sector_time(0), Some(28.1));
        assert_eq!(record.sector_time(2), None);
        assert_eq!(record.sector_time(7), None);
        assert!(record.is_personal_best);
        assert!(!record.is_outlier());
    }

    #[test]
    fn absent_validity_is_valid() {
        assert!(!lap(r#"{"driver": "NOR", "lapNumber": 3}"#).is_outlier());
        assert!(lap(r#"{"driver": "NOR", "lapNumber": 3, "isValid": false}"#).is_outlier());
    }

    #[test]
    fn only_non_finite_lap_numbers_are_unusable() {
        assert_eq!(lap(r#"{"lapNumber": null}"#).lap(), None);
        assert_eq!(lap(r#"{"lapNumber": "abc"}"#).lap(), None);
        assert_eq!(lap(r#"{"lapNumber": "NaN"}"#).lap(), None);
        assert_eq!(lap(r#"{"lapNumber": "-inf"}"#).lap(), None);
        assert_eq!(lap(r#"{"lapNumber": 4.5}"#).lap(), Some(4.5));
        assert_eq!(lap(r#"{"lapNumber": -1}"#).lap(), Some(-1.0));
        assert_eq!(lap(r#"{"lapNumber": "7"}"#).lap(), Some(7.0));
    }

    #[test]
    fn malformed_text_and_flag_fields_do_not_fail_the_lap() {
        let record = lap(r#"{
            "driver": null,
            "lapNumber": 2,
            "compound": 3,
            "trackStatus": 1,
            "hasData": "yes",
            "flags": ["in-lap", null, 4],
            "isValid": "false"
        }"#);
        assert_eq!(record.driver, "");
        assert_eq!(record.compound.as_deref(), Some("3"));
        assert_eq!(record.track_status.as_deref(), Some("1"));
        assert_eq!(record.has_data, None);
        assert_eq!(record.flags, vec![LapFlag::InLap]);
        assert_eq!(record.is_valid, None);
        assert!(!record.is_outlier());
    }

    #[test]
    fn non_finite_lap_times_are_no_time() {
        assert_eq!(lap(r#"{"lapTimeSeconds": "NaN"}"#).lap_time(), None);
        assert_eq!(lap(r#"{"lapTimeSeconds": "fast"}"#).lap_time(), None);
        assert_eq!(lap(r#"{"lapTimeSeconds": null}"#).lap_time(), None);
    }

    #[test]
    fn null_personal_best_reads_as_false() {
        assert!(!lap(r#"{"isPersonalBest": null}"#).is_personal_best);
        assert!(!lap(r#"{"isPersonalBest": 1}"#).is_personal_best);
    }

    #[test]
    fn flags_round_trip_kebab_case_and_tolerate_unknown() {
        let record = lap(r#"{"flags": ["out-lap", "virtual-safety-car", "pit-lane-speeding"]}"#);
        assert_eq!(
            record.flags,
            vec![LapFlag::OutLap, LapFlag::VirtualSafetyCar, LapFlag::Unknown]
        );
        assert_eq!(record.outlier_flags().count(), 2);

        let json = serde_json::to_value(LapFlag::MissingLaptime).unwrap();
        assert_eq!(json, serde_json::json!("missing-laptime"));
    }
}
