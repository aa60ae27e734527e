//! Session record filtering by competitor code
//!
//! Restricts a [`SessionRecord`] to the requested competitors and records
//! which requested codes were found or missing. Absence never fails; it is
//! reported through `meta` and `notes`.

use std::collections::BTreeSet;
use tracing::debug;

use crate::types::SessionRecord;

/// Note appended when no requested competitor exists in the dataset.
pub const NO_MATCH_NOTE: &str = "No drivers matched the current filter.";

/// Split a comma-separated driver query into normalised codes.
///
/// Codes are trimmed and upper-cased; empty entries are dropped.
///
/// ```rust
/// use paddock::filter::parse_driver_codes;
///
/// assert_eq!(parse_driver_codes(Some(" ver, nor,,")), vec!["VER", "NOR"]);
/// assert!(parse_driver_codes(None).is_empty());
/// ```
pub fn parse_driver_codes(raw: Option<&str>) -> Vec<String> {
    raw.map(|raw| {
        raw.split(',')
            .map(|code| code.trim().to_uppercase())
            .filter(|code| !code.is_empty())
            .collect()
    })
    .unwrap_or_default()
}

/// Restrict `record` to the requested competitor codes.
///
/// With no requested codes the record is returned untouched. Otherwise the
/// codes are upper-cased and matched against `record.drivers`; `drivers`,
/// `laps` and `corners` keep only matched competitors (lap order preserved),
/// `meta` gains the requested/matched/missing lists and advisory notes are
/// appended after any existing ones.
pub fn filter_session<S: AsRef<str>>(record: SessionRecord, requested: &[S]) -> SessionRecord {
    if requested.is_empty() {
        return record;
    }

    let requested: Vec<String> =
        requested.iter().map(|code| code.as_ref().trim().to_uppercase()).collect();
    let requested_set: BTreeSet<&str> = requested.iter().map(String::as_str).collect();

    let SessionRecord { mut meta, drivers, laps, corners, mut notes } = record;

    let found: BTreeSet<String> =
        drivers.keys().filter(|code| requested_set.contains(code.as_str())).cloned().collect();
    let missing: Vec<String> =
        requested.iter().filter(|code| !found.contains(code.as_str())).cloned().collect();

    let drivers = drivers.into_iter().filter(|(code, _)| found.contains(code)).collect();
    let laps = laps.into_iter().filter(|lap| found.contains(&lap.driver)).collect();
    let corners = corners.into_iter().filter(|(code, _)| found.contains(code)).collect();

    if !missing.is_empty() {
        debug!(missing = ?missing, "Requested drivers missing from dataset");
        notes.push(format!("Drivers not found in dataset: {}", missing.join(", ")));
    }
    if found.is_empty() {
        notes.push(NO_MATCH_NOTE.to_string());
    }

    meta.requested_drivers = Some(requested);
    meta.filtered_drivers = Some(found.into_iter().collect());
    meta.missing_drivers = Some(missing);

    SessionRecord { meta, drivers, laps, corners, notes }
}
