//! Core data types for session records, tracks and calendars.
//!
//! These types mirror the JSON documents produced by the session data
//! pipeline and the static track/calendar documents shipped with the app.
//!
//! ## Architecture
//!
//! - [`SessionRecord`] is one session's timing data: metadata, drivers, laps, corners, notes
//! - [`LapRecord`] is one competitor's timing for one lap, with lenient numeric fields
//! - [`TrackCatalog`] maps track identifiers to graphics and [`CornerDescriptor`]s
//! - [`Calendar`] lists the rounds of one season
//!
//! Records are immutable once loaded; every derived structure (filtered
//! records, chart series, overlays) is built fresh from them.
//!
//! ## Usage Example
//!
//! ```rust
//! use paddock::types::SessionRecord;
//!
//! let json = r#"{
//!     "meta": {"year": 2025, "round": "bahrain", "session": "Q"},
//!     "drivers": {"VER": {"code": "VER", "team": "Red Bull Racing", "number": 1}},
//!     "laps": [{"driver": "VER", "lapNumber": 1, "lapTimeSeconds": 91.234, "isValid": true}]
//! }"#;
//!
//! let record: SessionRecord = serde_json::from_str(json).unwrap();
//! assert_eq!(record.laps[0].lap(), Some(1.0));
//! assert_eq!(record.lap_summary().valid, 1);
//! ```

mod calendar;
mod lap;
mod session;
mod track;

pub use calendar::{Calendar, RoundInfo};
pub use lap::{LapFlag, LapRecord};
pub use session::{DriverEntry, EventInfo, LapSummary, SessionKey, SessionMeta, SessionRecord};
pub use track::{CornerDescriptor, CornerSeverity, CornerTelemetry, TrackCatalog, TrackInfo};
