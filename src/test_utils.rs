//! Test utilities for building session records and on-disk fixtures
//!
//! Used by unit tests, integration tests and benchmarks so every suite builds
//! records the same way the data pipeline writes them.

#![cfg(any(test, feature = "benchmark"))]

use std::path::{Path, PathBuf};

use crate::types::{
    CornerDescriptor, CornerSeverity, CornerTelemetry, DriverEntry, LapRecord, SessionKey,
    SessionMeta, SessionRecord, TrackCatalog, TrackInfo,
};

/// Track graphic used by overlay fixtures: 1000 x 500 viewBox.
pub const SAMPLE_TRACK_SVG: &str = r##"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" width="1000" height="500" viewBox="0 0 1000 500" stroke-width="4">
  <path d="M 100 250 L 900 250" fill="none" stroke="#ffffff"/>
</svg>
"##;

/// Build a lap with a validity flag left absent.
pub fn lap(driver: &str, lap_number: u32, lap_time: Option<f64>) -> LapRecord {
    LapRecord {
        driver: driver.to_string(),
        lap_number: Some(lap_number as f64),
        lap_time_seconds: lap_time,
        sector_times_seconds: vec![None, None, None],
        ..Default::default()
    }
}

/// Build a lap explicitly marked valid or invalid.
pub fn lap_with_validity(
    driver: &str,
    lap_number: u32,
    lap_time: Option<f64>,
    is_valid: bool,
) -> LapRecord {
    LapRecord { is_valid: Some(is_valid), ..lap(driver, lap_number, lap_time) }
}

/// Fluent builder for [`SessionRecord`] fixtures.
#[derive(Debug, Clone)]
pub struct RecordBuilder {
    record: SessionRecord,
}

impl RecordBuilder {
    pub fn new(year: i32, round: &str, session: &str) -> Self {
        let record = SessionRecord {
            meta: SessionMeta {
                year,
                round: round.to_string(),
                session: session.to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        Self { record }
    }

    pub fn driver(mut self, code: &str, team: &str) -> Self {
        self.record.drivers.insert(
            code.to_string(),
            DriverEntry { code: code.to_string(), team: Some(team.to_string()), ..Default::default() },
        );
        self
    }

    pub fn lap(mut self, lap: LapRecord) -> Self {
        self.record.laps.push(lap);
        self
    }

    pub fn corners(mut self, code: &str, corners: Vec<CornerTelemetry>) -> Self {
        self.record.corners.insert(code.to_string(), corners);
        self
    }

    pub fn note(mut self, note: &str) -> Self {
        self.record.notes.push(note.to_string());
        self
    }

    pub fn build(self) -> SessionRecord {
        self.record
    }
}

/// A qualifying-style record with `drivers` competitors and `laps` laps each.
///
/// Every fifth lap is marked invalid so outlier handling is exercised.
pub fn synthetic_session(drivers: usize, laps: u32) -> SessionRecord {
    let mut builder = RecordBuilder::new(2025, "bahrain", "R");
    for index in 0..drivers {
        let code = driver_code(index);
        builder = builder.driver(&code, "Test Team");
        for lap_number in 1..=laps {
            let time = 90.0 + index as f64 * 0.137 + (lap_number % 7) as f64 * 0.05;
            builder = builder.lap(lap_with_validity(&code, lap_number, Some(time), lap_number % 5 != 0));
        }
    }
    builder.build()
}

/// Deterministic three-letter code for fixture index `index`.
pub fn driver_code(index: usize) -> String {
    let letters = [b'A' + (index / 676 % 26) as u8, b'A' + (index / 26 % 26) as u8, b'A' + (index % 26) as u8];
    String::from_utf8_lossy(&letters).into_owned()
}

/// Catalog with a single "sample" track pointing at `sample.svg`.
pub fn sample_catalog() -> TrackCatalog {
    let mut catalog = TrackCatalog::default();
    catalog.tracks.insert(
        "sample".to_string(),
        TrackInfo {
            id: "sample".to_string(),
            name: "Sample Circuit".to_string(),
            svg_file: "sample.svg".to_string(),
            corners: vec![
                CornerDescriptor { number: 1, severity: CornerSeverity::Slow, x: 500.0, y: 250.0 },
                CornerDescriptor { number: 2, severity: CornerSeverity::Fast, x: 880.0, y: 120.0 },
            ],
        },
    );
    catalog
}

/// Write `record` where the filesystem session source expects it.
pub fn write_session_fixture(
    sessions_root: &Path,
    key: &SessionKey,
    record: &SessionRecord,
) -> std::io::Result<PathBuf> {
    let dir = sessions_root.join(key.year.to_string()).join(&key.round).join(&key.session);
    std::fs::create_dir_all(&dir)?;
    let path = dir.join("session.json");
    let json = serde_json::to_string_pretty(record).map_err(std::io::Error::other)?;
    std::fs::write(&path, json)?;
    Ok(path)
}
