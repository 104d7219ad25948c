//! Defines the monitoring station records supplied by the station metadata
//! collaborator, and the live measures that refresh their readings.

use crate::types::xyz::XyzRecord;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// --- Data Structures ---

/// Represents a single river level or rainfall monitoring station.
///
/// Field names follow the columns of the station tables (`stationReference`,
/// `lat`, `long`, `typicalRangeHigh`, `latestReading`).
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct StationRecord {
    /// The station reference used by the flood-monitoring service (e.g., "E2043").
    #[serde(rename = "stationReference")]
    pub station_reference: String,
    /// Latitude in decimal degrees.
    pub lat: f64,
    /// Longitude in decimal degrees.
    pub long: f64,
    /// Upper bound of the typical stage range, in metres. Only meaningful for level stations.
    #[serde(rename = "typicalRangeHigh")]
    pub typical_range_high: Option<f64>,
    /// The most recent reading known for the station, if any.
    #[serde(rename = "latestReading")]
    pub latest_reading: Option<f64>,
}

/// The latest value reported for one station by the live measures feed.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct LatestMeasure {
    pub station_reference: String,
    pub value: f64,
}

impl StationRecord {
    /// River stage relative to the top of the typical range.
    ///
    /// `None` when the reading or the typical range is missing, or when the typical range
    /// is not a positive number.
    pub fn river_value(&self) -> Option<f64> {
        let reading = self.latest_reading?;
        let high = self.typical_range_high?;
        if high > 0.0 && high.is_finite() && reading.is_finite() {
            Some(reading / high)
        } else {
            None
        }
    }

    /// Rainfall is used as reported.
    pub fn rain_value(&self) -> Option<f64> {
        self.latest_reading.filter(|v| v.is_finite())
    }

    fn located(&self, value: Option<f64>) -> Option<XyzRecord> {
        value.map(|z| XyzRecord::new(self.long, self.lat, z))
    }
}

/// Scattered `(long, lat, river_value)` readings for every station that has one.
pub fn river_readings(stations: &[StationRecord]) -> Vec<XyzRecord> {
    stations
        .iter()
        .filter_map(|s| s.located(s.river_value()))
        .collect()
}

/// Scattered `(long, lat, rainfall)` readings for every station that has one.
pub fn rain_readings(stations: &[StationRecord]) -> Vec<XyzRecord> {
    stations
        .iter()
        .filter_map(|s| s.located(s.rain_value()))
        .collect()
}

/// Overwrites `latest_reading` with the live value for every station that has one.
///
/// Stations without a live measure keep their stored reading. Returns the number of
/// stations that were updated.
pub fn apply_latest_readings(stations: &mut [StationRecord], measures: &[LatestMeasure]) -> usize {
    let latest: HashMap<&str, f64> = measures
        .iter()
        .map(|m| (m.station_reference.as_str(), m.value))
        .collect();

    let mut updated = 0;
    for station in stations.iter_mut() {
        if let Some(value) = latest.get(station.station_reference.as_str()) {
            station.latest_reading = Some(*value);
            updated += 1;
        }
    }
    updated
}
