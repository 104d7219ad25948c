//! Parsing of the live "latest measures" feed.

use crate::loaders::error::DataLoadError;
use crate::types::station::LatestMeasure;
use log::{debug, warn};
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct MeasuresResponse {
    #[serde(default)]
    items: Vec<MeasureItem>,
}

#[derive(Debug, Deserialize)]
struct MeasureItem {
    #[serde(rename = "stationReference")]
    station_reference: Option<String>,
    #[serde(rename = "latestReading")]
    latest_reading: Option<Value>,
}

impl MeasureItem {
    fn into_measure(self) -> Option<LatestMeasure> {
        let value = self
            .latest_reading
            .as_ref()
            .and_then(|reading| reading.get("value"))
            .and_then(Value::as_f64)?;
        Some(LatestMeasure {
            station_reference: self.station_reference?,
            value,
        })
    }
}

/// Extracts `(stationReference, latestReading.value)` pairs from a measures document.
///
/// Items without a station reference or with a non-numeric reading are dropped.
pub fn parse_measures_json(bytes: &[u8]) -> Result<Vec<LatestMeasure>, DataLoadError> {
    let response: MeasuresResponse = serde_json::from_slice(bytes)?;
    let total = response.items.len();
    let measures: Vec<LatestMeasure> = response
        .items
        .into_iter()
        .filter_map(MeasureItem::into_measure)
        .collect();

    if measures.len() < total {
        warn!(
            "Dropped {} of {} measures without a numeric latest reading",
            total - measures.len(),
            total
        );
    }
    debug!("Parsed {} latest measures", measures.len());
    Ok(measures)
}

pub fn read_measures_json(path: &Path) -> Result<Vec<LatestMeasure>, DataLoadError> {
    let bytes = std::fs::read(path).map_err(|e| DataLoadError::FileRead(path.to_path_buf(), e))?;
    parse_measures_json(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_measures_skips_unusable_items() -> Result<(), DataLoadError> {
        let json = br#"{
            "@context": "ignored",
            "items": [
                {"stationReference": "E2043", "latestReading": {"value": 0.652, "dateTime": "2024-01-01T00:00:00Z"}},
                {"stationReference": "E7050", "latestReading": {"value": [0.1, 0.2]}},
                {"stationReference": "E9999"},
                {"latestReading": {"value": 1.0}},
                {"stationReference": "0240120", "latestReading": {"value": 2}}
            ]
        }"#;
        let measures = parse_measures_json(json)?;
        assert_eq!(
            measures,
            vec![
                LatestMeasure {
                    station_reference: "E2043".to_string(),
                    value: 0.652
                },
                LatestMeasure {
                    station_reference: "0240120".to_string(),
                    value: 2.0
                },
            ]
        );
        Ok(())
    }

    #[test]
    fn test_reading_given_as_url_is_dropped() -> Result<(), DataLoadError> {
        let json = br#"{"items": [{"stationReference": "A", "latestReading": "http://example/readings/1"}]}"#;
        assert!(parse_measures_json(json)?.is_empty());
        Ok(())
    }

    #[test]
    fn test_malformed_document_is_an_error() {
        let err = parse_measures_json(b"{\"items\": [").unwrap_err();
        assert!(matches!(err, DataLoadError::JsonParse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = read_measures_json(Path::new("/nonexistent/measures.json")).unwrap_err();
        assert!(matches!(err, DataLoadError::FileRead(..)));
    }
}
