//! CSV adapters for the gridded `x,y,z` tables and the station metadata tables.

use crate::loaders::error::DataLoadError;
use crate::types::station::StationRecord;
use crate::types::xyz::XyzRecord;
use log::{info, warn};
use polars::prelude::*;
use std::path::Path;
use std::sync::Arc;
use tokio::task;

/// Station references such as `0240120` must not be inferred as integers.
fn station_schema() -> SchemaRef {
    Arc::new(Schema::from_iter([Field::new(
        "stationReference".into(),
        DataType::String,
    )]))
}

fn read_csv(path: &Path, schema_overwrite: Option<SchemaRef>) -> Result<DataFrame, DataLoadError> {
    CsvReadOptions::default()
        .with_has_header(true)
        .with_schema_overwrite(schema_overwrite)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| DataLoadError::CsvRead {
            path: path.to_path_buf(),
            source: e,
        })?
        .finish()
        .map_err(|e| DataLoadError::CsvRead {
            path: path.to_path_buf(),
            source: e,
        })
}

fn typed_column(
    df: &DataFrame,
    name: &str,
    data_type: &DataType,
    path: &Path,
) -> Result<Option<Column>, DataLoadError> {
    let Ok(column) = df.column(name) else {
        return Ok(None);
    };
    column
        .cast(data_type)
        .map(Some)
        .map_err(|e| DataLoadError::ColumnType {
            path: path.to_path_buf(),
            column: name.to_string(),
            source: e,
        })
}

fn required(column: Option<Column>, name: &str, path: &Path) -> Result<Column, DataLoadError> {
    column.ok_or_else(|| DataLoadError::MissingColumn {
        path: path.to_path_buf(),
        column: name.to_string(),
    })
}

fn float_values(column: &Column, name: &str, path: &Path) -> Result<Float64Chunked, DataLoadError> {
    column
        .f64()
        .cloned()
        .map_err(|e| DataLoadError::ColumnType {
            path: path.to_path_buf(),
            column: name.to_string(),
            source: e,
        })
}

fn float_column(df: &DataFrame, name: &str, path: &Path) -> Result<Float64Chunked, DataLoadError> {
    let column = required(typed_column(df, name, &DataType::Float64, path)?, name, path)?;
    float_values(&column, name, path)
}

fn optional_float_column(
    df: &DataFrame,
    name: &str,
    path: &Path,
) -> Result<Option<Float64Chunked>, DataLoadError> {
    match typed_column(df, name, &DataType::Float64, path)? {
        Some(column) => float_values(&column, name, path).map(Some),
        None => Ok(None),
    }
}

/// Reads an `x,y,z` CSV (header required, extra columns ignored).
///
/// Rows with a missing value in any of the three columns are skipped.
pub fn read_xyz_csv(path: &Path) -> Result<Vec<XyzRecord>, DataLoadError> {
    let df = read_csv(path, None)?;
    let xs = float_column(&df, "x", path)?;
    let ys = float_column(&df, "y", path)?;
    let zs = float_column(&df, "z", path)?;

    let mut skipped = 0usize;
    let records: Vec<XyzRecord> = (&xs)
        .into_iter()
        .zip(&ys)
        .zip(&zs)
        .filter_map(|((x, y), z)| match (x, y, z) {
            (Some(x), Some(y), Some(z)) => Some(XyzRecord::new(x, y, z)),
            _ => {
                skipped += 1;
                None
            }
        })
        .collect();

    if skipped > 0 {
        warn!("Skipped {} incomplete rows in {:?}", skipped, path);
    }
    info!("Read {} xyz rows from {:?}", records.len(), path);
    Ok(records)
}

/// Reads a station table with columns `stationReference, lat, long` and, when present,
/// `typicalRangeHigh, latestReading`.
pub fn read_station_csv(path: &Path) -> Result<Vec<StationRecord>, DataLoadError> {
    let df = read_csv(path, Some(station_schema()))?;

    let reference_column = required(
        typed_column(&df, "stationReference", &DataType::String, path)?,
        "stationReference",
        path,
    )?;
    let references = reference_column
        .str()
        .map_err(|e| DataLoadError::ColumnType {
            path: path.to_path_buf(),
            column: "stationReference".to_string(),
            source: e,
        })?;
    let lats = float_column(&df, "lat", path)?;
    let longs = float_column(&df, "long", path)?;
    let typical = optional_float_column(&df, "typicalRangeHigh", path)?;
    let latest = optional_float_column(&df, "latestReading", path)?;

    let mut skipped = 0usize;
    let mut stations = Vec::with_capacity(df.height());
    for i in 0..df.height() {
        let (Some(reference), Some(lat), Some(long)) =
            (references.get(i), lats.get(i), longs.get(i))
        else {
            skipped += 1;
            continue;
        };
        stations.push(StationRecord {
            station_reference: reference.to_string(),
            lat,
            long,
            typical_range_high: typical.as_ref().and_then(|c| c.get(i)),
            latest_reading: latest.as_ref().and_then(|c| c.get(i)),
        });
    }

    if skipped > 0 {
        warn!("Skipped {} stations without reference or location in {:?}", skipped, path);
    }
    info!("Read {} stations from {:?}", stations.len(), path);
    Ok(stations)
}

/// Writes records as an `x,y,z` CSV with header.
pub fn write_xyz_csv(path: &Path, records: &[XyzRecord]) -> Result<(), DataLoadError> {
    let column = |name: &str, values: Vec<f64>| Column::new(name.into(), values);
    let mut df = DataFrame::new(vec![
        column("x", records.iter().map(|r| r.x).collect()),
        column("y", records.iter().map(|r| r.y).collect()),
        column("z", records.iter().map(|r| r.z).collect()),
    ])
    .map_err(|e| DataLoadError::CsvWrite {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut file = std::fs::File::create(path)
        .map_err(|e| DataLoadError::FileWrite(path.to_path_buf(), e))?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(&mut df)
        .map_err(|e| DataLoadError::CsvWrite {
            path: path.to_path_buf(),
            source: e,
        })?;
    info!("Wrote {} xyz rows to {:?}", records.len(), path);
    Ok(())
}

/// [`read_xyz_csv`] on a blocking task.
pub async fn load_xyz(path: &Path) -> Result<Vec<XyzRecord>, DataLoadError> {
    let path = path.to_path_buf();
    task::spawn_blocking(move || read_xyz_csv(&path)).await?
}

/// [`read_station_csv`] on a blocking task.
pub async fn load_stations(path: &Path) -> Result<Vec<StationRecord>, DataLoadError> {
    let path = path.to_path_buf();
    task::spawn_blocking(move || read_station_csv(&path)).await?
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loaders::measures::parse_measures_json;
    use crate::types::station::apply_latest_readings;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn csv_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(contents.as_bytes())
            .expect("Failed to write temp file");
        file.flush().expect("Failed to flush temp file");
        file
    }

    #[test]
    fn test_read_xyz_csv_skips_incomplete_rows() -> Result<(), DataLoadError> {
        let file = csv_file("x,y,z\n-2.00,52.00,0.8\n-1.95,52.00,\n-1.90,52.05,0.25\n");
        let records = read_xyz_csv(file.path())?;
        assert_eq!(
            records,
            vec![
                XyzRecord::new(-2.0, 52.0, 0.8),
                XyzRecord::new(-1.9, 52.05, 0.25)
            ]
        );
        Ok(())
    }

    #[test]
    fn test_read_xyz_csv_accepts_integer_columns() -> Result<(), DataLoadError> {
        let file = csv_file("x,y,z\n-2,52,1\n");
        let records = read_xyz_csv(file.path())?;
        assert_eq!(records, vec![XyzRecord::new(-2.0, 52.0, 1.0)]);
        Ok(())
    }

    #[test]
    fn test_missing_column_is_reported() {
        let file = csv_file("x,y,value\n-2.0,52.0,0.8\n");
        let err = read_xyz_csv(file.path()).unwrap_err();
        assert!(
            matches!(err, DataLoadError::MissingColumn { ref column, .. } if column == "z"),
            "unexpected error {err:?}"
        );
    }

    #[test]
    fn test_read_station_csv_with_optional_columns() -> Result<(), DataLoadError> {
        let file = csv_file(
            "stationReference,lat,long,typicalRangeHigh,latestReading\n\
             E2043,52.1,-1.9,2.5,1.25\n\
             E7050,51.5,-0.1,,0.4\n\
             ,51.0,-1.0,1.0,1.0\n",
        );
        let stations = read_station_csv(file.path())?;
        assert_eq!(stations.len(), 2);
        assert_eq!(stations[0].station_reference, "E2043");
        assert_eq!(stations[0].river_value(), Some(0.5));
        assert_eq!(stations[1].typical_range_high, None);
        assert_eq!(stations[1].latest_reading, Some(0.4));
        Ok(())
    }

    #[test]
    fn test_rain_table_without_range_column() -> Result<(), DataLoadError> {
        let file = csv_file("stationReference,lat,long,latestReading\n0240120,52.0,-2.0,0.2\n");
        let stations = read_station_csv(file.path())?;
        assert_eq!(stations[0].station_reference, "0240120");
        assert_eq!(stations[0].rain_value(), Some(0.2));
        assert_eq!(stations[0].river_value(), None);
        Ok(())
    }

    #[tokio::test]
    async fn test_numeric_references_match_live_measures() -> Result<(), DataLoadError> {
        let file = csv_file(
            "stationReference,lat,long,latestReading\n\
             0240120,52.0,-2.0,0.2\n\
             0014502,51.5,-1.0,0.0\n\
             E7050,51.0,-3.0,0.1\n",
        );
        let mut stations = load_stations(file.path()).await?;
        let references: Vec<&str> = stations
            .iter()
            .map(|s| s.station_reference.as_str())
            .collect();
        assert_eq!(references, vec!["0240120", "0014502", "E7050"]);

        let measures = parse_measures_json(
            br#"{"items": [
                {"stationReference": "0240120", "latestReading": {"value": 1.4}},
                {"stationReference": "0014502", "latestReading": {"value": 0.6}}
            ]}"#,
        )?;
        assert_eq!(apply_latest_readings(&mut stations, &measures), 2);
        assert_eq!(stations[0].rain_value(), Some(1.4));
        assert_eq!(stations[1].rain_value(), Some(0.6));
        assert_eq!(stations[2].rain_value(), Some(0.1));
        Ok(())
    }

    #[test]
    fn test_all_numeric_reference_column() -> Result<(), DataLoadError> {
        let file = csv_file("stationReference,lat,long\n0240120,52.0,-2.0\n1234,51.0,-1.0\n");
        let stations = read_station_csv(file.path())?;
        assert_eq!(stations[0].station_reference, "0240120");
        assert_eq!(stations[1].station_reference, "1234");
        assert_eq!(stations[1].latest_reading, None);
        Ok(())
    }

    #[tokio::test]
    async fn test_write_then_load_xyz() -> Result<(), DataLoadError> {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("grid.csv");
        let records = vec![XyzRecord::new(-5.5, 50.0, 0.1), XyzRecord::new(2.0, 55.0, -0.3)];
        write_xyz_csv(&path, &records)?;
        let loaded = load_xyz(&path).await?;
        assert_eq!(loaded, records);
        Ok(())
    }
}
