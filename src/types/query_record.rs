use serde::{Deserialize, Serialize};

/// The composite result for one query point.
///
/// `river_value` and `rain_value` are `None` when the point's grid cell is not covered by
/// the raster. `coast_distance` (metres) and `tide_value` always come from the nearest
/// tide reference point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QueryRecord {
    #[serde(rename = "Longitude")]
    pub longitude: f64,
    #[serde(rename = "Latitude")]
    pub latitude: f64,
    #[serde(rename = "Easting")]
    pub easting: f64,
    #[serde(rename = "Northing")]
    pub northing: f64,
    pub river_value: Option<f64>,
    pub rain_value: Option<f64>,
    pub coast_distance: f64,
    pub tide_value: f64,
}
