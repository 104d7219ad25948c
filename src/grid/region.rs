use crate::types::coordinates::LatLon;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Longitude / latitude bounding box, bounds inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub min_lon: f64,
    pub max_lon: f64,
    pub min_lat: f64,
    pub max_lat: f64,
}

/// The area covered by the river, rain and tide rasters.
pub const ENGLAND_AND_WALES: Region = Region {
    min_lon: -5.5,
    max_lon: 2.0,
    min_lat: 50.0,
    max_lat: 55.0,
};

impl Region {
    pub fn contains(&self, location: LatLon) -> bool {
        self.contains_xy(location.1, location.0)
    }

    pub fn contains_xy(&self, x: f64, y: f64) -> bool {
        (self.min_lon..=self.max_lon).contains(&x) && (self.min_lat..=self.max_lat).contains(&y)
    }
}

/// GMT-style `west/east/south/north`, e.g. `-5.5/2/50/55`.
impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}/{}",
            self.min_lon, self.max_lon, self.min_lat, self.max_lat
        )
    }
}
