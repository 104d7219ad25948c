use serde::{Deserialize, Serialize};

/// One row of an `x,y,z` table: longitude, latitude and a scalar value.
///
/// This is the exchange format of the interpolation collaborator (gridded river and
/// rain values) and of the tide reference table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct XyzRecord {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl XyzRecord {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}
