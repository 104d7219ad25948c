use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

/// Hashable form of a [`GridCell`], compared on exact float equality.
pub(crate) type CellKey = (OrderedFloat<f64>, OrderedFloat<f64>);

/// A longitude (`x`) / latitude (`y`) pair snapped onto the raster lattice.
///
/// Cells are exact-match keys: two cells are the same only when both
/// components are bit-for-bit equal after snapping (`-0.0` and `0.0` compare equal).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridCell {
    pub x: f64,
    pub y: f64,
}

impl GridCell {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub(crate) fn key(&self) -> CellKey {
        (OrderedFloat(self.x), OrderedFloat(self.y))
    }
}

impl From<CellKey> for GridCell {
    fn from((x, y): CellKey) -> Self {
        GridCell::new(x.into_inner(), y.into_inner())
    }
}
