//! A single entry of a nearest-neighbour reference set, plus the implementations
//! needed to index it with the `rstar` crate.

use crate::types::coordinates::ProjectedPoint;
use crate::types::grid_cell::GridCell;
use rstar::{PointDistance, RTreeObject, AABB};

/// One reference location (e.g. a tide gauge) with its projected position and value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferencePoint {
    /// Position in the reference set's construction order. Lower wins distance ties.
    pub index: usize,
    /// Geodetic location as supplied (`x` = longitude, `y` = latitude).
    pub location: GridCell,
    pub projected: ProjectedPoint,
    pub value: f64,
}

// --- R-Tree Implementations ---

/// The envelope is the degenerate box around the projected (easting, northing) point.
impl RTreeObject for ReferencePoint {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.projected.as_array())
    }
}

impl PointDistance for ReferencePoint {
    /// Squared Euclidean distance in metres², shared by the indexed and the linear search
    /// so that both see bit-identical distances.
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let de = self.projected.easting - point[0];
        let dn = self.projected.northing - point[1];
        de * de + dn * dn
    }
}
