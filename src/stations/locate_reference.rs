use crate::projection::transverse_mercator::TransverseMercator;
use crate::stations::error::SpatialJoinError;
use crate::types::coordinates::{LatLon, ProjectedPoint};
use crate::types::grid_cell::GridCell;
use crate::types::reference_point::ReferencePoint;
use crate::types::xyz::XyzRecord;
use log::{debug, warn};
use rstar::{PointDistance, RTree};

/// Below this many points a linear scan beats walking the R-tree.
pub const LINEAR_SCAN_LIMIT: usize = 2048;

/// Result of a k = 1 nearest-neighbour query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearestMatch {
    /// Index of the matched point in the reference set.
    pub index: usize,
    /// Euclidean distance in metres.
    pub distance: f64,
    pub value: f64,
}

/// An ordered, immutable set of reference points (e.g. tide gauges) in projected space.
#[derive(Debug, Clone)]
pub struct ReferencePointSet {
    points: Vec<ReferencePoint>,
    rtree: RTree<ReferencePoint>,
}

impl ReferencePointSet {
    /// Builds the set from already-projected entries; indices follow iteration order.
    ///
    /// Entries with a non-finite position or value cannot be indexed and are skipped.
    pub fn from_projected(
        entries: impl IntoIterator<Item = (GridCell, ProjectedPoint, f64)>,
    ) -> Self {
        let mut skipped = 0usize;
        let points: Vec<ReferencePoint> = entries
            .into_iter()
            .filter(|(_, projected, value)| {
                let usable = projected.is_finite() && value.is_finite();
                if !usable {
                    skipped += 1;
                }
                usable
            })
            .enumerate()
            .map(|(index, (location, projected, value))| ReferencePoint {
                index,
                location,
                projected,
                value,
            })
            .collect();
        if skipped > 0 {
            warn!("Skipped {skipped} reference points with non-finite positions or values");
        }
        let rtree = RTree::bulk_load(points.clone());
        Self { points, rtree }
    }

    /// Projects `x` (longitude) / `y` (latitude) of every row with `projector`.
    ///
    /// Rows with a non-finite coordinate, projected position or value are skipped; the
    /// remaining rows keep their relative order.
    pub fn from_xyz(
        records: impl IntoIterator<Item = XyzRecord>,
        projector: &TransverseMercator,
    ) -> Self {
        let mut skipped = 0usize;
        let entries: Vec<(GridCell, ProjectedPoint, f64)> = records
            .into_iter()
            .filter_map(|record| {
                let projected = projector.project_lat_lon(LatLon(record.y, record.x));
                match projected {
                    Ok(projected) if record.z.is_finite() => {
                        Some((GridCell::new(record.x, record.y), projected, record.z))
                    }
                    _ => {
                        skipped += 1;
                        None
                    }
                }
            })
            .collect();

        if skipped > 0 {
            warn!("Skipped {skipped} reference rows with non-finite coordinates or values");
        }
        debug!("Reference point set built with {} points", entries.len());
        Self::from_projected(entries)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[ReferencePoint] {
        &self.points
    }

    /// A search handle, or [`SpatialJoinError::EmptyReferenceSet`] when there is nothing
    /// to search. Checking once up front lets a batch fail before any point is processed.
    pub fn searcher(&self) -> Result<NearestSearch<'_>, SpatialJoinError> {
        let Some((first, _)) = self.points.split_first() else {
            return Err(SpatialJoinError::EmptyReferenceSet);
        };
        Ok(NearestSearch {
            first,
            points: &self.points,
            rtree: &self.rtree,
        })
    }

    /// Nearest reference point to `query`; equidistant candidates resolve to the lowest index.
    pub fn nearest(&self, query: ProjectedPoint) -> Result<NearestMatch, SpatialJoinError> {
        Ok(self.searcher()?.nearest(query))
    }
}

/// Borrowed view over a non-empty [`ReferencePointSet`].
#[derive(Debug, Clone, Copy)]
pub struct NearestSearch<'a> {
    first: &'a ReferencePoint,
    points: &'a [ReferencePoint],
    rtree: &'a RTree<ReferencePoint>,
}

impl NearestSearch<'_> {
    pub fn nearest(&self, query: ProjectedPoint) -> NearestMatch {
        if self.points.len() < LINEAR_SCAN_LIMIT {
            self.nearest_linear(query)
        } else {
            self.nearest_indexed(query)
        }
    }

    /// Brute-force scan in insertion order. A later point only wins when strictly closer.
    pub fn nearest_linear(&self, query: ProjectedPoint) -> NearestMatch {
        let q = query.as_array();
        let mut best = self.first;
        let mut best_d2 = best.distance_2(&q);
        for candidate in &self.points[1..] {
            let d2 = candidate.distance_2(&q);
            if d2 < best_d2 {
                best = candidate;
                best_d2 = d2;
            }
        }
        Self::to_match(best, best_d2)
    }

    /// R-tree search. The tree yields candidates by increasing distance, so every
    /// candidate tied with the first one is inspected and the lowest index kept.
    ///
    /// A non-finite query has no distance ordering and goes through the linear scan.
    pub fn nearest_indexed(&self, query: ProjectedPoint) -> NearestMatch {
        if !query.is_finite() {
            return self.nearest_linear(query);
        }
        let q = query.as_array();
        let mut candidates = self.rtree.nearest_neighbor_iter_with_distance_2(&q);
        let Some((mut best, best_d2)) = candidates.next() else {
            return self.nearest_linear(query);
        };
        for (candidate, d2) in candidates {
            if d2 > best_d2 {
                break;
            }
            if candidate.index < best.index {
                best = candidate;
            }
        }
        Self::to_match(best, best_d2)
    }

    fn to_match(point: &ReferencePoint, d2: f64) -> NearestMatch {
        NearestMatch {
            index: point.index,
            distance: d2.sqrt(),
            value: point.value,
        }
    }
}
