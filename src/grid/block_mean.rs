//! Block averaging of scattered station readings, the input the external gridding
//! routine expects.

use crate::grid::region::Region;
use crate::grid::snap::GridSpec;
use crate::types::grid_cell::GridCell;
use crate::types::xyz::XyzRecord;
use log::debug;
use ordered_float::OrderedFloat;
use std::collections::BTreeMap;

/// Mean of all readings that fell into one cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockMean {
    pub cell: GridCell,
    pub mean: f64,
    pub count: usize,
}

impl BlockMean {
    pub fn to_xyz(&self) -> XyzRecord {
        XyzRecord::new(self.cell.x, self.cell.y, self.mean)
    }
}

/// Averages readings per grid cell. Readings outside `region` or with non-finite
/// components are dropped. Output is ordered south to north, then west to east.
pub fn block_mean(readings: &[XyzRecord], grid: GridSpec, region: Region) -> Vec<BlockMean> {
    let mut blocks: BTreeMap<(OrderedFloat<f64>, OrderedFloat<f64>), (f64, usize)> =
        BTreeMap::new();

    for reading in readings {
        if !(reading.x.is_finite() && reading.y.is_finite() && reading.z.is_finite()) {
            continue;
        }
        if !region.contains_xy(reading.x, reading.y) {
            continue;
        }
        let cell = grid.cell_xy(reading.x, reading.y);
        // normalise -0.0 so output cells print as 0
        let key = (OrderedFloat(cell.y + 0.0), OrderedFloat(cell.x + 0.0));
        let entry = blocks.entry(key).or_insert((0.0, 0));
        entry.0 += reading.z;
        entry.1 += 1;
    }

    debug!(
        "Block mean reduced {} readings to {} cells",
        readings.len(),
        blocks.len()
    );

    blocks
        .into_iter()
        .map(|((y, x), (sum, count))| BlockMean {
            cell: GridCell::new(x.into_inner(), y.into_inner()),
            mean: sum / count as f64,
            count,
        })
        .collect()
}
