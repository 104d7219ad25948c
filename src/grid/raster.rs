//! Sparse raster datasets keyed by grid cell.

use crate::grid::snap::GridSpec;
use crate::types::coordinates::LatLon;
use crate::types::grid_cell::{CellKey, GridCell};
use crate::types::xyz::XyzRecord;
use log::{debug, warn};
use std::collections::HashMap;

/// An immutable cell → value mapping produced by the interpolation collaborator.
///
/// The dataset remembers the [`GridSpec`] it was generated on, and [`value_at`](Self::value_at)
/// snaps with exactly that grid.
#[derive(Debug, Clone, Default)]
pub struct RasterDataset {
    grid: GridSpec,
    values: HashMap<CellKey, f64>,
}

impl RasterDataset {
    /// Builds a dataset from already-snapped `x,y,z` rows.
    ///
    /// Rows are taken as given; a cell that appears twice keeps the later value.
    pub fn from_xyz(records: impl IntoIterator<Item = XyzRecord>, grid: GridSpec) -> Self {
        let mut values = HashMap::new();
        let mut duplicates = 0usize;
        let mut off_grid = 0usize;

        for record in records {
            let cell = GridCell::new(record.x, record.y);
            if !grid.is_on_grid(record.x) || !grid.is_on_grid(record.y) {
                off_grid += 1;
            }
            if values.insert(cell.key(), record.z).is_some() {
                duplicates += 1;
            }
        }

        if duplicates > 0 {
            warn!("{duplicates} duplicate raster cells, later rows overwrote earlier ones");
        }
        if off_grid > 0 {
            warn!(
                "{off_grid} raster cells are not on the {} degree grid and can never match a query",
                grid.resolution
            );
        }
        debug!("Raster dataset built with {} cells", values.len());

        Self { grid, values }
    }

    pub fn grid(&self) -> &GridSpec {
        &self.grid
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Exact-key lookup. `None` means the cell is outside the raster's coverage.
    pub fn lookup(&self, cell: &GridCell) -> Option<f64> {
        self.values.get(&cell.key()).copied()
    }

    /// Snaps `location` with this dataset's grid, then looks the cell up.
    pub fn value_at(&self, location: LatLon) -> Option<f64> {
        self.lookup(&self.grid.cell(location))
    }

    pub fn cells(&self) -> impl Iterator<Item = (GridCell, f64)> + '_ {
        self.values.iter().map(|(key, z)| (GridCell::from(*key), *z))
    }
}
