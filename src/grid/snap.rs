//! Snapping of continuous coordinates onto the raster lattice.
//!
//! Both rounding steps are round-half-to-even, the convention of the gridding routine
//! that produces the rasters. Rounding half away from zero would move coordinates that
//! sit exactly between two cells into the wrong one.

use crate::types::coordinates::LatLon;
use crate::types::grid_cell::GridCell;
use serde::{Deserialize, Serialize};

pub const DEFAULT_RESOLUTION: f64 = 0.05;
pub const DEFAULT_DECIMALS: i32 = 2;

/// Rounds to `decimals` places: scale, round half to even, unscale.
pub fn round_to_decimals(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round_ties_even() / scale
}

/// `round(round(coord / resolution) * resolution, 2)`.
pub fn snap(coord: f64, resolution: f64) -> f64 {
    GridSpec::new(resolution, DEFAULT_DECIMALS).snap(coord)
}

/// Resolution and decimal precision of a raster lattice.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridSpec {
    pub resolution: f64,
    pub decimals: i32,
}

impl Default for GridSpec {
    fn default() -> Self {
        Self::new(DEFAULT_RESOLUTION, DEFAULT_DECIMALS)
    }
}

impl GridSpec {
    pub const fn new(resolution: f64, decimals: i32) -> Self {
        Self {
            resolution,
            decimals,
        }
    }

    pub fn snap(&self, coord: f64) -> f64 {
        let steps = (coord / self.resolution).round_ties_even();
        round_to_decimals(steps * self.resolution, self.decimals)
    }

    /// Cell containing a geodetic location (`x` = longitude, `y` = latitude).
    pub fn cell(&self, location: LatLon) -> GridCell {
        self.cell_xy(location.1, location.0)
    }

    pub fn cell_xy(&self, x: f64, y: f64) -> GridCell {
        GridCell::new(self.snap(x), self.snap(y))
    }

    /// `true` when `coord` already sits on the lattice.
    pub fn is_on_grid(&self, coord: f64) -> bool {
        self.snap(coord) == coord
    }
}
