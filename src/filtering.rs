use crate::grid::region::Region;
use polars::prelude::{col, lit, LazyFrame};

pub trait QueryFrameFilterExt {
    /// Keeps rows whose `Longitude` / `Latitude` fall inside `region` (bounds inclusive).
    fn filter_region(self, region: Region) -> LazyFrame;

    /// Keeps rows that have a river value, i.e. points covered by the river raster.
    fn filter_with_river_value(self) -> LazyFrame;

    /// Keeps rows whose nearest tide reference point is at most `max_distance` metres away.
    ///
    /// Rows with a null `coast_distance` (invalid input coordinates) are dropped.
    fn filter_within_coast(self, max_distance: f64) -> LazyFrame;
}

impl QueryFrameFilterExt for LazyFrame {
    fn filter_region(self, region: Region) -> LazyFrame {
        self.filter(
            col("Longitude")
                .gt_eq(lit(region.min_lon))
                .and(col("Longitude").lt_eq(lit(region.max_lon)))
                .and(col("Latitude").gt_eq(lit(region.min_lat)))
                .and(col("Latitude").lt_eq(lit(region.max_lat))),
        )
    }

    fn filter_with_river_value(self) -> LazyFrame {
        self.filter(col("river_value").is_not_null())
    }

    fn filter_within_coast(self, max_distance: f64) -> LazyFrame {
        self.filter(col("coast_distance").lt_eq(lit(max_distance)))
    }
}
