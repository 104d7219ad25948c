//! The main entry point: a read-only snapshot of the river and rain rasters and the tide
//! reference points, queried per location.

use crate::error::LevelForecastError;
use crate::grid::raster::RasterDataset;
use crate::grid::snap::GridSpec;
use crate::loaders::csv_loader::load_xyz;
use crate::projection::error::GeometryError;
use crate::projection::transverse_mercator::{InputDatum, TransverseMercator};
use crate::query::{records_to_frame, QueryOrchestrator};
use crate::stations::error::SpatialJoinError;
use crate::stations::locate_reference::ReferencePointSet;
use crate::types::coordinates::LatLon;
use crate::types::query_record::QueryRecord;
use crate::types::xyz::XyzRecord;
use crate::utils::{
    ensure_data_dir_exists, get_data_dir, RAIN_GRID_FILE, RIVER_GRID_FILE, TIDE_STATIONS_FILE,
};
use bon::bon;
use log::info;
use polars::prelude::{IntoLazy, LazyFrame};
use std::path::PathBuf;

/// Answers "what are the river, rain and tide conditions at these points" against one
/// immutable snapshot of the input datasets.
///
/// Refreshing the data means building a new `FloodLookup`; queries in flight keep the
/// snapshot they started with.
///
/// # Examples
///
/// ```rust
/// # use level_forecast::{FloodLookup, LatLon, LevelForecastError, XyzRecord, RasterDataset, GridSpec};
/// # fn run() -> Result<(), LevelForecastError> {
/// let river = RasterDataset::from_xyz(vec![XyzRecord::new(-2.0, 52.0, 0.8)], GridSpec::default());
/// let rain = RasterDataset::from_xyz(vec![XyzRecord::new(-2.0, 52.0, 0.1)], GridSpec::default());
/// let tide = vec![XyzRecord::new(-3.0, 51.0, 2.1), XyzRecord::new(-1.0, 51.0, 3.4)];
///
/// let lookup = FloodLookup::from_parts(river, rain, tide)?;
/// let results = lookup.rrt_value().points(vec![LatLon(52.0, -2.0)]).call()?;
/// assert_eq!(results[0].as_ref().map(|r| r.river_value), Ok(Some(0.8)));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct FloodLookup {
    river: RasterDataset,
    rain: RasterDataset,
    tide_osgb36: ReferencePointSet,
    tide_wgs84: ReferencePointSet,
}

#[bon]
impl FloodLookup {
    /// Loads `river_grid.csv`, `rain_grid.csv` and `tide_stations.csv` (all `x,y,z`) from
    /// `data_folder`, creating the folder if it does not exist yet.
    pub async fn with_data_folder(data_folder: PathBuf) -> Result<Self, LevelForecastError> {
        ensure_data_dir_exists(&data_folder)
            .await
            .map_err(|e| LevelForecastError::DataDirCreation(data_folder.clone(), e))?;

        let river = load_xyz(&data_folder.join(RIVER_GRID_FILE)).await?;
        let rain = load_xyz(&data_folder.join(RAIN_GRID_FILE)).await?;
        let tide = load_xyz(&data_folder.join(TIDE_STATIONS_FILE)).await?;
        info!(
            "Loaded {} river cells, {} rain cells and {} tide stations from {}",
            river.len(),
            rain.len(),
            tide.len(),
            data_folder.display()
        );

        Self::from_parts(
            RasterDataset::from_xyz(river, GridSpec::default()),
            RasterDataset::from_xyz(rain, GridSpec::default()),
            tide,
        )
    }

    /// Same as [`FloodLookup::with_data_folder`] with the platform data directory
    /// (e.g. `~/.local/share/level_forecast` on Linux).
    pub async fn new() -> Result<Self, LevelForecastError> {
        let data_folder = get_data_dir().map_err(LevelForecastError::DataDirResolution)?;
        Self::with_data_folder(data_folder).await
    }

    /// Builds a snapshot from in-memory datasets.
    ///
    /// The tide rows are projected once per [`InputDatum`], with the same projector that
    /// later handles the query points.
    ///
    /// # Errors
    ///
    /// [`SpatialJoinError::EmptyReferenceSet`] when no usable tide row remains.
    pub fn from_parts(
        river: RasterDataset,
        rain: RasterDataset,
        tide: Vec<XyzRecord>,
    ) -> Result<Self, LevelForecastError> {
        let project = |datum| {
            ReferencePointSet::from_xyz(tide.iter().copied(), &TransverseMercator::for_input(datum))
        };
        let tide_osgb36 = project(InputDatum::Osgb36);
        if tide_osgb36.is_empty() {
            return Err(SpatialJoinError::EmptyReferenceSet.into());
        }
        let tide_wgs84 = project(InputDatum::Wgs84);

        Ok(Self {
            river,
            rain,
            tide_osgb36,
            tide_wgs84,
        })
    }

    pub fn river(&self) -> &RasterDataset {
        &self.river
    }

    pub fn rain(&self) -> &RasterDataset {
        &self.rain
    }

    /// The tide reference points as projected for `input_datum`.
    pub fn tide(&self, input_datum: InputDatum) -> &ReferencePointSet {
        match input_datum {
            InputDatum::Osgb36 => &self.tide_osgb36,
            InputDatum::Wgs84 => &self.tide_wgs84,
        }
    }

    fn orchestrator(&self, input_datum: InputDatum) -> Result<QueryOrchestrator<'_>, SpatialJoinError> {
        QueryOrchestrator::new(
            &self.river,
            &self.rain,
            self.tide(input_datum),
            TransverseMercator::for_input(input_datum),
        )
    }

    /// River, rain and coastal values for every point, in input order.
    ///
    /// # Arguments
    ///
    /// * `.points(Vec<LatLon>)`: **Required.** Query locations.
    /// * `.input_datum(InputDatum)`: Optional. Datum of the query coordinates. Defaults to
    ///   [`InputDatum::Osgb36`].
    ///
    /// A point with NaN or infinite coordinates yields `Err` in its own slot only.
    #[builder]
    pub fn rrt_value(
        &self,
        points: Vec<LatLon>,
        input_datum: Option<InputDatum>,
    ) -> Result<Vec<Result<QueryRecord, GeometryError>>, LevelForecastError> {
        let orchestrator = self.orchestrator(input_datum.unwrap_or_default())?;
        Ok(orchestrator.evaluate(&points))
    }

    /// [`FloodLookup::rrt_value`] as a `LazyFrame` with columns `Longitude, Latitude,
    /// Easting, Northing, river_value, rain_value, coast_distance, tide_value`.
    #[builder]
    pub fn rrt_frame(
        &self,
        points: Vec<LatLon>,
        input_datum: Option<InputDatum>,
    ) -> Result<LazyFrame, LevelForecastError> {
        let results = self
            .rrt_value()
            .points(points)
            .maybe_input_datum(input_datum)
            .call()?;
        Ok(records_to_frame(&results)?.lazy())
    }
}
