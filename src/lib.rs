mod error;
mod filtering;
mod grid;
mod level_forecast;
mod loaders;
mod projection;
mod query;
mod stations;
mod types;
mod utils;

pub use error::LevelForecastError;
pub use filtering::QueryFrameFilterExt;
pub use level_forecast::*;

pub use grid::block_mean::{block_mean, BlockMean};
pub use grid::raster::RasterDataset;
pub use grid::region::{Region, ENGLAND_AND_WALES};
pub use grid::snap::{round_to_decimals, snap, GridSpec, DEFAULT_DECIMALS, DEFAULT_RESOLUTION};

pub use projection::ellipsoid::{Datum, Ellipsoid, AIRY_1830, OSGB36, WGS84};
pub use projection::helmert::{HelmertShift, WGS84_TO_OSGB36};
pub use projection::transverse_mercator::{transform, InputDatum, TransverseMercator};

pub use query::{evaluate, records_to_frame, QueryOrchestrator};
pub use stations::locate_reference::{
    NearestMatch, NearestSearch, ReferencePointSet, LINEAR_SCAN_LIMIT,
};

pub use loaders::csv_loader::{
    load_stations, load_xyz, read_station_csv, read_xyz_csv, write_xyz_csv,
};
pub use loaders::measures::{parse_measures_json, read_measures_json};

pub use types::coordinates::{GeodeticPoint, LatLon, ProjectedPoint};
pub use types::grid_cell::GridCell;
pub use types::query_record::QueryRecord;
pub use types::reference_point::ReferencePoint;
pub use types::station::*;
pub use types::xyz::XyzRecord;

pub use utils::{RAIN_GRID_FILE, RIVER_GRID_FILE, TIDE_STATIONS_FILE};

pub use loaders::error::DataLoadError;
pub use projection::error::GeometryError;
pub use stations::error::SpatialJoinError;
