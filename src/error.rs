use crate::loaders::error::DataLoadError;
use crate::projection::error::GeometryError;
use crate::stations::error::SpatialJoinError;
use polars::prelude::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LevelForecastError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    SpatialJoin(#[from] SpatialJoinError),

    #[error(transparent)]
    DataLoad(#[from] DataLoadError),

    #[error("Failed to create data directory '{0}'")]
    DataDirCreation(PathBuf, #[source] std::io::Error),

    #[error("Failed to determine data directory")]
    DataDirResolution(#[source] std::io::Error),

    #[error("Failed to build query frame")]
    Frame(#[from] PolarsError),
}
