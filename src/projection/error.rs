use crate::types::coordinates::LatLon;
use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum GeometryError {
    #[error("Non-finite coordinate (latitude {latitude}, longitude {longitude})")]
    NonFinite { latitude: f64, longitude: f64 },

    #[error("Coordinate (latitude {latitude}, longitude {longitude}) projects outside the finite plane")]
    NonFiniteProjection { latitude: f64, longitude: f64 },
}

impl GeometryError {
    /// The input location that failed.
    pub fn location(&self) -> LatLon {
        match *self {
            GeometryError::NonFinite {
                latitude,
                longitude,
            }
            | GeometryError::NonFiniteProjection {
                latitude,
                longitude,
            } => LatLon(latitude, longitude),
        }
    }
}
