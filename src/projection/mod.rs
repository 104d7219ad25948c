pub mod ellipsoid;
pub mod error;
pub mod helmert;
pub mod transverse_mercator;
