//! Coordinate value types shared by the projection, grid and spatial join code.

use serde::{Deserialize, Serialize};

/// Represents a geographical coordinate using latitude and longitude in decimal degrees.
///
/// Latitude is the first element (index 0), and longitude is the second (index 1).
///
/// # Examples
///
/// ```
/// use level_forecast::LatLon;
///
/// let york = LatLon(53.96, -1.08);
/// assert_eq!(york.0, 53.96); // Latitude
/// assert_eq!(york.1, -1.08); // Longitude
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLon(pub f64, pub f64);

impl LatLon {
    pub fn latitude(&self) -> f64 {
        self.0
    }

    pub fn longitude(&self) -> f64 {
        self.1
    }

    /// `true` when both components are neither NaN nor infinite.
    pub fn is_finite(&self) -> bool {
        self.0.is_finite() && self.1.is_finite()
    }

    /// Converts to a [`GeodeticPoint`] in radians.
    pub fn to_geodetic(self) -> GeodeticPoint {
        GeodeticPoint::from_degrees(self.0, self.1)
    }
}

/// A geodetic position, latitude `phi` and longitude `lam`, both in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeodeticPoint {
    pub phi: f64,
    pub lam: f64,
}

impl GeodeticPoint {
    pub fn new(phi: f64, lam: f64) -> Self {
        Self { phi, lam }
    }

    pub fn from_degrees(latitude: f64, longitude: f64) -> Self {
        Self {
            phi: latitude.to_radians(),
            lam: longitude.to_radians(),
        }
    }

    pub fn to_degrees(self) -> LatLon {
        LatLon(self.phi.to_degrees(), self.lam.to_degrees())
    }

    pub fn is_finite(&self) -> bool {
        self.phi.is_finite() && self.lam.is_finite()
    }
}

/// A national grid position in metres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectedPoint {
    pub easting: f64,
    pub northing: f64,
}

impl ProjectedPoint {
    pub fn new(easting: f64, northing: f64) -> Self {
        Self { easting, northing }
    }

    /// Squared Euclidean distance in the projected plane.
    pub fn distance_2(&self, other: &ProjectedPoint) -> f64 {
        let de = self.easting - other.easting;
        let dn = self.northing - other.northing;
        de * de + dn * dn
    }

    pub fn distance(&self, other: &ProjectedPoint) -> f64 {
        self.distance_2(other).sqrt()
    }

    pub fn is_finite(&self) -> bool {
        self.easting.is_finite() && self.northing.is_finite()
    }

    pub fn as_array(&self) -> [f64; 2] {
        [self.easting, self.northing]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degrees_round_trip() {
        let p = GeodeticPoint::from_degrees(52.0, -2.0);
        let back = p.to_degrees();
        assert!((back.0 - 52.0).abs() < 1e-12);
        assert!((back.1 + 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_projected_distance() {
        let a = ProjectedPoint::new(0.0, 0.0);
        let b = ProjectedPoint::new(3.0, 4.0);
        assert_eq!(a.distance_2(&b), 25.0);
        assert_eq!(a.distance(&b), 5.0);
    }

    #[test]
    fn test_non_finite_lat_lon() {
        assert!(LatLon(52.0, -2.0).is_finite());
        assert!(!LatLon(f64::NAN, -2.0).is_finite());
        assert!(!LatLon(52.0, f64::INFINITY).is_finite());
        assert!(!ProjectedPoint::new(f64::NEG_INFINITY, f64::NAN).is_finite());
    }
}
