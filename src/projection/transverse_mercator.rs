//! Transverse Mercator projection of geodetic coordinates onto a national grid.
//!
//! Series expansion after "A guide to coordinate systems in Great Britain" (Ordnance
//! Survey). Meaningful only near the datum's central meridian; far outside Great Britain
//! the series still returns numbers, but they are extrapolations.

use crate::projection::ellipsoid::{Datum, OSGB36};
use crate::projection::error::GeometryError;
use crate::projection::helmert::{HelmertShift, WGS84_TO_OSGB36};
use crate::types::coordinates::{GeodeticPoint, LatLon, ProjectedPoint};

/// How incoming latitude / longitude values relate to the projection datum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InputDatum {
    /// Coordinates are used as-is by the projection series.
    #[default]
    Osgb36,
    /// GPS coordinates, shifted onto OSGB36 with [`WGS84_TO_OSGB36`] before projecting.
    Wgs84,
}

/// Stateless projector for one [`Datum`], with an optional datum shift in front.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransverseMercator {
    datum: Datum,
    shift: Option<HelmertShift>,
}

impl Default for TransverseMercator {
    fn default() -> Self {
        Self::osgb36()
    }
}

impl TransverseMercator {
    pub const fn new(datum: Datum) -> Self {
        Self { datum, shift: None }
    }

    pub const fn osgb36() -> Self {
        Self::new(OSGB36)
    }

    pub const fn with_shift(mut self, shift: HelmertShift) -> Self {
        self.shift = Some(shift);
        self
    }

    pub const fn for_input(input: InputDatum) -> Self {
        match input {
            InputDatum::Osgb36 => Self::osgb36(),
            InputDatum::Wgs84 => Self::osgb36().with_shift(WGS84_TO_OSGB36),
        }
    }

    pub fn datum(&self) -> &Datum {
        &self.datum
    }

    /// Projects a single point. Non-finite input yields non-finite output.
    pub fn project(&self, point: GeodeticPoint) -> ProjectedPoint {
        let point = match &self.shift {
            Some(shift) => shift.apply(point),
            None => point,
        };
        self.project_on_datum(point)
    }

    #[allow(non_snake_case)]
    fn project_on_datum(&self, point: GeodeticPoint) -> ProjectedPoint {
        let dat = &self.datum;
        let ell = &dat.ellipsoid;
        let (a, b, f0, n, e2) = (ell.a, ell.b, ell.f0, ell.n, ell.e2);
        let phi = point.phi;

        let (sinphi, cosphi) = phi.sin_cos();
        let tan2 = phi.tan().powi(2);
        let tan4 = tan2 * tan2;

        let denom = 1.0 - e2 * sinphi.powi(2);
        let v = a * f0 * denom.powf(-0.5);
        let rho = a * f0 * (1.0 - e2) * denom.powf(-1.5);
        let eta2 = v / rho - 1.0;

        let dphi = phi - dat.phi0;
        let sphi = phi + dat.phi0;
        let M = b
            * f0
            * ((1.0 + n + 5.0 / 4.0 * n.powi(2) + 5.0 / 4.0 * n.powi(3)) * dphi
                - (3.0 * n + 3.0 * n.powi(2) + 21.0 / 8.0 * n.powi(3)) * dphi.sin() * sphi.cos()
                + (15.0 / 8.0 * n.powi(2) + 15.0 / 8.0 * n.powi(3))
                    * (2.0 * dphi).sin()
                    * (2.0 * sphi).cos()
                - 35.0 / 24.0 * n.powi(3) * (3.0 * dphi).sin() * (3.0 * dphi).cos());

        let I = M + dat.n0;
        let II = v / 2.0 * sinphi * cosphi;
        let III = v / 24.0 * sinphi * cosphi.powi(3) * (5.0 - tan2 + 9.0 * eta2);
        let IIIA = v / 720.0 * sinphi * cosphi.powi(5) * (61.0 - 58.0 * tan2 + tan4);
        let IV = v * cosphi;
        let V = v / 6.0 * cosphi.powi(3) * (v / rho - tan2);
        let VI = v / 120.0
            * cosphi.powi(5)
            * (5.0 - 18.0 * tan2 + tan4 + 14.0 * eta2 - 58.0 * tan2 * eta2);

        let dlam = point.lam - dat.lam0;
        let northing = I + II * dlam.powi(2) + III * dlam.powi(4) + IIIA * dlam.powi(6);
        let easting = dat.e0 + IV * dlam + V * dlam.powi(3) + VI * dlam.powi(5);

        ProjectedPoint::new(easting, northing)
    }

    /// Projects every point independently, preserving order.
    pub fn transform(&self, points: &[GeodeticPoint]) -> Vec<ProjectedPoint> {
        points.iter().map(|p| self.project(*p)).collect()
    }

    /// Projects a point given in degrees, rejecting NaN and infinite components.
    ///
    /// Finite input far outside the valid range (e.g. longitude `1e100`) can still overflow
    /// the series; such points fail with [`GeometryError::NonFiniteProjection`].
    ///
    /// With the default [`InputDatum::Osgb36`] the grid reference of `(55.5, -1.54)` is
    /// `(429055.55, 623010.58)`. The commonly quoted `(429157, 623009)` treats the input as
    /// GPS coordinates and needs [`InputDatum::Wgs84`]; the two differ by about 100 m.
    pub fn project_lat_lon(&self, location: LatLon) -> Result<ProjectedPoint, GeometryError> {
        if !location.is_finite() {
            return Err(GeometryError::NonFinite {
                latitude: location.0,
                longitude: location.1,
            });
        }
        let projected = self.project(location.to_geodetic());
        if !projected.is_finite() {
            return Err(GeometryError::NonFiniteProjection {
                latitude: location.0,
                longitude: location.1,
            });
        }
        Ok(projected)
    }

    /// Degree-based batch variant; one result per input, in input order.
    pub fn transform_lat_lon(
        &self,
        locations: &[LatLon],
    ) -> Vec<Result<ProjectedPoint, GeometryError>> {
        locations
            .iter()
            .map(|location| self.project_lat_lon(*location))
            .collect()
    }
}

/// Projects geodetic points onto the OSGB36 national grid, taking them as OSGB36
/// coordinates. GPS input goes through [`TransverseMercator::for_input`] with
/// [`InputDatum::Wgs84`] instead.
pub fn transform(points: &[GeodeticPoint]) -> Vec<ProjectedPoint> {
    TransverseMercator::osgb36().transform(points)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: ProjectedPoint, easting: f64, northing: f64, tolerance: f64) {
        assert!(
            (actual.easting - easting).abs() <= tolerance
                && (actual.northing - northing).abs() <= tolerance,
            "expected ({easting}, {northing}) ± {tolerance}, got ({}, {})",
            actual.easting,
            actual.northing
        );
    }

    #[test]
    fn test_true_origin_maps_to_false_origin() {
        let p = TransverseMercator::osgb36().project(GeodeticPoint::from_degrees(49.0, -2.0));
        assert_close(p, 400_000.0, -100_000.0, 1e-6);
    }

    #[test]
    fn test_series_regression_values() {
        let tm = TransverseMercator::osgb36();
        let p = tm.project(GeodeticPoint::from_degrees(55.5, -1.54));
        assert_close(p, 429_055.554, 623_010.584, 1e-3);

        let p = tm.project(GeodeticPoint::from_degrees(52.0, 0.0));
        assert_close(p, 537_281.173, 235_442.147, 1e-3);
    }

    #[test]
    fn test_gps_input_hits_documented_grid_reference() {
        let tm = TransverseMercator::for_input(InputDatum::Wgs84);
        let p = tm.project_lat_lon(LatLon(55.5, -1.54)).unwrap();
        assert_close(p, 429_157.0, 623_009.0, 1.0);
    }

    #[test]
    fn test_repeated_calls_are_bit_identical() {
        let tm = TransverseMercator::osgb36();
        let input = GeodeticPoint::from_degrees(51.2345, -3.4567);
        let first = tm.project(input);
        for _ in 0..10 {
            let again = tm.project(input);
            assert_eq!(first.easting.to_bits(), again.easting.to_bits());
            assert_eq!(first.northing.to_bits(), again.northing.to_bits());
        }
    }

    #[test]
    fn test_transform_preserves_order() {
        let points = vec![
            GeodeticPoint::from_degrees(50.5, -4.2),
            GeodeticPoint::from_degrees(55.5, -1.54),
            GeodeticPoint::from_degrees(52.0, 0.0),
        ];
        let projected = transform(&points);
        assert_eq!(projected.len(), 3);
        for (input, output) in points.iter().zip(&projected) {
            assert_eq!(*output, TransverseMercator::osgb36().project(*input));
        }
    }

    #[test]
    fn test_easting_symmetric_about_central_meridian() {
        let tm = TransverseMercator::osgb36();
        let west = tm.project(GeodeticPoint::from_degrees(51.0, -3.0));
        let east = tm.project(GeodeticPoint::from_degrees(51.0, -1.0));
        assert!((west.easting + east.easting - 800_000.0).abs() < 1e-6);
        assert!((west.northing - east.northing).abs() < 1e-6);
    }

    #[test]
    fn test_non_finite_input_is_rejected() {
        let tm = TransverseMercator::osgb36();
        let results = tm.transform_lat_lon(&[LatLon(f64::NAN, -2.0), LatLon(52.0, -2.0)]);
        assert!(matches!(results[0], Err(GeometryError::NonFinite { .. })));
        assert!(results[1].is_ok());
    }

    #[test]
    fn test_overflowing_projection_is_rejected() {
        let tm = TransverseMercator::osgb36();
        let location = LatLon(52.0, 1e100);
        assert!(!tm.project(location.to_geodetic()).is_finite());
        let err = tm.project_lat_lon(location).unwrap_err();
        assert_eq!(
            err,
            GeometryError::NonFiniteProjection {
                latitude: 52.0,
                longitude: 1e100
            }
        );
        assert_eq!(err.location(), location);
    }
}
