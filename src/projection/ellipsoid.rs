//! Reference ellipsoids and the projection datum built on top of them.

use crate::types::coordinates::GeodeticPoint;
use std::f64::consts::PI;

const DEG_TO_RAD: f64 = PI / 180.0;

/// Reference ellipsoid parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ellipsoid {
    /// Semi-major axis (metres)
    pub a: f64,
    /// Semi-minor axis (metres)
    pub b: f64,
    /// Scale factor on the central meridian
    pub f0: f64,
    /// (a - b) / (a + b)
    pub n: f64,
    /// First eccentricity squared: (a² - b²) / a²
    pub e2: f64,
}

impl Ellipsoid {
    pub const fn new(a: f64, b: f64, f0: f64) -> Self {
        Self {
            a,
            b,
            f0,
            n: (a - b) / (a + b),
            e2: (a * a - b * b) / (a * a),
        }
    }

    /// Radius of curvature in the prime vertical (unscaled).
    pub fn prime_vertical_radius(&self, phi: f64) -> f64 {
        self.a / (1.0 - self.e2 * phi.sin().powi(2)).sqrt()
    }

    /// Geodetic position at ellipsoidal height `h` to geocentric cartesian `[X, Y, Z]`.
    #[allow(non_snake_case)]
    pub fn cartesian(&self, point: GeodeticPoint, h: f64) -> [f64; 3] {
        let N = self.prime_vertical_radius(point.phi);
        let (sinphi, cosphi) = point.phi.sin_cos();
        let (sinlam, coslam) = point.lam.sin_cos();
        [
            (N + h) * cosphi * coslam,
            (N + h) * cosphi * sinlam,
            (N * (1.0 - self.e2) + h) * sinphi,
        ]
    }

    /// Geocentric cartesian back to a geodetic position (height discarded).
    ///
    /// Non-iterative Bowring / Fukushima form; sub-millimetre for terrestrial heights.
    #[allow(non_snake_case)]
    pub fn geodetic(&self, cartesian: [f64; 3]) -> GeodeticPoint {
        let [X, Y, Z] = cartesian;
        let lam = Y.atan2(X);
        let p = X.hypot(Y);

        if p < 1.0e-12 {
            return GeodeticPoint::new(std::f64::consts::FRAC_PI_2.copysign(Z), lam);
        }

        let eps = self.e2 / (1.0 - self.e2);
        let T = (Z * self.a) / (p * self.b);
        let c = 1.0 / (1.0 + T * T).sqrt();
        let s = c * T;

        let phi_num = Z + eps * self.b * s.powi(3);
        let phi_denom = p - self.e2 * self.a * c.powi(3);
        GeodeticPoint::new(phi_num.atan2(phi_denom), lam)
    }
}

/// Airy 1830, the ellipsoid of the British national grid.
pub const AIRY_1830: Ellipsoid = Ellipsoid::new(6_377_563.396, 6_356_256.910, 0.999_601_271_7);

/// The global GPS reference ellipsoid. Only used to move GPS input onto [`AIRY_1830`].
pub const WGS84: Ellipsoid = Ellipsoid::new(6_378_137.0, 6_356_752.314_2, 0.9996);

/// Projection datum: an ellipsoid plus the true and false origins of the grid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Datum {
    pub ellipsoid: Ellipsoid,
    /// Latitude of true origin (radians)
    pub phi0: f64,
    /// Longitude of true origin (radians)
    pub lam0: f64,
    /// Easting of false origin (metres)
    pub e0: f64,
    /// Northing of false origin (metres)
    pub n0: f64,
}

/// OSGB36 national grid: true origin 49°N 2°W, false origin (400 km, -100 km).
pub const OSGB36: Datum = Datum {
    ellipsoid: AIRY_1830,
    phi0: 49.0 * DEG_TO_RAD,
    lam0: -2.0 * DEG_TO_RAD,
    e0: 400_000.0,
    n0: -100_000.0,
};
