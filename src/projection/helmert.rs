//! Seven-parameter Helmert shift between two geodetic datums.

use crate::projection::ellipsoid::{Ellipsoid, AIRY_1830, WGS84};
use crate::types::coordinates::GeodeticPoint;
use std::f64::consts::PI;

const ARC_SECOND: f64 = PI / (180.0 * 3600.0);

/// Small-angle Helmert transformation applied in geocentric cartesian space.
///
/// Translations are in metres, scale in parts per million, rotations in arc seconds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HelmertShift {
    pub source: Ellipsoid,
    pub target: Ellipsoid,
    pub tx: f64,
    pub ty: f64,
    pub tz: f64,
    pub scale_ppm: f64,
    pub rx: f64,
    pub ry: f64,
    pub rz: f64,
}

/// GPS (WGS84) positions onto the OSGB36 / Airy 1830 datum. Good to a few metres.
pub const WGS84_TO_OSGB36: HelmertShift = HelmertShift {
    source: WGS84,
    target: AIRY_1830,
    tx: -446.448,
    ty: 125.157,
    tz: -542.060,
    scale_ppm: 20.4894,
    rx: -0.1502,
    ry: -0.2470,
    rz: -0.8421,
};

impl HelmertShift {
    /// Moves a point at zero ellipsoidal height from the source to the target datum.
    pub fn apply(&self, point: GeodeticPoint) -> GeodeticPoint {
        let [x, y, z] = self.source.cartesian(point, 0.0);

        let s = 1.0 + self.scale_ppm * 1e-6;
        let rx = self.rx * ARC_SECOND;
        let ry = self.ry * ARC_SECOND;
        let rz = self.rz * ARC_SECOND;

        let shifted = [
            self.tx + s * x - rz * y + ry * z,
            self.ty + rz * x + s * y - rx * z,
            self.tz - ry * x + rx * y + s * z,
        ];
        self.target.geodetic(shifted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wgs84_to_osgb36_shift() {
        let shifted = WGS84_TO_OSGB36
            .apply(GeodeticPoint::from_degrees(55.5, -1.54))
            .to_degrees();
        assert!((shifted.0 - 55.499_980_074).abs() < 1e-8, "lat {}", shifted.0);
        assert!((shifted.1 + 1.538_386_245).abs() < 1e-8, "lon {}", shifted.1);
    }
}
