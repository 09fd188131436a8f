use serde::{Deserialize, Serialize};

/// Converts a geographic position into an absolute geocentric XYZ point.
///
/// Argument order is longitude first, then latitude, then height. Angles are
/// radians, height and the result are metres.
pub trait ReferencePointConverter {
    fn geographic_to_geocentric(&self, longitude: f64, latitude: f64, height: f64) -> [f64; 3];
}

impl<F> ReferencePointConverter for F
where
    F: Fn(f64, f64, f64) -> [f64; 3],
{
    fn geographic_to_geocentric(&self, longitude: f64, latitude: f64, height: f64) -> [f64; 3] {
        self(longitude, latitude, height)
    }
}

/// Reference ellipsoid described by semi-major axis and inverse flattening.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ellipsoid {
    /// Semi-major axis (metres)
    pub semi_major_axis: f64,
    pub inverse_flattening: f64,
}

impl Ellipsoid {
    pub const GRS80: Ellipsoid = Ellipsoid {
        semi_major_axis: 6_378_137.0,
        inverse_flattening: 298.257_222_101,
    };

    pub const WGS84: Ellipsoid = Ellipsoid {
        semi_major_axis: 6_378_137.0,
        inverse_flattening: 298.257_223_563,
    };

    pub fn flattening(&self) -> f64 {
        1.0 / self.inverse_flattening
    }

    /// First eccentricity squared.
    pub fn eccentricity_squared(&self) -> f64 {
        let f = self.flattening();
        f * (2.0 - f)
    }
}

impl Default for Ellipsoid {
    fn default() -> Self {
        Ellipsoid::GRS80
    }
}

impl ReferencePointConverter for Ellipsoid {
    fn geographic_to_geocentric(&self, longitude: f64, latitude: f64, height: f64) -> [f64; 3] {
        let e2 = self.eccentricity_squared();
        let (s_lat, c_lat) = latitude.sin_cos();
        let (s_lon, c_lon) = longitude.sin_cos();
        // prime vertical radius of curvature
        let n = self.semi_major_axis / (1.0 - e2 * s_lat * s_lat).sqrt();
        [
            (n + height) * c_lat * c_lon,
            (n + height) * c_lat * s_lon,
            (n * (1.0 - e2) + height) * s_lat,
        ]
    }
}

/// Named ellipsoids selectable from configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EllipsoidKind {
    #[default]
    Grs80,
    Wgs84,
}

impl From<EllipsoidKind> for Ellipsoid {
    fn from(kind: EllipsoidKind) -> Self {
        match kind {
            EllipsoidKind::Grs80 => Ellipsoid::GRS80,
            EllipsoidKind::Wgs84 => Ellipsoid::WGS84,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn equator_prime_meridian_is_semi_major_axis() {
        let p = Ellipsoid::GRS80.geographic_to_geocentric(0.0, 0.0, 0.0);
        assert_eq!(p, [6_378_137.0, 0.0, 0.0]);
    }

    #[test]
    fn pole_is_semi_minor_axis() {
        let e = Ellipsoid::GRS80;
        let b = e.semi_major_axis * (1.0 - e.flattening());
        let p = e.geographic_to_geocentric(0.0, FRAC_PI_2, 0.0);
        assert_approx_eq!(p[0], 0.0, 1e-6);
        assert_approx_eq!(p[2], b, 1e-6);
        assert_approx_eq!(b, 6_356_752.314_140, 1e-5);
    }

    #[test]
    fn longitude_comes_first() {
        let lon = FRAC_PI_2;
        let p = Ellipsoid::WGS84.geographic_to_geocentric(lon, 0.0, 0.0);
        assert_approx_eq!(p[0], 0.0, 1e-6);
        assert_approx_eq!(p[1], 6_378_137.0, 1e-6);
        assert_approx_eq!(p[2], 0.0, 1e-6);
    }

    #[test]
    fn height_extends_along_normal() {
        let p = Ellipsoid::GRS80.geographic_to_geocentric(0.0, 0.0, 100.0);
        assert_approx_eq!(p[0], 6_378_237.0, 1e-9);
    }

    #[test]
    fn closures_act_as_converters() {
        let stub = |lon: f64, lat: f64, h: f64| [lon, lat, h];
        assert_eq!(stub.geographic_to_geocentric(1.0, 2.0, 3.0), [1.0, 2.0, 3.0]);
    }
}
