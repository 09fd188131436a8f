pub mod config;
pub mod data;
pub mod error;
pub mod geodesy;
pub mod registry;
pub mod series;

use std::f64::consts::{FRAC_PI_2, TAU};

use serde::Serialize;

pub use error::CoreError;

/// A geodetic monument with a fixed geographic reference position.
///
/// Angles are stored in radians. Fields are private so a constructed station
/// cannot drift away from the validated position.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Station {
    name: String,
    latitude: f64,
    longitude: f64,
}

impl Station {
    /// Latitude must lie in [-π/2, π/2] and longitude in [-2π, 2π], which
    /// admits both the (-π, π] and [0, 2π) conventions.
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Result<Self, CoreError> {
        if !latitude.is_finite() || latitude.abs() > FRAC_PI_2 {
            return Err(CoreError::InvalidCoordinate {
                field: "latitude",
                value: latitude,
            });
        }
        if !longitude.is_finite() || longitude.abs() > TAU {
            return Err(CoreError::InvalidCoordinate {
                field: "longitude",
                value: longitude,
            });
        }
        Ok(Station {
            name: name.into(),
            latitude,
            longitude,
        })
    }

    /// Builds a station from angles given in degrees.
    pub fn from_degrees(
        name: impl Into<String>,
        latitude_deg: f64,
        longitude_deg: f64,
    ) -> Result<Self, CoreError> {
        Self::new(name, latitude_deg.to_radians(), longitude_deg.to_radians())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_poles_and_both_longitude_conventions() {
        assert!(Station::new("N", FRAC_PI_2, 0.0).is_ok());
        assert!(Station::new("S", -FRAC_PI_2, -3.0).is_ok());
        assert!(Station::new("E", 0.1, 5.5).is_ok());
    }

    #[test]
    fn rejects_non_finite_or_out_of_range_angles() {
        assert!(matches!(
            Station::new("A", f64::NAN, 0.0),
            Err(CoreError::InvalidCoordinate { field: "latitude", .. })
        ));
        assert!(matches!(
            Station::new("A", 1.6, 0.0),
            Err(CoreError::InvalidCoordinate { field: "latitude", .. })
        ));
        assert!(matches!(
            Station::new("A", 0.0, f64::INFINITY),
            Err(CoreError::InvalidCoordinate { field: "longitude", .. })
        ));
        assert!(matches!(
            Station::new("A", 0.0, 7.0),
            Err(CoreError::InvalidCoordinate { field: "longitude", .. })
        ));
    }

    #[test]
    fn degrees_are_stored_as_radians() {
        let s = Station::from_degrees("ONSA", 57.395, 11.925).expect("station");
        assert_eq!(s.name(), "ONSA");
        assert!((s.latitude() - 57.395_f64.to_radians()).abs() < 1e-15);
        assert!((s.longitude() - 11.925_f64.to_radians()).abs() < 1e-15);
    }
}
