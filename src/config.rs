//! Loader configuration.
//!
//! Every field has a default matching the usual data layout, so an empty JSON
//! object (or no config file at all) is a valid configuration.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::data::LoadError;
use crate::geodesy::ellipsoid::EllipsoidKind;

/// Unit of the latitude/longitude columns in the coordinates file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AngleUnit {
    #[default]
    Degrees,
    Radians,
}

impl AngleUnit {
    pub fn to_radians(self, value: f64) -> f64 {
        match self {
            AngleUnit::Degrees => value.to_radians(),
            AngleUnit::Radians => value,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Coordinates registry, relative to the data directory
    pub coordinates_file: String,
    /// File name suffix identifying NEU time-series files
    pub series_suffix: String,
    pub angle_unit: AngleUnit,
    pub ellipsoid: EllipsoidKind,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        LoaderConfig {
            coordinates_file: "COORDINATES.txt".into(),
            series_suffix: "_NEU.txt".into(),
            angle_unit: AngleUnit::Degrees,
            ellipsoid: EllipsoidKind::Grs80,
        }
    }
}

impl LoaderConfig {
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let bytes = fs::read(path)?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        let cfg: LoaderConfig = serde_json::from_str("{}").expect("config");
        assert_eq!(cfg, LoaderConfig::default());
    }

    #[test]
    fn partial_override() {
        let cfg: LoaderConfig =
            serde_json::from_str(r#"{"angle_unit": "radians", "ellipsoid": "wgs84"}"#)
                .expect("config");
        assert_eq!(cfg.angle_unit, AngleUnit::Radians);
        assert_eq!(cfg.ellipsoid, EllipsoidKind::Wgs84);
        assert_eq!(cfg.series_suffix, "_NEU.txt");
    }

    #[test]
    fn unknown_unit_is_rejected() {
        assert!(serde_json::from_str::<LoaderConfig>(r#"{"angle_unit": "grads"}"#).is_err());
    }

    #[test]
    fn reads_from_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("loader.json");
        fs::write(&path, r#"{"series_suffix": ".neu"}"#).expect("write");
        let cfg = LoaderConfig::from_json_file(&path).expect("config");
        assert_eq!(cfg.series_suffix, ".neu");
        assert_eq!(cfg.coordinates_file, "COORDINATES.txt");
    }
}
