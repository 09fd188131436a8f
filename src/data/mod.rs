//! Text loaders for the station coordinates registry and NEU time series.
//!
//! Coordinates file: one `NAME LAT LON` per line, `#` starts a comment line.
//! Series files: `%` starts a header line, `% site name : NAME` opens the
//! series for `NAME`, and every other non-blank line holds the seven values
//! `T N Ne E Ee U Ue`.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use thiserror::Error;

use crate::config::{AngleUnit, LoaderConfig};
use crate::error::CoreError;
use crate::registry::registry::StationRegistry;
use crate::series::time_series::TimeSeries;
use crate::Station;

const SITE_NAME_HEADER: &str = "% site name";

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error("coordinates line {line}: {reason}")]
    Coordinates { line: usize, reason: String },
    #[error("{}:{line}: {source}", path.display())]
    SeriesLine {
        path: PathBuf,
        line: usize,
        #[source]
        source: CoreError,
    },
    #[error("{}:{line}: sample before any site name header", path.display())]
    SampleBeforeHeader { path: PathBuf, line: usize },
}

/// Everything read from a data directory.
#[derive(Debug, Default)]
pub struct Dataset {
    pub stations: StationRegistry,
    pub series: BTreeMap<String, TimeSeries>,
}

pub fn parse_coordinates(text: &str, unit: AngleUnit) -> Result<StationRegistry, LoadError> {
    let mut registry = StationRegistry::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let fields: Vec<&str> = line.split_whitespace().collect();
        let [name, lat, lon] = fields[..] else {
            return Err(LoadError::Coordinates {
                line: idx + 1,
                reason: format!("expected NAME LAT LON, got {} fields", fields.len()),
            });
        };
        let parse = |token: &str| {
            token.parse::<f64>().map_err(|_| LoadError::Coordinates {
                line: idx + 1,
                reason: format!("{token:?} is not a number"),
            })
        };
        let latitude = unit.to_radians(parse(lat)?);
        let longitude = unit.to_radians(parse(lon)?);
        registry.insert(Station::new(name, latitude, longitude)?);
    }
    Ok(registry)
}

/// Parses one series file and merges its series into `out`.
///
/// A site header for a name already in `out` starts that series afresh.
pub fn parse_series(
    text: &str,
    path: &Path,
    stations: &StationRegistry,
    out: &mut BTreeMap<String, TimeSeries>,
) -> Result<(), LoadError> {
    let mut site: Option<String> = None;
    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        if line.starts_with('%') {
            if line.starts_with(SITE_NAME_HEADER) {
                let name = line
                    .split_once(':')
                    .map(|(_, rest)| rest.trim())
                    .unwrap_or_default();
                let station = stations.get(name).map_err(|source| LoadError::SeriesLine {
                    path: path.to_path_buf(),
                    line: idx + 1,
                    source,
                })?;
                if out.insert(name.to_string(), TimeSeries::new(station)).is_some() {
                    warn!("series for {name} redefined in {}", path.display());
                }
                site = Some(name.to_string());
            }
            continue;
        }
        let Some(series) = site.as_ref().and_then(|name| out.get_mut(name)) else {
            return Err(LoadError::SampleBeforeHeader {
                path: path.to_path_buf(),
                line: idx + 1,
            });
        };
        series
            .append_fields(line.split_whitespace())
            .map_err(|source| LoadError::SeriesLine {
                path: path.to_path_buf(),
                line: idx + 1,
                source,
            })?;
    }
    Ok(())
}

/// Series files in `dir` ending in `suffix`, in sorted order.
pub fn series_files(dir: &Path, suffix: &str) -> Result<Vec<PathBuf>, LoadError> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let matches = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.ends_with(suffix));
        if matches && path.is_file() {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

pub fn load_dataset<P: AsRef<Path>>(dir: P, config: &LoaderConfig) -> Result<Dataset, LoadError> {
    let dir = dir.as_ref();
    let coords_path = dir.join(&config.coordinates_file);
    let stations = parse_coordinates(&fs::read_to_string(&coords_path)?, config.angle_unit)?;
    info!(
        "Read {} stations from {}",
        stations.len(),
        coords_path.display()
    );

    let mut series = BTreeMap::new();
    for path in series_files(dir, &config.series_suffix)? {
        debug!("Reading series file {}", path.display());
        let text = fs::read_to_string(&path)?;
        parse_series(&text, &path, &stations, &mut series)?;
    }
    info!("Loaded {} time series from {}", series.len(), dir.display());

    Ok(Dataset { stations, series })
}
