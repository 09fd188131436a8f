use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use plate_motion::config::LoaderConfig;
use plate_motion::data::load_dataset;
use plate_motion::geodesy::ellipsoid::Ellipsoid;
use plate_motion::series::time_series::TimeSeries;
use plate_motion::Station;
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(name = "plate_motion")]
#[command(about = "Convert station NEU displacement series to geocentric XYZ points")]
struct Cli {
    /// Directory holding COORDINATES.txt and the *_NEU.txt series files
    #[arg(env = "PLATE_MOTION_DATA_DIR", default_value = "data/timeseries")]
    data_dir: PathBuf,

    /// Optional JSON loader configuration
    config: Option<PathBuf>,
}

/// One output line per station.
#[derive(Debug, Serialize)]
struct StationPoints<'a> {
    station: &'a Station,
    reference: [f64; 3],
    times: &'a [f64],
    xyz: Vec<[f64; 3]>,
}

impl<'a> StationPoints<'a> {
    fn new(series: &'a TimeSeries, ellipsoid: &Ellipsoid) -> Self {
        let points = series.xyz_points(ellipsoid);
        StationPoints {
            station: series.station(),
            reference: points.reference(),
            times: series.times(),
            xyz: points.collect(),
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => LoaderConfig::from_json_file(path)
            .with_context(|| format!("failed to read loader config {}", path.display()))?,
        None => LoaderConfig::default(),
    };

    let dataset = load_dataset(&cli.data_dir, &config)
        .with_context(|| format!("failed to load data from {}", cli.data_dir.display()))?;
    let ellipsoid = Ellipsoid::from(config.ellipsoid);

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for series in dataset.series.values() {
        let record = StationPoints::new(series, &ellipsoid);
        serde_json::to_writer(&mut out, &record)
            .with_context(|| format!("failed to write points for {}", record.station.name()))?;
        writeln!(out)?;
    }
    out.flush()?;

    info!("Wrote XYZ points for {} stations", dataset.series.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    // The variable is process-wide, so every env case lives in this one test.
    #[test]
    fn data_dir_default_env_and_argument_precedence() {
        std::env::remove_var("PLATE_MOTION_DATA_DIR");
        let cli = Cli::try_parse_from(["plate_motion"]).expect("cli");
        assert_eq!(cli.data_dir, PathBuf::from("data/timeseries"));
        assert!(cli.config.is_none());

        std::env::set_var("PLATE_MOTION_DATA_DIR", "/srv/gnss");
        let cli = Cli::try_parse_from(["plate_motion"]).expect("cli");
        assert_eq!(cli.data_dir, PathBuf::from("/srv/gnss"));

        let cli = Cli::try_parse_from(["plate_motion", "/data/neu"]).expect("cli");
        assert_eq!(cli.data_dir, PathBuf::from("/data/neu"));
        std::env::remove_var("PLATE_MOTION_DATA_DIR");
    }

    #[test]
    fn config_path_is_second_positional() {
        let cli = Cli::try_parse_from(["plate_motion", "/data/neu", "loader.json"]).expect("cli");
        assert_eq!(cli.data_dir, PathBuf::from("/data/neu"));
        assert_eq!(cli.config, Some(PathBuf::from("loader.json")));
    }

    #[test]
    fn help_and_extra_arguments_are_not_data_dirs() {
        let err = Cli::try_parse_from(["plate_motion", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
        assert!(Cli::try_parse_from(["plate_motion", "a", "b.json", "c"]).is_err());
    }

    #[test]
    fn station_record_serializes_as_one_json_object() {
        let station = Arc::new(Station::new("A", 0.0, 0.0).expect("station"));
        let mut series = TimeSeries::new(station);
        series
            .append_fields(["2020.0", "1", "0.001", "2", "0.001", "3", "0.01"])
            .expect("append");

        let record = StationPoints::new(&series, &Ellipsoid::GRS80);
        let value = serde_json::to_value(&record).expect("json");
        assert_eq!(
            value,
            serde_json::json!({
                "station": { "name": "A", "latitude": 0.0, "longitude": 0.0 },
                "reference": [6378137.0, 0.0, 0.0],
                "times": [2020.0],
                "xyz": [[6378140.0, 2.0, 1.0]],
            })
        );
    }
}
