use thiserror::Error;

/// Errors raised by the station and time-series model.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CoreError {
    #[error("invalid {field}: {value} (must be a finite angle in range, radians)")]
    InvalidCoordinate { field: &'static str, value: f64 },
    #[error("malformed sample: {0}")]
    MalformedSample(String),
    #[error("unknown station {0:?}")]
    UnknownStation(String),
}
