use std::iter::Zip;
use std::slice::Iter;
use std::sync::Arc;

use log::debug;

use crate::error::CoreError;
use crate::geodesy::ellipsoid::ReferencePointConverter;
use crate::geodesy::transform::neu_to_xyz;
use crate::Station;

/// Number of values that make up one sample.
pub const SAMPLE_ARITY: usize = 7;

/// One epoch of a displacement series with its one-sigma uncertainties.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Sample {
    pub time: f64,
    pub north: f64,
    pub sigma_north: f64,
    pub east: f64,
    pub sigma_east: f64,
    pub up: f64,
    pub sigma_up: f64,
}

impl Sample {
    /// Parses the seven tokens `T N Ne E Ee U Ue`.
    pub fn from_tokens<I, S>(tokens: I) -> Result<Self, CoreError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut values = [0.0_f64; SAMPLE_ARITY];
        let mut count = 0;
        for token in tokens {
            if let Some(slot) = values.get_mut(count) {
                let token = token.as_ref().trim();
                *slot = token.parse().map_err(|_| {
                    CoreError::MalformedSample(format!("{token:?} is not a number"))
                })?;
            }
            count += 1;
        }
        if count != SAMPLE_ARITY {
            return Err(CoreError::MalformedSample(format!(
                "expected {SAMPLE_ARITY} values, got {count}"
            )));
        }
        let [time, north, sigma_north, east, sigma_east, up, sigma_up] = values;
        let sample = Sample {
            time,
            north,
            sigma_north,
            east,
            sigma_east,
            up,
            sigma_up,
        };
        sample.validate()?;
        Ok(sample)
    }

    fn validate(&self) -> Result<(), CoreError> {
        let fields = [
            ("time", self.time),
            ("north", self.north),
            ("sigma_north", self.sigma_north),
            ("east", self.east),
            ("sigma_east", self.sigma_east),
            ("up", self.up),
            ("sigma_up", self.sigma_up),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(CoreError::MalformedSample(format!("{name} is not finite: {value}")));
            }
        }
        for (name, value) in [
            ("sigma_north", self.sigma_north),
            ("sigma_east", self.sigma_east),
            ("sigma_up", self.sigma_up),
        ] {
            if value < 0.0 {
                return Err(CoreError::MalformedSample(format!("{name} is negative: {value}")));
            }
        }
        Ok(())
    }
}

/// Displacement time series of a single station.
///
/// Samples are kept as seven index-aligned sequences in insertion order,
/// which callers guarantee is time order.
#[derive(Clone, Debug)]
pub struct TimeSeries {
    station: Arc<Station>,
    time: Vec<f64>,
    north: Vec<f64>,
    east: Vec<f64>,
    up: Vec<f64>,
    sigma_north: Vec<f64>,
    sigma_east: Vec<f64>,
    sigma_up: Vec<f64>,
}

impl TimeSeries {
    pub fn new(station: Arc<Station>) -> Self {
        TimeSeries {
            station,
            time: Vec::new(),
            north: Vec::new(),
            east: Vec::new(),
            up: Vec::new(),
            sigma_north: Vec::new(),
            sigma_east: Vec::new(),
            sigma_up: Vec::new(),
        }
    }

    pub fn station(&self) -> &Arc<Station> {
        &self.station
    }

    /// Appends one sample. Nothing is stored if validation fails.
    pub fn append_sample(&mut self, sample: Sample) -> Result<(), CoreError> {
        sample.validate()?;
        self.time.push(sample.time);
        self.north.push(sample.north);
        self.east.push(sample.east);
        self.up.push(sample.up);
        self.sigma_north.push(sample.sigma_north);
        self.sigma_east.push(sample.sigma_east);
        self.sigma_up.push(sample.sigma_up);
        Ok(())
    }

    /// Appends one sample from the seven raw tokens `T N Ne E Ee U Ue`.
    pub fn append_fields<I, S>(&mut self, tokens: I) -> Result<(), CoreError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let sample = Sample::from_tokens(tokens)?;
        self.append_sample(sample)
    }

    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    pub fn times(&self) -> &[f64] {
        &self.time
    }

    pub fn north_series(&self) -> &[f64] {
        &self.north
    }

    pub fn east_series(&self) -> &[f64] {
        &self.east
    }

    pub fn up_series(&self) -> &[f64] {
        &self.up
    }

    pub fn sigma_north_series(&self) -> &[f64] {
        &self.sigma_north
    }

    pub fn sigma_east_series(&self) -> &[f64] {
        &self.sigma_east
    }

    pub fn sigma_up_series(&self) -> &[f64] {
        &self.sigma_up
    }

    pub fn sample(&self, index: usize) -> Option<Sample> {
        (index < self.len()).then(|| self.sample_at(index))
    }

    pub fn samples(&self) -> impl ExactSizeIterator<Item = Sample> + '_ {
        (0..self.len()).map(move |i| self.sample_at(i))
    }

    fn sample_at(&self, index: usize) -> Sample {
        Sample {
            time: self.time[index],
            north: self.north[index],
            sigma_north: self.sigma_north[index],
            east: self.east[index],
            sigma_east: self.sigma_east[index],
            up: self.up[index],
            sigma_up: self.sigma_up[index],
        }
    }

    /// Absolute geocentric positions, one per sample in insertion order.
    ///
    /// The reference point is computed once per call from the station's
    /// `(longitude, latitude, 0)`. Every call starts a fresh traversal.
    pub fn xyz_points<C>(&self, converter: &C) -> XyzPoints<'_>
    where
        C: ReferencePointConverter + ?Sized,
    {
        let latitude = self.station.latitude();
        let longitude = self.station.longitude();
        let reference = converter.geographic_to_geocentric(longitude, latitude, 0.0);
        debug!(
            "reference point for {}: {:?} ({} samples)",
            self.station.name(),
            reference,
            self.len()
        );
        XyzPoints {
            reference,
            latitude,
            longitude,
            neu: self.north.iter().zip(self.east.iter()).zip(self.up.iter()),
        }
    }
}

/// Lazy iterator returned by [`TimeSeries::xyz_points`].
#[derive(Clone, Debug)]
pub struct XyzPoints<'a> {
    reference: [f64; 3],
    latitude: f64,
    longitude: f64,
    neu: Zip<Zip<Iter<'a, f64>, Iter<'a, f64>>, Iter<'a, f64>>,
}

impl XyzPoints<'_> {
    /// The geocentric reference point the deltas are added to.
    pub fn reference(&self) -> [f64; 3] {
        self.reference
    }
}

impl Iterator for XyzPoints<'_> {
    type Item = [f64; 3];

    fn next(&mut self) -> Option<Self::Item> {
        let ((&n, &e), &u) = self.neu.next()?;
        let [dx, dy, dz] = neu_to_xyz(self.latitude, self.longitude, [n, e, u]);
        let [x0, y0, z0] = self.reference;
        Some([x0 + dx, y0 + dy, z0 + dz])
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.neu.size_hint()
    }
}

impl ExactSizeIterator for XyzPoints<'_> {}
