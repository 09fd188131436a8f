use std::collections::HashMap;
use std::sync::Arc;

use log::warn;

use crate::error::CoreError;
use crate::Station;

/// Name-indexed set of stations, kept in insertion order.
#[derive(Clone, Debug, Default)]
pub struct StationRegistry {
    stations: Vec<Arc<Station>>,
    name_index: HashMap<String, usize>,
}

impl StationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a station. A station with the same name replaces the earlier one
    /// in place.
    pub fn insert(&mut self, station: Station) -> Arc<Station> {
        let station = Arc::new(station);
        match self.name_index.get(station.name()) {
            Some(&idx) => {
                warn!("station {} redefined, keeping the later entry", station.name());
                self.stations[idx] = Arc::clone(&station);
            }
            None => {
                self.name_index
                    .insert(station.name().to_string(), self.stations.len());
                self.stations.push(Arc::clone(&station));
            }
        }
        station
    }

    pub fn get(&self, name: &str) -> Result<Arc<Station>, CoreError> {
        self.name_index
            .get(name)
            .map(|&idx| Arc::clone(&self.stations[idx]))
            .ok_or_else(|| CoreError::UnknownStation(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.name_index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Station>> {
        self.stations.iter()
    }
}

impl FromIterator<Station> for StationRegistry {
    fn from_iter<T: IntoIterator<Item = Station>>(iter: T) -> Self {
        let mut registry = StationRegistry::new();
        for station in iter {
            registry.insert(station);
        }
        registry
    }
}
