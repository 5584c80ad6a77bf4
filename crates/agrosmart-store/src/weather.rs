//! Last-known weather per location.

use std::collections::HashMap;

use tracing::debug;

use agrosmart_types::WeatherReading;

/// Mapping from location name to the latest weather reading fetched for it.
///
/// Every fetch overwrites the previous entry. There is no TTL and no
/// eviction, so the map grows with the number of distinct locations seen.
#[derive(Debug, Default)]
pub struct WeatherCache {
    entries: HashMap<String, WeatherReading>,
}

impl WeatherCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `reading` under its location, returning the entry it replaced.
    pub fn insert(&mut self, reading: WeatherReading) -> Option<WeatherReading> {
        debug!("Caching weather for {}", reading.location);
        self.entries.insert(reading.location.clone(), reading)
    }

    /// Number of cached locations.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no location has been cached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All cached readings sorted by location name.
    pub fn snapshot(&self) -> Vec<WeatherReading> {
        let mut readings: Vec<WeatherReading> = self.entries.values().cloned().collect();
        readings.sort_by(|a, b| a.location.cmp(&b.location));
        readings
    }
}
