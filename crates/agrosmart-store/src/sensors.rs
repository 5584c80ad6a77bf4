//! Append-only log of sensor readings.

use tracing::debug;

use agrosmart_types::SensorReading;

use crate::queries::{Page, ReadingQuery};

/// Number of readings the soil-health analysis looks at.
pub const RECENT_WINDOW: usize = 5;

/// In-memory, append-only sensor reading store.
///
/// Readings are never removed; the log lives as long as the process.
#[derive(Debug, Default)]
pub struct SensorLog {
    readings: Vec<SensorReading>,
}

impl SensorLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a single reading.
    pub fn append(&mut self, reading: SensorReading) {
        debug!("Storing reading from {}", reading.sensor_id);
        self.readings.push(reading);
    }

    /// Append a batch of readings, preserving their order.
    pub fn extend<I>(&mut self, readings: I)
    where
        I: IntoIterator<Item = SensorReading>,
    {
        let before = self.readings.len();
        self.readings.extend(readings);
        debug!(
            "Stored {} readings ({} total)",
            self.readings.len() - before,
            self.readings.len()
        );
    }

    /// Number of stored readings.
    pub fn len(&self) -> usize {
        self.readings.len()
    }

    /// Whether nothing has been stored yet.
    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    /// The last `n` readings in insertion order (fewer if the log is shorter).
    pub fn recent(&self, n: usize) -> &[SensorReading] {
        let start = self.readings.len().saturating_sub(n);
        &self.readings[start..]
    }

    /// Run a filtered, paginated query.
    pub fn query(&self, query: &ReadingQuery) -> Page<SensorReading> {
        let matching: Vec<&SensorReading> =
            self.readings.iter().filter(|r| query.matches(r)).collect();

        let total = matching.len();
        let items = matching
            .into_iter()
            .skip(query.offset.unwrap_or(0))
            .take(query.limit.unwrap_or(usize::MAX))
            .cloned()
            .collect();

        Page { items, total }
    }
}
