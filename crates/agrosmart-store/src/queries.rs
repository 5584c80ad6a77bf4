//! Query builder for stored sensor readings.
//!
//! # Example
//!
//! ```
//! use agrosmart_store::{SensorLog, ReadingQuery};
//! use time::{OffsetDateTime, Duration};
//!
//! let log = SensorLog::new();
//! let an_hour_ago = OffsetDateTime::now_utc() - Duration::hours(1);
//!
//! let query = ReadingQuery::new()
//!     .sensor("AGRO_001")
//!     .since(an_hour_ago)
//!     .limit(50)
//!     .offset(0);
//!
//! let page = log.query(&query);
//! assert!(page.items.is_empty());
//! ```

use time::OffsetDateTime;

use agrosmart_types::SensorReading;

/// Fluent query builder for sensor readings.
///
/// All filters are optional. Results come back in insertion order.
#[derive(Debug, Default, Clone)]
pub struct ReadingQuery {
    /// Filter by sensor ID.
    pub sensor_id: Option<String>,
    /// Only readings at or after this time.
    pub since: Option<OffsetDateTime>,
    /// Only readings at or before this time.
    pub until: Option<OffsetDateTime>,
    /// Maximum number of results.
    pub limit: Option<usize>,
    /// Offset for pagination.
    pub offset: Option<usize>,
}

impl ReadingQuery {
    /// Create a query with no filters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter by sensor ID.
    #[must_use]
    pub fn sensor(mut self, sensor_id: &str) -> Self {
        self.sensor_id = Some(sensor_id.to_string());
        self
    }

    /// Filter readings taken at or after `since`.
    #[must_use]
    pub fn since(mut self, since: OffsetDateTime) -> Self {
        self.since = Some(since);
        self
    }

    /// Filter readings taken at or before `until`.
    #[must_use]
    pub fn until(mut self, until: OffsetDateTime) -> Self {
        self.until = Some(until);
        self
    }

    /// Limit the number of results.
    #[must_use]
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Skip the first `offset` matches.
    #[must_use]
    pub fn offset(mut self, offset: usize) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Whether `reading` passes every filter.
    pub fn matches(&self, reading: &SensorReading) -> bool {
        if let Some(id) = &self.sensor_id
            && &reading.sensor_id != id
        {
            return false;
        }
        if let Some(since) = self.since
            && reading.timestamp < since
        {
            return false;
        }
        if let Some(until) = self.until
            && reading.timestamp > until
        {
            return false;
        }
        true
    }
}

/// One page of query results.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    /// Items on this page.
    pub items: Vec<T>,
    /// Number of items that matched the filters before pagination.
    pub total: usize,
}

impl<T> Page<T> {
    /// Whether more matches exist past this page.
    pub fn has_more(&self, offset: usize) -> bool {
        offset + self.items.len() < self.total
    }
}
