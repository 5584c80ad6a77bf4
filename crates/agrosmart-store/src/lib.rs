//! Process-lifetime in-memory stores for AgroSmart.
//!
//! Three collections make up all of the service's state:
//!
//! - [`SensorLog`]: append-only sensor readings
//! - [`IrrigationLog`]: append-only irrigation activations
//! - [`WeatherCache`]: latest weather per location, overwritten on each fetch
//!
//! None of them persist anything or expire entries; a restart clears them.
//! The types are plain single-owner structs; callers that share them across
//! tasks wrap each one in its own lock.
//!
//! # Example
//!
//! ```
//! use agrosmart_store::{SensorLog, ReadingQuery};
//! use agrosmart_types::SensorReading;
//! use time::OffsetDateTime;
//!
//! let mut log = SensorLog::new();
//! log.append(SensorReading {
//!     sensor_id: "AGRO_001".to_string(),
//!     temperature: 24.0,
//!     humidity: 60.0,
//!     soil_moisture: 41.0,
//!     ph_level: 6.6,
//!     timestamp: OffsetDateTime::now_utc(),
//! });
//!
//! let page = log.query(&ReadingQuery::new().sensor("AGRO_001"));
//! assert_eq!(page.total, 1);
//! ```

mod irrigation;
mod queries;
mod sensors;
mod weather;

pub use irrigation::IrrigationLog;
pub use queries::{Page, ReadingQuery};
pub use sensors::{RECENT_WINDOW, SensorLog};
pub use weather::WeatherCache;
