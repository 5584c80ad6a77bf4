//! Data model for the AgroSmart agriculture monitoring service.
//!
//! This crate provides the types shared by the in-memory stores
//! (agrosmart-store), the derived-metrics library (agrosmart-core) and the
//! HTTP service (agrosmart-service).
//!
//! # Features
//!
//! - Sensor readings, weather readings and daily forecasts
//! - Irrigation commands and activation records
//! - Crop yield predictions
//! - Input validation and lenient timestamp parsing
//!
//! # Example
//!
//! ```
//! use agrosmart_types::{IrrigationCommand, IrrigationRecord};
//! use time::OffsetDateTime;
//!
//! let command = IrrigationCommand {
//!     zone_id: "Zona 1".to_string(),
//!     duration_minutes: 30,
//!     auto_mode: false,
//! };
//! command.validate().unwrap();
//!
//! let now = OffsetDateTime::now_utc();
//! let record = IrrigationRecord::start(&command, now);
//! assert_eq!(record.estimated_completion(), now + time::Duration::minutes(30));
//! ```

pub mod error;
pub mod timestamp;
pub mod types;

pub use error::{ParseError, ParseResult, ValidationError};
pub use types::{
    CropPrediction, DailyForecast, IrrigationCommand, IrrigationRecord, IrrigationState,
    MAX_IRRIGATION_MINUTES, SensorReading, WeatherReading,
};
