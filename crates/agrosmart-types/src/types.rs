//! Core types for AgroSmart data.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use time::{Date, Duration, OffsetDateTime};

use crate::error::ValidationError;

/// Longest irrigation run accepted, in minutes (one day).
pub const MAX_IRRIGATION_MINUTES: u32 = 24 * 60;

/// A single reading from a field sensor.
///
/// Values are not range-checked: pH is nominally 0-14 and humidity/soil
/// moisture are percentages, but any float submitted by a device is kept.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SensorReading {
    /// Sensor identifier (`AGRO_001` style for simulated sensors).
    pub sensor_id: String,
    /// Air temperature in degrees Celsius.
    pub temperature: f64,
    /// Relative humidity percentage.
    pub humidity: f64,
    /// Volumetric soil moisture percentage.
    pub soil_moisture: f64,
    /// Soil pH.
    pub ph_level: f64,
    /// When the reading was taken.
    #[cfg_attr(feature = "serde", serde(with = "crate::timestamp"))]
    pub timestamp: OffsetDateTime,
}

/// Current weather conditions for a location.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WeatherReading {
    /// Location name as requested by the caller.
    pub location: String,
    /// Temperature in degrees Celsius.
    pub temperature: f64,
    /// Relative humidity percentage.
    pub humidity: f64,
    /// Atmospheric pressure in hPa.
    pub pressure: f64,
    /// Wind speed in m/s.
    pub wind_speed: f64,
    /// Short human-readable description ("Clear sky").
    pub description: String,
    /// When the reading was produced.
    #[cfg_attr(feature = "serde", serde(with = "crate::timestamp"))]
    pub timestamp: OffsetDateTime,
}

/// One day of a multi-day forecast.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DailyForecast {
    /// Calendar day, serialized as `YYYY-MM-DD`.
    #[cfg_attr(feature = "serde", serde(with = "crate::timestamp::calendar_date"))]
    pub date: Date,
    pub temperature_max: f64,
    pub temperature_min: f64,
    pub humidity: f64,
    /// Expected precipitation in millimetres.
    pub precipitation: f64,
    pub description: String,
}

/// Request to start irrigating a zone.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IrrigationCommand {
    /// Zone name. There is no registry of valid zones.
    pub zone_id: String,
    /// Run time in minutes.
    pub duration_minutes: u32,
    /// Whether the activation was triggered automatically.
    #[cfg_attr(feature = "serde", serde(default))]
    pub auto_mode: bool,
}

impl IrrigationCommand {
    /// Validate the command.
    ///
    /// The zone id must not be blank and the duration must be between one
    /// minute and [`MAX_IRRIGATION_MINUTES`].
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.zone_id.trim().is_empty() {
            return Err(ValidationError::new("zone_id", "zone id cannot be empty"));
        }
        if self.duration_minutes == 0 || self.duration_minutes > MAX_IRRIGATION_MINUTES {
            return Err(ValidationError::new(
                "duration_minutes",
                format!(
                    "duration {} is out of range (1-{} minutes)",
                    self.duration_minutes, MAX_IRRIGATION_MINUTES
                ),
            ));
        }
        Ok(())
    }
}

/// Lifecycle state of an irrigation record.
///
/// Records are created `Active` and nothing ever moves them on; callers infer
/// completion from [`IrrigationRecord::estimated_completion`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[non_exhaustive]
pub enum IrrigationState {
    Active,
}

impl fmt::Display for IrrigationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IrrigationState::Active => write!(f, "active"),
        }
    }
}

/// A logged irrigation activation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IrrigationRecord {
    pub zone_id: String,
    #[cfg_attr(feature = "serde", serde(with = "crate::timestamp"))]
    pub start_time: OffsetDateTime,
    pub duration_minutes: u32,
    pub auto_mode: bool,
    pub status: IrrigationState,
}

impl IrrigationRecord {
    /// Create an active record for `command` starting at `start_time`.
    pub fn start(command: &IrrigationCommand, start_time: OffsetDateTime) -> Self {
        Self {
            zone_id: command.zone_id.clone(),
            start_time,
            duration_minutes: command.duration_minutes,
            auto_mode: command.auto_mode,
            status: IrrigationState::Active,
        }
    }

    /// When the run is expected to finish.
    #[must_use]
    pub fn estimated_completion(&self) -> OffsetDateTime {
        self.start_time + Duration::minutes(i64::from(self.duration_minutes))
    }

    /// Whether the record is still marked active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == IrrigationState::Active
    }
}

/// Simulated yield estimate for a crop.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CropPrediction {
    pub crop_type: String,
    pub area_hectares: f64,
    /// Predicted yield in tonnes for the whole area.
    pub predicted_yield: f64,
    /// Confidence percentage (0-100).
    pub confidence: f64,
    /// Ordered advice; the last entry is always the pest monitoring reminder.
    pub recommendations: Vec<String>,
}
