//! Agronomic alert thresholds.
//!
//! Each submitted sensor reading is checked against three independent
//! rules. Triggered alerts are returned in a fixed order: soil moisture,
//! pH, temperature.
//!
//! # Example
//!
//! ```
//! use agrosmart_core::{Alert, AlertThresholds};
//! use agrosmart_types::SensorReading;
//! use time::OffsetDateTime;
//!
//! let reading = SensorReading {
//!     sensor_id: "AGRO_001".to_string(),
//!     temperature: 20.0,
//!     humidity: 60.0,
//!     soil_moisture: 25.0,
//!     ph_level: 7.8,
//!     timestamp: OffsetDateTime::now_utc(),
//! };
//!
//! let alerts = AlertThresholds::default().evaluate(&reading);
//! assert_eq!(alerts, vec![Alert::LowSoilMoisture, Alert::PhOutOfRange]);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use agrosmart_types::{SensorReading, ValidationError};

/// A condition flagged on a sensor reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alert {
    /// Soil moisture below the irrigation threshold.
    LowSoilMoisture,
    /// Soil pH outside the ideal band.
    PhOutOfRange,
    /// Air temperature high enough to stress crops.
    HeatStress,
}

impl Alert {
    /// Message shown to operators.
    pub fn message(&self) -> &'static str {
        match self {
            Alert::LowSoilMoisture => "Low soil moisture - irrigation recommended",
            Alert::PhOutOfRange => "Soil pH outside the ideal range",
            Alert::HeatStress => "High temperature - monitor for heat stress",
        }
    }
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Limits used when evaluating sensor readings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertThresholds {
    /// Soil moisture (%) below which irrigation is recommended.
    pub min_soil_moisture: f64,
    /// Lower bound of the ideal pH band (inclusive).
    pub min_ph: f64,
    /// Upper bound of the ideal pH band (inclusive).
    pub max_ph: f64,
    /// Temperature (°C) above which heat stress is flagged.
    pub max_temperature: f64,
}

impl Default for AlertThresholds {
    fn default() -> Self {
        Self {
            min_soil_moisture: 30.0,
            min_ph: 6.0,
            max_ph: 7.0,
            max_temperature: 32.0,
        }
    }
}

impl AlertThresholds {
    /// Whether `ph` lies inside the ideal band.
    pub fn ph_in_range(&self, ph: f64) -> bool {
        ph >= self.min_ph && ph <= self.max_ph
    }

    /// Evaluate `reading`, returning triggered alerts in rule order.
    pub fn evaluate(&self, reading: &SensorReading) -> Vec<Alert> {
        let mut alerts = Vec::new();
        if reading.soil_moisture < self.min_soil_moisture {
            alerts.push(Alert::LowSoilMoisture);
        }
        if !self.ph_in_range(reading.ph_level) {
            alerts.push(Alert::PhOutOfRange);
        }
        if reading.temperature > self.max_temperature {
            alerts.push(Alert::HeatStress);
        }
        alerts
    }

    /// Validate the thresholds, prefixing field names with `prefix`.
    pub fn validate(&self, prefix: &str) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        let fields = [
            ("min_soil_moisture", self.min_soil_moisture),
            ("min_ph", self.min_ph),
            ("max_ph", self.max_ph),
            ("max_temperature", self.max_temperature),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                errors.push(ValidationError::new(
                    format!("{}.{}", prefix, name),
                    "must be a finite number",
                ));
            }
        }
        if self.min_ph > self.max_ph {
            errors.push(ValidationError::new(
                format!("{}.min_ph", prefix),
                format!(
                    "min_ph {} is greater than max_ph {}",
                    self.min_ph, self.max_ph
                ),
            ));
        }
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::OffsetDateTime;

    fn reading(temperature: f64, soil_moisture: f64, ph_level: f64) -> SensorReading {
        SensorReading {
            sensor_id: "test".to_string(),
            temperature,
            humidity: 60.0,
            soil_moisture,
            ph_level,
            timestamp: OffsetDateTime::now_utc(),
        }
    }

    #[test]
    fn test_low_moisture_only() {
        let alerts = AlertThresholds::default().evaluate(&reading(20.0, 25.0, 6.5));
        assert_eq!(alerts, vec![Alert::LowSoilMoisture]);
    }

    #[test]
    fn test_moisture_and_ph_in_order() {
        let alerts = AlertThresholds::default().evaluate(&reading(20.0, 25.0, 7.8));
        assert_eq!(alerts, vec![Alert::LowSoilMoisture, Alert::PhOutOfRange]);
    }

    #[test]
    fn test_all_three_in_order() {
        let alerts = AlertThresholds::default().evaluate(&reading(33.0, 10.0, 5.0));
        assert_eq!(
            alerts,
            vec![Alert::LowSoilMoisture, Alert::PhOutOfRange, Alert::HeatStress]
        );
    }

    #[test]
    fn test_boundaries_do_not_trigger() {
        let thresholds = AlertThresholds::default();
        assert!(thresholds.evaluate(&reading(32.0, 30.0, 6.0)).is_empty());
        assert!(thresholds.evaluate(&reading(32.0, 30.0, 7.0)).is_empty());
    }

    #[test]
    fn test_heat_stress_alone() {
        let alerts = AlertThresholds::default().evaluate(&reading(32.1, 55.0, 6.8));
        assert_eq!(alerts, vec![Alert::HeatStress]);
    }

    #[test]
    fn test_custom_thresholds() {
        let thresholds = AlertThresholds {
            min_soil_moisture: 50.0,
            ..AlertThresholds::default()
        };
        let alerts = thresholds.evaluate(&reading(20.0, 45.0, 6.5));
        assert_eq!(alerts, vec![Alert::LowSoilMoisture]);
    }

    #[test]
    fn test_alert_messages() {
        assert_eq!(
            Alert::LowSoilMoisture.to_string(),
            "Low soil moisture - irrigation recommended"
        );
        assert!(Alert::PhOutOfRange.message().contains("pH"));
        assert!(Alert::HeatStress.message().contains("heat stress"));
    }

    #[test]
    fn test_validate() {
        assert!(AlertThresholds::default().validate("thresholds").is_empty());

        let inverted = AlertThresholds {
            min_ph: 7.5,
            max_ph: 6.0,
            ..AlertThresholds::default()
        };
        let errors = inverted.validate("thresholds");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "thresholds.min_ph");

        let nan = AlertThresholds {
            max_temperature: f64::NAN,
            ..AlertThresholds::default()
        };
        assert_eq!(nan.validate("t")[0].field, "t.max_temperature");
    }
}
