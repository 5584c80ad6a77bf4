//! Farm overview for the dashboard.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Number of sensors reported on the dashboard. All are listed as active.
pub const TOTAL_SENSORS: u32 = 5;

/// Number of irrigation zones reported on the dashboard.
pub const IRRIGATION_ZONES: u32 = crate::irrigation::TOTAL_ZONES;

pub const WEATHER_STATUS: &str = "Partly cloudy, 25°C";

/// Severity of a dashboard alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    Info,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardAlert {
    #[serde(rename = "type")]
    pub level: AlertLevel,
    pub message: String,
}

impl DashboardAlert {
    fn new(level: AlertLevel, message: &str) -> Self {
        Self {
            level,
            message: message.to_string(),
        }
    }
}

/// Summary shown on the dashboard landing page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub total_sensors: u32,
    pub active_sensors: u32,
    pub irrigation_zones: u32,
    pub active_irrigations: usize,
    #[serde(with = "agrosmart_types::timestamp")]
    pub last_update: OffsetDateTime,
    pub alerts: Vec<DashboardAlert>,
    pub weather_status: String,
}

/// Build the dashboard summary.
///
/// Only `active_irrigations` and `last_update` vary; the rest is fixed.
pub fn summary(active_irrigations: usize, now: OffsetDateTime) -> DashboardSummary {
    DashboardSummary {
        total_sensors: TOTAL_SENSORS,
        active_sensors: TOTAL_SENSORS,
        irrigation_zones: IRRIGATION_ZONES,
        active_irrigations,
        last_update: now,
        alerts: vec![
            DashboardAlert::new(AlertLevel::Info, "System operating normally"),
            DashboardAlert::new(AlertLevel::Warning, "Zone 3 with low soil moisture"),
        ],
        weather_status: WEATHER_STATUS.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn test_summary_fixed_fields() {
        let now = datetime!(2026-10-16 12:00:00 UTC);
        let s = summary(2, now);

        assert_eq!(s.total_sensors, 5);
        assert_eq!(s.active_sensors, 5);
        assert_eq!(s.irrigation_zones, 5);
        assert_eq!(s.active_irrigations, 2);
        assert_eq!(s.last_update, now);
        assert_eq!(s.alerts.len(), 2);
        assert_eq!(s.alerts[0].level, AlertLevel::Info);
        assert_eq!(s.alerts[1].level, AlertLevel::Warning);
    }

    #[test]
    fn test_summary_json_shape() {
        let now = datetime!(2026-10-16 12:00:00 UTC);
        let json = serde_json::to_value(summary(0, now)).unwrap();

        assert_eq!(json["alerts"][0]["type"], "info");
        assert_eq!(json["alerts"][1]["type"], "warning");
        assert_eq!(json["weather_status"], "Partly cloudy, 25°C");
        assert_eq!(json["last_update"], "2026-10-16T12:00:00Z");
    }
}
