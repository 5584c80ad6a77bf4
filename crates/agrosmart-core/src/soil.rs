//! Soil health scoring from recent sensor readings.
//!
//! The score is built from three parts:
//!
//! | Component | Points |
//! |-----------|--------|
//! | Mean pH within 6.0-7.0 | 30 |
//! | Mean soil moisture ≥ 40% | 40 |
//! | Other factors (random) | 20-30 |
//!
//! so it always lands in 20..=100.

use std::fmt;

use serde::{Deserialize, Serialize};

use agrosmart_types::SensorReading;

use crate::error::{Error, Result};
use crate::sampler::Sampler;
use crate::util::{mean, round_to};

pub const HEALTHY_PH: (f64, f64) = (6.0, 7.0);
pub const MIN_HEALTHY_MOISTURE: f64 = 40.0;
pub const PH_POINTS: u32 = 30;
pub const MOISTURE_POINTS: u32 = 40;
pub const OTHER_FACTORS: (i64, i64) = (20, 30);

pub const SOIL_RECOMMENDATIONS: [&str; 3] = [
    "Keep a regular soil testing schedule",
    "Consider crop rotation",
    "Monitor organic matter levels",
];

/// Overall soil condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoilStatus {
    Excellent,
    Good,
    Regular,
}

impl SoilStatus {
    /// Classify a health score.
    pub fn from_score(score: u32) -> Self {
        match score {
            s if s >= 85 => SoilStatus::Excellent,
            s if s >= 70 => SoilStatus::Good,
            _ => SoilStatus::Regular,
        }
    }
}

impl fmt::Display for SoilStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SoilStatus::Excellent => write!(f, "Excellent"),
            SoilStatus::Good => write!(f, "Good"),
            SoilStatus::Regular => write!(f, "Regular"),
        }
    }
}

/// Result of a soil health analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoilHealth {
    pub health_score: u32,
    pub status: SoilStatus,
    /// Mean pH over the window, two decimals.
    pub average_ph: f64,
    /// Mean soil moisture over the window, one decimal.
    pub average_moisture: f64,
    pub recommendations: Vec<String>,
}

/// Score the soil from `window`, typically the last few stored readings.
///
/// # Errors
///
/// Returns [`Error::NoSensorData`] if `window` is empty.
pub fn analyze(window: &[SensorReading], sampler: &mut dyn Sampler) -> Result<SoilHealth> {
    let average_ph = mean(window.iter().map(|r| r.ph_level)).ok_or(Error::NoSensorData)?;
    let average_moisture =
        mean(window.iter().map(|r| r.soil_moisture)).ok_or(Error::NoSensorData)?;

    let mut health_score = 0;
    if average_ph >= HEALTHY_PH.0 && average_ph <= HEALTHY_PH.1 {
        health_score += PH_POINTS;
    }
    if average_moisture >= MIN_HEALTHY_MOISTURE {
        health_score += MOISTURE_POINTS;
    }
    let (low, high) = OTHER_FACTORS;
    health_score += sampler.integer(low, high).clamp(low, high) as u32;

    Ok(SoilHealth {
        health_score,
        status: SoilStatus::from_score(health_score),
        average_ph: round_to(average_ph, 2),
        average_moisture: round_to(average_moisture, 1),
        recommendations: SOIL_RECOMMENDATIONS.iter().map(|s| s.to_string()).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::ScriptedSampler;
    use crate::sampler::RandomSampler;
    use time::OffsetDateTime;

    fn reading(ph_level: f64, soil_moisture: f64) -> SensorReading {
        SensorReading {
            sensor_id: "AGRO_001".to_string(),
            temperature: 25.0,
            humidity: 60.0,
            soil_moisture,
            ph_level,
            timestamp: OffsetDateTime::now_utc(),
        }
    }

    #[test]
    fn test_empty_window_is_not_found() {
        let mut sampler = RandomSampler::seeded(1);
        let result = analyze(&[], &mut sampler);
        assert!(matches!(result, Err(Error::NoSensorData)));
    }

    #[test]
    fn test_single_healthy_reading_is_excellent() {
        let mut sampler = RandomSampler::seeded(2);
        for _ in 0..100 {
            let health = analyze(&[reading(6.5, 50.0)], &mut sampler).unwrap();
            assert!((90..=100).contains(&health.health_score));
            assert_eq!(health.status, SoilStatus::Excellent);
            assert_eq!(health.average_ph, 6.5);
            assert_eq!(health.average_moisture, 50.0);
        }
    }

    #[test]
    fn test_score_components() {
        // pH only: 30 + 25
        let mut sampler = ScriptedSampler::new([25.0]);
        let health = analyze(&[reading(6.2, 35.0)], &mut sampler).unwrap();
        assert_eq!(health.health_score, 55);
        assert_eq!(health.status, SoilStatus::Regular);

        // moisture only: 40 + 30
        let mut sampler = ScriptedSampler::new([30.0]);
        let health = analyze(&[reading(7.4, 60.0)], &mut sampler).unwrap();
        assert_eq!(health.health_score, 70);
        assert_eq!(health.status, SoilStatus::Good);

        // neither: floor of 20
        let mut sampler = ScriptedSampler::default();
        let health = analyze(&[reading(5.0, 10.0)], &mut sampler).unwrap();
        assert_eq!(health.health_score, 20);
    }

    #[test]
    fn test_means_over_window() {
        let window = [
            reading(5.9, 30.0),
            reading(6.1, 40.0),
            reading(6.6, 50.0),
            reading(7.1, 45.0),
            reading(6.3, 47.0),
        ];
        let mut sampler = ScriptedSampler::new([20.0]);
        let health = analyze(&window, &mut sampler).unwrap();

        assert_eq!(health.average_ph, 6.4);
        assert_eq!(health.average_moisture, 42.4);
        assert_eq!(health.health_score, 90);
    }

    #[test]
    fn test_averages_rounded() {
        let window = [reading(6.123, 41.26), reading(6.0, 41.0)];
        let mut sampler = ScriptedSampler::new([20.0]);
        let health = analyze(&window, &mut sampler).unwrap();
        assert_eq!(health.average_ph, 6.06);
        assert_eq!(health.average_moisture, 41.1);
    }

    #[test]
    fn test_status_thresholds() {
        assert_eq!(SoilStatus::from_score(100), SoilStatus::Excellent);
        assert_eq!(SoilStatus::from_score(85), SoilStatus::Excellent);
        assert_eq!(SoilStatus::from_score(84), SoilStatus::Good);
        assert_eq!(SoilStatus::from_score(70), SoilStatus::Good);
        assert_eq!(SoilStatus::from_score(69), SoilStatus::Regular);
        assert_eq!(SoilStatus::Regular.to_string(), "Regular");
    }

    #[test]
    fn test_recommendations_fixed() {
        let mut sampler = RandomSampler::seeded(4);
        let a = analyze(&[reading(6.5, 50.0)], &mut sampler).unwrap();
        let b = analyze(&[reading(4.0, 5.0)], &mut sampler).unwrap();
        assert_eq!(a.recommendations, b.recommendations);
        assert_eq!(a.recommendations.len(), 3);
    }
}
