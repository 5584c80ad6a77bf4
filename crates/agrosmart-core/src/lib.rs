//! Simulation and analysis library for AgroSmart.
//!
//! This crate generates simulated field data and computes the derived
//! metrics served by the AgroSmart HTTP service.
//!
//! # Features
//!
//! - Simulated sensor readings, weather and forecasts ([`simulate`])
//! - Alert evaluation for submitted readings ([`thresholds`])
//! - Soil health scoring ([`soil`]) and crop yield prediction ([`crop`])
//! - Irrigation activation and status ([`irrigation`])
//! - Dashboard overview ([`dashboard`])
//! - Pluggable weather providers, simulated or OpenWeather ([`weather`], [`openweather`])
//!
//! All randomness flows through the [`Sampler`] trait; use
//! [`RandomSampler::seeded`] or [`mock::ScriptedSampler`] for reproducible
//! results.
//!
//! # Example
//!
//! ```
//! use agrosmart_core::{RandomSampler, crop};
//!
//! let mut sampler = RandomSampler::seeded(42);
//! let prediction = crop::predict("milho", 10.0, &mut sampler).unwrap();
//! assert!(prediction.predicted_yield >= 65.02 && prediction.predicted_yield <= 107.53);
//! ```

pub mod crop;
pub mod dashboard;
pub mod error;
pub mod irrigation;
pub mod mock;
pub mod openweather;
pub mod sampler;
pub mod simulate;
pub mod soil;
pub mod thresholds;
pub mod util;
pub mod weather;

pub use dashboard::{AlertLevel, DashboardAlert, DashboardSummary};
pub use error::{Error, Result};
pub use irrigation::IrrigationSummary;
pub use openweather::{OpenWeatherConfig, OpenWeatherProvider};
pub use sampler::{RandomSampler, Sampler, SharedSampler, shared};
pub use soil::{SoilHealth, SoilStatus};
pub use thresholds::{Alert, AlertThresholds};
pub use weather::{SimulatedWeather, WeatherProvider};

// Re-export the data model for convenience.
pub use agrosmart_types;
