//! Weather provider abstraction.
//!
//! This module provides the [`WeatherProvider`] trait, implemented by the
//! default [`SimulatedWeather`] and by
//! [`OpenWeatherProvider`](crate::openweather::OpenWeatherProvider).
//!
//! Callers must not hold any store lock while awaiting a provider.

use async_trait::async_trait;
use time::OffsetDateTime;

use agrosmart_types::{DailyForecast, WeatherReading};

use crate::error::Result;
use crate::sampler::SharedSampler;
use crate::simulate;

/// Source of current weather and daily forecasts.
///
/// # Example
///
/// ```ignore
/// use agrosmart_core::{Result, WeatherProvider};
///
/// async fn print_weather<P: WeatherProvider + ?Sized>(provider: &P) -> Result<()> {
///     let reading = provider.current("Campinas").await?;
///     println!("{}: {} °C", reading.location, reading.temperature);
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Short provider name used in logs and errors.
    fn name(&self) -> &'static str;

    /// Current conditions at `location`.
    async fn current(&self, location: &str) -> Result<WeatherReading>;

    /// Daily forecast for `days` days starting today.
    async fn forecast(&self, location: &str, days: usize) -> Result<Vec<DailyForecast>>;
}

/// Provider that draws plausible weather from fixed ranges.
pub struct SimulatedWeather {
    sampler: SharedSampler,
}

impl SimulatedWeather {
    pub fn new(sampler: SharedSampler) -> Self {
        Self { sampler }
    }
}

impl std::fmt::Debug for SimulatedWeather {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimulatedWeather").finish_non_exhaustive()
    }
}

#[async_trait]
impl WeatherProvider for SimulatedWeather {
    fn name(&self) -> &'static str {
        "simulated"
    }

    async fn current(&self, location: &str) -> Result<WeatherReading> {
        let mut sampler = self.sampler.lock().await;
        Ok(simulate::weather_reading(
            &mut **sampler,
            location,
            OffsetDateTime::now_utc(),
        ))
    }

    async fn forecast(&self, _location: &str, days: usize) -> Result<Vec<DailyForecast>> {
        let today = OffsetDateTime::now_utc().date();
        let mut sampler = self.sampler.lock().await;
        Ok(simulate::forecast(&mut **sampler, today, days))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::ScriptedSampler;
    use crate::sampler::{RandomSampler, shared};
    use crate::simulate::FORECAST_DAYS;
    use std::sync::Arc;
    use time::Duration;

    #[tokio::test]
    async fn test_simulated_current() {
        let provider = SimulatedWeather::new(shared(ScriptedSampler::new([
            22.04, 55.0, 1012.0, 3.3, 0.0,
        ])));
        let reading = provider.current("Londrina").await.unwrap();

        assert_eq!(reading.location, "Londrina");
        assert_eq!(reading.temperature, 22.0);
        assert_eq!(reading.description, "Clear sky");
    }

    #[tokio::test]
    async fn test_simulated_forecast_starts_today() {
        let provider = SimulatedWeather::new(shared(RandomSampler::seeded(5)));
        let today = OffsetDateTime::now_utc().date();
        let days = provider.forecast("Londrina", FORECAST_DAYS).await.unwrap();

        assert_eq!(days.len(), FORECAST_DAYS);
        assert_eq!(days[0].date, today);
        assert_eq!(days[4].date, today + Duration::days(4));
    }

    #[tokio::test]
    async fn test_usable_as_trait_object() {
        let provider: Arc<dyn WeatherProvider> =
            Arc::new(SimulatedWeather::new(shared(RandomSampler::seeded(6))));
        assert_eq!(provider.name(), "simulated");
        assert!(provider.current("Sorriso").await.is_ok());
    }
}
