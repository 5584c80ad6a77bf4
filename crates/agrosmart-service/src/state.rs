//! Application state shared across handlers.
//!
//! Each store sits behind its own lock. Handlers take at most one lock at a
//! time and release it before awaiting a weather provider, so a slow
//! upstream call never blocks sensor or irrigation requests.

use std::sync::Arc;

use time::OffsetDateTime;
use tokio::sync::{Mutex, RwLock};
use tracing::info;

use agrosmart_core::{
    OpenWeatherProvider, RandomSampler, SharedSampler, SimulatedWeather, WeatherProvider, shared,
};
use agrosmart_store::{IrrigationLog, SensorLog, WeatherCache};

use crate::config::{Config, WeatherProviderKind};

/// Shared application state.
pub struct AppState {
    /// Append-only sensor readings.
    pub sensors: Mutex<SensorLog>,
    /// Append-only irrigation activations.
    pub irrigation: Mutex<IrrigationLog>,
    /// Latest weather per location.
    pub weather_cache: RwLock<WeatherCache>,
    /// Source of all simulated values.
    pub sampler: SharedSampler,
    /// Active weather provider.
    pub weather: Arc<dyn WeatherProvider>,
    /// Configuration (read-only after startup).
    pub config: Config,
    /// When the service started.
    pub started_at: OffsetDateTime,
}

impl AppState {
    /// Create application state from `config`.
    ///
    /// # Errors
    ///
    /// Fails if the OpenWeather provider is selected but cannot be built.
    pub fn new(config: Config) -> agrosmart_core::Result<Arc<Self>> {
        let sampler = shared(RandomSampler::new(config.simulation.seed));
        let weather: Arc<dyn WeatherProvider> = match config.weather.provider {
            WeatherProviderKind::Simulated => {
                Arc::new(SimulatedWeather::new(Arc::clone(&sampler)))
            }
            WeatherProviderKind::OpenWeather => {
                Arc::new(OpenWeatherProvider::new(config.weather.openweather())?)
            }
        };
        info!(
            provider = weather.name(),
            seeded = config.simulation.seed.is_some(),
            "Initialized application state"
        );
        Ok(Self::with_parts(config, sampler, weather))
    }

    /// Assemble state from explicit parts.
    pub fn with_parts(
        config: Config,
        sampler: SharedSampler,
        weather: Arc<dyn WeatherProvider>,
    ) -> Arc<Self> {
        Arc::new(Self {
            sensors: Mutex::new(SensorLog::new()),
            irrigation: Mutex::new(IrrigationLog::new()),
            weather_cache: RwLock::new(WeatherCache::new()),
            sampler,
            weather,
            config,
            started_at: OffsetDateTime::now_utc(),
        })
    }
}
