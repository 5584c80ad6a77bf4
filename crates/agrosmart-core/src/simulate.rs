//! Simulated sensor and weather data.
//!
//! All values are drawn uniformly from fixed ranges and rounded to one
//! decimal place.

use time::{Date, Duration, OffsetDateTime};
use tracing::debug;

use agrosmart_types::{DailyForecast, SensorReading, WeatherReading};

use crate::sampler::Sampler;
use crate::util::round_to;

/// Number of simulated field sensors.
pub const SENSOR_COUNT: usize = 5;

pub const SENSOR_TEMPERATURE: (f64, f64) = (18.0, 35.0);
pub const SENSOR_HUMIDITY: (f64, f64) = (45.0, 85.0);
pub const SENSOR_SOIL_MOISTURE: (f64, f64) = (20.0, 80.0);
pub const SENSOR_PH: (f64, f64) = (5.5, 7.5);

pub const WEATHER_TEMPERATURE: (f64, f64) = (20.0, 30.0);
pub const WEATHER_HUMIDITY: (f64, f64) = (50.0, 80.0);
pub const WEATHER_PRESSURE: (f64, f64) = (1010.0, 1025.0);
pub const WEATHER_WIND_SPEED: (f64, f64) = (0.0, 15.0);
pub const WEATHER_DESCRIPTIONS: [&str; 4] =
    ["Clear sky", "Few clouds", "Scattered clouds", "Light rain"];

/// Number of days in a forecast.
pub const FORECAST_DAYS: usize = 5;

pub const FORECAST_TEMPERATURE_MAX: (f64, f64) = (25.0, 35.0);
pub const FORECAST_TEMPERATURE_MIN: (f64, f64) = (15.0, 25.0);
pub const FORECAST_HUMIDITY: (f64, f64) = (50.0, 80.0);
pub const FORECAST_PRECIPITATION: (f64, f64) = (0.0, 10.0);
pub const FORECAST_DESCRIPTIONS: [&str; 5] =
    ["Sunny", "Partly cloudy", "Cloudy", "Light rain", "Heavy rain"];

fn draw(sampler: &mut dyn Sampler, (low, high): (f64, f64)) -> f64 {
    round_to(sampler.uniform(low, high), 1)
}

/// Identifier of the simulated sensor at 1-based `index` (`AGRO_001`).
pub fn sensor_id(index: usize) -> String {
    format!("AGRO_{:03}", index)
}

/// One reading for each of the [`SENSOR_COUNT`] simulated sensors, in id order.
pub fn current_sensors(sampler: &mut dyn Sampler, now: OffsetDateTime) -> Vec<SensorReading> {
    let readings: Vec<SensorReading> = (1..=SENSOR_COUNT)
        .map(|i| SensorReading {
            sensor_id: sensor_id(i),
            temperature: draw(sampler, SENSOR_TEMPERATURE),
            humidity: draw(sampler, SENSOR_HUMIDITY),
            soil_moisture: draw(sampler, SENSOR_SOIL_MOISTURE),
            ph_level: draw(sampler, SENSOR_PH),
            timestamp: now,
        })
        .collect();
    debug!("Generated {} simulated sensor readings", readings.len());
    readings
}

/// Simulated current weather for `location`.
pub fn weather_reading(
    sampler: &mut dyn Sampler,
    location: &str,
    now: OffsetDateTime,
) -> WeatherReading {
    WeatherReading {
        location: location.to_string(),
        temperature: draw(sampler, WEATHER_TEMPERATURE),
        humidity: draw(sampler, WEATHER_HUMIDITY),
        pressure: draw(sampler, WEATHER_PRESSURE),
        wind_speed: draw(sampler, WEATHER_WIND_SPEED),
        description: sampler.choose(&WEATHER_DESCRIPTIONS).to_string(),
        timestamp: now,
    }
}

/// Simulated daily forecast for `days` days starting at `today`.
///
/// Maximum and minimum temperatures are drawn independently.
pub fn forecast(sampler: &mut dyn Sampler, today: Date, days: usize) -> Vec<DailyForecast> {
    (0..days)
        .map(|offset| DailyForecast {
            date: today.saturating_add(Duration::days(offset as i64)),
            temperature_max: draw(sampler, FORECAST_TEMPERATURE_MAX),
            temperature_min: draw(sampler, FORECAST_TEMPERATURE_MIN),
            humidity: draw(sampler, FORECAST_HUMIDITY),
            precipitation: draw(sampler, FORECAST_PRECIPITATION),
            description: sampler.choose(&FORECAST_DESCRIPTIONS).to_string(),
        })
        .collect()
}
