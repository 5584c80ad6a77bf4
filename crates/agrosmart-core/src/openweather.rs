//! OpenWeather integration.
//!
//! Uses the free-tier `/weather` and `/forecast` endpoints with metric units.
//! The forecast endpoint returns 3-hourly entries which are folded into one
//! row per UTC calendar day:
//!
//! - `temperature_max` / `temperature_min`: extremes over the day
//! - `humidity`: mean over the day
//! - `precipitation`: rain plus snow, summed
//! - `description`: the most frequent description, earliest wins on ties
//!
//! Requests are not retried. Errors never include the request URL, which
//! carries the API key.

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use time::{Date, OffsetDateTime};
use tracing::debug;

use agrosmart_types::{DailyForecast, WeatherReading};

use crate::error::{Error, Result};
use crate::util::{mean, round_to};
use crate::weather::WeatherProvider;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const PROVIDER: &str = "openweather";

/// Connection settings for [`OpenWeatherProvider`].
#[derive(Clone)]
pub struct OpenWeatherConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl OpenWeatherConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl fmt::Debug for OpenWeatherConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenWeatherConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// [`WeatherProvider`] backed by the OpenWeather HTTP API.
#[derive(Debug)]
pub struct OpenWeatherProvider {
    config: OpenWeatherConfig,
    http_client: reqwest::Client,
}

impl OpenWeatherProvider {
    /// Create a provider.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if the API key is empty or the HTTP
    /// client cannot be built.
    pub fn new(config: OpenWeatherConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(Error::InvalidConfig(
                "OpenWeather requires an API key".to_string(),
            ));
        }
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("agrosmart/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::InvalidConfig(format!("HTTP client: {}", e)))?;
        Ok(Self {
            config,
            http_client,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    async fn fetch<T: DeserializeOwned>(&self, path: &str, location: &str) -> Result<T> {
        debug!(path, location, "Querying OpenWeather");
        let response = self
            .http_client
            .get(self.endpoint(path))
            .query(&[
                ("q", location),
                ("appid", self.config.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await
            .map_err(|e| Error::upstream(PROVIDER, e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::upstream(
                PROVIDER,
                format!("HTTP {} for {}", status, path),
            ));
        }

        response
            .json()
            .await
            .map_err(|e| Error::upstream(PROVIDER, format!("invalid response: {}", e.without_url())))
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    async fn current(&self, location: &str) -> Result<WeatherReading> {
        let wire: CurrentResponse = self.fetch("weather", location).await?;
        Ok(current_from_wire(wire, location))
    }

    async fn forecast(&self, location: &str, days: usize) -> Result<Vec<DailyForecast>> {
        let wire: ForecastResponse = self.fetch("forecast", location).await?;
        Ok(daily_from_wire(wire, days))
    }
}

// --- Wire format ---

#[derive(Debug, Deserialize)]
struct CurrentResponse {
    dt: Option<i64>,
    main: MainBlock,
    #[serde(default)]
    wind: Option<WindBlock>,
    #[serde(default)]
    weather: Vec<ConditionBlock>,
}

#[derive(Debug, Deserialize)]
struct MainBlock {
    temp: f64,
    #[serde(default)]
    temp_min: Option<f64>,
    #[serde(default)]
    temp_max: Option<f64>,
    humidity: f64,
    #[serde(default)]
    pressure: f64,
}

#[derive(Debug, Deserialize)]
struct WindBlock {
    #[serde(default)]
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct ConditionBlock {
    description: String,
}

#[derive(Debug, Default, Deserialize)]
struct VolumeBlock {
    #[serde(rename = "3h", default)]
    three_hours: f64,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    list: Vec<ForecastEntry>,
}

#[derive(Debug, Deserialize)]
struct ForecastEntry {
    dt: i64,
    main: MainBlock,
    #[serde(default)]
    weather: Vec<ConditionBlock>,
    #[serde(default)]
    rain: Option<VolumeBlock>,
    #[serde(default)]
    snow: Option<VolumeBlock>,
}

fn capitalize(description: &str) -> String {
    let mut chars = description.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn first_description(conditions: &[ConditionBlock]) -> String {
    conditions
        .first()
        .map(|c| capitalize(&c.description))
        .unwrap_or_default()
}

fn current_from_wire(wire: CurrentResponse, location: &str) -> WeatherReading {
    let timestamp = wire
        .dt
        .and_then(|dt| OffsetDateTime::from_unix_timestamp(dt).ok())
        .unwrap_or_else(OffsetDateTime::now_utc);
    WeatherReading {
        location: location.to_string(),
        temperature: round_to(wire.main.temp, 1),
        humidity: round_to(wire.main.humidity, 1),
        pressure: round_to(wire.main.pressure, 1),
        wind_speed: round_to(wire.wind.map(|w| w.speed).unwrap_or_default(), 1),
        description: first_description(&wire.weather),
        timestamp,
    }
}

#[derive(Default)]
struct DayAccumulator {
    temperature_max: Option<f64>,
    temperature_min: Option<f64>,
    humidity: Vec<f64>,
    precipitation: f64,
    descriptions: Vec<String>,
}

impl DayAccumulator {
    fn add(&mut self, entry: ForecastEntry) {
        let high = entry.main.temp_max.unwrap_or(entry.main.temp);
        let low = entry.main.temp_min.unwrap_or(entry.main.temp);
        self.temperature_max = Some(self.temperature_max.map_or(high, |m| m.max(high)));
        self.temperature_min = Some(self.temperature_min.map_or(low, |m| m.min(low)));
        self.humidity.push(entry.main.humidity);
        self.precipitation += entry.rain.unwrap_or_default().three_hours
            + entry.snow.unwrap_or_default().three_hours;
        self.descriptions.push(first_description(&entry.weather));
    }

    fn dominant_description(&self) -> String {
        let mut best: Option<(&str, usize)> = None;
        for candidate in &self.descriptions {
            let count = self.descriptions.iter().filter(|d| *d == candidate).count();
            if best.is_none_or(|(_, n)| count > n) {
                best = Some((candidate.as_str(), count));
            }
        }
        best.map(|(d, _)| d.to_string()).unwrap_or_default()
    }

    fn finish(self, date: Date) -> DailyForecast {
        DailyForecast {
            date,
            temperature_max: round_to(self.temperature_max.unwrap_or_default(), 1),
            temperature_min: round_to(self.temperature_min.unwrap_or_default(), 1),
            humidity: round_to(mean(self.humidity.iter().copied()).unwrap_or_default(), 1),
            precipitation: round_to(self.precipitation, 1),
            description: self.dominant_description(),
        }
    }
}

fn daily_from_wire(wire: ForecastResponse, days: usize) -> Vec<DailyForecast> {
    let mut by_day: BTreeMap<Date, DayAccumulator> = BTreeMap::new();
    for entry in wire.list {
        let Ok(at) = OffsetDateTime::from_unix_timestamp(entry.dt) else {
            continue;
        };
        by_day.entry(at.date()).or_default().add(entry);
    }
    by_day
        .into_iter()
        .take(days)
        .map(|(date, acc)| acc.finish(date))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, datetime};

    const CURRENT: &str = r#"{
        "coord": {"lon": -47.06, "lat": -22.91},
        "weather": [{"id": 802, "main": "Clouds", "description": "scattered clouds", "icon": "03d"}],
        "main": {"temp": 27.34, "feels_like": 28.1, "temp_min": 26.0, "temp_max": 28.9,
                 "pressure": 1014, "humidity": 58},
        "wind": {"speed": 3.61, "deg": 140},
        "dt": 1792152000,
        "name": "Campinas"
    }"#;

    // 2026-10-16 21:00 UTC, 2026-10-17 00:00/03:00/06:00 UTC
    const FORECAST: &str = r#"{
        "cod": "200",
        "list": [
            {"dt": 1792184400,
             "main": {"temp": 24.0, "temp_min": 23.5, "temp_max": 24.2, "humidity": 70},
             "weather": [{"description": "light rain"}],
             "rain": {"3h": 0.8}},
            {"dt": 1792195200,
             "main": {"temp": 21.0, "temp_min": 20.4, "temp_max": 21.0, "humidity": 80},
             "weather": [{"description": "overcast clouds"}]},
            {"dt": 1792206000,
             "main": {"temp": 19.0, "temp_min": 18.7, "temp_max": 19.0, "humidity": 84},
             "weather": [{"description": "light rain"}],
             "rain": {"3h": 1.25}},
            {"dt": 1792216800,
             "main": {"temp": 18.0, "temp_min": 17.9, "temp_max": 18.0, "humidity": 86},
             "weather": [{"description": "light rain"}],
             "rain": {"3h": 0.5}}
        ],
        "city": {"name": "Campinas", "timezone": -10800}
    }"#;

    #[test]
    fn test_current_from_wire() {
        let wire: CurrentResponse = serde_json::from_str(CURRENT).unwrap();
        let reading = current_from_wire(wire, "campinas");

        assert_eq!(reading.location, "campinas");
        assert_eq!(reading.temperature, 27.3);
        assert_eq!(reading.humidity, 58.0);
        assert_eq!(reading.pressure, 1014.0);
        assert_eq!(reading.wind_speed, 3.6);
        assert_eq!(reading.description, "Scattered clouds");
        assert_eq!(reading.timestamp, datetime!(2026-10-16 12:00:00 UTC));
    }

    #[test]
    fn test_current_missing_optional_blocks() {
        let wire: CurrentResponse =
            serde_json::from_str(r#"{"main": {"temp": 20.0, "humidity": 50}}"#).unwrap();
        let reading = current_from_wire(wire, "x");
        assert_eq!(reading.wind_speed, 0.0);
        assert_eq!(reading.description, "");
    }

    #[test]
    fn test_forecast_folds_into_days() {
        let wire: ForecastResponse = serde_json::from_str(FORECAST).unwrap();
        let days = daily_from_wire(wire, 5);

        assert_eq!(days.len(), 2);
        assert_eq!(days[0].date, date!(2026 - 10 - 16));
        assert_eq!(days[0].precipitation, 0.8);

        let next = &days[1];
        assert_eq!(next.date, date!(2026 - 10 - 17));
        assert_eq!(next.temperature_max, 21.0);
        assert_eq!(next.temperature_min, 17.9);
        assert_eq!(next.humidity, 83.3);
        assert_eq!(next.precipitation, 1.8);
        assert_eq!(next.description, "Light rain");
    }

    #[test]
    fn test_forecast_respects_day_limit() {
        let wire: ForecastResponse = serde_json::from_str(FORECAST).unwrap();
        let days = daily_from_wire(wire, 1);
        assert_eq!(days.len(), 1);
        assert_eq!(days[0].date, date!(2026 - 10 - 16));
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("light rain"), "Light rain");
        assert_eq!(capitalize("érosion"), "Érosion");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_requires_api_key() {
        let result = OpenWeatherProvider::new(OpenWeatherConfig::new("  "));
        assert!(matches!(result, Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_config_debug_redacts_key() {
        let config = OpenWeatherConfig::new("secret-key");
        assert!(!format!("{:?}", config).contains("secret-key"));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_upstream_error() {
        let provider = OpenWeatherProvider::new(OpenWeatherConfig {
            api_key: "secret-key".to_string(),
            base_url: "http://127.0.0.1:9".to_string(),
            timeout: Duration::from_secs(2),
        })
        .unwrap();

        let err = provider.current("Campinas").await.unwrap_err();
        assert!(matches!(err, Error::UpstreamUnavailable { provider: "openweather", .. }));
        assert!(!err.to_string().contains("secret-key"));
    }
}
