//! HTTP REST API for the AgroSmart agriculture monitoring demo.
//!
//! This crate provides a service that:
//! - Simulates five field sensors and stores every generated reading
//! - Accepts submitted readings and flags agronomic alerts
//! - Serves weather and forecasts from a simulated or OpenWeather provider
//! - Records irrigation activations and reports their status
//! - Predicts crop yield and scores soil health
//!
//! All state lives in memory and is lost on restart.
//!
//! # REST API Endpoints
//!
//! - `GET /` - API banner
//! - `GET /health` - Service health check
//! - `GET /sensors/current` - Generate and store one reading per sensor
//! - `POST /sensors/data` - Submit a reading, returns triggered alerts
//! - `GET /sensors/history` - Paginated stored readings (`sensor_id`, `since`, `until`)
//! - `GET /weather/{city}` - Current weather (cached per city)
//! - `GET /weather/forecast/{city}` - Five-day forecast
//! - `GET /weather-cache` - Cached weather readings
//! - `POST /irrigation/activate` - Start irrigating a zone
//! - `GET /irrigation/status` - Irrigation overview
//! - `POST /analysis/crop-prediction` - Yield prediction (`crop_type`, `area_hectares` query)
//! - `GET /analysis/soil-health` - Soil health over recent readings
//! - `GET /dashboard/summary` - Farm overview
//!
//! # Configuration
//!
//! The service reads configuration from `~/.config/agrosmart/server.toml`:
//!
//! ```toml
//! [server]
//! bind = "0.0.0.0:8000"
//! cors_origins = []          # empty allows any origin
//!
//! [weather]
//! provider = "simulated"     # or "openweather"
//! timeout_secs = 10
//!
//! [simulation]
//! seed = 42
//!
//! [thresholds]
//! min_soil_moisture = 30.0
//! ```

use std::sync::Arc;

use axum::Router;
use axum::http::HeaderValue;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

pub mod api;
pub mod config;
pub mod state;

pub use config::{
    Config, ConfigError, ServerConfig, SimulationConfig, ValidationError, WeatherConfig,
    WeatherProviderKind,
};
pub use state::AppState;

/// Build the CORS layer for `origins`. An empty list allows any origin.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin '{}'", origin);
                None
            }
        })
        .collect();
    layer.allow_origin(AllowOrigin::list(allowed))
}

/// Build the full application with tracing and CORS layers.
pub fn app(state: Arc<AppState>) -> Router {
    let cors = cors_layer(&state.config.server.cors_origins);
    Router::new()
        .merge(api::router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
