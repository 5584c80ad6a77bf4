//! REST API endpoints for the agrosmart-service.
//!
//! # Concurrency and Lock Acquisition
//!
//! Handlers never hold more than one lock at a time:
//!
//! - **`state.sampler`** (Mutex): Held only while drawing simulated values.
//! - **`state.sensors`** / **`state.irrigation`** (Mutex): Held for a single
//!   append or read.
//! - **`state.weather_cache`** (RwLock): Written after the provider call has
//!   completed, never across it.
//!
//! ## Error Handling
//!
//! All endpoints return structured JSON errors via [`AppError`]. Validation
//! failures return 400, missing sensor data returns 404 and weather provider
//! failures return 502.
//!
//! # Example
//!
//! ```ignore
//! use agrosmart_service::api;
//!
//! let app = api::router().with_state(state);
//! ```

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::{debug, warn};

use agrosmart_core::simulate::FORECAST_DAYS;
use agrosmart_core::{
    DashboardSummary, IrrigationSummary, SoilHealth, crop, dashboard, irrigation, simulate, soil,
};
use agrosmart_store::{RECENT_WINDOW, ReadingQuery};
use agrosmart_types::{
    CropPrediction, DailyForecast, IrrigationCommand, SensorReading, WeatherReading, timestamp,
};

use crate::state::AppState;

/// Create the API router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        // Service meta
        .route("/", get(root))
        .route("/health", get(health))
        // Sensors
        .route("/sensors/current", get(current_sensors))
        .route("/sensors/data", post(receive_sensor_data))
        .route("/sensors/history", get(sensor_history))
        // Weather
        .route("/weather/forecast/{city}", get(weather_forecast))
        .route("/weather/{city}", get(current_weather))
        .route("/weather-cache", get(weather_cache))
        // Irrigation
        .route("/irrigation/activate", post(activate_irrigation))
        .route("/irrigation/status", get(irrigation_status))
        // Analysis
        .route("/analysis/crop-prediction", post(crop_prediction))
        .route("/analysis/soil-health", get(soil_health))
        // Dashboard
        .route("/dashboard/summary", get(dashboard_summary))
}

#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub message: &'static str,
}

async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "AgroSmart API - Smart Agriculture System",
    })
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

/// Health check endpoint.
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: OffsetDateTime::now_utc(),
    })
}

// --- Sensors ---

/// Generate one reading per simulated sensor and store them all.
///
/// Every call appends [`SENSOR_COUNT`](simulate::SENSOR_COUNT) readings.
async fn current_sensors(State(state): State<Arc<AppState>>) -> Json<Vec<SensorReading>> {
    let readings = {
        let mut sampler = state.sampler.lock().await;
        simulate::current_sensors(&mut **sampler, OffsetDateTime::now_utc())
    };
    state.sensors.lock().await.extend(readings.iter().cloned());
    Json(readings)
}

/// Response to a submitted sensor reading.
#[derive(Debug, Serialize)]
pub struct IngestResponse {
    pub status: &'static str,
    pub alerts: Vec<String>,
}

/// Store a submitted reading and report any triggered alerts.
///
/// Any `sensor_id` is accepted, including the empty string.
async fn receive_sensor_data(
    State(state): State<Arc<AppState>>,
    Json(reading): Json<SensorReading>,
) -> Json<IngestResponse> {
    let alerts = state.config.thresholds.evaluate(&reading);
    if !alerts.is_empty() {
        warn!(
            sensor_id = %reading.sensor_id,
            count = alerts.len(),
            "Sensor reading triggered alerts"
        );
    }
    state.sensors.lock().await.append(reading);

    Json(IngestResponse {
        status: "success",
        alerts: alerts.iter().map(|a| a.message().to_string()).collect(),
    })
}

/// Query parameters for sensor history.
#[derive(Debug, Deserialize, Default)]
pub struct HistoryQuery {
    pub sensor_id: Option<String>,
    /// Earliest reading timestamp, inclusive.
    pub since: Option<String>,
    /// Latest reading timestamp, inclusive.
    pub until: Option<String>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

fn parse_bound(name: &str, raw: Option<&str>) -> Result<Option<OffsetDateTime>, AppError> {
    raw.map(|value| {
        timestamp::parse(value).map_err(|e| AppError::BadRequest(format!("{}: {}", name, e)))
    })
    .transpose()
}

/// Paginated response wrapper with metadata.
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T> {
    /// The data items.
    pub data: Vec<T>,
    /// Pagination metadata.
    pub pagination: PaginationMeta,
}

/// Pagination metadata.
#[derive(Debug, Serialize)]
pub struct PaginationMeta {
    /// Number of items returned.
    pub count: usize,
    /// Offset from the beginning.
    pub offset: usize,
    /// Maximum items requested (if specified).
    pub limit: Option<usize>,
    /// Whether there are more items available.
    pub has_more: bool,
    /// Number of items matching the query.
    pub total: usize,
}

/// Stored readings in insertion order.
///
/// # Query Parameters
///
/// - `sensor_id`: Only readings from this sensor
/// - `since` / `until`: Timestamp bounds (RFC 3339, or ISO 8601 read as UTC)
/// - `limit`: Maximum number of readings to return
/// - `offset`: Number of readings to skip
///
/// # Errors
///
/// Returns [`AppError::BadRequest`] if a timestamp bound cannot be parsed.
async fn sensor_history(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HistoryQuery>,
) -> Result<Json<PaginatedResponse<SensorReading>>, AppError> {
    let offset = params.offset.unwrap_or(0);
    let mut query = ReadingQuery::new().offset(offset);
    if let Some(sensor_id) = params.sensor_id.as_deref() {
        query = query.sensor(sensor_id);
    }
    if let Some(since) = parse_bound("since", params.since.as_deref())? {
        query = query.since(since);
    }
    if let Some(until) = parse_bound("until", params.until.as_deref())? {
        query = query.until(until);
    }
    if let Some(limit) = params.limit {
        query = query.limit(limit);
    }

    let page = state.sensors.lock().await.query(&query);
    let has_more = page.has_more(offset);

    Ok(Json(PaginatedResponse {
        pagination: PaginationMeta {
            count: page.items.len(),
            offset,
            limit: params.limit,
            has_more,
            total: page.total,
        },
        data: page.items,
    }))
}

// --- Weather ---

/// Current weather for `city`. The result replaces the cached entry.
///
/// # Errors
///
/// Returns [`AppError::UpstreamUnavailable`] if the provider fails.
async fn current_weather(
    State(state): State<Arc<AppState>>,
    Path(city): Path<String>,
) -> Result<Json<WeatherReading>, AppError> {
    let reading = state.weather.current(&city).await?;
    state.weather_cache.write().await.insert(reading.clone());
    Ok(Json(reading))
}

#[derive(Debug, Serialize)]
pub struct ForecastResponse {
    pub city: String,
    pub forecast: Vec<DailyForecast>,
}

/// Daily forecast for `city`. Forecasts are not cached.
async fn weather_forecast(
    State(state): State<Arc<AppState>>,
    Path(city): Path<String>,
) -> Result<Json<ForecastResponse>, AppError> {
    let forecast = state.weather.forecast(&city, FORECAST_DAYS).await?;
    Ok(Json(ForecastResponse { city, forecast }))
}

/// Snapshot of the weather cache, sorted by location.
async fn weather_cache(State(state): State<Arc<AppState>>) -> Json<Vec<WeatherReading>> {
    Json(state.weather_cache.read().await.snapshot())
}

// --- Irrigation ---

/// Confirmation of an irrigation activation.
#[derive(Debug, Serialize)]
pub struct ActivationResponse {
    pub message: String,
    /// Duration in minutes.
    pub duration: u32,
    #[serde(with = "time::serde::rfc3339")]
    pub estimated_completion: OffsetDateTime,
}

/// Start irrigating a zone.
///
/// Activations are never rejected for conflicts; two activations of the same
/// zone coexist.
///
/// # Errors
///
/// Returns [`AppError::BadRequest`] for an empty zone or a duration outside
/// 1-1440 minutes.
async fn activate_irrigation(
    State(state): State<Arc<AppState>>,
    Json(command): Json<IrrigationCommand>,
) -> Result<Json<ActivationResponse>, AppError> {
    let record = irrigation::activate(&command, OffsetDateTime::now_utc())?;
    let response = ActivationResponse {
        message: irrigation::activation_message(&record.zone_id),
        duration: record.duration_minutes,
        estimated_completion: record.estimated_completion(),
    };
    state.irrigation.lock().await.append(record);
    Ok(Json(response))
}

/// Irrigation overview.
///
/// `active_zones` counts every activation since startup.
async fn irrigation_status(State(state): State<Arc<AppState>>) -> Json<IrrigationSummary> {
    let (active_count, recent) = {
        let log = state.irrigation.lock().await;
        (
            log.active_count(),
            log.recent_active(irrigation::RECENT_ACTIVE_LIMIT),
        )
    };
    let mut sampler = state.sampler.lock().await;
    Json(irrigation::summarize(active_count, recent, &mut **sampler))
}

// --- Analysis ---

/// Query parameters for crop prediction.
#[derive(Debug, Deserialize)]
pub struct CropPredictionQuery {
    pub crop_type: String,
    pub area_hectares: f64,
}

/// Predict the yield of a crop.
///
/// # Errors
///
/// Returns [`AppError::BadRequest`] for an empty crop type or a non-positive
/// area.
async fn crop_prediction(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CropPredictionQuery>,
) -> Result<Json<CropPrediction>, AppError> {
    let mut sampler = state.sampler.lock().await;
    let prediction = crop::predict(&params.crop_type, params.area_hectares, &mut **sampler)?;
    Ok(Json(prediction))
}

/// Soil health over the most recent readings.
///
/// # Errors
///
/// Returns [`AppError::NotFound`] if no reading has been stored yet.
async fn soil_health(State(state): State<Arc<AppState>>) -> Result<Json<SoilHealth>, AppError> {
    let window = state.sensors.lock().await.recent(RECENT_WINDOW).to_vec();
    debug!(readings = window.len(), "Analyzing soil health");
    let mut sampler = state.sampler.lock().await;
    Ok(Json(soil::analyze(&window, &mut **sampler)?))
}

// --- Dashboard ---

async fn dashboard_summary(State(state): State<Arc<AppState>>) -> Json<DashboardSummary> {
    let active = state.irrigation.lock().await.active_count();
    Json(dashboard::summary(active, OffsetDateTime::now_utc()))
}

/// API error type.
#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    BadRequest(String),
    UpstreamUnavailable {
        provider: &'static str,
        detail: String,
    },
    Internal(String),
}

impl From<agrosmart_core::Error> for AppError {
    fn from(e: agrosmart_core::Error) -> Self {
        use agrosmart_core::Error;
        match e {
            err @ Error::NoSensorData => AppError::NotFound(err.to_string()),
            Error::InvalidInput(inner) => AppError::BadRequest(inner.to_string()),
            Error::UpstreamUnavailable { provider, detail } => {
                AppError::UpstreamUnavailable { provider, detail }
            }
            other => AppError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::UpstreamUnavailable { provider, detail } => {
                warn!(provider, detail = %detail, "Weather provider request failed");
                (
                    StatusCode::BAD_GATEWAY,
                    format!("Weather provider '{}' is unavailable", provider),
                )
            }
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = serde_json::json!({
            "error": message,
        });

        (status, Json(body)).into_response()
    }
}
