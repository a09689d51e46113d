//! JSON API consumed by the web and mobile front ends

use std::sync::Arc;

use axum::{
    Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, error};

use crate::DroneWeatherError;
use crate::flight::{FlightAnalysis, FlightNarrative, ForecastVerdict, daily_verdicts, hourly_verdicts};
use crate::models::{DailyForecast, DroneLimits, Location, WeatherSnapshot};
use crate::weather::{CredentialCheck, WeatherSource};

const POWERED_BY: &str = "Enhanced Weather Analysis Engine";

/// Shared, read-only state of the API handlers
pub struct AppState {
    pub limits: DroneLimits,
    pub source: Arc<dyn WeatherSource>,
}

impl AppState {
    pub fn new(limits: DroneLimits, source: Arc<dyn WeatherSource>) -> Self {
        Self { limits, source }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherResponse {
    pub current: WeatherSnapshot,
    pub hourly: Vec<WeatherSnapshot>,
    pub daily: Vec<DailyForecast>,
    pub flight_analysis: FlightAnalysis,
    pub hourly_analysis: Vec<ForecastVerdict>,
    pub daily_analysis: Vec<ForecastVerdict>,
    pub drone_specs: DroneLimits,
    pub api_version: String,
    pub demo_mode: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    pub weather_data: AnalyzeWeatherData,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeWeatherData {
    pub current: WeatherSnapshot,
    #[serde(default)]
    pub demo_mode: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    #[serde(flatten)]
    pub narrative: FlightNarrative,
    pub powered_by: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyTestResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub test_data: CredentialCheck,
}

/// Failure of a weather lookup, rendered as `{ "error": ... }`
pub struct ApiError(DroneWeatherError);

impl From<DroneWeatherError> for ApiError {
    fn from(err: DroneWeatherError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!(error = %self.0, "Weather API error");
        let (status, body) = match &self.0 {
            DroneWeatherError::Authentication { .. } => (
                StatusCode::UNAUTHORIZED,
                json!({
                    "error": self.0.user_message(),
                    "details": "If you just created the API key, it may take a few minutes to activate."
                }),
            ),
            DroneWeatherError::Config { message } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": message }),
            ),
            DroneWeatherError::Validation { .. } => (
                StatusCode::BAD_REQUEST,
                json!({ "error": self.0.user_message() }),
            ),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": "Failed to fetch weather data" }),
            ),
        };
        (status, Json(body)).into_response()
    }
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/weather/{lat}/{lon}", get(get_weather))
        .route("/analyze-weather", post(analyze_weather))
        .route("/test-key", get(test_key))
}

async fn get_weather(
    State(state): State<Arc<AppState>>,
    Path((lat, lon)): Path<(f64, f64)>,
) -> Result<Json<WeatherResponse>, ApiError> {
    debug!(lat, lon, "Weather requested");
    let location = Location::new(lat, lon, String::new());
    if !location.is_valid() {
        return Err(DroneWeatherError::validation(format!(
            "coordinates out of range: {}",
            location.format_coordinates()
        ))
        .into());
    }

    let report = state.source.fetch(lat, lon).await?.truncated();

    let flight_analysis = FlightAnalysis::evaluate(&report.current, &state.limits);
    let hourly_analysis = hourly_verdicts(&report, &state.limits);
    let daily_analysis = daily_verdicts(&report, &state.limits);

    Ok(Json(WeatherResponse {
        current: report.current,
        hourly: report.hourly,
        daily: report.daily,
        flight_analysis,
        hourly_analysis,
        daily_analysis,
        drone_specs: state.limits.clone(),
        api_version: report.api_version,
        demo_mode: report.demo_mode,
    }))
}

async fn analyze_weather(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AnalyzeRequest>,
) -> Json<AnalyzeResponse> {
    let data = request.weather_data;
    let analysis = FlightAnalysis::evaluate(&data.current, &state.limits);
    let narrative = FlightNarrative::format(&data.current, &analysis, &state.limits, data.demo_mode);

    Json(AnalyzeResponse {
        narrative,
        powered_by: POWERED_BY,
    })
}

async fn test_key(State(state): State<Arc<AppState>>) -> Response {
    match state.source.verify_credentials().await {
        Ok(test_data) => Json(KeyTestResponse {
            status: "success",
            message: "API key is working",
            test_data,
        })
        .into_response(),
        Err(DroneWeatherError::Config { message }) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": message })),
        )
            .into_response(),
        Err(err) => {
            error!(error = %err, "API key test error");
            let details = match &err {
                DroneWeatherError::Authentication { details, .. } => details.clone(),
                other => other.to_string(),
            };
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "API key test failed", "details": details })),
            )
                .into_response()
        }
    }
}
