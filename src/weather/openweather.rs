//! OpenWeather API client
//!
//! Prefers the One Call 3.0 endpoint. Keys that are not (yet) entitled to it
//! are answered with 401/403, in which case the free 2.5 current-weather and
//! forecast endpoints are queried and converted into the same report shape.
//! If those fail too, synthetic data is served.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::StatusCode;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument, warn};

use super::{CredentialCheck, WeatherSource, demo_report};
use crate::config::AdvisorConfig;
use crate::models::WeatherReport;
use crate::{DroneWeatherError, Result};

const MISSING_KEY_MESSAGE: &str = "Please update your OpenWeather API key in the configuration";

/// Weather source backed by the OpenWeather HTTP API
pub struct OpenWeatherClient {
    client: ClientWithMiddleware,
    base_url: String,
    api_key: Option<String>,
}

impl OpenWeatherClient {
    /// Create a client from the weather section of the configuration
    pub fn new(config: &AdvisorConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.weather.timeout_seconds.into()))
            .user_agent(concat!("drone-weather/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let retry_policy =
            ExponentialBackoff::builder().build_with_max_retries(config.weather.max_retries);
        let client = ClientBuilder::new(http)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        Ok(Self {
            client,
            base_url: config.weather.base_url.trim_end_matches('/').to_string(),
            api_key: config.usable_api_key().map(str::to_string),
        })
    }

    fn api_key(&self, missing_message: &str) -> Result<&str> {
        self.api_key
            .as_deref()
            .ok_or_else(|| DroneWeatherError::config(missing_message))
    }

    /// One Call 3.0: current, hourly and daily in a single request
    #[instrument(skip(self, api_key))]
    async fn one_call(&self, latitude: f64, longitude: f64, api_key: &str) -> Result<WeatherReport> {
        let url = format!(
            "{}/data/3.0/onecall?lat={latitude}&lon={longitude}&units=metric&exclude=minutely,alerts&appid={api_key}",
            self.base_url
        );
        let response: wire::OneCallResponse = self.get_json(&url).await?;
        Ok(wire::from_one_call(response))
    }

    /// 2.5 current weather plus 3-hourly forecast, fetched concurrently
    #[instrument(skip(self, api_key))]
    async fn legacy(&self, latitude: f64, longitude: f64, api_key: &str) -> Result<WeatherReport> {
        let current_url = format!(
            "{}/data/2.5/weather?lat={latitude}&lon={longitude}&units=metric&appid={api_key}",
            self.base_url
        );
        let forecast_url = format!(
            "{}/data/2.5/forecast?lat={latitude}&lon={longitude}&units=metric&appid={api_key}",
            self.base_url
        );

        let (current, forecast) = futures::try_join!(
            self.get_json::<wire::CurrentResponse>(&current_url),
            self.get_json::<wire::ForecastResponse>(&forecast_url),
        )?;
        Ok(wire::from_legacy(current, forecast))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        debug!(%status, "OpenWeather responded");

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            let details = match response.json::<wire::ErrorResponse>().await {
                Ok(body) => body.message,
                Err(_) => status.to_string(),
            };
            return Err(DroneWeatherError::authentication(
                format!("OpenWeather rejected the API key ({status})"),
                details,
            ));
        }

        if !status.is_success() {
            return Err(DroneWeatherError::api(format!(
                "OpenWeather returned {status}"
            )));
        }

        response
            .json::<T>()
            .await
            .map_err(|err| DroneWeatherError::api(format!("Invalid OpenWeather response: {err}")))
    }
}

#[async_trait]
impl WeatherSource for OpenWeatherClient {
    async fn fetch(&self, latitude: f64, longitude: f64) -> Result<WeatherReport> {
        let api_key = self.api_key(MISSING_KEY_MESSAGE)?;

        match self.one_call(latitude, longitude, api_key).await {
            Ok(report) => {
                info!("Using One Call API 3.0");
                Ok(report)
            }
            Err(DroneWeatherError::Authentication { .. }) => {
                info!("One Call API 3.0 not available, trying 2.5 API");
                match self.legacy(latitude, longitude, api_key).await {
                    Ok(report) => {
                        info!("Using OpenWeather API 2.5 as fallback");
                        Ok(report)
                    }
                    Err(err) => {
                        warn!(error = %err, "Both APIs failed, using demo data");
                        Ok(demo_report(Utc::now()))
                    }
                }
            }
            Err(err) => Err(err),
        }
    }

    #[instrument(skip(self))]
    async fn verify_credentials(&self) -> Result<CredentialCheck> {
        let api_key = self.api_key("API key not configured")?;
        let url = format!(
            "{}/data/2.5/weather?q=London&units=metric&appid={api_key}",
            self.base_url
        );

        let response: wire::CurrentResponse = self.get_json(&url).await?;
        let (_, description) = wire::condition(&response.weather);
        Ok(CredentialCheck {
            location: response.name.unwrap_or_default(),
            temperature_c: response.main.temp,
            weather: description.unwrap_or_default(),
        })
    }
}

/// OpenWeather response structures and conversion into the report model
mod wire {
    use chrono::{DateTime, NaiveDate, Utc};
    use serde::Deserialize;

    use crate::models::{
        DailyForecast, WeatherMain, WeatherReport, WeatherSnapshot, report::MAX_DAILY_POINTS,
    };

    /// 3-hourly points taken from the 2.5 forecast as the hourly series
    const LEGACY_HOURLY_POINTS: usize = 8;

    #[derive(Debug, Deserialize)]
    pub struct ErrorResponse {
        pub message: String,
    }

    #[derive(Debug, Deserialize)]
    pub struct Condition {
        pub main: String,
        #[serde(default)]
        pub description: Option<String>,
    }

    #[derive(Debug, Deserialize)]
    pub struct OneCallResponse {
        pub current: OneCallPoint,
        #[serde(default)]
        pub hourly: Vec<OneCallPoint>,
        #[serde(default)]
        pub daily: Vec<OneCallDay>,
    }

    #[derive(Debug, Deserialize)]
    pub struct OneCallPoint {
        pub dt: i64,
        pub temp: f64,
        #[serde(default)]
        pub pressure: Option<f64>,
        #[serde(default)]
        pub humidity: Option<f64>,
        #[serde(default)]
        pub visibility: Option<f64>,
        pub wind_speed: f64,
        #[serde(default)]
        pub wind_gust: Option<f64>,
        #[serde(default)]
        pub weather: Vec<Condition>,
    }

    #[derive(Debug, Deserialize)]
    pub struct DayTemperature {
        pub min: f64,
        pub max: f64,
    }

    #[derive(Debug, Deserialize)]
    pub struct OneCallDay {
        pub dt: i64,
        pub temp: DayTemperature,
        pub wind_speed: f64,
        #[serde(default)]
        pub weather: Vec<Condition>,
    }

    #[derive(Debug, Deserialize)]
    pub struct MainBlock {
        pub temp: f64,
        #[serde(default)]
        pub pressure: Option<f64>,
        #[serde(default)]
        pub humidity: Option<f64>,
    }

    #[derive(Debug, Deserialize)]
    pub struct WindBlock {
        pub speed: f64,
        #[serde(default)]
        pub gust: Option<f64>,
    }

    #[derive(Debug, Deserialize)]
    pub struct CurrentResponse {
        pub dt: i64,
        #[serde(default)]
        pub name: Option<String>,
        pub main: MainBlock,
        #[serde(default)]
        pub visibility: Option<f64>,
        pub wind: WindBlock,
        #[serde(default)]
        pub weather: Vec<Condition>,
    }

    #[derive(Debug, Deserialize)]
    pub struct ForecastResponse {
        pub list: Vec<ForecastItem>,
    }

    #[derive(Debug, Deserialize)]
    pub struct ForecastItem {
        pub dt: i64,
        pub main: MainBlock,
        pub wind: WindBlock,
        #[serde(default)]
        pub weather: Vec<Condition>,
    }

    /// Main group and description of the first listed condition
    pub fn condition(weather: &[Condition]) -> (WeatherMain, Option<String>) {
        weather.first().map_or_else(
            || (WeatherMain::Other(String::new()), None),
            |c| (WeatherMain::from(c.main.as_str()), c.description.clone()),
        )
    }

    fn timestamp(dt: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(dt, 0).unwrap_or_default()
    }

    fn one_call_snapshot(point: OneCallPoint) -> WeatherSnapshot {
        let (weather_main, description) = condition(&point.weather);
        WeatherSnapshot {
            timestamp: Some(timestamp(point.dt)),
            temperature_c: point.temp,
            wind_speed_ms: point.wind_speed,
            wind_gust_ms: point.wind_gust,
            humidity_pct: point.humidity,
            pressure_hpa: point.pressure,
            visibility_m: point.visibility,
            weather_main,
            description,
        }
    }

    pub fn from_one_call(response: OneCallResponse) -> WeatherReport {
        let daily = response
            .daily
            .into_iter()
            .map(|day| {
                let (weather_main, description) = condition(&day.weather);
                DailyForecast {
                    timestamp: timestamp(day.dt),
                    temp_min_c: day.temp.min,
                    temp_max_c: day.temp.max,
                    wind_speed_ms: day.wind_speed,
                    weather_main,
                    description,
                }
            })
            .collect();

        WeatherReport {
            current: one_call_snapshot(response.current),
            hourly: response.hourly.into_iter().map(one_call_snapshot).collect(),
            daily,
            api_version: "3.0".to_string(),
            demo_mode: false,
        }
    }

    fn forecast_snapshot(item: &ForecastItem) -> WeatherSnapshot {
        let (weather_main, description) = condition(&item.weather);
        WeatherSnapshot {
            timestamp: Some(timestamp(item.dt)),
            wind_gust_ms: item.wind.gust,
            description,
            ..WeatherSnapshot::new(item.main.temp, item.wind.speed, weather_main)
        }
    }

    /// Group 3-hourly points by calendar day (UTC), keeping a running
    /// temperature range and the first point's wind and condition
    fn group_daily(list: &[ForecastItem]) -> Vec<DailyForecast> {
        let mut days: Vec<(NaiveDate, DailyForecast)> = Vec::new();

        for item in list {
            let at = timestamp(item.dt);
            let date = at.date_naive();
            match days.iter_mut().find(|(day, _)| *day == date) {
                Some((_, day)) => {
                    day.temp_min_c = day.temp_min_c.min(item.main.temp);
                    day.temp_max_c = day.temp_max_c.max(item.main.temp);
                }
                None => {
                    let (weather_main, description) = condition(&item.weather);
                    days.push((
                        date,
                        DailyForecast {
                            timestamp: at,
                            temp_min_c: item.main.temp,
                            temp_max_c: item.main.temp,
                            wind_speed_ms: item.wind.speed,
                            weather_main,
                            description,
                        },
                    ));
                }
            }
        }

        days.into_iter()
            .take(MAX_DAILY_POINTS)
            .map(|(_, day)| day)
            .collect()
    }

    pub fn from_legacy(current: CurrentResponse, forecast: ForecastResponse) -> WeatherReport {
        let (weather_main, description) = condition(&current.weather);
        let current = WeatherSnapshot {
            timestamp: Some(timestamp(current.dt)),
            temperature_c: current.main.temp,
            wind_speed_ms: current.wind.speed,
            wind_gust_ms: current.wind.gust,
            humidity_pct: current.main.humidity,
            pressure_hpa: current.main.pressure,
            visibility_m: current.visibility,
            weather_main,
            description,
        };

        let hourly = forecast
            .list
            .iter()
            .take(LEGACY_HOURLY_POINTS)
            .map(forecast_snapshot)
            .collect();

        WeatherReport {
            current,
            hourly,
            daily: group_daily(&forecast.list),
            api_version: "2.5".to_string(),
            demo_mode: false,
        }
    }
}
