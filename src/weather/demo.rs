//! Synthetic weather used when no real data is available

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use rand::RngExt;

use super::WeatherSource;
use crate::Result;
use crate::models::{DailyForecast, WeatherMain, WeatherReport, WeatherSnapshot};

const HOURLY_POINTS: i64 = 24;
const DAILY_POINTS: i64 = 5;

/// Source that always answers with synthetic data
#[derive(Debug, Clone, Copy, Default)]
pub struct DemoWeatherSource;

#[async_trait]
impl WeatherSource for DemoWeatherSource {
    async fn fetch(&self, _latitude: f64, _longitude: f64) -> Result<WeatherReport> {
        Ok(demo_report(Utc::now()))
    }
}

/// The fixed synthetic "current" reading: mild, light breeze, scattered clouds
#[must_use]
pub fn demo_current(now: DateTime<Utc>) -> WeatherSnapshot {
    WeatherSnapshot {
        timestamp: Some(now),
        temperature_c: 18.0,
        wind_speed_ms: 3.5,
        wind_gust_ms: Some(5.2),
        humidity_pct: Some(65.0),
        pressure_hpa: Some(1013.0),
        visibility_m: Some(10_000.0),
        weather_main: WeatherMain::Clouds,
        description: Some("scattered clouds".to_string()),
    }
}

/// Synthetic report: fixed current reading, jittered hourly and daily forecasts
#[must_use]
pub fn demo_report(now: DateTime<Utc>) -> WeatherReport {
    let mut rng = rand::rng();

    let hourly = (0..HOURLY_POINTS)
        .map(|i| {
            let phase = i as f64 * 0.3;
            let weather_main = if i < 12 {
                WeatherMain::Clouds
            } else {
                WeatherMain::Clear
            };
            WeatherSnapshot {
                timestamp: Some(now + Duration::hours(i)),
                wind_gust_ms: Some(4.0 + rng.random_range(0.0..6.0)),
                description: Some("demo weather".to_string()),
                ..WeatherSnapshot::new(
                    18.0 + phase.sin() * 5.0,
                    3.0 + rng.random_range(0.0..4.0),
                    weather_main,
                )
            }
        })
        .collect();

    let daily = (0..DAILY_POINTS)
        .map(|i| DailyForecast {
            timestamp: now + Duration::days(i),
            temp_min_c: 12.0 + i as f64,
            temp_max_c: 22.0 + i as f64,
            wind_speed_ms: 2.0 + rng.random_range(0.0..6.0),
            weather_main: WeatherMain::Clear,
            description: Some("demo weather".to_string()),
        })
        .collect();

    WeatherReport {
        current: demo_current(now),
        hourly,
        daily,
        api_version: "demo".to_string(),
        demo_mode: true,
    }
}
