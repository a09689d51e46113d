//! Weather snapshot model: one reading for a single point in time

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Visibility assumed when the source does not report one, in meters
pub const DEFAULT_VISIBILITY_M: f64 = 10_000.0;

/// Main weather condition group as reported by the upstream source.
///
/// Unknown groups are kept verbatim in [`WeatherMain::Other`] so that
/// readings with a condition we have never seen still evaluate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum WeatherMain {
    Clear,
    Clouds,
    Rain,
    Snow,
    Thunderstorm,
    Drizzle,
    Mist,
    Fog,
    Other(String),
}

impl WeatherMain {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            WeatherMain::Clear => "Clear",
            WeatherMain::Clouds => "Clouds",
            WeatherMain::Rain => "Rain",
            WeatherMain::Snow => "Snow",
            WeatherMain::Thunderstorm => "Thunderstorm",
            WeatherMain::Drizzle => "Drizzle",
            WeatherMain::Mist => "Mist",
            WeatherMain::Fog => "Fog",
            WeatherMain::Other(other) => other,
        }
    }

    /// Whether this condition means falling precipitation that grounds the drone
    #[must_use]
    pub fn is_precipitation(&self) -> bool {
        matches!(
            self,
            WeatherMain::Rain | WeatherMain::Snow | WeatherMain::Thunderstorm
        )
    }
}

impl From<&str> for WeatherMain {
    fn from(value: &str) -> Self {
        match value {
            "Clear" => WeatherMain::Clear,
            "Clouds" => WeatherMain::Clouds,
            "Rain" => WeatherMain::Rain,
            "Snow" => WeatherMain::Snow,
            "Thunderstorm" => WeatherMain::Thunderstorm,
            "Drizzle" => WeatherMain::Drizzle,
            "Mist" => WeatherMain::Mist,
            "Fog" => WeatherMain::Fog,
            other => WeatherMain::Other(other.to_string()),
        }
    }
}

impl From<String> for WeatherMain {
    fn from(value: String) -> Self {
        WeatherMain::from(value.as_str())
    }
}

impl From<WeatherMain> for String {
    fn from(value: WeatherMain) -> Self {
        match value {
            WeatherMain::Other(other) => other,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for WeatherMain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single weather reading, either current conditions or one forecast point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherSnapshot {
    /// Time of the reading, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    /// Temperature in Celsius
    pub temperature_c: f64,
    /// Sustained wind speed in m/s
    pub wind_speed_ms: f64,
    /// Gust speed in m/s
    #[serde(default)]
    pub wind_gust_ms: Option<f64>,
    /// Relative humidity in percent
    #[serde(default)]
    pub humidity_pct: Option<f64>,
    /// Surface pressure in hPa
    #[serde(default)]
    pub pressure_hpa: Option<f64>,
    /// Visibility in meters
    #[serde(default)]
    pub visibility_m: Option<f64>,
    /// Main condition group
    pub weather_main: WeatherMain,
    /// Free-text description such as "scattered clouds"
    #[serde(default)]
    pub description: Option<String>,
}

impl WeatherSnapshot {
    /// Create a snapshot with only the fields the evaluator needs
    #[must_use]
    pub fn new(temperature_c: f64, wind_speed_ms: f64, weather_main: WeatherMain) -> Self {
        Self {
            timestamp: None,
            temperature_c,
            wind_speed_ms,
            wind_gust_ms: None,
            humidity_pct: None,
            pressure_hpa: None,
            visibility_m: None,
            weather_main,
            description: None,
        }
    }

    /// Gust speed, falling back to the sustained wind speed
    #[must_use]
    pub fn wind_gust_ms(&self) -> f64 {
        self.wind_gust_ms.unwrap_or(self.wind_speed_ms)
    }

    #[must_use]
    pub fn visibility_m(&self) -> f64 {
        self.visibility_m.unwrap_or(DEFAULT_VISIBILITY_M)
    }

    /// Human-readable condition text, falling back to the condition group
    #[must_use]
    pub fn describe(&self) -> String {
        match &self.description {
            Some(description) if !description.is_empty() => description.clone(),
            _ => self.weather_main.as_str().to_lowercase(),
        }
    }
}

/// One day of forecast, as a temperature range plus the day's dominant condition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyForecast {
    pub timestamp: DateTime<Utc>,
    pub temp_min_c: f64,
    pub temp_max_c: f64,
    pub wind_speed_ms: f64,
    pub weather_main: WeatherMain,
    #[serde(default)]
    pub description: Option<String>,
}

impl DailyForecast {
    /// Snapshots at the day's two temperature extremes
    #[must_use]
    pub fn extreme_snapshots(&self) -> [WeatherSnapshot; 2] {
        [self.temp_min_c, self.temp_max_c].map(|temperature_c| WeatherSnapshot {
            timestamp: Some(self.timestamp),
            description: self.description.clone(),
            ..WeatherSnapshot::new(temperature_c, self.wind_speed_ms, self.weather_main.clone())
        })
    }
}
