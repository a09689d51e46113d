//! Weather report: current conditions plus hourly and daily forecasts

use serde::{Deserialize, Serialize};

use super::{DailyForecast, WeatherSnapshot};

/// Hourly points handed to the presentation layer
pub const MAX_HOURLY_POINTS: usize = 24;
/// Daily points handed to the presentation layer
pub const MAX_DAILY_POINTS: usize = 5;

/// Everything a weather source returns for one location query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherReport {
    pub current: WeatherSnapshot,
    #[serde(default)]
    pub hourly: Vec<WeatherSnapshot>,
    #[serde(default)]
    pub daily: Vec<DailyForecast>,
    /// Upstream API generation that produced the data ("3.0", "2.5" or "demo")
    pub api_version: String,
    /// Set when the data is synthetic
    #[serde(default)]
    pub demo_mode: bool,
}

impl WeatherReport {
    /// Cut the forecasts down to what is served to clients
    #[must_use]
    pub fn truncated(mut self) -> Self {
        self.hourly.truncate(MAX_HOURLY_POINTS);
        self.daily.truncate(MAX_DAILY_POINTS);
        self
    }
}
