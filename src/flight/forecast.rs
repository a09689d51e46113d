//! Evaluation of every point of a weather report

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::analysis::{FlightAnalysis, Severity};
use super::display::wind_color;
use crate::models::{DailyForecast, DroneLimits, WeatherReport};

/// Overall status of one forecast point, with the colors the front ends paint it in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastVerdict {
    pub timestamp: Option<DateTime<Utc>>,
    pub overall_severity: Severity,
    pub color: String,
    pub wind_color: String,
}

impl ForecastVerdict {
    fn new(
        timestamp: Option<DateTime<Utc>>,
        overall_severity: Severity,
        wind_speed_ms: f64,
        limits: &DroneLimits,
    ) -> Self {
        Self {
            timestamp,
            overall_severity,
            color: overall_severity.color().to_string(),
            wind_color: wind_color(wind_speed_ms, limits).to_string(),
        }
    }
}

/// Evaluate a day at both temperature extremes and keep the worse result
#[must_use]
pub fn evaluate_daily(day: &DailyForecast, limits: &DroneLimits) -> FlightAnalysis {
    let [cold, warm] = day.extreme_snapshots();
    let cold = FlightAnalysis::evaluate(&cold, limits);
    let warm = FlightAnalysis::evaluate(&warm, limits);

    if cold.overall_severity > warm.overall_severity {
        cold
    } else {
        warm
    }
}

/// Verdict for each hourly point, in report order
#[must_use]
pub fn hourly_verdicts(report: &WeatherReport, limits: &DroneLimits) -> Vec<ForecastVerdict> {
    report
        .hourly
        .iter()
        .map(|point| {
            ForecastVerdict::new(
                point.timestamp,
                FlightAnalysis::evaluate(point, limits).overall_severity,
                point.wind_speed_ms,
                limits,
            )
        })
        .collect()
}

/// Verdict for each day, in report order
#[must_use]
pub fn daily_verdicts(report: &WeatherReport, limits: &DroneLimits) -> Vec<ForecastVerdict> {
    report
        .daily
        .iter()
        .map(|day| {
            ForecastVerdict::new(
                Some(day.timestamp),
                evaluate_daily(day, limits).overall_severity,
                day.wind_speed_ms,
                limits,
            )
        })
        .collect()
}
