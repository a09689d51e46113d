//! Text summary and recommendation built from a flight analysis

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use super::analysis::{CALM_WIND_MAX_MS, FlightAnalysis, Severity};
use crate::models::{DroneLimits, WeatherSnapshot};

const HUMID_ABOVE_PCT: f64 = 80.0;
const REDUCED_VISIBILITY_BELOW_M: f64 = 5_000.0;
const COMFORT_MIN_C: f64 = 0.0;
const COMFORT_MAX_C: f64 = 30.0;

/// Human-readable verdict for one reading
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightNarrative {
    pub summary: String,
    pub recommendation: String,
    pub confidence: String,
    pub timestamp: String,
}

impl FlightNarrative {
    /// Build the narrative, stamped with the current local time
    #[must_use]
    pub fn format(
        snapshot: &WeatherSnapshot,
        analysis: &FlightAnalysis,
        limits: &DroneLimits,
        is_demo: bool,
    ) -> Self {
        Self::format_at(snapshot, analysis, limits, is_demo, Local::now())
    }

    /// Build the narrative with an explicit timestamp
    #[must_use]
    pub fn format_at(
        snapshot: &WeatherSnapshot,
        analysis: &FlightAnalysis,
        limits: &DroneLimits,
        is_demo: bool,
        now: DateTime<Local>,
    ) -> Self {
        let overall = analysis.overall_severity;
        let summary = format!(
            "Current conditions in your location show {} with {}°C temperature and {} m/s wind speed. {} Temperature is {} for drone operations. {} {} {}",
            snapshot.describe(),
            snapshot.temperature_c,
            snapshot.wind_speed_ms,
            wind_clause(snapshot.wind_speed_ms, limits),
            temperature_word(snapshot.temperature_c),
            humidity_clause(snapshot.humidity_pct),
            visibility_clause(snapshot.visibility_m()),
            detailed_advice(overall),
        );

        let confidence = if is_demo {
            "Demo Mode - Simulated Analysis"
        } else {
            "Real-time Analysis"
        };

        Self {
            summary,
            recommendation: recommendation(overall).to_string(),
            confidence: confidence.to_string(),
            timestamp: format_local_timestamp(now),
        }
    }
}

/// One-line recommendation for an overall status
#[must_use]
pub fn recommendation(severity: Severity) -> &'static str {
    match severity {
        Severity::Excellent => "🟢 Perfect conditions for drone flight. Enjoy your flight!",
        Severity::Good => "🔵 Good conditions for flying. Monitor weather changes.",
        Severity::Caution => "🟡 Fly with caution. Check all safety protocols.",
        Severity::Danger => "🔴 Do not fly. Wait for better conditions.",
    }
}

fn detailed_advice(severity: Severity) -> &'static str {
    match severity {
        Severity::Excellent => {
            "All parameters are within optimal ranges. Great time for aerial photography, mapping, or recreational flying. Consider taking advantage of these ideal conditions for complex maneuvers or extended flight sessions."
        }
        Severity::Good => {
            "Conditions are favorable but keep an eye on weather updates. Perfect for most drone operations with standard precautions. Check forecasts for any incoming weather changes."
        }
        Severity::Caution => {
            "Some conditions require extra attention. Ensure you have experience with current weather conditions, double-check all equipment, and consider shorter flight times. Stay close to takeoff point."
        }
        Severity::Danger => {
            "Current conditions pose significant risks to safe drone operation. Wait for weather to improve before attempting flight. Monitor forecasts for better conditions."
        }
    }
}

fn wind_clause(wind_speed_ms: f64, limits: &DroneLimits) -> String {
    if wind_speed_ms > limits.max_wind_speed_ms {
        format!(
            "Wind speed exceeds {} limits - flight not recommended.",
            limits.model
        )
    } else if wind_speed_ms <= CALM_WIND_MAX_MS {
        "Excellent wind conditions for stable drone flight.".to_string()
    } else {
        "Wind conditions are within acceptable range for experienced pilots.".to_string()
    }
}

fn temperature_word(temperature_c: f64) -> &'static str {
    if (COMFORT_MIN_C..=COMFORT_MAX_C).contains(&temperature_c) {
        "optimal"
    } else if temperature_c < COMFORT_MIN_C {
        "cold but manageable"
    } else {
        "warm"
    }
}

fn humidity_clause(humidity_pct: Option<f64>) -> &'static str {
    match humidity_pct {
        Some(humidity) if humidity > HUMID_ABOVE_PCT => {
            "High humidity may affect battery performance."
        }
        _ => "Humidity levels are acceptable.",
    }
}

fn visibility_clause(visibility_m: f64) -> &'static str {
    if visibility_m < REDUCED_VISIBILITY_BELOW_M {
        "Reduced visibility - maintain close visual contact with drone."
    } else {
        "Good visibility for drone operations."
    }
}

/// Local time in the familiar `10/17/2026, 3:04:05 PM` shape
fn format_local_timestamp(now: DateTime<Local>) -> String {
    now.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string()
}
