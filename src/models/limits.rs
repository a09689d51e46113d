//! Drone profile: the operating envelope a reading is evaluated against

use serde::{Deserialize, Serialize};

/// Operating limits of one drone model.
///
/// Loaded from the `[drone]` configuration table and passed explicitly to
/// the evaluator, so several profiles can be evaluated side by side.
/// Configuration keys are snake_case, API output is camelCase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct DroneLimits {
    /// Model name shown in narrative text
    #[serde(default = "default_model")]
    pub model: String,
    /// Maximum wind resistance in m/s
    #[serde(default = "default_max_wind_speed")]
    pub max_wind_speed_ms: f64,
    /// Lowest operating temperature in Celsius
    #[serde(default = "default_min_operating_temp")]
    pub min_operating_temp_c: f64,
    /// Highest operating temperature in Celsius
    #[serde(default = "default_max_operating_temp")]
    pub max_operating_temp_c: f64,
    /// Maximum takeoff altitude above sea level in meters
    #[serde(default = "default_max_altitude")]
    pub max_altitude_m: f64,
    /// Ingress protection rating
    #[serde(default = "default_ip_rating")]
    pub ip_rating: String,
}

fn default_model() -> String {
    "DJI Neo 2".to_string()
}

fn default_max_wind_speed() -> f64 {
    10.0
}

fn default_min_operating_temp() -> f64 {
    -10.0
}

fn default_max_operating_temp() -> f64 {
    40.0
}

fn default_max_altitude() -> f64 {
    4000.0
}

fn default_ip_rating() -> String {
    "None".to_string()
}

impl Default for DroneLimits {
    fn default() -> Self {
        Self {
            model: default_model(),
            max_wind_speed_ms: default_max_wind_speed(),
            min_operating_temp_c: default_min_operating_temp(),
            max_operating_temp_c: default_max_operating_temp(),
            max_altitude_m: default_max_altitude(),
            ip_rating: default_ip_rating(),
        }
    }
}

impl DroneLimits {
    /// Whether a temperature lies inside the operating range, bounds included
    #[must_use]
    pub fn temperature_in_range(&self, temperature_c: f64) -> bool {
        temperature_c >= self.min_operating_temp_c && temperature_c <= self.max_operating_temp_c
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_profile() {
        let limits = DroneLimits::default();
        assert_eq!(limits.model, "DJI Neo 2");
        assert_eq!(limits.max_wind_speed_ms, 10.0);
        assert_eq!(limits.min_operating_temp_c, -10.0);
        assert_eq!(limits.max_operating_temp_c, 40.0);
        assert_eq!(limits.max_altitude_m, 4000.0);
        assert_eq!(limits.ip_rating, "None");
    }

    #[test]
    fn test_temperature_range_is_inclusive() {
        let limits = DroneLimits::default();
        assert!(limits.temperature_in_range(-10.0));
        assert!(limits.temperature_in_range(40.0));
        assert!(!limits.temperature_in_range(40.1));
        assert!(!limits.temperature_in_range(f64::NAN));
    }

    #[test]
    fn test_partial_profile_fills_defaults() {
        let limits: DroneLimits =
            serde_json::from_str(r#"{"model": "Mavic 3", "max_wind_speed_ms": 12.0, "ip_rating": "IP43"}"#)
                .unwrap();
        assert_eq!(limits.model, "Mavic 3");
        assert_eq!(limits.max_wind_speed_ms, 12.0);
        assert_eq!(limits.min_operating_temp_c, -10.0);
        assert_eq!(limits.ip_rating, "IP43");
    }

    #[test]
    fn test_serializes_camel_case() {
        let value = serde_json::to_value(DroneLimits::default()).unwrap();
        assert_eq!(value["maxWindSpeedMs"], 10.0);
        assert_eq!(value["maxOperatingTempC"], 40.0);
        assert_eq!(value["ipRating"], "None");
        assert!(value.get("max_wind_speed_ms").is_none());
    }
}
