//! Presentation mappings for statuses and weather conditions

use super::analysis::{CALM_WIND_MAX_MS, LIGHT_WIND_MAX_MS, Severity};
use crate::models::{DroneLimits, WeatherMain};

impl Severity {
    /// Badge color: green, blue, yellow, red
    #[must_use]
    pub fn color(self) -> &'static str {
        match self {
            Severity::Excellent => "#28a745",
            Severity::Good => "#17a2b8",
            Severity::Caution => "#ffc107",
            Severity::Danger => "#dc3545",
        }
    }

    /// Emoji badge for terminal output
    #[must_use]
    pub fn badge(self) -> &'static str {
        match self {
            Severity::Excellent => "🟢",
            Severity::Good => "🔵",
            Severity::Caution => "🟡",
            Severity::Danger => "🔴",
        }
    }
}

impl WeatherMain {
    /// Icon name for the condition group
    #[must_use]
    pub fn icon(&self) -> &'static str {
        match self {
            WeatherMain::Clear => "sunny",
            WeatherMain::Clouds | WeatherMain::Mist | WeatherMain::Fog => "cloudy",
            WeatherMain::Rain | WeatherMain::Drizzle => "rainy",
            WeatherMain::Snow => "snow",
            WeatherMain::Thunderstorm => "thunderstorm",
            WeatherMain::Other(_) => "cloudy",
        }
    }
}

/// Color of a wind reading, using the same tiers as the wind factor
#[must_use]
pub fn wind_color(wind_speed_ms: f64, limits: &DroneLimits) -> &'static str {
    let tier = if wind_speed_ms <= CALM_WIND_MAX_MS {
        Severity::Excellent
    } else if wind_speed_ms <= LIGHT_WIND_MAX_MS {
        Severity::Good
    } else if wind_speed_ms <= limits.max_wind_speed_ms {
        Severity::Caution
    } else {
        Severity::Danger
    };
    tier.color()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_colors() {
        assert_eq!(Severity::Excellent.color(), "#28a745");
        assert_eq!(Severity::Good.color(), "#17a2b8");
        assert_eq!(Severity::Caution.color(), "#ffc107");
        assert_eq!(Severity::Danger.color(), "#dc3545");
    }

    #[test]
    fn test_weather_icons() {
        assert_eq!(WeatherMain::Clear.icon(), "sunny");
        assert_eq!(WeatherMain::Drizzle.icon(), "rainy");
        assert_eq!(WeatherMain::Fog.icon(), "cloudy");
        assert_eq!(WeatherMain::Thunderstorm.icon(), "thunderstorm");
        assert_eq!(WeatherMain::from("Tornado").icon(), "cloudy");
    }

    #[test]
    fn test_wind_colors() {
        let limits = DroneLimits::default();
        assert_eq!(wind_color(5.0, &limits), "#28a745");
        assert_eq!(wind_color(8.0, &limits), "#17a2b8");
        assert_eq!(wind_color(10.0, &limits), "#ffc107");
        assert_eq!(wind_color(10.5, &limits), "#dc3545");
    }
}
