//! Flight condition evaluation
//!
//! Maps a single weather reading onto three risk factors (wind, temperature,
//! precipitation/visibility) and aggregates them into an overall verdict for
//! a given drone profile. Evaluation is pure: no I/O, no shared state.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::{DroneLimits, WeatherMain, WeatherSnapshot};

/// Upper bound of the calm wind tier in m/s
pub const CALM_WIND_MAX_MS: f64 = 5.0;
/// Upper bound of the light wind tier in m/s
pub const LIGHT_WIND_MAX_MS: f64 = 8.0;

/// Risk level of a factor, ordered from best to worst
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Excellent,
    Good,
    Caution,
    Danger,
}

impl Severity {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Excellent => "excellent",
            Severity::Good => "good",
            Severity::Caution => "caution",
            Severity::Danger => "danger",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Evaluated dimension of flight safety
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FactorType {
    Wind,
    Temperature,
    PrecipitationOrVisibility,
}

/// One classified factor with its fixed display message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionFactor {
    pub factor_type: FactorType,
    pub severity: Severity,
    pub message: String,
}

impl ConditionFactor {
    fn new(factor_type: FactorType, severity: Severity, message: &str) -> Self {
        Self {
            factor_type,
            severity,
            message: message.to_string(),
        }
    }

    /// Classify sustained wind speed
    #[must_use]
    pub fn wind(wind_speed_ms: f64, limits: &DroneLimits) -> Self {
        let (severity, message) = if wind_speed_ms <= CALM_WIND_MAX_MS {
            (Severity::Excellent, "Calm winds - perfect for flying")
        } else if wind_speed_ms <= LIGHT_WIND_MAX_MS {
            (Severity::Good, "Light winds - good flying conditions")
        } else if wind_speed_ms <= limits.max_wind_speed_ms {
            (Severity::Caution, "Moderate winds - fly with caution")
        } else {
            (Severity::Danger, "High winds - do not fly")
        };
        Self::new(FactorType::Wind, severity, message)
    }

    /// Classify temperature against the operating range; only two tiers exist
    #[must_use]
    pub fn temperature(temperature_c: f64, limits: &DroneLimits) -> Self {
        if limits.temperature_in_range(temperature_c) {
            Self::new(
                FactorType::Temperature,
                Severity::Good,
                "Temperature within operating range",
            )
        } else {
            Self::new(
                FactorType::Temperature,
                Severity::Danger,
                "Temperature outside operating range",
            )
        }
    }

    /// Classify the main condition group
    #[must_use]
    pub fn precipitation(weather_main: &WeatherMain) -> Self {
        let (severity, message) = if weather_main.is_precipitation() {
            (Severity::Danger, "Precipitation detected - do not fly")
        } else if *weather_main == WeatherMain::Clouds {
            (
                Severity::Caution,
                "Cloudy conditions - maintain visual contact",
            )
        } else {
            (Severity::Good, "Clear conditions for flying")
        };
        Self::new(FactorType::PrecipitationOrVisibility, severity, message)
    }
}

/// Complete flight analysis for one reading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightAnalysis {
    /// Wind, temperature and precipitation/visibility, in that order
    pub conditions: Vec<ConditionFactor>,
    pub overall_severity: Severity,
    pub wind_speed_ms: f64,
    pub wind_gust_ms: f64,
    pub temperature_c: f64,
    pub weather_main: WeatherMain,
}

impl FlightAnalysis {
    /// Evaluate a reading against a drone profile
    #[must_use]
    pub fn evaluate(snapshot: &WeatherSnapshot, limits: &DroneLimits) -> Self {
        let conditions = vec![
            ConditionFactor::wind(snapshot.wind_speed_ms, limits),
            ConditionFactor::temperature(snapshot.temperature_c, limits),
            ConditionFactor::precipitation(&snapshot.weather_main),
        ];
        let overall_severity = aggregate_severity(&conditions);

        Self {
            conditions,
            overall_severity,
            wind_speed_ms: snapshot.wind_speed_ms,
            wind_gust_ms: snapshot.wind_gust_ms(),
            temperature_c: snapshot.temperature_c,
            weather_main: snapshot.weather_main.clone(),
        }
    }

    /// Factor of the given type
    #[must_use]
    pub fn factor(&self, factor_type: FactorType) -> Option<&ConditionFactor> {
        self.conditions.iter().find(|c| c.factor_type == factor_type)
    }

    #[must_use]
    pub fn is_flyable(&self) -> bool {
        self.overall_severity != Severity::Danger
    }
}

/// Overall verdict: danger wins, then caution, otherwise excellent.
///
/// A set mixing excellent and good factors reports excellent; `Good` is never
/// produced here.
#[must_use]
pub fn aggregate_severity(conditions: &[ConditionFactor]) -> Severity {
    let has = |severity: Severity| conditions.iter().any(|c| c.severity == severity);

    if has(Severity::Danger) {
        Severity::Danger
    } else if has(Severity::Caution) {
        Severity::Caution
    } else {
        Severity::Excellent
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn snapshot(temperature_c: f64, wind_speed_ms: f64, weather_main: &str) -> WeatherSnapshot {
        WeatherSnapshot::new(temperature_c, wind_speed_ms, WeatherMain::from(weather_main))
    }

    fn severities(analysis: &FlightAnalysis) -> Vec<Severity> {
        analysis.conditions.iter().map(|c| c.severity).collect()
    }

    #[rstest]
    #[case(0.0, Severity::Excellent)]
    #[case(4.99, Severity::Excellent)]
    #[case(5.0, Severity::Excellent)]
    #[case(5.01, Severity::Good)]
    #[case(8.0, Severity::Good)]
    #[case(8.01, Severity::Caution)]
    #[case(10.0, Severity::Caution)]
    #[case(10.01, Severity::Danger)]
    #[case(25.0, Severity::Danger)]
    fn test_wind_tiers(#[case] wind: f64, #[case] expected: Severity) {
        let factor = ConditionFactor::wind(wind, &DroneLimits::default());
        assert_eq!(factor.factor_type, FactorType::Wind);
        assert_eq!(factor.severity, expected);
    }

    #[test]
    fn test_wind_top_tier_follows_profile() {
        let limits = DroneLimits {
            max_wind_speed_ms: 12.0,
            ..DroneLimits::default()
        };
        assert_eq!(ConditionFactor::wind(11.5, &limits).severity, Severity::Caution);
        assert_eq!(ConditionFactor::wind(12.5, &limits).severity, Severity::Danger);
    }

    #[test]
    fn test_wind_limit_below_light_tier() {
        // A fragile profile still reports the fixed calm/light tiers first
        let limits = DroneLimits {
            max_wind_speed_ms: 6.0,
            ..DroneLimits::default()
        };
        assert_eq!(ConditionFactor::wind(7.0, &limits).severity, Severity::Good);
        assert_eq!(ConditionFactor::wind(8.5, &limits).severity, Severity::Danger);
    }

    #[test]
    fn test_wind_messages() {
        let limits = DroneLimits::default();
        assert_eq!(
            ConditionFactor::wind(2.0, &limits).message,
            "Calm winds - perfect for flying"
        );
        assert_eq!(
            ConditionFactor::wind(7.0, &limits).message,
            "Light winds - good flying conditions"
        );
        assert_eq!(
            ConditionFactor::wind(9.0, &limits).message,
            "Moderate winds - fly with caution"
        );
        assert_eq!(
            ConditionFactor::wind(11.0, &limits).message,
            "High winds - do not fly"
        );
    }

    #[rstest]
    #[case(-10.0, Severity::Good)]
    #[case(0.0, Severity::Good)]
    #[case(40.0, Severity::Good)]
    #[case(-10.5, Severity::Danger)]
    #[case(40.5, Severity::Danger)]
    #[case(50.0, Severity::Danger)]
    fn test_temperature_tiers(#[case] temperature: f64, #[case] expected: Severity) {
        let factor = ConditionFactor::temperature(temperature, &DroneLimits::default());
        assert_eq!(factor.factor_type, FactorType::Temperature);
        assert_eq!(factor.severity, expected);
        assert_ne!(factor.severity, Severity::Excellent);
        assert_ne!(factor.severity, Severity::Caution);
    }

    #[rstest]
    #[case("Rain", Severity::Danger)]
    #[case("Snow", Severity::Danger)]
    #[case("Thunderstorm", Severity::Danger)]
    #[case("Clouds", Severity::Caution)]
    #[case("Clear", Severity::Good)]
    #[case("Drizzle", Severity::Good)]
    #[case("Mist", Severity::Good)]
    #[case("Fog", Severity::Good)]
    #[case("Haze", Severity::Good)]
    #[case("", Severity::Good)]
    fn test_precipitation_tiers(#[case] main: &str, #[case] expected: Severity) {
        let factor = ConditionFactor::precipitation(&WeatherMain::from(main));
        assert_eq!(factor.factor_type, FactorType::PrecipitationOrVisibility);
        assert_eq!(factor.severity, expected);
    }

    #[test]
    fn test_rain_is_danger_regardless_of_other_fields() {
        let analysis = FlightAnalysis::evaluate(&snapshot(20.0, 1.0, "Rain"), &DroneLimits::default());
        assert_eq!(severities(&analysis), vec![Severity::Excellent, Severity::Good, Severity::Danger]);
        assert_eq!(analysis.overall_severity, Severity::Danger);
        assert_eq!(
            analysis.conditions[2].message,
            "Precipitation detected - do not fly"
        );
    }

    #[test]
    fn test_demo_reading_is_caution() {
        let analysis = FlightAnalysis::evaluate(&snapshot(18.0, 3.5, "Clouds"), &DroneLimits::default());

        assert_eq!(
            severities(&analysis),
            vec![Severity::Excellent, Severity::Good, Severity::Caution]
        );
        assert_eq!(analysis.overall_severity, Severity::Caution);
        assert!(analysis.is_flyable());
    }

    #[test]
    fn test_hostile_reading_is_danger_everywhere() {
        let analysis = FlightAnalysis::evaluate(
            &snapshot(50.0, 15.0, "Thunderstorm"),
            &DroneLimits::default(),
        );

        assert!(analysis.conditions.iter().all(|c| c.severity == Severity::Danger));
        assert_eq!(analysis.overall_severity, Severity::Danger);
        assert!(!analysis.is_flyable());
    }

    #[test]
    fn test_clear_calm_reading_is_excellent_overall() {
        let analysis = FlightAnalysis::evaluate(&snapshot(20.0, 2.0, "Clear"), &DroneLimits::default());

        assert_eq!(
            severities(&analysis),
            vec![Severity::Excellent, Severity::Good, Severity::Good]
        );
        assert_eq!(analysis.overall_severity, Severity::Excellent);
    }

    #[test]
    fn test_good_factors_still_aggregate_to_excellent() {
        let analysis = FlightAnalysis::evaluate(&snapshot(20.0, 7.0, "Clear"), &DroneLimits::default());

        assert_eq!(analysis.factor(FactorType::Wind).unwrap().severity, Severity::Good);
        assert_eq!(analysis.overall_severity, Severity::Excellent);
    }

    #[test]
    fn test_conditions_have_fixed_order_and_one_per_type() {
        let analysis = FlightAnalysis::evaluate(&snapshot(5.0, 9.0, "Snow"), &DroneLimits::default());
        let types: Vec<FactorType> = analysis.conditions.iter().map(|c| c.factor_type).collect();

        assert_eq!(
            types,
            vec![
                FactorType::Wind,
                FactorType::Temperature,
                FactorType::PrecipitationOrVisibility
            ]
        );
    }

    #[test]
    fn test_danger_iff_any_factor_is_danger() {
        let limits = DroneLimits::default();
        for temperature in [-20.0, 0.0, 20.0, 45.0] {
            for wind in [0.0, 6.0, 9.0, 12.0] {
                for main in ["Clear", "Clouds", "Rain", "Mist"] {
                    let analysis = FlightAnalysis::evaluate(&snapshot(temperature, wind, main), &limits);
                    let any_danger = analysis.conditions.iter().any(|c| c.severity == Severity::Danger);
                    assert_eq!(any_danger, analysis.overall_severity == Severity::Danger);
                    assert_ne!(analysis.overall_severity, Severity::Good);
                }
            }
        }
    }

    #[test]
    fn test_echoes_input_and_resolves_gust() {
        let mut reading = snapshot(12.0, 4.0, "Clear");
        let analysis = FlightAnalysis::evaluate(&reading, &DroneLimits::default());
        assert_eq!(analysis.wind_gust_ms, 4.0);
        assert_eq!(analysis.temperature_c, 12.0);
        assert_eq!(analysis.weather_main, WeatherMain::Clear);

        reading.wind_gust_ms = Some(7.5);
        let analysis = FlightAnalysis::evaluate(&reading, &DroneLimits::default());
        assert_eq!(analysis.wind_gust_ms, 7.5);
    }

    #[test]
    fn test_non_finite_readings_are_danger() {
        let limits = DroneLimits::default();
        let analysis = FlightAnalysis::evaluate(&snapshot(f64::NAN, f64::NAN, "Clear"), &limits);
        assert_eq!(analysis.conditions[0].severity, Severity::Danger);
        assert_eq!(analysis.conditions[1].severity, Severity::Danger);
        assert_eq!(analysis.overall_severity, Severity::Danger);
    }

    #[test]
    fn test_evaluation_is_idempotent() {
        let reading = snapshot(18.0, 8.0, "Clouds");
        let limits = DroneLimits::default();
        assert_eq!(
            FlightAnalysis::evaluate(&reading, &limits),
            FlightAnalysis::evaluate(&reading, &limits)
        );
    }

    #[test]
    fn test_severity_ordering_and_wire_names() {
        assert!(Severity::Excellent < Severity::Good);
        assert!(Severity::Good < Severity::Caution);
        assert!(Severity::Caution < Severity::Danger);
        assert_eq!(serde_json::to_value(Severity::Caution).unwrap(), "caution");
        assert_eq!(
            serde_json::from_value::<Severity>(serde_json::json!("danger")).unwrap(),
            Severity::Danger
        );
    }
}
