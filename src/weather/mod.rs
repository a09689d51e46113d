//! Weather sources
//!
//! A [`WeatherSource`] answers "what is the weather at this coordinate" with a
//! [`WeatherReport`]. The OpenWeather client degrades to synthetic data when
//! the upstream API is unusable; the demo source only ever produces synthetic
//! data.

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::models::WeatherReport;
use crate::{DroneWeatherError, Result};

pub mod demo;
pub mod openweather;

pub use demo::{DemoWeatherSource, demo_report};
pub use openweather::OpenWeatherClient;

/// Result of a successful credential probe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialCheck {
    pub location: String,
    pub temperature_c: f64,
    pub weather: String,
}

#[async_trait]
pub trait WeatherSource: Send + Sync {
    /// Current conditions and forecasts for a coordinate
    async fn fetch(&self, latitude: f64, longitude: f64) -> Result<WeatherReport>;

    /// Probe the upstream credentials with a minimal request
    async fn verify_credentials(&self) -> Result<CredentialCheck> {
        Err(DroneWeatherError::config("API key not configured"))
    }
}

/// Fetch a report, substituting synthetic data when the source fails
pub async fn fetch_or_demo(
    source: &dyn WeatherSource,
    latitude: f64,
    longitude: f64,
) -> WeatherReport {
    match source.fetch(latitude, longitude).await {
        Ok(report) => report,
        Err(err) => {
            tracing::warn!(error = %err, "Weather source unavailable, using demo data");
            demo_report(Utc::now())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingSource;

    #[async_trait]
    impl WeatherSource for FailingSource {
        async fn fetch(&self, _latitude: f64, _longitude: f64) -> Result<WeatherReport> {
            Err(DroneWeatherError::api("connection refused"))
        }
    }

    #[tokio::test]
    async fn test_fetch_or_demo_degrades_to_demo() {
        let report = fetch_or_demo(&FailingSource, 36.5, -4.6).await;
        assert!(report.demo_mode);
        assert_eq!(report.api_version, "demo");
    }

    #[tokio::test]
    async fn test_default_credential_probe_reports_missing_key() {
        let err = FailingSource.verify_credentials().await.unwrap_err();
        assert!(matches!(err, DroneWeatherError::Config { .. }));
        assert_eq!(err.user_message(), "API key not configured");
    }
}
