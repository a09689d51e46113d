//! Error types and handling for the drone weather advisor

use thiserror::Error;

/// Main error type for the drone weather advisor
#[derive(Error, Debug)]
pub enum DroneWeatherError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Upstream API communication errors
    #[error("API error: {message}")]
    Api { message: String },

    /// The upstream API rejected our credentials
    #[error("Authentication error: {message}")]
    Authentication { message: String, details: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },
}

impl DroneWeatherError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new API error
    pub fn api<S: Into<String>>(message: S) -> Self {
        Self::Api {
            message: message.into(),
        }
    }

    /// Create a new authentication error
    pub fn authentication<S: Into<String>, D: Into<String>>(message: S, details: D) -> Self {
        Self::Authentication {
            message: message.into(),
            details: details.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            DroneWeatherError::Config { message } => message.clone(),
            DroneWeatherError::Api { .. } => {
                "Unable to connect to the weather service. Please check your internet connection."
                    .to_string()
            }
            DroneWeatherError::Authentication { .. } => {
                "API key authentication failed. Please check your OpenWeather API key.".to_string()
            }
            DroneWeatherError::Validation { message } => {
                format!("Invalid input: {message}")
            }
        }
    }
}

impl From<reqwest::Error> for DroneWeatherError {
    fn from(err: reqwest::Error) -> Self {
        DroneWeatherError::api(err.to_string())
    }
}

impl From<reqwest_middleware::Error> for DroneWeatherError {
    fn from(err: reqwest_middleware::Error) -> Self {
        DroneWeatherError::api(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let config_err = DroneWeatherError::config("missing API key");
        assert!(matches!(config_err, DroneWeatherError::Config { .. }));

        let api_err = DroneWeatherError::api("connection failed");
        assert!(matches!(api_err, DroneWeatherError::Api { .. }));

        let auth_err = DroneWeatherError::authentication("rejected", "Invalid API key");
        assert!(matches!(auth_err, DroneWeatherError::Authentication { .. }));

        let validation_err = DroneWeatherError::validation("invalid coordinates");
        assert!(matches!(validation_err, DroneWeatherError::Validation { .. }));
    }

    #[test]
    fn test_user_messages() {
        let config_err = DroneWeatherError::config("Please update your OpenWeather API key");
        assert_eq!(config_err.user_message(), "Please update your OpenWeather API key");

        let api_err = DroneWeatherError::api("test");
        assert!(api_err.user_message().contains("Unable to connect"));

        let auth_err = DroneWeatherError::authentication("401", "bad key");
        assert!(auth_err.user_message().contains("API key authentication failed"));

        let validation_err = DroneWeatherError::validation("test input");
        assert!(validation_err.user_message().contains("test input"));
    }
}
