//! Drone Weather Advisor - flight-condition evaluation for consumer drones
//!
//! This library evaluates weather readings against a drone's operating
//! envelope, produces the advice text shown to pilots, and provides the
//! weather sources and HTTP API around that core.

pub mod api;
pub mod config;
pub mod error;
pub mod flight;
pub mod models;
pub mod telemetry;
pub mod weather;
pub mod web;

// Re-export core types for public API
pub use config::AdvisorConfig;
pub use error::DroneWeatherError;
pub use flight::{ConditionFactor, FactorType, FlightAnalysis, FlightNarrative, Severity};
pub use models::{DailyForecast, DroneLimits, Location, WeatherMain, WeatherReport, WeatherSnapshot};
pub use weather::{DemoWeatherSource, OpenWeatherClient, WeatherSource};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, DroneWeatherError>;
