//! Data models for the drone weather advisor
//!
//! This module contains the core domain models organized by concern:
//! - Location: Geographic coordinates and metadata
//! - Snapshot: Single weather readings and daily forecast points
//! - Limits: The drone's operating envelope
//! - Report: A weather source's answer for one location

pub mod limits;
pub mod location;
pub mod report;
pub mod snapshot;

// Re-export all public types for convenient access
pub use limits::DroneLimits;
pub use location::Location;
pub use report::WeatherReport;
pub use snapshot::{DailyForecast, WeatherMain, WeatherSnapshot};
