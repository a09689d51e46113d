//! Flight condition module
//!
//! This module turns weather readings into flight advice:
//! - Per-factor evaluation and overall verdict
//! - Narrative summary and recommendation text
//! - Forecast-wide verdicts
//! - Display colors and icons

pub mod analysis;
pub mod display;
pub mod forecast;
pub mod narrative;

pub use analysis::{ConditionFactor, FactorType, FlightAnalysis, Severity, aggregate_severity};
pub use display::wind_color;
pub use forecast::{ForecastVerdict, daily_verdicts, evaluate_daily, hourly_verdicts};
pub use narrative::{FlightNarrative, recommendation};
