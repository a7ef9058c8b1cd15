//! Core models module
//!
//! Internal forecast types plus the wire structures of the external services.

pub mod condition;
pub mod forecast;
pub mod location;
pub mod openmeteo;
pub mod weatherapi;

pub use condition::{ConditionCategory, normalize_condition};
pub use forecast::{DailyForecast, FORECAST_DAYS, ForecastSeries};
pub use location::Coordinates;
