//! Weather Consensus - multi-day consensus weather forecasts
//!
//! Resolves a city to coordinates, fetches daily forecasts from one or more
//! providers and merges them into a single consensus forecast.

pub mod aggregate;
pub mod api;
pub mod config;
pub mod display;
pub mod error;
pub mod forecast_service;
pub mod location_resolver;
pub mod logging;
pub mod models;
pub mod weather;

// Re-export core types for public API
pub use aggregate::aggregate;
pub use api::ApiClient;
pub use config::AppConfig;
pub use display::render;
pub use error::ForecastError;
pub use forecast_service::{ForecastOutcome, ForecastService};
pub use location_resolver::LocationResolver;
pub use models::{ConditionCategory, Coordinates, DailyForecast, ForecastSeries, normalize_condition};
pub use weather::{ForecastSource, WeatherApiProvider};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, ForecastError>;
