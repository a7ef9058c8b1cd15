//! Daily forecast records and per-source forecast series

use super::ConditionCategory;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Forecast horizon in days, counted from today
pub const FORECAST_DAYS: usize = 3;

/// One day of forecast data
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DailyForecast {
    /// Calendar date of this entry
    pub date: NaiveDate,
    /// Maximum temperature in Celsius
    pub max_temp: f64,
    /// Minimum temperature in Celsius
    pub min_temp: f64,
    /// Total precipitation in millimetres, never negative
    pub precip_mm: f64,
    /// Normalized condition
    pub condition: ConditionCategory,
}

/// Ordered daily entries produced by one source (or the consensus of several)
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ForecastSeries {
    /// Name of the producing source, or the joined names for a consensus
    pub source: String,
    /// Entries indexed by day offset from today
    pub days: Vec<DailyForecast>,
}

impl ForecastSeries {
    /// Create new series
    #[must_use]
    pub fn new(source: impl Into<String>, days: Vec<DailyForecast>) -> Self {
        Self {
            source: source.into(),
            days,
        }
    }

    /// Entry at a day offset, if this series reaches that far
    #[must_use]
    pub fn day(&self, offset: usize) -> Option<&DailyForecast> {
        self.days.get(offset)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.days.len()
    }
}
