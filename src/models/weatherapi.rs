//! WeatherAPI.com forecast response structures

use super::{DailyForecast, normalize_condition};
use crate::ForecastError;
use chrono::NaiveDate;
use serde::Deserialize;

/// Top level of `/v1/forecast.json`
#[derive(Debug, Deserialize)]
pub struct ForecastResponse {
    /// A body without a forecast block is treated as zero days
    #[serde(default)]
    pub forecast: ForecastBlock,
}

#[derive(Debug, Default, Deserialize)]
pub struct ForecastBlock {
    #[serde(default)]
    pub forecastday: Vec<ForecastDay>,
}

#[derive(Debug, Deserialize)]
pub struct ForecastDay {
    pub date: String,
    pub day: DaySummary,
}

#[derive(Debug, Deserialize)]
pub struct DaySummary {
    pub maxtemp_c: f64,
    pub mintemp_c: f64,
    pub totalprecip_mm: f64,
    pub condition: ConditionText,
}

#[derive(Debug, Deserialize)]
pub struct ConditionText {
    pub text: String,
}

impl TryFrom<&ForecastDay> for DailyForecast {
    type Error = ForecastError;

    fn try_from(day: &ForecastDay) -> Result<Self, Self::Error> {
        let date = NaiveDate::parse_from_str(&day.date, "%Y-%m-%d")
            .map_err(|e| ForecastError::parse(format!("invalid date '{}': {e}", day.date)))?;

        let precip_mm = day.day.totalprecip_mm;
        if !precip_mm.is_finite() || precip_mm < 0.0 {
            return Err(ForecastError::parse(format!(
                "invalid precipitation {precip_mm} on {date}"
            )));
        }

        Ok(DailyForecast {
            date,
            max_temp: day.day.maxtemp_c,
            min_temp: day.day.mintemp_c,
            precip_mm,
            condition: normalize_condition(&day.day.condition.text),
        })
    }
}
