//! Consensus aggregation across forecast sources
//!
//! Sources are aligned by day offset, not by date. Each offset is reduced on
//! its own: temperatures and precipitation by their mean rounded to one
//! decimal, the condition by a stable majority vote.

use crate::models::{ConditionCategory, DailyForecast, FORECAST_DAYS, ForecastSeries};
use tracing::debug;

/// Combine per-source series into one consensus series.
///
/// Absent sources are ignored. Returns `None` when no source is present.
/// A day offset that no source covers is left out rather than filled in,
/// so the result may be shorter than [`FORECAST_DAYS`] or even empty.
#[must_use]
pub fn aggregate(sources: &[Option<ForecastSeries>]) -> Option<ForecastSeries> {
    let valid: Vec<&ForecastSeries> = sources.iter().flatten().collect();
    if valid.is_empty() {
        debug!("No forecast sources available to aggregate");
        return None;
    }

    let days: Vec<DailyForecast> = (0..FORECAST_DAYS)
        .filter_map(|offset| aggregate_day(&valid, offset))
        .collect();

    let source = valid
        .iter()
        .map(|series| series.source.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    debug!(
        "Aggregated {} days from {} source(s)",
        days.len(),
        valid.len()
    );
    Some(ForecastSeries::new(source, days))
}

fn aggregate_day(sources: &[&ForecastSeries], offset: usize) -> Option<DailyForecast> {
    let entries: Vec<&DailyForecast> = sources.iter().filter_map(|s| s.day(offset)).collect();
    let first = entries.first()?;

    Some(DailyForecast {
        // first contributing source wins; dates are not cross-checked
        date: first.date,
        max_temp: rounded_mean(entries.iter().map(|e| e.max_temp)),
        min_temp: rounded_mean(entries.iter().map(|e| e.min_temp)),
        precip_mm: rounded_mean(entries.iter().map(|e| e.precip_mm)),
        condition: stable_mode(entries.iter().map(|e| e.condition))
            .unwrap_or(ConditionCategory::Other),
    })
}

/// Arithmetic mean rounded to one decimal place
fn rounded_mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        return 0.0;
    }
    round_one_decimal(sum / count as f64)
}

/// Round the exact binary value to one decimal; true ties go to even
fn round_one_decimal(value: f64) -> f64 {
    format!("{value:.1}").parse().unwrap_or(value)
}

/// Most frequent category; ties go to whichever was seen first
fn stable_mode(conditions: impl Iterator<Item = ConditionCategory>) -> Option<ConditionCategory> {
    let mut counts: Vec<(ConditionCategory, usize)> = Vec::new();
    for condition in conditions {
        match counts.iter_mut().find(|(c, _)| *c == condition) {
            Some((_, count)) => *count += 1,
            None => counts.push((condition, 1)),
        }
    }

    let mut best: Option<(ConditionCategory, usize)> = None;
    for (condition, count) in counts {
        if best.is_none_or(|(_, best_count)| count > best_count) {
            best = Some((condition, count));
        }
    }
    best.map(|(condition, _)| condition)
}
