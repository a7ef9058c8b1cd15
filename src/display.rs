//! Human-readable rendering of a consensus forecast

use crate::models::{DailyForecast, ForecastSeries};

const RULE_WIDTH: usize = 40;

/// Render the report for `city`.
///
/// An absent or empty forecast renders the banner followed by a failure
/// line naming the city.
#[must_use]
pub fn render(forecast: Option<&ForecastSeries>, city: &str) -> String {
    let city = title_case(city.trim());
    let rule = "=".repeat(RULE_WIDTH);

    let mut lines = vec![
        String::new(),
        rule.clone(),
        format!("Probabilistic Weather Forecast for {city}"),
        rule.clone(),
    ];

    let Some(forecast) = forecast.filter(|f| !f.is_empty()) else {
        lines.push(format!(
            "Could not generate a forecast for {city}. Please check the errors above."
        ));
        return lines.join("\n");
    };

    for day in &forecast.days {
        lines.push(String::new());
        lines.extend(format_day(day));
    }

    lines.push(String::new());
    lines.push(rule);
    lines.push(format!("Forecast based on consensus from {}", forecast.source));
    lines.join("\n")
}

fn format_day(day: &DailyForecast) -> [String; 4] {
    [
        format!("--- {} ---", day.date.format("%A, %B %d")),
        format!("  Condition: {}", day.condition),
        format!(
            "  Temperature: {:.1}°C to {:.1}°C",
            day.min_temp, day.max_temp
        ),
        format!("  Precipitation: {:.1} mm", day.precip_mm),
    ]
}

/// Upper-case each letter that follows a non-letter, lower-case the rest
#[must_use]
pub fn title_case(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut previous_is_letter = false;
    for ch in text.chars() {
        if ch.is_alphabetic() {
            if previous_is_letter {
                result.extend(ch.to_lowercase());
            } else {
                result.extend(ch.to_uppercase());
            }
            previous_is_letter = true;
        } else {
            result.push(ch);
            previous_is_letter = false;
        }
    }
    result
}
