//! Normalized weather condition categories

use serde::{Deserialize, Serialize};
use std::fmt;

/// Small fixed vocabulary that free-text provider descriptions collapse into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConditionCategory {
    Rain,
    Snow,
    Thunderstorm,
    Clouds,
    Clear,
    Fog,
    Other,
}

/// Keyword sets in precedence order; the first set with a hit wins.
const KEYWORD_RULES: &[(ConditionCategory, &[&str])] = &[
    (ConditionCategory::Rain, &["rain", "drizzle", "shower"]),
    (ConditionCategory::Snow, &["snow", "sleet", "ice", "blizzard"]),
    (ConditionCategory::Thunderstorm, &["thunder", "storm"]),
    (ConditionCategory::Clouds, &["cloud", "overcast"]),
    (ConditionCategory::Clear, &["clear", "sunny", "fair"]),
    (ConditionCategory::Fog, &["mist", "fog", "haze"]),
];

impl ConditionCategory {
    /// Classify a provider's free-text description.
    ///
    /// Matching is a case-insensitive substring search, so "Patchy rain
    /// nearby" is `Rain` and "Moderate or heavy rain with thunder" is also
    /// `Rain` because rain keywords take precedence over thunder.
    #[must_use]
    pub fn from_description(text: &str) -> Self {
        let text = text.to_lowercase();
        KEYWORD_RULES
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|keyword| text.contains(keyword)))
            .map_or(Self::Other, |(category, _)| *category)
    }

    /// Display label
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Rain => "Rain",
            Self::Snow => "Snow",
            Self::Thunderstorm => "Thunderstorm",
            Self::Clouds => "Clouds",
            Self::Clear => "Clear",
            Self::Fog => "Fog",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for ConditionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Shorthand for [`ConditionCategory::from_description`]
#[must_use]
pub fn normalize_condition(text: &str) -> ConditionCategory {
    ConditionCategory::from_description(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Light rain", ConditionCategory::Rain)]
    #[case("Patchy light drizzle", ConditionCategory::Rain)]
    #[case("Light rain shower", ConditionCategory::Rain)]
    #[case("Moderate or heavy rain with thunder", ConditionCategory::Rain)]
    #[case("Blowing snow", ConditionCategory::Snow)]
    #[case("Patchy sleet possible", ConditionCategory::Snow)]
    #[case("Ice pellets", ConditionCategory::Snow)]
    #[case("Blizzard", ConditionCategory::Snow)]
    #[case("Moderate or heavy snow with thunder", ConditionCategory::Snow)]
    #[case("Thundery outbreaks possible", ConditionCategory::Thunderstorm)]
    #[case("Tropical storm", ConditionCategory::Thunderstorm)]
    #[case("Partly cloudy", ConditionCategory::Clouds)]
    #[case("Overcast", ConditionCategory::Clouds)]
    #[case("Sunny", ConditionCategory::Clear)]
    #[case("Clear", ConditionCategory::Clear)]
    #[case("Fair", ConditionCategory::Clear)]
    #[case("Mist", ConditionCategory::Fog)]
    #[case("Freezing fog", ConditionCategory::Fog)]
    #[case("Haze", ConditionCategory::Fog)]
    #[case("Windy", ConditionCategory::Other)]
    #[case("", ConditionCategory::Other)]
    fn test_normalize_condition(#[case] text: &str, #[case] expected: ConditionCategory) {
        assert_eq!(normalize_condition(text), expected);
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        assert_eq!(normalize_condition("HEAVY RAIN"), ConditionCategory::Rain);
        assert_eq!(normalize_condition("sUnNy"), ConditionCategory::Clear);
    }

    #[test]
    fn test_rain_outranks_thunder() {
        assert_eq!(
            normalize_condition("thunderstorm with heavy rain"),
            ConditionCategory::Rain
        );
    }

    #[test]
    fn test_cloud_outranks_clear() {
        // "Partly cloudy, clearing later" hits both sets
        assert_eq!(
            normalize_condition("Partly cloudy, clearing later"),
            ConditionCategory::Clouds
        );
    }

    #[test]
    fn test_display_matches_label() {
        assert_eq!(ConditionCategory::Thunderstorm.to_string(), "Thunderstorm");
        assert_eq!(ConditionCategory::Other.to_string(), "Other");
    }
}
