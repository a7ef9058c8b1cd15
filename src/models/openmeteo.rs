//! `OpenMeteo` geocoding API response structures

use super::Coordinates;
use serde::Deserialize;

/// Geocoding response from `OpenMeteo`
#[derive(Debug, Deserialize)]
pub struct GeocodingResponse {
    /// Absent entirely when nothing matched
    pub results: Option<Vec<GeocodingResult>>,
}

#[derive(Debug, Deserialize)]
pub struct GeocodingResult {
    pub name: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub country: Option<String>,
    pub admin1: Option<String>,
}

impl From<&GeocodingResult> for Coordinates {
    fn from(result: &GeocodingResult) -> Self {
        Coordinates::new(result.latitude, result.longitude)
    }
}

impl GeocodingResult {
    /// "Name, Region, Country" for log lines
    #[must_use]
    pub fn display_name(&self) -> String {
        [&self.name, &self.admin1, &self.country]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}
