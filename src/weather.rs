//! Forecast sources
//!
//! [`ForecastSource`] is the seam for forecast providers; WeatherAPI.com is
//! the only one wired in today.

use crate::api::ApiClient;
use crate::config::ProviderConfig;
use crate::models::weatherapi::ForecastResponse;
use crate::models::{Coordinates, DailyForecast, FORECAST_DAYS, ForecastSeries};
use crate::Result;
use tracing::{debug, info, instrument};

/// A provider that can produce a daily forecast series for a location
pub trait ForecastSource {
    /// Human-readable provider name, used in diagnostics and attribution
    fn name(&self) -> &str;

    /// Fetch up to [`FORECAST_DAYS`] daily entries starting today
    fn fetch(&self, coordinates: &Coordinates) -> Result<ForecastSeries>;
}

/// WeatherAPI.com `forecast.json` client
pub struct WeatherApiProvider {
    client: ApiClient,
    base_url: String,
    api_key: String,
}

impl WeatherApiProvider {
    pub const NAME: &'static str = "WeatherAPI.com";

    #[must_use]
    pub fn new(client: ApiClient, config: &ProviderConfig, api_key: impl Into<String>) -> Self {
        Self {
            client,
            base_url: config.base_url.clone(),
            api_key: api_key.into(),
        }
    }

    fn forecast_url(&self, coordinates: &Coordinates) -> String {
        format!(
            "{}?key={}&q={}&days={}&aqi=no&alerts=no",
            self.base_url,
            urlencoding::encode(&self.api_key),
            urlencoding::encode(&coordinates.as_query()),
            FORECAST_DAYS
        )
    }
}

impl ForecastSource for WeatherApiProvider {
    fn name(&self) -> &str {
        Self::NAME
    }

    #[instrument(skip(self), fields(source = Self::NAME))]
    fn fetch(&self, coordinates: &Coordinates) -> Result<ForecastSeries> {
        info!("Fetching data from {}...", Self::NAME);

        let response: ForecastResponse = self.client.get_json(&self.forecast_url(coordinates))?;

        let days = response
            .forecast
            .forecastday
            .iter()
            .take(FORECAST_DAYS)
            .map(DailyForecast::try_from)
            .collect::<Result<Vec<_>>>()?;

        debug!("Parsed {} forecast days from {}", days.len(), Self::NAME);
        Ok(ForecastSeries::new(Self::NAME, days))
    }
}
