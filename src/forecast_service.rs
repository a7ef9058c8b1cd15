//! Forecast pipeline
//!
//! Geocode the city, ask every configured source for its series, then fold
//! the answers into one consensus forecast. Sources are queried one after
//! another; a failing source is reported and then treated as absent.

use crate::aggregate::aggregate;
use crate::location_resolver::LocationResolver;
use crate::models::{Coordinates, ForecastSeries};
use crate::weather::ForecastSource;
use crate::{ForecastError, Result};
use tracing::{info, warn};

/// Outcome of one source's fetch, kept for operator diagnostics
#[derive(Debug)]
pub struct SourceFailure {
    pub source: String,
    pub error: ForecastError,
}

/// Consensus forecast plus the sources that could not contribute
#[derive(Debug)]
pub struct ForecastOutcome {
    pub consensus: Option<ForecastSeries>,
    pub failures: Vec<SourceFailure>,
}

/// Forecast pipeline service
pub struct ForecastService {
    resolver: LocationResolver,
    sources: Vec<Box<dyn ForecastSource>>,
}

impl ForecastService {
    #[must_use]
    pub fn new(resolver: LocationResolver, sources: Vec<Box<dyn ForecastSource>>) -> Self {
        Self { resolver, sources }
    }

    /// Geocode `city` and build its consensus forecast.
    ///
    /// Geocoding failure is returned as an error since nothing else can run
    /// without coordinates. Source failures are collected in the outcome.
    pub fn generate_forecast(&self, city: &str) -> Result<ForecastOutcome> {
        let coordinates = self.resolver.resolve(city)?;
        info!("Resolved '{}' to ({})", city, coordinates);

        let (consensus, failures) = forecast_for(&self.sources, &coordinates);
        Ok(ForecastOutcome {
            consensus,
            failures,
        })
    }
}

/// Fetch every source for `coordinates` and aggregate the successful ones
pub fn forecast_for(
    sources: &[Box<dyn ForecastSource>],
    coordinates: &Coordinates,
) -> (Option<ForecastSeries>, Vec<SourceFailure>) {
    let mut failures = Vec::new();
    let series: Vec<Option<ForecastSeries>> = sources
        .iter()
        .map(|source| match source.fetch(coordinates) {
            Ok(series) => Some(series),
            Err(error) => {
                warn!("Could not fetch from {}: {}", source.name(), error);
                failures.push(SourceFailure {
                    source: source.name().to_string(),
                    error,
                });
                None
            }
        })
        .collect();

    (aggregate(&series), failures)
}
