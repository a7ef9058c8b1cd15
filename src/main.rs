use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, error};
use weather_consensus::config::LEGACY_API_KEY_VAR;
use weather_consensus::{
    ApiClient, AppConfig, ForecastError, ForecastService, ForecastSource, LocationResolver,
    WeatherApiProvider, logging, render,
};

/// Multi-day consensus weather forecast for a city
#[derive(Debug, Parser)]
#[command(name = "weather-consensus", version, about)]
struct Cli {
    /// City to forecast; prompted for when omitted
    city: Option<String>,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match AppConfig::load_from_path(cli.config.clone()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Couldn't load configuration: {e:#}");
            eprintln!("Please read the setup instructions in README.md");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = logging::init(&config.logging, cli.verbose) {
        eprintln!("{e:#}");
    }

    let api_key = match config.provider.require_api_key() {
        Ok(key) => key.to_string(),
        Err(e) => {
            error!("{}", e);
            eprintln!("Couldn't access the WeatherAPI.com API key.");
            eprintln!(
                "Set {LEGACY_API_KEY_VAR} or add provider.api_key to {}.",
                AppConfig::get_config_path()
                    .map_or_else(|| "config.toml".to_string(), |p| p.display().to_string())
            );
            eprintln!("Please read the setup instructions in README.md");
            return ExitCode::FAILURE;
        }
    };

    match run(&cli, &config, api_key) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli, config: &AppConfig, api_key: String) -> Result<()> {
    let city = match &cli.city {
        Some(city) => city.clone(),
        None => prompt_city().inspect_err(|e| eprintln!("{}", e.user_message()))?,
    };
    let city = city.trim();

    if city.is_empty() {
        println!("City name cannot be empty.");
        return Ok(());
    }

    let client = ApiClient::new(&config.http).context("Failed to create HTTP client")?;
    let resolver = LocationResolver::new(client.clone(), &config.geocoding);
    let sources: Vec<Box<dyn ForecastSource>> = vec![Box::new(WeatherApiProvider::new(
        client,
        &config.provider,
        api_key,
    ))];
    let service = ForecastService::new(resolver, sources);

    let outcome = match service.generate_forecast(city) {
        Ok(outcome) => outcome,
        Err(e) => {
            debug!("Geocoding failed: {:?}", e);
            eprintln!(
                "Could not find coordinates for '{city}'. Please check your internet connection."
            );
            eprintln!("{}", e.user_message());
            return Ok(());
        }
    };

    for failure in &outcome.failures {
        eprintln!("Could not fetch from {}", failure.source);
        eprintln!("{}", failure.error.user_message());
    }

    println!("{}", render(outcome.consensus.as_ref(), city));
    Ok(())
}

fn prompt_city() -> std::result::Result<String, ForecastError> {
    print!("Enter a city name to get the weather forecast: ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line)
}
