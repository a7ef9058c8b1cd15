//! Configuration management for the forecast CLI
//!
//! Configuration is layered: built-in defaults, then an optional TOML file,
//! then `WEATHERCAST_`-prefixed environment variables. Loading never exits
//! the process; the caller decides what a failure means.

use crate::ForecastError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable consulted when no API key was configured elsewhere
pub const LEGACY_API_KEY_VAR: &str = "WEATHERAPI_API_KEY";

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Forecast provider (WeatherAPI.com) settings
    #[serde(default)]
    pub provider: ProviderConfig,
    /// Geocoding service settings
    #[serde(default)]
    pub geocoding: GeocodingConfig,
    /// Shared HTTP transport settings
    #[serde(default)]
    pub http: HttpConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Forecast provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// WeatherAPI.com API key
    pub api_key: Option<String>,
    /// Forecast endpoint
    #[serde(default = "default_forecast_url")]
    pub base_url: String,
}

/// Geocoding service settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodingConfig {
    /// Search endpoint
    #[serde(default = "default_geocoding_url")]
    pub base_url: String,
    /// Language of returned place names
    #[serde(default = "default_geocoding_language")]
    pub language: String,
}

/// HTTP transport settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
    /// User agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_forecast_url() -> String {
    "https://api.weatherapi.com/v1/forecast.json".to_string()
}

fn default_geocoding_url() -> String {
    "https://geocoding-api.open-meteo.com/v1/search".to_string()
}

fn default_geocoding_language() -> String {
    "en".to_string()
}

fn default_timeout() -> u32 {
    30
}

fn default_user_agent() -> String {
    format!("weather-consensus/{}", crate::VERSION)
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_forecast_url(),
        }
    }
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            base_url: default_geocoding_url(),
            language: default_geocoding_language(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl ProviderConfig {
    /// Return the API key, or `MissingConfig` when none is usable
    pub fn require_api_key(&self) -> std::result::Result<&str, ForecastError> {
        match self.api_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => Ok(key),
            _ => Err(ForecastError::missing_config(format!(
                "WeatherAPI.com API key is not set (use {LEGACY_API_KEY_VAR} or provider.api_key)"
            ))),
        }
    }
}

impl AppConfig {
    /// Load configuration from `config_path`, or from the default locations
    /// when none is given
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path()
                .filter(|path| path.exists())
                .unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // WEATHERCAST_PROVIDER__API_KEY -> provider.api_key
        builder = builder.add_source(
            Environment::with_prefix("WEATHERCAST")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| format!("Failed to build configuration from {}", config_file.display()))?;

        let mut config: AppConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        // a blank legacy key counts as unset so startup reports it as missing
        if config.provider.api_key.is_none() {
            config.provider.api_key = std::env::var(LEGACY_API_KEY_VAR)
                .ok()
                .filter(|key| !key.trim().is_empty());
        }

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("weather-consensus").join("config.toml"))
    }

    /// Apply default values to fields that were set but left blank
    pub fn apply_defaults(&mut self) {
        if self.provider.base_url.is_empty() {
            self.provider.base_url = default_forecast_url();
        }
        if self.geocoding.base_url.is_empty() {
            self.geocoding.base_url = default_geocoding_url();
        }
        if self.geocoding.language.is_empty() {
            self.geocoding.language = default_geocoding_language();
        }
        if self.http.user_agent.is_empty() {
            self.http.user_agent = default_user_agent();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_api_key()?;
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// An API key may be absent here, but not present and blank
    fn validate_api_key(&self) -> Result<()> {
        if let Some(api_key) = &self.provider.api_key {
            if api_key.trim().is_empty() {
                return Err(ForecastError::config(
                    "Provider API key cannot be empty if provided. Either remove it or provide a valid key.",
                )
                .into());
            }
        }
        Ok(())
    }

    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.http.timeout_seconds == 0 {
            return Err(ForecastError::config("HTTP timeout must be at least 1 second").into());
        }

        if self.http.timeout_seconds > 300 {
            return Err(ForecastError::config("HTTP timeout cannot exceed 300 seconds").into());
        }

        Ok(())
    }

    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(ForecastError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(ForecastError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        for (name, url) in [
            ("provider.base_url", &self.provider.base_url),
            ("geocoding.base_url", &self.geocoding.base_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ForecastError::config(format!(
                    "{name} must be a valid HTTP or HTTPS URL, got '{url}'"
                ))
                .into());
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(
            config.provider.base_url,
            "https://api.weatherapi.com/v1/forecast.json"
        );
        assert_eq!(
            config.geocoding.base_url,
            "https://geocoding-api.open-meteo.com/v1/search"
        );
        assert_eq!(config.geocoding.language, "en");
        assert_eq!(config.http.timeout_seconds, 30);
        assert!(config.http.user_agent.starts_with("weather-consensus/"));
        assert_eq!(config.logging.level, "warn");
        assert!(config.provider.api_key.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_require_api_key_missing() {
        let config = AppConfig::default();
        let err = config.provider.require_api_key().unwrap_err();
        assert!(matches!(err, ForecastError::MissingConfig { .. }));
    }

    #[test]
    fn test_require_api_key_blank() {
        let mut config = AppConfig::default();
        config.provider.api_key = Some("   ".to_string());
        assert!(config.provider.require_api_key().is_err());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_require_api_key_present() {
        let mut config = AppConfig::default();
        config.provider.api_key = Some("abc123".to_string());
        assert_eq!(config.provider.require_api_key().unwrap(), "abc123");
    }

    #[test]
    fn test_config_validation_invalid_log_level() {
        let mut config = AppConfig::default();
        config.logging.level = "loud".to_string();
        let result = config.validate();
        assert!(result.unwrap_err().to_string().contains("Invalid log level"));
    }

    #[test]
    fn test_config_validation_timeout_range() {
        let mut config = AppConfig::default();
        config.http.timeout_seconds = 500;
        let result = config.validate();
        assert!(result.unwrap_err().to_string().contains("cannot exceed 300"));

        config.http.timeout_seconds = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_rejects_non_http_url() {
        let mut config = AppConfig::default();
        config.geocoding.base_url = "ftp://example.com/search".to_string();
        let result = config.validate();
        assert!(result.unwrap_err().to_string().contains("geocoding.base_url"));
    }

    #[test]
    fn test_apply_defaults_fills_blanks() {
        let mut config = AppConfig::default();
        config.provider.base_url.clear();
        config.logging.format.clear();
        config.apply_defaults();
        assert_eq!(
            config.provider.base_url,
            "https://api.weatherapi.com/v1/forecast.json"
        );
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_load_from_toml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[provider]
api_key = "from-file"

[http]
timeout_seconds = 12

[logging]
level = "debug"
"#
        )
        .unwrap();

        let config = AppConfig::load_from_path(Some(file.path().to_path_buf())).unwrap();
        assert_eq!(config.provider.api_key.as_deref(), Some("from-file"));
        assert_eq!(config.http.timeout_seconds, 12);
        assert_eq!(config.logging.level, "debug");
        // untouched sections keep their defaults
        assert_eq!(config.geocoding.language, "en");
    }

    #[test]
    fn test_load_rejects_invalid_file_values() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[logging]\nformat = \"xml\"").unwrap();

        let result = AppConfig::load_from_path(Some(file.path().to_path_buf()));
        assert!(result.is_err());
    }

    #[test]
    fn test_config_path_generation() {
        if let Some(path) = AppConfig::get_config_path() {
            assert!(path.to_string_lossy().contains("weather-consensus"));
            assert!(path.to_string_lossy().ends_with("config.toml"));
        }
    }
}
