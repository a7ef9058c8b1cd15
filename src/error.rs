//! Error types for the forecast pipeline
//!
//! Every external step returns a typed [`ForecastError`] so callers can tell
//! a missing city apart from a dead network or a malformed payload.

use thiserror::Error;

/// Main error type for the forecast pipeline
#[derive(Error, Debug)]
pub enum ForecastError {
    /// A required configuration value (the provider API key) is not set
    #[error("Missing configuration: {message}")]
    MissingConfig { message: String },

    /// Configuration is present but invalid
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Transport-level failure (DNS, connect, timeout, body read)
    #[error("Network error: {source}")]
    Network {
        #[from]
        source: reqwest::Error,
    },

    /// The service answered with a non-success HTTP status
    #[error("HTTP {status} from {endpoint}")]
    Status { status: u16, endpoint: String },

    /// The geocoding service had no match for the query
    #[error("No location found for '{query}'")]
    NotFound { query: String },

    /// The response body was malformed or missing expected fields
    #[error("Parse error: {message}")]
    Parse { message: String },

    /// Operator input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl ForecastError {
    /// Create a new missing-configuration error
    pub fn missing_config<S: Into<String>>(message: S) -> Self {
        Self::MissingConfig {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new HTTP status error
    pub fn status<S: Into<String>>(status: u16, endpoint: S) -> Self {
        Self::Status {
            status,
            endpoint: endpoint.into(),
        }
    }

    /// Create a new not-found error
    pub fn not_found<S: Into<String>>(query: S) -> Self {
        Self::NotFound {
            query: query.into(),
        }
    }

    /// Create a new parse error
    pub fn parse<S: Into<String>>(message: S) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            ForecastError::MissingConfig { .. } => {
                "The WeatherAPI.com API key is not configured. Please read README.md for setup instructions."
                    .to_string()
            }
            ForecastError::Config { message } => {
                format!("Configuration error: {message}. Please check your config file.")
            }
            ForecastError::Network { .. } => {
                "Unable to connect to external services. Please check your internet connection."
                    .to_string()
            }
            ForecastError::Status { status, .. } => {
                format!("The weather service rejected the request (HTTP {status}).")
            }
            ForecastError::NotFound { query } => {
                format!("No location matches '{query}'.")
            }
            ForecastError::Parse { .. } => {
                "The weather service returned data that could not be understood.".to_string()
            }
            ForecastError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            ForecastError::Io { .. } => {
                "Could not read from the terminal.".to_string()
            }
        }
    }
}
