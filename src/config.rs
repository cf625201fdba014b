//! Configuration management for the `TripIntel` application
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings. The loaded
//! struct is constructed once at startup and handed to each provider
//! client; no client reads the environment on its own.

use crate::TripIntelError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for the `TripIntel` application
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TripIntelConfig {
    /// Travel advisory provider configuration
    #[serde(default)]
    pub advisory: AdvisoryConfig,
    /// Weather provider configuration
    #[serde(default)]
    pub weather: WeatherConfig,
    /// Events provider configuration
    #[serde(default)]
    pub events: EventsConfig,
    /// Language-model provider configuration
    #[serde(default)]
    pub ai: AiConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Default application settings
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

/// Travel advisory provider settings (no credential required)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvisoryConfig {
    /// Base URL for the advisory API
    #[serde(default = "default_advisory_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_data_timeout")]
    pub timeout_seconds: u32,
}

/// Weather provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Weather API key; absence selects fallback mode
    pub api_key: Option<String>,
    /// Base URL for the weather API
    #[serde(default = "default_weather_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_data_timeout")]
    pub timeout_seconds: u32,
}

/// Events provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventsConfig {
    /// Events API key; absence selects fallback mode
    pub api_key: Option<String>,
    /// Base URL for the events API
    #[serde(default = "default_events_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_data_timeout")]
    pub timeout_seconds: u32,
}

/// Language-model provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiConfig {
    /// Language-model API key; absence selects fallback mode
    pub api_key: Option<String>,
    /// Base URL for the chat completion API
    #[serde(default = "default_ai_base_url")]
    pub base_url: String,
    /// Model identifier passed to the provider
    #[serde(default = "default_ai_model")]
    pub model: String,
    /// Completion token limit
    #[serde(default = "default_ai_max_tokens")]
    pub max_tokens: u32,
    /// Request timeout in seconds; chat completions are slow
    #[serde(default = "default_ai_timeout")]
    pub timeout_seconds: u32,
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

/// Default application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Budget assumed when a request does not specify one
    #[serde(default = "default_budget")]
    pub budget_usd: f64,
    /// Trip length assumed when a request does not specify dates
    #[serde(default = "default_trip_days")]
    pub trip_days: u32,
}

// Default value functions
fn default_advisory_base_url() -> String {
    "https://www.travel-advisory.info/api".to_string()
}

fn default_weather_base_url() -> String {
    "https://api.openweathermap.org/data/2.5".to_string()
}

fn default_events_base_url() -> String {
    "https://api.predicthq.com/v1".to_string()
}

fn default_ai_base_url() -> String {
    "https://openrouter.ai/api/v1".to_string()
}

fn default_ai_model() -> String {
    "anthropic/claude-3.5-sonnet".to_string()
}

fn default_ai_max_tokens() -> u32 {
    500
}

fn default_data_timeout() -> u32 {
    5
}

fn default_ai_timeout() -> u32 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_budget() -> f64 {
    1000.0
}

fn default_trip_days() -> u32 {
    7
}

impl Default for AdvisoryConfig {
    fn default() -> Self {
        Self {
            base_url: default_advisory_base_url(),
            timeout_seconds: default_data_timeout(),
        }
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_weather_base_url(),
            timeout_seconds: default_data_timeout(),
        }
    }
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_events_base_url(),
            timeout_seconds: default_data_timeout(),
        }
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_ai_base_url(),
            model: default_ai_model(),
            max_tokens: default_ai_max_tokens(),
            timeout_seconds: default_ai_timeout(),
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

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            budget_usd: default_budget(),
            trip_days: default_trip_days(),
        }
    }
}

/// Normalize an optional credential: blank or whitespace counts as absent
///
/// A malformed credential value selects fallback mode exactly like a
/// missing one; it is never an error.
#[must_use]
pub fn usable_key(key: Option<&str>) -> Option<&str> {
    key.map(str::trim).filter(|k| !k.is_empty())
}

impl TripIntelConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Environment variable overrides with TRIPINTEL_ prefix,
        // e.g. TRIPINTEL_WEATHER__API_KEY
        builder = builder.add_source(
            Environment::with_prefix("TRIPINTEL")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: TripIntelConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("tripintel").join("config.toml"))
    }

    /// Apply default values to missing configuration fields
    pub fn apply_defaults(&mut self) {
        if self.advisory.base_url.is_empty() {
            self.advisory.base_url = default_advisory_base_url();
        }
        if self.advisory.timeout_seconds == 0 {
            self.advisory.timeout_seconds = default_data_timeout();
        }
        if self.weather.base_url.is_empty() {
            self.weather.base_url = default_weather_base_url();
        }
        if self.weather.timeout_seconds == 0 {
            self.weather.timeout_seconds = default_data_timeout();
        }
        if self.events.base_url.is_empty() {
            self.events.base_url = default_events_base_url();
        }
        if self.events.timeout_seconds == 0 {
            self.events.timeout_seconds = default_data_timeout();
        }
        if self.ai.base_url.is_empty() {
            self.ai.base_url = default_ai_base_url();
        }
        if self.ai.model.is_empty() {
            self.ai.model = default_ai_model();
        }
        if self.ai.max_tokens == 0 {
            self.ai.max_tokens = default_ai_max_tokens();
        }
        if self.ai.timeout_seconds == 0 {
            self.ai.timeout_seconds = default_ai_timeout();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
        if self.defaults.budget_usd <= 0.0 {
            self.defaults.budget_usd = default_budget();
        }
        if self.defaults.trip_days == 0 {
            self.defaults.trip_days = default_trip_days();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        for (name, timeout) in [
            ("Advisory", self.advisory.timeout_seconds),
            ("Weather", self.weather.timeout_seconds),
            ("Events", self.events.timeout_seconds),
            ("AI", self.ai.timeout_seconds),
        ] {
            if timeout > 300 {
                return Err(TripIntelError::config(format!(
                    "{name} API timeout cannot exceed 300 seconds"
                ))
                .into());
            }
        }

        if self.ai.max_tokens > 100_000 {
            return Err(TripIntelError::config("AI max_tokens cannot exceed 100000").into());
        }

        if self.defaults.trip_days > 365 {
            return Err(TripIntelError::config("Default trip length cannot exceed 365 days").into());
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(TripIntelError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(TripIntelError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        for (name, url) in [
            ("Advisory", &self.advisory.base_url),
            ("Weather", &self.weather.base_url),
            ("Events", &self.events.base_url),
            ("AI", &self.ai.base_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(TripIntelError::config(format!(
                    "{name} API base URL must be a valid HTTP or HTTPS URL"
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

    #[test]
    fn test_default_config() {
        let config = TripIntelConfig::default();
        assert_eq!(config.advisory.base_url, "https://www.travel-advisory.info/api");
        assert_eq!(config.weather.base_url, "https://api.openweathermap.org/data/2.5");
        assert_eq!(config.events.base_url, "https://api.predicthq.com/v1");
        assert_eq!(config.ai.base_url, "https://openrouter.ai/api/v1");
        assert_eq!(config.advisory.timeout_seconds, 5);
        assert_eq!(config.weather.timeout_seconds, 5);
        assert_eq!(config.events.timeout_seconds, 5);
        assert_eq!(config.ai.timeout_seconds, 30);
        assert_eq!(config.ai.max_tokens, 500);
        assert_eq!(config.logging.level, "info");
        assert!(config.weather.api_key.is_none());
        assert!(config.events.api_key.is_none());
        assert!(config.ai.api_key.is_none());
    }

    #[test]
    fn test_default_config_validates() {
        let config = TripIntelConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_invalid_log_level() {
        let mut config = TripIntelConfig::default();
        config.logging.level = "invalid".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid log level"));
    }

    #[test]
    fn test_config_validation_numeric_ranges() {
        let mut config = TripIntelConfig::default();
        config.weather.timeout_seconds = 500;
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("timeout cannot exceed"));
    }

    #[test]
    fn test_config_validation_bad_base_url() {
        let mut config = TripIntelConfig::default();
        config.events.base_url = "ftp://example.com".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_apply_defaults_fills_zeroes() {
        let mut config = TripIntelConfig::default();
        config.weather.timeout_seconds = 0;
        config.ai.model = String::new();
        config.apply_defaults();
        assert_eq!(config.weather.timeout_seconds, 5);
        assert_eq!(config.ai.model, "anthropic/claude-3.5-sonnet");
    }

    #[test]
    fn test_usable_key_treats_blank_as_missing() {
        assert_eq!(usable_key(None), None);
        assert_eq!(usable_key(Some("")), None);
        assert_eq!(usable_key(Some("   ")), None);
        assert_eq!(usable_key(Some("abc123")), Some("abc123"));
        assert_eq!(usable_key(Some(" abc123 ")), Some("abc123"));
    }

    #[test]
    fn test_config_path_generation() {
        let path = TripIntelConfig::get_config_path();
        assert!(path.is_some());
        let path = path.unwrap();
        assert!(path.to_string_lossy().contains("tripintel"));
        assert!(path.to_string_lossy().contains("config.toml"));
    }
}
