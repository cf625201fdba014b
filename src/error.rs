//! Error types and handling for the `TripIntel` application

use thiserror::Error;

/// Main error type for the `TripIntel` application
///
/// Provider failures never surface here: every client converts them into a
/// fallback result locally. This type covers configuration and input
/// problems the application itself must report.
#[derive(Error, Debug)]
pub enum TripIntelError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },
}

impl TripIntelError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
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
            TripIntelError::Config { .. } => {
                "Configuration error. Please check your config file and API keys.".to_string()
            }
            TripIntelError::Validation { message } => {
                format!("Invalid input: {message}")
            }
        }
    }
}
