//! Error types and handling for the `MapMuse` application

use thiserror::Error;

use crate::restaurants::RestaurantError;

/// Main error type for the `MapMuse` application
#[derive(Error, Debug)]
pub enum MapMuseError {
    /// Mood catalog could not be read or is malformed
    #[error("Catalog error: {message}")]
    Catalog { message: String },

    /// Restaurant data could not be retrieved
    #[error("Fetch error: {source}")]
    Fetch {
        #[from]
        source: RestaurantError,
    },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl MapMuseError {
    /// Create a new catalog error
    pub fn catalog<S: Into<String>>(message: S) -> Self {
        Self::Catalog {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            MapMuseError::Catalog { message } => {
                format!("The mood catalog could not be loaded: {message}")
            }
            MapMuseError::Fetch { .. } => "Could not fetch restaurant data.".to_string(),
            MapMuseError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            MapMuseError::Config { .. } => {
                "Configuration error. Please check your config file.".to_string()
            }
        }
    }
}
