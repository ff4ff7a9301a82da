//! Configuration management for the `MapMuse` application
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::MapMuseError;
use crate::restaurants::MatchPolicy;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for the `MapMuse` application
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MapMuseConfig {
    /// Mood catalog location
    #[serde(default)]
    pub catalog: CatalogConfig,
    /// Overpass API configuration
    #[serde(default)]
    pub overpass: OverpassConfig,
    /// Restaurant matching configuration
    #[serde(default)]
    pub matching: MatchingConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Mood catalog settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Path to the mood catalog JSON document
    #[serde(default = "default_catalog_path")]
    pub path: PathBuf,
}

/// Overpass API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverpassConfig {
    /// Interpreter endpoint the query is posted to
    #[serde(default = "default_overpass_endpoint")]
    pub endpoint: String,
    /// HTTP request timeout in seconds
    #[serde(default = "default_overpass_timeout")]
    pub timeout_seconds: u32,
    /// Server-side timeout declared in the query
    #[serde(default = "default_query_timeout")]
    pub query_timeout_seconds: u32,
    /// User agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Restaurant matching settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchingConfig {
    /// Maximum number of mood-matched restaurants shown
    #[serde(default = "default_max_matches")]
    pub max_matches: usize,
    /// Maximum number of fallback restaurants shown
    #[serde(default = "default_max_fallback")]
    pub max_fallback: usize,
    /// Generic cuisine keywords for the fallback list
    #[serde(default = "default_fallback_keywords")]
    pub fallback_keywords: Vec<String>,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or compact)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_catalog_path() -> PathBuf {
    PathBuf::from("assets/moods.json")
}

fn default_overpass_endpoint() -> String {
    "https://overpass-api.de/api/interpreter".to_string()
}

fn default_overpass_timeout() -> u32 {
    30
}

fn default_query_timeout() -> u32 {
    25
}

fn default_user_agent() -> String {
    format!("MapMuse/{}", crate::VERSION)
}

fn default_max_matches() -> usize {
    MatchPolicy::default().max_matches
}

fn default_max_fallback() -> usize {
    MatchPolicy::default().max_fallback
}

fn default_fallback_keywords() -> Vec<String> {
    MatchPolicy::default().fallback_keywords
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "compact".to_string()
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: default_catalog_path(),
        }
    }
}

impl Default for OverpassConfig {
    fn default() -> Self {
        Self {
            endpoint: default_overpass_endpoint(),
            timeout_seconds: default_overpass_timeout(),
            query_timeout_seconds: default_query_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            max_matches: default_max_matches(),
            max_fallback: default_max_fallback(),
            fallback_keywords: default_fallback_keywords(),
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

impl MatchingConfig {
    /// Matching policy handed to the restaurant matcher
    #[must_use]
    pub fn policy(&self) -> MatchPolicy {
        MatchPolicy {
            max_matches: self.max_matches,
            max_fallback: self.max_fallback,
            fallback_keywords: self.fallback_keywords.clone(),
        }
    }
}

impl MapMuseConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    ///
    /// An explicitly given file must exist; the default locations are optional.
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        match config_path {
            Some(path) => {
                if !path.exists() {
                    return Err(MapMuseError::config(format!(
                        "Config file not found: {}",
                        path.display()
                    ))
                    .into());
                }
                builder = builder.add_source(File::from(path).format(config::FileFormat::Toml));
            }
            None => {
                let config_file = Self::get_config_path()
                    .filter(|path| path.exists())
                    .unwrap_or_else(|| PathBuf::from("mapmuse.toml"));
                builder = builder.add_source(
                    File::from(config_file)
                        .required(false)
                        .format(config::FileFormat::Toml),
                );
            }
        }

        // Add environment variable overrides, e.g. MAPMUSE_OVERPASS__TIMEOUT_SECONDS
        builder = builder.add_source(
            Environment::with_prefix("MAPMUSE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: MapMuseConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        // Apply defaults for missing values
        config.apply_defaults();

        // Validate configuration
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "mapmuse").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Apply default values to missing configuration fields
    pub fn apply_defaults(&mut self) {
        if self.catalog.path.as_os_str().is_empty() {
            self.catalog.path = default_catalog_path();
        }
        if self.overpass.endpoint.is_empty() {
            self.overpass.endpoint = default_overpass_endpoint();
        }
        if self.overpass.timeout_seconds == 0 {
            self.overpass.timeout_seconds = default_overpass_timeout();
        }
        if self.overpass.query_timeout_seconds == 0 {
            self.overpass.query_timeout_seconds = default_query_timeout();
        }
        if self.overpass.user_agent.is_empty() {
            self.overpass.user_agent = default_user_agent();
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
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.overpass.timeout_seconds > 300 {
            return Err(
                MapMuseError::config("Overpass timeout cannot exceed 300 seconds").into(),
            );
        }

        if self.overpass.query_timeout_seconds > 180 {
            return Err(
                MapMuseError::config("Overpass query timeout cannot exceed 180 seconds").into(),
            );
        }

        if self.matching.max_matches == 0 || self.matching.max_matches > 100 {
            return Err(
                MapMuseError::config("Maximum matches must be between 1 and 100").into(),
            );
        }

        if self.matching.max_fallback > 100 {
            return Err(MapMuseError::config("Maximum fallback cannot exceed 100").into());
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(MapMuseError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "compact"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(MapMuseError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        if !self.overpass.endpoint.starts_with("http://")
            && !self.overpass.endpoint.starts_with("https://")
        {
            return Err(MapMuseError::config(
                "Overpass endpoint must be a valid HTTP or HTTPS URL",
            )
            .into());
        }

        if self
            .matching
            .fallback_keywords
            .iter()
            .any(|keyword| keyword.trim().is_empty())
        {
            return Err(MapMuseError::config("Fallback keywords cannot be blank").into());
        }

        Ok(())
    }
}
