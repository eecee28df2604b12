//! Compiled site defaults loaded from config.toml.
//!
//! config.toml carries the install-time defaults for the administrator-facing
//! settings. Stored overrides in the `site_config` table win at runtime; these
//! values are what the settings form shows as "Default (...)" and what the
//! overlay falls back to when no override exists.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Declared setting keys understood by the back office.
pub mod keys {
    /// Date display format (chrono format string)
    pub const DATE_FORMAT: &str = "site.date_format";
    /// Time display format (chrono format string)
    pub const TIME_FORMAT: &str = "site.time_format";
    /// Google Analytics property id; unset disables tracking
    pub const GOOGLE_ANALYTICS_PROPERTY_ID: &str = "site.google_analytics_property_id";
}

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Compiled defaults for the administrator-facing settings
    #[serde(default)]
    pub site: SiteDefaults,
}

/// Compiled default values for the declared setting keys.
///
/// All fields are optional: an unset field means the platform ships without a
/// default for that key and the settings form shows "Unknown" / "Default (none)".
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SiteDefaults {
    /// Default date format
    pub date_format: Option<String>,
    /// Default time format
    pub time_format: Option<String>,
    /// Analytics property id
    pub google_analytics_property_id: Option<String>,
}

impl SiteDefaults {
    /// Pure lookup of the compiled default for a declared key.
    ///
    /// Reads only this struct, never the live override-merged view, so it is
    /// safe to call from anywhere without observable side effects.
    #[must_use]
    pub fn compiled_default(&self, key: &str) -> Option<&str> {
        match key {
            keys::DATE_FORMAT => self.date_format.as_deref(),
            keys::TIME_FORMAT => self.time_format.as_deref(),
            keys::GOOGLE_ANALYTICS_PROPERTY_ID => self.google_analytics_property_id.as_deref(),
            _ => None,
        }
    }
}

/// Loads site configuration from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads site configuration from the default location (./config.toml)
pub fn load_default_config() -> Result<Config> {
    load_config("config.toml")
}
