// SPDX-License-Identifier: MPL-2.0
//! Timing configuration for the notification lifecycle.
//!
//! This module handles loading and saving host-side timing overrides to a
//! `settings.toml` file, and converts them into the [`Timing`] value the
//! lifecycle controller consumes.
//!
//! # Examples
//!
//! ```no_run
//! use status_toast::config::{self, Config, Timing};
//!
//! // Load existing configuration (falling back to defaults)
//! let config = config::load().unwrap_or_default();
//! let timing = Timing::from(&config);
//!
//! // Modify a setting and persist it
//! let mut config = config;
//! config.default_hold_ms = Some(5000);
//! config::save(&config).expect("Failed to save config");
//! ```

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

mod defaults;

pub use defaults::{DEFAULT_ENTRANCE_MS, DEFAULT_EXIT_MS, DEFAULT_HOLD_MS};

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "StatusToast";

/// Persisted timing overrides. Absent fields fall back to the defaults in
/// [`defaults`].
#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub entrance_ms: Option<u64>,
    #[serde(default)]
    pub default_hold_ms: Option<u64>,
    #[serde(default)]
    pub exit_ms: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            entrance_ms: Some(DEFAULT_ENTRANCE_MS),
            default_hold_ms: Some(DEFAULT_HOLD_MS),
            exit_ms: Some(DEFAULT_EXIT_MS),
        }
    }
}

/// Resolved timing budgets consumed by the lifecycle controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    /// Fixed entrance sequence budget.
    pub entrance: Duration,
    /// Hold time applied when a notification carries no explicit duration.
    pub default_hold: Duration,
    /// Exit sequence budget.
    pub exit: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            entrance: Duration::from_millis(DEFAULT_ENTRANCE_MS),
            default_hold: Duration::from_millis(DEFAULT_HOLD_MS),
            exit: Duration::from_millis(DEFAULT_EXIT_MS),
        }
    }
}

impl From<&Config> for Timing {
    fn from(config: &Config) -> Self {
        Self {
            entrance: Duration::from_millis(config.entrance_ms.unwrap_or(DEFAULT_ENTRANCE_MS)),
            default_hold: Duration::from_millis(
                config.default_hold_ms.unwrap_or(DEFAULT_HOLD_MS),
            ),
            exit: Duration::from_millis(config.exit_ms.unwrap_or(DEFAULT_EXIT_MS)),
        }
    }
}

fn get_default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

/// Loads the configuration from the default platform location.
///
/// Returns the default configuration when no file exists yet.
pub fn load() -> Result<Config> {
    match get_default_config_path() {
        Some(path) if path.exists() => load_from_path(&path),
        _ => Ok(Config::default()),
    }
}

/// Loads the configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)?;
    let config = toml::from_str(&contents)?;
    Ok(config)
}

/// Saves the configuration to the default platform location.
pub fn save(config: &Config) -> Result<()> {
    let Some(path) = get_default_config_path() else {
        return Ok(());
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    save_to_path(config, &path)
}

/// Saves the configuration to a specific path.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    let contents = toml::to_string_pretty(config)?;
    fs::write(path, contents)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn default_config_matches_default_timing() {
        let config = Config::default();
        assert_eq!(Timing::from(&config), Timing::default());
    }

    #[test]
    fn timing_falls_back_for_absent_fields() {
        let config = Config {
            entrance_ms: None,
            default_hold_ms: Some(1500),
            exit_ms: None,
        };
        let timing = Timing::from(&config);
        assert_eq!(timing.entrance, Duration::from_millis(DEFAULT_ENTRANCE_MS));
        assert_eq!(timing.default_hold, Duration::from_millis(1500));
        assert_eq!(timing.exit, Duration::from_millis(DEFAULT_EXIT_MS));
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempdir().expect("Failed to create temporary directory");
        let path = dir.path().join("test_settings.toml");

        let config = Config {
            entrance_ms: Some(1000),
            default_hold_ms: Some(4000),
            exit_ms: Some(250),
        };
        save_to_path(&config, &path).expect("Failed to save config");

        let loaded = load_from_path(&path).expect("Failed to load config");
        assert_eq!(loaded.entrance_ms, Some(1000));
        assert_eq!(loaded.default_hold_ms, Some(4000));
        assert_eq!(loaded.exit_ms, Some(250));
    }

    #[test]
    fn load_missing_fields_yields_none() {
        let dir = tempdir().expect("Failed to create temporary directory");
        let path = dir.path().join("partial.toml");
        fs::write(&path, "entrance_ms = 800\n").unwrap();

        let loaded = load_from_path(&path).expect("Failed to load config");
        assert_eq!(loaded.entrance_ms, Some(800));
        assert_eq!(loaded.default_hold_ms, None);
        assert_eq!(loaded.exit_ms, None);
    }

    #[test]
    fn load_malformed_file_is_config_error() {
        let dir = tempdir().expect("Failed to create temporary directory");
        let path = dir.path().join("broken.toml");
        fs::write(&path, "entrance_ms = \"not a number\"\n").unwrap();

        let err = load_from_path(&path).unwrap_err();
        assert!(matches!(err, crate::error::Error::Config(_)));
    }
}
