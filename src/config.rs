//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/carrel/carrel.toml`
//! 3. Environment variables: `CARREL_*` prefix

use std::path::PathBuf;

use config::{Config, ConfigError, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;

/// Unified configuration for carrel.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Base URL of the collection backend
    pub api_url: String,
    /// HTTP timeout in seconds
    pub timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8085".into(),
            timeout_secs: 30,
        }
    }
}

/// Get the XDG config directory for carrel.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "carrel").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("carrel.toml"))
}

impl Settings {
    /// Load settings with layered precedence.
    pub fn load() -> Result<Self, ApplicationError> {
        let defaults = Settings::default();
        let mut builder = Config::builder()
            .set_default("api_url", defaults.api_url.clone())
            .map_err(config_err)?
            .set_default("timeout_secs", defaults.timeout_secs as i64)
            .map_err(config_err)?;

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                builder = builder.add_source(File::from(global_path).required(false));
            }
        }

        builder = builder.add_source(Environment::with_prefix("CARREL"));

        let config = builder.build().map_err(config_err)?;
        config.try_deserialize().map_err(config_err)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# carrel configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/carrel/carrel.toml
#   Env:    CARREL_* environment variables (explicit overrides)

# Base URL of the collection backend
# api_url = "http://localhost:8085"

# HTTP timeout in seconds
# timeout_secs = 30
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_no_config_when_loading_then_uses_defaults() {
        let settings = Settings::load().expect("load defaults");
        assert!(!settings.api_url.is_empty());
        assert!(settings.timeout_secs > 0);
    }

    #[test]
    fn given_template_when_uncommented_then_parses_as_settings() {
        let uncommented: String = Settings::template()
            .lines()
            .map(|l| l.strip_prefix("# ").unwrap_or(l))
            .filter(|l| l.contains('='))
            .collect::<Vec<_>>()
            .join("\n");
        let settings: Settings = toml::from_str(&uncommented).expect("template should parse");
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn given_settings_when_serializing_then_toml_roundtrips() {
        let settings = Settings {
            api_url: "https://collections.example.edu".into(),
            timeout_secs: 5,
        };
        let toml_str = settings.to_toml().expect("serialize");
        let parsed: Settings = toml::from_str(&toml_str).expect("parse back");
        assert_eq!(parsed, settings);
    }
}
