//! Configuration
//!
//! Optional TOML file. Every field has a default, so an empty file (or no
//! file at all) is valid. Command-line flags are applied on top by the CLI.
//!
//! ```toml
//! max_in_flight = 8      # 0 = one task per file, no cap
//! log_level = "debug"    # level or directives, e.g. "warn,letterfreq=debug"
//! json_summary = true
//! ```

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::logging;

/// Runtime configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Most tasks counting at once (0 = no cap)
    pub max_in_flight: usize,
    /// Log filter for stderr diagnostics (level or `target=level` directives)
    pub log_level: String,
    /// Print the run summary as JSON instead of text
    pub json_summary: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_in_flight: 0,
            log_level: "info".to_string(),
            json_summary: false,
        }
    }
}

impl Config {
    /// Load and validate a config file
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml(&text)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// Parse and validate TOML text
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Config = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        logging::parse_filter(&self.log_level)
            .map_err(|e| anyhow!("Invalid log level '{}': {}", self.log_level, e))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.max_in_flight, 0);
        assert_eq!(config.log_level, "info");
        assert!(!config.json_summary);
    }

    #[test]
    fn test_partial_config() {
        let config = Config::from_toml("max_in_flight = 4\njson_summary = true\n").unwrap();
        assert_eq!(config.max_in_flight, 4);
        assert!(config.json_summary);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(Config::from_toml("threads = 4").is_err());
    }

    #[test]
    fn test_bad_log_level_rejected() {
        let err = Config::from_toml("log_level = \"letterfreq=chatty\"").unwrap_err();
        assert!(err.to_string().contains("chatty"));
    }

    #[test]
    fn test_directive_log_level_accepted() {
        let config = Config::from_toml("log_level = \"warn,letterfreq=debug\"").unwrap();
        assert_eq!(config.log_level, "warn,letterfreq=debug");
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("letterfreq.toml");
        fs::write(&path, "log_level = \"warn\"\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn test_load_missing_file_names_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("absent.toml");

        let err = Config::load(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("absent.toml"));
    }
}
