//! Configuration for the gridcodec demo
//!
//! Loads configuration from:
//! 1. gridcodec.yaml (or the `--config` path) - codec, session and logging settings
//! 2. .env file - picked up by `dotenvy` before loading
//!
//! Environment variables always override file values.

use gridcodec_codec::{CodecOptions, FlattenMode, ListStyle};
use gridcodec_session::{EditPolicy, SessionOptions};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Looked up when no `--config` path is given
pub const DEFAULT_CONFIG_FILE: &str = "gridcodec.yaml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid value for {var}: {message}")]
    InvalidValue { var: String, message: String },
}

/// Session behaviour
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub edit_policy: EditPolicy,
}

/// Record file loading
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Promote `YYYY-MM-DD` strings to dates
    pub infer_dates: bool,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self { infer_dates: true }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error) or module-specific
    pub level: String,

    /// Output format: pretty, json, compact
    pub format: String,

    /// Output destination: stderr, file, both
    pub output: String,

    /// Directory for log files
    pub directory: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: "compact".to_string(),
            output: "stderr".to_string(),
            directory: "./logs".to_string(),
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub codec: CodecOptions,
    pub session: SessionConfig,
    pub input: InputConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from YAML file with environment variable overrides
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config: Config = serde_yaml::from_str(&contents)?;
        config.apply_overrides(|var| std::env::var(var).ok())?;
        Ok(config)
    }

    /// Load `path`, or `gridcodec.yaml` when present, or fall back to defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => Self::load(DEFAULT_CONFIG_FILE),
            None => {
                let mut config = Config::default();
                config.apply_overrides(|var| std::env::var(var).ok())?;
                Ok(config)
            }
        }
    }

    /// Apply overrides from a variable lookup (the process environment in practice)
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(style) = lookup("GRIDCODEC_LIST_STYLE") {
            self.codec.list_style = parse_var::<ListStyle>("GRIDCODEC_LIST_STYLE", &style)?;
        }
        if let Some(mode) = lookup("GRIDCODEC_FLATTEN_MODE") {
            self.codec.flatten_mode = parse_var::<FlattenMode>("GRIDCODEC_FLATTEN_MODE", &mode)?;
        }
        if let Some(policy) = lookup("GRIDCODEC_EDIT_POLICY") {
            self.session.edit_policy = parse_var::<EditPolicy>("GRIDCODEC_EDIT_POLICY", &policy)?;
        }

        if let Some(level) = lookup("RUST_LOG") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("LOG_FORMAT") {
            self.logging.format = format;
        }
        if let Some(output) = lookup("LOG_OUTPUT") {
            self.logging.output = output;
        }
        if let Some(dir) = lookup("LOG_DIR") {
            self.logging.directory = dir;
        }

        Ok(())
    }

    pub fn session_options(&self) -> SessionOptions {
        SessionOptions::default()
            .with_codec(self.codec)
            .with_edit_policy(self.session.edit_policy)
    }
}

fn parse_var<T>(var: &str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr<Err = String>,
{
    value.parse().map_err(|message| ConfigError::InvalidValue {
        var: var.to_string(),
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.codec.list_style, ListStyle::CommaSpace);
        assert_eq!(config.codec.flatten_mode, FlattenMode::Strict);
        assert_eq!(config.session.edit_policy, EditPolicy::Revert);
        assert!(config.input.infer_dates);
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.logging.output, "stderr");
    }

    #[test]
    fn test_load_partial_yaml() {
        let config_yaml = r#"
codec:
  list_style: json_array
session:
  edit_policy: keep_text
logging:
  level: "debug"
"#;
        let temp_file = std::env::temp_dir().join("gridcodec_test_config.yaml");
        std::fs::write(&temp_file, config_yaml).unwrap();

        let config = Config::load(&temp_file).unwrap();
        assert_eq!(config.codec.list_style, ListStyle::JsonArray);
        assert_eq!(config.codec.flatten_mode, FlattenMode::Strict);
        assert_eq!(config.session.edit_policy, EditPolicy::KeepText);
        assert!(config.input.infer_dates);

        std::fs::remove_file(temp_file).ok();
    }

    #[test]
    fn test_overrides() {
        let vars = HashMap::from([
            ("GRIDCODEC_FLATTEN_MODE", "lenient"),
            ("GRIDCODEC_EDIT_POLICY", "reject"),
            ("LOG_FORMAT", "json"),
        ]);

        let mut config = Config::default();
        config
            .apply_overrides(|var| vars.get(var).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.codec.flatten_mode, FlattenMode::Lenient);
        assert_eq!(config.session.edit_policy, EditPolicy::Reject);
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.session_options().edit_policy, EditPolicy::Reject);
    }

    #[test]
    fn test_invalid_override() {
        let mut config = Config::default();
        let err = config
            .apply_overrides(|var| (var == "GRIDCODEC_LIST_STYLE").then(|| "tabs".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref var, .. } if var == "GRIDCODEC_LIST_STYLE"));
    }
}
