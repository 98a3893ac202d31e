//! bratconv Settings
//!
//! Handles converter settings from environment variables, a TOML settings
//! file, and command-line overrides, with defaults matching the BRAT
//! collection layout.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main converter configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ConverterConfig {
    /// Conversion behaviour
    pub convert: ConvertConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl ConverterConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(prefix) = std::env::var("BRATCONV_TEST_PREFIX") {
            config.convert.test_prefix = prefix;
        }
        if let Ok(strict) = std::env::var("BRATCONV_STRICT_RELATIONS") {
            config.convert.strict_relations = parse_bool("BRATCONV_STRICT_RELATIONS", &strict)?;
        }

        // Logging
        if let Ok(level) = std::env::var("LOG_LEVEL") {
            config.logging.level = level;
        }
        if let Ok(json) = std::env::var("LOG_JSON") {
            config.logging.json_format = parse_bool("LOG_JSON", &json)?;
        }

        Ok(config)
    }

    /// Load from a TOML file
    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::FileReadError {
            path: path.clone(),
            source: e,
        })?;

        Self::from_toml(&content).map_err(|message| ConfigError::ParseError { path, message })
    }

    fn from_toml(content: &str) -> Result<Self, String> {
        let config: Self = toml::from_str(content).map_err(|e| e.to_string())?;
        if config.convert.schema_file_name.trim().is_empty() {
            return Err("convert.schema_file_name must not be empty".to_string());
        }
        Ok(config)
    }

    /// Defaults, then the optional settings file, then the environment
    pub fn load(settings: Option<&Path>) -> crate::Result<Self> {
        let config = match settings {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        Ok(config.with_env_override()?)
    }

    /// Merge with environment variables (env takes precedence)
    pub fn with_env_override(mut self) -> Result<Self, ConfigError> {
        let env_config = Self::from_env()?;
        let defaults = Self::default();

        // Only override if env values differ from defaults
        if env_config.convert.test_prefix != defaults.convert.test_prefix {
            self.convert.test_prefix = env_config.convert.test_prefix;
        }
        if env_config.convert.strict_relations {
            self.convert.strict_relations = true;
        }
        if env_config.logging.level != defaults.logging.level {
            self.logging.level = env_config.logging.level;
        }
        if env_config.logging.json_format {
            self.logging.json_format = true;
        }

        Ok(self)
    }
}

/// Conversion configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertConfig {
    /// File stem prefix marking documents of the test split
    pub test_prefix: String,

    /// Name of the schema file at the root of a collection
    pub schema_file_name: String,

    /// Fail on relation arguments that name no parsed entity
    pub strict_relations: bool,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            test_prefix: "t_".to_string(),
            schema_file_name: "annotation.conf".to_string(),
            strict_relations: false,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// JSON format for logs
    pub json_format: bool,

    /// Include file/line in logs
    pub include_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            json_format: false,
            include_location: false,
        }
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read settings file {path}: {source}")]
    FileReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse settings file {path}: {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = ConverterConfig::default();
        assert_eq!(config.convert.test_prefix, "t_");
        assert_eq!(config.convert.schema_file_name, "annotation.conf");
        assert!(!config.convert.strict_relations);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = ConverterConfig::from_toml("[convert]\nstrict_relations = true\n").unwrap();
        assert!(config.convert.strict_relations);
        assert_eq!(config.convert.test_prefix, "t_");
        assert!(!config.logging.json_format);
    }

    #[test]
    fn test_empty_schema_file_name_rejected() {
        assert!(ConverterConfig::from_toml("[convert]\nschema_file_name = \"\"\n").is_err());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[convert]\ntest_prefix = \"test-\"\n[logging]\nlevel = \"debug\"").unwrap();

        let config = ConverterConfig::from_file(file.path()).unwrap();
        assert_eq!(config.convert.test_prefix, "test-");
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_from_missing_file() {
        let err = ConverterConfig::from_file("/nonexistent/bratconv.toml").unwrap_err();
        assert!(matches!(err, ConfigError::FileReadError { .. }));
    }

    #[test]
    fn test_load_settings_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[convert]\nschema_file_name = \"collection.conf\"").unwrap();

        let config = ConverterConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.convert.schema_file_name, "collection.conf");
    }

    #[test]
    fn test_load_reports_settings_error() {
        let err = ConverterConfig::load(Some(Path::new("/nonexistent/bratconv.toml"))).unwrap_err();
        assert!(matches!(
            err,
            crate::BratError::Settings(ConfigError::FileReadError { .. })
        ));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[convert]\nstrict_relations = \"sometimes\"").unwrap();
        let err = ConverterConfig::load(Some(file.path())).unwrap_err();
        assert!(matches!(
            err,
            crate::BratError::Settings(ConfigError::ParseError { .. })
        ));
    }

    #[test]
    fn test_parse_bool() {
        assert!(parse_bool("K", "true").unwrap());
        assert!(parse_bool("K", " YES ").unwrap());
        assert!(!parse_bool("K", "0").unwrap());
        assert!(parse_bool("K", "maybe").is_err());
    }
}
