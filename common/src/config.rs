use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use strum_macros::Display;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yml::Error,
    },
    #[error("writer delimiter {0:?} must be a single ASCII character")]
    InvalidDelimiter(char),
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CommonConfig {
    pub project_name: String,
    pub input_path: PathBuf,
    pub log_level: String,
}

impl Default for CommonConfig {
    fn default() -> Self {
        Self {
            project_name: "ecom".to_string(),
            input_path: PathBuf::from("orders.json"),
            log_level: "info".to_string(),
        }
    }
}

/// Zone used to turn epoch-second timestamps into wall-clock date-times.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum EpochTimezone {
    #[default]
    Local,
    Utc,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct NormalizerConfig {
    pub epoch_timezone: EpochTimezone,
    /// Missing amount keys become `0`; an explicit `null` always stays absent.
    pub default_missing_amounts_to_zero: bool,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            epoch_timezone: EpochTimezone::Local,
            default_missing_amounts_to_zero: true,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct WriterConfig {
    pub output_dir: PathBuf,
    pub delimiter: char,
    /// Treat empty optional tables as fatal, the same as required ones.
    pub strict_optional_tables: bool,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            delimiter: ',',
            strict_optional_tables: false,
        }
    }
}

impl WriterConfig {
    pub fn delimiter_byte(&self) -> Result<u8, ConfigError> {
        u8::try_from(self.delimiter)
            .ok()
            .filter(u8::is_ascii)
            .ok_or(ConfigError::InvalidDelimiter(self.delimiter))
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct PreviewConfig {
    pub sample_size: usize,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self { sample_size: 2 }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub common: CommonConfig,
    pub normalizer: NormalizerConfig,
    pub writer: WriterConfig,
    pub preview: PreviewConfig,
}

impl Config {
    pub fn load(config_path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = config_path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads the config file when it exists, otherwise falls back to the built-in defaults.
    pub fn load_or_default(config_path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = config_path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            println!("Config file {:?} not found, using defaults", path);
            Ok(Self::default())
        }
    }

    pub fn from_yaml(contents: &str) -> Result<Self, serde_yml::Error> {
        // An empty document deserializes to null rather than an empty mapping.
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yml::from_str(contents)
    }
}
