use crate::ingredient::mass::DEFAULT_FALLBACK_GRAMS;
use crate::ingredient::matcher::DEFAULT_MIN_WORD_LENGTH;
use crate::recipe::calculator::CalculatorOptions;
use crate::reference::units::is_valid_factor;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("conversion.fallback_grams must be a positive number, got {0}")]
    InvalidFallbackGrams(f64),
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub matching: MatchingConfig,

    #[serde(default)]
    pub conversion: ConversionConfig,

    // Reference data files; the embedded set is used when unset
    #[serde(default)]
    pub data: DataConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct MatchingConfig {
    #[serde(default = "default_min_word_length")]
    pub min_word_length: usize,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            min_word_length: default_min_word_length(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ConversionConfig {
    #[serde(default = "default_fallback_grams")]
    pub fallback_grams: f64,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            fallback_grams: default_fallback_grams(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct DataConfig {
    #[serde(default)]
    pub units: Option<PathBuf>,
    #[serde(default)]
    pub nutrition: Option<PathBuf>,
}

fn default_min_word_length() -> usize {
    DEFAULT_MIN_WORD_LENGTH
}

fn default_fallback_grams() -> f64 {
    DEFAULT_FALLBACK_GRAMS
}

impl Config {
    /// Load a config file. Relative data paths are resolved against the
    /// file's directory.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::parse(&content, &path.display().to_string())?;

        if let Some(base) = path.parent() {
            config.data.units = config.data.units.map(|p| base.join(p));
            config.data.nutrition = config.data.nutrition.map(|p| base.join(p));
        }
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Self::parse(content, "<string>")
    }

    fn parse(content: &str, origin: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|source| ConfigError::Parse {
            origin: origin.to_string(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would make conversions produce negative or
    /// non-finite grams.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_valid_factor(self.conversion.fallback_grams) {
            return Err(ConfigError::InvalidFallbackGrams(
                self.conversion.fallback_grams,
            ));
        }
        Ok(())
    }

    pub fn calculator_options(&self) -> CalculatorOptions {
        CalculatorOptions {
            min_word_length: self.matching.min_word_length,
            fallback_grams: self.conversion.fallback_grams,
        }
    }
}
