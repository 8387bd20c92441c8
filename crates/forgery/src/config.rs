//! Generator configuration and JSON parsing.
//!
//! A configuration fixes the seed, the default retry budgets of the unique
//! and valid decorators, and the reference time date formats are relative
//! to. It is loaded from JSON and validated into [`GeneratorConfig`].

use std::fs;
use std::path::Path;

use chrono::{DateTime, FixedOffset};
use serde::Deserialize;

use crate::error::ConfigError;

/// Current supported configuration version.
const SUPPORTED_VERSION: u32 = 1;

/// Default retry budget for the unique and valid decorators.
pub const DEFAULT_MAX_RETRIES: usize = 10_000;

/// Validated generator settings.
///
/// # Example
///
/// ```
/// use forgery::GeneratorConfig;
///
/// let json = r#"{"version": 1, "seed": 42, "uniqueMaxRetries": 50}"#;
/// let config = GeneratorConfig::from_json(json).expect("valid config");
///
/// assert_eq!(config.seed(), Some(42));
/// assert_eq!(config.unique_max_retries(), 50);
/// assert_eq!(config.valid_max_retries(), 10_000);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    seed: Option<u64>,
    unique_max_retries: usize,
    valid_max_retries: usize,
    reference_time: Option<DateTime<FixedOffset>>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: None,
            unique_max_retries: DEFAULT_MAX_RETRIES,
            valid_max_retries: DEFAULT_MAX_RETRIES,
            reference_time: None,
        }
    }
}

impl GeneratorConfig {
    /// Parses a configuration from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if:
    /// - The JSON is malformed or has unknown fields
    /// - The version is unsupported
    /// - A retry limit is zero
    /// - The reference time is not RFC 3339
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let raw: RawGeneratorConfig =
            serde_json::from_str(json).map_err(|e| ConfigError::ParseError {
                message: e.to_string(),
            })?;

        Self::from_raw(raw)
    }

    /// Loads a configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        Self::from_json(&contents)
    }

    fn from_raw(raw: RawGeneratorConfig) -> Result<Self, ConfigError> {
        if raw.version != SUPPORTED_VERSION {
            return Err(ConfigError::UnsupportedVersion {
                expected: SUPPORTED_VERSION,
                actual: raw.version,
            });
        }

        let unique_max_retries = positive(raw.unique_max_retries, "uniqueMaxRetries")?;
        let valid_max_retries = positive(raw.valid_max_retries, "validMaxRetries")?;

        let reference_time = raw
            .reference_time
            .map(|value| {
                DateTime::parse_from_rfc3339(&value)
                    .map_err(|_| ConfigError::InvalidReferenceTime { value })
            })
            .transpose()?;

        Ok(Self {
            seed: raw.seed,
            unique_max_retries,
            valid_max_retries,
            reference_time,
        })
    }

    /// Returns a copy that seeds generators with `seed`.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Returns a copy whose date formats are relative to `reference_time`.
    #[must_use]
    pub const fn with_reference_time(mut self, reference_time: DateTime<FixedOffset>) -> Self {
        self.reference_time = Some(reference_time);
        self
    }

    /// Returns the explicit seed, if any.
    #[must_use]
    pub const fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Returns the default retry budget of the unique decorator.
    #[must_use]
    pub const fn unique_max_retries(&self) -> usize {
        self.unique_max_retries
    }

    /// Returns the default retry budget of the valid decorator.
    #[must_use]
    pub const fn valid_max_retries(&self) -> usize {
        self.valid_max_retries
    }

    /// Returns the reference time, if one was configured.
    #[must_use]
    pub const fn reference_time(&self) -> Option<DateTime<FixedOffset>> {
        self.reference_time
    }
}

fn positive(value: Option<usize>, field: &'static str) -> Result<usize, ConfigError> {
    match value {
        None => Ok(DEFAULT_MAX_RETRIES),
        Some(0) => Err(ConfigError::InvalidRetryLimit { field }),
        Some(limit) => Ok(limit),
    }
}

/// Raw JSON representation for deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct RawGeneratorConfig {
    version: u32,
    seed: Option<u64>,
    unique_max_retries: Option<usize>,
    valid_max_retries: Option<usize>,
    reference_time: Option<String>,
}
