//! Error types for the forgery crate.
//!
//! This module defines semantic error enums for extension registration,
//! format generation, and configuration loading, following the project's
//! error handling conventions with `thiserror`.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while registering or looking up extensions in a container.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContainerError {
    /// A definition was rejected at registration time.
    #[error("invalid definition for extension '{id}': {message}")]
    InvalidDefinition {
        /// Identifier the definition was registered under.
        id: String,
        /// Description of the contract violation.
        message: String,
    },

    /// The container holds no definition for the identifier.
    #[error("no definition registered for extension '{id}'")]
    NotFound {
        /// The identifier that was looked up.
        id: String,
    },
}

/// Errors that can occur while resolving or producing a formatted value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// No resolution path matched the format name.
    #[error("Unknown format \"{name}\"")]
    UnknownFormat {
        /// The format name that could not be resolved.
        name: String,
    },

    /// The extension registry has no extension with the identifier.
    #[error("No extension with id \"{id}\" was loaded.")]
    ExtensionNotFound {
        /// The extension identifier that was requested.
        id: String,
    },

    /// A format was invoked with an argument it cannot use.
    #[error("invalid argument for format \"{format}\": {message}")]
    InvalidArgument {
        /// The format that rejected the argument.
        format: String,
        /// Description of the problem.
        message: String,
    },

    /// A typed accessor received a value of another kind.
    #[error("format \"{format}\" produced a value that is not {expected}")]
    UnexpectedValue {
        /// The format whose value was converted.
        format: String,
        /// The kind of value the caller expected.
        expected: &'static str,
    },

    /// A format could not create the file it reports.
    #[error("format \"{format}\" failed to create '{path}': {message}")]
    FileError {
        /// The format that touched the filesystem.
        format: String,
        /// Path of the file that could not be created.
        path: PathBuf,
        /// Description of the I/O failure.
        message: String,
    },

    /// The unique decorator ran out of retries.
    #[error("maximum retries of {max_retries} reached without finding a unique value")]
    UniquenessOverflow {
        /// Retry budget that was exhausted.
        max_retries: usize,
    },

    /// The valid decorator ran out of retries.
    #[error("maximum retries of {max_retries} reached without finding a valid value")]
    ValidationOverflow {
        /// Retry budget that was exhausted.
        max_retries: usize,
    },

    /// The extension container failed to produce an extension.
    #[error("container error: {source}")]
    Container {
        /// Underlying container error.
        #[from]
        #[source]
        source: ContainerError,
    },
}

impl GenerationError {
    pub(crate) fn invalid_argument(format: &str, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            format: format.to_owned(),
            message: message.into(),
        }
    }

    pub(crate) fn unknown_format(name: &str) -> Self {
        Self::UnknownFormat {
            name: name.to_owned(),
        }
    }
}

/// Errors that can occur when loading a generator configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config file at '{path}': {message}")]
    IoError {
        /// Path to the configuration file.
        path: PathBuf,
        /// Description of the I/O error.
        message: String,
    },

    /// The configuration JSON is malformed.
    #[error("invalid config JSON: {message}")]
    ParseError {
        /// Description of the parse error.
        message: String,
    },

    /// The configuration version is not supported.
    #[error("unsupported config version: expected {expected}, found {actual}")]
    UnsupportedVersion {
        /// Expected version number.
        expected: u32,
        /// Actual version found in the configuration.
        actual: u32,
    },

    /// A retry limit was zero.
    #[error("retry limit '{field}' must be a positive integer")]
    InvalidRetryLimit {
        /// Name of the offending field.
        field: &'static str,
    },

    /// The reference time is not an RFC 3339 timestamp.
    #[error("invalid reference time: {value}")]
    InvalidReferenceTime {
        /// The rejected value.
        value: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_format_matches_resolver_message() {
        let err = GenerationError::unknown_format("nope");
        assert_eq!(err.to_string(), "Unknown format \"nope\"");
    }

    #[test]
    fn extension_not_found_formats_correctly() {
        let err = GenerationError::ExtensionNotFound {
            id: "Acme\\Missing".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "No extension with id \"Acme\\Missing\" was loaded."
        );
    }

    #[test]
    fn overflow_errors_name_the_budget() {
        let unique = GenerationError::UniquenessOverflow { max_retries: 3 };
        let valid = GenerationError::ValidationOverflow { max_retries: 7 };
        assert_eq!(
            unique.to_string(),
            "maximum retries of 3 reached without finding a unique value"
        );
        assert_eq!(
            valid.to_string(),
            "maximum retries of 7 reached without finding a valid value"
        );
    }

    #[test]
    fn container_errors_convert_into_generation_errors() {
        let err: GenerationError = ContainerError::NotFound {
            id: "X".to_owned(),
        }
        .into();
        assert_eq!(
            err.to_string(),
            "container error: no definition registered for extension 'X'"
        );
    }

    #[test]
    fn config_error_retry_limit_formats_correctly() {
        let err = ConfigError::InvalidRetryLimit {
            field: "uniqueMaxRetries",
        };
        assert_eq!(
            err.to_string(),
            "retry limit 'uniqueMaxRetries' must be a positive integer"
        );
    }
}
