//! Error types for the template CLI.

use thiserror::Error;

use crate::error::{ConfigError, GenerationError};

/// Errors surfaced by the CLI parsing and rendering flow.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CliError {
    /// No template was supplied.
    #[error("missing required argument: <template>")]
    MissingTemplate,
    /// A flag expected a value but none was provided.
    #[error("missing value for {flag}")]
    MissingValue {
        /// Flag that was missing its value.
        flag: &'static str,
    },
    /// An unsupported flag was supplied.
    #[error("unknown argument: {value}")]
    UnknownArgument {
        /// Argument value that was not recognized.
        value: String,
    },
    /// A second template was supplied.
    #[error("unexpected argument: {value}; quote the template as one argument")]
    UnexpectedArgument {
        /// The surplus positional argument.
        value: String,
    },
    /// A numeric value failed to parse or is out of range.
    #[error("invalid number for {flag}: '{value}' ({message})")]
    InvalidNumber {
        /// Flag associated with the invalid number.
        flag: &'static str,
        /// Raw value supplied for the flag.
        value: String,
        /// Parser error message.
        message: String,
    },
    /// The configuration file could not be loaded.
    #[error("config error: {source}")]
    ConfigError {
        /// Underlying configuration error.
        #[from]
        #[source]
        source: ConfigError,
    },
    /// The template failed to render.
    #[error("generation error: {source}")]
    GenerationError {
        /// Underlying generation error.
        #[from]
        #[source]
        source: GenerationError,
    },
}
