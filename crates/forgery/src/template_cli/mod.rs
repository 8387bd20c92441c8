//! CLI support for rendering templates.
//!
//! This module provides parsing and rendering helpers for the `forgery`
//! binary. The binary delegates to these functions so they can be exercised
//! in tests without spawning a subprocess.

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::GeneratorConfig;
use crate::generator::Generator;

mod error;

pub use error::CliError;

const DEFAULT_COUNT: usize = 1;

/// Parsed options for the template CLI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    template: String,
    seed: Option<u64>,
    count: usize,
    config_path: Option<PathBuf>,
}

impl Options {
    /// Returns the template to render.
    ///
    /// # Example
    ///
    /// ```
    /// use forgery::template_cli::{ParseOutcome, parse_args};
    ///
    /// let args = vec!["{{ ean13 }}".to_owned()];
    /// let ParseOutcome::Options(options) = parse_args(args.into_iter()).expect("parse") else {
    ///     panic!("expected options");
    /// };
    ///
    /// assert_eq!(options.template(), "{{ ean13 }}");
    /// ```
    #[must_use]
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Returns how many lines to render.
    #[must_use]
    pub const fn count(&self) -> usize {
        self.count
    }

    /// Returns the configuration file path, if one was given.
    #[must_use]
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }
}

/// Outcome of parsing CLI arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    /// Show help output and exit successfully.
    Help,
    /// Continue with the parsed options.
    Options(Options),
}

/// Parses CLI arguments into rendering options.
///
/// # Errors
///
/// Returns [`CliError`] when the template is missing, a flag is unknown or
/// lacks its value, or a number cannot be parsed.
///
/// # Example
///
/// ```
/// use forgery::template_cli::{ParseOutcome, parse_args};
///
/// let args = vec![
///     "--seed".to_owned(),
///     "7".to_owned(),
///     "--count".to_owned(),
///     "3".to_owned(),
///     "{{ name }}".to_owned(),
/// ];
///
/// let outcome = parse_args(args.into_iter()).expect("parse args");
/// assert!(matches!(outcome, ParseOutcome::Options(options) if options.count() == 3));
/// ```
pub fn parse_args<I>(mut args: I) -> Result<ParseOutcome, CliError>
where
    I: Iterator<Item = String>,
{
    let mut template: Option<String> = None;
    let mut seed: Option<u64> = None;
    let mut count: Option<usize> = None;
    let mut config_path: Option<PathBuf> = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(ParseOutcome::Help),
            "--seed" => {
                let value = next_value(&mut args, "--seed")?;
                seed = Some(parse_number(&value, "--seed")?);
            }
            "--count" => {
                let value = next_value(&mut args, "--count")?;
                count = Some(parse_count(&value)?);
            }
            "--config" => {
                let value = next_value(&mut args, "--config")?;
                config_path = Some(PathBuf::from(value));
            }
            flag if flag.starts_with('-') && flag.len() > 1 => {
                return Err(CliError::UnknownArgument { value: arg });
            }
            _ if template.is_some() => return Err(CliError::UnexpectedArgument { value: arg }),
            _ => template = Some(arg),
        }
    }

    let resolved_template = template.ok_or(CliError::MissingTemplate)?;
    Ok(ParseOutcome::Options(Options {
        template: resolved_template,
        seed,
        count: count.unwrap_or(DEFAULT_COUNT),
        config_path,
    }))
}

/// Builds the generator described by `options`.
///
/// The `--seed` flag overrides any seed in the configuration file.
///
/// # Errors
///
/// Returns [`CliError::ConfigError`] when the configuration file cannot be
/// loaded.
pub fn build_generator(options: &Options) -> Result<Generator, CliError> {
    let mut config = match &options.config_path {
        Some(path) => GeneratorConfig::from_file(path)?,
        None => GeneratorConfig::default(),
    };
    if let Some(seed) = options.seed {
        config = config.with_seed(seed);
    }
    debug!(seed = ?config.seed(), count = options.count, "building generator");
    Ok(Generator::with_config(config))
}

/// Renders the template `options.count()` times.
///
/// # Errors
///
/// Returns [`CliError`] when the configuration cannot be loaded or a token
/// fails to render.
///
/// # Example
///
/// ```
/// use forgery::template_cli::{ParseOutcome, parse_args, render};
///
/// let args = vec![
///     "--seed".to_owned(),
///     "1".to_owned(),
///     "--count".to_owned(),
///     "2".to_owned(),
///     "{{ bloodType }}".to_owned(),
/// ];
/// let ParseOutcome::Options(options) = parse_args(args.into_iter()).expect("parse") else {
///     panic!("expected options");
/// };
///
/// let lines = render(&options).expect("render");
/// assert_eq!(lines.len(), 2);
/// ```
pub fn render(options: &Options) -> Result<Vec<String>, CliError> {
    let mut generator = build_generator(options)?;
    (0..options.count)
        .map(|_| generator.parse(&options.template).map_err(CliError::from))
        .collect()
}

fn next_value<I>(args: &mut I, flag: &'static str) -> Result<String, CliError>
where
    I: Iterator<Item = String>,
{
    args.next().ok_or(CliError::MissingValue { flag })
}

fn parse_number<T>(value: &str, flag: &'static str) -> Result<T, CliError>
where
    T: std::str::FromStr,
    T::Err: fmt::Display,
{
    value.parse::<T>().map_err(|err| CliError::InvalidNumber {
        flag,
        value: value.to_owned(),
        message: err.to_string(),
    })
}

fn parse_count(value: &str) -> Result<usize, CliError> {
    match parse_number(value, "--count")? {
        0 => Err(CliError::InvalidNumber {
            flag: "--count",
            value: value.to_owned(),
            message: "count must be at least 1".to_owned(),
        }),
        count => Ok(count),
    }
}

#[cfg(test)]
mod tests;
