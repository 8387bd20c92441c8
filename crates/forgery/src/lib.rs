//! Fake data generation through named formats.
//!
//! A [`Generator`] resolves format names such as `randomDigit`, `bloodGroup`,
//! or `Forgery\Extension\Barcode->ean13` to the function that produces them,
//! interpolates formats into `{{ token }}` templates, and hands out
//! decorators that make results unique, optional, or validated.
//!
//! # Overview
//!
//! The crate supports:
//!
//! - Format resolution through the generator's own methods, qualified
//!   extension references, and legacy providers, memoized per name
//! - Extensions looked up by identifier in an [`ExtensionRegistry`]
//! - Template parsing with left-to-right substitution
//! - Unique, chance, and valid decorators over any [`Producer`]
//! - Deterministic output from an injectable, seedable [`RandomSource`]
//! - JSON configuration through [`GeneratorConfig`]
//!
//! # Example
//!
//! ```
//! use forgery::{Generator, GeneratorConfig, ProducerExt};
//!
//! let config = GeneratorConfig::from_json(r#"{"version": 1, "seed": 2026}"#)
//!     .expect("valid config");
//! let mut generator = Generator::with_config(config);
//!
//! let line = generator
//!     .parse("{{ firstName }} ({{ bloodGroup }}), isbn {{ isbn13 }}")
//!     .expect("template renders");
//! assert!(line.contains("isbn 97"));
//!
//! let mut unique = generator.unique();
//! let first = unique.random_digit().expect("digit");
//! let second = unique.random_digit().expect("digit");
//! assert_ne!(first, second);
//! ```

mod config;
pub mod container;
mod decorator;
mod error;
pub mod extension;
mod generator;
pub mod provider;
mod random;
pub mod template_cli;
mod value;

pub use config::{DEFAULT_MAX_RETRIES, GeneratorConfig};
pub use container::ExtensionRegistry;
pub use decorator::{
    ChanceGenerator, Producer, ProducerExt, UniqueGenerator, ValidGenerator, Validator,
};
pub use error::{ConfigError, ContainerError, GenerationError};
pub use generator::{FormatterKind, Generator};
pub use random::RandomSource;
pub use value::{Args, Value};
