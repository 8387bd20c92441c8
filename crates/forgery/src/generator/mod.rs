//! The generator: format resolution, template parsing, and decorators.
//!
//! A [`Generator`] owns the formatter cache, a handle to an
//! [`ExtensionRegistry`], the ordered legacy provider list, a
//! [`RandomSource`], and (once [`Generator::unique`] is first called) the
//! uniqueness ledger.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use tracing::debug;

use crate::config::GeneratorConfig;
use crate::container::{ContainerBuilder, ExtensionRegistry};
use crate::decorator::{
    ChanceGenerator, Producer, UniqueGenerator, UniqueLedger, ValidGenerator, Validator,
};
use crate::error::GenerationError;
use crate::extension::{Extension, Formats};
use crate::provider::default_providers;
use crate::random::RandomSource;
use crate::value::Value;

mod resolver;
mod template;

pub use resolver::FormatterKind;
use resolver::{FormatterEntry, STRATEGIES};

/// Resolves format names and produces values.
///
/// # Example
///
/// ```
/// use forgery::{Generator, GeneratorConfig, Value};
///
/// let mut generator = Generator::with_config(GeneratorConfig::default().with_seed(7));
///
/// let digit = generator.format("randomDigit", &[]).expect("digit");
/// assert!(matches!(digit, Value::Int(0..=9)));
///
/// let line = generator
///     .parse("{{ bloodGroup }} / {{ Forgery\\Extension\\Version->semver }}")
///     .expect("template renders");
/// assert!(line.contains(" / "));
/// ```
pub struct Generator {
    registry: Rc<dyn ExtensionRegistry>,
    providers: Vec<Rc<dyn Formats>>,
    formatters: HashMap<String, FormatterEntry>,
    extensions: HashMap<String, Rc<dyn Extension>>,
    unique: Option<Rc<RefCell<UniqueLedger>>>,
    random: RandomSource,
    config: GeneratorConfig,
}

impl Generator {
    /// Creates a generator over the built-in extensions and providers,
    /// seeded from entropy.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(GeneratorConfig::default())
    }

    /// Creates a generator with `config`, seeded from its seed when set.
    #[must_use]
    pub fn with_config(config: GeneratorConfig) -> Self {
        let random = config
            .seed()
            .map_or_else(RandomSource::from_entropy, RandomSource::seeded);
        Self {
            registry: Rc::new(ContainerBuilder::default_container()),
            providers: default_providers(),
            formatters: HashMap::new(),
            extensions: HashMap::new(),
            unique: None,
            random,
            config,
        }
    }

    /// Replaces the extension registry and clears resolved formats.
    #[must_use]
    pub fn with_registry(mut self, registry: Rc<dyn ExtensionRegistry>) -> Self {
        self.registry = registry;
        self.clear_formatters();
        self
    }

    /// Replaces the legacy provider list and clears resolved formats.
    #[must_use]
    pub fn with_providers(mut self, providers: Vec<Rc<dyn Formats>>) -> Self {
        self.providers = providers;
        self.clear_formatters();
        self
    }

    /// Uses `random` as the random source, sharing it with every other
    /// holder of the handle.
    #[must_use]
    pub fn with_random(mut self, random: RandomSource) -> Self {
        self.random = random;
        self
    }

    /// Puts `provider` ahead of every provider already registered.
    ///
    /// Formats already resolved keep their cached target.
    pub fn add_provider(&mut self, provider: Rc<dyn Formats>) {
        self.providers.insert(0, provider);
    }

    /// Returns the legacy providers in resolution order.
    #[must_use]
    pub fn providers(&self) -> &[Rc<dyn Formats>] {
        &self.providers
    }

    /// Returns the random source formats draw from.
    #[must_use]
    pub const fn random(&self) -> &RandomSource {
        &self.random
    }

    /// Returns the configuration the generator was built with.
    #[must_use]
    pub const fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Reseeds the random source: `None` draws fresh entropy.
    pub fn seed(&self, seed: Option<u64>) {
        self.random.reseed(seed);
    }

    /// Forgets every resolved format and bound extension.
    pub fn clear_formatters(&mut self) {
        self.formatters.clear();
        self.extensions.clear();
    }

    /// Returns the extension registered under `id`.
    ///
    /// Generator-aware extensions are bound to this generator on first
    /// request; the bound copy is kept and returned afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::ExtensionNotFound`] when the registry has
    /// no such extension, or [`GenerationError::Container`] when it fails to
    /// build one.
    pub fn ext(&mut self, id: &str) -> Result<Rc<dyn Extension>, GenerationError> {
        if let Some(extension) = self.extensions.get(id) {
            return Ok(Rc::clone(extension));
        }
        if !self.registry.has(id) {
            return Err(GenerationError::ExtensionNotFound { id: id.to_owned() });
        }

        let registered = self.registry.get(id)?;
        let extension = registered.with_generator(self).map_or(registered, |bound| {
            debug!(%id, "bound extension to generator");
            bound
        });
        self.extensions.insert(id.to_owned(), Rc::clone(&extension));
        Ok(extension)
    }

    fn resolve(&mut self, name: &str) -> Result<FormatterEntry, GenerationError> {
        if let Some(entry) = self.formatters.get(name) {
            return Ok(entry.clone());
        }
        for strategy in STRATEGIES {
            if let Some(entry) = strategy(self, name)? {
                debug!(format = %name, target = entry.kind().as_str(), "resolved format");
                self.formatters.insert(name.to_owned(), entry.clone());
                return Ok(entry);
            }
        }
        Err(GenerationError::unknown_format(name))
    }

    /// Resolves `name` without producing a value and reports which path
    /// answered it.
    ///
    /// The resolution is cached exactly as [`Generator::format`] caches it.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::UnknownFormat`] when no resolution path
    /// knows `name`, or [`GenerationError::ExtensionNotFound`] for a
    /// qualified name whose extension is not registered.
    pub fn formatter(&mut self, name: &str) -> Result<FormatterKind, GenerationError> {
        self.resolve(name).map(|entry| entry.kind())
    }

    /// Produces one value of format `name` with positional `args`.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::UnknownFormat`] when no resolution path
    /// knows `name`, or whatever error the format itself raises.
    pub fn format(&mut self, name: &str, args: &[Value]) -> Result<Value, GenerationError> {
        let entry = self.resolve(name)?;
        entry.invoke(self, name, args)
    }

    /// Replaces every `{{ token }}` in `template` with the formatted value
    /// of the token.
    ///
    /// # Errors
    ///
    /// Returns the error of the first token that fails to format.
    pub fn parse(&mut self, template: &str) -> Result<String, GenerationError> {
        template::render(template, |name| {
            self.format(name, &[]).map(|value| value.to_string())
        })
    }

    /// Wraps the generator so repeated calls never return a value twice for
    /// the same format and arguments.
    ///
    /// The ledger of seen values is created on first use and kept for the
    /// generator's lifetime; see [`Generator::unique_with`] to reset it.
    #[must_use]
    pub fn unique(&mut self) -> UniqueGenerator<&mut Self> {
        let max_retries = self.config.unique_max_retries();
        self.unique_with(false, max_retries)
    }

    /// Like [`Generator::unique`], replacing the ledger when `reset` is set.
    ///
    /// `max_retries` only applies to a newly created ledger.
    #[must_use]
    pub fn unique_with(&mut self, reset: bool, max_retries: usize) -> UniqueGenerator<&mut Self> {
        let ledger = match &self.unique {
            Some(ledger) if !reset => Rc::clone(ledger),
            _ => {
                let ledger = Rc::new(RefCell::new(UniqueLedger::new(max_retries)));
                self.unique = Some(Rc::clone(&ledger));
                ledger
            }
        };
        UniqueGenerator::with_ledger(self, ledger)
    }

    /// Wraps the generator so each call produces a value with probability
    /// `weight` and [`Value::Null`] otherwise.
    #[must_use]
    pub fn optional(&mut self, weight: f64) -> ChanceGenerator<&mut Self> {
        self.optional_or(weight, Value::Null)
    }

    /// Like [`Generator::optional`] with a custom `default`.
    #[must_use]
    pub fn optional_or(&mut self, weight: f64, default: Value) -> ChanceGenerator<&mut Self> {
        ChanceGenerator::new(self, weight, default)
    }

    /// Wraps the generator so only values accepted by `validator` are
    /// returned, retrying up to the configured budget.
    #[must_use]
    pub fn valid(
        &mut self,
        validator: impl Fn(&Value) -> bool + 'static,
    ) -> ValidGenerator<&mut Self> {
        let max_retries = self.config.valid_max_retries();
        self.valid_with(Some(Box::new(validator)), max_retries)
    }

    /// Like [`Generator::valid`] with an explicit retry budget. Without a
    /// validator the first value is accepted.
    #[must_use]
    pub fn valid_with(
        &mut self,
        validator: Option<Validator>,
        max_retries: usize,
    ) -> ValidGenerator<&mut Self> {
        ValidGenerator::new(self, validator, max_retries)
    }
}

impl Default for Generator {
    fn default() -> Self {
        Self::new()
    }
}

impl Producer for Generator {
    fn invoke(&mut self, name: &str, args: &[Value]) -> Result<Value, GenerationError> {
        self.format(name, args)
    }

    fn random_source(&self) -> RandomSource {
        self.random.clone()
    }
}

/// Cloning shares the registry, providers, and configuration, forks the
/// random source, and starts with empty caches and no uniqueness ledger.
impl Clone for Generator {
    fn clone(&self) -> Self {
        Self {
            registry: Rc::clone(&self.registry),
            providers: self.providers.clone(),
            formatters: HashMap::new(),
            extensions: HashMap::new(),
            unique: None,
            random: self.random.fork(),
            config: self.config.clone(),
        }
    }
}

/// Dropping a generator reseeds its random source from entropy, so a
/// seeded source shared with others does not stay deterministic.
impl Drop for Generator {
    fn drop(&mut self) {
        self.random.reseed(None);
    }
}

impl fmt::Debug for Generator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut resolved: Vec<&String> = self.formatters.keys().collect();
        resolved.sort();
        f.debug_struct("Generator")
            .field("providers", &self.providers.len())
            .field("resolved", &resolved)
            .field("unique", &self.unique.is_some())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
