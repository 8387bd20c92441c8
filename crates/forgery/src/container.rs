//! The extension registry contract and its default container.
//!
//! Generators only need [`ExtensionRegistry`]: `has` and `get` by
//! identifier. [`Container`] is the implementation shipped with the crate;
//! it is assembled by [`ContainerBuilder`], which rejects malformed
//! definitions at registration time.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use tracing::debug;

use crate::error::ContainerError;
use crate::extension::{DEFAULT_EXTENSIONS, Extension, builtin};

/// Looks up extensions by qualified identifier.
pub trait ExtensionRegistry {
    /// Returns `true` when an extension is registered under `id`.
    fn has(&self, id: &str) -> bool;

    /// Returns the extension registered under `id`.
    ///
    /// # Errors
    ///
    /// Returns [`ContainerError`] when nothing is registered under `id` or
    /// the definition cannot produce an extension.
    fn get(&self, id: &str) -> Result<Rc<dyn Extension>, ContainerError>;
}

/// How a container produces the extension for one identifier.
pub enum Definition {
    /// A ready-made instance, shared by every lookup.
    Instance(Rc<dyn Extension>),
    /// A factory called on first lookup.
    Factory(Box<dyn Fn() -> Rc<dyn Extension>>),
    /// The name of a built-in implementation, such as
    /// [`CORE_BARCODE`](crate::extension::CORE_BARCODE).
    Named(String),
}

impl fmt::Debug for Definition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Instance(_) => f.write_str("Instance(..)"),
            Self::Factory(_) => f.write_str("Factory(..)"),
            Self::Named(name) => f.debug_tuple("Named").field(name).finish(),
        }
    }
}

/// Collects definitions and builds a [`Container`].
///
/// # Example
///
/// ```
/// use forgery::container::{ContainerBuilder, Definition, ExtensionRegistry};
/// use forgery::extension::CORE_BLOOD;
///
/// let mut builder = ContainerBuilder::new();
/// builder
///     .add("Acme\\Blood", Definition::Named(CORE_BLOOD.to_owned()))
///     .expect("valid definition");
/// let container = builder.build();
///
/// assert!(container.has("Acme\\Blood"));
/// ```
#[derive(Debug, Default)]
pub struct ContainerBuilder {
    definitions: HashMap<String, Definition>,
}

impl ContainerBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder holding the built-in extensions.
    #[must_use]
    pub fn with_default_extensions() -> Self {
        let definitions = DEFAULT_EXTENSIONS
            .iter()
            .map(|(id, name)| ((*id).to_owned(), Definition::Named((*name).to_owned())))
            .collect();
        Self { definitions }
    }

    /// Registers `definition` under `id`, replacing any earlier one.
    ///
    /// # Errors
    ///
    /// Returns [`ContainerError::InvalidDefinition`] if `id` is not a
    /// qualified identifier (ASCII letters, digits, and backslashes) or a
    /// [`Definition::Named`] names no built-in implementation.
    pub fn add(
        &mut self,
        identifier: impl Into<String>,
        definition: Definition,
    ) -> Result<&mut Self, ContainerError> {
        let id = identifier.into();
        if !is_qualified_identifier(&id) {
            return Err(ContainerError::InvalidDefinition {
                id,
                message: "identifiers may only contain letters, digits, and backslashes"
                    .to_owned(),
            });
        }
        if let Definition::Named(name) = &definition {
            if builtin(name).is_none() {
                return Err(ContainerError::InvalidDefinition {
                    message: format!("'{name}' is not a built-in extension"),
                    id,
                });
            }
        }
        self.definitions.insert(id, definition);
        Ok(self)
    }

    /// Builds the container.
    #[must_use]
    pub fn build(self) -> Container {
        Container {
            definitions: self.definitions,
            services: RefCell::new(HashMap::new()),
        }
    }

    /// Builds a container holding the built-in extensions.
    #[must_use]
    pub fn default_container() -> Container {
        Self::with_default_extensions().build()
    }
}

fn is_qualified_identifier(id: &str) -> bool {
    !id.is_empty() && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '\\')
}

/// The default [`ExtensionRegistry`]: instantiates each extension once, on
/// first lookup, and shares it afterwards.
pub struct Container {
    definitions: HashMap<String, Definition>,
    services: RefCell<HashMap<String, Rc<dyn Extension>>>,
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut ids: Vec<&String> = self.definitions.keys().collect();
        ids.sort();
        f.debug_struct("Container").field("ids", &ids).finish()
    }
}

impl ExtensionRegistry for Container {
    fn has(&self, id: &str) -> bool {
        self.definitions.contains_key(id)
    }

    fn get(&self, id: &str) -> Result<Rc<dyn Extension>, ContainerError> {
        if let Some(service) = self.services.borrow().get(id) {
            return Ok(Rc::clone(service));
        }

        let definition = self
            .definitions
            .get(id)
            .ok_or_else(|| ContainerError::NotFound { id: id.to_owned() })?;
        let service = match definition {
            Definition::Instance(instance) => Rc::clone(instance),
            Definition::Factory(factory) => factory(),
            Definition::Named(name) => {
                builtin(name).ok_or_else(|| ContainerError::InvalidDefinition {
                    id: id.to_owned(),
                    message: format!("'{name}' is not a built-in extension"),
                })?
            }
        };
        debug!(%id, "instantiated extension");

        self.services
            .borrow_mut()
            .insert(id.to_owned(), Rc::clone(&service));
        Ok(service)
    }
}
