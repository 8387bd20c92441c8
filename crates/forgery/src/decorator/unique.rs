//! Never return the same value twice per format and arguments.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use tracing::debug;

use crate::decorator::Producer;
use crate::error::GenerationError;
use crate::random::RandomSource;
use crate::value::Value;

/// A format name together with the arguments it was called with.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct Signature {
    name: String,
    args: Vec<Value>,
}

impl Signature {
    fn new(name: &str, args: &[Value]) -> Self {
        Self {
            name: name.to_owned(),
            args: args.to_vec(),
        }
    }
}

/// Values already returned, per signature, and the retry budget.
#[derive(Debug, Default)]
pub(crate) struct UniqueLedger {
    max_retries: usize,
    seen: HashMap<Signature, HashSet<Value>>,
}

impl UniqueLedger {
    pub(crate) fn new(max_retries: usize) -> Self {
        Self {
            max_retries,
            seen: HashMap::new(),
        }
    }

    fn contains(&self, signature: &Signature, value: &Value) -> bool {
        self.seen
            .get(signature)
            .is_some_and(|values| values.contains(value))
    }
}

/// Wraps a producer and rejects values it already returned for the same
/// format name and arguments.
///
/// Each call retries the wrapped producer up to `max_retries` times. The
/// ledger of seen values lives as long as the decorator, or as long as the
/// generator when obtained through
/// [`Generator::unique`](crate::Generator::unique).
///
/// # Example
///
/// ```
/// use forgery::{Generator, GenerationError, ProducerExt, Value};
///
/// let mut generator = Generator::new();
/// let letters = [Value::from("a"), Value::from("b"), Value::from("c")];
/// let mut unique = generator.unique_with(true, 1_000);
///
/// let mut picked: Vec<Value> = (0..3)
///     .map(|_| unique.random_element(&letters).expect("unique letter"))
///     .collect();
/// picked.sort_by_key(ToString::to_string);
/// assert_eq!(picked, letters);
///
/// assert_eq!(
///     unique.random_element(&letters),
///     Err(GenerationError::UniquenessOverflow { max_retries: 1_000 })
/// );
/// ```
#[derive(Debug)]
pub struct UniqueGenerator<P> {
    inner: P,
    ledger: Rc<RefCell<UniqueLedger>>,
}

impl<P: Producer> UniqueGenerator<P> {
    /// Wraps `inner` with an empty ledger.
    ///
    /// A `max_retries` of zero fails every call without invoking `inner`.
    #[must_use]
    pub fn new(inner: P, max_retries: usize) -> Self {
        Self::with_ledger(inner, Rc::new(RefCell::new(UniqueLedger::new(max_retries))))
    }

    pub(crate) const fn with_ledger(inner: P, ledger: Rc<RefCell<UniqueLedger>>) -> Self {
        Self { inner, ledger }
    }

    /// Returns the retry budget of each call.
    #[must_use]
    pub fn max_retries(&self) -> usize {
        self.ledger.borrow().max_retries
    }
}

impl<P: Producer> Producer for UniqueGenerator<P> {
    fn invoke(&mut self, name: &str, args: &[Value]) -> Result<Value, GenerationError> {
        let signature = Signature::new(name, args);
        let max_retries = self.max_retries();

        for _ in 0..max_retries {
            // Nested formats may reach this ledger again, so no borrow is
            // held while the wrapped producer runs.
            let value = self.inner.invoke(name, args)?;
            let mut ledger = self.ledger.borrow_mut();
            if !ledger.contains(&signature, &value) {
                ledger
                    .seen
                    .entry(signature)
                    .or_default()
                    .insert(value.clone());
                return Ok(value);
            }
        }

        debug!(format = %name, max_retries, "no unique value left");
        Err(GenerationError::UniquenessOverflow { max_retries })
    }

    fn random_source(&self) -> RandomSource {
        self.inner.random_source()
    }
}
