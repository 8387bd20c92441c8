//! Retry until a predicate accepts the value.

use std::fmt;

use tracing::debug;

use crate::decorator::Producer;
use crate::error::GenerationError;
use crate::random::RandomSource;
use crate::value::Value;

/// Predicate deciding whether a produced value is acceptable.
pub type Validator = Box<dyn Fn(&Value) -> bool>;

/// Wraps a producer and retries until the validator accepts a value.
///
/// # Example
///
/// ```
/// use forgery::{Generator, GeneratorConfig, ProducerExt};
///
/// let mut generator = Generator::with_config(GeneratorConfig::default().with_seed(5));
/// let mut even = generator.valid(|value| value.as_int().is_some_and(|n| n.rem_euclid(2) == 0));
///
/// let digit = even.random_digit().expect("an even digit within the budget");
/// assert_eq!(digit.rem_euclid(2), 0);
/// ```
pub struct ValidGenerator<P> {
    inner: P,
    validator: Option<Validator>,
    max_retries: usize,
}

impl<P: Producer> ValidGenerator<P> {
    /// Wraps `inner`. Without a validator the first value is accepted; a
    /// `max_retries` of zero fails every call without invoking `inner`.
    #[must_use]
    pub fn new(inner: P, validator: Option<Validator>, max_retries: usize) -> Self {
        Self {
            inner,
            validator,
            max_retries,
        }
    }

    fn accepts(&self, value: &Value) -> bool {
        self.validator
            .as_ref()
            .is_none_or(|validator| validator(value))
    }
}

impl<P: Producer> Producer for ValidGenerator<P> {
    fn invoke(&mut self, name: &str, args: &[Value]) -> Result<Value, GenerationError> {
        for _ in 0..self.max_retries {
            let value = self.inner.invoke(name, args)?;
            if self.accepts(&value) {
                return Ok(value);
            }
        }

        debug!(format = %name, max_retries = self.max_retries, "no valid value found");
        Err(GenerationError::ValidationOverflow {
            max_retries: self.max_retries,
        })
    }

    fn random_source(&self) -> RandomSource {
        self.inner.random_source()
    }
}

impl<P: fmt::Debug> fmt::Debug for ValidGenerator<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidGenerator")
            .field("inner", &self.inner)
            .field("validator", &self.validator.is_some())
            .field("max_retries", &self.max_retries)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;
    use crate::decorator::tests::Scripted;

    fn scripted(values: &[i64]) -> Scripted {
        Scripted {
            values: values.iter().copied().map(Value::Int).collect::<VecDeque<_>>(),
            ..Scripted::default()
        }
    }

    fn positive() -> Option<Validator> {
        Some(Box::new(|value| value.as_int().is_some_and(|n| n > 0)))
    }

    #[test]
    fn retries_until_accepted() {
        let mut valid = ValidGenerator::new(scripted(&[-1, 0, 4]), positive(), 5);

        assert_eq!(valid.invoke("n", &[]), Ok(Value::Int(4)));
        assert_eq!(valid.inner.calls.len(), 3);
    }

    #[test]
    fn no_validator_accepts_the_first_value() {
        let mut valid = ValidGenerator::new(scripted(&[-3]), None, 5);

        assert_eq!(valid.invoke("n", &[]), Ok(Value::Int(-3)));
    }

    #[test]
    fn overflows_after_the_budget() {
        let mut valid = ValidGenerator::new(scripted(&[0, 0, 0, 9]), positive(), 3);

        assert_eq!(
            valid.invoke("n", &[]),
            Err(GenerationError::ValidationOverflow { max_retries: 3 })
        );
        assert_eq!(valid.inner.calls.len(), 3);
    }

    #[test]
    fn zero_retries_never_invoke() {
        let mut valid = ValidGenerator::new(scripted(&[1]), None, 0);

        assert!(valid.invoke("n", &[]).is_err());
        assert!(valid.inner.calls.is_empty());
    }
}
