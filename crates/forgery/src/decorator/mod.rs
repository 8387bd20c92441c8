//! Producers and the decorators that wrap them.
//!
//! [`Producer`] is the one seam every decorator relies on: produce a value
//! for a format name and arguments. [`Generator`](crate::Generator)
//! implements it, and so does every decorator, so they nest freely:
//!
//! ```
//! use forgery::{
//!     ChanceGenerator, Generator, GeneratorConfig, ProducerExt, UniqueGenerator, Value,
//! };
//!
//! let mut generator = Generator::with_config(GeneratorConfig::default().with_seed(1));
//! let always = ChanceGenerator::new(&mut generator, 1.0, Value::Null);
//! let mut maybe_unique = UniqueGenerator::new(always, 100);
//!
//! let first = maybe_unique.random_number(Some(6), true).expect("number");
//! let second = maybe_unique.random_number(Some(6), true).expect("number");
//! assert_ne!(first, second);
//! ```

use crate::error::GenerationError;
use crate::extension::UUID;
use crate::random::RandomSource;
use crate::value::Value;

mod chance;
mod unique;
mod valid;

pub use chance::ChanceGenerator;
pub(crate) use unique::UniqueLedger;
pub use unique::UniqueGenerator;
pub use valid::{ValidGenerator, Validator};

/// Produces values by format name.
pub trait Producer {
    /// Produces one value of format `name` with positional `args`.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError`] when the format is unknown, its arguments
    /// are unusable, or a decorator policy gives up.
    fn invoke(&mut self, name: &str, args: &[Value]) -> Result<Value, GenerationError>;

    /// Returns the random source behind this producer.
    fn random_source(&self) -> RandomSource;
}

impl<P: Producer + ?Sized> Producer for &mut P {
    fn invoke(&mut self, name: &str, args: &[Value]) -> Result<Value, GenerationError> {
        (**self).invoke(name, args)
    }

    fn random_source(&self) -> RandomSource {
        (**self).random_source()
    }
}

/// Typed shortcuts for common formats, available on every [`Producer`].
///
/// Each shortcut goes through [`Producer::invoke`] by name, so decorator
/// policies apply to it. A decorator that substitutes a default of another
/// kind (such as [`ChanceGenerator`] returning [`Value::Null`]) makes the
/// shortcut fail with [`GenerationError::UnexpectedValue`].
///
/// # Errors
///
/// Every shortcut returns the error of the underlying format, or
/// [`GenerationError::UnexpectedValue`] when the value has another kind.
pub trait ProducerExt: Producer {
    /// A digit between 0 and 9.
    fn random_digit(&mut self) -> Result<i64, GenerationError> {
        int(self, "randomDigit", &[])
    }

    /// A digit between 0 and 9 other than `except`.
    fn random_digit_not(&mut self, except: i64) -> Result<i64, GenerationError> {
        int(self, "randomDigitNot", &[Value::Int(except)])
    }

    /// A digit between 1 and 9.
    fn random_digit_not_zero(&mut self) -> Result<i64, GenerationError> {
        int(self, "randomDigitNotZero", &[])
    }

    /// An integer with up to `digits` digits, exactly `digits` when `strict`.
    fn random_number(&mut self, digits: Option<i64>, strict: bool) -> Result<i64, GenerationError> {
        int(
            self,
            "randomNumber",
            &[Value::from(digits), Value::Bool(strict)],
        )
    }

    /// An integer between `min` and `max` inclusive, in either order.
    fn number_between(&mut self, min: i64, max: i64) -> Result<i64, GenerationError> {
        int(self, "numberBetween", &[Value::Int(min), Value::Int(max)])
    }

    /// A float between `min` and `max` rounded to `decimals` places.
    fn random_float(
        &mut self,
        decimals: Option<i64>,
        min: f64,
        max: Option<f64>,
    ) -> Result<f64, GenerationError> {
        let value = self.invoke(
            "randomFloat",
            &[Value::from(decimals), Value::Float(min), Value::from(max)],
        )?;
        value.into_float("randomFloat")
    }

    /// One element of `items`, or [`Value::Null`] when empty.
    fn random_element(&mut self, items: &[Value]) -> Result<Value, GenerationError> {
        self.invoke("randomElement", &[Value::List(items.to_vec())])
    }

    /// An EAN-13 barcode.
    fn ean13(&mut self) -> Result<String, GenerationError> {
        string(self, "ean13", &[])
    }

    /// An EAN-8 barcode.
    fn ean8(&mut self) -> Result<String, GenerationError> {
        string(self, "ean8", &[])
    }

    /// An ISBN-10.
    fn isbn10(&mut self) -> Result<String, GenerationError> {
        string(self, "isbn10", &[])
    }

    /// An ISBN-13.
    fn isbn13(&mut self) -> Result<String, GenerationError> {
        string(self, "isbn13", &[])
    }

    /// A semantic version, optionally with pre-release and build suffixes.
    fn semver(&mut self, pre_release: bool, build: bool) -> Result<String, GenerationError> {
        string(
            self,
            "semver",
            &[Value::Bool(pre_release), Value::Bool(build)],
        )
    }

    /// A blood group such as `AB-`.
    fn blood_group(&mut self) -> Result<String, GenerationError> {
        string(self, "bloodGroup", &[])
    }

    /// A MIME type.
    fn mime_type(&mut self) -> Result<String, GenerationError> {
        string(self, "mimeType", &[])
    }

    /// A file extension without the dot.
    fn file_extension(&mut self) -> Result<String, GenerationError> {
        string(self, "fileExtension", &[])
    }

    /// Path of a newly created empty file in the system temporary
    /// directory.
    fn file_path(&mut self) -> Result<String, GenerationError> {
        string(self, "filePath", &[])
    }

    /// A name-based (version 3) UUID hashed from a random number, in hyphenated form.
    fn uuid(&mut self) -> Result<String, GenerationError> {
        string(self, &format!("{UUID}->uuid3"), &[])
    }

    /// A first name.
    fn first_name(&mut self) -> Result<String, GenerationError> {
        string(self, "firstName", &[])
    }

    /// A last name.
    fn last_name(&mut self) -> Result<String, GenerationError> {
        string(self, "lastName", &[])
    }

    /// A full name.
    fn name(&mut self) -> Result<String, GenerationError> {
        string(self, "name", &[])
    }

    /// A Singapore NRIC number.
    fn nric(&mut self) -> Result<String, GenerationError> {
        string(self, "nric", &[])
    }

    /// A Singapore FIN number.
    fn fin(&mut self) -> Result<String, GenerationError> {
        string(self, "fin", &[])
    }

    /// `template` with every `{{ token }}` replaced.
    fn parse(&mut self, template: &str) -> Result<String, GenerationError> {
        string(self, "parse", &[Value::from(template)])
    }
}

impl<P: Producer + ?Sized> ProducerExt for P {}

fn int<P: Producer + ?Sized>(
    producer: &mut P,
    name: &str,
    args: &[Value],
) -> Result<i64, GenerationError> {
    producer.invoke(name, args)?.into_int(name)
}

fn string<P: Producer + ?Sized>(
    producer: &mut P,
    name: &str,
    args: &[Value],
) -> Result<String, GenerationError> {
    producer.invoke(name, args)?.into_string(name)
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;

    /// Replays scripted values and records the calls it receives.
    #[derive(Debug, Default)]
    pub(crate) struct Scripted {
        pub(crate) values: VecDeque<Value>,
        pub(crate) calls: Vec<(String, Vec<Value>)>,
    }

    impl Producer for Scripted {
        fn invoke(&mut self, name: &str, args: &[Value]) -> Result<Value, GenerationError> {
            self.calls.push((name.to_owned(), args.to_vec()));
            Ok(self.values.pop_front().unwrap_or_default())
        }

        fn random_source(&self) -> RandomSource {
            RandomSource::seeded(0)
        }
    }

    #[test]
    fn shortcuts_invoke_by_name() {
        let mut scripted = Scripted {
            values: VecDeque::from([Value::Int(4), Value::from("1.2.3")]),
            ..Scripted::default()
        };

        assert_eq!(scripted.number_between(9, 1), Ok(4));
        assert_eq!(scripted.semver(true, false), Ok("1.2.3".to_owned()));
        assert_eq!(
            scripted.calls,
            vec![
                ("numberBetween".to_owned(), vec![Value::Int(9), Value::Int(1)]),
                (
                    "semver".to_owned(),
                    vec![Value::Bool(true), Value::Bool(false)]
                ),
            ]
        );
    }

    #[test]
    fn shortcuts_reject_other_kinds() {
        let mut scripted = Scripted::default();
        assert_eq!(
            scripted.random_digit(),
            Err(GenerationError::UnexpectedValue {
                format: "randomDigit".to_owned(),
                expected: "an integer",
            })
        );
    }

    fn invoke_once<P: Producer>(mut producer: P) {
        producer.invoke("anything", &[]).expect("value");
    }

    #[test]
    fn mutable_references_are_producers() {
        let mut scripted = Scripted::default();
        invoke_once(&mut scripted);
        invoke_once(&mut scripted);
        assert_eq!(scripted.calls.len(), 2);
    }
}
