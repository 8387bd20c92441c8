//! Scalar values produced by formats and passed to them as arguments.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::error::GenerationError;

/// A value produced by a format, or an argument handed to one.
///
/// Floats compare and hash by bit pattern so every value can sit in a
/// uniqueness set.
#[derive(Debug, Clone, Default)]
pub enum Value {
    /// The absence of a value.
    #[default]
    Null,
    /// A boolean.
    Bool(bool),
    /// A signed integer.
    Int(i64),
    /// A floating point number.
    Float(f64),
    /// A string.
    Str(String),
    /// An ordered list of values.
    List(Vec<Value>),
}

impl Value {
    /// Returns `true` for [`Value::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the integer payload, if any.
    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the float payload, widening integers.
    #[must_use]
    #[expect(
        clippy::cast_precision_loss,
        reason = "integers widen to floats for numeric convenience"
    )]
    pub const fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(value) => Some(*value),
            Self::Int(value) => Some(*value as f64),
            _ => None,
        }
    }

    /// Returns the string payload, if any.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the list payload, if any.
    #[must_use]
    pub fn as_list(&self) -> Option<&[Self]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Converts into an owned string, failing for other kinds.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::UnexpectedValue`] naming `format` when the
    /// value is not a string.
    pub fn into_string(self, format: &str) -> Result<String, GenerationError> {
        match self {
            Self::Str(value) => Ok(value),
            _ => Err(unexpected(format, "a string")),
        }
    }

    /// Converts into an integer, failing for other kinds.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::UnexpectedValue`] naming `format` when the
    /// value is not an integer.
    pub fn into_int(self, format: &str) -> Result<i64, GenerationError> {
        self.as_int().ok_or_else(|| unexpected(format, "an integer"))
    }

    /// Converts into a float, failing for non-numeric kinds.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::UnexpectedValue`] naming `format` when the
    /// value is not numeric.
    pub fn into_float(self, format: &str) -> Result<f64, GenerationError> {
        self.as_float().ok_or_else(|| unexpected(format, "a number"))
    }
}

fn unexpected(format: &str, expected: &'static str) -> GenerationError {
    GenerationError::UnexpectedValue {
        format: format.to_owned(),
        expected,
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a.to_bits() == b.to_bits(),
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::List(a), Self::List(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Self::Null => {}
            Self::Bool(value) => value.hash(state),
            Self::Int(value) => value.hash(state),
            Self::Float(value) => value.to_bits().hash(state),
            Self::Str(value) => value.hash(state),
            Self::List(items) => items.hash(state),
        }
    }
}

/// Renders the value the way templates substitute it: `Null` and `false`
/// are empty, `true` is `1`, lists are joined with `", "`.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null | Self::Bool(false) => Ok(()),
            Self::Bool(true) => f.write_str("1"),
            Self::Int(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Str(value) => f.write_str(value),
            Self::List(items) => {
                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                Ok(())
            }
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl<T: Into<Self>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// Positional arguments handed to a format, with typed accessors.
///
/// Missing and `Null` arguments are treated alike so optional parameters
/// can be skipped either way.
#[derive(Debug, Clone, Copy)]
pub struct Args<'a> {
    format: &'a str,
    values: &'a [Value],
}

impl<'a> Args<'a> {
    /// Wraps the arguments of one invocation of `format`.
    #[must_use]
    pub const fn new(format: &'a str, values: &'a [Value]) -> Self {
        Self { format, values }
    }

    /// Returns the raw argument slice.
    #[must_use]
    pub const fn values(&self) -> &'a [Value] {
        self.values
    }

    fn present(&self, index: usize) -> Option<&'a Value> {
        self.values.get(index).filter(|value| !value.is_null())
    }

    /// Reads an optional integer argument.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::InvalidArgument`] when the argument is
    /// present but not an integer (numeric strings are accepted).
    pub fn opt_int(&self, index: usize) -> Result<Option<i64>, GenerationError> {
        let Some(value) = self.present(index) else {
            return Ok(None);
        };
        match value {
            Value::Int(number) => Ok(Some(*number)),
            Value::Str(text) => text.trim().parse().map(Some).map_err(|_| {
                self.invalid(index, "an integer")
            }),
            _ => Err(self.invalid(index, "an integer")),
        }
    }

    /// Reads an integer argument, falling back to `default`.
    ///
    /// # Errors
    ///
    /// See [`Args::opt_int`].
    pub fn int_or(&self, index: usize, default: i64) -> Result<i64, GenerationError> {
        Ok(self.opt_int(index)?.unwrap_or(default))
    }

    /// Reads an optional float argument.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::InvalidArgument`] when the argument is
    /// present but not numeric.
    pub fn opt_float(&self, index: usize) -> Result<Option<f64>, GenerationError> {
        let Some(value) = self.present(index) else {
            return Ok(None);
        };
        match value {
            Value::Str(text) => text
                .trim()
                .parse()
                .map(Some)
                .map_err(|_| self.invalid(index, "a number")),
            other => other
                .as_float()
                .map(Some)
                .ok_or_else(|| self.invalid(index, "a number")),
        }
    }

    /// Reads a boolean argument, falling back to `default`.
    ///
    /// Integers are truthy when non-zero.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::InvalidArgument`] for other kinds.
    pub fn bool_or(&self, index: usize, default: bool) -> Result<bool, GenerationError> {
        match self.present(index) {
            None => Ok(default),
            Some(Value::Bool(flag)) => Ok(*flag),
            Some(Value::Int(number)) => Ok(*number != 0),
            Some(_) => Err(self.invalid(index, "a boolean")),
        }
    }

    /// Reads an optional string argument.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::InvalidArgument`] when the argument is
    /// present but not a string.
    pub fn opt_str(&self, index: usize) -> Result<Option<&'a str>, GenerationError> {
        match self.present(index) {
            None => Ok(None),
            Some(Value::Str(text)) => Ok(Some(text)),
            Some(_) => Err(self.invalid(index, "a string")),
        }
    }

    /// Reads a required string argument.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::InvalidArgument`] when the argument is
    /// missing or not a string.
    pub fn str(&self, index: usize) -> Result<&'a str, GenerationError> {
        self.opt_str(index)?
            .ok_or_else(|| self.invalid(index, "a string"))
    }

    /// Reads a required list argument.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::InvalidArgument`] when the argument is
    /// missing or not a list.
    pub fn list(&self, index: usize) -> Result<&'a [Value], GenerationError> {
        self.present(index)
            .and_then(Value::as_list)
            .ok_or_else(|| self.invalid(index, "a list"))
    }

    fn invalid(&self, index: usize, expected: &str) -> GenerationError {
        GenerationError::invalid_argument(
            self.format,
            format!("argument {index} must be {expected}"),
        )
    }
}
