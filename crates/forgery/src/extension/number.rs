//! Random integers, digits, and floats.

use crate::error::GenerationError;
use crate::extension::{Extension, Formats, unsupported};
use crate::generator::Generator;
use crate::random::RandomSource;
use crate::value::{Args, Value};

const FORMATS: &[&str] = &[
    "numberBetween",
    "randomDigit",
    "randomDigitNot",
    "randomDigitNotZero",
    "randomFloat",
    "randomNumber",
];

/// Largest value `randomNumber` and `numberBetween` default to.
pub const MAX_RANDOM: i64 = 2_147_483_647;

/// Largest digit count `randomNumber` accepts without exceeding [`MAX_RANDOM`].
const MAX_DIGITS: i64 = 9;

/// Most decimals `randomFloat` rounds to.
const MAX_DECIMALS: i64 = 15;

/// Produces integers, digits, and floats.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumberExtension;

impl NumberExtension {
    /// Returns a digit between 0 and 9 other than `except`.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::InvalidArgument`] when `except` is not a
    /// digit.
    pub fn random_digit_not(random: &RandomSource, except: i64) -> Result<i64, GenerationError> {
        if !(0..=9).contains(&except) {
            return Err(GenerationError::invalid_argument(
                "randomDigitNot",
                format!("{except} is not a digit"),
            ));
        }
        let candidate = random.number_between(0, 8);
        Ok(if candidate >= except {
            candidate + 1
        } else {
            candidate
        })
    }

    /// Returns an integer with up to `digits` digits, exactly `digits` when
    /// `strict`. Without `digits`, a count between 1 and 9 is drawn.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::InvalidArgument`] when the digit count is
    /// negative, above nine, or zero in strict mode.
    pub fn random_number(
        random: &RandomSource,
        requested: Option<i64>,
        strict: bool,
    ) -> Result<i64, GenerationError> {
        let digits = requested.unwrap_or_else(|| random.number_between(1, 9));
        if !(0..=MAX_DIGITS).contains(&digits) || (strict && digits == 0) {
            return Err(GenerationError::invalid_argument(
                "randomNumber",
                format!("cannot produce a number with {digits} digits"),
            ));
        }
        let exponent = u32::try_from(digits).unwrap_or(0);
        let max = 10_i64.pow(exponent) - 1;
        let min = if strict { 10_i64.pow(exponent - 1) } else { 0 };
        Ok(random.number_between(min, max))
    }

    /// Returns a float between `min` and `max` rounded to `decimals` places.
    ///
    /// Without `decimals` a digit is drawn; without `max` a random number is
    /// drawn and raised to `min` if smaller. Bounds are swapped when
    /// reversed.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::InvalidArgument`] when `decimals` is
    /// negative.
    #[expect(
        clippy::float_arithmetic,
        clippy::cast_precision_loss,
        reason = "floats are interpolated between bounds and rounded"
    )]
    pub fn random_float(
        random: &RandomSource,
        requested_decimals: Option<i64>,
        min: f64,
        requested_max: Option<f64>,
    ) -> Result<f64, GenerationError> {
        let decimals = requested_decimals.unwrap_or_else(|| i64::from(random.digit()));
        if decimals < 0 {
            return Err(GenerationError::invalid_argument(
                "randomFloat",
                "the number of decimals cannot be negative",
            ));
        }
        let max = requested_max.map_or_else(
            || Self::random_number(random, None, false).map(|drawn| (drawn as f64).max(min)),
            Ok,
        )?;
        let (low, high) = if min <= max { (min, max) } else { (max, min) };
        let value = low + random.unit() * (high - low);
        let places = i32::try_from(decimals.min(MAX_DECIMALS)).unwrap_or(0);
        let factor = 10_f64.powi(places);
        Ok((value * factor).round() / factor)
    }
}

impl Formats for NumberExtension {
    fn format_names(&self) -> &'static [&'static str] {
        FORMATS
    }

    fn call(
        &self,
        name: &str,
        generator: &mut Generator,
        args: Args<'_>,
    ) -> Result<Value, GenerationError> {
        let random = generator.random();
        match name {
            "numberBetween" => {
                let low = args.int_or(0, 0)?;
                let high = args.int_or(1, MAX_RANDOM)?;
                Ok(Value::Int(random.number_between(low, high)))
            }
            "randomDigit" => Ok(Value::Int(i64::from(random.digit()))),
            "randomDigitNot" => {
                let except = args.int_or(0, 0)?;
                Self::random_digit_not(random, except).map(Value::Int)
            }
            "randomDigitNotZero" => Ok(Value::Int(random.number_between(1, 9))),
            "randomFloat" => {
                let decimals = args.opt_int(0)?;
                let min = args.opt_float(1)?.unwrap_or(0.0);
                let max = args.opt_float(2)?;
                Self::random_float(random, decimals, min, max).map(Value::Float)
            }
            "randomNumber" => {
                let digits = args.opt_int(0)?;
                let strict = args.bool_or(1, false)?;
                Self::random_number(random, digits, strict).map(Value::Int)
            }
            _ => Err(unsupported(name)),
        }
    }
}

impl Extension for NumberExtension {}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn digit_not_skips_the_excluded_digit() {
        let random = RandomSource::seeded(3);
        for _ in 0..500 {
            let digit = NumberExtension::random_digit_not(&random, 4).expect("valid digit");
            assert_ne!(digit, 4);
            assert!((0..=9).contains(&digit));
        }
    }

    #[rstest]
    #[case(1)]
    #[case(5)]
    #[case(9)]
    fn strict_numbers_have_exact_digit_counts(#[case] digits: i64) {
        let random = RandomSource::seeded(3);
        for _ in 0..100 {
            let number =
                NumberExtension::random_number(&random, Some(digits), true).expect("in range");
            assert_eq!(number.to_string().len(), usize::try_from(digits).expect("small"));
        }
    }

    #[rstest]
    #[case(Some(10), false)]
    #[case(Some(-1), false)]
    #[case(Some(0), true)]
    fn rejects_impossible_digit_counts(#[case] digits: Option<i64>, #[case] strict: bool) {
        let random = RandomSource::seeded(3);
        let result = NumberExtension::random_number(&random, digits, strict);
        assert!(matches!(result, Err(GenerationError::InvalidArgument { .. })));
    }

    #[test]
    fn floats_respect_bounds_and_decimals() {
        let random = RandomSource::seeded(3);
        for _ in 0..200 {
            let value =
                NumberExtension::random_float(&random, Some(2), 10.0, Some(5.0)).expect("float");
            assert!((5.0..=10.0).contains(&value));
            let scaled = value * 100.0;
            assert!((scaled - scaled.round()).abs() < 1e-6);
        }
    }

    #[test]
    fn float_without_max_is_at_least_min() {
        let random = RandomSource::seeded(3);
        for _ in 0..50 {
            let value = NumberExtension::random_float(&random, Some(1), 3.0, None).expect("float");
            assert!(value >= 3.0);
        }
    }
}
