//! EAN and ISBN codes with valid check digits.

use crate::error::GenerationError;
use crate::extension::{Extension, Formats, unsupported};
use crate::generator::Generator;
use crate::random::RandomSource;
use crate::value::{Args, Value};

const FORMATS: &[&str] = &["ean13", "ean8", "isbn10", "isbn13"];

const ISBN13_PREFIXES: [&str; 2] = ["978", "979"];

/// Produces EAN-13, EAN-8, ISBN-10, and ISBN-13 codes.
#[derive(Debug, Clone, Copy, Default)]
pub struct BarcodeExtension;

impl BarcodeExtension {
    /// Returns a random EAN-13 code.
    #[must_use]
    pub fn ean13(random: &RandomSource) -> String {
        ean(random, 13)
    }

    /// Returns a random EAN-8 code.
    #[must_use]
    pub fn ean8(random: &RandomSource) -> String {
        ean(random, 8)
    }

    /// Returns a random ISBN-10 code; the check character may be `X`.
    #[must_use]
    pub fn isbn10(random: &RandomSource) -> String {
        let mut code = digits(random, 9);
        code.push(isbn10_check(&code));
        code
    }

    /// Returns a random ISBN-13 code with a `978` or `979` prefix.
    #[must_use]
    pub fn isbn13(random: &RandomSource) -> String {
        let prefix = random.choose(&ISBN13_PREFIXES).copied().unwrap_or("978");
        let mut code = format!("{prefix}{}", digits(random, 9));
        code.push(ean_check(&code));
        code
    }
}

impl Formats for BarcodeExtension {
    fn format_names(&self) -> &'static [&'static str] {
        FORMATS
    }

    fn call(
        &self,
        name: &str,
        generator: &mut Generator,
        _args: Args<'_>,
    ) -> Result<Value, GenerationError> {
        let random = generator.random();
        let code = match name {
            "ean13" => Self::ean13(random),
            "ean8" => Self::ean8(random),
            "isbn10" => Self::isbn10(random),
            "isbn13" => Self::isbn13(random),
            _ => return Err(unsupported(name)),
        };
        Ok(Value::Str(code))
    }
}

impl Extension for BarcodeExtension {}

fn ean(random: &RandomSource, length: usize) -> String {
    let mut code = digits(random, length - 1);
    code.push(ean_check(&code));
    code
}

fn digits(random: &RandomSource, count: usize) -> String {
    (0..count).map(|_| char::from(b'0' + random.digit())).collect()
}

/// Computes the EAN check digit: weights alternate 3 and 1 starting from the
/// rightmost data digit.
pub(crate) fn ean_check(code: &str) -> char {
    let sum: u32 = code
        .chars()
        .rev()
        .filter_map(|c| c.to_digit(10))
        .enumerate()
        .map(|(index, digit)| if index.rem_euclid(2) == 0 { digit * 3 } else { digit })
        .sum();
    let check = (10 - sum.rem_euclid(10)).rem_euclid(10);
    char::from_digit(check, 10).unwrap_or('0')
}

/// Computes the ISBN-10 check character over nine data digits.
pub(crate) fn isbn10_check(code: &str) -> char {
    let sum: u32 = code
        .chars()
        .filter_map(|c| c.to_digit(10))
        .zip((2..=10).rev())
        .map(|(digit, weight)| digit * weight)
        .sum();
    match (11 - sum.rem_euclid(11)).rem_euclid(11) {
        10 => 'X',
        check => char::from_digit(check, 10).unwrap_or('0'),
    }
}
