//! Singapore NRIC and FIN identity numbers.
//!
//! An identity number is a prefix letter, seven digits, and a check letter.
//! NRICs start with `S` (born before 2000) or `T`; FINs with `F` (issued
//! before 2000) or `G`. NRIC digits open with the two-digit birth year from
//! 1968 onwards.

use chrono::{Datelike, NaiveDate, NaiveDateTime};

use crate::error::GenerationError;
use crate::extension::{DATE_TIME, DATE_TIME_LAYOUT, Formats, unsupported};
use crate::generator::Generator;
use crate::provider::BaseProvider;
use crate::value::{Args, Value};

const FORMATS: &[&str] = &["nric", "fin"];

const WEIGHTS: [u32; 7] = [2, 7, 6, 5, 4, 3, 2];

const FOREIGNER_LETTERS: [char; 11] = ['X', 'W', 'U', 'T', 'R', 'Q', 'P', 'N', 'M', 'L', 'K'];
const CITIZEN_LETTERS: [char; 11] = ['J', 'Z', 'I', 'H', 'G', 'F', 'E', 'D', 'C', 'B', 'A'];

/// First year whose NRICs carry the birth year.
const BIRTH_YEAR_DIGITS_FROM: i32 = 1968;

/// Produces NRIC and FIN numbers with valid check letters.
#[derive(Debug, Clone, Copy, Default)]
pub struct SingaporeIdentityProvider;

/// Computes the check letter for `prefix` followed by seven `digits`.
///
/// The weighted digit sum starts at 4 for `T` and `G` prefixes; `F` and `G`
/// use the foreigner letter table. Returns `None` unless `digits` holds
/// exactly seven ASCII digits.
///
/// # Example
///
/// ```
/// use forgery::provider::singapore_checksum;
///
/// // 9*2 + 3*7 + 1*6 + 2*5 + 3*4 + 4*3 + 5*2 = 89, and 89 mod 11 = 1.
/// assert_eq!(singapore_checksum('S', "9312345"), Some('Z'));
/// ```
#[must_use]
pub fn singapore_checksum(prefix: char, digits: &str) -> Option<char> {
    let values: Vec<u32> = digits.chars().map(|c| c.to_digit(10)).collect::<Option<_>>()?;
    if values.len() != WEIGHTS.len() {
        return None;
    }
    let offset = if matches!(prefix, 'T' | 'G') { 4 } else { 0 };
    let sum: u32 = offset
        + values
            .iter()
            .zip(WEIGHTS)
            .map(|(digit, weight)| digit * weight)
            .sum::<u32>();
    let table = if matches!(prefix, 'F' | 'G') {
        &FOREIGNER_LETTERS
    } else {
        &CITIZEN_LETTERS
    };
    let index = usize::try_from(sum.rem_euclid(11)).ok()?;
    table.get(index).copied()
}

fn parse_date(text: &str) -> Option<NaiveDate> {
    NaiveDateTime::parse_from_str(text, DATE_TIME_LAYOUT)
        .map(|moment| moment.date())
        .or_else(|_| NaiveDate::parse_from_str(text, "%Y-%m-%d"))
        .ok()
}

fn identity_date(
    name: &str,
    generator: &mut Generator,
    args: Args<'_>,
) -> Result<NaiveDate, GenerationError> {
    let text = match args.opt_str(0)? {
        Some(text) => text.to_owned(),
        None => generator
            .format(&format!("{DATE_TIME}->dateTimeThisCentury"), &[])?
            .into_string(name)?,
    };
    parse_date(&text).ok_or_else(|| {
        GenerationError::invalid_argument(name, format!("'{text}' is not a date"))
    })
}

fn identity(
    name: &str,
    generator: &mut Generator,
    args: Args<'_>,
    foreigner: bool,
) -> Result<Value, GenerationError> {
    let date = identity_date(name, generator, args)?;
    let year = date.year();
    let prefix = match (foreigner, year < 2000) {
        (false, true) => 'S',
        (false, false) => 'T',
        (true, true) => 'F',
        (true, false) => 'G',
    };

    let random = generator.random();
    let digits = if foreigner {
        BaseProvider::numerify(random, "#######")
    } else if year >= BIRTH_YEAR_DIGITS_FROM {
        format!("{:02}{}", year.rem_euclid(100), BaseProvider::numerify(random, "#####"))
    } else {
        format!(
            "0{}{}",
            random.number_between(0, 1),
            BaseProvider::numerify(random, "#####")
        )
    };

    let check = singapore_checksum(prefix, &digits).ok_or_else(|| {
        GenerationError::invalid_argument(name, format!("cannot derive digits for year {year}"))
    })?;
    Ok(Value::Str(format!("{prefix}{digits}{check}")))
}

impl Formats for SingaporeIdentityProvider {
    fn format_names(&self) -> &'static [&'static str] {
        FORMATS
    }

    fn call(
        &self,
        name: &str,
        generator: &mut Generator,
        args: Args<'_>,
    ) -> Result<Value, GenerationError> {
        match name {
            "nric" => identity(name, generator, args, false),
            "fin" => identity(name, generator, args, true),
            _ => Err(unsupported(name)),
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case('S', "9312345", 'Z')]
    #[case('T', "0512345", 'Z')]
    #[case('F', "1234567", 'N')]
    #[case('G', "1234567", 'X')]
    fn checksum_follows_weighted_tables(
        #[case] prefix: char,
        #[case] digits: &str,
        #[case] expected: char,
    ) {
        assert_eq!(singapore_checksum(prefix, digits), Some(expected));
    }

    #[rstest]
    #[case("123456")]
    #[case("12345678")]
    #[case("12345a7")]
    fn checksum_rejects_malformed_digits(#[case] digits: &str) {
        assert_eq!(singapore_checksum('S', digits), None);
    }

    #[rstest]
    #[case("2005-03-01", "T05")]
    #[case("1993-03-01 10:00:00", "S93")]
    fn parses_dates_with_or_without_time(#[case] text: &str, #[case] prefix: &str) {
        let date = parse_date(text).expect("valid date");
        let year = date.year().rem_euclid(100);
        assert!(prefix.ends_with(&format!("{year:02}")));
    }
}
