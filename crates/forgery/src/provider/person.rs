//! Person names drawn from the `fake` crate's English data.

use fake::Fake;
use fake::faker::name::raw::{FirstName, LastName, Title};
use fake::locales::EN;

use crate::error::GenerationError;
use crate::extension::{Formats, unsupported};
use crate::generator::Generator;
use crate::random::RandomSource;
use crate::value::{Args, Value};

const FORMATS: &[&str] = &["firstName", "lastName", "name", "title"];

/// Produces first names, last names, full names, and titles.
#[derive(Debug, Clone, Copy, Default)]
pub struct PersonProvider;

impl PersonProvider {
    /// Returns a first name.
    #[must_use]
    pub fn first_name(random: &RandomSource) -> String {
        random.with_rng(|rng| FirstName(EN).fake_with_rng(rng))
    }

    /// Returns a last name.
    #[must_use]
    pub fn last_name(random: &RandomSource) -> String {
        random.with_rng(|rng| LastName(EN).fake_with_rng(rng))
    }

    /// Returns a title such as `Dr.`.
    #[must_use]
    pub fn title(random: &RandomSource) -> String {
        random.with_rng(|rng| Title(EN).fake_with_rng(rng))
    }
}

impl Formats for PersonProvider {
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
        let text = match name {
            "firstName" => Self::first_name(random),
            "lastName" => Self::last_name(random),
            "name" => format!("{} {}", Self::first_name(random), Self::last_name(random)),
            "title" => Self::title(random),
            _ => return Err(unsupported(name)),
        };
        Ok(Value::Str(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_deterministic_per_seed() {
        let first = PersonProvider::first_name(&RandomSource::seeded(30));
        let second = PersonProvider::first_name(&RandomSource::seeded(30));
        assert_eq!(first, second);
        assert!(!first.is_empty());
    }
}
