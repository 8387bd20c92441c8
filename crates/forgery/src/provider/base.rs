//! Element picking and pattern filling.

use rand::seq::IndexedRandom;

use crate::error::GenerationError;
use crate::extension::{Formats, unsupported};
use crate::generator::Generator;
use crate::random::RandomSource;
use crate::value::{Args, Value};

const FORMATS: &[&str] = &[
    "randomElement",
    "randomElements",
    "randomLetter",
    "numerify",
    "lexify",
    "bothify",
    "boolean",
];

const DEFAULT_ELEMENTS: [&str; 3] = ["a", "b", "c"];

/// Picks elements from lists and fills `#`/`?` patterns.
#[derive(Debug, Clone, Copy, Default)]
pub struct BaseProvider;

impl BaseProvider {
    /// Returns a lowercase ASCII letter.
    #[must_use]
    pub fn random_letter(random: &RandomSource) -> char {
        let offset = u8::try_from(random.number_between(0, 25)).unwrap_or(0);
        char::from(b'a' + offset)
    }

    /// Replaces every `#` with a digit and every `%` with a non-zero digit.
    #[must_use]
    pub fn numerify(random: &RandomSource, pattern: &str) -> String {
        pattern
            .chars()
            .map(|c| match c {
                '#' => char::from(b'0' + random.digit()),
                '%' => char::from_digit(u32::try_from(random.number_between(1, 9)).unwrap_or(1), 10)
                    .unwrap_or('1'),
                other => other,
            })
            .collect()
    }

    /// Replaces every `?` with a lowercase letter.
    #[must_use]
    pub fn lexify(random: &RandomSource, pattern: &str) -> String {
        pattern
            .chars()
            .map(|c| if c == '?' { Self::random_letter(random) } else { c })
            .collect()
    }

    /// Replaces `*` with `#` or `?`, then applies [`Self::numerify`] and
    /// [`Self::lexify`].
    #[must_use]
    pub fn bothify(random: &RandomSource, pattern: &str) -> String {
        let expanded: String = pattern
            .chars()
            .map(|c| match c {
                '*' if random.number_between(0, 1) == 0 => '#',
                '*' => '?',
                other => other,
            })
            .collect();
        Self::lexify(random, &Self::numerify(random, &expanded))
    }
}

impl Formats for BaseProvider {
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
            "randomElement" => {
                if args.values().is_empty() {
                    return Ok(random.choose(&DEFAULT_ELEMENTS).copied().into());
                }
                let items = args.list(0)?;
                Ok(random.choose(items).cloned().unwrap_or_default())
            }
            "randomElements" => {
                let items = args.list(0)?;
                let requested = args.int_or(1, 1)?;
                let count = usize::try_from(requested)
                    .ok()
                    .filter(|picked| *picked <= items.len())
                    .ok_or_else(|| {
                        GenerationError::invalid_argument(
                            name,
                            format!("cannot pick {requested} elements from {}", items.len()),
                        )
                    })?;
                let picked: Vec<Value> =
                    random.with_rng(|rng| items.choose_multiple(rng, count).cloned().collect());
                Ok(Value::List(picked))
            }
            "randomLetter" => Ok(Value::Str(Self::random_letter(random).to_string())),
            "numerify" => {
                let pattern = args.opt_str(0)?.unwrap_or("###");
                Ok(Value::Str(Self::numerify(random, pattern)))
            }
            "lexify" => {
                let pattern = args.opt_str(0)?.unwrap_or("????");
                Ok(Value::Str(Self::lexify(random, pattern)))
            }
            "bothify" => {
                let pattern = args.opt_str(0)?.unwrap_or("## ??");
                Ok(Value::Str(Self::bothify(random, pattern)))
            }
            "boolean" => {
                let chance = args.int_or(0, 50)?;
                Ok(Value::Bool(random.number_between(1, 100) <= chance))
            }
            _ => Err(unsupported(name)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numerify_fills_only_placeholders() {
        let random = RandomSource::seeded(21);
        let filled = BaseProvider::numerify(&random, "ab-###-%%");
        assert!(filled.starts_with("ab-"));
        let tail: Vec<char> = filled.chars().skip(3).collect();
        assert_eq!(tail.len(), 6);
        assert!(tail.iter().take(3).all(char::is_ascii_digit));
        assert_eq!(tail.get(3), Some(&'-'));
        assert!(tail.iter().skip(4).all(|c| ('1'..='9').contains(c)));
    }

    #[test]
    fn lexify_fills_letters() {
        let random = RandomSource::seeded(21);
        let filled = BaseProvider::lexify(&random, "??-?");
        assert_eq!(filled.len(), 4);
        assert!(filled.chars().filter(|c| *c != '-').all(|c| c.is_ascii_lowercase()));
    }

    #[test]
    fn bothify_leaves_no_placeholders() {
        let random = RandomSource::seeded(21);
        for _ in 0..50 {
            let filled = BaseProvider::bothify(&random, "**#?");
            assert!(!filled.contains(['*', '#', '?']));
            assert_eq!(filled.len(), 4);
        }
    }
}
