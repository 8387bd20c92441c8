//! Semantic version strings.

use crate::error::GenerationError;
use crate::extension::{Extension, Formats, unsupported};
use crate::generator::Generator;
use crate::random::RandomSource;
use crate::value::{Args, Value};

const FORMATS: &[&str] = &["semver"];

const PRE_RELEASE_LABELS: [&str; 3] = ["alpha", "beta", "rc"];

/// Length of the hexadecimal build identifier.
const BUILD_LENGTH: usize = 7;

/// Produces versions in semantic versioning 2.0.0 syntax.
#[derive(Debug, Clone, Copy, Default)]
pub struct VersionExtension;

impl VersionExtension {
    /// Returns a version such as `1.0.0`, `1.0.0-alpha.1`, or
    /// `1.0.0-alpha.1+b71f04d`.
    ///
    /// Pre-release and build parts are each included half of the time when
    /// requested.
    #[must_use]
    pub fn semver(random: &RandomSource, pre_release: bool, build: bool) -> String {
        let mut version = format!(
            "{}.{}.{}",
            random.number_between(0, 9),
            random.number_between(0, 99),
            random.number_between(0, 99)
        );
        if pre_release && random.number_between(0, 1) == 1 {
            version.push('-');
            version.push_str(&pre_release_identifier(random));
        }
        if build && random.number_between(0, 1) == 1 {
            version.push('+');
            version.push_str(&build_identifier(random));
        }
        version
    }
}

fn pre_release_identifier(random: &RandomSource) -> String {
    let label = random.choose(&PRE_RELEASE_LABELS).copied().unwrap_or("rc");
    if random.number_between(0, 1) == 1 {
        format!("{label}.{}", random.number_between(1, 99))
    } else {
        label.to_owned()
    }
}

fn build_identifier(random: &RandomSource) -> String {
    (0..BUILD_LENGTH)
        .map(|_| {
            let nibble = u32::try_from(random.number_between(0, 15)).unwrap_or(0);
            char::from_digit(nibble, 16).unwrap_or('0')
        })
        .collect()
}

impl Formats for VersionExtension {
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
            "semver" => {
                let pre_release = args.bool_or(0, false)?;
                let build = args.bool_or(1, false)?;
                Ok(Value::Str(Self::semver(generator.random(), pre_release, build)))
            }
            _ => Err(unsupported(name)),
        }
    }
}

impl Extension for VersionExtension {}
