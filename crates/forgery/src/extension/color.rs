//! Hex, RGB, and web-safe color values.

use crate::error::GenerationError;
use crate::extension::{Extension, Formats, unsupported};
use crate::generator::Generator;
use crate::random::RandomSource;
use crate::value::{Args, Value};

const FORMATS: &[&str] = &[
    "hexColor",
    "safeHexColor",
    "rgbColor",
    "rgbCssColor",
    "safeColorName",
];

const SAFE_COLOR_NAMES: [&str; 15] = [
    "black", "maroon", "green", "navy", "olive", "purple", "teal", "lime", "blue", "silver",
    "gray", "yellow", "fuchsia", "aqua", "white",
];

/// Produces color strings in several notations.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColorExtension;

impl ColorExtension {
    /// Returns a color such as `#fa3cc2`.
    #[must_use]
    pub fn hex_color(random: &RandomSource) -> String {
        format!("#{:06x}", random.number_between(0, 0x00FF_FFFF))
    }

    /// Returns a color from the 4096 doubled-digit colors, such as `#ff0044`.
    #[must_use]
    pub fn safe_hex_color(random: &RandomSource) -> String {
        let short = format!("{:03x}", random.number_between(0, 0x0FFF));
        let doubled: String = short.chars().flat_map(|c| [c, c]).collect();
        format!("#{doubled}")
    }

    /// Returns red, green, and blue channels.
    #[must_use]
    pub fn rgb(random: &RandomSource) -> [i64; 3] {
        [0; 3].map(|_| random.number_between(0, 255))
    }

    /// Returns a CSS color name from the web-safe palette.
    #[must_use]
    pub fn safe_color_name(random: &RandomSource) -> &'static str {
        random.choose(&SAFE_COLOR_NAMES).copied().unwrap_or("black")
    }
}

impl Formats for ColorExtension {
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
        let color = match name {
            "hexColor" => Self::hex_color(random),
            "safeHexColor" => Self::safe_hex_color(random),
            "rgbColor" => {
                let [red, green, blue] = Self::rgb(random);
                format!("{red},{green},{blue}")
            }
            "rgbCssColor" => {
                let [red, green, blue] = Self::rgb(random);
                format!("rgb({red},{green},{blue})")
            }
            "safeColorName" => Self::safe_color_name(random).to_owned(),
            _ => return Err(unsupported(name)),
        };
        Ok(Value::Str(color))
    }
}

impl Extension for ColorExtension {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_colors_are_seven_characters() {
        let random = RandomSource::seeded(8);
        for _ in 0..100 {
            let color = ColorExtension::hex_color(&random);
            assert_eq!(color.len(), 7);
            assert!(color.starts_with('#'));
            assert!(color.chars().skip(1).all(|c| c.is_ascii_hexdigit()));
        }
    }

    #[test]
    fn safe_hex_colors_repeat_each_digit() {
        let random = RandomSource::seeded(8);
        for _ in 0..100 {
            let color = ColorExtension::safe_hex_color(&random);
            let digits: Vec<char> = color.chars().skip(1).collect();
            assert_eq!(digits.len(), 6);
            for pair in digits.chunks(2) {
                assert_eq!(pair.first(), pair.last());
            }
        }
    }
}
