//! ABO blood types and rhesus factors.

use crate::error::GenerationError;
use crate::extension::{Extension, Formats, unsupported};
use crate::generator::Generator;
use crate::random::RandomSource;
use crate::value::{Args, Value};

const FORMATS: &[&str] = &["bloodType", "bloodRh", "bloodGroup"];

const TYPES: [&str; 4] = ["A", "AB", "B", "O"];
const RH_FACTORS: [&str; 2] = ["+", "-"];

/// Produces blood types (`AB`), rhesus factors (`+`), and groups (`AB+`).
#[derive(Debug, Clone, Copy, Default)]
pub struct BloodExtension;

impl BloodExtension {
    /// Returns an ABO blood type.
    #[must_use]
    pub fn blood_type(random: &RandomSource) -> &'static str {
        random.choose(&TYPES).copied().unwrap_or("O")
    }

    /// Returns a rhesus factor sign.
    #[must_use]
    pub fn blood_rh(random: &RandomSource) -> &'static str {
        random.choose(&RH_FACTORS).copied().unwrap_or("+")
    }

    /// Returns a full blood group such as `AB+`.
    #[must_use]
    pub fn blood_group(random: &RandomSource) -> String {
        format!("{}{}", Self::blood_type(random), Self::blood_rh(random))
    }
}

impl Formats for BloodExtension {
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
        match name {
            "bloodType" => Ok(Self::blood_type(random).into()),
            "bloodRh" => Ok(Self::blood_rh(random).into()),
            "bloodGroup" => Ok(Self::blood_group(random).into()),
            _ => Err(unsupported(name)),
        }
    }
}

impl Extension for BloodExtension {}
