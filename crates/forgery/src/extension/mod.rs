//! Extensions: identifier-addressed bundles of related formats.
//!
//! Extensions and legacy providers share one contract, [`Formats`]: an
//! explicit table of format names plus a dispatcher that runs one of them.
//! Extensions add an optional generator binding step and live in an
//! [`ExtensionRegistry`](crate::ExtensionRegistry) under a qualified
//! identifier such as `Forgery\Extension\Barcode`.

use std::rc::Rc;

use crate::error::GenerationError;
use crate::generator::Generator;
use crate::value::{Args, Value};

mod barcode;
mod blood;
mod color;
mod datetime;
mod file;
mod number;
mod uuid;
mod version;

pub use barcode::BarcodeExtension;
pub use blood::BloodExtension;
pub use color::ColorExtension;
pub use datetime::{DATE_TIME_LAYOUT, DateTimeExtension};
pub use file::FileExtension;
pub use number::NumberExtension;
pub use self::uuid::UuidExtension;
pub use version::VersionExtension;

/// Identifier of the barcode extension.
pub const BARCODE: &str = "Forgery\\Extension\\Barcode";
/// Identifier of the blood type extension.
pub const BLOOD: &str = "Forgery\\Extension\\Blood";
/// Identifier of the color extension.
pub const COLOR: &str = "Forgery\\Extension\\Color";
/// Identifier of the date and time extension.
pub const DATE_TIME: &str = "Forgery\\Extension\\DateTime";
/// Identifier of the file extension.
pub const FILE: &str = "Forgery\\Extension\\File";
/// Identifier of the number extension.
pub const NUMBER: &str = "Forgery\\Extension\\Number";
/// Identifier of the UUID extension.
pub const UUID: &str = "Forgery\\Extension\\Uuid";
/// Identifier of the version extension.
pub const VERSION: &str = "Forgery\\Extension\\Version";

/// A source of named formats.
///
/// Implementors list every format they answer to in
/// [`Formats::format_names`]; resolution never calls [`Formats::call`] with
/// a name outside that table.
pub trait Formats {
    /// Names of the formats this source produces.
    fn format_names(&self) -> &'static [&'static str];

    /// Returns `true` when `name` is one of [`Formats::format_names`].
    fn has_format(&self, name: &str) -> bool {
        self.format_names().contains(&name)
    }

    /// Produces one value of format `name`.
    ///
    /// `generator` is the generator the call came through; formats draw
    /// randomness from it and may call back into it.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError`] when the arguments are unusable or a
    /// nested format fails.
    fn call(
        &self,
        name: &str,
        generator: &mut Generator,
        args: Args<'_>,
    ) -> Result<Value, GenerationError>;
}

/// A registry-addressed bundle of formats.
pub trait Extension: Formats {
    /// Returns a copy bound to `generator`, or `None` when the extension is
    /// not generator-aware.
    ///
    /// The generator calls this at most once per extension identifier and
    /// keeps the returned copy for its own lifetime. The receiver is never
    /// modified.
    fn with_generator(&self, generator: &Generator) -> Option<Rc<dyn Extension>> {
        let _ = generator;
        None
    }
}

/// Name of the built-in barcode implementation.
pub const CORE_BARCODE: &str = "Forgery\\Core\\Barcode";
/// Name of the built-in blood type implementation.
pub const CORE_BLOOD: &str = "Forgery\\Core\\Blood";
/// Name of the built-in color implementation.
pub const CORE_COLOR: &str = "Forgery\\Core\\Color";
/// Name of the built-in date and time implementation.
pub const CORE_DATE_TIME: &str = "Forgery\\Core\\DateTime";
/// Name of the built-in file implementation.
pub const CORE_FILE: &str = "Forgery\\Core\\File";
/// Name of the built-in number implementation.
pub const CORE_NUMBER: &str = "Forgery\\Core\\Number";
/// Name of the built-in UUID implementation.
pub const CORE_UUID: &str = "Forgery\\Core\\Uuid";
/// Name of the built-in version implementation.
pub const CORE_VERSION: &str = "Forgery\\Core\\Version";

/// Pairs of extension identifier and built-in implementation name that make
/// up the default container.
pub const DEFAULT_EXTENSIONS: [(&str, &str); 8] = [
    (BARCODE, CORE_BARCODE),
    (BLOOD, CORE_BLOOD),
    (COLOR, CORE_COLOR),
    (DATE_TIME, CORE_DATE_TIME),
    (FILE, CORE_FILE),
    (NUMBER, CORE_NUMBER),
    (UUID, CORE_UUID),
    (VERSION, CORE_VERSION),
];

/// Instantiates the built-in implementation called `name`.
#[must_use]
pub fn builtin(name: &str) -> Option<Rc<dyn Extension>> {
    let extension: Rc<dyn Extension> = match name {
        CORE_BARCODE => Rc::new(BarcodeExtension),
        CORE_BLOOD => Rc::new(BloodExtension),
        CORE_COLOR => Rc::new(ColorExtension),
        CORE_DATE_TIME => Rc::new(DateTimeExtension::default()),
        CORE_FILE => Rc::new(FileExtension),
        CORE_NUMBER => Rc::new(NumberExtension),
        CORE_UUID => Rc::new(UuidExtension),
        CORE_VERSION => Rc::new(VersionExtension),
        _ => return None,
    };
    Some(extension)
}

/// Builds the error for a name outside a format table.
pub(crate) fn unsupported(name: &str) -> GenerationError {
    GenerationError::unknown_format(name)
}
