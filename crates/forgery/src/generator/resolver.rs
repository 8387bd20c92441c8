//! Format name resolution.
//!
//! A name resolves through a fixed sequence of strategies, first match
//! wins: the generator's own method table, a `Namespace\Id->method`
//! reference into the extension registry, then the legacy provider list.
//! The winning (target, method) pair is cached by the generator.

use std::rc::Rc;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::GenerationError;
use crate::extension::{
    BARCODE, BLOOD, Extension, FILE, Formats, NUMBER, VERSION,
};
use crate::generator::Generator;
use crate::value::{Args, Value};

/// Where a resolved format runs.
#[derive(Clone)]
pub(crate) enum Target {
    /// A method of the generator's own table.
    Generator,
    /// A method of an extension (bound copy when generator-aware).
    Extension(Rc<dyn Extension>),
    /// A method of a legacy provider.
    Provider(Rc<dyn Formats>),
}

/// Which resolution path answered a format name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatterKind {
    /// The generator's own method table.
    Generator,
    /// A method of an extension from the registry.
    Extension,
    /// A method of a legacy provider.
    Provider,
}

impl FormatterKind {
    /// Returns a lowercase label for logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Generator => "generator",
            Self::Extension => "extension",
            Self::Provider => "provider",
        }
    }
}

/// A cached resolution: the target and the method name to call on it.
#[derive(Clone)]
pub(crate) struct FormatterEntry {
    target: Target,
    method: String,
}

impl FormatterEntry {
    fn new(target: Target, method: &str) -> Self {
        Self {
            target,
            method: method.to_owned(),
        }
    }

    pub(crate) const fn kind(&self) -> FormatterKind {
        match self.target {
            Target::Generator => FormatterKind::Generator,
            Target::Extension(_) => FormatterKind::Extension,
            Target::Provider(_) => FormatterKind::Provider,
        }
    }

    pub(crate) fn invoke(
        &self,
        generator: &mut Generator,
        format: &str,
        values: &[Value],
    ) -> Result<Value, GenerationError> {
        let args = Args::new(format, values);
        match &self.target {
            Target::Generator => call_own(generator, &self.method, args),
            Target::Extension(extension) => extension.call(&self.method, generator, args),
            Target::Provider(provider) => provider.call(&self.method, generator, args),
        }
    }
}

/// One resolution strategy.
type Strategy = fn(&mut Generator, &str) -> Result<Option<FormatterEntry>, GenerationError>;

/// Strategies in priority order.
pub(crate) const STRATEGIES: [Strategy; 3] = [
    resolve_generator_method,
    resolve_extension_method,
    resolve_provider_method,
];

/// Format names the generator answers itself, each delegating to an
/// extension method. `parse` is handled separately.
const OWN_METHODS: &[(&str, &str, &str)] = &[
    ("mimeType", FILE, "mimeType"),
    ("fileExtension", FILE, "extension"),
    ("filePath", FILE, "filePath"),
    ("bloodType", BLOOD, "bloodType"),
    ("bloodRh", BLOOD, "bloodRh"),
    ("bloodGroup", BLOOD, "bloodGroup"),
    ("ean13", BARCODE, "ean13"),
    ("ean8", BARCODE, "ean8"),
    ("isbn10", BARCODE, "isbn10"),
    ("isbn13", BARCODE, "isbn13"),
    ("numberBetween", NUMBER, "numberBetween"),
    ("randomDigit", NUMBER, "randomDigit"),
    ("randomDigitNot", NUMBER, "randomDigitNot"),
    ("randomDigitNotZero", NUMBER, "randomDigitNotZero"),
    ("randomFloat", NUMBER, "randomFloat"),
    ("randomNumber", NUMBER, "randomNumber"),
    ("semver", VERSION, "semver"),
];

const PARSE: &str = "parse";

fn has_own_method(name: &str) -> bool {
    name == PARSE || OWN_METHODS.iter().any(|(own, _, _)| *own == name)
}

fn call_own(
    generator: &mut Generator,
    method: &str,
    args: Args<'_>,
) -> Result<Value, GenerationError> {
    if method == PARSE {
        let template = args.str(0)?;
        return generator.parse(template).map(Value::Str);
    }
    let (_, id, target) = OWN_METHODS
        .iter()
        .find(|(own, _, _)| *own == method)
        .ok_or_else(|| GenerationError::unknown_format(method))?;
    let extension = generator.ext(id)?;
    extension.call(target, generator, args)
}

static QUALIFIED_RE: OnceLock<Regex> = OnceLock::new();

fn qualified_regex() -> &'static Regex {
    QUALIFIED_RE.get_or_init(|| {
        let pattern = r"^\s*([a-zA-Z0-9\\]+)\s*->\s*([a-zA-Z0-9]+)\s*$";
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("qualified format regex failed to compile: {error}"))
    })
}

/// Splits `Namespace\Id->method` into identifier and method.
pub(crate) fn split_qualified(name: &str) -> Option<(&str, &str)> {
    let captures = qualified_regex().captures(name)?;
    Some((captures.get(1)?.as_str(), captures.get(2)?.as_str()))
}

fn resolve_generator_method(
    _generator: &mut Generator,
    name: &str,
) -> Result<Option<FormatterEntry>, GenerationError> {
    Ok(has_own_method(name).then(|| FormatterEntry::new(Target::Generator, name)))
}

fn resolve_extension_method(
    generator: &mut Generator,
    name: &str,
) -> Result<Option<FormatterEntry>, GenerationError> {
    let Some((id, method)) = split_qualified(name) else {
        return Ok(None);
    };
    let extension = generator.ext(id)?;
    if !extension.has_format(method) {
        return Err(GenerationError::unknown_format(name));
    }
    Ok(Some(FormatterEntry::new(Target::Extension(extension), method)))
}

fn resolve_provider_method(
    generator: &mut Generator,
    name: &str,
) -> Result<Option<FormatterEntry>, GenerationError> {
    Ok(generator
        .providers()
        .iter()
        .find(|provider| provider.has_format(name))
        .map(|provider| FormatterEntry::new(Target::Provider(Rc::clone(provider)), name)))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("Forgery\\Extension\\Barcode->ean13", Some(("Forgery\\Extension\\Barcode", "ean13")))]
    #[case("  Acme\\Thing ->  make2 ", Some(("Acme\\Thing", "make2")))]
    #[case("Plain->x", Some(("Plain", "x")))]
    #[case("randomDigit", None)]
    #[case("Acme\\Thing->make_it", None)]
    #[case("Acme.Thing->make", None)]
    #[case("->make", None)]
    fn splits_qualified_names(#[case] name: &str, #[case] expected: Option<(&str, &str)>) {
        assert_eq!(split_qualified(name), expected);
    }

    #[test]
    fn own_methods_cover_parse_and_delegates() {
        assert!(has_own_method("parse"));
        assert!(has_own_method("ean13"));
        assert!(has_own_method("fileExtension"));
        assert!(!has_own_method("randomElement"));
    }
}
