//! Dates and times up to a reference moment.
//!
//! Unbound instances measure against the current time on every call. A
//! generator binds its own copy, pinned to the configured reference time (or
//! the moment of binding), so every date a generator produces shares one
//! upper bound.

use std::rc::Rc;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Datelike, FixedOffset, Months, Utc};

use crate::error::GenerationError;
use crate::extension::{Extension, Formats, unsupported};
use crate::generator::Generator;
use crate::random::RandomSource;
use crate::value::{Args, Value};

const FORMATS: &[&str] = &[
    "unixTime",
    "dateTime",
    "dateTimeThisCentury",
    "date",
    "time",
    "year",
    "month",
    "dayOfMonth",
];

/// Layout used by `dateTime` and `dateTimeThisCentury`.
pub const DATE_TIME_LAYOUT: &str = "%Y-%m-%d %H:%M:%S";

const DATE_LAYOUT: &str = "%Y-%m-%d";
const TIME_LAYOUT: &str = "%H:%M:%S";

/// Produces timestamps, dates, and date parts between the Unix epoch and a
/// reference moment.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateTimeExtension {
    reference: Option<DateTime<FixedOffset>>,
}

impl DateTimeExtension {
    /// Creates an instance pinned to `reference`.
    #[must_use]
    pub const fn pinned(reference: DateTime<FixedOffset>) -> Self {
        Self {
            reference: Some(reference),
        }
    }

    /// Returns the upper bound for generated moments.
    #[must_use]
    pub fn reference(&self) -> DateTime<FixedOffset> {
        self.reference.unwrap_or_else(|| Utc::now().fixed_offset())
    }

    /// Returns a moment between the epoch and the reference.
    #[must_use]
    pub fn moment(&self, random: &RandomSource) -> DateTime<FixedOffset> {
        let reference = self.reference();
        between(random, 0, reference.timestamp(), *reference.offset())
    }

    /// Returns a moment within the hundred years before the reference.
    #[must_use]
    pub fn moment_this_century(&self, random: &RandomSource) -> DateTime<FixedOffset> {
        let reference = self.reference();
        let start = reference
            .checked_sub_months(Months::new(1200))
            .map_or(0, |start| start.timestamp());
        between(random, start, reference.timestamp(), *reference.offset())
    }
}

fn between(
    random: &RandomSource,
    start: i64,
    end: i64,
    offset: FixedOffset,
) -> DateTime<FixedOffset> {
    let seconds = random.number_between(start, end);
    DateTime::from_timestamp(seconds, 0)
        .unwrap_or(DateTime::UNIX_EPOCH)
        .with_timezone(&offset)
}

fn render(
    format: &str,
    moment: DateTime<FixedOffset>,
    layout: &str,
) -> Result<Value, GenerationError> {
    if StrftimeItems::new(layout).any(|item| matches!(item, Item::Error)) {
        return Err(GenerationError::invalid_argument(
            format,
            format!("'{layout}' is not a valid date layout"),
        ));
    }
    Ok(Value::Str(moment.format(layout).to_string()))
}

impl Formats for DateTimeExtension {
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
            "unixTime" => Ok(Value::Int(self.moment(random).timestamp())),
            "dateTime" => render(name, self.moment(random), DATE_TIME_LAYOUT),
            "dateTimeThisCentury" => render(name, self.moment_this_century(random), DATE_TIME_LAYOUT),
            "date" => {
                let layout = args.opt_str(0)?.unwrap_or(DATE_LAYOUT);
                render(name, self.moment(random), layout)
            }
            "time" => {
                let layout = args.opt_str(0)?.unwrap_or(TIME_LAYOUT);
                render(name, self.moment(random), layout)
            }
            "year" => Ok(Value::Str(self.moment(random).year().to_string())),
            "month" => render(name, self.moment(random), "%m"),
            "dayOfMonth" => render(name, self.moment(random), "%d"),
            _ => Err(unsupported(name)),
        }
    }
}

impl Extension for DateTimeExtension {
    fn with_generator(&self, generator: &Generator) -> Option<Rc<dyn Extension>> {
        let reference = generator
            .config()
            .reference_time()
            .unwrap_or_else(|| self.reference());
        Some(Rc::new(Self::pinned(reference)))
    }
}
