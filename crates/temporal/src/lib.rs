//! Date and date-time normalisation between the wire, display and UI conventions.
//!
//! The remote record system exchanges dates as `DD/MM/YYYY` or `DD/MM/YYYY HH:mm`, while
//! browser date inputs use `YYYY-MM-DD` and `YYYY-MM-DDThh:mm`. This crate parses any of those
//! (plus RFC 3339 instants) into a single [`TemporalValue`] and renders it back out.
//!
//! ## Timezone policy
//! Every conversion goes through one explicit home offset carried by
//! [`TemporalNormalizer`]. Civil text (wire, display, UI) is taken at face value as home-time;
//! instants carrying their own offset are projected into the home offset on parse. Nothing
//! reads the host's local timezone.
//!
//! ## Failure policy
//! [`TemporalNormalizer::parse`] reports unparseable input as [`TemporalError`]; it never
//! substitutes the current time. The text-level helper [`TemporalNormalizer::format_text`]
//! maps any failure to an empty string for direct use in views.

mod normalizer;
mod rules;
mod value;

pub use normalizer::{parse_offset, TemporalInput, TemporalNormalizer};
pub use rules::{DateRule, DateRuleViolation};
pub use value::TemporalValue;

/// `DD/MM/YYYY HH:mm`, as exchanged with the remote record system.
pub const WIRE_DATE_TIME_FORMAT: &str = "%d/%m/%Y %H:%M";

/// `DD/MM/YYYY`, as exchanged with the remote record system.
pub const WIRE_DATE_FORMAT: &str = "%d/%m/%Y";

/// `HH:mm`.
pub const TIME_FORMAT: &str = "%H:%M";

/// `YYYY-MM-DD`, as used by HTML date inputs.
pub const UI_DATE_FORMAT: &str = "%Y-%m-%d";

/// `YYYY-MM-DDThh:mm`, as used by HTML datetime-local inputs.
pub const UI_DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Default home offset (Brasília time, UTC-03:00), in seconds west of UTC.
pub const DEFAULT_HOME_OFFSET_WEST_SECS: i32 = 3 * 3600;

/// Errors produced while parsing temporal input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TemporalError {
    /// The input was empty or whitespace only.
    #[error("temporal input is empty")]
    Empty,

    /// The input is not in any recognised date or date-time shape, or names an impossible
    /// calendar date or time of day.
    #[error("unparseable temporal input: '{0}'")]
    Unparseable(String),

    /// A UTC offset string could not be parsed.
    #[error("invalid UTC offset: '{0}'")]
    InvalidOffset(String),
}

/// Result type for temporal operations.
pub type TemporalResult<T> = Result<T, TemporalError>;

/// Output conventions supported by [`TemporalNormalizer::render`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DateFormat {
    /// `DD/MM/YYYY HH:mm` for the remote system.
    Wire,
    /// `DD/MM/YYYY` for the remote system.
    WireDateOnly,
    /// `DD/MM/YYYY HH:mm` for display.
    Display,
    /// `DD/MM/YYYY` for display.
    DisplayDateOnly,
    /// `HH:mm` for display.
    DisplayTimeOnly,
    /// `YYYY-MM-DD` for date inputs.
    UiDate,
    /// `YYYY-MM-DDThh:mm` for datetime-local inputs.
    UiDateTime,
}

impl DateFormat {
    /// Every supported format, in declaration order.
    pub const ALL: [DateFormat; 7] = [
        DateFormat::Wire,
        DateFormat::WireDateOnly,
        DateFormat::Display,
        DateFormat::DisplayDateOnly,
        DateFormat::DisplayTimeOnly,
        DateFormat::UiDate,
        DateFormat::UiDateTime,
    ];

    /// The stable name used on the command line and in configuration.
    pub fn name(self) -> &'static str {
        match self {
            DateFormat::Wire => "wire",
            DateFormat::WireDateOnly => "wire-date",
            DateFormat::Display => "display",
            DateFormat::DisplayDateOnly => "display-date",
            DateFormat::DisplayTimeOnly => "display-time",
            DateFormat::UiDate => "ui-date",
            DateFormat::UiDateTime => "ui-date-time",
        }
    }
}

impl std::fmt::Display for DateFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.name())
    }
}

impl std::str::FromStr for DateFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        DateFormat::ALL
            .into_iter()
            .find(|f| f.name() == wanted)
            .ok_or_else(|| {
                let names: Vec<&str> = DateFormat::ALL.iter().map(|f| f.name()).collect();
                format!(
                    "unknown date format '{}', expected one of: {}",
                    s,
                    names.join(", ")
                )
            })
    }
}
