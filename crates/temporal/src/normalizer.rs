//! Parsing and rendering through a single explicit home offset.

use std::sync::LazyLock;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};
use regex::Regex;

use crate::{
    DateFormat, TemporalError, TemporalResult, TemporalValue, DEFAULT_HOME_OFFSET_WEST_SECS,
    TIME_FORMAT, UI_DATE_FORMAT, UI_DATE_TIME_FORMAT, WIRE_DATE_FORMAT, WIRE_DATE_TIME_FORMAT,
};

static WIRE_FORMAT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{2}/[0-9]{2}/[0-9]{4}(?: [0-9]{2}:[0-9]{2})?$")
        .expect("wire format pattern is valid")
});

/// Naive date-time shapes tried after the wire format and RFC 3339.
const NAIVE_DATE_TIME_FORMATS: [&str; 5] = [
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
];

/// Anything [`TemporalNormalizer::parse`] accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TemporalInput<'a> {
    /// Free text in one of the supported conventions.
    Text(&'a str),
    /// An instant with its own offset; projected into the home offset.
    Instant(DateTime<FixedOffset>),
    /// An already-parsed value; returned unchanged.
    Value(TemporalValue),
}

impl<'a> From<&'a str> for TemporalInput<'a> {
    fn from(value: &'a str) -> Self {
        TemporalInput::Text(value)
    }
}

impl<'a> From<&'a String> for TemporalInput<'a> {
    fn from(value: &'a String) -> Self {
        TemporalInput::Text(value.as_str())
    }
}

impl From<DateTime<FixedOffset>> for TemporalInput<'_> {
    fn from(value: DateTime<FixedOffset>) -> Self {
        TemporalInput::Instant(value)
    }
}

impl From<DateTime<Utc>> for TemporalInput<'_> {
    fn from(value: DateTime<Utc>) -> Self {
        TemporalInput::Instant(value.fixed_offset())
    }
}

impl From<TemporalValue> for TemporalInput<'_> {
    fn from(value: TemporalValue) -> Self {
        TemporalInput::Value(value)
    }
}

impl From<NaiveDate> for TemporalInput<'_> {
    fn from(value: NaiveDate) -> Self {
        TemporalInput::Value(TemporalValue::date(value))
    }
}

impl From<NaiveDateTime> for TemporalInput<'_> {
    fn from(value: NaiveDateTime) -> Self {
        TemporalInput::Value(TemporalValue::date_time(value))
    }
}

/// Converts between the wire, display and UI date conventions.
///
/// The normalizer is a plain value holding the home offset; it is `Copy`, `Send` and `Sync`
/// and can be shared freely.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TemporalNormalizer {
    home: FixedOffset,
}

impl Default for TemporalNormalizer {
    fn default() -> Self {
        let home = FixedOffset::west_opt(DEFAULT_HOME_OFFSET_WEST_SECS)
            .expect("default home offset is within a day");
        Self { home }
    }
}

impl TemporalNormalizer {
    /// Creates a normalizer for the given home offset.
    pub fn new(home: FixedOffset) -> Self {
        Self { home }
    }

    /// The offset every conversion is expressed in.
    pub fn home_offset(&self) -> FixedOffset {
        self.home
    }

    /// Returns `true` if `s` is in wire format (`DD/MM/YYYY` or `DD/MM/YYYY HH:mm`).
    ///
    /// This is a purely syntactic check; it does not validate the calendar date.
    pub fn is_wire_format(s: &str) -> bool {
        WIRE_FORMAT.is_match(s)
    }

    /// Parses `input` into a [`TemporalValue`] in the home offset.
    ///
    /// Text is tried, in order, as wire format, RFC 3339, naive ISO date-time and ISO date.
    /// Wire and naive text is civil time and is not shifted; RFC 3339 instants are projected
    /// into the home offset.
    ///
    /// # Errors
    ///
    /// - [`TemporalError::Empty`] for empty or whitespace-only text
    /// - [`TemporalError::Unparseable`] for anything else that is not a real date, including
    ///   wire-shaped text naming an impossible date such as `31/02/2025`
    pub fn parse<'a>(&self, input: impl Into<TemporalInput<'a>>) -> TemporalResult<TemporalValue> {
        match input.into() {
            TemporalInput::Value(value) => Ok(value),
            TemporalInput::Instant(instant) => Ok(self.project(&instant)),
            TemporalInput::Text(text) => self.parse_text(text),
        }
    }

    /// Projects an instant into the home offset.
    pub fn project<Tz: TimeZone>(&self, instant: &DateTime<Tz>) -> TemporalValue {
        TemporalValue::date_time(instant.with_timezone(&self.home).naive_local())
    }

    /// Today's date in the home offset.
    pub fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.home).date_naive()
    }

    fn parse_text(&self, text: &str) -> TemporalResult<TemporalValue> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(TemporalError::Empty);
        }

        if Self::is_wire_format(trimmed) {
            return parse_wire(trimmed).ok_or_else(|| unparseable(trimmed));
        }

        if let Ok(instant) = DateTime::parse_from_rfc3339(trimmed) {
            return Ok(self.project(&instant));
        }

        for format in NAIVE_DATE_TIME_FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
                return Ok(TemporalValue::date_time(dt));
            }
        }

        if let Ok(date) = NaiveDate::parse_from_str(trimmed, UI_DATE_FORMAT) {
            return Ok(TemporalValue::date(date));
        }

        Err(unparseable(trimmed))
    }

    /// `DD/MM/YYYY HH:mm` for the remote system; date-only values render `00:00`.
    pub fn to_wire_date_time(&self, value: &TemporalValue) -> String {
        value.naive().format(WIRE_DATE_TIME_FORMAT).to_string()
    }

    /// `DD/MM/YYYY` for the remote system.
    pub fn to_wire_date_only(&self, value: &TemporalValue) -> String {
        value.calendar_date().format(WIRE_DATE_FORMAT).to_string()
    }

    /// `DD/MM/YYYY HH:mm` for display.
    pub fn to_display_date_time(&self, value: &TemporalValue) -> String {
        value.naive().format(WIRE_DATE_TIME_FORMAT).to_string()
    }

    /// `DD/MM/YYYY` for display.
    pub fn to_display_date_only(&self, value: &TemporalValue) -> String {
        value.calendar_date().format(WIRE_DATE_FORMAT).to_string()
    }

    /// `HH:mm` for display; date-only values render `00:00`.
    pub fn to_display_time_only(&self, value: &TemporalValue) -> String {
        value.naive().format(TIME_FORMAT).to_string()
    }

    /// `YYYY-MM-DD` for date inputs.
    pub fn to_ui_date(&self, value: &TemporalValue) -> String {
        value.calendar_date().format(UI_DATE_FORMAT).to_string()
    }

    /// `YYYY-MM-DDThh:mm` for datetime-local inputs.
    pub fn to_ui_date_time(&self, value: &TemporalValue) -> String {
        value.naive().format(UI_DATE_TIME_FORMAT).to_string()
    }

    /// Renders `value` in the requested format.
    pub fn render(&self, value: &TemporalValue, format: DateFormat) -> String {
        match format {
            DateFormat::Wire => self.to_wire_date_time(value),
            DateFormat::WireDateOnly => self.to_wire_date_only(value),
            DateFormat::Display => self.to_display_date_time(value),
            DateFormat::DisplayDateOnly => self.to_display_date_only(value),
            DateFormat::DisplayTimeOnly => self.to_display_time_only(value),
            DateFormat::UiDate => self.to_ui_date(value),
            DateFormat::UiDateTime => self.to_ui_date_time(value),
        }
    }

    /// Parses and renders text in one step, for views and form population.
    ///
    /// Absent, empty and unparseable input all render as an empty string. Wire-format input
    /// requested in a wire format is passed through without re-parsing.
    pub fn format_text(&self, input: Option<&str>, format: DateFormat) -> String {
        let Some(text) = input.map(str::trim).filter(|t| !t.is_empty()) else {
            return String::new();
        };

        if Self::is_wire_format(text) {
            match format {
                DateFormat::Wire => return text.to_owned(),
                DateFormat::WireDateOnly => {
                    return text.split(' ').next().unwrap_or(text).to_owned();
                }
                _ => {}
            }
        }

        match self.parse(text) {
            Ok(value) => self.render(&value, format),
            Err(err) => {
                tracing::debug!(%err, "rendering unparseable temporal input as empty");
                String::new()
            }
        }
    }
}

/// Parses a string that is already known to be in wire format.
///
/// Returns `None` if the text is not wire-shaped or names an impossible date or time.
pub(crate) fn parse_wire(text: &str) -> Option<TemporalValue> {
    if !WIRE_FORMAT.is_match(text) {
        return None;
    }

    let field = |range: std::ops::Range<usize>| text.get(range)?.parse::<u32>().ok();

    let day = field(0..2)?;
    let month = field(3..5)?;
    let year = i32::try_from(field(6..10)?).ok()?;
    let hour_minute = if text.len() > 10 {
        Some((field(11..13)?, field(14..16)?))
    } else {
        None
    };

    TemporalValue::from_fields(year, month, day, hour_minute)
}

/// Parses a UTC offset such as `-03:00`, `+0530`, `-03`, `Z` or `UTC`.
///
/// # Errors
///
/// Returns [`TemporalError::InvalidOffset`] if the text is malformed or the offset is not
/// strictly within one day.
pub fn parse_offset(text: &str) -> TemporalResult<FixedOffset> {
    let trimmed = text.trim();
    let invalid = || TemporalError::InvalidOffset(text.to_owned());

    if trimmed.eq_ignore_ascii_case("z") || trimmed.eq_ignore_ascii_case("utc") {
        return FixedOffset::east_opt(0).ok_or_else(invalid);
    }

    let (sign, rest) = match trimmed.as_bytes().first() {
        Some(b'+') => (1, &trimmed[1..]),
        Some(b'-') => (-1, &trimmed[1..]),
        _ => return Err(invalid()),
    };

    let digits: String = rest.chars().filter(|c| *c != ':').collect();
    if !digits.bytes().all(|b| b.is_ascii_digit()) || !matches!(digits.len(), 2 | 4) {
        return Err(invalid());
    }

    let hours: i32 = digits[..2].parse().map_err(|_| invalid())?;
    let minutes: i32 = if digits.len() == 4 {
        digits[2..].parse().map_err(|_| invalid())?
    } else {
        0
    };

    if minutes >= 60 {
        return Err(invalid());
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60)).ok_or_else(invalid)
}

fn unparseable(text: &str) -> TemporalError {
    tracing::debug!(input = text, "unparseable temporal input");
    TemporalError::Unparseable(text.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sao_paulo() -> TemporalNormalizer {
        TemporalNormalizer::default()
    }

    #[test]
    fn test_default_home_offset_is_minus_three() {
        assert_eq!(sao_paulo().home_offset().local_minus_utc(), -3 * 3600);
    }

    #[test]
    fn test_is_wire_format() {
        assert!(TemporalNormalizer::is_wire_format("15/06/2025"));
        assert!(TemporalNormalizer::is_wire_format("15/06/2025 14:30"));
        assert!(TemporalNormalizer::is_wire_format("31/02/2025"));
        assert!(!TemporalNormalizer::is_wire_format("2025-06-15"));
        assert!(!TemporalNormalizer::is_wire_format("15/06/2025 14:30:00"));
        assert!(!TemporalNormalizer::is_wire_format("5/06/2025"));
        assert!(!TemporalNormalizer::is_wire_format(" 15/06/2025"));
        assert!(!TemporalNormalizer::is_wire_format("١٥/06/2025"));
    }

    #[test]
    fn test_wire_round_trip_across_field_ranges() {
        let n = sao_paulo();
        for year in [1900, 1999, 2000, 2024, 2025] {
            for month in 1..=12u32 {
                for day in [1u32, 9, 10, 28] {
                    for (hour, minute) in [(0u32, 0u32), (9, 5), (12, 30), (23, 59)] {
                        let s = format!("{day:02}/{month:02}/{year:04} {hour:02}:{minute:02}");
                        let value = n.parse(s.as_str()).expect("well-formed wire date-time");
                        assert_eq!(n.to_wire_date_time(&value), s);
                    }
                }
            }
        }
    }

    #[test]
    fn test_wire_date_only_round_trip() {
        let n = sao_paulo();
        let value = n.parse("29/02/2024").expect("leap day");
        assert_eq!(n.to_wire_date_only(&value), "29/02/2024");
        assert_eq!(n.to_wire_date_time(&value), "29/02/2024 00:00");
        assert_eq!(value.to_wire_string(), "29/02/2024");
    }

    #[test]
    fn test_wire_to_ui_date() {
        let n = sao_paulo();
        let value = n.parse("15/06/2025").expect("valid");
        assert_eq!(n.to_ui_date(&value), "2025-06-15");
        assert_eq!(n.to_ui_date_time(&value), "2025-06-15T00:00");
    }

    #[test]
    fn test_ui_formats_parse_back() {
        let n = sao_paulo();
        let date = n.parse("2025-06-15").expect("ui date");
        assert_eq!(n.to_wire_date_only(&date), "15/06/2025");
        assert!(!date.has_time());

        let dt = n.parse("2025-06-15T08:45").expect("ui date-time");
        assert_eq!(n.to_wire_date_time(&dt), "15/06/2025 08:45");
        assert_eq!(n.to_display_time_only(&dt), "08:45");
    }

    #[test]
    fn test_rfc3339_is_projected_into_home_offset() {
        let n = sao_paulo();
        let value = n.parse("2025-06-15T02:30:00Z").expect("rfc3339");
        assert_eq!(n.to_wire_date_time(&value), "14/06/2025 23:30");

        let utc = TemporalNormalizer::new(parse_offset("UTC").expect("utc"));
        let value = utc.parse("2025-06-15T02:30:00Z").expect("rfc3339");
        assert_eq!(utc.to_ui_date(&value), "2025-06-15");
    }

    #[test]
    fn test_instant_input_is_projected() {
        let n = sao_paulo();
        let instant = Utc
            .with_ymd_and_hms(2025, 1, 1, 1, 0, 0)
            .single()
            .expect("valid instant");
        let value = n.parse(instant).expect("instant always parses");
        assert_eq!(n.to_display_date_time(&value), "31/12/2024 22:00");
    }

    #[test]
    fn test_value_input_is_returned_unchanged() {
        let n = sao_paulo();
        let value = TemporalValue::from_fields(2025, 6, 15, Some((10, 0))).expect("valid");
        assert_eq!(n.parse(value), Ok(value));
    }

    #[test]
    fn test_parse_reports_failures_instead_of_now() {
        let n = sao_paulo();
        assert_eq!(n.parse(""), Err(TemporalError::Empty));
        assert_eq!(n.parse("   "), Err(TemporalError::Empty));
        assert_eq!(
            n.parse("not a date"),
            Err(TemporalError::Unparseable("not a date".into()))
        );
        assert_eq!(
            n.parse("31/02/2025"),
            Err(TemporalError::Unparseable("31/02/2025".into()))
        );
        assert!(n.parse("15/06/2025 24:00").is_err());
        assert!(n.parse("2025-13-01").is_err());
    }

    #[test]
    fn test_parse_trims_surrounding_whitespace() {
        let n = sao_paulo();
        let value = n.parse("  15/06/2025 14:30 ").expect("trimmed");
        assert_eq!(n.to_wire_date_time(&value), "15/06/2025 14:30");
    }

    #[test]
    fn test_format_text_handles_absent_and_invalid() {
        let n = sao_paulo();
        assert_eq!(n.format_text(None, DateFormat::Display), "");
        assert_eq!(n.format_text(Some(""), DateFormat::UiDate), "");
        assert_eq!(n.format_text(Some("garbage"), DateFormat::UiDate), "");
        assert_eq!(n.format_text(Some("31/02/2025"), DateFormat::UiDate), "");
    }

    #[test]
    fn test_format_text_passes_wire_input_through() {
        let n = sao_paulo();
        assert_eq!(
            n.format_text(Some("15/06/2025 14:30"), DateFormat::Wire),
            "15/06/2025 14:30"
        );
        assert_eq!(
            n.format_text(Some("15/06/2025 14:30"), DateFormat::WireDateOnly),
            "15/06/2025"
        );
        assert_eq!(
            n.format_text(Some("15/06/2025"), DateFormat::Wire),
            "15/06/2025"
        );
        assert_eq!(
            n.format_text(Some("2025-06-15T14:30"), DateFormat::Wire),
            "15/06/2025 14:30"
        );
    }

    #[test]
    fn test_render_covers_every_format() {
        let n = sao_paulo();
        let value = n.parse("05/03/2025 07:08").expect("valid");
        let rendered: Vec<String> = DateFormat::ALL
            .iter()
            .map(|f| n.render(&value, *f))
            .collect();
        assert_eq!(
            rendered,
            vec![
                "05/03/2025 07:08",
                "05/03/2025",
                "05/03/2025 07:08",
                "05/03/2025",
                "07:08",
                "2025-03-05",
                "2025-03-05T07:08",
            ]
        );
    }

    #[test]
    fn test_parse_offset() {
        assert_eq!(
            parse_offset("-03:00").expect("valid").local_minus_utc(),
            -10_800
        );
        assert_eq!(
            parse_offset("+0530").expect("valid").local_minus_utc(),
            19_800
        );
        assert_eq!(parse_offset("-03").expect("valid").local_minus_utc(), -10_800);
        assert_eq!(parse_offset("Z").expect("valid").local_minus_utc(), 0);

        for bad in ["", "03:00", "-3", "+25:00", "-03:60", "+ab:cd", "-03:00:00"] {
            assert_eq!(
                parse_offset(bad),
                Err(TemporalError::InvalidOffset(bad.to_owned())),
                "input {bad:?}"
            );
        }
    }
}
