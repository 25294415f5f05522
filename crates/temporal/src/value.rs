//! The single internal representation every temporal format converts through.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

use crate::{TemporalError, WIRE_DATE_FORMAT, WIRE_DATE_TIME_FORMAT};

/// A civil calendar date with an optional minute-precision time of day.
///
/// Values are always expressed in the home offset of the [`TemporalNormalizer`] that
/// produced them, so rendering never needs a second timezone projection.
///
/// [`TemporalNormalizer`]: crate::TemporalNormalizer
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TemporalValue {
    date: NaiveDate,
    time: Option<NaiveTime>,
}

impl TemporalValue {
    /// A date without a time of day.
    pub fn date(date: NaiveDate) -> Self {
        Self { date, time: None }
    }

    /// A date with a time of day; seconds and fractions are discarded.
    pub fn date_time(value: NaiveDateTime) -> Self {
        Self {
            date: value.date(),
            time: truncate_to_minute(value.time()),
        }
    }

    /// Builds a value from its parts; seconds and fractions of `time` are discarded.
    pub fn from_parts(date: NaiveDate, time: Option<NaiveTime>) -> Self {
        Self {
            date,
            time: time.and_then(truncate_to_minute),
        }
    }

    /// Builds a value from numeric civil fields, rejecting impossible dates and times.
    pub fn from_fields(
        year: i32,
        month: u32,
        day: u32,
        hour_minute: Option<(u32, u32)>,
    ) -> Option<Self> {
        let date = NaiveDate::from_ymd_opt(year, month, day)?;
        let time = match hour_minute {
            Some((hour, minute)) => Some(NaiveTime::from_hms_opt(hour, minute, 0)?),
            None => None,
        };
        Some(Self { date, time })
    }

    /// The calendar date.
    pub fn calendar_date(&self) -> NaiveDate {
        self.date
    }

    /// The time of day, if one was given.
    pub fn time_of_day(&self) -> Option<NaiveTime> {
        self.time
    }

    /// Returns `true` if this value carries a time of day.
    pub fn has_time(&self) -> bool {
        self.time.is_some()
    }

    /// The civil date-time; date-only values resolve to midnight.
    pub fn naive(&self) -> NaiveDateTime {
        self.date.and_time(self.time.unwrap_or_default())
    }

    /// Completed years between this date and `today`.
    ///
    /// Returns `None` if this date is after `today`.
    pub fn age_on(&self, today: NaiveDate) -> Option<u32> {
        if self.date > today {
            return None;
        }

        let mut years = today.year() - self.date.year();
        if (today.month(), today.day()) < (self.date.month(), self.date.day()) {
            years -= 1;
        }

        u32::try_from(years).ok()
    }

    /// Renders the wire shape that matches this value: date-time when a time is present,
    /// date-only otherwise.
    pub fn to_wire_string(&self) -> String {
        match self.time {
            Some(_) => self.naive().format(WIRE_DATE_TIME_FORMAT).to_string(),
            None => self.date.format(WIRE_DATE_FORMAT).to_string(),
        }
    }
}

fn truncate_to_minute(time: NaiveTime) -> Option<NaiveTime> {
    NaiveTime::from_hms_opt(time.hour(), time.minute(), 0)
}

impl From<NaiveDate> for TemporalValue {
    fn from(value: NaiveDate) -> Self {
        Self::date(value)
    }
}

impl From<NaiveDateTime> for TemporalValue {
    fn from(value: NaiveDateTime) -> Self {
        Self::date_time(value)
    }
}

impl std::fmt::Display for TemporalValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_wire_string())
    }
}

impl serde::Serialize for TemporalValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_wire_string())
    }
}

impl<'de> serde::Deserialize<'de> for TemporalValue {
    /// Accepts wire-format text only; other conventions go through
    /// [`TemporalNormalizer::parse`](crate::TemporalNormalizer::parse).
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        crate::normalizer::parse_wire(&s)
            .ok_or_else(|| TemporalError::Unparseable(s.clone()))
            .map_err(serde::de::Error::custom)
    }
}
