//! Calendar constraints used by form validation.

use chrono::NaiveDate;

use crate::TemporalValue;

/// A constraint on a date field, checked against the home-offset calendar date.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DateRule {
    /// The date must be today or later.
    NotInPast,
    /// The date must be today or earlier.
    NotInFuture,
    /// The date is a birth date and the person must be at least this many years old.
    MinimumAge(u32),
}

/// Why a [`DateRule`] rejected a value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DateRuleViolation {
    #[error("date is in the past")]
    InPast,

    #[error("date is in the future")]
    InFuture,

    #[error("minimum age is {required}, got {actual}")]
    BelowMinimumAge { required: u32, actual: u32 },
}

impl DateRuleViolation {
    /// A stable machine-readable code for form error mapping.
    pub fn reason_code(&self) -> &'static str {
        match self {
            DateRuleViolation::InPast => "DATE_IN_PAST",
            DateRuleViolation::InFuture => "DATE_IN_FUTURE",
            DateRuleViolation::BelowMinimumAge { .. } => "BELOW_MINIMUM_AGE",
        }
    }
}

impl DateRule {
    /// Checks `value` against this rule, with `today` taken in the home offset.
    ///
    /// Only the calendar date is compared; the time of day is ignored. A birth date after
    /// `today` counts as age 0.
    pub fn check(self, value: &TemporalValue, today: NaiveDate) -> Result<(), DateRuleViolation> {
        let date = value.calendar_date();
        match self {
            DateRule::NotInPast if date < today => Err(DateRuleViolation::InPast),
            DateRule::NotInFuture if date > today => Err(DateRuleViolation::InFuture),
            DateRule::MinimumAge(required) => {
                let actual = value.age_on(today).unwrap_or(0);
                if actual < required {
                    Err(DateRuleViolation::BelowMinimumAge { required, actual })
                } else {
                    Ok(())
                }
            }
            _ => Ok(()),
        }
    }
}
