//! Relative age expressions.
//!
//! Turns free text such as `"3 months"`, `"2 weeks 3 days"` or `"10days"` into
//! a single [`AgeThreshold`].

use std::{str::FromStr, sync::LazyLock};

use chrono::TimeDelta;
use regex::Regex;

use crate::errors::Error;

#[cfg(test)]
#[path = "age_tests.rs"]
mod tests;

/// Days counted for one month.
const DAYS_PER_MONTH: i64 = 30;

/// Days counted for one year.
const DAYS_PER_YEAR: i64 = 365;

/// Days counted for one week.
const DAYS_PER_WEEK: i64 = 7;

/// A unit an age expression can count in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Unit {
    Year,
    Month,
    Week,
    Day,
    Hour,
    Minute,
    Second,
}

impl Unit {
    const ALL: [Unit; 7] = [
        Unit::Year,
        Unit::Month,
        Unit::Week,
        Unit::Day,
        Unit::Hour,
        Unit::Minute,
        Unit::Second,
    ];

    /// The keyword matched in expressions, in singular form.
    fn keyword(self) -> &'static str {
        match self {
            Unit::Year => "year",
            Unit::Month => "month",
            Unit::Week => "week",
            Unit::Day => "day",
            Unit::Hour => "hour",
            Unit::Minute => "minute",
            Unit::Second => "second",
        }
    }
}

/// One pattern per unit: the count directly in front of the keyword, with
/// optional whitespace in between. Only the first match of each unit counts.
static UNIT_PATTERNS: LazyLock<Vec<(Unit, Regex)>> = LazyLock::new(|| {
    Unit::ALL
        .iter()
        .map(|unit| {
            let pattern = Regex::new(&format!(r"([0-9]*?)\s*?{}", unit.keyword()))
                .expect("unit patterns are valid regular expressions");
            (*unit, pattern)
        })
        .collect()
});

/// Per-unit counts captured from an age expression.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct UnitCounts {
    years: i64,
    months: i64,
    weeks: i64,
    days: i64,
    hours: i64,
    minutes: i64,
    seconds: i64,
}

impl UnitCounts {
    fn set(&mut self, unit: Unit, count: i64) {
        match unit {
            Unit::Year => self.years = count,
            Unit::Month => self.months = count,
            Unit::Week => self.weeks = count,
            Unit::Day => self.days = count,
            Unit::Hour => self.hours = count,
            Unit::Minute => self.minutes = count,
            Unit::Second => self.seconds = count,
        }
    }

    /// Folds years, months and weeks into whole days.
    fn total_days(&self) -> Option<i64> {
        let years = self.years.checked_mul(DAYS_PER_YEAR)?;
        let months = self.months.checked_mul(DAYS_PER_MONTH)?;
        let weeks = self.weeks.checked_mul(DAYS_PER_WEEK)?;
        self.days
            .checked_add(weeks)?
            .checked_add(months)?
            .checked_add(years)
    }
}

/// Minimum time since the last activity for a repository to count as stale.
///
/// Years are normalised to 365 days and months to 30 days.
///
/// # Examples
///
/// ```rust
/// use chrono::TimeDelta;
/// use stale_repos_core::AgeThreshold;
///
/// let threshold = AgeThreshold::parse("3 months").unwrap();
/// assert_eq!(threshold.as_duration(), TimeDelta::days(90));
///
/// let none = AgeThreshold::parse("").unwrap();
/// assert_eq!(none.as_duration(), TimeDelta::zero());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct AgeThreshold(TimeDelta);

impl AgeThreshold {
    /// Create a threshold from an explicit duration.
    pub fn new(duration: TimeDelta) -> Self {
        Self(duration)
    }

    /// Parse a free-text age expression.
    ///
    /// Text without any unit keyword yields a zero threshold.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidAgeExpression` when a unit keyword has no
    /// leading digits (for example `"day"` or `"today"`) or when a count does
    /// not fit in a duration.
    pub fn parse(expression: &str) -> Result<Self, Error> {
        let invalid = |unit: Unit| Error::InvalidAgeExpression {
            unit: unit.keyword().to_string(),
            expression: expression.to_string(),
        };

        let mut counts = UnitCounts::default();
        for (unit, pattern) in UNIT_PATTERNS.iter() {
            let Some(captures) = pattern.captures(expression) else {
                continue;
            };

            let digits = captures.get(1).map_or("", |m| m.as_str());
            let count: i64 = digits.parse().map_err(|_| invalid(*unit))?;
            counts.set(*unit, count);
        }

        let days = counts
            .total_days()
            .and_then(TimeDelta::try_days)
            .ok_or_else(|| invalid(Unit::Day))?;
        let hours = TimeDelta::try_hours(counts.hours).ok_or_else(|| invalid(Unit::Hour))?;
        let minutes = TimeDelta::try_minutes(counts.minutes).ok_or_else(|| invalid(Unit::Minute))?;
        let seconds = TimeDelta::try_seconds(counts.seconds).ok_or_else(|| invalid(Unit::Second))?;

        let duration = days
            .checked_add(&hours)
            .and_then(|d| d.checked_add(&minutes))
            .and_then(|d| d.checked_add(&seconds))
            .ok_or_else(|| invalid(Unit::Second))?;

        Ok(Self(duration))
    }

    /// Get the threshold as a duration.
    pub fn as_duration(&self) -> TimeDelta {
        self.0
    }
}

impl Default for AgeThreshold {
    fn default() -> Self {
        Self(TimeDelta::zero())
    }
}

impl FromStr for AgeThreshold {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<TimeDelta> for AgeThreshold {
    fn from(duration: TimeDelta) -> Self {
        Self::new(duration)
    }
}

impl std::fmt::Display for AgeThreshold {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let total = self.0.num_seconds();
        let days = total.div_euclid(86_400);
        let rest = total.rem_euclid(86_400);
        write!(
            f,
            "{} days, {}h {}m {}s",
            days,
            rest / 3_600,
            (rest % 3_600) / 60,
            rest % 60
        )
    }
}
