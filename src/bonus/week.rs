use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// ISO-8601 week: weeks start on Monday, week 1 holds January 4
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct IsoWeek {
    pub year: i32,
    pub week: u32,
}

impl fmt::Display for IsoWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-W{:02}", self.year, self.week)
    }
}

/// week number of an instant, taken on its UTC calendar date
pub fn get_week_number(date: DateTime<Utc>) -> IsoWeek {
    week_of(date.date_naive())
}

/// Week number of a calendar date.
///
/// The date is moved to the Thursday of its Monday-based week; that
/// Thursday's year is the week-year. Week 1's Thursday is the first Thursday
/// of the year (the one in the week holding January 4), so every Thursday sits
/// a whole number of weeks after it. Works on ordinals so the edges of the
/// representable range never build an out-of-range date.
pub fn week_of(date: NaiveDate) -> IsoWeek {
    let offset = i64::from(date.weekday().num_days_from_monday());
    let mut year = date.year();
    let mut thursday = i64::from(date.ordinal0()) - offset + 3;

    if thursday < 0 {
        year -= 1;
        thursday += days_in_year(year);
    } else if thursday >= days_in_year(year) {
        thursday -= days_in_year(year);
        year += 1;
    }

    // first thursday of the year has ordinal0 in 0..7
    let first_thursday = thursday % 7;
    let week = 1 + (thursday - first_thursday) / 7;

    IsoWeek {
        year,
        week: week as u32,
    }
}

fn days_in_year(year: i32) -> i64 {
    if is_leap_year(year) { 366 } else { 365 }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}
