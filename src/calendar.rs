//! Calendar helpers for month-end and leap-day clamping.

use chrono::{Datelike, NaiveDate};

/// Number of days in `month` (1-12) of `year`. Returns 0 for an invalid month.
#[must_use]
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .filter(|_| (1..=12).contains(&month))
        .map_or(0, |last| last.day())
}

/// Build a date, clamping `day` to the length of the month.
///
/// `clamped_date(2025, 2, 31)` is 28 Feb 2025. Returns `None` for an invalid
/// month or a zero day.
#[must_use]
pub fn clamped_date(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    if day == 0 {
        return None;
    }
    let last = days_in_month(year, month);
    if last == 0 {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day.min(last))
}

/// True when `date` is day `day` of its month, or when `day` is past the end
/// of that month and `date` is the month's last day.
#[must_use]
pub fn matches_day_of_month(date: NaiveDate, day: u32) -> bool {
    clamped_date(date.year(), date.month(), day) == Some(date)
}

/// True when `date` falls on the `month`/`day` anniversary.
///
/// 29 February matches 28 February in common years.
#[must_use]
pub fn matches_month_day(date: NaiveDate, month: u32, day: u32) -> bool {
    date.month() == month && matches_day_of_month(date, day)
}

/// True when `month`/`day` names a real day in at least a leap year.
#[must_use]
pub fn is_valid_month_day(month: u32, day: u32) -> bool {
    // 2000 is a leap year, so 29 Feb passes.
    NaiveDate::from_ymd_opt(2000, month, day).is_some()
}
