//! Month tables: names, day counts, leap-year handling.

use crate::error::CalendarError;

/// Abbreviated month names, indexed by 0-based month number.
pub(crate) const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Days in each month of a non-leap year, indexed by 0-based month number.
pub(crate) const DAYS_PER_MONTH: [u8; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Returns `true` when `year` is a Gregorian leap year.
pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Returns the number of days in the given month of the given year.
///
/// February reports 29 days in leap years. Used to convert monthly-mean
/// precipitation rates (mm/day) into monthly accumulations (mm/month).
///
/// # Errors
///
/// Returns [`CalendarError::InvalidMonth`] if `month` is not in 1..=12.
pub fn days_in_month(year: i32, month: u8) -> Result<u8, CalendarError> {
    if !(1..=12).contains(&month) {
        return Err(CalendarError::InvalidMonth { month });
    }
    let days = DAYS_PER_MONTH[usize::from(month - 1)];
    if month == 2 && is_leap_year(year) {
        Ok(days + 1)
    } else {
        Ok(days)
    }
}

/// Returns the abbreviated English name of the given month ("Jan".."Dec").
///
/// # Errors
///
/// Returns [`CalendarError::InvalidMonth`] if `month` is not in 1..=12.
pub fn month_name(month: u8) -> Result<&'static str, CalendarError> {
    if !(1..=12).contains(&month) {
        return Err(CalendarError::InvalidMonth { month });
    }
    Ok(MONTH_NAMES[usize::from(month - 1)])
}
