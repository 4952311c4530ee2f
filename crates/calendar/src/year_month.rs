//! Calendar year-month with offset arithmetic.

use std::fmt;
use std::str::FromStr;

use crate::error::CalendarError;

/// A calendar month with year context, e.g. January 1960.
///
/// Displays as the 6-digit `YYYYMM` label used by the baseline dataset's
/// time axis, and parses back from the same form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct YearMonth {
    year: i32,
    month: u8,
}

/// January 1960, the reference month of the model time axis.
///
/// Forecast files encode issuance as whole months since this date; it is
/// the default epoch wherever one is configurable.
pub const MODEL_EPOCH: YearMonth = YearMonth {
    year: 1960,
    month: 1,
};

impl PartialOrd for YearMonth {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for YearMonth {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.year, self.month).cmp(&(other.year, other.month))
    }
}

impl YearMonth {
    /// Creates a new `YearMonth` from a year and a month number.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidMonth`] if `month` is not in 1..=12.
    pub fn new(year: i32, month: u8) -> Result<Self, CalendarError> {
        if !(1..=12).contains(&month) {
            return Err(CalendarError::InvalidMonth { month });
        }
        Ok(Self { year, month })
    }

    /// Returns the year.
    pub fn year(self) -> i32 {
        self.year
    }

    /// Returns the month (1..=12).
    pub fn month(self) -> u8 {
        self.month
    }

    /// Returns the year-month `months` whole months after this one.
    ///
    /// December advances into January of the following year; adding 12
    /// lands on the same month one year later.
    pub fn add_months(self, months: u32) -> Self {
        let zero_based = i64::from(self.year) * 12 + i64::from(self.month - 1) + i64::from(months);
        Self {
            year: zero_based.div_euclid(12) as i32,
            month: (zero_based.rem_euclid(12) + 1) as u8,
        }
    }

    /// Returns the number of whole months from `earlier` to `self`.
    ///
    /// Negative when `self` precedes `earlier`.
    pub fn months_since(self, earlier: Self) -> i64 {
        (i64::from(self.year) * 12 + i64::from(self.month))
            - (i64::from(earlier.year) * 12 + i64::from(earlier.month))
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CalendarError::InvalidLabel {
            text: s.to_string(),
        };
        if s.len() != 6 || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let year: i32 = s[..4].parse().map_err(|_| invalid())?;
        let month: u8 = s[4..].parse().map_err(|_| invalid())?;
        Self::new(year, month)
    }
}

/// Resolves a raw months-since-epoch offset to a calendar year-month.
///
/// Offsets arrive as floating-point values from the model's time axis and
/// are truncated to whole months. A negative or non-finite offset would
/// resolve before the epoch and is rejected.
///
/// # Errors
///
/// Returns [`CalendarError::InvalidOffset`] if `offset` is negative, NaN,
/// or infinite.
pub fn resolve_offset(epoch: YearMonth, offset: f64) -> Result<YearMonth, CalendarError> {
    if !offset.is_finite() || offset < 0.0 {
        return Err(CalendarError::InvalidOffset { offset });
    }
    Ok(epoch.add_months(offset as u32))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_valid() {
        let ym = YearMonth::new(1960, 1).unwrap();
        assert_eq!(ym.year(), 1960);
        assert_eq!(ym.month(), 1);
    }

    #[test]
    fn model_epoch_is_january_1960() {
        assert_eq!(MODEL_EPOCH, YearMonth::new(1960, 1).unwrap());
        assert_eq!(MODEL_EPOCH.to_string(), "196001");
    }

    #[test]
    fn new_invalid_month() {
        assert_eq!(
            YearMonth::new(1960, 0).unwrap_err(),
            CalendarError::InvalidMonth { month: 0 }
        );
        assert_eq!(
            YearMonth::new(1960, 13).unwrap_err(),
            CalendarError::InvalidMonth { month: 13 }
        );
    }

    #[test]
    fn add_months_within_year() {
        let ym = YearMonth::new(1960, 1).unwrap().add_months(5);
        assert_eq!((ym.year(), ym.month()), (1960, 6));
    }

    #[test]
    fn add_months_crosses_year() {
        let ym = YearMonth::new(1960, 11).unwrap().add_months(3);
        assert_eq!((ym.year(), ym.month()), (1961, 2));
    }

    #[test]
    fn add_months_multi_year() {
        // 744 months = 62 years: the first forecast issuance of the 2022
        // archive relative to the 1960-01 epoch.
        let ym = YearMonth::new(1960, 1).unwrap().add_months(744);
        assert_eq!((ym.year(), ym.month()), (2022, 1));
    }

    #[test]
    fn add_zero_is_identity() {
        let ym = YearMonth::new(1982, 7).unwrap();
        assert_eq!(ym.add_months(0), ym);
    }

    #[test]
    fn months_since() {
        let epoch = YearMonth::new(1960, 1).unwrap();
        let later = YearMonth::new(1961, 3).unwrap();
        assert_eq!(later.months_since(epoch), 14);
        assert_eq!(epoch.months_since(later), -14);
        assert_eq!(epoch.months_since(epoch), 0);
    }

    #[test]
    fn ordering() {
        let a = YearMonth::new(1999, 12).unwrap();
        let b = YearMonth::new(2000, 1).unwrap();
        let c = YearMonth::new(2000, 2).unwrap();
        assert!(a < b);
        assert!(b < c);
    }

    #[test]
    fn display_label() {
        assert_eq!(YearMonth::new(1960, 1).unwrap().to_string(), "196001");
        assert_eq!(YearMonth::new(2021, 12).unwrap().to_string(), "202112");
    }

    #[test]
    fn parse_roundtrip() {
        let ym: YearMonth = "198207".parse().unwrap();
        assert_eq!((ym.year(), ym.month()), (1982, 7));
        assert_eq!(ym.to_string(), "198207");
    }

    #[test]
    fn parse_rejects_malformed() {
        for text in ["1982-7", "19820", "1982071", "abcdef", ""] {
            assert_eq!(
                text.parse::<YearMonth>().unwrap_err(),
                CalendarError::InvalidLabel {
                    text: text.to_string(),
                }
            );
        }
    }

    #[test]
    fn parse_rejects_month_out_of_range() {
        assert_eq!(
            "198213".parse::<YearMonth>().unwrap_err(),
            CalendarError::InvalidMonth { month: 13 }
        );
    }

    #[test]
    fn resolve_offset_truncates() {
        let epoch = YearMonth::new(1960, 1).unwrap();
        let ym = resolve_offset(epoch, 14.0).unwrap();
        assert_eq!((ym.year(), ym.month()), (1961, 3));
        // fractional offsets truncate toward the containing month
        let ym = resolve_offset(epoch, 14.9).unwrap();
        assert_eq!((ym.year(), ym.month()), (1961, 3));
    }

    #[test]
    fn resolve_offset_rejects_negative() {
        let epoch = YearMonth::new(1960, 1).unwrap();
        assert_eq!(
            resolve_offset(epoch, -1.0).unwrap_err(),
            CalendarError::InvalidOffset { offset: -1.0 }
        );
    }

    #[test]
    fn resolve_offset_rejects_non_finite() {
        let epoch = YearMonth::new(1960, 1).unwrap();
        assert!(resolve_offset(epoch, f64::NAN).is_err());
        assert!(resolve_offset(epoch, f64::INFINITY).is_err());
    }

    #[test]
    fn copy_and_hash() {
        fn assert_copy<T: Copy>() {}
        fn assert_hash<T: std::hash::Hash>() {}
        assert_copy::<YearMonth>();
        assert_hash::<YearMonth>();
    }
}
