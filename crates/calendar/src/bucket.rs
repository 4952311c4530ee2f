//! Calendar bucket partitions for monthly and seasonal grouping.

use std::collections::BTreeMap;

use crate::error::CalendarError;
use crate::month::MONTH_NAMES;
use crate::year_month::YearMonth;

/// Quarter definitions for the seasonal time scale.
const SEASONS: [([u8; 3], &str); 4] = [
    ([1, 2, 3], "Jan-Mar"),
    ([4, 5, 6], "Apr-Jun"),
    ([7, 8, 9], "Jul-Sep"),
    ([10, 11, 12], "Oct-Dec"),
];

/// A named set of calendar months, e.g. `{1, 2, 3} -> "Jan-Mar"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bucket {
    months: Vec<u8>,
    label: String,
}

impl Bucket {
    /// Returns the calendar months (1..=12) belonging to this bucket.
    pub fn months(&self) -> &[u8] {
        &self.months
    }

    /// Returns the bucket label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns `true` when the given calendar month belongs to this bucket.
    pub fn contains(&self, month: u8) -> bool {
        self.months.contains(&month)
    }
}

/// An ordered, disjoint set of [`Bucket`]s.
///
/// Every record belongs to at most one bucket; the union of all buckets
/// need not cover the full year (a single-month partition ignores the
/// other eleven months).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketPartition {
    buckets: Vec<Bucket>,
}

impl BucketPartition {
    /// Creates a partition from `(months, label)` pairs, preserving order.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError`] if the partition is empty, a bucket names
    /// no months or an out-of-range month, two buckets claim the same
    /// month, or two buckets share a label.
    pub fn new<I>(buckets: I) -> Result<Self, CalendarError>
    where
        I: IntoIterator<Item = (Vec<u8>, String)>,
    {
        let mut seen: BTreeMap<u8, String> = BTreeMap::new();
        let mut out = Vec::new();
        for (months, label) in buckets {
            if months.is_empty() {
                return Err(CalendarError::EmptyBucket { label });
            }
            if out.iter().any(|b: &Bucket| b.label == label) {
                return Err(CalendarError::DuplicateLabel { label });
            }
            for &month in &months {
                if !(1..=12).contains(&month) {
                    return Err(CalendarError::InvalidMonth { month });
                }
                if let Some(first) = seen.get(&month) {
                    return Err(CalendarError::OverlappingBuckets {
                        month,
                        first: first.clone(),
                        second: label,
                    });
                }
                seen.insert(month, label.clone());
            }
            out.push(Bucket { months, label });
        }
        if out.is_empty() {
            return Err(CalendarError::EmptyPartition);
        }
        Ok(Self { buckets: out })
    }

    /// Returns the twelve single-month buckets, labelled "Jan" through "Dec".
    pub fn monthly() -> Self {
        let buckets = MONTH_NAMES
            .iter()
            .enumerate()
            .map(|(i, name)| Bucket {
                months: vec![(i + 1) as u8],
                label: (*name).to_string(),
            })
            .collect();
        Self { buckets }
    }

    /// Returns the four calendar-quarter buckets, "Jan-Mar" through "Oct-Dec".
    pub fn seasonal() -> Self {
        let buckets = SEASONS
            .iter()
            .map(|(months, label)| Bucket {
                months: months.to_vec(),
                label: (*label).to_string(),
            })
            .collect();
        Self { buckets }
    }

    /// Returns the buckets in partition order.
    pub fn buckets(&self) -> &[Bucket] {
        &self.buckets
    }

    /// Returns the bucket labels in partition order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.buckets.iter().map(|b| b.label.as_str())
    }

    /// Returns the bucket with the given label, if any.
    pub fn get(&self, label: &str) -> Option<&Bucket> {
        self.buckets.iter().find(|b| b.label == label)
    }

    /// Returns the bucket containing the given calendar month, if any.
    pub fn bucket_for_month(&self, month: u8) -> Option<&Bucket> {
        self.buckets.iter().find(|b| b.contains(month))
    }

    /// Returns the number of buckets.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// Returns `true` when the partition has no buckets.
    ///
    /// Never true for a validated partition; present for completeness.
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Returns a canonical textual form of the partition,
    /// e.g. `"Jan-Mar:1,2,3|Apr-Jun:4,5,6"`.
    ///
    /// Used in cache fingerprints and log output; two partitions with the
    /// same buckets in the same order produce the same signature.
    pub fn signature(&self) -> String {
        self.buckets
            .iter()
            .map(|b| {
                let months = b
                    .months
                    .iter()
                    .map(|m| m.to_string())
                    .collect::<Vec<_>>()
                    .join(",");
                format!("{}:{}", b.label, months)
            })
            .collect::<Vec<_>>()
            .join("|")
    }
}

/// The two canonical bucket partitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeScale {
    /// Twelve single-month buckets.
    Monthly,
    /// Four calendar-quarter buckets.
    Seasonal,
}

impl TimeScale {
    /// Returns the canonical partition for this time scale.
    pub fn partition(self) -> BucketPartition {
        match self {
            Self::Monthly => BucketPartition::monthly(),
            Self::Seasonal => BucketPartition::seasonal(),
        }
    }
}

impl std::fmt::Display for TimeScale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Monthly => write!(f, "monthly"),
            Self::Seasonal => write!(f, "seasonal"),
        }
    }
}

/// Groups the records of a time axis by calendar year, restricted to the
/// given months.
///
/// Returns a map from year to the indices of records whose month is in
/// `months`, in axis order. Records outside `months` are omitted; a year
/// with no matching records has no entry.
pub fn bucket_years(times: &[YearMonth], months: &[u8]) -> BTreeMap<i32, Vec<usize>> {
    let mut by_year: BTreeMap<i32, Vec<usize>> = BTreeMap::new();
    for (idx, time) in times.iter().enumerate() {
        if months.contains(&time.month()) {
            by_year.entry(time.year()).or_default().push(idx);
        }
    }
    by_year
}
