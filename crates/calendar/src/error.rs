//! Error types for the augur-calendar crate.

/// Error type for all fallible operations in the augur-calendar crate.
///
/// This enum covers validation failures for month numbers, year-month
/// labels, months-since-epoch offsets, and bucket partition definitions.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalendarError {
    /// Returned when a month number is outside the valid range 1..=12.
    #[error("invalid month: {month} (must be 1..=12)")]
    InvalidMonth {
        /// The invalid month number that was provided.
        month: u8,
    },

    /// Returned when a year-month label cannot be parsed as `YYYYMM`.
    #[error("invalid year-month label: {text:?} (expected 6 digits, YYYYMM)")]
    InvalidLabel {
        /// The text that failed to parse.
        text: String,
    },

    /// Returned when a months-since-epoch offset is negative or not finite.
    ///
    /// Offsets resolve to dates at or after the epoch; a value before the
    /// epoch is a configuration error and is reported, never clipped.
    #[error("invalid month offset: {offset} (must be a finite, non-negative month count)")]
    InvalidOffset {
        /// The offending offset value as read from the time axis.
        offset: f64,
    },

    /// Returned when a bucket partition contains no buckets.
    #[error("bucket partition is empty")]
    EmptyPartition,

    /// Returned when a bucket within a partition names no months.
    #[error("bucket {label:?} contains no months")]
    EmptyBucket {
        /// Label of the empty bucket.
        label: String,
    },

    /// Returned when two buckets in a partition claim the same month.
    #[error("month {month} appears in buckets {first:?} and {second:?} (buckets must be disjoint)")]
    OverlappingBuckets {
        /// The month claimed twice.
        month: u8,
        /// Label of the bucket that claimed the month first.
        first: String,
        /// Label of the bucket that claimed the month again.
        second: String,
    },

    /// Returned when two buckets in a partition share a label.
    #[error("duplicate bucket label: {label:?}")]
    DuplicateLabel {
        /// The repeated label.
        label: String,
    },
}
