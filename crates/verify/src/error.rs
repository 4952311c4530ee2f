//! Error types for the augur-verify crate.

use augur_cache::CacheError;
use augur_grid::GridError;

/// Error type for all fallible operations in the augur-verify crate.
///
/// Covers configuration rejection, empty temporal selections, and
/// failures propagated from the alignment and cache layers.
#[derive(Debug, thiserror::Error)]
pub enum VerifyError {
    /// Returned when the configured model name cannot name a cache file.
    #[error("model name '{name}' is empty or not filesystem-safe")]
    InvalidModelName {
        /// The rejected name.
        name: String,
    },

    /// Returned when the configured lead is not a usable month offset.
    #[error("lead {lead} is not a finite non-negative month offset")]
    InvalidLead {
        /// The rejected lead.
        lead: f64,
    },

    /// Returned when a region tag is present but empty.
    #[error("region tag is empty")]
    EmptyRegion,

    /// Returned when one dataset has no records in a bucket's months.
    #[error("bucket {label}: no {side} records fall in its months")]
    EmptyBucket {
        /// Label of the empty bucket.
        label: String,
        /// Which dataset came up empty, `"model"` or `"baseline"`.
        side: &'static str,
    },

    /// Returned when the two datasets share no years inside a bucket.
    #[error("bucket {label}: model and baseline share no verification years")]
    NoOverlappingYears {
        /// Label of the affected bucket.
        label: String,
    },

    /// Spatial alignment error.
    #[error(transparent)]
    Grid(#[from] GridError),

    /// Cache layer error.
    #[error(transparent)]
    Cache(#[from] CacheError),
}
