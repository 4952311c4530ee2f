//! Error types for the augur-grid crate.

/// Error type for all fallible operations in the augur-grid crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GridError {
    /// Returned when a coordinate axis is empty.
    #[error("axis {axis} is empty")]
    EmptyAxis {
        /// Name of the empty axis.
        axis: &'static str,
    },

    /// Returned when a coordinate axis is not strictly increasing.
    ///
    /// Axes are sorted during normalization, so this surfaces duplicate
    /// coordinates (or NaNs) rather than mere ordering.
    #[error("axis {axis} is not strictly increasing at index {index}")]
    NonMonotonicAxis {
        /// Name of the offending axis.
        axis: &'static str,
        /// First index where `axis[index] >= axis[index + 1]`.
        index: usize,
    },

    /// Returned when a longitude lies outside the normalized range.
    #[error("longitude {value} outside [-180, 180) (normalize before constructing the grid)")]
    LongitudeOutOfRange {
        /// The out-of-range longitude.
        value: f64,
    },

    /// Returned when an array's shape disagrees with its coordinate axes.
    #[error("{field}: expected shape {expected:?}, got {got:?}")]
    ShapeMismatch {
        /// Name of the mismatched array.
        field: &'static str,
        /// Shape implied by the coordinate axes.
        expected: Vec<usize>,
        /// Shape actually provided.
        got: Vec<usize>,
    },

    /// Returned when a requested lead time is not on the lead axis.
    #[error("lead {lead} not on the lead axis (available: {available:?})")]
    UnknownLead {
        /// The requested lead time.
        lead: f64,
        /// The lead values the series actually carries.
        available: Vec<f64>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_empty_axis() {
        let e = GridError::EmptyAxis { axis: "lat" };
        assert_eq!(e.to_string(), "axis lat is empty");
    }

    #[test]
    fn display_non_monotonic() {
        let e = GridError::NonMonotonicAxis {
            axis: "lon",
            index: 4,
        };
        assert_eq!(
            e.to_string(),
            "axis lon is not strictly increasing at index 4"
        );
    }

    #[test]
    fn display_longitude_out_of_range() {
        let e = GridError::LongitudeOutOfRange { value: 240.0 };
        assert_eq!(
            e.to_string(),
            "longitude 240 outside [-180, 180) (normalize before constructing the grid)"
        );
    }

    #[test]
    fn display_shape_mismatch() {
        let e = GridError::ShapeMismatch {
            field: "baseline",
            expected: vec![3, 10, 20],
            got: vec![3, 20, 10],
        };
        assert_eq!(
            e.to_string(),
            "baseline: expected shape [3, 10, 20], got [3, 20, 10]"
        );
    }

    #[test]
    fn display_unknown_lead() {
        let e = GridError::UnknownLead {
            lead: 2.0,
            available: vec![0.5, 1.5],
        };
        assert_eq!(
            e.to_string(),
            "lead 2 not on the lead axis (available: [0.5, 1.5])"
        );
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<GridError>();
    }
}
