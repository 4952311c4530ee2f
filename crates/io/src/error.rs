//! Error types for augur-io.

use std::path::PathBuf;

/// Error type for all fallible operations in the augur-io crate.
///
/// This enum covers I/O failures, format-specific errors from NetCDF,
/// calendar decoding issues, and data-model mismatches encountered when
/// reading the forecast and baseline datasets.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// Returned when a required file does not exist on disk.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path that could not be found.
        path: PathBuf,
    },

    /// Wraps an error originating from the NetCDF library.
    #[error("netcdf error: {reason}")]
    Netcdf {
        /// Description of the underlying NetCDF failure.
        reason: String,
    },

    /// Wraps an error originating from the augur-calendar crate.
    #[error("calendar error: {reason}")]
    Calendar {
        /// Description of the underlying calendar failure.
        reason: String,
    },

    /// Wraps an error originating from the augur-grid crate.
    #[error("grid error: {reason}")]
    Grid {
        /// Description of the underlying grid failure.
        reason: String,
    },

    /// Returned when none of the tried variable names is present in a file.
    #[error("variable '{name}' not found in {}", path.display())]
    MissingVariable {
        /// Name, or `/`-joined alias list, that was looked up.
        name: String,
        /// Path to the file that was inspected.
        path: PathBuf,
    },

    /// Returned when a dimension has an unexpected size or count.
    #[error("dimension '{name}' mismatch: expected {expected}, got {got}")]
    DimensionMismatch {
        /// Name of the dimension.
        name: String,
        /// Expected size.
        expected: usize,
        /// Actual size.
        got: usize,
    },

    /// Returned when a time axis or month label cannot be decoded.
    #[error("invalid time: {reason}")]
    InvalidTime {
        /// Description of the time decoding issue.
        reason: String,
    },

    /// Returned when two baseline files carry the same month label.
    #[error("duplicate baseline month '{label}' from {}", path.display())]
    DuplicateLabel {
        /// The repeated `YYYYMM` label.
        label: String,
        /// Path of the second file carrying it.
        path: PathBuf,
    },

    /// Returned when a later file of a multi-file set disagrees with the
    /// first file on an axis or grid.
    #[error("file {} does not match earlier input: {reason}", path.display())]
    Mismatch {
        /// Path of the offending file.
        path: PathBuf,
        /// Description of the disagreement.
        reason: String,
    },

    /// Returned when a reader is given an empty file list.
    #[error("no {what} files to read")]
    NoInput {
        /// Which dataset the reader was asked for.
        what: &'static str,
    },

    /// Returned when read data cannot be assembled into the expected
    /// array shape.
    #[error("array shape error: {reason}")]
    Shape {
        /// Description of the shape disagreement.
        reason: String,
    },
}

impl From<netcdf::Error> for IoError {
    fn from(e: netcdf::Error) -> Self {
        IoError::Netcdf {
            reason: e.to_string(),
        }
    }
}

impl From<augur_calendar::CalendarError> for IoError {
    fn from(e: augur_calendar::CalendarError) -> Self {
        IoError::Calendar {
            reason: e.to_string(),
        }
    }
}

impl From<augur_grid::GridError> for IoError {
    fn from(e: augur_grid::GridError) -> Self {
        IoError::Grid {
            reason: e.to_string(),
        }
    }
}

impl From<ndarray::ShapeError> for IoError {
    fn from(e: ndarray::ShapeError) -> Self {
        IoError::Shape {
            reason: e.to_string(),
        }
    }
}
