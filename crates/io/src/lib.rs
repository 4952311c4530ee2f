//! # augur-io
//!
//! Read the two gridded precipitation datasets from NetCDF: the multi-file
//! model forecast archive and the per-month baseline archive. Bridges
//! external file formats into the in-memory series types of `augur-grid`,
//! normalizing axes, units, and missing values on the way in.

mod baseline;
mod error;
mod model;
mod netcdf_read;

pub use baseline::{BaselineReaderConfig, read_baseline};
pub use error::IoError;
pub use model::{ModelReaderConfig, read_model};
