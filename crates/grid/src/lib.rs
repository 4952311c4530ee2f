//! Gridded data model and spatial alignment for forecast verification.
//!
//! Holds the in-memory forms of the two input datasets and reconciles
//! their coordinate conventions: the model grid runs 0..360 in longitude
//! with its own axis order, the baseline runs -180..180 north-up. Both are
//! normalized at construction; alignment then gap-fills and bilinearly
//! regrids one onto the other.
//!
//! # Pipeline
//!
//! ```text
//!  ┌──────────────┐     ┌───────────────┐     ┌──────────────────┐
//!  │  LatLonGrid   │────▶│   fill_gaps   │────▶│  regrid_bilinear  │
//!  │  (normalize,  │     │ (ffill/bfill  │     │  (source ▶ target │
//!  │   sort axes)  │     │  per axis)    │     │   coordinates)    │
//!  └──────────────┘     └───────────────┘     └──────────────────┘
//!                                                      │
//!                                             AlignedPair + coverage
//! ```
//!
//! # Quick start
//!
//! ```ignore
//! use augur_grid::{LatLonGrid, RegridTarget, align};
//!
//! let (grid, lat_order, lon_order) = LatLonGrid::from_raw_axes(&lats, &lons)?;
//! let pair = align(years, model, &model_grid, baseline, &baseline_grid,
//!                  RegridTarget::Baseline)?;
//! assert!(pair.coverage() > 0.0);
//! ```

mod align;
mod error;
mod fill;
mod grid;
mod interp;
mod series;

pub use align::{AlignedPair, RegridTarget, align};
pub use error::GridError;
pub use fill::fill_gaps;
pub use grid::{LatLonGrid, normalize_longitude};
pub use interp::{coverage_fraction, regrid_bilinear};
pub use series::{GriddedSeries, ModelSeries};
