//! Seasonal forecast verification against an observed climatology.
//!
//! Ties the temporal, spatial, and scoring layers into one pipeline:
//!
//! ```text
//!  ModelSeries ──select lead──▶ ┌─────────────────────────────┐
//!                               │ per bucket (parallel):      │
//!  BucketPartition ───────────▶ │   select records            │
//!                               │   average within bucket-year│──▶ VerificationSet
//!  GriddedSeries ─────────────▶ │   intersect years           │    (label → MetricBundle)
//!                               │   align grids, score cells  │
//!                               └─────────────────────────────┘
//! ```
//!
//! A [`Verifier`] owns its inputs and configuration; there is no ambient
//! state. [`Verifier::run_cached`] adds write-through persistence keyed
//! by [`Verifier::cache_key`].
//!
//! # Quick start
//!
//! ```ignore
//! use augur_cache::MetricStore;
//! use augur_calendar::TimeScale;
//! use augur_verify::{Verifier, VerifyConfig};
//!
//! let config = VerifyConfig::new("ecmwf", 0.5).with_time_scale(TimeScale::Seasonal);
//! let verifier = Verifier::new(config, model, baseline)?;
//! let results = verifier.run_cached(&MetricStore::new("cache"))?;
//! for (label, bundle) in &results {
//!     println!("{label}: nan share {:.2}", bundle.nan_share());
//! }
//! ```

mod config;
mod error;
mod group;
mod verifier;

pub use config::VerifyConfig;
pub use error::VerifyError;
pub use group::TemporalGroup;
pub use verifier::{VerificationSet, Verifier};
