//! Verification metrics over aligned model/baseline stacks.
//!
//! Consumes an [`AlignedPair`](augur_grid::AlignedPair) and produces one
//! [`MetricBundle`] per temporal bucket: five spatial fields scored cell
//! by cell over the shared year axis.
//!
//! | metric         | definition                                         |
//! |----------------|----------------------------------------------------|
//! | `bias_ratio`   | model mean / baseline mean                         |
//! | `nrmse`        | RMSE over years / baseline range over years        |
//! | `acc`          | anomaly correlation coefficient across years       |
//! | `baseline_avg` | baseline mean over years                           |
//! | `model_avg`    | model mean over years                              |
//!
//! Scoring never fails: degenerate cells (flat or zero climatology, too
//! few paired years) carry NaN in the affected fields and every bundle
//! keeps the full grid shape.
//!
//! # Quick start
//!
//! ```ignore
//! use augur_metrics::{Metric, compute_metrics};
//!
//! let bundle = compute_metrics(&pair, 0.5);
//! let acc = bundle.field(Metric::Acc);
//! println!("median-ish cell: {}", acc[[acc.nrows() / 2, acc.ncols() / 2]]);
//! ```

mod acc;
mod bundle;
mod engine;

pub use acc::anomaly_correlation;
pub use bundle::{Metric, MetricBundle, NearestCell};
pub use engine::compute_metrics;
