//! # augur-calendar
//!
//! Pure year-month arithmetic and calendar bucketing for forecast
//! verification.
//!
//! Model time axes encode forecast issuance as whole months since a fixed
//! epoch (1960-01 by convention); the baseline encodes time as 6-digit
//! `YYYYMM` labels. This crate decodes both into [`YearMonth`] and groups
//! records into named month buckets.
//!
//! ## Architecture
//!
//! ```mermaid
//! graph LR
//!     A["months-since-epoch (f64)"] -->|"resolve_offset()"| B["YearMonth"]
//!     C["YYYYMM label"] -->|"FromStr"| B
//!     B -->|"bucket_years()"| D["year -> record indices"]
//!     E["TimeScale"] -->|".partition()"| F["BucketPartition"]
//!     F -->|"buckets()"| G["Bucket (months, label)"]
//! ```
//!
//! ## Quick Start
//!
//! ```ignore
//! use augur_calendar::{BucketPartition, TimeScale, YearMonth, resolve_offset};
//!
//! // Decode a model time value against the 1960-01 epoch
//! let epoch = YearMonth::new(1960, 1)?;
//! let issued = resolve_offset(epoch, 744.0)?; // 2022-01
//!
//! // Group a time axis into calendar quarters
//! let partition = TimeScale::Seasonal.partition();
//! for bucket in partition.buckets() {
//!     let by_year = augur_calendar::bucket_years(&times, bucket.months());
//! }
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `year_month` | Year-month type, offset resolution, YYYYMM labels |
//! | `month` | Month name and day-count tables, leap years |
//! | `bucket` | Bucket partitions and year grouping |
//! | `error` | Error types |

mod bucket;
mod error;
mod month;
mod year_month;

pub use bucket::{Bucket, BucketPartition, TimeScale, bucket_years};
pub use error::CalendarError;
pub use month::{days_in_month, is_leap_year, month_name};
pub use year_month::{MODEL_EPOCH, YearMonth, resolve_offset};
