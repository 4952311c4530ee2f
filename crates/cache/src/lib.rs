//! Write-through persistence for verification results.
//!
//! One blob per `(model, lead, time_scale)` key holds the complete
//! bucket-label → metrics mapping for that configuration; there is no
//! per-bucket incremental persistence. Blobs are bincode-encoded and
//! written atomically (temp file + rename).
//!
//! Staleness is handled by fingerprint, not by trust: every blob embeds
//! an FNV-1a hash of the configuration that produced it, and a mismatch
//! reads back as a miss. A blob that fails to decode at all is a hard
//! error, since that points at a truncated or foreign file rather than
//! at drift.
//!
//! # Quick start
//!
//! ```ignore
//! use augur_cache::{CacheKey, MetricStore, fingerprint};
//!
//! let store = MetricStore::new("cache");
//! let key = CacheKey::new("ecmwf", 0.5, TimeScale::Monthly, fingerprint(&signature));
//! let results = store.get_or_compute(&key, || verifier.run())?;
//! ```

mod error;
mod key;
mod store;

pub use error::CacheError;
pub use key::{CacheKey, fingerprint};
pub use store::MetricStore;
