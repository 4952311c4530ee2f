//! The bucket-by-bucket verification pipeline.

use std::collections::BTreeMap;

use augur_cache::{CacheKey, MetricStore};
use augur_calendar::{Bucket, bucket_years};
use augur_grid::{GriddedSeries, ModelSeries, align};
use augur_metrics::{MetricBundle, compute_metrics};
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::config::VerifyConfig;
use crate::error::VerifyError;
use crate::group::build_group;

/// Bucket label to scored fields, the product of one verification run.
pub type VerificationSet = BTreeMap<String, MetricBundle>;

/// Scores one model against one baseline under a fixed configuration.
///
/// Owns its two inputs outright; nothing is read from ambient state, so
/// two verifiers over different datasets can run side by side. Buckets
/// are independent and scored in parallel, with results collected into a
/// `BTreeMap` so the output is identical to sequential evaluation.
pub struct Verifier {
    config: VerifyConfig,
    model: ModelSeries,
    baseline: GriddedSeries,
}

impl Verifier {
    /// Creates a verifier, validating the configuration eagerly.
    ///
    /// # Errors
    ///
    /// Returns the first configuration defect found; see
    /// [`VerifyConfig::validate`].
    pub fn new(
        config: VerifyConfig,
        model: ModelSeries,
        baseline: GriddedSeries,
    ) -> Result<Self, VerifyError> {
        config.validate()?;
        Ok(Self {
            config,
            model,
            baseline,
        })
    }

    /// Returns the configuration this verifier runs under.
    pub fn config(&self) -> &VerifyConfig {
        &self.config
    }

    /// Derives the cache identity of this run; see
    /// [`VerifyConfig::cache_key`].
    pub fn cache_key(&self) -> CacheKey {
        self.config.cache_key()
    }

    /// Runs the full pipeline: select the lead, then for every bucket in
    /// the partition select records, average within bucket-years, align
    /// the two stacks, and score.
    ///
    /// # Errors
    ///
    /// Returns [`VerifyError::EmptyBucket`] or
    /// [`VerifyError::NoOverlappingYears`] when a bucket has nothing to
    /// verify, and propagates lead-selection and alignment errors.
    pub fn run(&self) -> Result<VerificationSet, VerifyError> {
        let lead_slice = self.model.select_lead(self.config.lead())?;
        let partition = self.config.partition();
        info!(
            model = self.config.model(),
            lead = self.config.lead(),
            scale = %self.config.time_scale(),
            buckets = partition.len(),
            "verifying"
        );

        let scored: Result<Vec<(String, MetricBundle)>, VerifyError> = partition
            .buckets()
            .par_iter()
            .map(|bucket| {
                let bundle = self.score_bucket(&lead_slice, bucket)?;
                Ok((bucket.label().to_string(), bundle))
            })
            .collect();
        Ok(scored?.into_iter().collect())
    }

    /// Write-through wrapper around [`run`](Verifier::run): a cache hit
    /// returns the stored set verbatim, a miss computes every bucket and
    /// persists the complete mapping as one blob before returning it.
    pub fn run_cached(&self, store: &MetricStore) -> Result<VerificationSet, VerifyError> {
        store.get_or_compute(&self.cache_key(), || self.run())
    }

    fn score_bucket(
        &self,
        model: &GriddedSeries,
        bucket: &Bucket,
    ) -> Result<MetricBundle, VerifyError> {
        let model_years = bucket_years(model.times(), bucket.months());
        if model_years.is_empty() {
            return Err(VerifyError::EmptyBucket {
                label: bucket.label().to_string(),
                side: "model",
            });
        }
        let baseline_years = bucket_years(self.baseline.times(), bucket.months());
        if baseline_years.is_empty() {
            return Err(VerifyError::EmptyBucket {
                label: bucket.label().to_string(),
                side: "baseline",
            });
        }

        let years: Vec<i32> = model_years
            .keys()
            .filter(|year| baseline_years.contains_key(year))
            .copied()
            .collect();
        if years.is_empty() {
            return Err(VerifyError::NoOverlappingYears {
                label: bucket.label().to_string(),
            });
        }
        debug!(
            bucket = bucket.label(),
            years = years.len(),
            "scoring bucket"
        );

        let model_group = build_group(bucket.label(), &years, &model_years, model.data());
        let baseline_group =
            build_group(bucket.label(), &years, &baseline_years, self.baseline.data());

        let pair = align(
            years,
            model_group.into_data(),
            model.grid(),
            baseline_group.into_data(),
            self.baseline.grid(),
            self.config.target(),
        )?;
        if pair.coverage() < 1.0 {
            warn!(
                bucket = bucket.label(),
                coverage = pair.coverage(),
                "source grid does not cover the whole target; uncovered cells score NaN"
            );
        }
        Ok(compute_metrics(&pair, self.config.lead()))
    }
}
