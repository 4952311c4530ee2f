//! Configuration for a verification run.

use augur_cache::{CacheKey, fingerprint};
use augur_calendar::{BucketPartition, MODEL_EPOCH, TimeScale, YearMonth};
use augur_grid::RegridTarget;

use crate::error::VerifyError;

/// Configuration for one verification run.
///
/// Names the model, the lead to score, the temporal partition, and the
/// regrid direction. Everything here participates in the cache
/// fingerprint (see [`signature`](VerifyConfig::signature)), so two runs
/// with different configurations can never alias each other's results.
///
/// Use the builder methods to customise parameters.
///
/// # Example
///
/// ```
/// use augur_calendar::TimeScale;
/// use augur_verify::VerifyConfig;
///
/// let config = VerifyConfig::new("ecmwf", 0.5)
///     .with_time_scale(TimeScale::Seasonal);
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct VerifyConfig {
    /// Model name, as registered in the run configuration.
    model: String,
    /// Lead time in months ahead of issuance.
    lead: f64,
    /// Which canonical partition to bucket with.
    time_scale: TimeScale,
    /// Custom partition overriding the canonical one, if any.
    partition: Option<BucketPartition>,
    /// Reference month of the model's months-since-epoch time axis.
    epoch: YearMonth,
    /// Which dataset's grid to align onto.
    target: RegridTarget,
    /// Free-form region tag, when verifying a spatial subset.
    region: Option<String>,
}

impl VerifyConfig {
    /// Creates a configuration for the given model and lead.
    ///
    /// Defaults: monthly time scale, canonical partition, the 1960-01
    /// epoch, baseline-targeted alignment, no region tag.
    pub fn new(model: impl Into<String>, lead: f64) -> Self {
        Self {
            model: model.into(),
            lead,
            time_scale: TimeScale::Monthly,
            partition: None,
            epoch: MODEL_EPOCH,
            target: RegridTarget::Baseline,
            region: None,
        }
    }

    /// Sets the time scale (and drops any custom partition).
    pub fn with_time_scale(mut self, time_scale: TimeScale) -> Self {
        self.time_scale = time_scale;
        self.partition = None;
        self
    }

    /// Sets a custom bucket partition, keeping the configured time scale
    /// for file naming.
    pub fn with_partition(mut self, partition: BucketPartition) -> Self {
        self.partition = Some(partition);
        self
    }

    /// Sets the time-axis epoch.
    pub fn with_epoch(mut self, epoch: YearMonth) -> Self {
        self.epoch = epoch;
        self
    }

    /// Sets the regrid direction.
    pub fn with_target(mut self, target: RegridTarget) -> Self {
        self.target = target;
        self
    }

    /// Sets the region tag.
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Returns the model name.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Returns the lead time in months.
    pub fn lead(&self) -> f64 {
        self.lead
    }

    /// Returns the time scale.
    pub fn time_scale(&self) -> TimeScale {
        self.time_scale
    }

    /// Returns the partition buckets are drawn from: the custom one if
    /// set, otherwise the time scale's canonical partition.
    pub fn partition(&self) -> BucketPartition {
        self.partition
            .clone()
            .unwrap_or_else(|| self.time_scale.partition())
    }

    /// Returns the time-axis epoch.
    pub fn epoch(&self) -> YearMonth {
        self.epoch
    }

    /// Returns the regrid direction.
    pub fn target(&self) -> RegridTarget {
        self.target
    }

    /// Returns the region tag, if any.
    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    /// Validates this configuration.
    ///
    /// Returns an error if the model name is empty or contains characters
    /// unfit for a file name, if the lead is negative or non-finite, or
    /// if a region tag is present but empty.
    pub fn validate(&self) -> Result<(), VerifyError> {
        let name_ok = !self.model.is_empty()
            && self
                .model
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'));
        if !name_ok {
            return Err(VerifyError::InvalidModelName {
                name: self.model.clone(),
            });
        }
        if !self.lead.is_finite() || self.lead < 0.0 {
            return Err(VerifyError::InvalidLead { lead: self.lead });
        }
        if let Some(region) = &self.region
            && region.is_empty()
        {
            return Err(VerifyError::EmptyRegion);
        }
        Ok(())
    }

    /// Canonical textual form of everything that shapes a result.
    ///
    /// Fingerprinted into the cache key, so a change to the partition,
    /// epoch, regrid direction, or region invalidates old blobs even
    /// though none of those appear in the cache file name.
    pub fn signature(&self) -> String {
        format!(
            "model={};lead={};scale={};partition={};epoch={};target={};region={}",
            self.model,
            self.lead,
            self.time_scale,
            self.partition().signature(),
            self.epoch,
            self.target,
            self.region.as_deref().unwrap_or("-"),
        )
    }

    /// Derives the cache identity of a run under this configuration.
    ///
    /// The file name comes from `(model, lead, time_scale)`; the
    /// fingerprint hashes the full [`signature`](VerifyConfig::signature),
    /// so cached results survive only as long as the configuration that
    /// produced them. Requires no datasets, so a cached run can be looked
    /// up without touching the archives.
    pub fn cache_key(&self) -> CacheKey {
        CacheKey::new(
            &self.model,
            self.lead,
            self.time_scale,
            fingerprint(&self.signature()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = VerifyConfig::new("ecmwf", 0.5);
        assert_eq!(cfg.model(), "ecmwf");
        assert_eq!(cfg.lead(), 0.5);
        assert_eq!(cfg.time_scale(), TimeScale::Monthly);
        assert_eq!(cfg.partition().len(), 12);
        assert_eq!(cfg.epoch(), MODEL_EPOCH);
        assert_eq!(cfg.target(), RegridTarget::Baseline);
        assert_eq!(cfg.region(), None);
    }

    #[test]
    fn test_builder_chaining() {
        let cfg = VerifyConfig::new("gfdl", 1.5)
            .with_time_scale(TimeScale::Seasonal)
            .with_target(RegridTarget::Model)
            .with_region("amu_darya");
        assert_eq!(cfg.time_scale(), TimeScale::Seasonal);
        assert_eq!(cfg.partition().len(), 4);
        assert_eq!(cfg.target(), RegridTarget::Model);
        assert_eq!(cfg.region(), Some("amu_darya"));
    }

    #[test]
    fn test_custom_partition_overrides_canonical() {
        let winter = BucketPartition::new([(vec![12, 1, 2], "DJF".to_string())]).unwrap();
        let cfg = VerifyConfig::new("ecmwf", 0.5).with_partition(winter);
        assert_eq!(cfg.partition().len(), 1);
        assert!(cfg.signature().contains("DJF:12,1,2"));

        // switching time scale resets to the canonical partition
        let cfg = cfg.with_time_scale(TimeScale::Monthly);
        assert_eq!(cfg.partition().len(), 12);
    }

    #[test]
    fn test_validate_ok() {
        assert!(VerifyConfig::new("ecmwf", 0.5).validate().is_ok());
        assert!(
            VerifyConfig::new("NCEP-CFSv2", 11.5)
                .with_region("chirchik")
                .validate()
                .is_ok()
        );
    }

    #[test]
    fn test_validate_rejects_bad_model_names() {
        for name in ["", "a/b", "a b", "../x"] {
            let err = VerifyConfig::new(name, 0.5).validate().unwrap_err();
            assert!(
                matches!(err, VerifyError::InvalidModelName { .. }),
                "name {name:?} should be rejected, got {err:?}"
            );
        }
    }

    #[test]
    fn test_validate_rejects_bad_leads() {
        for lead in [-0.5, f64::NAN, f64::INFINITY] {
            let err = VerifyConfig::new("ecmwf", lead).validate().unwrap_err();
            assert!(matches!(err, VerifyError::InvalidLead { .. }));
        }
    }

    #[test]
    fn test_validate_rejects_empty_region() {
        let err = VerifyConfig::new("ecmwf", 0.5)
            .with_region("")
            .validate()
            .unwrap_err();
        assert!(matches!(err, VerifyError::EmptyRegion));
    }

    #[test]
    fn test_signature_tracks_every_field() {
        let base = VerifyConfig::new("ecmwf", 0.5);
        let variants = [
            VerifyConfig::new("gfdl", 0.5),
            VerifyConfig::new("ecmwf", 1.5),
            base.clone().with_time_scale(TimeScale::Seasonal),
            base.clone()
                .with_epoch(YearMonth::new(1981, 1).unwrap()),
            base.clone().with_target(RegridTarget::Model),
            base.clone().with_region("fergana"),
        ];
        for variant in &variants {
            assert_ne!(base.signature(), variant.signature());
        }
        assert_eq!(base.signature(), base.clone().signature());
    }

    #[test]
    fn test_cache_key_matches_signature() {
        let cfg = VerifyConfig::new("ecmwf", 0.5).with_region("fergana");
        let key = cfg.cache_key();
        assert_eq!(key.file_name(), "ecmwf_lead0.5_metrics.bin");
        assert_eq!(key.fingerprint(), fingerprint(&cfg.signature()));
    }
}
