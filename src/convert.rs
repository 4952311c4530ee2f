//! Pure conversion functions: TOML config structs -> crate API config types.

use anyhow::{Result, bail};

use augur_calendar::{TimeScale, YearMonth};
use augur_grid::RegridTarget;
use augur_io::{BaselineReaderConfig, ModelReaderConfig};
use augur_verify::VerifyConfig;

use crate::config::{AugurConfig, ModelToml};

/// Parses a time scale name string into the corresponding enum variant.
pub fn parse_time_scale(s: &str) -> Result<TimeScale> {
    match s.to_lowercase().as_str() {
        "monthly" => Ok(TimeScale::Monthly),
        "seasonal" => Ok(TimeScale::Seasonal),
        other => bail!("unknown time scale: {other:?}"),
    }
}

/// Parses a regrid target name string into the corresponding enum variant.
pub fn parse_target(s: &str) -> Result<RegridTarget> {
    match s.to_lowercase().as_str() {
        "baseline" => Ok(RegridTarget::Baseline),
        "model" => Ok(RegridTarget::Model),
        other => bail!("unknown regrid target: {other:?}"),
    }
}

/// Parses a `YYYYMM` epoch label.
pub fn parse_epoch(s: &str) -> Result<YearMonth> {
    s.parse()
        .map_err(|e| anyhow::anyhow!("invalid epoch label {s:?}: {e}"))
}

/// Looks up a model in the registry, failing with the known names.
pub fn model_entry<'c>(config: &'c AugurConfig, name: &str) -> Result<&'c ModelToml> {
    config.models.get(name).ok_or_else(|| {
        let known: Vec<_> = config.models.keys().collect();
        anyhow::anyhow!("model {name:?} is not in the registry (known: {known:?})")
    })
}

/// Builds a [`ModelReaderConfig`] from a registry entry.
pub fn build_model_reader_config(model: &ModelToml) -> Result<ModelReaderConfig> {
    let mut cfg = ModelReaderConfig::default()
        .with_precip_var(&model.precip_var)
        .with_rate_to_accumulation(model.rate_to_accumulation);
    if let Some(epoch) = &model.epoch {
        cfg = cfg.with_epoch(parse_epoch(epoch)?);
    }
    Ok(cfg)
}

/// Builds a [`BaselineReaderConfig`] from the TOML baseline settings.
pub fn build_baseline_reader_config(config: &AugurConfig) -> BaselineReaderConfig {
    BaselineReaderConfig::default().with_precip_var(&config.baseline.precip_var)
}

/// Builds a [`VerifyConfig`] for one model and lead.
pub fn build_verify_config(
    config: &AugurConfig,
    model: &ModelToml,
    name: &str,
    lead: f64,
    time_scale: TimeScale,
) -> Result<VerifyConfig> {
    let mut cfg = VerifyConfig::new(name, lead)
        .with_time_scale(time_scale)
        .with_target(parse_target(&config.verify.target)?);
    if let Some(epoch) = &model.epoch {
        cfg = cfg.with_epoch(parse_epoch(epoch)?);
    }
    if let Some(region) = &config.region {
        cfg = cfg.with_region(region);
    }
    Ok(cfg)
}
