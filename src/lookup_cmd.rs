//! Lookup command: report cached metrics at the cell nearest a point.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use serde_json::json;
use tracing::{info, info_span};

use augur_cache::MetricStore;
use augur_calendar::TimeScale;
use augur_metrics::NearestCell;
use augur_verify::VerificationSet;

use crate::cli::LookupArgs;
use crate::config::AugurConfig;
use crate::convert;

/// Look up cached verification results for one point, without touching
/// the NetCDF archives.
pub fn run(args: LookupArgs) -> Result<()> {
    let _cmd = info_span!("lookup").entered();
    // 1. Load project TOML
    let toml_str = std::fs::read_to_string(&args.config)
        .with_context(|| format!("failed to read config file: {}", args.config.display()))?;
    let config: AugurConfig = toml::from_str(&toml_str).context("failed to parse TOML config")?;

    let model_toml = convert::model_entry(&config, &args.model)?;
    let time_scale = if args.seasonal {
        TimeScale::Seasonal
    } else {
        TimeScale::Monthly
    };

    // 2. Rebuild the cache identity of the requested run
    let verify_cfg =
        convert::build_verify_config(&config, model_toml, &args.model, args.lead, time_scale)?;
    verify_cfg.validate()?;
    let key = verify_cfg.cache_key();

    // 3. Load the cached verification set
    let store = MetricStore::new(&config.cache.dir);
    let results: VerificationSet = store
        .load(&key)
        .context("failed to read cache")?
        .ok_or_else(|| {
            anyhow::anyhow!(
                "no cached verification for model {:?} lead {}: run `augur verify` first",
                args.model,
                args.lead,
            )
        })?;
    info!(buckets = results.len(), "cached run loaded");

    // 4. Pick the nearest cell in every bucket
    let report: BTreeMap<&String, NearestCell> = results
        .iter()
        .map(|(label, bundle)| (label, bundle.nearest_cell(args.lat, args.lon)))
        .collect();

    let summary = json!({
        "model": args.model,
        "lead": args.lead,
        "lat": args.lat,
        "lon": args.lon,
        "buckets": report,
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}
