//! Verify command: score a forecast model against the baseline archive.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde_json::json;
use tracing::{info, info_span};

use augur_cache::MetricStore;
use augur_calendar::TimeScale;
use augur_io::{read_baseline, read_model};
use augur_verify::Verifier;

use crate::cli::VerifyArgs;
use crate::config::AugurConfig;
use crate::convert;

/// Run the verification pipeline for one model, over one lead or all of them.
pub fn run(args: VerifyArgs) -> Result<()> {
    let _cmd = info_span!("verify").entered();
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
    let leads = if args.all_leads {
        config.verify.leads.clone()
    } else {
        match args.lead {
            Some(lead) => vec![lead],
            None => bail!("pass --lead or --all-leads"),
        }
    };

    // 2. Read the model forecast archive
    let model_files = nc_files(&model_toml.dir)?;
    let reader_cfg = convert::build_model_reader_config(model_toml)?;
    info!(path = %model_toml.dir.display(), files = model_files.len(), "reading model archive");
    let model = read_model(&model_files, reader_cfg)
        .with_context(|| format!("failed to read model archive: {}", model_toml.dir.display()))?;

    // 3. Read the baseline archive
    let baseline_dir = config.baseline.dir.as_ref().ok_or_else(|| {
        anyhow::anyhow!("no baseline path: set [baseline].dir in config")
    })?;
    let baseline_files = nc_files(baseline_dir)?;
    let baseline_cfg = convert::build_baseline_reader_config(&config);
    info!(path = %baseline_dir.display(), files = baseline_files.len(), "reading baseline archive");
    let baseline = read_baseline(&baseline_files, baseline_cfg)
        .with_context(|| format!("failed to read baseline archive: {}", baseline_dir.display()))?;

    // 4. Score each requested lead, caching results
    let store = MetricStore::new(&config.cache.dir);
    for lead in leads {
        let verify_cfg =
            convert::build_verify_config(&config, model_toml, &args.model, lead, time_scale)?;
        let verifier = Verifier::new(verify_cfg, model.clone(), baseline.clone())
            .context("invalid verification configuration")?;
        let key = verifier.cache_key();

        let results = if args.force {
            let results = verifier.run().with_context(|| format!("lead {lead} failed"))?;
            store.store(&key, &results).context("failed to cache results")?;
            results
        } else {
            verifier
                .run_cached(&store)
                .with_context(|| format!("lead {lead} failed"))?
        };

        for (label, bundle) in &results {
            info!(
                bucket = label.as_str(),
                nan_share = bundle.nan_share(),
                "bucket scored"
            );
        }

        // 5. Emit a run summary on stdout
        let summary = json!({
            "model": args.model,
            "lead": lead,
            "time_scale": time_scale.to_string(),
            "target": verifier.config().target().to_string(),
            "buckets": results.keys().collect::<Vec<_>>(),
            "cache": store.path_for(&key),
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }

    Ok(())
}

/// Collect the `.nc` files of a directory in name order.
fn nc_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("failed to list directory: {}", dir.display()))?;
    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().is_some_and(|ext| ext == "nc"))
        .collect();
    files.sort();
    if files.is_empty() {
        bail!("no .nc files in {}", dir.display());
    }
    Ok(files)
}
