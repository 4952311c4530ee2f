use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Deserialize;

/// Top-level Augur configuration.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AugurConfig {
    /// Optional region tag, folded into every cache fingerprint.
    #[serde(default)]
    pub region: Option<String>,

    /// Cache settings.
    #[serde(default)]
    pub cache: CacheToml,

    /// Baseline archive settings.
    #[serde(default)]
    pub baseline: BaselineToml,

    /// Model registry: name to archive settings.
    #[serde(default)]
    pub models: BTreeMap<String, ModelToml>,

    /// Verification settings.
    #[serde(default)]
    pub verify: VerifyToml,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CacheToml {
    /// Directory holding one blob per cached run.
    #[serde(default = "default_cache_dir")]
    pub dir: PathBuf,
}

impl Default for CacheToml {
    fn default() -> Self {
        Self {
            dir: default_cache_dir(),
        }
    }
}

fn default_cache_dir() -> PathBuf {
    PathBuf::from("cache")
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct BaselineToml {
    /// Directory of per-month `YYYYMM.nc` files.
    pub dir: Option<PathBuf>,
    #[serde(default = "default_baseline_var")]
    pub precip_var: String,
}

fn default_baseline_var() -> String {
    "precip".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelToml {
    /// Directory of forecast NetCDF files.
    pub dir: PathBuf,
    #[serde(default = "default_model_var")]
    pub precip_var: String,
    /// Epoch override as a `YYYYMM` label, for files without time units.
    #[serde(default)]
    pub epoch: Option<String>,
    /// Whether file values are mm/day rates needing mm/month scaling.
    #[serde(default = "default_true")]
    pub rate_to_accumulation: bool,
}

fn default_model_var() -> String {
    "prec".to_string()
}
fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VerifyToml {
    /// Lead axis swept by `--all-leads`.
    #[serde(default = "default_leads")]
    pub leads: Vec<f64>,
    /// Which dataset's grid to align onto: "baseline" or "model".
    #[serde(default = "default_target")]
    pub target: String,
}

impl Default for VerifyToml {
    fn default() -> Self {
        Self {
            leads: default_leads(),
            target: default_target(),
        }
    }
}

fn default_leads() -> Vec<f64> {
    (0..12).map(|k| f64::from(k) + 0.5).collect()
}
fn default_target() -> String {
    "baseline".to_string()
}
