use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Augur seasonal precipitation forecast verification.
#[derive(Parser)]
#[command(
    name = "augur",
    version,
    about = "Seasonal precipitation forecast verification"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Score a model against the baseline and cache the results.
    Verify(VerifyArgs),
    /// Report cached metrics at the grid cell nearest a point.
    Lookup(LookupArgs),
    /// Print the bucket partition for a time scale.
    Buckets(BucketsArgs),
}

/// Arguments for the `verify` subcommand.
#[derive(clap::Args)]
pub struct VerifyArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "augur.toml")]
    pub config: PathBuf,

    /// Model name from the configuration's registry.
    #[arg(short, long)]
    pub model: String,

    /// Lead time in months ahead of issuance (exact halves by convention).
    #[arg(short, long)]
    pub lead: Option<f64>,

    /// Sweep every lead on the configured axis instead of one.
    #[arg(long, conflicts_with = "lead")]
    pub all_leads: bool,

    /// Score calendar quarters instead of single months.
    #[arg(long)]
    pub seasonal: bool,

    /// Recompute and overwrite even when a fresh cache entry exists.
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the `lookup` subcommand.
#[derive(clap::Args)]
pub struct LookupArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "augur.toml")]
    pub config: PathBuf,

    /// Model name from the configuration's registry.
    #[arg(short, long)]
    pub model: String,

    /// Lead time in months ahead of issuance.
    #[arg(short, long)]
    pub lead: f64,

    /// Read the seasonal cache entry instead of the monthly one.
    #[arg(long)]
    pub seasonal: bool,

    /// Latitude of the query point.
    #[arg(long)]
    pub lat: f64,

    /// Longitude of the query point, in either -180..180 or 0..360.
    #[arg(long)]
    pub lon: f64,
}

/// Arguments for the `buckets` subcommand.
#[derive(clap::Args)]
pub struct BucketsArgs {
    /// Time scale to list: monthly or seasonal.
    #[arg(default_value = "monthly")]
    pub time_scale: String,
}
