//! Model forecast reader.
//!
//! Loads a multi-file NetCDF forecast archive into a [`ModelSeries`]. Each
//! file holds a batch of issuance records: variable `prec` on
//! `(S, L, M, Y, X)` or `(S, L, Y, X)`, where `S` counts months since a
//! fixed epoch, `L` is the lead axis, and `M` is an optional ensemble axis
//! that is averaged away at read.

use std::path::{Path, PathBuf};

use augur_calendar::{MODEL_EPOCH, YearMonth, days_in_month};
use augur_grid::{LatLonGrid, ModelSeries};
use ndarray::{Array3, Array4, Axis};
use tracing::{debug, info};

use crate::error::IoError;
use crate::netcdf_read;

// ---------------------------------------------------------------------------
// ModelReaderConfig
// ---------------------------------------------------------------------------

/// Configuration for reading the model forecast archive.
///
/// The [`Default`] implementation matches the upstream forecast convention:
/// variable `prec`, axes named `S`/`L`/`M`/`Y`/`X`, issuance counted in
/// months since 1960-01, and values arriving as mm/day rates.
#[derive(Debug, Clone)]
pub struct ModelReaderConfig {
    /// NetCDF variable name for forecast precipitation.
    precip_var: String,
    /// Aliases to try for the issuance time axis.
    time_aliases: Vec<String>,
    /// Aliases to try for the lead axis.
    lead_aliases: Vec<String>,
    /// Aliases to try when looking up latitude coordinates.
    lat_aliases: Vec<String>,
    /// Aliases to try when looking up longitude coordinates.
    lon_aliases: Vec<String>,
    /// Epoch used when a file's time axis declares no units.
    epoch: YearMonth,
    /// Whether to scale mm/day rates to mm/month accumulations.
    rate_to_accumulation: bool,
}

impl Default for ModelReaderConfig {
    fn default() -> Self {
        Self {
            precip_var: "prec".into(),
            time_aliases: vec!["S".into(), "time".into()],
            lead_aliases: vec!["L".into(), "lead".into()],
            lat_aliases: vec!["Y".into(), "lat".into(), "latitude".into(), "y".into()],
            lon_aliases: vec!["X".into(), "lon".into(), "longitude".into(), "x".into()],
            epoch: MODEL_EPOCH,
            rate_to_accumulation: true,
        }
    }
}

impl ModelReaderConfig {
    /// Set the precipitation variable name.
    pub fn with_precip_var(mut self, name: impl Into<String>) -> Self {
        self.precip_var = name.into();
        self
    }

    /// Set the epoch used when a file's time axis declares no units.
    pub fn with_epoch(mut self, epoch: YearMonth) -> Self {
        self.epoch = epoch;
        self
    }

    /// Enable or disable mm/day to mm/month scaling.
    pub fn with_rate_to_accumulation(mut self, scale: bool) -> Self {
        self.rate_to_accumulation = scale;
        self
    }
}

// ---------------------------------------------------------------------------
// read_model
// ---------------------------------------------------------------------------

/// One file's worth of issuance records, plus the axes it was read on.
struct FileBlock {
    leads: Vec<f64>,
    grid: LatLonGrid,
    records: Vec<(YearMonth, Array3<f64>)>,
}

/// Read a model forecast archive from `paths` into a [`ModelSeries`].
///
/// Records are sorted by issuance month across files, so the caller may
/// pass paths in any order. All files must agree on the lead axis and the
/// spatial grid; the first file fixes both.
///
/// # Errors
///
/// Returns [`IoError`] on missing files or variables, undecodable time
/// axes, cross-file axis disagreements, or shape mismatches.
pub fn read_model(paths: &[PathBuf], config: &ModelReaderConfig) -> Result<ModelSeries, IoError> {
    let (first, rest) = paths
        .split_first()
        .ok_or(IoError::NoInput { what: "model" })?;

    let block = read_model_file(first, config)?;
    let leads = block.leads;
    let grid = block.grid;
    let mut records = block.records;

    for path in rest {
        let block = read_model_file(path, config)?;
        if block.leads != leads {
            return Err(IoError::Mismatch {
                path: path.clone(),
                reason: "lead axis differs from the first file".to_string(),
            });
        }
        if block.grid != grid {
            return Err(IoError::Mismatch {
                path: path.clone(),
                reason: "spatial grid differs from the first file".to_string(),
            });
        }
        records.extend(block.records);
    }

    records.sort_by_key(|(time, _)| *time);

    let (n_lat, n_lon) = grid.shape();
    let mut times = Vec::with_capacity(records.len());
    let mut data = Array4::from_elem((records.len(), leads.len(), n_lat, n_lon), f64::NAN);
    for (k, (time, slab)) in records.into_iter().enumerate() {
        times.push(time);
        data.index_axis_mut(Axis(0), k).assign(&slab);
    }

    info!(
        files = paths.len(),
        records = times.len(),
        leads = leads.len(),
        lat = n_lat,
        lon = n_lon,
        "model series loaded"
    );

    Ok(ModelSeries::new(times, leads, grid, data)?)
}

/// Read one forecast file into issuance records on normalized axes.
fn read_model_file(path: &Path, config: &ModelReaderConfig) -> Result<FileBlock, IoError> {
    let file = netcdf_read::open_file(path)?;

    // -- Coordinates --------------------------------------------------------

    let lat_aliases: Vec<&str> = config.lat_aliases.iter().map(String::as_str).collect();
    let lon_aliases: Vec<&str> = config.lon_aliases.iter().map(String::as_str).collect();
    let lead_aliases: Vec<&str> = config.lead_aliases.iter().map(String::as_str).collect();
    let time_aliases: Vec<&str> = config.time_aliases.iter().map(String::as_str).collect();

    let lats = netcdf_read::read_1d_f64(&file, &lat_aliases, path)?;
    let lons = netcdf_read::read_1d_f64(&file, &lon_aliases, path)?;
    let leads = netcdf_read::read_1d_f64(&file, &lead_aliases, path)?;

    // -- Issuance axis ------------------------------------------------------

    // A units attribute on the time variable overrides the configured epoch.
    let time_var = netcdf_read::find_variable(&file, &time_aliases, path)?;
    let offsets = time_var.get_values::<f64, _>(..)?;
    let epoch = match netcdf_read::units_epoch(&time_var)? {
        Some(epoch) => epoch,
        None => config.epoch,
    };
    let times = netcdf_read::decode_offsets(epoch, &offsets)?;

    // -- Data variable ------------------------------------------------------

    let var = netcdf_read::find_variable(&file, &[config.precip_var.as_str()], path)?;
    let rank = var.dimensions().len();
    if rank != 4 && rank != 5 {
        return Err(IoError::DimensionMismatch {
            name: format!("{} dimensions", config.precip_var),
            expected: 5,
            got: rank,
        });
    }

    let (mut flat, shape) = netcdf_read::read_all_f64(&var)?;
    netcdf_read::check_dim("S", times.len(), shape[0])?;
    netcdf_read::check_dim("L", leads.len(), shape[1])?;
    netcdf_read::check_dim("Y", lats.len(), shape[rank - 2])?;
    netcdf_read::check_dim("X", lons.len(), shape[rank - 1])?;

    let ns = shape[0];
    let nl = shape[1];
    let ny = lats.len();
    let nx = lons.len();

    if rank == 5 {
        flat = ensemble_mean(&flat, [ns, nl, shape[2], ny, nx]);
    }

    // -- Unit conversion ----------------------------------------------------

    // mm/day rates become mm/month accumulations, scaled by the day count
    // of each record's issuance month across all leads.
    if config.rate_to_accumulation {
        let plane = nl * ny * nx;
        for (s, time) in times.iter().enumerate() {
            let days = f64::from(days_in_month(time.year(), time.month())?);
            for v in &mut flat[s * plane..(s + 1) * plane] {
                *v *= days;
            }
        }
    }

    // -- Normalized axes ----------------------------------------------------

    let (grid, lat_order, lon_order) = LatLonGrid::from_raw_axes(&lats, &lons)?;
    let mut stack = Array4::from_shape_vec((ns, nl, ny, nx), flat)?;
    if !netcdf_read::is_identity(&lat_order) {
        stack = stack.select(Axis(2), &lat_order);
    }
    if !netcdf_read::is_identity(&lon_order) {
        stack = stack.select(Axis(3), &lon_order);
    }

    let records: Vec<(YearMonth, Array3<f64>)> = times
        .into_iter()
        .zip(stack.axis_iter(Axis(0)))
        .map(|(time, slab)| (time, slab.to_owned()))
        .collect();

    debug!(path = %path.display(), records = ns, ensemble = rank == 5, "read model file");

    Ok(FileBlock {
        leads,
        grid,
        records,
    })
}

/// Collapse the ensemble axis of a flat `(S, L, M, Y, X)` block by NaN-aware
/// averaging, yielding flat `(S, L, Y, X)`.
fn ensemble_mean(data: &[f64], [ns, nl, nm, ny, nx]: [usize; 5]) -> Vec<f64> {
    let plane = ny * nx;
    let mut out = Vec::with_capacity(ns * nl * plane);

    for s in 0..ns {
        for l in 0..nl {
            let block = (s * nl + l) * nm;
            for cell in 0..plane {
                let mut sum = 0.0;
                let mut count = 0usize;
                for m in 0..nm {
                    let v = data[(block + m) * plane + cell];
                    if v.is_nan() {
                        continue;
                    }
                    sum += v;
                    count += 1;
                }
                out.push(if count == 0 {
                    f64::NAN
                } else {
                    sum / count as f64
                });
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ModelReaderConfig::default();
        assert_eq!(config.precip_var, "prec");
        assert_eq!(config.epoch, MODEL_EPOCH);
        assert!(config.rate_to_accumulation);
    }

    #[test]
    fn test_builder_overrides() {
        let epoch = YearMonth::new(2000, 1).unwrap();
        let config = ModelReaderConfig::default()
            .with_precip_var("pr")
            .with_epoch(epoch)
            .with_rate_to_accumulation(false);
        assert_eq!(config.precip_var, "pr");
        assert_eq!(config.epoch, epoch);
        assert!(!config.rate_to_accumulation);
    }

    #[test]
    fn ensemble_mean_collapses_the_member_axis() {
        // (S=1, L=2, M=2, Y=1, X=2): members [1,2]/[3,4] then [10,20]/[30,40].
        let data = vec![1.0, 2.0, 3.0, 4.0, 10.0, 20.0, 30.0, 40.0];
        let out = ensemble_mean(&data, [1, 2, 2, 1, 2]);
        assert_eq!(out, vec![2.0, 3.0, 20.0, 30.0]);
    }

    #[test]
    fn ensemble_mean_skips_nan_members() {
        // (S=1, L=1, M=3, Y=1, X=1): one member missing.
        let data = vec![2.0, f64::NAN, 4.0];
        let out = ensemble_mean(&data, [1, 1, 3, 1, 1]);
        assert_eq!(out, vec![3.0]);
    }

    #[test]
    fn ensemble_mean_of_all_nan_members_is_nan() {
        let data = vec![f64::NAN, f64::NAN];
        let out = ensemble_mean(&data, [1, 1, 2, 1, 1]);
        assert!(out[0].is_nan());
    }
}
