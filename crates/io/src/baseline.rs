//! Baseline observation reader.
//!
//! Loads a directory of per-month NetCDF files into a [`GriddedSeries`].
//! Each file holds one month of the gridded baseline and is named by its
//! 6-digit `YYYYMM` label (e.g. `202301.nc`), variable `precip` on
//! `(y, x)`, already accumulated to mm/month by the preprocessing layer.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use augur_calendar::YearMonth;
use augur_grid::{GriddedSeries, LatLonGrid};
use ndarray::{Array2, Array3, Axis};
use tracing::{debug, info};

use crate::error::IoError;
use crate::netcdf_read;

/// Configuration for reading the baseline archive.
#[derive(Debug, Clone)]
pub struct BaselineReaderConfig {
    /// NetCDF variable name for baseline precipitation.
    precip_var: String,
    /// Aliases to try when looking up latitude coordinates.
    lat_aliases: Vec<String>,
    /// Aliases to try when looking up longitude coordinates.
    lon_aliases: Vec<String>,
}

impl Default for BaselineReaderConfig {
    fn default() -> Self {
        Self {
            precip_var: "precip".into(),
            lat_aliases: vec!["y".into(), "lat".into(), "latitude".into(), "Y".into()],
            lon_aliases: vec!["x".into(), "lon".into(), "longitude".into(), "X".into()],
        }
    }
}

impl BaselineReaderConfig {
    /// Set the precipitation variable name.
    pub fn with_precip_var(mut self, name: impl Into<String>) -> Self {
        self.precip_var = name.into();
        self
    }
}

/// Read a baseline archive from `paths` into a [`GriddedSeries`].
///
/// Months are sorted by label, so the caller may pass paths in any order.
/// All files must share one spatial grid; the first file fixes it.
///
/// # Errors
///
/// Returns [`IoError`] on missing files or variables, unparseable month
/// labels, duplicate labels, or cross-file grid disagreements.
pub fn read_baseline(
    paths: &[PathBuf],
    config: &BaselineReaderConfig,
) -> Result<GriddedSeries, IoError> {
    let (first, rest) = paths
        .split_first()
        .ok_or(IoError::NoInput { what: "baseline" })?;

    let first_label = month_label(first)?;
    let (grid, first_field) = read_baseline_file(first, config)?;

    let mut months: BTreeMap<YearMonth, Array2<f64>> = BTreeMap::new();
    months.insert(first_label, first_field);

    for path in rest {
        let label = month_label(path)?;
        let (file_grid, field) = read_baseline_file(path, config)?;
        if file_grid != grid {
            return Err(IoError::Mismatch {
                path: path.clone(),
                reason: "spatial grid differs from the first file".to_string(),
            });
        }
        if months.insert(label, field).is_some() {
            return Err(IoError::DuplicateLabel {
                label: label.to_string(),
                path: path.clone(),
            });
        }
    }

    let (n_lat, n_lon) = grid.shape();
    let mut times = Vec::with_capacity(months.len());
    let mut data = Array3::from_elem((months.len(), n_lat, n_lon), f64::NAN);
    for (k, (label, field)) in months.into_iter().enumerate() {
        times.push(label);
        data.index_axis_mut(Axis(0), k).assign(&field);
    }

    info!(
        files = paths.len(),
        months = times.len(),
        lat = n_lat,
        lon = n_lon,
        "baseline series loaded"
    );

    Ok(GriddedSeries::new(times, grid, data)?)
}

/// Parse a file's `YYYYMM` month label from its stem.
fn month_label(path: &Path) -> Result<YearMonth, IoError> {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| IoError::InvalidTime {
            reason: format!("file {} has no readable stem", path.display()),
        })?;

    stem.parse::<YearMonth>().map_err(|_| IoError::InvalidTime {
        reason: format!("file stem '{stem}' is not a YYYYMM month label"),
    })
}

/// Read one baseline month into a field on normalized axes.
fn read_baseline_file(
    path: &Path,
    config: &BaselineReaderConfig,
) -> Result<(LatLonGrid, Array2<f64>), IoError> {
    let file = netcdf_read::open_file(path)?;

    let lat_aliases: Vec<&str> = config.lat_aliases.iter().map(String::as_str).collect();
    let lon_aliases: Vec<&str> = config.lon_aliases.iter().map(String::as_str).collect();

    let lats = netcdf_read::read_1d_f64(&file, &lat_aliases, path)?;
    let lons = netcdf_read::read_1d_f64(&file, &lon_aliases, path)?;

    let var = netcdf_read::find_variable(&file, &[config.precip_var.as_str()], path)?;
    let rank = var.dimensions().len();
    if rank != 2 && rank != 3 {
        return Err(IoError::DimensionMismatch {
            name: format!("{} dimensions", config.precip_var),
            expected: 2,
            got: rank,
        });
    }

    let (flat, shape) = netcdf_read::read_all_f64(&var)?;
    // A leading length-1 time dimension is tolerated and squeezed.
    if rank == 3 && shape[0] != 1 {
        return Err(IoError::DimensionMismatch {
            name: format!("{} leading (time)", config.precip_var),
            expected: 1,
            got: shape[0],
        });
    }
    netcdf_read::check_dim("y", lats.len(), shape[rank - 2])?;
    netcdf_read::check_dim("x", lons.len(), shape[rank - 1])?;

    let (grid, lat_order, lon_order) = LatLonGrid::from_raw_axes(&lats, &lons)?;
    let mut field = Array2::from_shape_vec((lats.len(), lons.len()), flat)?;
    if !netcdf_read::is_identity(&lat_order) {
        field = field.select(Axis(0), &lat_order);
    }
    if !netcdf_read::is_identity(&lon_order) {
        field = field.select(Axis(1), &lon_order);
    }

    debug!(path = %path.display(), "read baseline month");

    Ok((grid, field))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BaselineReaderConfig::default();
        assert_eq!(config.precip_var, "precip");
    }

    #[test]
    fn test_with_precip_var() {
        let config = BaselineReaderConfig::default().with_precip_var("ppt");
        assert_eq!(config.precip_var, "ppt");
    }

    #[test]
    fn label_from_stem() {
        let label = month_label(Path::new("/data/baseline/202301.nc")).unwrap();
        assert_eq!(label, YearMonth::new(2023, 1).unwrap());
    }

    #[test]
    fn non_label_stem_is_rejected() {
        let err = month_label(Path::new("/data/baseline/readme.nc")).unwrap_err();
        assert!(matches!(err, IoError::InvalidTime { .. }));
        assert!(err.to_string().contains("readme"));
    }

    #[test]
    fn short_stem_is_rejected() {
        let err = month_label(Path::new("20231.nc")).unwrap_err();
        assert!(matches!(err, IoError::InvalidTime { .. }));
    }

    #[test]
    fn month_13_stem_is_rejected() {
        let err = month_label(Path::new("202313.nc")).unwrap_err();
        assert!(matches!(err, IoError::InvalidTime { .. }));
    }
}
