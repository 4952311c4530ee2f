//! Latitude/longitude coordinate frame.

use serde::{Deserialize, Serialize};

use crate::error::GridError;

/// Maps a longitude onto the normalized range [-180, 180).
///
/// Model grids customarily run 0..360 east of Greenwich; the baseline runs
/// -180..180. Normalization is idempotent: a longitude already in range
/// maps to itself.
pub fn normalize_longitude(lon: f64) -> f64 {
    (lon + 180.0).rem_euclid(360.0) - 180.0
}

/// A shared latitude/longitude coordinate frame.
///
/// Both axes are strictly ascending and longitudes lie in [-180, 180);
/// every gridded array in the pipeline is indexed (…, lat, lon) against
/// one of these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatLonGrid {
    lats: Vec<f64>,
    lons: Vec<f64>,
}

impl LatLonGrid {
    /// Creates a grid from already-normalized, ascending axes.
    ///
    /// # Errors
    ///
    /// Returns [`GridError`] if either axis is empty or not strictly
    /// increasing, or if a longitude lies outside [-180, 180).
    pub fn new(lats: Vec<f64>, lons: Vec<f64>) -> Result<Self, GridError> {
        check_axis("lat", &lats)?;
        check_axis("lon", &lons)?;
        for &lon in &lons {
            if !(-180.0..180.0).contains(&lon) {
                return Err(GridError::LongitudeOutOfRange { value: lon });
            }
        }
        Ok(Self { lats, lons })
    }

    /// Creates a grid from axes as read from a file, in any order and any
    /// longitude convention.
    ///
    /// Longitudes are normalized and both axes sorted ascending. Returns
    /// the grid together with the permutation applied to each axis, so the
    /// caller can reorder data rows/columns to match
    /// (e.g. `data.select(Axis(k), &order)`).
    ///
    /// # Errors
    ///
    /// Returns [`GridError`] if an axis is empty or, after sorting, still
    /// not strictly increasing (duplicate or NaN coordinates).
    pub fn from_raw_axes(
        lats: &[f64],
        lons: &[f64],
    ) -> Result<(Self, Vec<usize>, Vec<usize>), GridError> {
        let (sorted_lats, lat_order) = sort_axis(lats);
        let normalized: Vec<f64> = lons.iter().copied().map(normalize_longitude).collect();
        let (sorted_lons, lon_order) = sort_axis(&normalized);
        let grid = Self::new(sorted_lats, sorted_lons)?;
        Ok((grid, lat_order, lon_order))
    }

    /// Returns the latitude axis, ascending.
    pub fn lats(&self) -> &[f64] {
        &self.lats
    }

    /// Returns the longitude axis, ascending, in [-180, 180).
    pub fn lons(&self) -> &[f64] {
        &self.lons
    }

    /// Returns `(n_lat, n_lon)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.lats.len(), self.lons.len())
    }

    /// Returns the `(lat_index, lon_index)` of the grid cell nearest to a
    /// query point, nearest-neighbor on each axis independently.
    ///
    /// The query longitude is normalized first, so 0..360 coordinates work.
    /// Points outside the grid clamp to the nearest edge cell.
    pub fn nearest(&self, lat: f64, lon: f64) -> (usize, usize) {
        (
            nearest_index(&self.lats, lat),
            nearest_index(&self.lons, normalize_longitude(lon)),
        )
    }
}

fn check_axis(axis: &'static str, values: &[f64]) -> Result<(), GridError> {
    if values.is_empty() {
        return Err(GridError::EmptyAxis { axis });
    }
    for (index, pair) in values.windows(2).enumerate() {
        if !(pair[0] < pair[1]) {
            return Err(GridError::NonMonotonicAxis { axis, index });
        }
    }
    Ok(())
}

fn sort_axis(values: &[f64]) -> (Vec<f64>, Vec<usize>) {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| {
        values[a]
            .partial_cmp(&values[b])
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    let sorted = order.iter().map(|&i| values[i]).collect();
    (sorted, order)
}

fn nearest_index(axis: &[f64], value: f64) -> usize {
    let hi = axis.partition_point(|&c| c < value);
    if hi == 0 {
        0
    } else if hi >= axis.len() {
        axis.len() - 1
    } else if value - axis[hi - 1] <= axis[hi] - value {
        hi - 1
    } else {
        hi
    }
}
