//! Bilinear interpolation between coordinate grids.

use ndarray::{Array2, ArrayView2};

/// Bracketing source index and fractional weight for one target coordinate.
///
/// `None` when the coordinate falls outside the source axis (no
/// extrapolation). A single-point axis brackets only its own coordinate.
fn bracket(axis: &[f64], target: f64) -> Option<(usize, f64)> {
    let (first, last) = (*axis.first()?, *axis.last()?);
    if target < first || target > last {
        return None;
    }
    if axis.len() == 1 {
        return Some((0, 0.0));
    }
    let hi = axis.partition_point(|&c| c < target).clamp(1, axis.len() - 1);
    let lo = hi - 1;
    let w = (target - axis[lo]) / (axis[hi] - axis[lo]);
    Some((lo, w))
}

/// Bilinear interpolation of `field` (shaped `(lat, lon)` on the source
/// axes) onto the target coordinate set.
///
/// Linear in each spatial dimension; target points outside the source
/// axes, or with any NaN corner, become NaN. Callers close interior gaps
/// first (see [`crate::fill_gaps`]) so that NaN corners mark genuine
/// domain edges rather than holes.
pub fn regrid_bilinear(
    field: ArrayView2<'_, f64>,
    source_lats: &[f64],
    source_lons: &[f64],
    target_lats: &[f64],
    target_lons: &[f64],
) -> Array2<f64> {
    let lat_slots: Vec<Option<(usize, f64)>> =
        target_lats.iter().map(|&t| bracket(source_lats, t)).collect();
    let lon_slots: Vec<Option<(usize, f64)>> =
        target_lons.iter().map(|&t| bracket(source_lons, t)).collect();

    let mut out = Array2::from_elem((target_lats.len(), target_lons.len()), f64::NAN);
    for (i, lat_slot) in lat_slots.iter().enumerate() {
        let Some((i0, dy)) = *lat_slot else { continue };
        let i1 = (i0 + 1).min(source_lats.len() - 1);
        for (j, lon_slot) in lon_slots.iter().enumerate() {
            let Some((j0, dx)) = *lon_slot else { continue };
            let j1 = (j0 + 1).min(source_lons.len() - 1);

            let v00 = field[[i0, j0]];
            let v01 = field[[i0, j1]];
            let v10 = field[[i1, j0]];
            let v11 = field[[i1, j1]];

            let south = v00 * (1.0 - dx) + v01 * dx;
            let north = v10 * (1.0 - dx) + v11 * dx;
            out[[i, j]] = south * (1.0 - dy) + north * dy;
        }
    }
    out
}

/// Fraction of target grid cells that fall inside the source axes' bounds.
///
/// The aligner's overlap diagnostic: 1.0 means every target cell can be
/// interpolated, 0.0 means the grids do not overlap at all and the
/// regridded field is entirely NaN.
pub fn coverage_fraction(
    source_lats: &[f64],
    source_lons: &[f64],
    target_lats: &[f64],
    target_lons: &[f64],
) -> f64 {
    let lat_in = target_lats
        .iter()
        .filter(|&&t| bracket(source_lats, t).is_some())
        .count();
    let lon_in = target_lons
        .iter()
        .filter(|&&t| bracket(source_lons, t).is_some())
        .count();
    let total = target_lats.len() * target_lons.len();
    if total == 0 {
        return 0.0;
    }
    (lat_in * lon_in) as f64 / total as f64
}
