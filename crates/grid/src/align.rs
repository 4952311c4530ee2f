//! Alignment of a model/baseline pair onto one coordinate frame.

use ndarray::{Array2, Array3, Axis};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::GridError;
use crate::fill::fill_gaps;
use crate::grid::LatLonGrid;
use crate::interp::{coverage_fraction, regrid_bilinear};

/// Which dataset's grid the pair is aligned onto.
///
/// Baseline-targeted alignment treats the observed climatology as ground
/// truth (the verification workflow); model-targeted alignment serves map
/// products on the forecast's native grid. Both are explicit modes; there
/// is no implicit default direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RegridTarget {
    /// Interpolate the baseline onto the model's grid.
    Model,
    /// Interpolate the model onto the baseline's grid.
    Baseline,
}

impl std::fmt::Display for RegridTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Model => write!(f, "model"),
            Self::Baseline => write!(f, "baseline"),
        }
    }
}

/// A model/baseline pair of year-resolved stacks on identical coordinates.
#[derive(Debug, Clone)]
pub struct AlignedPair {
    years: Vec<i32>,
    grid: LatLonGrid,
    model: Array3<f64>,
    baseline: Array3<f64>,
    target: RegridTarget,
    coverage: f64,
}

impl AlignedPair {
    /// Returns the shared year axis.
    pub fn years(&self) -> &[i32] {
        &self.years
    }

    /// Returns the shared coordinate frame.
    pub fn grid(&self) -> &LatLonGrid {
        &self.grid
    }

    /// Returns the model stack, shaped `(year, lat, lon)`.
    pub fn model(&self) -> &Array3<f64> {
        &self.model
    }

    /// Returns the baseline stack, shaped `(year, lat, lon)`.
    pub fn baseline(&self) -> &Array3<f64> {
        &self.baseline
    }

    /// Returns which grid the pair was aligned onto.
    pub fn target(&self) -> RegridTarget {
        self.target
    }

    /// Returns the fraction of target cells inside the source grid's
    /// bounds, in [0, 1].
    ///
    /// Distinguishes "whole-grid missing" (0.0, non-overlapping domains)
    /// from edge effects (slightly below 1.0). Alignment never fails on
    /// low coverage; downstream statistics see NaN there.
    pub fn coverage(&self) -> f64 {
        self.coverage
    }
}

/// Aligns two year-resolved stacks onto the grid named by `target`.
///
/// Both stacks are gap-filled (forward/backward along each spatial axis,
/// see [`fill_gaps`]), then the source stack is interpolated year by year
/// onto the target grid. The year axes must already be intersected; the
/// two stacks share it.
///
/// # Errors
///
/// Returns [`GridError::ShapeMismatch`] when a stack disagrees with its
/// grid or the shared year axis. Non-overlapping grids are not an error;
/// see [`AlignedPair::coverage`].
pub fn align(
    years: Vec<i32>,
    mut model: Array3<f64>,
    model_grid: &LatLonGrid,
    mut baseline: Array3<f64>,
    baseline_grid: &LatLonGrid,
    target: RegridTarget,
) -> Result<AlignedPair, GridError> {
    check_stack("model", &model, &years, model_grid)?;
    check_stack("baseline", &baseline, &years, baseline_grid)?;

    fill_gaps(&mut model);
    fill_gaps(&mut baseline);

    let (source_grid, target_grid) = match target {
        RegridTarget::Model => (baseline_grid, model_grid),
        RegridTarget::Baseline => (model_grid, baseline_grid),
    };
    let coverage = coverage_fraction(
        source_grid.lats(),
        source_grid.lons(),
        target_grid.lats(),
        target_grid.lons(),
    );
    debug!(
        target = %target,
        coverage,
        source_shape = ?source_grid.shape(),
        target_shape = ?target_grid.shape(),
        "aligning grids"
    );

    let (model, baseline) = match target {
        RegridTarget::Model => {
            let regridded = regrid_stack(&baseline, baseline_grid, model_grid);
            (model, regridded)
        }
        RegridTarget::Baseline => {
            let regridded = regrid_stack(&model, model_grid, baseline_grid);
            (regridded, baseline)
        }
    };

    Ok(AlignedPair {
        years,
        grid: target_grid.clone(),
        model,
        baseline,
        target,
        coverage,
    })
}

fn check_stack(
    field: &'static str,
    stack: &Array3<f64>,
    years: &[i32],
    grid: &LatLonGrid,
) -> Result<(), GridError> {
    let (n_lat, n_lon) = grid.shape();
    let expected = [years.len(), n_lat, n_lon];
    if stack.shape() != expected {
        return Err(GridError::ShapeMismatch {
            field,
            expected: expected.to_vec(),
            got: stack.shape().to_vec(),
        });
    }
    Ok(())
}

fn regrid_stack(stack: &Array3<f64>, source: &LatLonGrid, target: &LatLonGrid) -> Array3<f64> {
    let (n_lat, n_lon) = target.shape();
    let mut out = Array3::from_elem((stack.len_of(Axis(0)), n_lat, n_lon), f64::NAN);
    for (year_slice, mut out_slice) in stack.axis_iter(Axis(0)).zip(out.axis_iter_mut(Axis(0))) {
        let regridded: Array2<f64> = regrid_bilinear(
            year_slice,
            source.lats(),
            source.lons(),
            target.lats(),
            target.lons(),
        );
        out_slice.assign(&regridded);
    }
    out
}
