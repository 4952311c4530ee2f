//! Per-cell scoring of an aligned pair.

use augur_grid::AlignedPair;
use augur_stats::{nan_mean, nan_range, rmse};
use ndarray::{Array2, s};

use crate::acc::anomaly_correlation;
use crate::bundle::MetricBundle;

/// Scores every cell of an aligned pair over its year axis.
///
/// Total over its inputs: degenerate cells (zero baseline mean, flat
/// baseline, too few paired years, all-NaN lanes) come back as NaN in the
/// affected fields rather than failing the bucket. Cells are independent;
/// one bad lane never contaminates its neighbors.
pub fn compute_metrics(pair: &AlignedPair, lead: f64) -> MetricBundle {
    let grid = pair.grid().clone();
    let (n_lat, n_lon) = grid.shape();
    let n_years = pair.years().len();

    let mut bias_ratio = Array2::from_elem((n_lat, n_lon), f64::NAN);
    let mut nrmse = Array2::from_elem((n_lat, n_lon), f64::NAN);
    let mut acc = Array2::from_elem((n_lat, n_lon), f64::NAN);
    let mut baseline_avg = Array2::from_elem((n_lat, n_lon), f64::NAN);
    let mut model_avg = Array2::from_elem((n_lat, n_lon), f64::NAN);

    let mut model_lane: Vec<f64> = Vec::with_capacity(n_years);
    let mut baseline_lane: Vec<f64> = Vec::with_capacity(n_years);

    for i in 0..n_lat {
        for j in 0..n_lon {
            model_lane.clear();
            model_lane.extend(pair.model().slice(s![.., i, j]).iter().copied());
            baseline_lane.clear();
            baseline_lane.extend(pair.baseline().slice(s![.., i, j]).iter().copied());

            let b_avg = nan_mean(&baseline_lane);
            let m_avg = nan_mean(&model_lane);
            baseline_avg[[i, j]] = b_avg;
            model_avg[[i, j]] = m_avg;

            // zero climatology makes the ratio meaningless, not infinite
            bias_ratio[[i, j]] = if b_avg == 0.0 { f64::NAN } else { m_avg / b_avg };

            let range = nan_range(&baseline_lane);
            let err = rmse(&baseline_lane, &model_lane);
            nrmse[[i, j]] = if range == 0.0 { f64::NAN } else { err / range };

            acc[[i, j]] = anomaly_correlation(&model_lane, &baseline_lane);
        }
    }

    MetricBundle::new(
        lead,
        pair.target(),
        grid,
        bias_ratio,
        nrmse,
        acc,
        baseline_avg,
        model_avg,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundle::Metric;
    use approx::assert_relative_eq;
    use augur_grid::{LatLonGrid, RegridTarget, align};
    use ndarray::Array3;

    fn point_grid() -> LatLonGrid {
        LatLonGrid::new(vec![40.0], vec![-120.0]).unwrap()
    }

    fn point_pair(model: Vec<f64>, baseline: Vec<f64>) -> AlignedPair {
        let years: Vec<i32> = (0..model.len() as i32).map(|y| 2000 + y).collect();
        let n = years.len();
        let grid = point_grid();
        align(
            years,
            Array3::from_shape_vec((n, 1, 1), model).unwrap(),
            &grid,
            Array3::from_shape_vec((n, 1, 1), baseline).unwrap(),
            &grid,
            RegridTarget::Baseline,
        )
        .unwrap()
    }

    #[test]
    fn constant_baseline_yields_unit_bias_and_nan_spread() {
        // three years of a perfect-mean forecast against a flat climatology
        let pair = point_pair(vec![9.0, 10.0, 11.0], vec![10.0, 10.0, 10.0]);
        let bundle = compute_metrics(&pair, 0.5);

        assert_relative_eq!(bundle.field(Metric::BaselineAvg)[[0, 0]], 10.0);
        assert_relative_eq!(bundle.field(Metric::ModelAvg)[[0, 0]], 10.0);
        assert_relative_eq!(bundle.field(Metric::BiasRatio)[[0, 0]], 1.0);
        // flat baseline: zero range and zero anomaly variance
        assert!(bundle.field(Metric::Nrmse)[[0, 0]].is_nan());
        assert!(bundle.field(Metric::Acc)[[0, 0]].is_nan());
    }

    #[test]
    fn zero_baseline_mean_blanks_the_ratio() {
        let pair = point_pair(vec![1.0, 2.0, 3.0], vec![0.0, 0.0, 0.0]);
        let bundle = compute_metrics(&pair, 0.5);

        assert_eq!(bundle.field(Metric::BaselineAvg)[[0, 0]], 0.0);
        assert!(bundle.field(Metric::BiasRatio)[[0, 0]].is_nan());
    }

    #[test]
    fn missing_years_are_skipped_pairwise() {
        let pair = point_pair(vec![f64::NAN, 2.0, 4.0, 6.0], vec![1.0, 2.0, 3.0, 4.0]);
        let bundle = compute_metrics(&pair, 1.5);

        // the lane means ignore NaN independently
        assert_relative_eq!(bundle.field(Metric::ModelAvg)[[0, 0]], 4.0);
        assert_relative_eq!(bundle.field(Metric::BaselineAvg)[[0, 0]], 2.5);
        assert_relative_eq!(bundle.field(Metric::BiasRatio)[[0, 0]], 1.6);
        // paired years are 2001..2003: diffs 0, 1, 2 against range 3
        assert_relative_eq!(
            bundle.field(Metric::Nrmse)[[0, 0]],
            (5.0f64 / 3.0).sqrt() / 3.0,
            epsilon = 1e-12
        );
        // anomalies are proportional over the paired years
        assert_relative_eq!(bundle.field(Metric::Acc)[[0, 0]], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn all_nan_lane_is_nan_everywhere() {
        let pair = point_pair(vec![f64::NAN, f64::NAN], vec![1.0, 3.0]);
        let bundle = compute_metrics(&pair, 0.5);

        assert!(bundle.field(Metric::ModelAvg)[[0, 0]].is_nan());
        assert!(bundle.field(Metric::BiasRatio)[[0, 0]].is_nan());
        assert!(bundle.field(Metric::Nrmse)[[0, 0]].is_nan());
        assert!(bundle.field(Metric::Acc)[[0, 0]].is_nan());
        // the baseline side is intact
        assert_relative_eq!(bundle.field(Metric::BaselineAvg)[[0, 0]], 2.0);
    }

    #[test]
    fn cells_are_scored_independently() {
        // two cells: a flat baseline on the west cell only
        let grid = LatLonGrid::new(vec![40.0], vec![-120.0, -119.0]).unwrap();
        let model = Array3::from_shape_vec(
            (3, 1, 2),
            vec![9.0, 1.0, 10.0, 2.0, 11.0, 3.0],
        )
        .unwrap();
        let baseline = Array3::from_shape_vec(
            (3, 1, 2),
            vec![10.0, 2.0, 10.0, 4.0, 10.0, 6.0],
        )
        .unwrap();
        let pair = align(
            vec![2000, 2001, 2002],
            model,
            &grid,
            baseline,
            &grid,
            RegridTarget::Baseline,
        )
        .unwrap();
        let bundle = compute_metrics(&pair, 2.5);

        assert!(bundle.field(Metric::Nrmse)[[0, 0]].is_nan());
        assert!(bundle.field(Metric::Nrmse)[[0, 1]].is_finite());
        assert!(bundle.field(Metric::Acc)[[0, 1]].is_finite());
        assert_relative_eq!(bundle.field(Metric::BiasRatio)[[0, 1]], 0.5);
    }

    #[test]
    fn bundle_carries_lead_and_grid() {
        let pair = point_pair(vec![1.0, 2.0], vec![2.0, 4.0]);
        let bundle = compute_metrics(&pair, 3.5);
        assert_eq!(bundle.lead(), 3.5);
        assert_eq!(bundle.target(), RegridTarget::Baseline);
        assert_eq!(bundle.grid(), &point_grid());
        assert_eq!(bundle.field(Metric::Acc).dim(), (1, 1));
    }
}
