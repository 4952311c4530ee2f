//! Anomaly correlation coefficient for one grid cell.

use augur_stats::finite_pairs;

/// Anomaly correlation coefficient between a model and baseline year
/// series at one cell.
///
/// Anomalies are taken against each series' own mean over the
/// pairwise-finite years; the coefficient is
/// `sum(ma·ba) / sqrt(sum(ma²)·sum(ba²))`. A zero denominator (either
/// series constant over the valid years) or an empty valid sample yields
/// NaN rather than a fault. Numerically this is a per-cell Pearson
/// correlation across years.
pub fn anomaly_correlation(model: &[f64], baseline: &[f64]) -> f64 {
    let pairs = finite_pairs(model, baseline);
    if pairs.is_empty() {
        return f64::NAN;
    }

    let n = pairs.len() as f64;
    let model_mean: f64 = pairs.iter().map(|(m, _)| m).sum::<f64>() / n;
    let baseline_mean: f64 = pairs.iter().map(|(_, b)| b).sum::<f64>() / n;

    let mut numerator = 0.0;
    let mut model_ss = 0.0;
    let mut baseline_ss = 0.0;
    for &(m, b) in &pairs {
        let ma = m - model_mean;
        let ba = b - baseline_mean;
        numerator += ma * ba;
        model_ss += ma * ma;
        baseline_ss += ba * ba;
    }

    let denominator = (model_ss * baseline_ss).sqrt();
    if denominator == 0.0 {
        f64::NAN
    } else {
        numerator / denominator
    }
}
