// TODO: CRPS and rank-histogram scores once member-level ensemble data is plumbed through

//! NaN-aware statistics over year samples of a single grid cell.
//!
//! Reductions over the year axis skip NaN values; a cell with no finite
//! samples reduces to NaN rather than an error, so spatial field shapes
//! survive degenerate cells.

/// Arithmetic mean over the finite values of a slice. Returns NaN if none.
pub fn nan_mean(data: &[f64]) -> f64 {
    let mut sum = 0.0;
    let mut n = 0usize;
    for &x in data {
        if x.is_finite() {
            sum += x;
            n += 1;
        }
    }
    if n == 0 { f64::NAN } else { sum / n as f64 }
}

/// Max minus min over the finite values of a slice. Returns NaN if none.
///
/// A constant series has range 0.0, not NaN; the caller decides what a
/// zero range means (the NRMSE denominator treats it as undefined).
pub fn nan_range(data: &[f64]) -> f64 {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut any = false;
    for &x in data {
        if x.is_finite() {
            min = min.min(x);
            max = max.max(x);
            any = true;
        }
    }
    if any { max - min } else { f64::NAN }
}

/// Pairs of `(x[i], y[i])` where both values are finite.
///
/// The pairwise-complete sample every two-series reduction works from;
/// indices where either side is NaN contribute nothing.
pub fn finite_pairs(x: &[f64], y: &[f64]) -> Vec<(f64, f64)> {
    x.iter()
        .zip(y.iter())
        .filter(|(xi, yi)| xi.is_finite() && yi.is_finite())
        .map(|(&xi, &yi)| (xi, yi))
        .collect()
}

/// Root-mean-square difference over the pairwise-finite samples of two
/// slices. Returns NaN if no finite pairs.
pub fn rmse(x: &[f64], y: &[f64]) -> f64 {
    let pairs = finite_pairs(x, y);
    if pairs.is_empty() {
        return f64::NAN;
    }
    let sum_sq: f64 = pairs.iter().map(|(xi, yi)| (xi - yi) * (xi - yi)).sum();
    (sum_sq / pairs.len() as f64).sqrt()
}

/// Pearson correlation coefficient.
///
/// Filters to indices where both `x[i]` and `y[i]` are finite.
/// Returns `None` if fewer than 3 finite pairs or if the denominator is zero
/// (constant input).
pub fn pearson_correlation(x: &[f64], y: &[f64]) -> Option<f64> {
    let pairs = finite_pairs(x, y);

    if pairs.len() < 3 {
        return None;
    }

    let n = pairs.len() as f64;
    let mx: f64 = pairs.iter().map(|(xi, _)| xi).sum::<f64>() / n;
    let my: f64 = pairs.iter().map(|(_, yi)| yi).sum::<f64>() / n;

    let mut sum_xy = 0.0;
    let mut sum_xx = 0.0;
    let mut sum_yy = 0.0;
    for &(xi, yi) in &pairs {
        let dx = xi - mx;
        let dy = yi - my;
        sum_xy += dx * dy;
        sum_xx += dx * dx;
        sum_yy += dy * dy;
    }

    let denom = (sum_xx * sum_yy).sqrt();
    if denom == 0.0 {
        return None;
    }

    Some(sum_xy / denom)
}
