//! Year-resolved temporal grouping within one bucket.

use std::collections::BTreeMap;

use ndarray::{Array2, Array3, ArrayViewMut2, Axis};

/// One bucket's records, reduced to a year-resolved stack.
///
/// Each year slice averages that year's in-bucket records (one per
/// matching calendar month), so a seasonal bucket carries one field per
/// year, not three. Cross-year statistics run over the leading axis; the
/// year-averaged form mean-based statistics need is derived on demand by
/// [`year_mean`](TemporalGroup::year_mean).
#[derive(Debug, Clone)]
pub struct TemporalGroup {
    label: String,
    years: Vec<i32>,
    data: Array3<f64>,
}

impl TemporalGroup {
    /// Returns the bucket label this group was selected by.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the years covered, ascending.
    pub fn years(&self) -> &[i32] {
        &self.years
    }

    /// Returns the year-resolved stack, shaped `(year, lat, lon)`.
    pub fn data(&self) -> &Array3<f64> {
        &self.data
    }

    /// Consumes the group, yielding the year-resolved stack.
    pub fn into_data(self) -> Array3<f64> {
        self.data
    }

    /// NaN-aware mean over the year axis, shaped `(lat, lon)`.
    pub fn year_mean(&self) -> Array2<f64> {
        let (n_years, n_lat, n_lon) = self.data.dim();
        let mut out = Array2::from_elem((n_lat, n_lon), f64::NAN);
        for ((i, j), cell) in out.indexed_iter_mut() {
            let mut sum = 0.0;
            let mut n = 0usize;
            for k in 0..n_years {
                let v = self.data[[k, i, j]];
                if v.is_finite() {
                    sum += v;
                    n += 1;
                }
            }
            if n > 0 {
                *cell = sum / n as f64;
            }
        }
        out
    }
}

/// Builds a group from a series stack and a year → record-indices map.
///
/// `years` fixes the leading axis. A year absent from `by_year` leaves an
/// all-NaN slice; callers intersect years first, so every slice is
/// normally populated.
pub(crate) fn build_group(
    label: &str,
    years: &[i32],
    by_year: &BTreeMap<i32, Vec<usize>>,
    data: &Array3<f64>,
) -> TemporalGroup {
    let (_, n_lat, n_lon) = data.dim();
    let mut stack = Array3::from_elem((years.len(), n_lat, n_lon), f64::NAN);
    for (k, year) in years.iter().enumerate() {
        if let Some(indices) = by_year.get(year) {
            average_records(stack.index_axis_mut(Axis(0), k), data, indices);
        }
    }
    TemporalGroup {
        label: label.to_string(),
        years: years.to_vec(),
        data: stack,
    }
}

/// NaN-aware mean of the selected time records, written cell by cell.
fn average_records(mut dest: ArrayViewMut2<f64>, data: &Array3<f64>, indices: &[usize]) {
    for ((i, j), cell) in dest.indexed_iter_mut() {
        let mut sum = 0.0;
        let mut n = 0usize;
        for &t in indices {
            let v = data[[t, i, j]];
            if v.is_finite() {
                sum += v;
                n += 1;
            }
        }
        *cell = if n == 0 { f64::NAN } else { sum / n as f64 };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::Array;

    // 6 records (two years of Jan/Feb/Mar), 1x2 grid;
    // value = 100*t at cell 0, 100*t + 1 at cell 1
    fn series_stack() -> Array3<f64> {
        Array::from_shape_fn((6, 1, 2), |(t, _, j)| (100 * t + j) as f64)
    }

    fn by_year() -> BTreeMap<i32, Vec<usize>> {
        BTreeMap::from([(1991, vec![0, 1, 2]), (1992, vec![3, 4, 5])])
    }

    #[test]
    fn averages_within_each_year() {
        let group = build_group("Jan-Mar", &[1991, 1992], &by_year(), &series_stack());
        assert_eq!(group.label(), "Jan-Mar");
        assert_eq!(group.years(), &[1991, 1992]);
        assert_eq!(group.data().dim(), (2, 1, 2));
        // year 1991 averages records 0..3: (0 + 100 + 200) / 3
        assert_relative_eq!(group.data()[[0, 0, 0]], 100.0);
        assert_relative_eq!(group.data()[[0, 0, 1]], 101.0);
        assert_relative_eq!(group.data()[[1, 0, 0]], 400.0);
    }

    #[test]
    fn year_mean_collapses_the_leading_axis() {
        let group = build_group("Jan-Mar", &[1991, 1992], &by_year(), &series_stack());
        let mean = group.year_mean();
        assert_eq!(mean.dim(), (1, 2));
        assert_relative_eq!(mean[[0, 0]], 250.0);
        assert_relative_eq!(mean[[0, 1]], 251.0);
    }

    #[test]
    fn nan_records_are_skipped_in_the_average() {
        let mut data = series_stack();
        data[[0, 0, 0]] = f64::NAN;
        let group = build_group("Jan-Mar", &[1991, 1992], &by_year(), &data);
        // 1991 cell 0 now averages records 1 and 2 only
        assert_relative_eq!(group.data()[[0, 0, 0]], 150.0);
        // the neighbouring cell is untouched
        assert_relative_eq!(group.data()[[0, 0, 1]], 101.0);
    }

    #[test]
    fn all_nan_year_stays_nan() {
        let mut data = series_stack();
        for t in 0..3 {
            data[[t, 0, 0]] = f64::NAN;
        }
        let group = build_group("Jan-Mar", &[1991, 1992], &by_year(), &data);
        assert!(group.data()[[0, 0, 0]].is_nan());
        // the year mean then sees one finite year
        assert_relative_eq!(group.year_mean()[[0, 0]], 400.0);
    }

    #[test]
    fn absent_year_yields_nan_slice() {
        let group = build_group("Jan-Mar", &[1991, 1993], &by_year(), &series_stack());
        assert_relative_eq!(group.data()[[0, 0, 0]], 100.0);
        assert!(group.data()[[1, 0, 0]].is_nan());
        assert!(group.data()[[1, 0, 1]].is_nan());
    }
}
