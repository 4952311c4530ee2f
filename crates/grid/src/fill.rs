//! Directional gap filling ahead of cross-grid interpolation.

use ndarray::{Array3, ArrayViewMut1, Axis};

/// Forward-then-backward fills NaN gaps along one 1-D lane.
///
/// Interior gaps take the nearest preceding value; leading NaNs take the
/// first value found. A lane with no finite values is left untouched.
fn fill_lane(mut lane: ArrayViewMut1<'_, f64>) {
    let mut last = f64::NAN;
    for v in lane.iter_mut() {
        if v.is_nan() {
            *v = last;
        } else {
            last = *v;
        }
    }
    let mut next = f64::NAN;
    for v in lane.iter_mut().rev() {
        if v.is_nan() {
            *v = next;
        } else {
            next = *v;
        }
    }
}

/// Closes NaN gaps in a stack of year slices shaped `(year, lat, lon)`.
///
/// Fills along the longitude axis first, then the latitude axis, each
/// forward then backward, independently per year slice. Matches the
/// pre-interpolation fill the verification pipeline applies to both
/// fields so grid-edge holes do not propagate as new NaNs in the aligned
/// product.
pub fn fill_gaps(stack: &mut Array3<f64>) {
    for axis in [Axis(2), Axis(1)] {
        for lane in stack.lanes_mut(axis) {
            fill_lane(lane);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn lane_fills_interior_gap_forward() {
        let mut a = array![1.0, f64::NAN, 3.0];
        fill_lane(a.view_mut());
        assert_eq!(a, array![1.0, 1.0, 3.0]);
    }

    #[test]
    fn lane_fills_leading_gap_backward() {
        let mut a = array![f64::NAN, f64::NAN, 3.0, f64::NAN];
        fill_lane(a.view_mut());
        assert_eq!(a, array![3.0, 3.0, 3.0, 3.0]);
    }

    #[test]
    fn lane_all_nan_stays_nan() {
        let mut a = array![f64::NAN, f64::NAN];
        fill_lane(a.view_mut());
        assert!(a.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn stack_fills_lon_before_lat() {
        // One year, 2x2, single NaN: the longitude pass closes it from
        // its row neighbor before the latitude pass runs.
        let mut stack = array![[[1.0, f64::NAN], [3.0, 4.0]]];
        fill_gaps(&mut stack);
        assert_eq!(stack, array![[[1.0, 1.0], [3.0, 4.0]]]);
    }

    #[test]
    fn stack_falls_back_to_lat_fill() {
        // A fully-NaN row cannot be closed along longitude; the latitude
        // pass fills it from the row below.
        let mut stack = array![[[f64::NAN, f64::NAN], [3.0, 4.0]]];
        fill_gaps(&mut stack);
        assert_eq!(stack, array![[[3.0, 4.0], [3.0, 4.0]]]);
    }

    #[test]
    fn stack_years_fill_independently() {
        let mut stack = array![
            [[1.0, f64::NAN], [1.0, 1.0]],
            [[2.0, f64::NAN], [2.0, 2.0]],
        ];
        fill_gaps(&mut stack);
        assert_eq!(stack[[0, 0, 1]], 1.0);
        assert_eq!(stack[[1, 0, 1]], 2.0);
    }

    #[test]
    fn all_nan_stack_survives() {
        let mut stack = Array3::from_elem((2, 2, 2), f64::NAN);
        fill_gaps(&mut stack);
        assert!(stack.iter().all(|v| v.is_nan()));
    }
}
