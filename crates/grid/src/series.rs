//! In-memory gridded time series for the two input datasets.

use augur_calendar::YearMonth;
use ndarray::{Array3, Array4, Axis};

use crate::error::GridError;
use crate::grid::LatLonGrid;

/// Tolerance when matching a requested lead against the stored lead axis.
///
/// Leads are exact halves by convention (0.5, 1.5, …); the tolerance only
/// absorbs file-format rounding.
const LEAD_TOLERANCE: f64 = 1e-6;

/// A gridded monthly series shaped `(time, lat, lon)`.
///
/// The baseline dataset is one of these; a model dataset becomes one after
/// lead selection.
#[derive(Debug, Clone)]
pub struct GriddedSeries {
    times: Vec<YearMonth>,
    grid: LatLonGrid,
    data: Array3<f64>,
}

impl GriddedSeries {
    /// Creates a series, checking that `data` is shaped
    /// `(times.len(), n_lat, n_lon)`.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::ShapeMismatch`] on any disagreement.
    pub fn new(
        times: Vec<YearMonth>,
        grid: LatLonGrid,
        data: Array3<f64>,
    ) -> Result<Self, GridError> {
        let (n_lat, n_lon) = grid.shape();
        let expected = [times.len(), n_lat, n_lon];
        if data.shape() != expected {
            return Err(GridError::ShapeMismatch {
                field: "series",
                expected: expected.to_vec(),
                got: data.shape().to_vec(),
            });
        }
        Ok(Self { times, grid, data })
    }

    /// Returns the time axis.
    pub fn times(&self) -> &[YearMonth] {
        &self.times
    }

    /// Returns the coordinate frame.
    pub fn grid(&self) -> &LatLonGrid {
        &self.grid
    }

    /// Returns the data, shaped `(time, lat, lon)`.
    pub fn data(&self) -> &Array3<f64> {
        &self.data
    }

    /// Returns the number of time records.
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Returns `true` when the series has no time records.
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }
}

/// A model forecast series shaped `(time, lead, lat, lon)`.
///
/// The time axis is forecast issuance; the lead axis is months ahead of
/// issuance (exact halves by convention). Ensemble members are already
/// averaged away by the reader.
#[derive(Debug, Clone)]
pub struct ModelSeries {
    times: Vec<YearMonth>,
    leads: Vec<f64>,
    grid: LatLonGrid,
    data: Array4<f64>,
}

impl ModelSeries {
    /// Creates a series, checking that `data` is shaped
    /// `(times.len(), leads.len(), n_lat, n_lon)` and that the lead axis is
    /// strictly increasing.
    ///
    /// # Errors
    ///
    /// Returns [`GridError`] on shape disagreement or a non-monotonic lead
    /// axis.
    pub fn new(
        times: Vec<YearMonth>,
        leads: Vec<f64>,
        grid: LatLonGrid,
        data: Array4<f64>,
    ) -> Result<Self, GridError> {
        if leads.is_empty() {
            return Err(GridError::EmptyAxis { axis: "lead" });
        }
        for (index, pair) in leads.windows(2).enumerate() {
            if !(pair[0] < pair[1]) {
                return Err(GridError::NonMonotonicAxis {
                    axis: "lead",
                    index,
                });
            }
        }
        let (n_lat, n_lon) = grid.shape();
        let expected = [times.len(), leads.len(), n_lat, n_lon];
        if data.shape() != expected {
            return Err(GridError::ShapeMismatch {
                field: "model",
                expected: expected.to_vec(),
                got: data.shape().to_vec(),
            });
        }
        Ok(Self {
            times,
            leads,
            grid,
            data,
        })
    }

    /// Returns the issuance time axis.
    pub fn times(&self) -> &[YearMonth] {
        &self.times
    }

    /// Returns the lead axis, ascending.
    pub fn leads(&self) -> &[f64] {
        &self.leads
    }

    /// Returns the coordinate frame.
    pub fn grid(&self) -> &LatLonGrid {
        &self.grid
    }

    /// Returns the data, shaped `(time, lead, lat, lon)`.
    pub fn data(&self) -> &Array4<f64> {
        &self.data
    }

    /// Extracts the `(time, lat, lon)` slice for one lead time.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::UnknownLead`] when no axis value matches the
    /// request within tolerance.
    pub fn select_lead(&self, lead: f64) -> Result<GriddedSeries, GridError> {
        let k = self
            .leads
            .iter()
            .position(|&l| (l - lead).abs() <= LEAD_TOLERANCE)
            .ok_or_else(|| GridError::UnknownLead {
                lead,
                available: self.leads.clone(),
            })?;
        let data = self.data.index_axis(Axis(1), k).to_owned();
        GriddedSeries::new(self.times.clone(), self.grid.clone(), data)
    }
}
