//! The per-bucket verification product.

use std::collections::BTreeMap;

use augur_grid::{LatLonGrid, RegridTarget};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

/// The five verification statistics a bundle carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Metric {
    /// `model_avg / baseline_avg`, elementwise.
    BiasRatio,
    /// RMSE over years divided by the baseline's year range.
    Nrmse,
    /// Anomaly correlation coefficient across years.
    Acc,
    /// Baseline mean over years.
    BaselineAvg,
    /// Model mean over years.
    ModelAvg,
}

impl Metric {
    /// All metrics, in reporting order.
    pub const ALL: [Metric; 5] = [
        Metric::BiasRatio,
        Metric::Nrmse,
        Metric::Acc,
        Metric::BaselineAvg,
        Metric::ModelAvg,
    ];

    /// The metric's wire/reporting name.
    pub fn name(self) -> &'static str {
        match self {
            Metric::BiasRatio => "bias_ratio",
            Metric::Nrmse => "nrmse",
            Metric::Acc => "acc",
            Metric::BaselineAvg => "baseline_avg",
            Metric::ModelAvg => "model_avg",
        }
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One bucket's verification fields on the aligned grid.
///
/// Records the lead time and regrid direction it was computed under, the
/// coordinate frame, and one 2-D field per [`Metric`]. Serializes for the
/// cache blob and for JSON reporting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricBundle {
    lead: f64,
    target: RegridTarget,
    grid: LatLonGrid,
    bias_ratio: Array2<f64>,
    nrmse: Array2<f64>,
    acc: Array2<f64>,
    baseline_avg: Array2<f64>,
    model_avg: Array2<f64>,
}

impl MetricBundle {
    pub(crate) fn new(
        lead: f64,
        target: RegridTarget,
        grid: LatLonGrid,
        bias_ratio: Array2<f64>,
        nrmse: Array2<f64>,
        acc: Array2<f64>,
        baseline_avg: Array2<f64>,
        model_avg: Array2<f64>,
    ) -> Self {
        Self {
            lead,
            target,
            grid,
            bias_ratio,
            nrmse,
            acc,
            baseline_avg,
            model_avg,
        }
    }

    /// Returns the lead time the bundle was computed for.
    pub fn lead(&self) -> f64 {
        self.lead
    }

    /// Returns which grid the pair was aligned onto before scoring.
    pub fn target(&self) -> RegridTarget {
        self.target
    }

    /// Returns the coordinate frame shared by all fields.
    pub fn grid(&self) -> &LatLonGrid {
        &self.grid
    }

    /// Returns one metric's spatial field, shaped `(lat, lon)`.
    pub fn field(&self, metric: Metric) -> &Array2<f64> {
        match metric {
            Metric::BiasRatio => &self.bias_ratio,
            Metric::Nrmse => &self.nrmse,
            Metric::Acc => &self.acc,
            Metric::BaselineAvg => &self.baseline_avg,
            Metric::ModelAvg => &self.model_avg,
        }
    }

    /// Iterates `(metric, field)` pairs in reporting order.
    pub fn fields(&self) -> impl Iterator<Item = (Metric, &Array2<f64>)> {
        Metric::ALL.into_iter().map(|m| (m, self.field(m)))
    }

    /// Fraction of NaN cells across all five fields, in [0, 1].
    ///
    /// A coarse health signal for run summaries; degenerate cells and
    /// unaligned edges both contribute.
    pub fn nan_share(&self) -> f64 {
        let mut nan = 0usize;
        let mut total = 0usize;
        for (_, field) in self.fields() {
            nan += field.iter().filter(|v| v.is_nan()).count();
            total += field.len();
        }
        if total == 0 {
            return 0.0;
        }
        nan as f64 / total as f64
    }

    /// Reads every metric at the grid cell nearest to a query point.
    ///
    /// Nearest-neighbor on each axis independently; the query longitude
    /// may use either convention. The point-query endpoint serves this
    /// verbatim.
    pub fn nearest_cell(&self, lat: f64, lon: f64) -> NearestCell {
        let (i, j) = self.grid.nearest(lat, lon);
        let values = self
            .fields()
            .map(|(metric, field)| (metric.name().to_string(), field[[i, j]]))
            .collect();
        NearestCell {
            lat: self.grid.lats()[i],
            lon: self.grid.lons()[j],
            values,
        }
    }
}

/// All metric values at one grid cell, tagged with the cell's coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearestCell {
    /// Latitude of the cell actually read.
    pub lat: f64,
    /// Longitude of the cell actually read.
    pub lon: f64,
    /// Metric name to value at the cell; NaN serializes as JSON null.
    pub values: BTreeMap<String, f64>,
}
