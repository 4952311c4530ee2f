//! Integration tests for the baseline archive reader.
//!
//! Each test writes per-month NetCDF files into a tempdir and reads them
//! back through `read_baseline`, covering label ordering, axis
//! normalization, fill handling, and cross-file consistency checks.

use std::path::{Path, PathBuf};

use augur_io::{BaselineReaderConfig, IoError, read_baseline};
use tempfile::tempdir;

// ---------------------------------------------------------------------------
// Helper: per-month NetCDF fixture
// ---------------------------------------------------------------------------

/// Configuration for building one baseline month file.
struct MonthFixture {
    stem: String,
    var_name: String,
    lats: Vec<f64>,
    lons: Vec<f64>,
    /// Flat data in `(y, x)` order.
    values: Vec<f64>,
    /// Write the `(date, y, x)` form with a length-1 leading dimension.
    with_time_dim: bool,
    fill_value: Option<f64>,
}

impl MonthFixture {
    fn new(stem: &str, values: Vec<f64>) -> Self {
        Self {
            stem: stem.to_string(),
            var_name: "precip".to_string(),
            lats: vec![40.0, 41.0],
            lons: vec![-120.0, -119.0],
            values,
            with_time_dim: false,
            fill_value: None,
        }
    }

    fn with_var_name(mut self, name: &str) -> Self {
        self.var_name = name.to_string();
        self
    }

    fn with_lats(mut self, lats: Vec<f64>) -> Self {
        self.lats = lats;
        self
    }

    fn with_lons(mut self, lons: Vec<f64>) -> Self {
        self.lons = lons;
        self
    }

    fn with_time_dim(mut self) -> Self {
        self.with_time_dim = true;
        self
    }

    fn with_fill_value(mut self, fv: f64) -> Self {
        self.fill_value = Some(fv);
        self
    }

    /// Write the fixture to `<dir>/<stem>.nc` and return the path.
    fn write(&self, dir: &Path) -> PathBuf {
        let path = dir.join(format!("{}.nc", self.stem));
        let mut file = netcdf::create(&path).expect("create baseline file");

        let ny = self.lats.len();
        let nx = self.lons.len();
        assert_eq!(self.values.len(), ny * nx, "fixture data length");

        if self.with_time_dim {
            file.add_dimension("date", 1).expect("add dim date");
        }
        file.add_dimension("y", ny).expect("add dim y");
        file.add_dimension("x", nx).expect("add dim x");

        {
            let mut var = file.add_variable::<f64>("y", &["y"]).expect("add var y");
            var.put_values(&self.lats, ..).expect("put y values");
        }
        {
            let mut var = file.add_variable::<f64>("x", &["x"]).expect("add var x");
            var.put_values(&self.lons, ..).expect("put x values");
        }

        let dims: Vec<&str> = if self.with_time_dim {
            vec!["date", "y", "x"]
        } else {
            vec!["y", "x"]
        };
        {
            let mut var = file
                .add_variable::<f64>(&self.var_name, &dims)
                .expect("add precip var");
            if let Some(fv) = self.fill_value {
                var.put_attribute("_FillValue", fv).expect("add fill value");
            }
            var.put_values(&self.values, ..).expect("put precip values");
        }

        path
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
fn months_sort_by_label() {
    let dir = tempdir().unwrap();
    let feb = MonthFixture::new("202302", vec![5.0, 6.0, 7.0, 8.0]).write(dir.path());
    let jan = MonthFixture::new("202301", vec![1.0, 2.0, 3.0, 4.0]).write(dir.path());

    // Paths deliberately out of order.
    let series = read_baseline(&[feb, jan], &BaselineReaderConfig::default()).unwrap();

    assert_eq!(series.len(), 2);
    assert_eq!(series.times()[0].to_string(), "202301");
    assert_eq!(series.times()[1].to_string(), "202302");
    assert_eq!(series.data()[[0, 0, 0]], 1.0);
    assert_eq!(series.data()[[1, 0, 0]], 5.0);
}

#[test]
fn length_one_time_dimension_is_squeezed() {
    let dir = tempdir().unwrap();
    let path = MonthFixture::new("202301", vec![1.0, 2.0, 3.0, 4.0])
        .with_time_dim()
        .write(dir.path());

    let series = read_baseline(&[path], &BaselineReaderConfig::default()).unwrap();

    assert_eq!(series.data().shape(), &[1, 2, 2]);
    assert_eq!(series.data()[[0, 1, 1]], 4.0);
}

#[test]
fn duplicate_label_is_rejected() {
    let dir_a = tempdir().unwrap();
    let dir_b = tempdir().unwrap();
    let a = MonthFixture::new("202301", vec![1.0, 2.0, 3.0, 4.0]).write(dir_a.path());
    let b = MonthFixture::new("202301", vec![5.0, 6.0, 7.0, 8.0]).write(dir_b.path());

    let err = read_baseline(&[a, b], &BaselineReaderConfig::default()).unwrap_err();
    assert!(matches!(err, IoError::DuplicateLabel { .. }));
    assert!(err.to_string().contains("202301"));
}

#[test]
fn descending_latitudes_flip_to_ascending() {
    let dir = tempdir().unwrap();
    // Raster convention: north row first.
    let path = MonthFixture::new("202301", vec![1.0, 2.0, 3.0, 4.0])
        .with_lats(vec![41.0, 40.0])
        .write(dir.path());

    let series = read_baseline(&[path], &BaselineReaderConfig::default()).unwrap();

    assert_eq!(series.grid().lats(), &[40.0, 41.0]);
    // Row for 40 N is now first.
    assert_eq!(series.data()[[0, 0, 0]], 3.0);
    assert_eq!(series.data()[[0, 1, 0]], 1.0);
}

#[test]
fn fill_values_become_nan() {
    let dir = tempdir().unwrap();
    let path = MonthFixture::new("202301", vec![-9999.0, 2.0, 3.0, 4.0])
        .with_fill_value(-9999.0)
        .write(dir.path());

    let series = read_baseline(&[path], &BaselineReaderConfig::default()).unwrap();

    assert!(series.data()[[0, 0, 0]].is_nan());
    assert_eq!(series.data()[[0, 0, 1]], 2.0);
}

#[test]
fn grid_mismatch_between_files_is_rejected() {
    let dir = tempdir().unwrap();
    let a = MonthFixture::new("202301", vec![1.0, 2.0, 3.0, 4.0]).write(dir.path());
    let b = MonthFixture::new("202302", vec![5.0, 6.0, 7.0, 8.0])
        .with_lons(vec![-120.0, -118.0])
        .write(dir.path());

    let err = read_baseline(&[a, b], &BaselineReaderConfig::default()).unwrap_err();
    assert!(matches!(err, IoError::Mismatch { .. }));
    assert!(err.to_string().contains("spatial grid"));
}

#[test]
fn non_label_file_name_is_rejected() {
    let dir = tempdir().unwrap();
    let path = MonthFixture::new("readme", vec![1.0, 2.0, 3.0, 4.0]).write(dir.path());

    let err = read_baseline(&[path], &BaselineReaderConfig::default()).unwrap_err();
    assert!(matches!(err, IoError::InvalidTime { .. }));
    assert!(err.to_string().contains("readme"));
}

#[test]
fn custom_variable_name_is_honoured() {
    let dir = tempdir().unwrap();
    let path = MonthFixture::new("202301", vec![1.0, 2.0, 3.0, 4.0])
        .with_var_name("ppt")
        .write(dir.path());

    let err = read_baseline(
        std::slice::from_ref(&path),
        &BaselineReaderConfig::default(),
    )
    .unwrap_err();
    assert!(matches!(err, IoError::MissingVariable { .. }));
    assert!(err.to_string().contains("precip"));

    let config = BaselineReaderConfig::default().with_precip_var("ppt");
    let series = read_baseline(&[path], &config).unwrap();
    assert_eq!(series.data()[[0, 0, 0]], 1.0);
}

#[test]
fn empty_path_list_is_an_error() {
    let err = read_baseline(&[], &BaselineReaderConfig::default()).unwrap_err();
    assert_eq!(err.to_string(), "no baseline files to read");
}
