//! Low-level NetCDF extraction helpers.

use std::path::Path;

use augur_calendar::{YearMonth, resolve_offset};
use chrono::{Datelike, NaiveDate};
use netcdf::AttributeValue;

use crate::error::IoError;

/// Open a NetCDF file at `path`, returning [`IoError::FileNotFound`] if the
/// path does not exist on disk.
pub(crate) fn open_file(path: &Path) -> Result<netcdf::File, IoError> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    Ok(netcdf::open(path)?)
}

/// Find a variable by trying each alias in order.
///
/// Returns the first alias that matches. If none match, returns
/// [`IoError::MissingVariable`] naming every alias tried.
pub(crate) fn find_variable<'f>(
    file: &'f netcdf::File,
    aliases: &[&str],
    path: &Path,
) -> Result<netcdf::Variable<'f>, IoError> {
    for &alias in aliases {
        if let Some(var) = file.variable(alias) {
            return Ok(var);
        }
    }

    Err(IoError::MissingVariable {
        name: aliases.join("/"),
        path: path.to_path_buf(),
    })
}

/// Read a 1-D `f64` variable, trying each alias in order.
pub(crate) fn read_1d_f64(
    file: &netcdf::File,
    aliases: &[&str],
    path: &Path,
) -> Result<Vec<f64>, IoError> {
    let var = find_variable(file, aliases, path)?;
    Ok(var.get_values::<f64, _>(..)?)
}

/// Read a variable's full contents as `f64` together with its dimension
/// sizes, mapping any declared `_FillValue` to NaN.
pub(crate) fn read_all_f64(var: &netcdf::Variable) -> Result<(Vec<f64>, Vec<usize>), IoError> {
    let shape: Vec<usize> = var.dimensions().iter().map(|d| d.len()).collect();
    let mut data = var.get_values::<f64, _>(..)?;

    if let Some(fill) = fill_value(var)
        && !fill.is_nan()
    {
        for v in &mut data {
            if *v == fill {
                *v = f64::NAN;
            }
        }
    }

    Ok((data, shape))
}

/// Read a variable's `_FillValue` attribute, if it carries a usable one.
fn fill_value(var: &netcdf::Variable) -> Option<f64> {
    match var.attribute_value("_FillValue")?.ok()? {
        AttributeValue::Float(v) => Some(f64::from(v)),
        AttributeValue::Double(v) => Some(v),
        _ => None,
    }
}

/// Read a time variable's `units` attribute and parse it as a month epoch.
///
/// Returns `Ok(None)` when the variable declares no units, leaving the
/// choice of epoch to the caller. A units string that is present but not of
/// the form `"months since YYYY-MM-DD"` is an error.
pub(crate) fn units_epoch(var: &netcdf::Variable) -> Result<Option<YearMonth>, IoError> {
    let Some(attr) = var.attribute_value("units") else {
        return Ok(None);
    };

    let units: String = attr
        .map_err(|e| IoError::InvalidTime {
            reason: format!("failed to read 'units' attribute: {e}"),
        })?
        .try_into()
        .map_err(|e: netcdf::Error| IoError::InvalidTime {
            reason: format!("'units' attribute is not a string: {e}"),
        })?;

    parse_months_since(&units).map(Some)
}

/// Parse a CF-style `"months since YYYY-MM-DD"` units string into the
/// epoch month.
///
/// A trailing time-of-day (`"... 00:00:00"`) is tolerated; any unit other
/// than months is rejected, since the offsets on this axis count months.
pub(crate) fn parse_months_since(units: &str) -> Result<YearMonth, IoError> {
    let parts: Vec<&str> = units.splitn(3, ' ').collect();
    if parts.len() < 3 || parts[1] != "since" {
        return Err(IoError::InvalidTime {
            reason: format!("unexpected time units format: '{units}'"),
        });
    }
    if parts[0] != "months" {
        return Err(IoError::InvalidTime {
            reason: format!("unsupported time unit '{}': expected months", parts[0]),
        });
    }

    // Take only the date portion (first 10 characters of parts[2]).
    let date_str = if parts[2].len() >= 10 {
        &parts[2][..10]
    } else {
        parts[2]
    };

    let base = NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|e| IoError::InvalidTime {
        reason: format!("failed to parse base date '{date_str}': {e}"),
    })?;

    let month = u8::try_from(base.month()).map_err(|_| IoError::InvalidTime {
        reason: format!("base date '{date_str}' has an out-of-range month"),
    })?;

    Ok(YearMonth::new(base.year(), month)?)
}

/// Decode months-since-epoch offsets into calendar months.
pub(crate) fn decode_offsets(
    epoch: YearMonth,
    offsets: &[f64],
) -> Result<Vec<YearMonth>, IoError> {
    offsets
        .iter()
        .map(|&offset| resolve_offset(epoch, offset).map_err(IoError::from))
        .collect()
}

/// Check a dimension length against the matching coordinate axis.
pub(crate) fn check_dim(name: &str, expected: usize, got: usize) -> Result<(), IoError> {
    if expected != got {
        return Err(IoError::DimensionMismatch {
            name: name.to_string(),
            expected,
            got,
        });
    }
    Ok(())
}

/// Whether a permutation returned by axis sorting leaves the data in place.
pub(crate) fn is_identity(order: &[usize]) -> bool {
    order.iter().enumerate().all(|(i, &o)| i == o)
}
