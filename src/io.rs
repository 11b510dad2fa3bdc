//! Text input/output around the forecasting core.
//!
//! Series files hold whitespace- or newline-separated reals. Output files hold one
//! value per line with two decimals.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::core::config::ForecastConfig;
use crate::core::error::{ForecastError, Result};

/// Training series read when no paths are given on the command line.
pub const DEFAULT_TRAIN_FILE: &str = "xtrain.txt";
/// Test series read when no paths are given on the command line.
pub const DEFAULT_TEST_FILE: &str = "xtest.txt";
/// Predictions are always written here.
pub const PREDICTIONS_FILE: &str = "ytest.txt";
/// Training targets are always written here.
pub const TARGETS_FILE: &str = "ytrain.txt";

/// Parse a series from text. `path` is only used to label errors.
///
/// # Errors
/// A token that is not a finite real number, or text with no values at all.
pub fn parse_series(text: &str, path: &Path) -> Result<Vec<f32>> {
    let mut values = Vec::new();
    for (line_no, line) in text.lines().enumerate() {
        for token in line.split_whitespace() {
            match token.parse::<f32>() {
                Ok(v) if v.is_finite() => values.push(v),
                _ => {
                    return Err(ForecastError::Parse {
                        path: path.to_path_buf(),
                        line: line_no + 1,
                        token: token.to_string(),
                    })
                }
            }
        }
    }
    if values.is_empty() {
        return Err(ForecastError::EmptySeries {
            path: path.to_path_buf(),
        });
    }
    Ok(values)
}

/// Read and parse a series file.
pub fn read_series(path: impl AsRef<Path>) -> Result<Vec<f32>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| ForecastError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let values = parse_series(&text, path)?;
    tracing::debug!(path = %path.display(), n = values.len(), "loaded series");
    Ok(values)
}

/// Write `values` one per line with two decimals, replacing any existing file.
pub fn write_values(path: impl AsRef<Path>, values: &[f32]) -> Result<()> {
    let path = path.as_ref();
    let io_err = |source: std::io::Error| ForecastError::Io {
        path: path.to_path_buf(),
        source,
    };
    let mut out = BufWriter::new(File::create(path).map_err(io_err)?);
    for v in values {
        writeln!(out, "{v:.2}").map_err(io_err)?;
    }
    out.flush().map_err(io_err)?;
    tracing::debug!(path = %path.display(), n = values.len(), "wrote values");
    Ok(())
}

/// Load a JSON [`ForecastConfig`]. Missing fields take their default values.
pub fn read_config(path: impl AsRef<Path>) -> Result<ForecastConfig> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| ForecastError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    ForecastConfig::from_json_str(&text).map_err(|source| ForecastError::ConfigFile {
        path: PathBuf::from(path),
        source,
    })
}
